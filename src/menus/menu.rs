//! The top-level menu loop: show the options, run whichever one the
//! user picks, repeat until they're done.

use tracing::{debug, instrument, warn};

use super::converter::{await_response, ResponseMode, Waited};
use super::option::MenuOption;
use crate::context::{MenuContext, MessageHandle, Prompt};
use crate::error::MenuError;
use crate::ui::{Button, ButtonStyle, MessageComponents};

const DONE_BUTTON_ID: &str = "menu:done";

/// An interactive settings menu: a named list of options, each rendered
/// as a button.
pub struct Menu {
    display: String,
    options: Vec<MenuOption>,
}

#[bon::bon]
impl Menu {
    #[builder]
    pub fn new(#[builder(into)] display: String, options: Vec<MenuOption>) -> Self {
        Self { display, options }
    }
}

impl Menu {
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    /// Shows the menu and dispatches option runs until the user presses
    /// Done, the menu times out, or the interaction is abandoned.
    ///
    /// A failed or timed-out option notifies the user and returns to the
    /// menu; it never tears the whole menu down.
    #[instrument(skip_all, fields(menu = %self.display))]
    pub async fn run(&self, ctx: &mut MenuContext) -> Result<(), MenuError> {
        let mut components = MessageComponents::default();
        let buttons = self
            .options
            .iter()
            .map(MenuOption::button)
            .chain([Button::preset("Done", DONE_BUTTON_ID, ButtonStyle::Secondary)]);
        components.add_buttons_with_rows(buttons);
        let valid = components.custom_ids();

        let mut handle: Option<MessageHandle> = None;
        let outcome = loop {
            // Re-present each pass so the menu follows the prompts an
            // option just ran.
            if let Some(stale) = handle.take() {
                if let Err(error) = ctx.frontend.delete_message(stale).await {
                    debug!(%error, "failed to delete stale menu message");
                }
            }
            handle = ctx
                .frontend
                .present(Prompt::with_components(&self.display, &components))
                .await?;

            let author = ctx.author;
            let notice = ctx.config.wrong_user_notice();
            let waited = tokio::time::timeout(
                ctx.config.prompt_timeout(),
                await_response(
                    &mut ctx.frontend,
                    author,
                    notice,
                    &ResponseMode::Components(valid.clone()),
                ),
            )
            .await;

            let waited = match waited {
                Ok(result) => result?,
                // An idle menu just closes.
                Err(_) => break Ok(()),
            };
            let response = match waited {
                Waited::Response(response) => response,
                Waited::Cancelled => break Ok(()),
            };
            let Some(custom_id) = response.custom_id() else {
                continue;
            };
            if custom_id == DONE_BUTTON_ID {
                break Ok(());
            }
            let Some(option) = self.options.iter().find(|o| o.custom_id() == custom_id) else {
                continue;
            };

            match option.run(ctx).await {
                Ok(()) => {}
                Err(error @ (MenuError::ConverterFailure | MenuError::ConverterTimeout { .. })) => {
                    debug!(%error, option = option.display(), "option run failed, returning to menu");
                    let text = error.to_string();
                    if let Err(send_error) = ctx.frontend.send_notice(ctx.author, &text).await {
                        warn!(%send_error, "failed to deliver option failure notice");
                    }
                }
                Err(error) => break Err(error),
            }
        };

        if let Some(handle) = handle {
            if let Err(error) = ctx.frontend.delete_message(handle).await {
                debug!(%error, "failed to delete menu message");
            }
        }
        outcome
    }
}
