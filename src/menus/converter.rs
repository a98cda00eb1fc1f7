//! Prompting the user and converting what they send back.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, instrument, warn};

use super::check::{Check, CheckFailureAction};
use crate::context::{Frontend, MenuContext, MessageHandle, Prompt, Response};
use crate::data::MenuValue;
use crate::error::MenuError;
use crate::id::UserId;
use crate::ui::{ActionRow, Button, ButtonStyle, MessageComponents, Modal, TextInput};

/// Turns a validated response into a value, or `None` when it doesn't
/// parse.
pub type ConvertFn = Arc<
    dyn for<'a> Fn(&'a mut MenuContext, &'a Response) -> BoxFuture<'a, Option<MenuValue>>
        + Send
        + Sync,
>;

const INPUT_BUTTON_ID: &str = "menu:input";
const CANCEL_BUTTON_ID: &str = "menu:cancel";
const MODAL_ID: &str = "menu:modal";
const WRONG_USER_NOTICE: &str = "These buttons are not for you.";

/// A single question asked of the user: a prompt, the checks the answer
/// must pass, and the conversion into a stored value.
#[derive(Clone)]
pub struct Converter {
    prompt: String,
    checks: Vec<Check>,
    convert: ConvertFn,
    components: Option<MessageComponents>,
    timeout_message: Option<String>,
}

/// How a prompt accepts input.
pub(crate) enum ResponseMode<'a> {
    /// Only interactions on the attached components count.
    Components(Vec<String>),
    /// Plain messages from the author count, alongside an Input button
    /// that opens this modal and a Cancel button.
    FreeForm(&'a Modal),
}

pub(crate) enum Waited {
    Response(Response),
    Cancelled,
}

#[bon::bon]
impl Converter {
    /// Builds a converter. Without an explicit `convert` function the
    /// response's text is taken verbatim.
    #[builder]
    pub fn new(
        #[builder(into)] prompt: String,
        #[builder(default)] checks: Vec<Check>,
        convert: Option<ConvertFn>,
        components: Option<MessageComponents>,
        #[builder(into)] timeout_message: Option<String>,
    ) -> Self {
        Self {
            prompt,
            checks,
            convert: convert.unwrap_or_else(text_convert),
            components,
            timeout_message,
        }
    }
}

impl Converter {
    /// A free-form text question.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::builder().prompt(prompt.into()).build()
    }

    /// A free-form question whose answer must parse as an integer.
    pub fn integer(prompt: impl Into<String>) -> Self {
        Self::builder()
            .prompt(prompt.into())
            .convert(sync_convert(|response| {
                response
                    .text()
                    .and_then(|text| text.trim().parse().ok())
                    .map(MenuValue::Integer)
            }))
            .build()
    }

    /// A yes/no question answered through a pair of buttons.
    pub fn boolean(prompt: impl Into<String>) -> Self {
        Self::builder()
            .prompt(prompt.into())
            .components(MessageComponents::boolean_buttons("yes", "no"))
            .convert(sync_convert(|response| match response.custom_id() {
                Some("yes") => Some(MenuValue::Bool(true)),
                Some("no") => Some(MenuValue::Bool(false)),
                _ => None,
            }))
            .build()
    }

    /// Asks the question and returns the converted answer.
    ///
    /// Returns `Ok(None)` when the user cancels or the answer doesn't
    /// convert; the caller decides whether that is acceptable. Every
    /// prompt sent is recorded in `cleanup` so the caller can delete it.
    #[instrument(skip_all, fields(prompt = %self.prompt))]
    pub async fn run(
        &self,
        ctx: &mut MenuContext,
        cleanup: &mut Vec<MessageHandle>,
    ) -> Result<Option<MenuValue>, MenuError> {
        let fallback = free_form_components();
        let modal = free_form_modal(&self.prompt);

        let (components, mode) = match &self.components {
            Some(components) => (components, ResponseMode::Components(components.custom_ids())),
            None => (&fallback, ResponseMode::FreeForm(&modal)),
        };

        let mut override_text: Option<String> = None;
        loop {
            let content = override_text.as_deref().unwrap_or(&self.prompt);
            let handle = ctx
                .frontend
                .present(Prompt::with_components(content, components))
                .await?;
            cleanup.extend(handle);

            let timeout = ctx.config.prompt_timeout();
            let author = ctx.author;
            let notice = ctx.config.wrong_user_notice();
            let waited = tokio::time::timeout(
                timeout,
                await_response(&mut ctx.frontend, author, notice, &mode),
            )
            .await
            .map_err(|_| MenuError::ConverterTimeout {
                message: self.timeout_message.clone(),
            })??;

            let response = match waited {
                Waited::Response(response) => response,
                Waited::Cancelled => {
                    debug!("prompt cancelled");
                    return Ok(None);
                }
            };

            if let Some(failed) = self.checks.iter().find(|check| !check.run(&response)) {
                match failed.on_failure() {
                    CheckFailureAction::Retry => {
                        debug!("check failed, re-prompting");
                        override_text = Some(failed.message().to_string());
                        continue;
                    }
                    CheckFailureAction::Fail => {
                        debug!("check failed, aborting");
                        return Err(MenuError::ConverterFailure);
                    }
                }
            }

            return Ok((self.convert)(ctx, &response).await);
        }
    }
}

/// Waits for an acceptable action from the prompt's author, ignoring
/// everything else.
pub(crate) async fn await_response(
    frontend: &mut Box<dyn Frontend>,
    author: UserId,
    notice: bool,
    mode: &ResponseMode<'_>,
) -> Result<Waited, MenuError> {
    loop {
        let response = frontend
            .next_response()
            .await
            .ok_or(MenuError::Abandoned)?;

        if response.user() != author {
            if notice && response.custom_id().is_some() {
                if let Err(error) = frontend.send_notice(response.user(), WRONG_USER_NOTICE).await
                {
                    warn!(%error, "failed to send wrong-user notice");
                }
            }
            continue;
        }

        match mode {
            ResponseMode::Components(valid) => match response.custom_id() {
                Some(id) if valid.iter().any(|v| v == id) => {
                    return Ok(Waited::Response(response))
                }
                _ => continue,
            },
            ResponseMode::FreeForm(modal) => match &response {
                Response::Message { .. } => return Ok(Waited::Response(response)),
                Response::ComponentClick { custom_id, .. } if custom_id == CANCEL_BUTTON_ID => {
                    return Ok(Waited::Cancelled)
                }
                Response::ComponentClick { custom_id, .. } if custom_id == INPUT_BUTTON_ID => {
                    frontend.open_modal(modal).await?;
                }
                Response::ModalSubmit { custom_id, .. } if *custom_id == modal.custom_id => {
                    return Ok(Waited::Response(response))
                }
                _ => continue,
            },
        }
    }
}

fn text_convert() -> ConvertFn {
    sync_convert(|response| response.text().map(|text| MenuValue::Text(text.to_string())))
}

/// Lifts a synchronous conversion into a [`ConvertFn`].
pub fn sync_convert(
    f: impl Fn(&Response) -> Option<MenuValue> + Send + Sync + 'static,
) -> ConvertFn {
    Arc::new(move |_ctx, response| {
        let value = f(response);
        Box::pin(std::future::ready(value))
    })
}

/// The Input/Cancel row attached to free-form prompts.
fn free_form_components() -> MessageComponents {
    let input = Button::preset("Input", INPUT_BUTTON_ID, ButtonStyle::Primary);
    let cancel = Button::preset("Cancel", CANCEL_BUTTON_ID, ButtonStyle::Danger);
    MessageComponents::new(vec![ActionRow::new(vec![input.into(), cancel.into()])])
}

fn free_form_modal(prompt: &str) -> Modal {
    let input = TextInput::builder()
        .label(prompt.chars().take(45).collect::<String>())
        .custom_id("menu:modal:value")
        .build();
    Modal::single_input("Input", MODAL_ID, input)
}
