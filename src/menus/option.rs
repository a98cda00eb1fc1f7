//! A single menu entry: its prompts and the callbacks run on the
//! collected values.

use tracing::{debug, instrument};
use uuid::Uuid;

use super::converter::Converter;
use super::MenuCallback;
use crate::context::MenuContext;
use crate::data::MenuValue;
use crate::error::MenuError;
use crate::ui::{Button, ButtonStyle};

/// One selectable entry in a menu.
///
/// Running an option walks its converters in order, then hands the
/// collected values to the persistence callback and the cache callback,
/// in that order. Prompt messages are deleted afterwards whether the run
/// succeeded or not.
pub struct MenuOption {
    display: String,
    component_display: String,
    component_custom_id: String,
    converters: Vec<Converter>,
    callback: Option<MenuCallback>,
    cache_callback: Option<MenuCallback>,
    allow_none: bool,
}

#[bon::bon]
impl MenuOption {
    #[builder]
    pub fn new(
        #[builder(into)] display: String,
        #[builder(into)] component_display: Option<String>,
        #[builder(into)] component_custom_id: Option<String>,
        #[builder(default)] converters: Vec<Converter>,
        callback: Option<MenuCallback>,
        cache_callback: Option<MenuCallback>,
        #[builder(default = false)] allow_none: bool,
    ) -> Self {
        let component_display = component_display.unwrap_or_else(|| display.clone());
        Self {
            display,
            component_display,
            component_custom_id: component_custom_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            converters,
            callback,
            cache_callback,
            allow_none,
        }
    }
}

impl MenuOption {
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn custom_id(&self) -> &str {
        &self.component_custom_id
    }

    /// The button that selects this option in its menu.
    pub fn button(&self) -> Button {
        Button::preset(
            &self.component_display,
            &self.component_custom_id,
            ButtonStyle::Primary,
        )
    }

    /// Runs every converter, cleans up the prompts, then fires the
    /// callbacks. Callbacks run only when every converter produced a
    /// value (or `allow_none` let a skipped one through).
    #[instrument(skip_all, fields(option = %self.display))]
    pub async fn run(&self, ctx: &mut MenuContext) -> Result<(), MenuError> {
        let mut cleanup = Vec::new();
        let result = self.collect_values(ctx, &mut cleanup).await;

        // Best-effort: a prompt we can't delete shouldn't mask the run's
        // real outcome.
        for handle in cleanup {
            if let Err(error) = ctx.frontend.delete_message(handle).await {
                debug!(%error, "failed to delete prompt message");
            }
        }

        let values = result?;
        if let Some(callback) = &self.callback {
            callback(ctx, &values).await?;
        }
        if let Some(cache_callback) = &self.cache_callback {
            cache_callback(ctx, &values).await?;
        }
        Ok(())
    }

    async fn collect_values(
        &self,
        ctx: &mut MenuContext,
        cleanup: &mut Vec<crate::context::MessageHandle>,
    ) -> Result<Vec<MenuValue>, MenuError> {
        let mut values = Vec::with_capacity(self.converters.len());
        for converter in &self.converters {
            match converter.run(ctx, cleanup).await? {
                Some(value) => values.push(value),
                None if self.allow_none => values.push(MenuValue::None),
                None => return Err(MenuError::ConverterFailure),
            }
        }
        Ok(values)
    }
}

impl std::fmt::Debug for MenuOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuOption")
            .field("display", &self.display)
            .field("component_custom_id", &self.component_custom_id)
            .field("converters", &self.converters.len())
            .field("allow_none", &self.allow_none)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::context::test_support::context;
    use crate::context::Response;
    use crate::id::UserId;
    use crate::menus::callback_from_sync;
    use crate::menus::check::Check;

    fn author() -> UserId {
        UserId::from(10)
    }

    fn message(content: &str) -> Response {
        Response::Message {
            author: author(),
            content: content.to_string(),
        }
    }

    type CallLog = Arc<Mutex<Vec<(&'static str, Vec<MenuValue>)>>>;

    fn recorder(name: &'static str, log: &CallLog) -> MenuCallback {
        let log = Arc::clone(log);
        callback_from_sync(move |_ctx, values| {
            log.lock().unwrap().push((name, values.to_vec()));
            Ok(())
        })
    }

    #[tokio::test]
    async fn callbacks_run_in_order_with_the_collected_values() -> Result<(), MenuError> {
        let (mut ctx, tx, log, _db) = context(author(), None);
        tx.send(message("42")).unwrap();

        let calls: CallLog = Arc::default();
        let option = MenuOption::builder()
            .display("Set the answer")
            .converters(vec![Converter::text("What is the answer?")])
            .callback(recorder("callback", &calls))
            .cache_callback(recorder("cache", &calls))
            .build();

        option.run(&mut ctx).await?;

        let calls = calls.lock().unwrap();
        let expected = vec![MenuValue::Text("42".into())];
        assert_eq!(*calls, [("callback", expected.clone()), ("cache", expected)]);

        // The prompt was cleaned up afterwards.
        let log = log.lock().unwrap();
        assert_eq!(log.deleted.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn retry_then_success_presents_twice_and_fires_once() -> Result<(), MenuError> {
        let (mut ctx, tx, log, _db) = context(author(), None);
        tx.send(message("nope")).unwrap();
        tx.send(message("12")).unwrap();

        let calls: CallLog = Arc::default();
        let converter = Converter::builder()
            .prompt("Pick a number")
            .checks(vec![Check::new(|r| {
                r.text().is_some_and(|t| t.trim().parse::<i64>().is_ok())
            })
            .retry_on_failure()])
            .build();
        let option = MenuOption::builder()
            .display("Number")
            .converters(vec![converter])
            .callback(recorder("callback", &calls))
            .build();

        option.run(&mut ctx).await?;
        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(log.lock().unwrap().presented.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn failed_check_aborts_without_firing_callbacks() {
        let (mut ctx, tx, log, _db) = context(author(), None);
        tx.send(message("anything")).unwrap();

        let calls: CallLog = Arc::default();
        let converter = Converter::builder()
            .prompt("Pick")
            .checks(vec![Check::new(|_| false)])
            .build();
        let option = MenuOption::builder()
            .display("Strict")
            .converters(vec![converter])
            .callback(recorder("callback", &calls))
            .cache_callback(recorder("cache", &calls))
            .build();

        let error = option.run(&mut ctx).await.unwrap_err();
        assert!(matches!(error, MenuError::ConverterFailure));
        assert!(calls.lock().unwrap().is_empty());
        // Prompts are still cleaned up on failure.
        assert_eq!(log.lock().unwrap().deleted.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_aborts_without_firing_callbacks() {
        let (mut ctx, tx, _log, _db) = context(author(), None);
        let _tx = tx;

        let calls: CallLog = Arc::default();
        let converter = Converter::builder()
            .prompt("Hurry")
            .timeout_message("Come back later.")
            .build();
        let option = MenuOption::builder()
            .display("Slow")
            .converters(vec![converter])
            .callback(recorder("callback", &calls))
            .build();

        let error = option.run(&mut ctx).await.unwrap_err();
        assert!(error.is_timeout());
        assert_eq!(error.to_string(), "Come back later.");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancelled_prompt_records_none_when_allowed() -> Result<(), MenuError> {
        let (mut ctx, tx, _log, _db) = context(author(), None);
        tx.send(Response::ComponentClick {
            user: author(),
            custom_id: "menu:cancel".into(),
        })
        .unwrap();

        let calls: CallLog = Arc::default();
        let option = MenuOption::builder()
            .display("Optional")
            .converters(vec![Converter::text("Anything?")])
            .callback(recorder("callback", &calls))
            .allow_none(true)
            .build();

        option.run(&mut ctx).await?;
        let calls = calls.lock().unwrap();
        assert_eq!(*calls, [("callback", vec![MenuValue::None])]);
        Ok(())
    }

    #[tokio::test]
    async fn cancelled_prompt_fails_when_a_value_is_required() {
        let (mut ctx, tx, _log, _db) = context(author(), None);
        tx.send(Response::ComponentClick {
            user: author(),
            custom_id: "menu:cancel".into(),
        })
        .unwrap();

        let option = MenuOption::builder()
            .display("Required")
            .converters(vec![Converter::text("Anything?")])
            .build();

        let error = option.run(&mut ctx).await.unwrap_err();
        assert!(matches!(error, MenuError::ConverterFailure));
    }
}
