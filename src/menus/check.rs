//! Validation predicates run against a response before conversion.

use std::sync::Arc;

use tracing::warn;

use crate::context::Response;

/// What a converter does after a check rejects a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckFailureAction {
    /// Abort the option.
    #[default]
    Fail,
    /// Re-present the prompt with the check's failure message.
    Retry,
}

pub type CheckError = Box<dyn std::error::Error + Send + Sync>;

type Predicate = Arc<dyn Fn(&Response) -> Result<bool, CheckError> + Send + Sync>;

/// A named validation rule. A predicate error counts as a failed check.
#[derive(Clone)]
pub struct Check {
    predicate: Predicate,
    on_failure: CheckFailureAction,
    fail_message: String,
}

impl Check {
    pub fn new(predicate: impl Fn(&Response) -> bool + Send + Sync + 'static) -> Self {
        Self::fallible(move |response| Ok(predicate(response)))
    }

    /// A check whose predicate can itself fail, for rules that consult
    /// external state.
    pub fn fallible(
        predicate: impl Fn(&Response) -> Result<bool, CheckError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Arc::new(predicate),
            on_failure: CheckFailureAction::default(),
            fail_message: String::from("Please provide a valid input."),
        }
    }

    /// Retry the prompt instead of aborting when this check fails.
    pub fn retry_on_failure(mut self) -> Self {
        self.on_failure = CheckFailureAction::Retry;
        self
    }

    /// The message shown when this check rejects a response.
    pub fn fail_message(mut self, message: impl Into<String>) -> Self {
        self.fail_message = message.into();
        self
    }

    pub fn on_failure(&self) -> CheckFailureAction {
        self.on_failure
    }

    pub fn message(&self) -> &str {
        &self.fail_message
    }

    /// Runs the predicate. Predicate errors are logged and count as a
    /// rejection.
    pub(crate) fn run(&self, response: &Response) -> bool {
        match (self.predicate)(response) {
            Ok(passed) => passed,
            Err(error) => {
                warn!(%error, "check predicate errored, treating as failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check")
            .field("on_failure", &self.on_failure)
            .field("fail_message", &self.fail_message)
            .finish_non_exhaustive()
    }
}
