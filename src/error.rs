//! Error types for component construction, wire decoding, and menu runs.

use thiserror::Error;

use crate::data::database::DbError;

/// Fallback text shown when a converter times out without a configured
/// timeout message.
pub const DEFAULT_TIMEOUT_MESSAGE: &str = "You took too long to respond.";

/// A component was constructed with an invalid combination of fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error("A button must have a label or an emoji.")]
    MissingLabel,
    #[error("A link button must be given a url.")]
    MissingUrl,
    #[error("A non-link button cannot be given a url.")]
    UnexpectedUrl,
}

/// A wire payload could not be turned back into a component.
///
/// Unknown discriminator tags are *not* an error; they decode into
/// [`UnknownComponent`](crate::ui::UnknownComponent) instead.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Component payload is not a JSON object.")]
    NotAnObject,
    #[error("Component payload has no 'type' discriminator.")]
    MissingType,
    #[error("Malformed {kind} payload: {source}")]
    Malformed {
        /// Name of the variant the discriminator selected.
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid component: {0}")]
    Invalid(#[from] ComponentError),
}

/// Failed to deliver a message, notice, or modal to the user.
#[derive(Error, Debug, Clone)]
#[error("Failed to deliver to user: {0}")]
pub struct SendError(pub String);

/// The menu configuration could not be read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

/// Everything that can abort a single menu or option run.
///
/// Nothing here is fatal at process level; each value is scoped to one
/// user interaction and is handled by whatever invoked the menu.
#[derive(Error, Debug)]
pub enum MenuError {
    /// A check failed with the fail policy, or a conversion produced no
    /// value. No callbacks have run.
    #[error("The given input was not valid.")]
    ConverterFailure,
    /// No valid response arrived within the configured bound.
    #[error("{}", .message.as_deref().unwrap_or(DEFAULT_TIMEOUT_MESSAGE))]
    ConverterTimeout {
        /// User-facing text configured on the converter, if any.
        message: Option<String>,
    },
    /// The host stopped feeding responses while we were still waiting.
    #[error("The interaction was abandoned.")]
    Abandoned,
    /// A guild-scoped callback ran outside of a guild.
    #[error("Not in a server.")]
    NotInGuild,
    #[error(transparent)]
    Database(#[from] DbError),
    #[error(transparent)]
    Send(#[from] SendError),
}

impl MenuError {
    /// Whether this error is the distinguished timeout failure, letting
    /// callers offer "you took too long" UX separately from bad input.
    pub fn is_timeout(&self) -> bool {
        matches!(self, MenuError::ConverterTimeout { .. })
    }
}
