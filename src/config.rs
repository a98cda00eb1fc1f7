//! Configuration for running menus.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How long a converter waits for a prompt response.
const DEFAULT_PROMPT_TIMEOUT_SECS: u64 = 60;

/// Bound on external service lookups (vote checks, purchase checks and
/// the like). Not used by the converter path itself; exposed for hosts
/// that implement those lookups.
const DEFAULT_EXTERNAL_LOOKUP_TIMEOUT_SECS: u64 = 3;

/// Settings that modify menu behavior.
///
/// The defaults match the values the menus have always used; overriding
/// them is mostly useful for tests and for bots with unusual latency
/// requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Seconds to wait for a prompt response before giving up.
    prompt_timeout_secs: u64,
    /// Seconds to wait on external service lookups.
    external_lookup_timeout_secs: u64,
    /// Whether users other than the invoker get an ephemeral notice when
    /// they try to interact with a prompt.
    wrong_user_notice: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            prompt_timeout_secs: DEFAULT_PROMPT_TIMEOUT_SECS,
            external_lookup_timeout_secs: DEFAULT_EXTERNAL_LOOKUP_TIMEOUT_SECS,
            wrong_user_notice: true,
        }
    }
}

impl MenuConfig {
    /// Reads a config from a TOML document.
    /// If deserialization fails, the error describes the mistake
    /// including the path of the offending key.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let de = toml::Deserializer::new(content);
        serde_path_to_error::deserialize(de).map_err(|error| ConfigError::InvalidConfig {
            reason: error.to_string(),
        })
    }

    /// How long to wait for a prompt response.
    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_secs(self.prompt_timeout_secs)
    }

    /// How long to wait on external service lookups.
    pub fn external_lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.external_lookup_timeout_secs)
    }

    /// Whether wrong-user interactions get an ephemeral notice.
    pub fn wrong_user_notice(&self) -> bool {
        self.wrong_user_notice
    }

    /// Override the prompt timeout. Sub-second durations round up to a
    /// whole second rather than truncating to an instant timeout.
    pub fn with_prompt_timeout(mut self, timeout: Duration) -> Self {
        self.prompt_timeout_secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self
    }
}
