//! Select menu components.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ChannelType, PartialEmoji, SelectMenuKind};

/// One choice inside a string select menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
}

impl SelectOption {
    /// An option whose value is its label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let value = label.clone();
        Self {
            label,
            value,
            description: None,
            emoji: None,
            default: false,
        }
    }

    /// Sets the value sent back to the bot when this option is picked.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the descriptive text shown under the option.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Discord's dropdown component.
///
/// The same struct covers all five select subjects; `kind` is the wire
/// discriminator. `options` is only meaningful for string selects and
/// `channel_types` only for channel selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectMenu {
    #[serde(rename = "type")]
    pub kind: SelectMenuKind,
    pub custom_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default = "one")]
    pub min_values: u8,
    #[serde(default = "one")]
    pub max_values: u8,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

fn one() -> u8 {
    1
}

#[bon::bon]
impl SelectMenu {
    /// Builds a select menu. A `custom_id` is generated when none is
    /// supplied; the kind defaults to a string select.
    #[builder]
    pub fn new(
        kind: Option<SelectMenuKind>,
        #[builder(into)] custom_id: Option<String>,
        #[builder(default)] options: Vec<SelectOption>,
        #[builder(default)] channel_types: Vec<ChannelType>,
        #[builder(into)] placeholder: Option<String>,
        #[builder(default = 1)] min_values: u8,
        #[builder(default = 1)] max_values: u8,
        #[builder(default = false)] disabled: bool,
    ) -> Self {
        Self {
            kind: kind.unwrap_or(SelectMenuKind::String),
            custom_id: custom_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            options,
            channel_types,
            placeholder,
            min_values,
            max_values,
            disabled,
        }
    }
}
