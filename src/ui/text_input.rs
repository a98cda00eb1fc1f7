//! The text input component for modals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ComponentType, TextInputStyle};

/// A free-text field.
///
/// Only valid inside a modal; Discord never sends these back through
/// message components, so inbound values arrive via the modal-submission
/// path instead of the component factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInput {
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub style: TextInputStyle,
    pub custom_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default = "default_true")]
    pub required: bool,
    /// Pre-filled text shown in the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

fn default_true() -> bool {
    true
}

#[bon::bon]
impl TextInput {
    /// Builds a text input. A `custom_id` is generated when none is
    /// supplied; the style defaults to [`TextInputStyle::Short`].
    #[builder]
    pub fn new(
        #[builder(into)] label: Option<String>,
        style: Option<TextInputStyle>,
        #[builder(into)] custom_id: Option<String>,
        #[builder(into)] placeholder: Option<String>,
        min_length: Option<u32>,
        max_length: Option<u32>,
        #[builder(default = true)] required: bool,
        #[builder(into)] value: Option<String>,
    ) -> Self {
        Self {
            kind: ComponentType::TextInput,
            label,
            style: style.unwrap_or(TextInputStyle::Short),
            custom_id: custom_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            placeholder,
            min_length,
            max_length,
            required,
            value,
        }
    }
}
