//! The button component.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ButtonStyle, ComponentType, PartialEmoji};
use crate::error::ComponentError;

/// A clickable button.
///
/// Non-link buttons report clicks through their `custom_id`; link buttons
/// open their `url` and never produce an interaction, so the two field
/// sets are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

#[bon::bon]
impl Button {
    /// Builds a button, validating its field set.
    ///
    /// A `custom_id` is generated when none is supplied for a non-link
    /// button. The style defaults to [`ButtonStyle::Secondary`].
    #[builder]
    pub fn new(
        #[builder(into)] label: Option<String>,
        #[builder(into)] custom_id: Option<String>,
        style: Option<ButtonStyle>,
        emoji: Option<PartialEmoji>,
        #[builder(into)] url: Option<String>,
        #[builder(default = false)] disabled: bool,
    ) -> Result<Self, ComponentError> {
        let style = style.unwrap_or(ButtonStyle::Secondary);
        if label.is_none() && emoji.is_none() {
            return Err(ComponentError::MissingLabel);
        }
        let custom_id = match style {
            ButtonStyle::Link => {
                if url.is_none() {
                    return Err(ComponentError::MissingUrl);
                }
                None
            }
            _ => {
                if url.is_some() {
                    return Err(ComponentError::UnexpectedUrl);
                }
                Some(custom_id.unwrap_or_else(|| Uuid::new_v4().to_string()))
            }
        };
        Ok(Self {
            kind: ComponentType::Button,
            label,
            style,
            custom_id,
            emoji,
            url,
            disabled,
        })
    }
}

impl Button {
    /// A "Confirm" button with the custom ID `CONFIRM` and a success style.
    pub fn confirm() -> Self {
        Self::preset("Confirm", "CONFIRM", ButtonStyle::Success)
    }

    /// A "Cancel" button with the custom ID `CANCEL` and a danger style.
    pub fn cancel() -> Self {
        Self::preset("Cancel", "CANCEL", ButtonStyle::Danger)
    }

    /// A labelled, non-link button with a fixed custom ID.
    pub(crate) fn preset(label: &str, custom_id: &str, style: ButtonStyle) -> Self {
        Self {
            kind: ComponentType::Button,
            label: Some(label.to_string()),
            style,
            custom_id: Some(custom_id.to_string()),
            emoji: None,
            url: None,
            disabled: false,
        }
    }

    /// Re-checks the field-set invariants, for buttons rebuilt from wire
    /// payloads rather than through the builder.
    pub(crate) fn validate(&self) -> Result<(), ComponentError> {
        if self.label.is_none() && self.emoji.is_none() {
            return Err(ComponentError::MissingLabel);
        }
        match self.style {
            ButtonStyle::Link if self.url.is_none() => Err(ComponentError::MissingUrl),
            ButtonStyle::Link => Ok(()),
            _ if self.url.is_some() => Err(ComponentError::UnexpectedUrl),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn label_or_emoji_is_required() {
        let err = Button::builder().build().unwrap_err();
        assert_eq!(err, ComponentError::MissingLabel);

        let ok = Button::builder()
            .emoji(PartialEmoji::unicode("✅"))
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn link_button_requires_url() {
        let err = Button::builder()
            .label("Docs")
            .style(ButtonStyle::Link)
            .build()
            .unwrap_err();
        assert_eq!(err, ComponentError::MissingUrl);
    }

    #[test]
    fn non_link_button_rejects_url() {
        let err = Button::builder()
            .label("Docs")
            .url("https://example.com")
            .build()
            .unwrap_err();
        assert_eq!(err, ComponentError::UnexpectedUrl);
    }

    #[test]
    fn link_button_carries_no_custom_id() {
        let button = Button::builder()
            .label("Docs")
            .style(ButtonStyle::Link)
            .url("https://example.com")
            .custom_id("ignored")
            .build()
            .unwrap();
        assert_eq!(button.custom_id, None);
    }

    #[test]
    fn custom_id_is_generated_when_missing() {
        let button = Button::builder().label("Go").build().unwrap();
        assert!(button.custom_id.is_some());
    }
}
