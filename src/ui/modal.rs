//! Modal dialogs and the component payloads a user submits back.

use serde::{Deserialize, Serialize};

use super::action_row::ActionRow;
use super::holder::{ComponentHolder, Slots};
use crate::ui::text_input::TextInput;

/// A popup form presented in response to an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modal {
    pub title: String,
    pub custom_id: String,
    components: Slots,
}

impl Modal {
    pub fn new(title: impl Into<String>, custom_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            custom_id: custom_id.into(),
            components: Slots::default(),
        }
    }

    /// A single-input modal, the shape used for free-form prompts.
    ///
    /// The wire format only accepts action rows as a modal's direct
    /// children, so the input is wrapped in one.
    pub fn single_input(
        title: impl Into<String>,
        custom_id: impl Into<String>,
        input: TextInput,
    ) -> Self {
        let mut modal = Self::new(title, custom_id);
        modal.add_component(ActionRow::new(vec![input.into()]));
        modal
    }
}

impl ComponentHolder for Modal {
    fn slots(&self) -> &Slots {
        &self.components
    }

    fn slots_mut(&mut self) -> &mut Slots {
        &mut self.components
    }
}

/// A component as echoed back inside a modal-submit payload: only the
/// identity and the submitted value survive, nested one level per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractedComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<InteractedComponent>,
}

impl InteractedComponent {
    /// Depth-first search for the component with the given custom ID.
    pub fn get_component(&self, custom_id: &str) -> Option<&InteractedComponent> {
        if self.custom_id.as_deref() == Some(custom_id) {
            return Some(self);
        }
        self.components
            .iter()
            .find_map(|child| child.get_component(custom_id))
    }

    /// The first submitted value anywhere in this subtree, depth-first.
    pub fn first_value(&self) -> Option<&str> {
        if let Some(value) = self.value.as_deref() {
            return Some(value);
        }
        self.components.iter().find_map(InteractedComponent::first_value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ui::enums::TextInputStyle;

    #[test]
    fn modal_round_trips_through_wire_form() -> Result<(), serde_json::Error> {
        let input = TextInput::builder()
            .label("Your answer")
            .custom_id("answer")
            .style(TextInputStyle::Paragraph)
            .build();
        let modal = Modal::single_input("Question", "prompt", input);

        let wire = serde_json::to_value(&modal)?;
        assert_eq!(wire["title"], "Question");
        assert_eq!(wire["custom_id"], "prompt");

        let back: Modal = serde_json::from_value(wire)?;
        assert_eq!(back, modal);
        Ok(())
    }

    #[test]
    fn modal_children_are_action_rows() -> Result<(), serde_json::Error> {
        let input = TextInput::builder().label("Input").custom_id("value").build();
        let modal = Modal::single_input("Question", "modal", input);

        let wire = serde_json::to_value(&modal)?;
        let children = wire["components"].as_array().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0]["type"], 1);
        assert_eq!(children[0]["components"][0]["type"], 4);
        assert_eq!(children[0]["components"][0]["custom_id"], "value");
        Ok(())
    }

    #[test]
    fn submitted_values_are_found_through_nesting() {
        let payload = InteractedComponent {
            components: vec![InteractedComponent {
                kind: Some(1),
                components: vec![InteractedComponent {
                    custom_id: Some("answer".into()),
                    kind: Some(4),
                    value: Some("forty-two".into()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        let found = payload.get_component("answer").expect("answer is present");
        assert_eq!(found.value.as_deref(), Some("forty-two"));
        assert_eq!(payload.first_value(), Some("forty-two"));
        assert!(payload.get_component("missing").is_none());
    }
}
