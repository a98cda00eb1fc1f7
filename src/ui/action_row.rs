//! Action rows and top-level message component trees.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::button::Button;
use super::component::Component;
use super::enums::{ButtonStyle, ComponentType};
use super::holder::{ComponentHolder, Slots};
use crate::error::DecodeError;

/// The maximum number of components an action row may hold.
pub const ROW_CAPACITY: usize = 5;

/// A horizontal layout container for up to five interactable components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub(crate) components: Slots,
}

impl Default for ActionRow {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> Self {
        Self {
            kind: ComponentType::ActionRow,
            components: Slots::new(components),
        }
    }
}

impl ComponentHolder for ActionRow {
    fn slots(&self) -> &Slots {
        &self.components
    }

    fn slots_mut(&mut self) -> &mut Slots {
        &mut self.components
    }
}

/// The component tree attached to a message: a list of action rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageComponents {
    components: Slots,
}

impl MessageComponents {
    pub fn new(rows: Vec<ActionRow>) -> Self {
        Self {
            components: rows.into_iter().map(Component::from).collect(),
        }
    }

    /// Lays buttons out into as few action rows as possible, five per
    /// row, preserving order.
    pub fn add_buttons_with_rows(&mut self, buttons: impl IntoIterator<Item = Button>) {
        for chunk in &buttons.into_iter().chunks(ROW_CAPACITY) {
            let row = ActionRow::new(chunk.map(Component::from).collect());
            self.add_component(row);
        }
    }

    /// A single row holding a green "YES" and a red "NO" button.
    pub fn boolean_buttons(yes_id: impl Into<String>, no_id: impl Into<String>) -> Self {
        let yes = Button::preset("YES", &yes_id.into(), ButtonStyle::Success);
        let no = Button::preset("NO", &no_id.into(), ButtonStyle::Danger);
        let mut components = Self::default();
        components.add_buttons_with_rows([yes, no]);
        components
    }

    /// The custom IDs of every interactable leaf, depth-first.
    pub fn custom_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.components.collect_custom_ids(&mut ids);
        ids
    }

    pub fn to_wire(&self) -> Value {
        serde_json::to_value(self).expect("components are plain JSON-serializable data")
    }

    pub fn from_wire(value: Value) -> Result<Self, DecodeError> {
        let rows = value
            .as_array()
            .ok_or(DecodeError::NotAnObject)?
            .iter()
            .cloned()
            .map(Component::from_wire)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            components: Slots::new(rows),
        })
    }
}

impl ComponentHolder for MessageComponents {
    fn slots(&self) -> &Slots {
        &self.components
    }

    fn slots_mut(&mut self) -> &mut Slots {
        &mut self.components
    }
}
