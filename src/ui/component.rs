//! The polymorphic component tree and its wire factory.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::action_row::ActionRow;
use super::button::Button;
use super::enums::ComponentType;
use super::select_menu::SelectMenu;
use super::text_input::TextInput;
use crate::error::DecodeError;

/// Any component that can appear in a message or modal tree.
///
/// The variant is fixed by the wire `type` tag at construction and never
/// changes afterwards. Tags this library does not recognise decode into
/// [`Unknown`](Component::Unknown) rather than failing, so payloads from
/// future API versions survive a round-trip untouched.
#[derive(Debug, Clone)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    SelectMenu(SelectMenu),
    TextInput(TextInput),
    Unknown(UnknownComponent),
}

/// A component with a discriminator this library does not recognise.
///
/// Keeps the raw payload verbatim so re-serializing emits exactly what
/// was received.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownComponent {
    pub custom_id: Option<String>,
    pub raw: Value,
}

impl Component {
    /// Rebuilds a component from a wire payload, dispatching on the
    /// `type` discriminator.
    pub fn from_wire(value: Value) -> Result<Self, DecodeError> {
        if !value.is_object() {
            return Err(DecodeError::NotAnObject);
        }
        let tag = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or(DecodeError::MissingType)?;
        match tag {
            1 => serde_json::from_value::<ActionRow>(value)
                .map(Component::ActionRow)
                .map_err(|source| DecodeError::Malformed {
                    kind: "action row",
                    source,
                }),
            2 => {
                let button: Button =
                    serde_json::from_value(value).map_err(|source| DecodeError::Malformed {
                        kind: "button",
                        source,
                    })?;
                button.validate()?;
                Ok(Component::Button(button))
            }
            3 | 5..=8 => serde_json::from_value::<SelectMenu>(value)
                .map(Component::SelectMenu)
                .map_err(|source| DecodeError::Malformed {
                    kind: "select menu",
                    source,
                }),
            4 => serde_json::from_value::<TextInput>(value)
                .map(Component::TextInput)
                .map_err(|source| DecodeError::Malformed {
                    kind: "text input",
                    source,
                }),
            _ => {
                let custom_id = value
                    .get("custom_id")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Ok(Component::Unknown(UnknownComponent {
                    custom_id,
                    raw: value,
                }))
            }
        }
    }

    /// The component's wire payload. Placeholder slots in nested holders
    /// are dropped; everything else round-trips through [`from_wire`].
    ///
    /// [`from_wire`]: Component::from_wire
    pub fn to_wire(&self) -> Value {
        serde_json::to_value(self).expect("components are plain JSON-serializable data")
    }

    /// The wire discriminator, when recognised.
    pub fn component_type(&self) -> Option<ComponentType> {
        match self {
            Component::ActionRow(_) => Some(ComponentType::ActionRow),
            Component::Button(_) => Some(ComponentType::Button),
            Component::SelectMenu(menu) => Some(match menu.kind {
                super::enums::SelectMenuKind::String => ComponentType::StringSelect,
                super::enums::SelectMenuKind::User => ComponentType::UserSelect,
                super::enums::SelectMenuKind::Role => ComponentType::RoleSelect,
                super::enums::SelectMenuKind::Mentionable => ComponentType::MentionableSelect,
                super::enums::SelectMenuKind::Channel => ComponentType::ChannelSelect,
            }),
            Component::TextInput(_) => Some(ComponentType::TextInput),
            Component::Unknown(_) => None,
        }
    }

    /// The component's own custom ID, if it has one. Layout components
    /// have none.
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Component::ActionRow(_) => None,
            Component::Button(button) => button.custom_id.as_deref(),
            Component::SelectMenu(menu) => Some(&menu.custom_id),
            Component::TextInput(input) => Some(&input.custom_id),
            Component::Unknown(unknown) => unknown.custom_id.as_deref(),
        }
    }

    /// Whether this component carries a `disabled` flag.
    pub fn is_disableable(&self) -> bool {
        matches!(self, Component::Button(_) | Component::SelectMenu(_))
    }

    /// Sets or clears the `disabled` flag on this component and, for
    /// holders, on every disableable descendant.
    pub fn set_disabled(&mut self, disabled: bool) {
        match self {
            Component::ActionRow(row) => row.components.set_disabled(disabled),
            Component::Button(button) => button.disabled = disabled,
            Component::SelectMenu(menu) => menu.disabled = disabled,
            Component::TextInput(_) | Component::Unknown(_) => {}
        }
    }

    /// Depth-first search for the first component with the given custom
    /// ID, descending into nested holders.
    pub fn get_component(&self, custom_id: &str) -> Option<&Component> {
        if self.custom_id() == Some(custom_id) {
            return Some(self);
        }
        match self {
            Component::ActionRow(row) => row.components.get_component(custom_id),
            _ => None,
        }
    }
}

impl Serialize for Component {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Component::ActionRow(row) => row.serialize(serializer),
            Component::Button(button) => button.serialize(serializer),
            Component::SelectMenu(menu) => menu.serialize(serializer),
            Component::TextInput(input) => input.serialize(serializer),
            Component::Unknown(unknown) => unknown.raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Component::from_wire(value).map_err(serde::de::Error::custom)
    }
}

/// Components compare by the structure of their canonical serialized
/// form, not by identity.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.to_wire() == other.to_wire()
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // serde_json maps are key-sorted, so the string form is canonical.
        self.to_wire().to_string().hash(state);
    }
}

impl From<ActionRow> for Component {
    fn from(row: ActionRow) -> Self {
        Component::ActionRow(row)
    }
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Component::Button(button)
    }
}

impl From<SelectMenu> for Component {
    fn from(menu: SelectMenu) -> Self {
        Component::SelectMenu(menu)
    }
}

impl From<TextInput> for Component {
    fn from(input: TextInput) -> Self {
        Component::TextInput(input)
    }
}
