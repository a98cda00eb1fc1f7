//! The message component tree: buttons, select menus, text inputs, and
//! the containers that hold them.

pub mod action_row;
pub mod button;
pub mod component;
pub mod enums;
pub mod holder;
pub mod modal;
pub mod select_menu;
pub mod text_input;

pub use action_row::{ActionRow, MessageComponents, ROW_CAPACITY};
pub use button::Button;
pub use component::{Component, UnknownComponent};
pub use enums::{
    ButtonStyle, ChannelType, ComponentType, PartialEmoji, SelectMenuKind, TextInputStyle,
};
pub use holder::{ComponentHolder, Slots};
pub use modal::{InteractedComponent, Modal};
pub use select_menu::{SelectMenu, SelectOption};
pub use text_input::TextInput;
