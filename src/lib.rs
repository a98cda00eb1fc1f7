//! Message component trees and interactive settings menus for Discord
//! bots.
//!
//! The [`ui`] module models the component tree a message carries:
//! buttons, select menus, text inputs, the action rows that lay them
//! out, and the modals that collect typed input. Components round-trip
//! through their wire form, and containers share one set of holder
//! operations for adding, removing, disabling, and finding children.
//!
//! The [`menus`] module builds interactive settings menus on top of
//! that tree: a [`menus::menu::Menu`] presents options as buttons, each
//! [`menus::option::MenuOption`] prompts the user through
//! [`menus::converter::Converter`]s, and the collected values flow into
//! callbacks that persist them and mirror them into the settings cache.
//!
//! The chat platform itself sits behind the [`context::Frontend`]
//! trait, so the whole menu pipeline runs against a scripted double in
//! tests.

pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod id;
pub mod menus;
pub mod ui;

pub use config::MenuConfig;
pub use context::{Frontend, MenuContext, MessageHandle, Prompt, Response};
pub use data::{MenuValue, SettingsCache};
pub use error::{ComponentError, ConfigError, DecodeError, MenuError, SendError};
pub use menus::callbacks::{DataLocation, MenuCallbacks};
pub use menus::check::{Check, CheckFailureAction};
pub use menus::converter::{sync_convert, Converter};
pub use menus::menu::Menu;
pub use menus::option::MenuOption;
pub use menus::{callback_from_async, callback_from_sync, MenuCallback};

/// Crate-wide result alias for menu runs.
pub type Result<T> = std::result::Result<T, MenuError>;
