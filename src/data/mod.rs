//! Converted menu values and the in-memory settings cache they land in.

pub mod database;

use std::collections::HashMap;

use serde_json::Value;

use crate::id::{ChannelId, GuildId, RoleId, UserId};
use database::SqlArg;

/// A value produced by a converter, ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuValue {
    /// The user skipped an optional prompt.
    None,
    Bool(bool),
    Integer(i64),
    Text(String),
    Channel(ChannelId),
    Role(RoleId),
    User(UserId),
}

impl MenuValue {
    pub fn is_none(&self) -> bool {
        matches!(self, MenuValue::None)
    }

    /// The value as a SQL argument. Entities bind by ID.
    pub fn to_sql(&self) -> SqlArg {
        match self {
            MenuValue::None => SqlArg::Null,
            MenuValue::Bool(b) => SqlArg::Bool(*b),
            MenuValue::Integer(i) => SqlArg::Integer(*i),
            MenuValue::Text(s) => SqlArg::Text(s.clone()),
            MenuValue::Channel(id) => SqlArg::Id(id.get()),
            MenuValue::Role(id) => SqlArg::Id(id.get()),
            MenuValue::User(id) => SqlArg::Id(id.get()),
        }
    }

    /// The value in cache form. Entities reduce to their numeric ID.
    pub fn to_cache(&self) -> Value {
        match self {
            MenuValue::None => Value::Null,
            MenuValue::Bool(b) => Value::from(*b),
            MenuValue::Integer(i) => Value::from(*i),
            MenuValue::Text(s) => Value::from(s.as_str()),
            MenuValue::Channel(id) => Value::from(id.get()),
            MenuValue::Role(id) => Value::from(id.get()),
            MenuValue::User(id) => Value::from(id.get()),
        }
    }

    /// The value rendered as a cache map key.
    pub fn cache_key(&self) -> String {
        match self {
            MenuValue::Text(s) => s.clone(),
            MenuValue::Bool(b) => b.to_string(),
            MenuValue::Integer(i) => i.to_string(),
            MenuValue::Channel(id) => id.to_string(),
            MenuValue::Role(id) => id.to_string(),
            MenuValue::User(id) => id.to_string(),
            MenuValue::None => String::from("null"),
        }
    }
}

/// Per-guild and per-user settings mirrored from the database.
///
/// Values are stored as loose JSON maps so callbacks can write nested
/// paths without a schema.
#[derive(Debug, Default)]
pub struct SettingsCache {
    guild: HashMap<GuildId, serde_json::Map<String, Value>>,
    user: HashMap<UserId, serde_json::Map<String, Value>>,
}

impl SettingsCache {
    /// The settings map for a guild, created empty on first touch.
    pub fn guild_mut(&mut self, id: GuildId) -> &mut serde_json::Map<String, Value> {
        self.guild.entry(id).or_default()
    }

    /// The settings map for a user, created empty on first touch.
    pub fn user_mut(&mut self, id: UserId) -> &mut serde_json::Map<String, Value> {
        self.user.entry(id).or_default()
    }

    pub fn guild(&self, id: GuildId) -> Option<&serde_json::Map<String, Value>> {
        self.guild.get(&id)
    }

    pub fn user(&self, id: UserId) -> Option<&serde_json::Map<String, Value>> {
        self.user.get(&id)
    }
}
