//! Ready-made callbacks that persist collected values to the database
//! and mirror them into the settings cache.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::warn;

use super::MenuCallback;
use crate::context::MenuContext;
use crate::data::database::SqlArg;
use crate::data::MenuValue;
use crate::error::MenuError;
use crate::menus::callback_from_sync;

/// Which settings scope a callback writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLocation {
    Guild,
    User,
}

impl DataLocation {
    /// The key column the scope's tables are keyed by.
    pub fn key_column(self) -> &'static str {
        match self {
            DataLocation::Guild => "guild_id",
            DataLocation::User => "user_id",
        }
    }

    fn scope_id(self, ctx: &MenuContext) -> Result<u64, MenuError> {
        match self {
            DataLocation::Guild => ctx
                .guild
                .map(crate::id::GuildId::get)
                .ok_or(MenuError::NotInGuild),
            DataLocation::User => Ok(ctx.author.get()),
        }
    }
}

/// Factory functions for the common persistence patterns.
pub struct MenuCallbacks;

impl MenuCallbacks {
    /// Writes the first collected value into one column of a scoped
    /// table: an insert for first-time rows, falling back to an update
    /// when the row already exists.
    pub fn set_table_column(
        location: DataLocation,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> MenuCallback {
        let table = table.into();
        let column = column.into();
        Arc::new(move |ctx, values| {
            let table = table.clone();
            let column = column.clone();
            Box::pin(async move {
                let id = location.scope_id(ctx)?;
                let value = first(values).to_sql();
                let key = location.key_column();

                let insert = format!("INSERT INTO {table} ({key}, {column}) VALUES ($1, $2)");
                match ctx
                    .database
                    .execute(&insert, &[SqlArg::Id(id), value.clone()])
                    .await
                {
                    Ok(_) => Ok(()),
                    Err(error) => {
                        warn!(%error, %table, "insert failed, falling back to update");
                        let update =
                            format!("UPDATE {table} SET {column} = $1 WHERE {key} = $2");
                        ctx.database
                            .execute(&update, &[value, SqlArg::Id(id)])
                            .await?;
                        Ok(())
                    }
                }
            })
        })
    }

    /// Stores the first collected value at a key path in the scope's
    /// cache map.
    pub fn set_cache_from_key(location: DataLocation, keys: &[&str]) -> MenuCallback {
        let keys = owned(keys);
        callback_from_sync(move |ctx, values| {
            let (path, last) = split_path(&keys);
            let value = first(values).to_cache();
            with_scope_map(location, ctx, |map| {
                descend(map, path).insert(last.to_string(), value);
            })
        })
    }

    /// Stores the second collected value under a key derived from the
    /// first, inside the dict at the key path.
    pub fn set_cache_from_keypair(location: DataLocation, keys: &[&str]) -> MenuCallback {
        let keys = owned(keys);
        callback_from_sync(move |ctx, values| {
            let [key_value, stored] = values else {
                panic!("keypair callback requires exactly two collected values");
            };
            let entry_key = key_value.cache_key();
            let entry_value = stored.to_cache();
            with_scope_map(location, ctx, |map| {
                descend(map, &keys).insert(entry_key, entry_value);
            })
        })
    }

    /// Appends the first collected value to the list at the key path,
    /// skipping values already present.
    pub fn set_iterable_list_cache(location: DataLocation, keys: &[&str]) -> MenuCallback {
        let keys = owned(keys);
        callback_from_sync(move |ctx, values| {
            let (path, last) = split_path(&keys);
            let value = first(values).to_cache();
            with_scope_map(location, ctx, |map| {
                let list = descend(map, path)
                    .entry(last.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                let Value::Array(list) = list else {
                    panic!("settings key '{last}' is not a list");
                };
                if !list.contains(&value) {
                    list.push(value);
                }
            })
        })
    }

    /// A factory bound to the list at the key path; binding it to a
    /// value yields a callback that removes the first match of that
    /// value, ignoring whatever the converters collected. Missing paths
    /// and absent values are silent no-ops.
    pub fn delete_iterable_list_cache(
        location: DataLocation,
        keys: &[&str],
    ) -> impl Fn(MenuValue) -> MenuCallback {
        let keys = owned(keys);
        move |bound| {
            let keys = keys.clone();
            let target = bound.to_cache();
            callback_from_sync(move |ctx, _values| {
                let (path, last) = split_path(&keys);
                with_scope_map(location, ctx, |map| {
                    let Some(list) = walk(map, path).and_then(|m| m.get_mut(last)) else {
                        return;
                    };
                    let Some(list) = list.as_array_mut() else {
                        return;
                    };
                    if let Some(index) = list.iter().position(|item| item == &target) {
                        list.remove(index);
                    }
                })
            })
        }
    }

    /// A factory bound to the dict at the key path; binding it to a
    /// deletion key yields a callback that removes that entry, ignoring
    /// whatever the converters collected. Missing paths and absent keys
    /// are silent no-ops.
    pub fn delete_iterable_dict_cache(
        location: DataLocation,
        keys: &[&str],
    ) -> impl Fn(MenuValue) -> MenuCallback {
        let keys = owned(keys);
        move |bound| {
            let keys = keys.clone();
            let entry_key = bound.cache_key();
            callback_from_sync(move |ctx, _values| {
                with_scope_map(location, ctx, |map| {
                    if let Some(dict) = walk(map, &keys) {
                        dict.remove(&entry_key);
                    }
                })
            })
        }
    }
}

fn owned(keys: &[&str]) -> Vec<String> {
    assert!(!keys.is_empty(), "a cache callback needs at least one key");
    keys.iter().map(|k| k.to_string()).collect()
}

fn split_path(keys: &[String]) -> (&[String], &str) {
    let (last, path) = keys.split_last().expect("key path is never empty");
    (path, last)
}

fn first(values: &[MenuValue]) -> &MenuValue {
    match values.first() {
        Some(value) => value,
        None => panic!("menu callback invoked with no collected values"),
    }
}

/// Runs `f` against the scope's cache map while holding the cache lock.
fn with_scope_map(
    location: DataLocation,
    ctx: &mut MenuContext,
    f: impl FnOnce(&mut Map<String, Value>),
) -> Result<(), MenuError> {
    let id = location.scope_id(ctx)?;
    let mut cache = ctx.lock_cache();
    let map = match location {
        DataLocation::Guild => cache.guild_mut(id.into()),
        DataLocation::User => cache.user_mut(id.into()),
    };
    f(map);
    Ok(())
}

/// Walks a key path, creating empty objects along the way. A segment
/// that exists but isn't an object is a wiring bug and panics.
fn descend<'m>(mut map: &'m mut Map<String, Value>, keys: &[String]) -> &'m mut Map<String, Value> {
    for key in keys {
        let entry = map
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        map = match entry {
            Value::Object(inner) => inner,
            _ => panic!("settings path segment '{key}' is not an object"),
        };
    }
    map
}

/// Walks a key path without creating anything; `None` when any segment
/// is missing or isn't an object.
fn walk<'m>(
    mut map: &'m mut Map<String, Value>,
    keys: &[String],
) -> Option<&'m mut Map<String, Value>> {
    for key in keys {
        map = map.get_mut(key)?.as_object_mut()?;
    }
    Some(map)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::test_support::context;
    use crate::data::database::DbError;
    use crate::id::{GuildId, RoleId, UserId};

    fn guild() -> GuildId {
        GuildId::from(5)
    }

    fn ctx_in_guild() -> (
        MenuContext,
        std::sync::Arc<crate::context::test_support::MockDatabase>,
    ) {
        let (ctx, _tx, _log, db) = context(UserId::from(10), Some(guild()));
        (ctx, db)
    }

    #[tokio::test]
    async fn set_table_column_inserts_when_the_row_is_new() -> Result<(), MenuError> {
        let (mut ctx, db) = ctx_in_guild();
        let callback = MenuCallbacks::set_table_column(DataLocation::Guild, "settings", "prefix");
        callback(&mut ctx, &[MenuValue::Text("!".into())]).await?;

        let calls = db.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].0,
            "INSERT INTO settings (guild_id, prefix) VALUES ($1, $2)"
        );
        assert_eq!(calls[0].1, [SqlArg::Id(5), SqlArg::Text("!".into())]);
        Ok(())
    }

    #[tokio::test]
    async fn set_table_column_falls_back_to_update_when_insert_fails() -> Result<(), MenuError> {
        let (mut ctx, db) = ctx_in_guild();
        db.fail_next(DbError("duplicate key".into()));

        let callback = MenuCallbacks::set_table_column(DataLocation::Guild, "settings", "prefix");
        callback(&mut ctx, &[MenuValue::Text("?".into())]).await?;

        let calls = db.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].0,
            "UPDATE settings SET prefix = $1 WHERE guild_id = $2"
        );
        assert_eq!(calls[1].1, [SqlArg::Text("?".into()), SqlArg::Id(5)]);
        Ok(())
    }

    #[tokio::test]
    async fn guild_scope_outside_a_guild_is_rejected() {
        let (mut ctx, _tx, _log, _db) = context(UserId::from(10), None);
        let callback = MenuCallbacks::set_cache_from_key(DataLocation::Guild, &["prefix"]);
        let error = callback(&mut ctx, &[MenuValue::Text("!".into())])
            .await
            .unwrap_err();
        assert!(matches!(error, MenuError::NotInGuild));
    }

    #[tokio::test]
    async fn set_cache_from_key_writes_nested_paths() -> Result<(), MenuError> {
        let (mut ctx, _db) = ctx_in_guild();
        let callback =
            MenuCallbacks::set_cache_from_key(DataLocation::Guild, &["moderation", "log_channel"]);
        callback(&mut ctx, &[MenuValue::Channel(42.into())]).await?;

        let cache = ctx.lock_cache();
        let settings = cache.guild(guild()).unwrap();
        assert_eq!(settings["moderation"]["log_channel"], Value::from(42u64));
        Ok(())
    }

    #[tokio::test]
    async fn set_cache_from_keypair_keys_by_the_first_value() -> Result<(), MenuError> {
        let (mut ctx, _db) = ctx_in_guild();
        let callback = MenuCallbacks::set_cache_from_keypair(DataLocation::Guild, &["role_prices"]);
        callback(
            &mut ctx,
            &[MenuValue::Role(RoleId::from(7)), MenuValue::Integer(100)],
        )
        .await?;

        let cache = ctx.lock_cache();
        let settings = cache.guild(guild()).unwrap();
        assert_eq!(settings["role_prices"]["7"], Value::from(100));
        Ok(())
    }

    #[tokio::test]
    async fn list_cache_appends_each_value_once() -> Result<(), MenuError> {
        let (mut ctx, _db) = ctx_in_guild();
        let callback = MenuCallbacks::set_iterable_list_cache(DataLocation::Guild, &["self_roles"]);
        let role = [MenuValue::Role(RoleId::from(7))];
        callback(&mut ctx, &role).await?;
        callback(&mut ctx, &role).await?;

        let cache = ctx.lock_cache();
        let list = cache.guild(guild()).unwrap()["self_roles"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn list_delete_removes_the_bound_value_and_ignores_missing() -> Result<(), MenuError> {
        let (mut ctx, _db) = ctx_in_guild();
        let add = MenuCallbacks::set_iterable_list_cache(DataLocation::Guild, &["self_roles"]);
        let del = MenuCallbacks::delete_iterable_list_cache(DataLocation::Guild, &["self_roles"])(
            MenuValue::Role(RoleId::from(7)),
        );

        // Deleting before anything exists is a no-op.
        del(&mut ctx, &[]).await?;

        add(&mut ctx, &[MenuValue::Role(RoleId::from(7))]).await?;
        del(&mut ctx, &[]).await?;

        let cache = ctx.lock_cache();
        let list = cache.guild(guild()).unwrap()["self_roles"].as_array().unwrap();
        assert!(list.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn dict_delete_removes_the_bound_entry_and_ignores_missing() -> Result<(), MenuError> {
        let (mut ctx, _db) = ctx_in_guild();
        let set = MenuCallbacks::set_cache_from_keypair(DataLocation::Guild, &["role_prices"]);
        let del = MenuCallbacks::delete_iterable_dict_cache(DataLocation::Guild, &["role_prices"])(
            MenuValue::Role(RoleId::from(7)),
        );

        del(&mut ctx, &[]).await?;

        set(
            &mut ctx,
            &[MenuValue::Role(RoleId::from(7)), MenuValue::Integer(100)],
        )
        .await?;
        del(&mut ctx, &[]).await?;

        let cache = ctx.lock_cache();
        assert!(cache.guild(guild()).unwrap()["role_prices"]
            .as_object()
            .unwrap()
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn deletion_callbacks_ignore_the_collected_values() -> Result<(), MenuError> {
        let (mut ctx, _db) = ctx_in_guild();
        let set = MenuCallbacks::set_cache_from_keypair(DataLocation::Guild, &["role_prices"]);
        set(
            &mut ctx,
            &[MenuValue::Role(RoleId::from(7)), MenuValue::Integer(100)],
        )
        .await?;

        // Bound to role 7 at creation; the collected confirmation value
        // plays no part in what gets deleted.
        let del = MenuCallbacks::delete_iterable_dict_cache(DataLocation::Guild, &["role_prices"])(
            MenuValue::Role(RoleId::from(7)),
        );
        del(&mut ctx, &[MenuValue::Bool(true)]).await?;

        let cache = ctx.lock_cache();
        let prices = cache.guild(guild()).unwrap()["role_prices"].as_object().unwrap();
        assert!(prices.get("7").is_none());
        assert!(prices.get("true").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn user_scope_writes_the_users_map() -> Result<(), MenuError> {
        let (mut ctx, _tx, _log, _db) = context(UserId::from(10), None);
        let callback = MenuCallbacks::set_cache_from_key(DataLocation::User, &["timezone"]);
        callback(&mut ctx, &[MenuValue::Text("UTC".into())]).await?;

        let cache = ctx.lock_cache();
        assert_eq!(
            cache.user(UserId::from(10)).unwrap()["timezone"],
            Value::from("UTC")
        );
        Ok(())
    }
}
