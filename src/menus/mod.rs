//! Interactive settings menus: prompts, validation, conversion, and the
//! callbacks that persist the results.

pub mod callbacks;
pub mod check;
pub mod converter;
pub mod menu;
pub mod option;

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::context::MenuContext;
use crate::data::MenuValue;
use crate::error::MenuError;

/// A callback run with the values a menu option collected.
pub type MenuCallback = Arc<
    dyn for<'a> Fn(&'a mut MenuContext, &'a [MenuValue]) -> BoxFuture<'a, Result<(), MenuError>>
        + Send
        + Sync,
>;

/// Wraps an async callback function into a [`MenuCallback`].
pub fn callback_from_async<F>(f: F) -> MenuCallback
where
    F: for<'a> Fn(&'a mut MenuContext, &'a [MenuValue]) -> BoxFuture<'a, Result<(), MenuError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Wraps a synchronous callback function into a [`MenuCallback`].
pub fn callback_from_sync<F>(f: F) -> MenuCallback
where
    F: Fn(&mut MenuContext, &[MenuValue]) -> Result<(), MenuError> + Send + Sync + 'static,
{
    Arc::new(move |ctx, values| {
        let result = f(ctx, values);
        Box::pin(std::future::ready(result))
    })
}
