//! The storage seam menu callbacks write through.

use async_trait::async_trait;
use thiserror::Error;

/// A positional SQL argument, typed at the seam so backends can bind
/// natively instead of parsing strings.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    /// A Discord snowflake.
    Id(u64),
    Integer(i64),
    Text(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("database error: {0}")]
pub struct DbError(pub String);

/// Executes parameterized statements against whatever store backs the
/// bot's settings tables.
#[async_trait]
pub trait Database: Send + Sync {
    /// Runs a statement with `$1`-style positional arguments and returns
    /// the number of affected rows.
    async fn execute(&self, sql: &str, args: &[SqlArg]) -> Result<u64, DbError>;
}
