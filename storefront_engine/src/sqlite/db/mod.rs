//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are simple functions (rather than stateful structs) that accept a `&mut SqliteConnection`
//! argument. Callers can obtain a connection from a pool, or open a transaction when several statements must succeed
//! or fail together, and call through to the functions without any other changes.
use log::*;
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::SqlitePoolOptions,
    Error as SqlxError,
    Sqlite,
    SqlitePool,
};

pub mod accounts;
pub mod categories;
pub mod orders;
pub mod products;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates the SQLite database file if it does not exist yet. Returns `true` if a new database was created.
pub async fn create_database_if_missing(url: &str) -> Result<bool, SqlxError> {
    if Sqlite::database_exists(url).await? {
        return Ok(false);
    }
    info!("🗃️ Creating new database at {url}");
    Sqlite::create_database(url).await?;
    Ok(true)
}

/// Escapes the `LIKE` wildcards in a user-supplied search term. Use with `ESCAPE '\'`.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
