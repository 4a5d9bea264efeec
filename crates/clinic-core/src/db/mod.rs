//! Database layer for the clinic store.
//!
//! The collections live in an in-memory SQLite database: state is scoped to
//! the owning process and dies with it. There is no file-backed constructor.

mod consultations;
mod patients;
mod reference;
mod schema;
mod stats;

pub use schema::*;
#[allow(unused_imports)]
pub use consultations::*;
#[allow(unused_imports)]
pub use patients::*;
#[allow(unused_imports)]
pub use reference::*;
#[allow(unused_imports)]
pub use stats::*;

use rusqlite::Connection;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// In-memory database holding the patient and consultation collections.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a fresh in-memory database with the schema applied.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema and seed reference data.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }
}

/// Mint the next sequential id for `kind`, formatted as `prefix` + a
/// zero-padded counter. The counter only ever moves forward, so ids stay
/// unique regardless of what later happens to the collection.
pub(crate) fn mint_id(
    conn: &Connection,
    kind: &str,
    prefix: &str,
) -> DbResult<String> {
    let seq: i64 = conn.query_row(
        "SELECT next_seq FROM id_counters WHERE kind = ?",
        [kind],
        |row| row.get(0),
    )?;
    conn.execute(
        "UPDATE id_counters SET next_seq = next_seq + 1 WHERE kind = ?",
        [kind],
    )?;
    Ok(format!("{}{:03}", prefix, seq))
}
