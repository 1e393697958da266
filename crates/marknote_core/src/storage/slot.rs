//! Slot storage contract and its SQLite/in-memory implementations.
//!
//! # Invariants
//! - `write_slot` is a full overwrite of `key`.
//! - `SqliteSlotStorage` only accepts migrated connections.

use super::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type SlotResult<T> = Result<T, SlotError>;

/// Storage-layer error for slot reads and writes.
#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "slot storage requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "slot storage requires column `{table}.{column}`")
            }
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value slot contract backing note persistence.
pub trait SlotStorage {
    /// Reads the raw value stored under `key`.
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn write_slot(&mut self, key: &str, value: &str) -> SlotResult<()>;
}

/// SQLite-backed slot storage over the `slots` table.
pub struct SqliteSlotStorage {
    conn: Connection,
}

impl SqliteSlotStorage {
    /// Wraps a migrated connection after verifying the `slots` schema.
    pub fn try_new(conn: Connection) -> SlotResult<Self> {
        ensure_slot_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (or creates) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> SlotResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> SlotResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Returns the underlying connection for diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slot storage, used by tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: BTreeMap<String, String>,
    writes: usize,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one slot without counting it as a write.
    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    /// Number of `write_slot` calls observed so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> SlotResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

fn ensure_slot_connection_ready(conn: &Connection) -> SlotResult<()> {
    if !table_exists(conn, "slots")? {
        return Err(SlotError::MissingRequiredTable("slots"));
    }

    for column in ["key", "value"] {
        if !table_has_column(conn, "slots", column)? {
            return Err(SlotError::MissingRequiredColumn {
                table: "slots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> SlotResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> SlotResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
