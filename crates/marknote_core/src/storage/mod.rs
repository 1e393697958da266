//! Durable key-value slot storage.
//!
//! # Responsibility
//! - Define the single-slot read/overwrite contract used by the note store.
//! - Keep SQLite details behind the `SlotStorage` boundary.
//!
//! # Invariants
//! - Writes replace the whole slot value; there are no partial writes.
//! - A missing key reads as `None`, never as an error.

pub mod db;
pub mod slot;

pub use slot::{MemorySlotStorage, SlotError, SlotResult, SlotStorage, SqliteSlotStorage};
