//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, views and FFI.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that never changes.

pub mod note;
