//! Flutter-facing bindings for MarkNote core.

pub mod api;
