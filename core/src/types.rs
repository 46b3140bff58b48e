//! Shared primitive types used across the crate.

/// Row identity assigned by the store on insert.
/// Assigned exactly once, never reused, never mutated.
pub type StopId = i64;
