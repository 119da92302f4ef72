//! Storage key conventions.
//!
//! Pure string constants. These define the canonical layout of values in
//! the profile-scoped key-value store.

/// The whole saved-excuse collection lives under this single key.
pub const SAVED_EXCUSES: &str = "savedExcuses";
