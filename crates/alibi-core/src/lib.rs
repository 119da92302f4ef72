//! alibi-core
//!
//! Pure domain types and storage key conventions.
//! No AWS SDK dependency. This is the shared vocabulary of the Alibi system.

pub mod error;
pub mod models;
pub mod storage_keys;
