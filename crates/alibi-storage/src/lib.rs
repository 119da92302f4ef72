//! alibi-storage
//!
//! Profile-scoped key-value persistence. A directory of JSON values on
//! disk stands in for browser local storage.

pub mod error;
pub mod excuses;
pub mod kv;
pub mod state;
