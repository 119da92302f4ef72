//! alibi-cli library root.
//!
//! Re-exports internal modules so that integration tests can drive the
//! controller, renderer and shell without going through `main`.

pub mod aws;
pub mod commands;
pub mod config;
pub mod controller;
pub mod emergency;
pub mod render;
