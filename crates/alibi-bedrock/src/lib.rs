//! alibi-bedrock
//!
//! Excuse generation over the Bedrock Converse API: prompt rendering,
//! model invocation and structured output parsing.

pub mod client;
pub mod error;
pub mod excuse;
pub mod prompt;
