use serde::{Deserialize, Serialize};

use super::context::ExcuseContext;

/// Input to one excuse generation. Built per submit and then discarded.
///
/// Modifiers are free-form strings at this boundary; the controller only
/// ever fills them from the enumerated levels, but the adapter does not
/// depend on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub context: ExcuseContext,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub urgency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub believability: Option<String>,
}

impl GenerationRequest {
    pub fn new(context: ExcuseContext) -> Self {
        Self {
            context,
            urgency: None,
            believability: None,
        }
    }

    /// Blank values are treated as unset.
    pub fn with_urgency(mut self, urgency: impl Into<String>) -> Self {
        self.urgency = non_blank(urgency.into());
        self
    }

    /// Blank values are treated as unset.
    pub fn with_believability(mut self, believability: impl Into<String>) -> Self {
        self.believability = non_blank(believability.into());
        self
    }

    /// Urgency, if present and non-empty.
    pub fn urgency(&self) -> Option<&str> {
        self.urgency.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Believability, if present and non-empty.
    pub fn believability(&self) -> Option<&str> {
        self.believability.as_deref().filter(|s| !s.trim().is_empty())
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The declared output shape of the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedExcuse {
    pub excuse: String,
}

/// A successfully generated excuse, held until saved or overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub excuse_text: String,
}
