use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::context::{BelievabilityLevel, ExcuseContext, UrgencyLevel};

/// A persisted excuse plus the parameters it was generated with.
///
/// Field names are camelCase on disk so collections written by the
/// browser client load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedExcuse {
    /// Opaque unique id. New records get a v4 UUID; older records may
    /// carry any string.
    pub id: String,
    pub text: String,
    pub context: ExcuseContext,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "empty_as_none"
    )]
    pub urgency: Option<UrgencyLevel>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "empty_as_none"
    )]
    pub believability: Option<BelievabilityLevel>,
    pub created_at: jiff::Timestamp,
}

impl SavedExcuse {
    /// Promote generated text to a record with a fresh id and the current time.
    pub fn new(
        text: impl Into<String>,
        context: ExcuseContext,
        urgency: Option<UrgencyLevel>,
        believability: Option<BelievabilityLevel>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            context,
            urgency,
            believability,
            created_at: jiff::Timestamp::now(),
        }
    }
}

/// Older records store an unset modifier as `""` rather than omitting it.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
