use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The life domain an excuse is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcuseContext {
    Work,
    School,
    Social,
    Family,
}

impl ExcuseContext {
    pub const ALL: [ExcuseContext; 4] = [Self::Work, Self::School, Self::Social, Self::Family];

    /// Wire value, as sent to the model and written to storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::School => "school",
            Self::Social => "social",
            Self::Family => "family",
        }
    }
}

impl fmt::Display for ExcuseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExcuseContext {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidContext(s.to_string()))
    }
}

/// Optional tone modifier: how pressing the situation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyLevel {
    High,
    Medium,
    Low,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrgencyLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidUrgency(s.to_string()))
    }
}

/// Optional tone modifier: how far the excuse may stretch the truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BelievabilityLevel {
    #[serde(rename = "Very Believable")]
    VeryBelievable,
    #[serde(rename = "Somewhat Believable")]
    SomewhatBelievable,
    #[serde(rename = "A Little Stretchy")]
    ALittleStretchy,
}

impl BelievabilityLevel {
    pub const ALL: [BelievabilityLevel; 3] = [
        Self::VeryBelievable,
        Self::SomewhatBelievable,
        Self::ALittleStretchy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryBelievable => "Very Believable",
            Self::SomewhatBelievable => "Somewhat Believable",
            Self::ALittleStretchy => "A Little Stretchy",
        }
    }
}

impl fmt::Display for BelievabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BelievabilityLevel {
    type Err = CoreError;

    /// Accepts the display form (`Very Believable`) as well as kebab and
    /// snake spellings (`very-believable`), since the latter are easier to
    /// type on a command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| CoreError::InvalidBelievability(s.to_string()))
    }
}
