//! Control flags attached to chain entries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// How a module's result influences continuation and the chain outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlFlag {
    /// Must succeed; the chain keeps going after a failure
    Required,
    /// Must succeed; a failure stops the chain
    Requisite,
    /// A success ends the chain; a failure matters only without controlling entries
    Sufficient,
    /// Contributes only when no controlling entry decides the outcome
    Optional,
}

impl ControlFlag {
    /// `Required` and `Requisite` entries always decide the outcome
    pub fn is_controlling(self) -> bool {
        matches!(self, Self::Required | Self::Requisite)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Requisite => "requisite",
            Self::Sufficient => "sufficient",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for ControlFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "required" => Ok(Self::Required),
            "requisite" => Ok(Self::Requisite),
            "sufficient" => Ok(Self::Sufficient),
            "optional" => Ok(Self::Optional),
            other => Err(DomainError::validation(format!(
                "Unknown control flag '{}'",
                other
            ))),
        }
    }
}
