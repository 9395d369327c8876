//! Authentication status outcomes and their success ranking

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Outcome reported by a server auth module or by a whole chain.
///
/// Variants are declared from most to least successful. Faults are not an
/// `AuthStatus`; they travel separately as [`super::ValidationFault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthStatus {
    /// The request was validated and processing may continue
    Success,
    /// The module produced a response that should be sent as a success
    SendSuccess,
    /// The dialog with the client is incomplete and must continue
    SendContinue,
    /// Validation failed and a failure response should be sent
    SendFailure,
}

impl AuthStatus {
    /// All statuses, most successful first
    pub const ALL: [AuthStatus; 4] = [
        Self::Success,
        Self::SendSuccess,
        Self::SendContinue,
        Self::SendFailure,
    ];

    /// Rank used for "most successful" comparisons (lower is better)
    pub fn rank(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::SendSuccess => 1,
            Self::SendContinue => 2,
            Self::SendFailure => 3,
        }
    }

    /// Returns whichever status is more successful.
    ///
    /// On a tie the first argument wins, so an earlier result is kept over an
    /// equally ranked later one.
    pub fn more_successful_of(first: AuthStatus, second: AuthStatus) -> AuthStatus {
        if second.rank() < first.rank() {
            second
        } else {
            first
        }
    }

    /// Only `SendFailure` counts as a failure for flag handling
    pub fn is_failure(self) -> bool {
        matches!(self, Self::SendFailure)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::SendSuccess => "SEND_SUCCESS",
            Self::SendContinue => "SEND_CONTINUE",
            Self::SendFailure => "SEND_FAILURE",
        }
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| DomainError::validation(format!("Unknown auth status '{}'", s)))
    }
}
