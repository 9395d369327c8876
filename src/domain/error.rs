use thiserror::Error;

/// Errors raised while configuring, registering or looking up chains.
///
/// Module failures during evaluation are [`crate::domain::ValidationFault`]s
/// and never surface as a `DomainError`.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Unknown module kind or registration
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Unparseable status or control flag name
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Chain or policy that cannot be built
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
