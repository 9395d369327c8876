//! Validation fault raised by a module

use thiserror::Error;

/// Error raised by a server auth module.
///
/// A fault is never ranked against [`crate::domain::AuthStatus`] values: it
/// ends the evaluation that observed it and is handed back to the caller as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation fault in module '{module}': {message}")]
pub struct ValidationFault {
    pub module: String,
    pub message: String,
}

impl ValidationFault {
    pub fn new(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            message: message.into(),
        }
    }
}
