//! Fixed outcome module
//!
//! Returns a status chosen in configuration without looking at the request.
//! Used to dry-run a policy's flag layout before real modules are plugged in.

use async_trait::async_trait;
use tracing::trace;

use crate::domain::{
    AuthStatus, DomainError, MessageInfo, ModuleOptions, ServerAuthModule, Subject,
    ValidationFault,
};

const STATUS_OPTION: &str = "status";
const MESSAGE_OPTION: &str = "message";
const FAULT_VALUE: &str = "fault";

/// What a [`FixedOutcomeModule`] answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedOutcome {
    Status(AuthStatus),
    Fault(String),
}

#[derive(Debug, Clone)]
pub struct FixedOutcomeModule {
    outcome: FixedOutcome,
}

impl FixedOutcomeModule {
    pub const KIND: &'static str = "fixed_outcome";

    pub fn new(outcome: FixedOutcome) -> Self {
        Self { outcome }
    }

    /// Reads `status` (a status name or `"fault"`) and an optional `message`
    pub fn from_options(options: &ModuleOptions) -> Result<Self, DomainError> {
        let status = match options.get(STATUS_OPTION) {
            Some(value) => value.as_str().ok_or_else(|| {
                DomainError::configuration(format!(
                    "Option '{}' of module '{}' must be a string",
                    STATUS_OPTION,
                    Self::KIND
                ))
            })?,
            None => {
                return Err(DomainError::configuration(format!(
                    "Module '{}' requires the '{}' option",
                    Self::KIND,
                    STATUS_OPTION
                )))
            }
        };

        if status.eq_ignore_ascii_case(FAULT_VALUE) {
            let message = options
                .get(MESSAGE_OPTION)
                .and_then(|m| m.as_str())
                .unwrap_or("configured fault")
                .to_string();
            return Ok(Self::new(FixedOutcome::Fault(message)));
        }

        let status = status
            .parse::<AuthStatus>()
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        Ok(Self::new(FixedOutcome::Status(status)))
    }

    pub fn outcome(&self) -> &FixedOutcome {
        &self.outcome
    }
}

#[async_trait]
impl ServerAuthModule for FixedOutcomeModule {
    async fn validate_request(
        &self,
        _message: &mut MessageInfo,
        _client_subject: &mut Subject,
        _service_subject: &Subject,
        _options: &ModuleOptions,
    ) -> Result<AuthStatus, ValidationFault> {
        trace!(outcome = ?self.outcome, "Fixed outcome module invoked");

        match &self.outcome {
            FixedOutcome::Status(status) => Ok(*status),
            FixedOutcome::Fault(message) => Err(ValidationFault::new(Self::KIND, message.clone())),
        }
    }
}
