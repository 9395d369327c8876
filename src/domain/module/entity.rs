//! Server auth module capability and the factories that produce modules

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{MessageInfo, Subject, ValidationFault};
use crate::domain::AuthStatus;

/// Per-entry options passed through to a module untouched
pub type ModuleOptions = HashMap<String, serde_json::Value>;

/// A pluggable step of request validation.
///
/// Implementations must not hold on to the message or subjects after a call
/// returns; they are owned by the caller of the chain.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServerAuthModule: Send + Sync {
    /// Validate an incoming request, populating `client_subject` on success
    async fn validate_request(
        &self,
        message: &mut MessageInfo,
        client_subject: &mut Subject,
        service_subject: &Subject,
        options: &ModuleOptions,
    ) -> Result<AuthStatus, ValidationFault>;

    /// Secure the outgoing response of an exchange this module validated
    async fn secure_response(
        &self,
        _message: &mut MessageInfo,
        _service_subject: &Subject,
        _options: &ModuleOptions,
    ) -> Result<AuthStatus, ValidationFault> {
        Ok(AuthStatus::SendSuccess)
    }

    /// Remove whatever this module added to `subject`
    async fn clean_subject(
        &self,
        _message: &mut MessageInfo,
        _subject: &mut Subject,
    ) -> Result<(), ValidationFault> {
        Ok(())
    }
}

type CreateFn = dyn Fn() -> Arc<dyn ServerAuthModule> + Send + Sync;

/// Zero-argument constructor for a module, named for diagnostics.
///
/// A factory may hand out a fresh instance per evaluation ([`ModuleFactory::new`])
/// or the same instance every time ([`ModuleFactory::shared`]).
#[derive(Clone)]
pub struct ModuleFactory {
    name: String,
    create: Arc<CreateFn>,
}

impl ModuleFactory {
    /// Factory that builds a new module on every call
    pub fn new<M, F>(name: impl Into<String>, create: F) -> Self
    where
        M: ServerAuthModule + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            create: Arc::new(move || Arc::new(create()) as Arc<dyn ServerAuthModule>),
        }
    }

    /// Factory that always returns the same module instance
    pub fn shared(name: impl Into<String>, module: Arc<dyn ServerAuthModule>) -> Self {
        Self {
            name: name.into(),
            create: Arc::new(move || module.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create(&self) -> Arc<dyn ServerAuthModule> {
        (self.create)()
    }
}

impl fmt::Debug for ModuleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleFactory")
            .field("name", &self.name)
            .finish()
    }
}
