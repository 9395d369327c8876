//! Per-exchange auth context bound to a shared module chain

use std::sync::Arc;

use tracing::debug;

use super::{ChainEvaluator, ChainFault, Evaluation, InvokedModule, ModuleChain};
use crate::domain::{AuthStatus, MessageInfo, Subject, ValidationFault};

/// Runs one request/response exchange through a module chain.
///
/// The context remembers which module instances took part in
/// `validate_request`, including one that faulted, so that `secure_response`
/// and `clean_subject` reach the same instances afterwards, most recently
/// invoked first.
#[derive(Debug)]
pub struct ServerAuthContext {
    chain: Arc<ModuleChain>,
    evaluator: ChainEvaluator,
    invoked: Vec<InvokedModule>,
    modules_invoked: u32,
}

impl ServerAuthContext {
    pub fn new(chain: Arc<ModuleChain>) -> Self {
        Self {
            chain,
            evaluator: ChainEvaluator::new(),
            invoked: Vec::new(),
            modules_invoked: 0,
        }
    }

    pub fn chain(&self) -> &ModuleChain {
        &self.chain
    }

    /// Modules invoked by the last `validate_request`, including one that faulted
    pub fn modules_invoked(&self) -> u32 {
        self.modules_invoked
    }

    pub async fn validate_request(
        &mut self,
        message: &mut MessageInfo,
        client_subject: &mut Subject,
        service_subject: &Subject,
    ) -> Result<AuthStatus, ChainFault> {
        match self
            .evaluator
            .evaluate(&self.chain, message, client_subject, service_subject)
            .await
        {
            Ok(Evaluation {
                status,
                modules_invoked,
                invoked,
            }) => {
                self.modules_invoked = modules_invoked;
                self.invoked = invoked;
                Ok(status)
            }
            Err(fault) => {
                self.modules_invoked = fault.modules_invoked;
                self.invoked = fault.invoked.clone();
                Err(fault)
            }
        }
    }

    /// Walks the validated modules in reverse; the first result other than
    /// `SendSuccess` ends the walk and is returned.
    pub async fn secure_response(
        &self,
        message: &mut MessageInfo,
        service_subject: &Subject,
    ) -> Result<AuthStatus, ValidationFault> {
        for invoked in self.invoked.iter().rev() {
            let options = self.chain.entries()[invoked.position].options();
            let status = invoked
                .module
                .secure_response(message, service_subject, options)
                .await?;

            if status != AuthStatus::SendSuccess {
                debug!(position = invoked.position, status = %status, "Response securing stopped");
                return Ok(status);
            }
        }

        Ok(AuthStatus::SendSuccess)
    }

    /// Asks every validated module, in reverse order, to remove what it added
    pub async fn clean_subject(
        &self,
        message: &mut MessageInfo,
        subject: &mut Subject,
    ) -> Result<(), ValidationFault> {
        for invoked in self.invoked.iter().rev() {
            invoked.module.clean_subject(message, subject).await?;
        }

        Ok(())
    }
}
