//! Counting test module shared by chain tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{MessageInfo, ModuleFactory, ModuleOptions, ServerAuthModule, Subject, ValidationFault};
use crate::domain::AuthStatus;

/// Position value for a module that must never be reached
pub const NEVER_CALLED: u32 = 0;

/// Module returning a fixed result and asserting the order it is called in.
///
/// `outcome == None` raises a fault. Every call bumps the shared counter and
/// checks it against `expected_position` (1-based).
#[derive(Debug)]
pub struct CountingModule {
    outcome: Option<AuthStatus>,
    counter: Arc<AtomicU32>,
    expected_position: u32,
}

impl CountingModule {
    pub fn new(outcome: Option<AuthStatus>, counter: Arc<AtomicU32>, expected_position: u32) -> Self {
        Self {
            outcome,
            counter,
            expected_position,
        }
    }

    /// Factory building a fresh counting module per evaluation
    pub fn factory(
        outcome: Option<AuthStatus>,
        counter: &Arc<AtomicU32>,
        expected_position: u32,
    ) -> ModuleFactory {
        let counter = counter.clone();
        ModuleFactory::new(format!("counting-{}", expected_position), move || {
            CountingModule::new(outcome, counter.clone(), expected_position)
        })
    }
}

#[async_trait]
impl ServerAuthModule for CountingModule {
    async fn validate_request(
        &self,
        _message: &mut MessageInfo,
        _client_subject: &mut Subject,
        _service_subject: &Subject,
        _options: &ModuleOptions,
    ) -> Result<AuthStatus, ValidationFault> {
        let position = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        assert_eq!(
            self.expected_position, position,
            "module called out of order"
        );

        self.outcome
            .ok_or_else(|| ValidationFault::new("counting", "configured to fail"))
    }
}
