//! Chain evaluator - applies control flag semantics to module results

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info_span, warn, Instrument};

use super::{ChainEntry, ControlFlag, ModuleChain};
use crate::domain::{AuthStatus, MessageInfo, ServerAuthModule, Subject, ValidationFault};

/// A module instance that took part in an evaluation
#[derive(Clone)]
pub struct InvokedModule {
    /// Index of the chain entry the module was created for
    pub position: usize,
    pub module: Arc<dyn ServerAuthModule>,
}

impl fmt::Debug for InvokedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokedModule")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// Combined result of a completed evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub status: AuthStatus,
    pub modules_invoked: u32,
    /// Modules in the order they were invoked
    pub invoked: Vec<InvokedModule>,
}

/// A module raised a fault; the evaluation stopped at that entry
#[derive(Debug, Clone, Error)]
#[error("Chain evaluation aborted at entry {position}")]
pub struct ChainFault {
    #[source]
    pub fault: ValidationFault,
    pub position: usize,
    /// Includes the module that raised the fault
    pub modules_invoked: u32,
    /// Modules in the order they were invoked, the faulting one last
    pub invoked: Vec<InvokedModule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

/// Run-local state, rebuilt for every evaluation
#[derive(Debug, Default)]
struct EvaluationState {
    /// First failure of a Required/Requisite entry; never overwritten
    required_failure: Option<AuthStatus>,
    saw_controlling_entry: bool,
    /// Most successful result among non-controlling entries
    optional_best: Option<AuthStatus>,
    modules_invoked: u32,
}

impl EvaluationState {
    fn apply(&mut self, entry: &ChainEntry, status: AuthStatus) -> Step {
        match entry.flag() {
            ControlFlag::Required => {
                self.saw_controlling_entry = true;
                if status.is_failure() {
                    self.record_required_failure(status);
                }
                Step::Continue
            }
            ControlFlag::Requisite => {
                self.saw_controlling_entry = true;
                if status.is_failure() {
                    self.record_required_failure(status);
                    Step::Stop
                } else {
                    Step::Continue
                }
            }
            ControlFlag::Sufficient => {
                if !status.is_failure() {
                    self.saw_controlling_entry = true;
                    return Step::Stop;
                }
                if !self.saw_controlling_entry && !entry.controlling_after() {
                    self.combine_optional(status);
                }
                Step::Continue
            }
            ControlFlag::Optional => {
                self.combine_optional(status);
                Step::Continue
            }
        }
    }

    fn record_required_failure(&mut self, status: AuthStatus) {
        self.required_failure.get_or_insert(status);
    }

    fn combine_optional(&mut self, status: AuthStatus) {
        self.optional_best = Some(match self.optional_best {
            Some(best) => AuthStatus::more_successful_of(best, status),
            None => status,
        });
    }

    /// A recorded Required/Requisite failure wins even over a later
    /// Sufficient success.
    fn outcome(&self) -> AuthStatus {
        if let Some(failure) = self.required_failure {
            return failure;
        }
        if self.saw_controlling_entry {
            return AuthStatus::Success;
        }
        self.optional_best.unwrap_or(AuthStatus::Success)
    }
}

/// Evaluates module chains against a single request.
///
/// Holds no state between runs, so one evaluator may serve any number of
/// chains and callers concurrently.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChainEvaluator;

impl ChainEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Invoke the chain's modules in order and combine their results
    pub async fn evaluate(
        &self,
        chain: &ModuleChain,
        message: &mut MessageInfo,
        client_subject: &mut Subject,
        service_subject: &Subject,
    ) -> Result<Evaluation, ChainFault> {
        let span = info_span!("evaluate_chain", entries = chain.len());

        self.run(chain, message, client_subject, service_subject)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        chain: &ModuleChain,
        message: &mut MessageInfo,
        client_subject: &mut Subject,
        service_subject: &Subject,
    ) -> Result<Evaluation, ChainFault> {
        let mut state = EvaluationState::default();
        let mut invoked = Vec::with_capacity(chain.len());

        for (position, entry) in chain.entries().iter().enumerate() {
            let module = entry.factory().create();
            state.modules_invoked += 1;

            let result = module
                .validate_request(message, client_subject, service_subject, entry.options())
                .await;
            invoked.push(InvokedModule { position, module });

            let status = match result {
                Ok(status) => status,
                Err(fault) => {
                    warn!(
                        position,
                        module = entry.name(),
                        flag = %entry.flag(),
                        error = %fault,
                        "Module raised a fault, aborting chain"
                    );
                    return Err(ChainFault {
                        fault,
                        position,
                        modules_invoked: state.modules_invoked,
                        invoked,
                    });
                }
            };

            debug!(
                position,
                module = entry.name(),
                flag = %entry.flag(),
                status = %status,
                "Module returned"
            );

            if state.apply(entry, status) == Step::Stop {
                debug!(position, "Chain stopped early");
                break;
            }
        }

        let status = state.outcome();
        debug!(
            status = %status,
            modules_invoked = state.modules_invoked,
            "Chain evaluated"
        );

        Ok(Evaluation {
            status,
            modules_invoked: state.modules_invoked,
            invoked,
        })
    }
}
