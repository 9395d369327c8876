//! Module chain domain - chain configuration and flag-driven evaluation

mod context;
mod entity;
mod evaluator;
mod flag;

pub use context::ServerAuthContext;
pub use entity::{ChainEntry, ModuleChain};
pub use evaluator::{ChainEvaluator, ChainFault, Evaluation, InvokedModule};
pub use flag::ControlFlag;
