//! Module Infrastructure
//!
//! Catalog of module kinds available to configuration and the built-in modules.

pub mod builtin;
pub mod catalog;

pub use builtin::{register_builtin_modules, FixedOutcome, FixedOutcomeModule};
pub use catalog::ModuleCatalog;
