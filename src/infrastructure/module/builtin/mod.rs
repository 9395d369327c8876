//! Built-in Modules
//!
//! Modules that ship with the crate and are available to configuration by kind name.

mod fixed_outcome;

pub use fixed_outcome::{FixedOutcome, FixedOutcomeModule};

use tracing::debug;

use super::ModuleCatalog;
use crate::domain::{DomainError, ModuleFactory};

/// Register every built-in module kind with `catalog`
pub fn register_builtin_modules(catalog: &mut ModuleCatalog) -> Result<(), DomainError> {
    catalog.register(FixedOutcomeModule::KIND, |options| {
        let module = FixedOutcomeModule::from_options(options)?;
        Ok(ModuleFactory::new(FixedOutcomeModule::KIND, move || {
            module.clone()
        }))
    })?;

    debug!(kinds = ?catalog.kinds(), "Registered built-in modules");
    Ok(())
}
