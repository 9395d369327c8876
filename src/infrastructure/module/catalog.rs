//! Module Catalog
//!
//! Maps module kind names used in configuration to constructors that turn an
//! entry's options into a [`ModuleFactory`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::builtin::register_builtin_modules;
use crate::domain::{DomainError, ModuleFactory, ModuleOptions};

type ModuleConstructor =
    dyn Fn(&ModuleOptions) -> Result<ModuleFactory, DomainError> + Send + Sync;

#[derive(Clone, Default)]
pub struct ModuleCatalog {
    constructors: HashMap<String, Arc<ModuleConstructor>>,
}

impl ModuleCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with the built-in module kinds
    pub fn with_builtin_modules() -> Result<Self, DomainError> {
        let mut catalog = Self::new();
        register_builtin_modules(&mut catalog)?;
        Ok(catalog)
    }

    /// Register a constructor under `kind`; kinds are unique
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F) -> Result<(), DomainError>
    where
        F: Fn(&ModuleOptions) -> Result<ModuleFactory, DomainError> + Send + Sync + 'static,
    {
        let kind = kind.into();

        if self.constructors.contains_key(&kind) {
            return Err(DomainError::conflict(format!(
                "Module kind '{}' is already registered",
                kind
            )));
        }

        debug!(kind = %kind, "Registering module kind");
        self.constructors.insert(kind, Arc::new(constructor));
        Ok(())
    }

    /// Build a factory for `kind` configured with `options`
    pub fn create(&self, kind: &str, options: &ModuleOptions) -> Result<ModuleFactory, DomainError> {
        let constructor = self
            .constructors
            .get(kind)
            .ok_or_else(|| DomainError::not_found(format!("Module kind '{}' not found", kind)))?;

        constructor(options)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Registered kinds in alphabetical order
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl fmt::Debug for ModuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleCatalog")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::mock::CountingModule;
    use crate::domain::{AuthStatus, MessageInfo, Subject};
    use serde_json::json;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn test_builtin_catalog() {
        let catalog = ModuleCatalog::with_builtin_modules().unwrap();

        assert!(catalog.contains("fixed_outcome"));
        assert_eq!(catalog.kinds(), vec!["fixed_outcome"]);
    }

    #[test]
    fn test_duplicate_kind_is_rejected() {
        let mut catalog = ModuleCatalog::with_builtin_modules().unwrap();

        let result = catalog.register("fixed_outcome", |_| {
            Err(DomainError::configuration("never built"))
        });

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[test]
    fn test_unknown_kind() {
        let catalog = ModuleCatalog::new();

        let result = catalog.create("kerberos", &ModuleOptions::new());
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_custom_kind() {
        let mut catalog = ModuleCatalog::new();
        let counter = Arc::new(AtomicU32::new(0));
        let shared = counter.clone();

        catalog
            .register("counting", move |_| {
                Ok(CountingModule::factory(Some(AuthStatus::Success), &shared, 1))
            })
            .unwrap();

        let factory = catalog.create("counting", &ModuleOptions::new()).unwrap();
        assert_eq!(factory.name(), "counting-1");
    }

    #[tokio::test]
    async fn test_created_factory_uses_options() {
        let catalog = ModuleCatalog::with_builtin_modules().unwrap();
        let mut options = ModuleOptions::new();
        options.insert("status".to_string(), json!("send_success"));

        let module = catalog.create("fixed_outcome", &options).unwrap().create();
        let status = module
            .validate_request(
                &mut MessageInfo::new(),
                &mut Subject::new(),
                &Subject::new(),
                &options,
            )
            .await
            .unwrap();

        assert_eq!(status, AuthStatus::SendSuccess);
    }

    #[test]
    fn test_invalid_options_fail_at_creation() {
        let catalog = ModuleCatalog::with_builtin_modules().unwrap();

        let result = catalog.create("fixed_outcome", &ModuleOptions::new());
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
