//! Fluent builder for registering module chains

use tracing::debug;

use super::{ChainRegistry, RegistrationId};
use crate::domain::{ControlFlag, DomainError, ModuleChain, ModuleFactory, ModuleOptions};

/// Collects (factory, flag, options) triples and registers them as one chain
#[derive(Debug, Clone)]
pub struct ChainConfigurationBuilder {
    layer: Option<String>,
    app_context: Option<String>,
    description: Option<String>,
    entries: Vec<(ModuleFactory, ControlFlag, ModuleOptions)>,
}

impl ChainConfigurationBuilder {
    /// Start a chain for a layer and application context (`None` for any)
    pub fn builder(layer: Option<&str>, app_context: Option<&str>) -> Self {
        Self {
            layer: layer.map(str::to_string),
            app_context: app_context.map(str::to_string),
            description: None,
            entries: Vec::new(),
        }
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a module; entries are evaluated in the order they are added
    pub fn add_module_factory(
        mut self,
        factory: ModuleFactory,
        flag: ControlFlag,
        options: ModuleOptions,
    ) -> Self {
        self.entries.push((factory, flag, options));
        self
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Build the immutable chain, rejecting configurations without modules
    pub fn build(self) -> Result<ModuleChain, DomainError> {
        self.validate()?;
        Ok(ModuleChain::new(self.entries))
    }

    /// Build the chain and hand it to `registry`
    pub async fn register(self, registry: &dyn ChainRegistry) -> Result<RegistrationId, DomainError> {
        self.validate()?;

        debug!(
            layer = ?self.layer,
            app_context = ?self.app_context,
            entries = self.entries.len(),
            "Registering module chain"
        );

        registry
            .register(
                self.layer,
                self.app_context,
                self.description,
                ModuleChain::new(self.entries),
            )
            .await
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::configuration(format!(
                "Chain for layer '{}' and application context '{}' has no modules",
                self.layer.as_deref().unwrap_or("*"),
                self.app_context.as_deref().unwrap_or("*"),
            )));
        }

        Ok(())
    }
}
