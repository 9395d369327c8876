//! Policy loader - turns configured policies into registered module chains

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::PolicyConfig;
use crate::domain::{ChainConfigurationBuilder, ChainRegistry, DomainError, RegistrationId};
use crate::infrastructure::module::ModuleCatalog;

#[derive(Debug, Clone)]
pub struct PolicyLoader {
    catalog: Arc<ModuleCatalog>,
    registry: Arc<dyn ChainRegistry>,
}

impl PolicyLoader {
    pub fn new(catalog: Arc<ModuleCatalog>, registry: Arc<dyn ChainRegistry>) -> Self {
        Self { catalog, registry }
    }

    /// Resolve every module of `policy` through the catalog
    pub fn builder_for(&self, policy: &PolicyConfig) -> Result<ChainConfigurationBuilder, DomainError> {
        let mut builder = ChainConfigurationBuilder::builder(
            policy.layer.as_deref(),
            policy.app_context.as_deref(),
        );

        if let Some(description) = &policy.description {
            builder = builder.set_description(description.clone());
        }

        for (index, entry) in policy.modules.iter().enumerate() {
            let factory = self
                .catalog
                .create(&entry.module, &entry.options)
                .map_err(|e| {
                    DomainError::configuration(format!(
                        "Policy '{}' module {} ('{}'): {}",
                        policy.label(),
                        index,
                        entry.module,
                        e
                    ))
                })?;

            builder = builder.add_module_factory(factory, entry.flag, entry.options.clone());
        }

        Ok(builder)
    }

    /// Register one policy
    pub async fn load_policy(&self, policy: &PolicyConfig) -> Result<RegistrationId, DomainError> {
        let builder = self.builder_for(policy)?;
        let modules = builder.entry_count();
        let id = builder.register(self.registry.as_ref()).await?;

        info!(
            policy = %policy.label(),
            registration_id = %id,
            modules,
            "Policy loaded"
        );

        Ok(id)
    }

    /// Register all policies in order; stops at the first invalid one
    pub async fn load_all(&self, policies: &[PolicyConfig]) -> Result<Vec<RegistrationId>, DomainError> {
        if policies.is_empty() {
            warn!("No authentication policies configured");
        }

        let mut ids = Vec::with_capacity(policies.len());
        for policy in policies {
            ids.push(self.load_policy(policy).await?);
        }

        Ok(ids)
    }
}
