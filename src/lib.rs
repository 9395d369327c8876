//! Auth Chain
//!
//! Evaluates ordered chains of server authentication modules:
//! - Required, Requisite, Sufficient and Optional control flags
//! - Most successful outcome wins among non-controlling modules
//! - Registry of chains keyed by message layer and application context
//! - Policies loaded from configuration files

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use domain::RegistrationId;
use infrastructure::{InMemoryChainRegistry, ModuleCatalog, PolicyLoader};
use tracing::info;

/// Create a registry holding every policy of `config`
pub async fn create_registry(
    config: &AppConfig,
) -> anyhow::Result<(Arc<InMemoryChainRegistry>, Vec<RegistrationId>)> {
    let catalog = Arc::new(
        ModuleCatalog::with_builtin_modules().context("Failed to register built-in modules")?,
    );
    let registry = Arc::new(InMemoryChainRegistry::new());

    let loader = PolicyLoader::new(catalog, registry.clone());
    let ids = loader
        .load_all(&config.policies)
        .await
        .context("Failed to load authentication policies")?;

    info!(policies = ids.len(), "Chain registry initialized");

    Ok((registry, ids))
}
