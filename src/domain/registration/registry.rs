//! Chain registry trait

use std::sync::Arc;

use async_trait::async_trait;

use super::{RegistrationContext, RegistrationId};
use crate::domain::{DomainError, ModuleChain};

/// Owns registered module chains keyed by layer and application context
#[async_trait]
pub trait ChainRegistry: Send + Sync + std::fmt::Debug {
    /// Register a chain; an existing registration for the same layer and
    /// application context is replaced and keeps its id
    async fn register(
        &self,
        layer: Option<String>,
        app_context: Option<String>,
        description: Option<String>,
        chain: ModuleChain,
    ) -> Result<RegistrationId, DomainError>;

    /// Find the chain that applies to a layer and application context.
    ///
    /// Exact matches win over registrations that leave the application
    /// context open, which win over ones leaving the layer open, which win
    /// over a registration leaving both open.
    async fn lookup(
        &self,
        layer: Option<&str>,
        app_context: Option<&str>,
    ) -> Result<Option<Arc<ModuleChain>>, DomainError>;

    /// Chain held by a registration
    async fn chain(&self, id: &RegistrationId) -> Result<Option<Arc<ModuleChain>>, DomainError>;

    /// Remove a registration, returning whether it existed
    async fn remove_registration(&self, id: &RegistrationId) -> Result<bool, DomainError>;

    /// Metadata of a registration
    async fn registration_context(
        &self,
        id: &RegistrationId,
    ) -> Result<Option<RegistrationContext>, DomainError>;

    /// Ids of registrations whose layer and application context equal the
    /// given values; `None` leaves that part unfiltered
    async fn registration_ids(
        &self,
        layer: Option<&str>,
        app_context: Option<&str>,
    ) -> Result<Vec<RegistrationId>, DomainError>;
}
