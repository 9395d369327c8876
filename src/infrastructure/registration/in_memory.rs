//! In-memory chain registry

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{
    ChainRegistry, DomainError, ModuleChain, RegistrationContext, RegistrationId,
};

/// Entry in the registry
#[derive(Debug)]
struct Registration {
    context: RegistrationContext,
    chain: Arc<ModuleChain>,
}

type ContextKey = (Option<String>, Option<String>);

/// Registry holding chains in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryChainRegistry {
    registrations: RwLock<HashMap<RegistrationId, Registration>>,
    /// Index of (layer, app context) to registration id
    by_context: RwLock<HashMap<ContextKey, RegistrationId>>,
}

impl InMemoryChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.registrations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.registrations.read().await.is_empty()
    }
}

#[async_trait]
impl ChainRegistry for InMemoryChainRegistry {
    async fn register(
        &self,
        layer: Option<String>,
        app_context: Option<String>,
        description: Option<String>,
        chain: ModuleChain,
    ) -> Result<RegistrationId, DomainError> {
        let key: ContextKey = (layer.clone(), app_context.clone());
        let context = RegistrationContext::new(layer, app_context, description, chain.len());

        let mut registrations = self.registrations.write().await;
        let mut by_context = self.by_context.write().await;

        let id = match by_context.get(&key) {
            Some(existing) => {
                info!(
                    registration_id = %existing,
                    layer = ?key.0,
                    app_context = ?key.1,
                    "Replacing module chain registration"
                );
                *existing
            }
            None => {
                let id = RegistrationId::generate();
                info!(
                    registration_id = %id,
                    layer = ?key.0,
                    app_context = ?key.1,
                    entries = chain.len(),
                    "Registering module chain"
                );
                by_context.insert(key, id);
                id
            }
        };

        registrations.insert(
            id,
            Registration {
                context,
                chain: Arc::new(chain),
            },
        );

        Ok(id)
    }

    async fn lookup(
        &self,
        layer: Option<&str>,
        app_context: Option<&str>,
    ) -> Result<Option<Arc<ModuleChain>>, DomainError> {
        let candidates: [ContextKey; 4] = [
            (layer.map(str::to_string), app_context.map(str::to_string)),
            (layer.map(str::to_string), None),
            (None, app_context.map(str::to_string)),
            (None, None),
        ];

        let registrations = self.registrations.read().await;
        let by_context = self.by_context.read().await;

        let found = candidates
            .iter()
            .filter_map(|key| by_context.get(key))
            .filter_map(|id| registrations.get(id))
            .map(|registration| registration.chain.clone())
            .next();

        debug!(
            layer = ?layer,
            app_context = ?app_context,
            found = found.is_some(),
            "Module chain lookup"
        );

        Ok(found)
    }

    async fn chain(&self, id: &RegistrationId) -> Result<Option<Arc<ModuleChain>>, DomainError> {
        Ok(self
            .registrations
            .read()
            .await
            .get(id)
            .map(|registration| registration.chain.clone()))
    }

    async fn remove_registration(&self, id: &RegistrationId) -> Result<bool, DomainError> {
        let mut registrations = self.registrations.write().await;
        let mut by_context = self.by_context.write().await;

        match registrations.remove(id) {
            Some(registration) => {
                let key: ContextKey = (
                    registration.context.layer().map(str::to_string),
                    registration.context.app_context().map(str::to_string),
                );
                by_context.remove(&key);
                info!(registration_id = %id, "Removed module chain registration");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn registration_context(
        &self,
        id: &RegistrationId,
    ) -> Result<Option<RegistrationContext>, DomainError> {
        Ok(self
            .registrations
            .read()
            .await
            .get(id)
            .map(|registration| registration.context.clone()))
    }

    async fn registration_ids(
        &self,
        layer: Option<&str>,
        app_context: Option<&str>,
    ) -> Result<Vec<RegistrationId>, DomainError> {
        let registrations = self.registrations.read().await;

        let mut selected: Vec<(&RegistrationId, &Registration)> = registrations
            .iter()
            .filter(|(_, r)| layer.is_none() || r.context.layer() == layer)
            .filter(|(_, r)| app_context.is_none() || r.context.app_context() == app_context)
            .collect();
        selected.sort_by_key(|(_, r)| r.context.registered_at());

        Ok(selected.into_iter().map(|(id, _)| *id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::mock::CountingModule;
    use crate::domain::{
        AuthStatus, ChainConfigurationBuilder, ChainEvaluator, ControlFlag, MessageInfo,
        ModuleOptions, Subject,
    };
    use std::sync::atomic::{AtomicU32, Ordering};

    const LAYER: &str = "layer";
    const APP_CONTEXT: &str = "application-context";
    const DESCRIPTION: &str = "test description";

    /// Chain whose outcome is `status`; meant to be evaluated once
    fn single_entry_chain(status: AuthStatus) -> ModuleChain {
        let counter = Arc::new(AtomicU32::new(0));
        ModuleChain::new(vec![(
            CountingModule::factory(Some(status), &counter, 1),
            ControlFlag::Optional,
            ModuleOptions::new(),
        )])
    }

    async fn evaluate(chain: &ModuleChain) -> AuthStatus {
        ChainEvaluator::new()
            .evaluate(chain, &mut MessageInfo::new(), &mut Subject::new(), &Subject::new())
            .await
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn test_register_and_lookup_exact() {
        let registry = InMemoryChainRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));

        let id = ChainConfigurationBuilder::builder(Some(LAYER), Some(APP_CONTEXT))
            .set_description(DESCRIPTION)
            .add_module_factory(
                CountingModule::factory(Some(AuthStatus::Success), &counter, 1),
                ControlFlag::Required,
                ModuleOptions::new(),
            )
            .add_module_factory(
                CountingModule::factory(Some(AuthStatus::Success), &counter, 2),
                ControlFlag::Required,
                ModuleOptions::new(),
            )
            .register(&registry)
            .await
            .unwrap();

        let chain = registry
            .lookup(Some(LAYER), Some(APP_CONTEXT))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(evaluate(&chain).await, AuthStatus::Success);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        let context = registry.registration_context(&id).await.unwrap().unwrap();
        assert_eq!(context.layer(), Some(LAYER));
        assert_eq!(context.app_context(), Some(APP_CONTEXT));
        assert_eq!(context.description(), Some(DESCRIPTION));
        assert_eq!(context.entry_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_builder_is_not_registered() {
        let registry = InMemoryChainRegistry::new();

        let result = ChainConfigurationBuilder::builder(Some(LAYER), Some(APP_CONTEXT))
            .register(&registry)
            .await;

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_lookup_fallback_order() {
        let registry = InMemoryChainRegistry::new();

        registry
            .register(None, None, None, single_entry_chain(AuthStatus::SendFailure))
            .await
            .unwrap();
        registry
            .register(
                Some(LAYER.to_string()),
                None,
                None,
                single_entry_chain(AuthStatus::SendContinue),
            )
            .await
            .unwrap();
        registry
            .register(
                None,
                Some(APP_CONTEXT.to_string()),
                None,
                single_entry_chain(AuthStatus::SendSuccess),
            )
            .await
            .unwrap();

        // Layer-wide registration beats the application-wide one
        let chain = registry.lookup(Some(LAYER), Some(APP_CONTEXT)).await.unwrap().unwrap();
        assert_eq!(evaluate(&chain).await, AuthStatus::SendContinue);

        let chain = registry.lookup(Some("other"), Some(APP_CONTEXT)).await.unwrap().unwrap();
        assert_eq!(evaluate(&chain).await, AuthStatus::SendSuccess);

        let chain = registry.lookup(Some("other"), Some("other")).await.unwrap().unwrap();
        assert_eq!(evaluate(&chain).await, AuthStatus::SendFailure);

        assert_eq!(registry.len().await, 3);
    }

    #[tokio::test]
    async fn test_lookup_prefers_most_specific_registration() {
        let registry = InMemoryChainRegistry::new();

        registry
            .register(None, None, None, single_entry_chain(AuthStatus::SendFailure))
            .await
            .unwrap();
        registry
            .register(
                Some(LAYER.to_string()),
                Some(APP_CONTEXT.to_string()),
                None,
                single_entry_chain(AuthStatus::SendContinue),
            )
            .await
            .unwrap();

        let chain = registry.lookup(Some(LAYER), Some(APP_CONTEXT)).await.unwrap().unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(evaluate(&chain).await, AuthStatus::SendContinue);
    }

    #[tokio::test]
    async fn test_lookup_without_match() {
        let registry = InMemoryChainRegistry::new();

        registry
            .register(
                Some(LAYER.to_string()),
                Some(APP_CONTEXT.to_string()),
                None,
                single_entry_chain(AuthStatus::Success),
            )
            .await
            .unwrap();

        assert!(registry.lookup(Some(LAYER), Some("other")).await.unwrap().is_none());
        assert!(registry.lookup(None, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reregistration_replaces_chain_and_keeps_id() {
        let registry = InMemoryChainRegistry::new();

        let first = registry
            .register(
                Some(LAYER.to_string()),
                Some(APP_CONTEXT.to_string()),
                Some("first".to_string()),
                single_entry_chain(AuthStatus::Success),
            )
            .await
            .unwrap();
        let second = registry
            .register(
                Some(LAYER.to_string()),
                Some(APP_CONTEXT.to_string()),
                Some("second".to_string()),
                single_entry_chain(AuthStatus::SendFailure),
            )
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(registry.len().await, 1);

        let context = registry.registration_context(&first).await.unwrap().unwrap();
        assert_eq!(context.description(), Some("second"));
    }

    #[tokio::test]
    async fn test_remove_registration() {
        let registry = InMemoryChainRegistry::new();

        let id = registry
            .register(
                Some(LAYER.to_string()),
                Some(APP_CONTEXT.to_string()),
                None,
                single_entry_chain(AuthStatus::Success),
            )
            .await
            .unwrap();

        let chain = registry.chain(&id).await.unwrap().unwrap();
        assert_eq!(evaluate(&chain).await, AuthStatus::Success);

        assert!(registry.remove_registration(&id).await.unwrap());
        assert!(!registry.remove_registration(&id).await.unwrap());
        assert!(registry.chain(&id).await.unwrap().is_none());
        assert!(registry.lookup(Some(LAYER), Some(APP_CONTEXT)).await.unwrap().is_none());
        assert!(registry.registration_context(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_registration_ids_filter() {
        let registry = InMemoryChainRegistry::new();

        let a = registry
            .register(
                Some(LAYER.to_string()),
                Some("a".to_string()),
                None,
                single_entry_chain(AuthStatus::Success),
            )
            .await
            .unwrap();
        let b = registry
            .register(
                Some(LAYER.to_string()),
                Some("b".to_string()),
                None,
                single_entry_chain(AuthStatus::Success),
            )
            .await
            .unwrap();
        let other = registry
            .register(
                Some("other".to_string()),
                Some("a".to_string()),
                None,
                single_entry_chain(AuthStatus::Success),
            )
            .await
            .unwrap();

        let layer_ids = registry.registration_ids(Some(LAYER), None).await.unwrap();
        assert_eq!(layer_ids.len(), 2);
        assert!(layer_ids.contains(&a) && layer_ids.contains(&b));

        let app_ids = registry.registration_ids(None, Some("a")).await.unwrap();
        assert_eq!(app_ids.len(), 2);
        assert!(app_ids.contains(&a) && app_ids.contains(&other));

        assert_eq!(registry.registration_ids(None, None).await.unwrap().len(), 3);
    }
}
