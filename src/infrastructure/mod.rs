//! Infrastructure layer - registry, module catalog, policy loading and logging

pub mod logging;
pub mod module;
pub mod policy;
pub mod registration;

pub use module::{ModuleCatalog, FixedOutcomeModule};
pub use policy::PolicyLoader;
pub use registration::InMemoryChainRegistry;
