//! Registration domain - how module chains are registered and looked up

mod builder;
mod entity;
mod registry;

pub use builder::ChainConfigurationBuilder;
pub use entity::{RegistrationContext, RegistrationId};
pub use registry::ChainRegistry;
