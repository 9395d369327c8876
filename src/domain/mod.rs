//! Domain layer - Core business logic and entities

pub mod chain;
pub mod error;
pub mod module;
pub mod registration;
pub mod status;

pub use chain::{
    ChainEntry, ChainEvaluator, ChainFault, ControlFlag, Evaluation, InvokedModule, ModuleChain,
    ServerAuthContext,
};
pub use error::DomainError;
pub use module::{
    MessageInfo, MessagePayload, ModuleFactory, ModuleOptions, ServerAuthModule, Subject,
    ValidationFault,
};
pub use registration::{
    ChainConfigurationBuilder, ChainRegistry, RegistrationContext, RegistrationId,
};
pub use status::AuthStatus;

#[cfg(test)]
pub use module::MockServerAuthModule;
