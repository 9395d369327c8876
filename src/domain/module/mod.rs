//! Module capability domain - what a chain entry invokes and what it is handed

mod entity;
mod fault;
mod message;
mod subject;

#[cfg(test)]
pub mod mock;

pub use entity::{ModuleFactory, ModuleOptions, ServerAuthModule};
pub use fault::ValidationFault;
pub use message::{MessageInfo, MessagePayload};
pub use subject::Subject;

#[cfg(test)]
pub use entity::MockServerAuthModule;
