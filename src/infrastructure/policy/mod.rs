//! Policy Infrastructure
//!
//! Loads configured authentication policies into a chain registry.

mod loader;

pub use loader::PolicyLoader;
