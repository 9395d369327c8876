//! Chain entry and module chain entities

use super::ControlFlag;
use crate::domain::{ModuleFactory, ModuleOptions};

/// One configured (factory, flag, options) triple
#[derive(Debug, Clone)]
pub struct ChainEntry {
    factory: ModuleFactory,
    flag: ControlFlag,
    options: ModuleOptions,
    /// Whether a Required/Requisite entry follows this one
    controlling_after: bool,
}

impl ChainEntry {
    pub fn factory(&self) -> &ModuleFactory {
        &self.factory
    }

    pub fn name(&self) -> &str {
        self.factory.name()
    }

    pub fn flag(&self) -> ControlFlag {
        self.flag
    }

    pub fn options(&self) -> &ModuleOptions {
        &self.options
    }

    pub fn controlling_after(&self) -> bool {
        self.controlling_after
    }
}

/// Ordered, immutable sequence of chain entries.
///
/// Entries are evaluated exactly in the order given; flags never reorder them.
#[derive(Debug, Clone, Default)]
pub struct ModuleChain {
    entries: Vec<ChainEntry>,
}

impl ModuleChain {
    /// Build a chain from (factory, flag, options) triples in evaluation order
    pub fn new(entries: Vec<(ModuleFactory, ControlFlag, ModuleOptions)>) -> Self {
        let mut controlling_after = false;
        let mut built: Vec<ChainEntry> = entries
            .into_iter()
            .rev()
            .map(|(factory, flag, options)| {
                let entry = ChainEntry {
                    factory,
                    flag,
                    options,
                    controlling_after,
                };
                controlling_after |= flag.is_controlling();
                entry
            })
            .collect();
        built.reverse();

        Self { entries: built }
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
