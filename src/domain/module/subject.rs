//! Credential output container populated by modules

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Principals and credentials established for one party of an exchange
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    principals: BTreeSet<String>,
    public_credentials: Vec<serde_json::Value>,
    private_credentials: Vec<serde_json::Value>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principals.insert(principal.into());
        self
    }

    /// Returns `false` when the principal was already present
    pub fn add_principal(&mut self, principal: impl Into<String>) -> bool {
        self.principals.insert(principal.into())
    }

    pub fn remove_principal(&mut self, principal: &str) -> bool {
        self.principals.remove(principal)
    }

    pub fn has_principal(&self, principal: &str) -> bool {
        self.principals.contains(principal)
    }

    pub fn principals(&self) -> impl Iterator<Item = &str> {
        self.principals.iter().map(String::as_str)
    }

    pub fn add_public_credential(&mut self, credential: serde_json::Value) {
        self.public_credentials.push(credential);
    }

    pub fn add_private_credential(&mut self, credential: serde_json::Value) {
        self.private_credentials.push(credential);
    }

    pub fn public_credentials(&self) -> &[serde_json::Value] {
        &self.public_credentials
    }

    pub fn private_credentials(&self) -> &[serde_json::Value] {
        &self.private_credentials
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
            && self.public_credentials.is_empty()
            && self.private_credentials.is_empty()
    }

    /// Drop every principal and credential
    pub fn clear(&mut self) {
        self.principals.clear();
        self.public_credentials.clear();
        self.private_credentials.clear();
    }
}
