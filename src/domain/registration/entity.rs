//! Registration identifiers and metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle returned when a chain is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RegistrationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Descriptive metadata kept alongside a registered chain.
///
/// `None` for layer or application context means the registration applies to
/// any value of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationContext {
    layer: Option<String>,
    app_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    entry_count: usize,
    registered_at: DateTime<Utc>,
}

impl RegistrationContext {
    pub fn new(
        layer: Option<String>,
        app_context: Option<String>,
        description: Option<String>,
        entry_count: usize,
    ) -> Self {
        Self {
            layer,
            app_context,
            description,
            entry_count,
            registered_at: Utc::now(),
        }
    }

    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    pub fn app_context(&self) -> Option<&str> {
        self.app_context.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}
