use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::ControlFlag;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub policies: Vec<PolicyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// One authentication policy: the module chain for a layer and application context
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Message layer, e.g. `HttpServlet`; absent means any layer
    #[serde(default)]
    pub layer: Option<String>,
    /// Application context, e.g. `default-host /app`; absent means any application
    #[serde(default)]
    pub app_context: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Modules in evaluation order
    #[serde(default)]
    pub modules: Vec<ModuleEntryConfig>,
}

impl PolicyConfig {
    /// Human readable `layer/app_context` label, `*` standing for "any"
    pub fn label(&self) -> String {
        format!(
            "{}/{}",
            self.layer.as_deref().unwrap_or("*"),
            self.app_context.as_deref().unwrap_or("*")
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleEntryConfig {
    /// Module kind registered in the module catalog
    pub module: String,
    pub flag: ControlFlag,
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config/default` and `config/local`, or from
    /// `path` when given, then apply `APP__` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder();

        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name("config/local").required(false)),
        };

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
