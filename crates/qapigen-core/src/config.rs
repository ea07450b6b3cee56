//! Generator configuration types

use crate::{GenerateError, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Generator configuration, usually loaded from `qapigen.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Name of the generated module directory (default: `qapi`)
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// Crate path generated code imports the runtime helpers from
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Prefix the front-end gives to implicit object types
    #[serde(default = "default_object_prefix")]
    pub object_prefix: String,

    /// Suffix of implicit objects that only exist to be embedded as a base
    #[serde(default = "default_base_suffix")]
    pub base_suffix: String,

    /// Name of the placeholder empty object type
    #[serde(default = "default_empty_object")]
    pub empty_object: String,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

fn default_module_name() -> String {
    "qapi".to_string()
}

fn default_runtime_crate() -> String {
    "qapigen_runtime".to_string()
}

fn default_object_prefix() -> String {
    "q_obj_".to_string()
}

fn default_base_suffix() -> String {
    "-base".to_string()
}

fn default_empty_object() -> String {
    "q_empty".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_name: default_module_name(),
            runtime_crate: default_runtime_crate(),
            object_prefix: default_object_prefix(),
            base_suffix: default_base_suffix(),
            empty_object: default_empty_object(),
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with every field at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    ///
    /// An empty document yields the default configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, GenerateError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, GenerateError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GenerateError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Override the generated module name
    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    /// Check the values the generator splices into emitted code
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !is_rust_path(&self.module_name) || self.module_name.contains("::") {
            return Err(GenerateError::Config(format!(
                "module_name must be a plain identifier, got {:?}",
                self.module_name
            )));
        }
        if !is_rust_path(&self.runtime_crate) {
            return Err(GenerateError::Config(format!(
                "runtime_crate must be a Rust path, got {:?}",
                self.runtime_crate
            )));
        }
        if self.object_prefix.is_empty() {
            return Err(GenerateError::Config(
                "object_prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_rust_path(s: &str) -> bool {
    !s.is_empty()
        && s.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        })
}
