//! Per-run settings

use crate::{GenerationError, GenerationResult, LogLevel, ShapeId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Service to generate for
    pub service: ShapeId,

    /// Python package name
    ///
    /// Generated namespaces are `<module>.models`, `<module>.errors` and
    /// `<module>.client`.
    pub module_name: String,

    /// Version of the generated package
    #[serde(default = "default_module_version")]
    pub module_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_description: Option<String>,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Extra reserved words merged into the built-in tables
    #[serde(default)]
    pub reserved_words: ReservedWordSettings,
}

/// User-supplied reserved words, by naming role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedWordSettings {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

fn default_module_version() -> String {
    "0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Create settings with defaults for everything but the service and module
    pub fn new(service: ShapeId, module_name: impl Into<String>) -> Self {
        Self {
            service,
            module_name: module_name.into(),
            module_version: default_module_version(),
            module_description: None,
            log_level: default_log_level(),
            reserved_words: ReservedWordSettings::default(),
        }
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> GenerationResult<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from JSON bytes
    pub fn from_json(bytes: &[u8]) -> GenerationResult<Self> {
        let settings: Settings = serde_json::from_slice(bytes)
            .map_err(|e| GenerationError::ConfigError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a `.toml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> GenerationResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Self::from_toml(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json(&std::fs::read(path)?),
            _ => Err(GenerationError::ConfigError(format!(
                "unsupported settings file: {}",
                path.display()
            ))),
        }
    }

    /// Check the module name and log level
    pub fn validate(&self) -> GenerationResult<()> {
        let module_ok = !self.module_name.is_empty()
            && self.module_name.split('.').all(is_python_identifier);
        if !module_ok {
            return Err(GenerationError::ConfigError(format!(
                "module name is not a dotted Python identifier: {:?}",
                self.module_name
            )));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> GenerationResult<LogLevel> {
        self.log_level.parse()
    }
}

fn is_python_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
