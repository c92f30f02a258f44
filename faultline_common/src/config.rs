//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! across Faultline applications, including the fault catalog that seeds a
//! [`FaultRegistry`](crate::registry::FaultRegistry).
//!
//! # Usage
//!
//! ```rust,no_run
//! use faultline_common::config::{ConfigError, FaultCatalogConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let catalog = FaultCatalogConfig::load_validated(Path::new("faults.toml"))?;
//!     println!("Service: {}", catalog.shared.service_name);
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::FaultCategory;
use crate::consts::DEFAULT_SERVICE_NAME;

/// Error type for configuration loading operations.
///
/// This enum represents all possible errors that can occur when loading
/// configuration files.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Represents the verbosity level of logging output.
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

/// Common configuration fields shared across all Faultline applications.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "demo"
/// json_logs = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            json_logs: false,
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One `[[kinds]]` entry of a fault catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindEntry {
    /// Unique kind name.
    pub name: String,
    /// `fatal`, `checked` or `unchecked` (Throwable class names also accepted).
    pub category: FaultCategory,
    #[serde(default)]
    pub description: String,
}

/// Fault catalog: the list of kinds a registry is seeded with.
///
/// # TOML Example
///
/// ```toml
/// include_standard = true
///
/// [shared]
/// service_name = "demo"
///
/// [[kinds]]
/// name = "StackOverflow"
/// category = "fatal"
/// description = "recursion without a base case"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultCatalogConfig {
    #[serde(default)]
    pub shared: SharedConfig,

    /// Seed OutOfMemory, FileNotFound and IndexOutOfRange before `kinds`.
    #[serde(default = "default_include_standard")]
    pub include_standard: bool,

    /// Additional kinds.
    #[serde(default)]
    pub kinds: Vec<KindEntry>,
}

fn default_include_standard() -> bool {
    true
}

impl Default for FaultCatalogConfig {
    fn default() -> Self {
        Self {
            shared: SharedConfig::default(),
            include_standard: default_include_standard(),
            kinds: Vec::new(),
        }
    }
}

impl FaultCatalogConfig {
    /// Parse a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load a catalog from a file and validate it.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - the shared section is invalid
    /// - a kind name is empty
    /// - two entries share a name
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        let mut seen = HashSet::new();
        for (idx, entry) in self.kinds.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "kinds[{idx}]: name cannot be empty"
                )));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "kinds[{idx}]: duplicate kind name '{}'",
                    entry.name
                )));
            }
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
