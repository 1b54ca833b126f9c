//! # Engine Configuration System
//!
//! YAML-based configuration for the procflow engine core. Configuration is
//! loaded from explicit files with environment-specific overrides; there are
//! no silent fallbacks once a file is present.
//!
//! ## Architecture
//!
//! - **Single Source of Truth**: all configuration comes from YAML files
//! - **Environment Awareness**: development/test/production overlay sections
//! - **Explicit Validation**: a loaded configuration is validated before use
//!
//! ## Usage
//!
//! ```rust,no_run
//! use procflow_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration (environment auto-detected)
//! let config = ConfigManager::load()?;
//!
//! // Access configuration values
//! let default_language = &config.config().execution.default_language;
//! let overrides_on = config.config().overrides.cache_enabled;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

use crate::constants::{languages, system};

/// Root configuration structure mirroring procflow-config.yaml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Scripted-step execution settings
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Runtime script override behavior
    #[serde(default)]
    pub overrides: OverridesConfig,

    /// Telemetry and monitoring settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Scripted-step execution settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExecutionConfig {
    /// Environment name the engine is running in
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Language applied when a step definition carries an empty language tag
    #[serde(default = "default_language")]
    pub default_language: String,
}

/// Runtime script override behavior
///
/// `cache_enabled` is the engine-wide switch for the dynamic-definition
/// feature; executors consult the override store only while it is on. Off by
/// default so deployments opt in explicitly.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OverridesConfig {
    #[serde(default)]
    pub cache_enabled: bool,
}

/// Telemetry and monitoring settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_language() -> String {
    languages::DEFAULT_LANGUAGE.to_string()
}

fn default_service_name() -> String {
    format!("procflow-core-{}", system::PROCFLOW_CORE_VERSION)
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            default_language: default_language(),
        }
    }
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self {
            cache_enabled: false,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: default_service_name(),
        }
    }
}

impl Default for EngineConfig {
    /// Create a safe fallback configuration with minimal defaults
    /// Used when configuration loading fails completely
    fn default() -> Self {
        Self {
            execution: ExecutionConfig::default(),
            overrides: OverridesConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.execution.environment.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "execution.environment",
            ));
        }

        if self.execution.default_language.is_empty() {
            return Err(ConfigurationError::invalid_value(
                "execution.default_language",
                "",
                "a default script language is required",
            ));
        }

        if self.telemetry.enabled && self.telemetry.service_name.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "telemetry.service_name",
            ));
        }

        Ok(())
    }

    /// Check if the engine runs in a production environment
    pub fn is_production(&self) -> bool {
        self.execution.environment == "production"
    }
}
