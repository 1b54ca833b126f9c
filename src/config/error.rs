//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Errors raised while locating, parsing, or validating engine configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// No configuration file found in any of the searched locations
    #[error("Configuration file not found; searched: {searched_paths:?}")]
    ConfigFileNotFound { searched_paths: Vec<PathBuf> },

    /// Configuration file exists but is not valid YAML
    #[error("Invalid YAML in {file_path}: {error}")]
    InvalidYaml { file_path: String, error: String },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {file_path}: {error}")]
    FileReadError { file_path: String, error: String },

    /// A configuration value failed validation
    #[error("Invalid value for {field}: {value} ({context})")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },

    /// A required field is absent
    #[error("Missing required configuration field: {field}")]
    MissingRequiredField { field: String },
}

impl ConfigurationError {
    pub fn config_file_not_found(searched_paths: Vec<PathBuf>) -> Self {
        Self::ConfigFileNotFound { searched_paths }
    }

    pub fn invalid_yaml(file_path: impl Into<String>, error: impl ToString) -> Self {
        Self::InvalidYaml {
            file_path: file_path.into(),
            error: error.to_string(),
        }
    }

    pub fn file_read_error(file_path: impl Into<String>, error: impl ToString) -> Self {
        Self::FileReadError {
            file_path: file_path.into(),
            error: error.to_string(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.into(),
        }
    }

    pub fn missing_required_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }
}
