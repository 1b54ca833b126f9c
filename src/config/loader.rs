//! Configuration Loader
//!
//! Environment-aware configuration loading: YAML file discovery, environment
//! detection, and environment-overlay merging.

use super::error::{ConfigResult, ConfigurationError};
use super::EngineConfig;
use serde_yaml::Value as YamlValue;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, info, warn};

/// Loaded engine configuration together with where it came from
pub struct ConfigManager {
    config: EngineConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::load_and_merge_config(&config_directory, environment)?;

        config.validate()?;

        info!(
            environment = %environment,
            default_language = %config.execution.default_language,
            overrides_cache_enabled = config.overrides.cache_enabled,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the current environment
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Get the configuration directory
    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Create an emergency fallback configuration with safe defaults
    /// Used when configuration loading fails to prevent application crashes
    fn emergency_fallback() -> ConfigManager {
        warn!("Creating emergency fallback configuration with minimal safe defaults");

        ConfigManager {
            config: EngineConfig::default(),
            environment: Self::detect_environment(),
            config_directory: PathBuf::from("config"),
        }
    }

    /// Detect current environment from environment variables
    fn detect_environment() -> String {
        env::var("PROCFLOW_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    /// Get the default configuration directory
    fn default_config_directory() -> PathBuf {
        if let Ok(project_root) = Self::find_project_root() {
            return project_root.join("config");
        }

        // Fallback to candidate directories relative to the working directory
        let possible_dirs = vec![
            PathBuf::from("config"),
            PathBuf::from("../config"),
            PathBuf::from("../../config"),
        ];

        for dir in possible_dirs {
            let config_path = dir.join("procflow-config.yaml");
            if config_path.exists() {
                debug!("Found config directory: {}", dir.display());
                return dir;
            }
        }

        PathBuf::from("config")
    }

    /// Find project root by looking for characteristic files
    fn find_project_root() -> ConfigResult<PathBuf> {
        let mut current_dir = std::env::current_dir()
            .map_err(|e| ConfigurationError::file_read_error("current_dir", e))?;

        // Project markers to look for (in order of preference)
        let markers = ["Cargo.toml", ".git", "procflow-config.yaml", "README.md"];

        loop {
            for marker in &markers {
                let marker_path = current_dir.join(marker);
                if marker_path.exists() {
                    // For Cargo.toml, verify it's the right project
                    if marker == &"Cargo.toml" {
                        if let Ok(cargo_content) = std::fs::read_to_string(&marker_path) {
                            if cargo_content.contains("name = \"procflow-core\"")
                                || cargo_content.contains("procflow")
                            {
                                debug!(
                                    "Project root found via Cargo.toml: {}",
                                    current_dir.display()
                                );
                                return Ok(current_dir);
                            }
                        }
                    } else {
                        debug!(
                            "Project root found via {}: {}",
                            marker,
                            current_dir.display()
                        );
                        return Ok(current_dir);
                    }
                }
            }

            if let Some(parent) = current_dir.parent() {
                current_dir = parent.to_path_buf();
            } else {
                break;
            }
        }

        Err(ConfigurationError::config_file_not_found(vec![
            PathBuf::from("project root not found"),
        ]))
    }

    /// Find the configuration file
    fn find_config_file(config_directory: &Path) -> ConfigResult<PathBuf> {
        let possible_names = vec!["procflow-config.yaml", "procflow-config.yml"];
        let mut searched_paths = Vec::new();

        for name in possible_names {
            let config_path = config_directory.join(name);
            searched_paths.push(config_path.clone());

            if config_path.exists() {
                debug!("Found configuration file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        Err(ConfigurationError::config_file_not_found(searched_paths))
    }

    /// Safely read a configuration file with resource management and size limits
    fn read_config_file_safely(path: &Path) -> ConfigResult<String> {
        const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB limit

        let metadata = std::fs::metadata(path)
            .map_err(|e| ConfigurationError::file_read_error(path.display().to_string(), e))?;

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigurationError::invalid_value(
                "file_size",
                metadata.len().to_string(),
                format!(
                    "Configuration file too large ({}MB > {}MB limit)",
                    metadata.len() / (1024 * 1024),
                    MAX_CONFIG_FILE_SIZE / (1024 * 1024)
                ),
            ));
        }

        if !metadata.is_file() {
            return Err(ConfigurationError::invalid_value(
                "file_type",
                "directory or special file".to_string(),
                "Configuration path must point to a regular file",
            ));
        }

        std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::file_read_error(path.display().to_string(), e))
    }

    /// Load and merge configuration with environment-specific overrides
    fn load_and_merge_config(
        config_directory: &Path,
        environment: &str,
    ) -> ConfigResult<EngineConfig> {
        let config_file = Self::find_config_file(config_directory)?;

        let yaml_content = Self::read_config_file_safely(&config_file)?;

        // Parse YAML as a generic value for manipulation
        let mut yaml_data: YamlValue = serde_yaml::from_str(&yaml_content)
            .map_err(|e| ConfigurationError::invalid_yaml(config_file.display().to_string(), e))?;

        // Apply environment-specific overrides
        if let Some(env_overrides) = yaml_data
            .get(YamlValue::String(environment.to_string()))
            .cloned()
        {
            debug!(
                "Applying environment-specific overrides for: {}",
                environment
            );
            Self::merge_yaml_values(&mut yaml_data, env_overrides)?;
        }

        // Remove environment sections to avoid confusion
        if let YamlValue::Mapping(ref mut map) = yaml_data {
            map.remove(YamlValue::String("development".to_string()));
            map.remove(YamlValue::String("test".to_string()));
            map.remove(YamlValue::String("production".to_string()));
        }

        // Convert to our config struct
        let mut config: EngineConfig = serde_yaml::from_value(yaml_data).map_err(|e| {
            ConfigurationError::invalid_yaml(
                config_file.display().to_string(),
                format!("Failed to deserialize configuration: {e}"),
            )
        })?;

        // Ensure environment is set correctly
        config.execution.environment = environment.to_string();

        Ok(config)
    }

    /// Recursively merge YAML values (environment overrides into base config)
    fn merge_yaml_values(base: &mut YamlValue, override_value: YamlValue) -> ConfigResult<()> {
        match (&mut *base, override_value) {
            (YamlValue::Mapping(base_map), YamlValue::Mapping(override_map)) => {
                for (key, value) in override_map {
                    if let Some(existing_value) = base_map.get_mut(&key) {
                        Self::merge_yaml_values(existing_value, value)?;
                    } else {
                        base_map.insert(key, value);
                    }
                }
            }
            (base_ref, override_val) => {
                // For non-mapping values, override completely
                *base_ref = override_val;
            }
        }
        Ok(())
    }
}

/// Global configuration singleton for easy access throughout the application
static GLOBAL_CONFIG: OnceLock<Arc<ConfigManager>> = OnceLock::new();
static CONFIG_LOCK: Mutex<()> = Mutex::new(());

impl ConfigManager {
    /// Get or initialize the global configuration instance
    pub fn global() -> Arc<ConfigManager> {
        GLOBAL_CONFIG
            .get_or_init(|| {
                let _lock = CONFIG_LOCK.lock().unwrap();
                ConfigManager::load().unwrap_or_else(|e| {
                    eprintln!("Failed to load configuration: {e}");
                    eprintln!("Using emergency fallback configuration");
                    warn!("Configuration loading failed, using fallback: {e}");
                    Arc::new(ConfigManager::emergency_fallback())
                })
            })
            .clone()
    }

    /// Initialize global configuration with a specific directory (for testing)
    pub fn initialize_global(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let _lock = CONFIG_LOCK.lock().unwrap();

        let config_manager = ConfigManager::load_from_directory(config_dir)?;

        // This will only succeed once, but that's what we want for a singleton
        let _ = GLOBAL_CONFIG.set(config_manager.clone());

        Ok(config_manager)
    }
}
