//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Entry store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store backend: "sheet" or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Spreadsheet document id holding the mood log
    #[serde(default)]
    pub spreadsheet_id: String,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Bearer token for the spreadsheet service
    #[serde(default)]
    pub api_token: String,

    #[serde(default = "default_store_timeout")]
    pub request_timeout_ms: u64,
}

fn default_backend() -> String {
    "sheet".to_string()
}

fn default_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_sheet_name() -> String {
    "mood_of_the_queue".to_string()
}

fn default_store_timeout() -> u64 {
    10_000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            base_url: default_base_url(),
            spreadsheet_id: String::new(),
            sheet_name: default_sheet_name(),
            api_token: String::new(),
            request_timeout_ms: default_store_timeout(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("moodline").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Store overrides
        if let Ok(url) = std::env::var("MOODLINE_SHEET_URL") {
            self.store.base_url = url;
        }
        if let Ok(id) = std::env::var("MOODLINE_SHEET_ID") {
            self.store.spreadsheet_id = id;
        }
        if let Ok(name) = std::env::var("MOODLINE_SHEET_NAME") {
            self.store.sheet_name = name;
        }
        if let Ok(token) = std::env::var("MOODLINE_SHEET_TOKEN") {
            self.store.api_token = token;
        }

        // API overrides
        if let Ok(host) = std::env::var("MOODLINE_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("MOODLINE_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("MOODLINE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MOODLINE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Moodline Configuration
#
# Environment variables override these settings:
# - MOODLINE_SHEET_URL
# - MOODLINE_SHEET_ID
# - MOODLINE_SHEET_NAME
# - MOODLINE_SHEET_TOKEN
# - MOODLINE_HOST
# - MOODLINE_PORT
# - MOODLINE_LOG_LEVEL
# - MOODLINE_LOG_FORMAT

[store]
# Store backend: "sheet" (hosted spreadsheet) or "memory" (in-process, volatile)
backend = "sheet"

# Base URL of the spreadsheet service
base_url = "https://sheets.googleapis.com"

# Spreadsheet document id holding the mood log
spreadsheet_id = ""

# Worksheet (tab) name
sheet_name = "mood_of_the_queue"

# Bearer token for the service account
api_token = ""

# Request timeout in milliseconds
request_timeout_ms = 10000

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8083

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.backend, "sheet");
        assert_eq!(config.store.sheet_name, "mood_of_the_queue");
        assert_eq!(config.api.port, 8083);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[store]\nspreadsheet_id = \"abc123\"\n\n[api]\nport = 9000\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.store.spreadsheet_id, "abc123");
        assert_eq!(config.store.backend, "sheet");
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not toml at all [").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_generated_default_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.store.backend, "sheet");
    }
}
