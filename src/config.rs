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
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Source files for the two record sets
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_daily_path")]
    pub daily_path: PathBuf,

    #[serde(default = "default_hourly_path")]
    pub hourly_path: PathBuf,
}

fn default_daily_path() -> PathBuf {
    PathBuf::from("day_df.csv")
}

fn default_hourly_path() -> PathBuf {
    PathBuf::from("hour_df.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            daily_path: default_daily_path(),
            hourly_path: default_hourly_path(),
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

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<PathBuf>,
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
            file: None,
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

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
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
            dirs::config_dir().map(|p| p.join("bikeshare").join("config.toml")),
            Some(PathBuf::from("./bikeshare.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment, test maps)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Data overrides
        if let Some(path) = lookup("BIKESHARE_DAILY_PATH") {
            self.data.daily_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("BIKESHARE_HOURLY_PATH") {
            self.data.hourly_path = PathBuf::from(path);
        }

        // API overrides
        if let Some(host) = lookup("BIKESHARE_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("BIKESHARE_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid BIKESHARE_API_PORT: {}", port),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("BIKESHARE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BIKESHARE_LOG_FORMAT") {
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Bike-Sharing Insights Configuration
#
# Environment variables override these settings:
# - BIKESHARE_DAILY_PATH
# - BIKESHARE_HOURLY_PATH
# - BIKESHARE_API_HOST
# - BIKESHARE_API_PORT
# - BIKESHARE_LOG_LEVEL
# - BIKESHARE_LOG_FORMAT

[data]
# Daily aggregates (one row per day)
daily_path = "day_df.csv"

# Hourly aggregates (one row per day and hour)
hourly_path = "hour_df.csv"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8501

# Allowed CORS origins (empty = any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/bikeshare/bikeshare.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = Config::from_toml(&generate_default_config()).unwrap();
        assert_eq!(config.data.daily_path, PathBuf::from("day_df.csv"));
        assert_eq!(config.data.hourly_path, PathBuf::from("hour_df.csv"));
        assert_eq!(config.api.port, 8501);
        assert!(config.api.cors_origins.is_empty());
        assert_eq!(config.logging.format, "pretty");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api.addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[api\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\ndaily_path = \"/srv/day.csv\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data.daily_path, PathBuf::from("/srv/day.csv"));

        let err = Config::load(Path::new("/nonexistent/bikeshare.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BIKESHARE_HOURLY_PATH", "/data/hour.csv"),
            ("BIKESHARE_API_PORT", "8080"),
            ("BIKESHARE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data.hourly_path, PathBuf::from("/data/hour.csv"));
        assert_eq!(config.data.daily_path, PathBuf::from("day_df.csv"));
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "BIKESHARE_API_PORT").then(|| "http".to_string()));
        assert_eq!(config.api.port, 8501);
    }
}
