//! Configuration module
//!
//! Settings are read from a TOML file, by default
//! `<config dir>/powerme-booking/config.toml`. Every section and field is
//! optional; anything missing falls back to its default.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown time zone '{0}'")]
    InvalidTimeZone(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("powerme-booking")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Storage backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbDriver {
    #[default]
    Sqlite,
    /// Volatile in-process store, for demos and tests
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseSection {
    pub driver: DbDriver,
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            driver: DbDriver::Sqlite,
            url: "sqlite://./powerme.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BookingConfig {
    /// IANA zone in which slot indices are interpreted
    pub time_zone: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            time_zone: "Europe/Paris".to_string(),
        }
    }
}

impl BookingConfig {
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimeZone(self.time_zone.clone()))
    }
}

impl AppConfig {
    /// Read and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.booking.tz()?;

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        if self.server.shutdown_timeout == 0 {
            return Err(ConfigError::Invalid(
                "server.shutdown_timeout must be at least 1 second".into(),
            ));
        }
        if self.database.driver == DbDriver::Sqlite && self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url is required for sqlite".into()));
        }
        match self.logging.format.to_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.booking.tz().unwrap(), chrono_tz::Europe::Paris);
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [database]
            driver = "memory"

            [booking]
            time_zone = "America/New_York"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.database.driver, DbDriver::Memory);
        assert_eq!(cfg.booking.tz().unwrap(), chrono_tz::America::New_York);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn unknown_time_zone_is_rejected() {
        let err = AppConfig::from_toml("[booking]\ntime_zone = \"Mars/Olympus\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeZone(ref tz) if tz == "Mars/Olympus"));
    }

    #[test]
    fn bad_log_format_is_rejected() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nport = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        assert!(default_config_path().ends_with("powerme-booking/config.toml"));
    }
}
