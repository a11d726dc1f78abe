/*!
 * Configuration types for berth
 */

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::address;
use crate::error::{BootstrapError, Result};

/// Main configuration for the connection bootstrap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Server port assumed for bare host addresses
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Reachability probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Delay before handing off after automatic discovery, in milliseconds.
    /// Gives the user a moment to read the success message; not a retry.
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,

    /// Address cache file path (None = ~/.berth/cache.json)
    #[serde(default)]
    pub cache_file: Option<PathBuf>,

    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stdout)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,
}

fn default_server_port() -> u16 {
    address::DEFAULT_PORT
}

fn default_probe_timeout() -> u64 {
    10
}

fn default_redirect_delay() -> u64 {
    1500
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            server_port: default_server_port(),
            probe_timeout_secs: default_probe_timeout(),
            redirect_delay_ms: default_redirect_delay(),
            cache_file: None,
            log_level: LogLevel::Info,
            log_file: None,
            verbose: false,
        }
    }
}

impl BootstrapConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: BootstrapConfig = toml::from_str(&contents)
            .map_err(|e| BootstrapError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| BootstrapError::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration file path (~/.berth/berth.toml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BootstrapError::Config("could not determine home directory".to_string()))?;
        Ok(home.join(".berth").join("berth.toml"))
    }
}

/// Logging verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BootstrapConfig::default();
        assert_eq!(config.server_port, 8096);
        assert_eq!(config.probe_timeout_secs, 10);
        assert_eq!(config.redirect_delay_ms, 1500);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.cache_file.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("berth.toml");

        let config = BootstrapConfig {
            server_port: 8920,
            redirect_delay_ms: 500,
            verbose: true,
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        let loaded = BootstrapConfig::from_file(&path).unwrap();
        assert_eq!(loaded.server_port, 8920);
        assert_eq!(loaded.redirect_delay_ms, 500);
        assert!(loaded.verbose);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("berth.toml");
        std::fs::write(&path, "server_port = 9000\n").unwrap();

        let config = BootstrapConfig::from_file(&path).unwrap();
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.probe_timeout_secs, 10);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("berth.toml");
        std::fs::write(&path, "server_port = \"not a port\"").unwrap();

        let result = BootstrapConfig::from_file(&path);
        assert!(matches!(result, Err(BootstrapError::Config(_))));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
