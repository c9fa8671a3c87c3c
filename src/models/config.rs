//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_DISCOVER_URL: &str = "http://ipv4-api.hdhomerun.com/discover";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MKVMERGE: &str = "mkvmerge";
const DEFAULT_RECORDING_EXTENSION: &str = "mpg";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device discovery configuration.
    pub device: DeviceConfig,
    /// Remux tool configuration.
    pub mkvmerge: MkvmergeConfig,
    /// Recording directory scan configuration.
    pub scan: ScanConfig,
}

/// Device discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Discover endpoint returning the device list.
    pub discover_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

/// Remux tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MkvmergeConfig {
    /// Binary name or path.
    pub binary: String,
    /// Pass `--quiet`.
    pub quiet: bool,
}

/// Scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extension of raw recordings, without the dot.
    pub extension: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            discover_url: DEFAULT_DISCOVER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for MkvmergeConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_MKVMERGE.to_string(),
            quiet: true,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_RECORDING_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Apply environment variable overrides.
    ///
    /// - `DVR_DISCOVER_URL`: discover endpoint
    /// - `DVR_HTTP_TIMEOUT`: request timeout in seconds
    /// - `MKVMERGE_BIN`: remux tool binary
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var("DVR_DISCOVER_URL") {
            self.device.discover_url = url;
        }
        if let Some(timeout) = std::env::var("DVR_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.device.timeout = timeout;
        }
        if let Ok(bin) = std::env::var("MKVMERGE_BIN") {
            self.mkvmerge.binary = bin;
        }
        self
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dvr_archiver")
}

/// Load configuration from file, then apply environment overrides.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    let config = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring invalid config {}: {}", config_path.display(), e);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    } else {
        Config::default()
    };

    config.apply_env()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [mkvmerge]
            binary = "/opt/mkvtoolnix/mkvmerge"
            "#,
        )
        .unwrap();

        assert_eq!(config.mkvmerge.binary, "/opt/mkvtoolnix/mkvmerge");
        assert!(config.mkvmerge.quiet);
        assert_eq!(config.device.discover_url, DEFAULT_DISCOVER_URL);
        assert_eq!(config.scan.extension, "mpg");
    }
}
