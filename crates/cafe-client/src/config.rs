//! # Client Configuration
//!
//! Configuration for the backend connection.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CAFE_BASE_URL=http://192.168.1.20:8080                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cafe-pos/client.toml (Linux)                             │
//! │     ~/Library/Application Support/com.cafe.pos/client.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, 10s connect, 30s request                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! base_url = "http://localhost:8080"
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "CAFE_BASE_URL";

/// Connection settings for the external cafe backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, without the `/api/gangbung` prefix.
    pub base_url: String,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Default config file location for this platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "cafe", "cafe-pos").map(|d| d.config_dir().join("client.toml"))
    }

    /// Loads configuration: file if present, then env overrides, then
    /// defaults for everything else.
    pub fn load() -> ClientResult<Self> {
        Self::load_with(
            Self::default_path().as_deref(),
            std::env::var(BASE_URL_ENV).ok(),
        )
    }

    /// Core of [`Self::load`] with the sources passed in, so the priority
    /// ordering is testable without touching process-global env state.
    fn load_with(path: Option<&Path>, env_base_url: Option<String>) -> ClientResult<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading client config");
                Self::load_from(path)?
            }
            _ => {
                debug!("No config file found, using defaults");
                ClientConfig::default()
            }
        };

        if let Some(url) = env_base_url {
            debug!(%url, "Base URL overridden from environment");
            config.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific TOML file.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        info!(path = %path.display(), "Saved client config");
        Ok(())
    }

    /// Checks that the base URL parses and uses http(s).
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::InvalidBaseUrl(format!(
                "unsupported scheme '{}', expected http or https",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = ClientConfig::default();

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate().unwrap_err(),
            ClientError::InvalidBaseUrl(_)
        ));
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");

        let mut config = ClientConfig::default();
        config.base_url = "http://192.168.1.20:9000".to_string();
        config.save_to(&path).unwrap();

        let loaded = ClientConfig::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, "http://192.168.1.20:9000");
        assert_eq!(loaded.request_timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "base_url = \"http://from-file:8080\"\n").unwrap();

        let loaded = ClientConfig::load_with(
            Some(&path),
            Some("http://from-env:9090".to_string()),
        )
        .unwrap();
        assert_eq!(loaded.base_url, "http://from-env:9090");

        // Without the override the file value stands
        let loaded = ClientConfig::load_with(Some(&path), None).unwrap();
        assert_eq!(loaded.base_url, "http://from-file:8080");
    }

    #[test]
    fn test_env_override_without_file() {
        let loaded =
            ClientConfig::load_with(None, Some("http://from-env:9090".to_string())).unwrap();
        assert_eq!(loaded.base_url, "http://from-env:9090");
        assert_eq!(loaded.connect_timeout_secs, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "base_url = \"http://cafe.local\"\n").unwrap();

        let loaded = ClientConfig::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, "http://cafe.local");
        assert_eq!(loaded.connect_timeout_secs, 10);
    }
}
