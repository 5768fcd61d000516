//! Configuration management.
//!
//! Settings come from an optional TOML file (`cumponidori.toml` next to the
//! working directory by default) with environment variable overrides on top.
//! Every section has working defaults so the binary runs with no config at
//! all.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::portal::PortalConfig;

/// Default config file name, discovered in the working directory.
pub const CONFIG_FILE_NAME: &str = "cumponidori.toml";

/// Top-level settings tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub portal: PortalConfig,
    pub harvest: HarvestSettings,
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address, `host:port`.
    pub bind: String,
    /// CORS allow-list. `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3001".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

/// Bulk-harvest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSettings {
    /// Directory harvested documents are written into.
    pub output_dir: PathBuf,
    /// Delay between document downloads, in milliseconds.
    pub download_delay_ms: u64,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("documents"),
            download_delay_ms: 1000,
        }
    }
}

impl Settings {
    /// Load settings from an explicit file, the default file if present, or
    /// defaults. Environment overrides are applied last.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = match config_path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
                toml::from_str(&raw)
                    .map_err(|e| anyhow::anyhow!("cannot parse {}: {}", path.display(), e))?
            }
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    let raw = fs::read_to_string(default_path)?;
                    toml::from_str(&raw)?
                } else {
                    Self::default()
                }
            }
        };

        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Override selected settings from the environment.
    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = env::var("CUMPONIDORI_BIND") {
            self.server.bind = bind;
        }
        if let Ok(base_url) = env::var("CUMPONIDORI_BASE_URL") {
            self.portal.base_url = base_url;
        }
        if let Ok(origins) = env::var("CUMPONIDORI_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.bind, "127.0.0.1:3001");
        assert_eq!(settings.harvest.download_delay_ms, 1000);
        assert_eq!(settings.portal.request_delay_ms, 1000);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cumponidori.toml");
        std::fs::write(
            &path,
            "[server]\nbind = \"0.0.0.0:8080\"\n\n[portal]\nrequest_delay_ms = 0\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.server.bind, "0.0.0.0:8080");
        assert_eq!(settings.portal.request_delay_ms, 0);
        // untouched sections keep their defaults
        assert_eq!(settings.harvest.download_delay_ms, 1000);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = Settings::load(Some(Path::new("/nonexistent/cumponidori.toml"))).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
