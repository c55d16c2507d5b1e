//! Shared configuration for the homewatch CLI and TUI.
//!
//! Layers, lowest first: built-in defaults, the TOML file at
//! [`config_path`], then `HOMEWATCH_`-prefixed environment variables with
//! `__` between section and key (`HOMEWATCH_BACKEND__URL`,
//! `HOMEWATCH_PANELS__ENTRY_ENABLED`). The result is validated into a
//! [`homewatch_core::ClientConfig`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use homewatch_api::TlsMode;
use homewatch_core::{ClientConfig, config as defaults};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub polling: Polling,
    #[serde(default)]
    pub panels: Panels,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Backend {
    /// Base URL of the monitoring server.
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// PEM bundle to trust in addition to the system store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Polling {
    #[serde(default = "default_alarm_interval")]
    pub alarm_interval_secs: u64,

    #[serde(default = "default_node_interval")]
    pub node_interval_secs: u64,

    #[serde(default = "default_series_window")]
    pub series_window: String,
}

impl Default for Polling {
    fn default() -> Self {
        Self {
            alarm_interval_secs: default_alarm_interval(),
            node_interval_secs: default_node_interval(),
            series_window: default_series_window(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Panels {
    /// Poll the entry node. Off until that node's firmware reports state.
    #[serde(default)]
    pub entry_enabled: bool,

    /// Rows per bounded table, 1 to 50.
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            entry_enabled: false,
            table_rows: default_table_rows(),
        }
    }
}

fn default_url() -> String {
    defaults::DEFAULT_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_alarm_interval() -> u64 {
    defaults::DEFAULT_ALARM_INTERVAL.as_secs()
}
fn default_node_interval() -> u64 {
    defaults::DEFAULT_NODE_INTERVAL.as_secs()
}
fn default_series_window() -> String {
    defaults::DEFAULT_SERIES_WINDOW.into()
}
fn default_table_rows() -> usize {
    defaults::DEFAULT_TABLE_ROWS
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "homewatch", "homewatch").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("homewatch");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` plus environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HOMEWATCH_").split("__"));

    Ok(figment.extract()?)
}

// ── Config saving ───────────────────────────────────────────────────

/// Write `cfg` as TOML to `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Validate and convert into the runtime config. `url_override` (from a
    /// `--url` flag) wins over the file.
    pub fn to_client_config(&self, url_override: Option<&str>) -> Result<ClientConfig, ConfigError> {
        let raw_url = url_override.unwrap_or(&self.backend.url);
        let url: url::Url = raw_url.parse().map_err(|e| ConfigError::Validation {
            field: "backend.url".into(),
            reason: format!("'{raw_url}': {e}"),
        })?;

        let tls = if self.backend.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca) = self.backend.ca_cert {
            TlsMode::CustomCa(ca.clone())
        } else {
            TlsMode::System
        };

        let config = ClientConfig {
            url,
            tls,
            timeout: Duration::from_secs(self.backend.timeout_secs),
            alarm_interval: Duration::from_secs(self.polling.alarm_interval_secs),
            node_interval: Duration::from_secs(self.polling.node_interval_secs),
            series_window: self.polling.series_window.clone(),
            entry_enabled: self.panels.entry_enabled,
            table_rows: self.panels.table_rows,
        };
        config.validate().map_err(|e| ConfigError::Validation {
            field: "config".into(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.polling.alarm_interval_secs, 5);
        assert_eq!(cfg.polling.node_interval_secs, 3);
        assert_eq!(cfg.polling.series_window, "1m");
        assert!(!cfg.panels.entry_enabled);
        assert_eq!(cfg.panels.table_rows, 50);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nurl = \"http://hub.local:5001\"\n\n[panels]\nentry_enabled = true\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.backend.url, "http://hub.local:5001");
        assert!(cfg.panels.entry_enabled);
        assert_eq!(cfg.backend.timeout_secs, 30);

        let client = cfg.to_client_config(None).unwrap();
        assert_eq!(client.url.as_str(), "http://hub.local:5001/");
        assert!(client.entry_enabled);
    }

    #[test]
    fn url_override_wins() {
        let client = Config::default()
            .to_client_config(Some("http://10.0.0.2:5001"))
            .unwrap();
        assert_eq!(client.url.host_str(), Some("10.0.0.2"));
    }

    #[test]
    fn bad_values_fail_validation() {
        let err = Config::default().to_client_config(Some("not a url")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "backend.url"));

        let mut cfg = Config::default();
        cfg.polling.node_interval_secs = 0;
        assert!(cfg.to_client_config(None).is_err());
    }

    #[test]
    fn table_rows_above_fifty_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[panels]\ntable_rows = 200\n").unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.panels.table_rows, 200);
        assert!(cfg.to_client_config(None).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.backend.insecure = true;
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert!(matches!(
            loaded.to_client_config(None).unwrap().tls,
            TlsMode::DangerAcceptInvalid
        ));
    }
}
