// ── Runtime client configuration ──
//
// Describes which backend to talk to and how often to poll it. Never
// touches disk: `homewatch-config` (or a test) builds one and hands it in.

use std::time::Duration;

use homewatch_api::{TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;
use crate::panel::PanelId;

pub const DEFAULT_URL: &str = "http://localhost:5001";
pub const DEFAULT_ALARM_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_NODE_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_SERIES_WINDOW: &str = "1m";
/// Upper bound for every bounded table; `table_rows` may only lower it.
pub const MAX_TABLE_ROWS: usize = 50;
pub const DEFAULT_TABLE_ROWS: usize = MAX_TABLE_ROWS;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://192.168.1.10:5001`.
    pub url: Url,
    pub tls: TlsMode,
    /// Per-request deadline.
    pub timeout: Duration,
    /// Cadence of the alarm state, people series and event feeds.
    pub alarm_interval: Duration,
    /// Cadence of the per-node panels.
    pub node_interval: Duration,
    /// `window` query for the people series, e.g. `1m`.
    pub series_window: String,
    /// The entry node's poller only runs when this is set.
    pub entry_enabled: bool,
    /// Row cap for every bounded table, at most [`MAX_TABLE_ROWS`].
    pub table_rows: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default URL is valid"),
            tls: TlsMode::System,
            timeout: TransportConfig::default().timeout,
            alarm_interval: DEFAULT_ALARM_INTERVAL,
            node_interval: DEFAULT_NODE_INTERVAL,
            series_window: DEFAULT_SERIES_WINDOW.to_owned(),
            entry_enabled: false,
            table_rows: DEFAULT_TABLE_ROWS,
        }
    }
}

impl ClientConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }

    pub fn interval_for(&self, panel: PanelId) -> Duration {
        if panel.is_alarm_feed() {
            self.alarm_interval
        } else {
            self.node_interval
        }
    }

    pub fn panel_enabled(&self, panel: PanelId) -> bool {
        panel != PanelId::Entry || self.entry_enabled
    }

    /// Reject settings that would make the pollers misbehave.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.alarm_interval.is_zero() || self.node_interval.is_zero() {
            return Err(CoreError::Config {
                message: "poll intervals must be greater than zero".into(),
            });
        }
        if !(1..=MAX_TABLE_ROWS).contains(&self.table_rows) {
            return Err(CoreError::Config {
                message: format!("table_rows must be between 1 and {MAX_TABLE_ROWS}"),
            });
        }
        if self.series_window.trim().is_empty() {
            return Err(CoreError::Config {
                message: "series_window must not be empty".into(),
            });
        }
        if !matches!(self.url.scheme(), "http" | "https") {
            return Err(CoreError::Config {
                message: format!("unsupported URL scheme '{}'", self.url.scheme()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_cadence() {
        let config = ClientConfig::default();
        assert_eq!(config.interval_for(PanelId::AlarmEvents), Duration::from_secs(5));
        assert_eq!(config.interval_for(PanelId::Kitchen), Duration::from_secs(3));
        assert_eq!(config.table_rows, 50);
        assert!(!config.panel_enabled(PanelId::Entry));
        assert!(config.panel_enabled(PanelId::Bedroom));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = ClientConfig {
            node_interval: Duration::ZERO,
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config { .. })));
    }

    #[test]
    fn table_rows_cannot_exceed_fifty() {
        for rows in [0, 51, 200] {
            let config = ClientConfig {
                table_rows: rows,
                ..ClientConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(CoreError::Config { .. })),
                "table_rows = {rows} accepted"
            );
        }
        let config = ClientConfig {
            table_rows: 10,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
