// Alarm endpoints
//
// Security state, the people-count series, the alarm event feed, and the
// PIN-gated arm/disarm/deactivate commands.

use tracing::debug;

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::{ArmRequest, PinRequest};

impl HomeClient {
    /// Current alarm state and people count.
    ///
    /// `GET /api/alarm/state` → `{alarm_state, people_count}`
    pub async fn alarm_state(&self) -> Result<serde_json::Value, Error> {
        let url = self.api_url("alarm/state")?;
        self.get_json(url).await
    }

    /// People-count series over a time window (e.g. `"1m"`), oldest first.
    ///
    /// `GET /api/people/series?window={window}`
    pub async fn people_series(&self, window: &str) -> Result<serde_json::Value, Error> {
        let mut url = self.api_url("people/series")?;
        url.query_pairs_mut().append_pair("window", window);
        debug!(window, "fetching people series");
        self.get_json(url).await
    }

    /// Alarm event feed, newest first.
    ///
    /// `GET /api/alarm/events`
    pub async fn alarm_events(&self) -> Result<serde_json::Value, Error> {
        let url = self.api_url("alarm/events")?;
        self.get_json(url).await
    }

    /// Deactivate a sounding alarm.
    ///
    /// `POST /api/alarm/deactivate` with `{pin}` → `{success, message?}`
    pub async fn deactivate_alarm(&self, pin: &str) -> Result<serde_json::Value, Error> {
        let url = self.api_url("alarm/deactivate")?;
        debug!("deactivating alarm");
        self.post_json(url, &PinRequest { pin }).await
    }

    /// Arm (`armed = true`) or disarm the security system.
    ///
    /// `POST /api/alarm/arm` with `{pin, armed}` → `{success, message?}`
    pub async fn set_armed(&self, pin: &str, armed: bool) -> Result<serde_json::Value, Error> {
        let url = self.api_url("alarm/arm")?;
        debug!(armed, "changing arm state");
        self.post_json(url, &ArmRequest { pin, armed }).await
    }
}
