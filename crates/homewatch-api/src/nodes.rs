// Node endpoints
//
// Per-node state snapshots plus the kitchen and bedroom configuration
// commands.

use tracing::debug;

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::{ColorRequest, LcdRequest, Node, TimerConfigRequest};

impl HomeClient {
    /// Latest field values reported by a node.
    ///
    /// `GET /api/{node}/state`
    pub async fn node_state(&self, node: Node) -> Result<serde_json::Value, Error> {
        let url = self.api_url(&format!("{}/state", node.path_segment()))?;
        self.get_json(url).await
    }

    /// Configure the kitchen stopwatch.
    ///
    /// `POST /api/PI2/timer-config` → `{success, message?}`
    pub async fn set_timer_config(
        &self,
        config: TimerConfigRequest,
    ) -> Result<serde_json::Value, Error> {
        let url = self.api_url("PI2/timer-config")?;
        debug!(
            initial_seconds = config.initial_seconds,
            btn_increment = config.btn_increment,
            "sending timer config"
        );
        self.post_json(url, &config).await
    }

    /// Set the bedroom RGB LED color. Transport-level ack only.
    ///
    /// `POST /api/PI3/rgb` with `{color}`
    pub async fn set_rgb_color(&self, color: &str) -> Result<(), Error> {
        let url = self.api_url("PI3/rgb")?;
        debug!(color, "setting RGB color");
        self.post_ack(url, &ColorRequest { color }).await
    }

    /// Show a message on the bedroom LCD.
    ///
    /// `POST /api/PI3/lcd` with `{text}` → `{success, message?}`
    pub async fn set_lcd_message(&self, text: &str) -> Result<serde_json::Value, Error> {
        let url = self.api_url("PI3/lcd")?;
        debug!("sending LCD message");
        self.post_json(url, &LcdRequest { text }).await
    }
}
