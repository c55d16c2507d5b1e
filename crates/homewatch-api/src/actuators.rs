// Actuator endpoints (door light, door buzzer). Both are transport-ack only.

use tracing::debug;

use crate::client::HomeClient;
use crate::error::Error;
use crate::models::{BuzzerRequest, LightRequest};

impl HomeClient {
    /// `POST /api/actuator/light` with `{action}` (`"on"` / `"off"`).
    pub async fn light(&self, action: &str) -> Result<(), Error> {
        let url = self.api_url("actuator/light")?;
        debug!(action, "door light");
        self.post_ack(url, &LightRequest { action }).await
    }

    /// `POST /api/actuator/buzzer` with `{action, times, duration}`.
    pub async fn buzzer(&self, action: &str, times: u32, duration: f64) -> Result<(), Error> {
        let url = self.api_url("actuator/buzzer")?;
        debug!(action, times, duration, "door buzzer");
        self.post_ack(
            url,
            &BuzzerRequest {
                action,
                times,
                duration,
            },
        )
        .await
    }
}
