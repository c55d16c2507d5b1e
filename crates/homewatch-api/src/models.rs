// Wire-level request bodies and node addressing.
//
// Response bodies are handed back as `serde_json::Value`; only the request
// side is typed here.

use serde::Serialize;

/// A physical node exposing its own state endpoint (`/api/{node}/state`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    /// Entry unit (door sensors, door light and buzzer).
    Pi1,
    /// Kitchen unit (4-digit display, kitchen sensors, gyroscope).
    Pi2,
    /// Bedroom unit (climate, RGB LED, LCD, IR receiver).
    Pi3,
}

impl Node {
    /// Path segment used by the backend routes.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Pi1 => "PI1",
            Self::Pi2 => "PI2",
            Self::Pi3 => "PI3",
        }
    }
}

/// `{pin}` body for alarm deactivation.
#[derive(Debug, Serialize)]
pub struct PinRequest<'a> {
    pub pin: &'a str,
}

/// `{pin, armed}` body for arming and disarming.
#[derive(Debug, Serialize)]
pub struct ArmRequest<'a> {
    pub pin: &'a str,
    pub armed: bool,
}

/// Kitchen stopwatch configuration.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimerConfigRequest {
    pub initial_seconds: u32,
    pub btn_increment: u32,
}

/// RGB LED color selection.
#[derive(Debug, Serialize)]
pub struct ColorRequest<'a> {
    pub color: &'a str,
}

/// Text for the bedroom LCD.
#[derive(Debug, Serialize)]
pub struct LcdRequest<'a> {
    pub text: &'a str,
}

/// Door light toggle.
#[derive(Debug, Serialize)]
pub struct LightRequest<'a> {
    pub action: &'a str,
}

/// Door buzzer pattern.
#[derive(Debug, Serialize)]
pub struct BuzzerRequest<'a> {
    pub action: &'a str,
    pub times: u32,
    pub duration: f64,
}
