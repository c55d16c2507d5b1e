// ── Outbound requests ──
//
// `Command` is fire-and-forget actuator control. `AuthenticatedAction` is
// raw user input for a form; the submitter validates it into a
// `SubmitRequest` before anything touches the network.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// On/off switch for the door actuators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    On,
    Off,
}

/// Door buzzer mode. `Beep` honours `times` and `duration`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BuzzerAction {
    On,
    Off,
    Beep,
}

/// Bedroom RGB LED palette, as named by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum LedColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Lightblue,
    White,
    Off,
}

/// Actuator command. Only the transport outcome matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Light(Switch),
    Buzzer {
        action: BuzzerAction,
        times: u32,
        /// Seconds per beep.
        duration: f64,
    },
    SetColor(LedColor),
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Light(_) => "light",
            Self::Buzzer { .. } => "buzzer",
            Self::SetColor(_) => "set_color",
        }
    }
}

/// Form input for a backend-confirmed action, untrimmed and unvalidated.
#[derive(Debug)]
pub enum AuthenticatedAction {
    Deactivate { pin: SecretString },
    Arm { pin: SecretString },
    Disarm { pin: SecretString },
    TimerConfig {
        initial_seconds: String,
        btn_increment: String,
    },
    LcdMessage { text: String },
}

/// A validated action, ready to POST.
#[derive(Debug)]
pub enum SubmitRequest {
    Deactivate { pin: SecretString },
    SetArmed { pin: SecretString, armed: bool },
    TimerConfig {
        initial_seconds: u32,
        btn_increment: u32,
    },
    LcdMessage { text: String },
}

/// Backend verdict on a submitted action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResult {
    pub success: bool,
    /// Backend explanation; `None` when missing or empty.
    pub message: Option<String>,
}
