//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use homewatch_core::{ActionKind, AuthenticatedAction, Command, PanelView, SubmitOutcome};
use secrecy::SecretString;

use crate::screen::ScreenId;

/// Raw form input for a backend-confirmed action.
///
/// Kept as plain text until the app hands it to the controller; `Debug`
/// never shows the PIN.
#[derive(Clone)]
pub enum FormRequest {
    Deactivate { pin: String },
    Arm { pin: String },
    Disarm { pin: String },
    TimerConfig {
        initial_seconds: String,
        btn_increment: String,
    },
    LcdMessage { text: String },
}

impl FormRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Deactivate { .. } => ActionKind::Deactivate,
            Self::Arm { .. } => ActionKind::Arm,
            Self::Disarm { .. } => ActionKind::Disarm,
            Self::TimerConfig { .. } => ActionKind::TimerConfig,
            Self::LcdMessage { .. } => ActionKind::LcdMessage,
        }
    }
}

impl From<FormRequest> for AuthenticatedAction {
    fn from(request: FormRequest) -> Self {
        match request {
            FormRequest::Deactivate { pin } => Self::Deactivate {
                pin: SecretString::from(pin),
            },
            FormRequest::Arm { pin } => Self::Arm {
                pin: SecretString::from(pin),
            },
            FormRequest::Disarm { pin } => Self::Disarm {
                pin: SecretString::from(pin),
            },
            FormRequest::TimerConfig {
                initial_seconds,
                btn_increment,
            } => Self::TimerConfig {
                initial_seconds,
                btn_increment,
            },
            FormRequest::LcdMessage { text } => Self::LcdMessage { text },
        }
    }
}

impl fmt::Debug for FormRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimerConfig {
                initial_seconds,
                btn_increment,
            } => f
                .debug_struct("TimerConfig")
                .field("initial_seconds", initial_seconds)
                .field("btn_increment", btn_increment)
                .finish(),
            Self::LcdMessage { text } => f.debug_struct("LcdMessage").field("text", text).finish(),
            pin_form => write!(f, "{}(pin: ****)", pin_form.kind()),
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    /// Poll the active screen's panels now.
    Refresh,

    // ── Data (from the controller's watch channels) ──────────────
    PanelUpdated(PanelView),

    // ── Commands ──────────────────────────────────────────────────
    /// Fire-and-forget actuator command.
    Dispatch(Command),
    /// Form submission; answered by `SubmitFinished`.
    Submit(FormRequest),
    SubmitFinished(SubmitOutcome),
}
