// ── Authenticated action submitter ──
//
// validate → send → {Succeeded | Rejected | TransportError}
//
// Empty or malformed input is rejected before any request is made. Every
// submission ends in exactly one terminal phase with one feedback message
// for the form that initiated the action.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use strum::Display;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::decode::decode_action_result;
use crate::error::CoreError;
use crate::model::{ActionResult, AuthenticatedAction, SubmitRequest};
use crate::panel::PanelId;

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SubmitPhase {
    Succeeded,
    Rejected,
    TransportError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub tone: Tone,
}

impl Feedback {
    fn success(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            tone: Tone::Success,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            tone: Tone::Error,
        }
    }
}

/// What the form should do once a submission has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub action: ActionKind,
    pub phase: SubmitPhase,
    pub feedback: Feedback,
    /// Clear the form's input field.
    pub clear_input: bool,
    /// Panel to re-poll immediately.
    pub repoll: Option<PanelId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Deactivate,
    Arm,
    Disarm,
    TimerConfig,
    LcdMessage,
}

struct Messages {
    empty: &'static str,
    success: &'static str,
    fallback: &'static str,
    transport: &'static str,
}

impl ActionKind {
    fn messages(self) -> Messages {
        match self {
            Self::Deactivate => Messages {
                empty: "Enter PIN.",
                success: "Alarm deactivated.",
                fallback: "Incorrect PIN.",
                transport: "Failed to send PIN.",
            },
            Self::Arm => Messages {
                empty: "Enter PIN.",
                success: "System armed.",
                fallback: "Incorrect PIN or system not armed.",
                transport: "Failed to arm the system.",
            },
            Self::Disarm => Messages {
                empty: "Enter PIN.",
                success: "System disarmed.",
                fallback: "Incorrect PIN or system not disarmed.",
                transport: "Failed to disarm the system.",
            },
            Self::TimerConfig => Messages {
                empty: "Enter valid numeric values.",
                success: "Timer settings saved.",
                fallback: "Saving timer settings failed.",
                transport: "Failed to send timer settings.",
            },
            Self::LcdMessage => Messages {
                empty: "Enter a message.",
                success: "Message sent to LCD.",
                fallback: "Sending the message failed.",
                transport: "Failed to send the message.",
            },
        }
    }

    /// Error shown when the form's input fails [`validate`].
    pub fn invalid_input(self) -> Feedback {
        Feedback::error(self.messages().empty)
    }

    fn clears_input(self) -> bool {
        matches!(self, Self::Deactivate | Self::LcdMessage)
    }

    fn repoll(self) -> Option<PanelId> {
        match self {
            Self::Deactivate | Self::Arm | Self::Disarm => Some(PanelId::AlarmState),
            Self::LcdMessage => Some(PanelId::Bedroom),
            Self::TimerConfig => None,
        }
    }
}

impl AuthenticatedAction {
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

fn trimmed_pin(pin: &SecretString) -> Option<SecretString> {
    let pin = pin.expose_secret().trim();
    (!pin.is_empty()).then(|| SecretString::from(pin.to_owned()))
}

/// Trim and check user input. `None` means "reject without sending".
pub fn validate(action: &AuthenticatedAction) -> Option<SubmitRequest> {
    match action {
        AuthenticatedAction::Deactivate { pin } => {
            trimmed_pin(pin).map(|pin| SubmitRequest::Deactivate { pin })
        }
        AuthenticatedAction::Arm { pin } => {
            trimmed_pin(pin).map(|pin| SubmitRequest::SetArmed { pin, armed: true })
        }
        AuthenticatedAction::Disarm { pin } => {
            trimmed_pin(pin).map(|pin| SubmitRequest::SetArmed { pin, armed: false })
        }
        AuthenticatedAction::TimerConfig {
            initial_seconds,
            btn_increment,
        } => {
            let initial_seconds = initial_seconds.trim().parse().ok()?;
            let btn_increment = btn_increment.trim().parse().ok()?;
            Some(SubmitRequest::TimerConfig {
                initial_seconds,
                btn_increment,
            })
        }
        AuthenticatedAction::LcdMessage { text } => {
            let text = text.trim();
            (!text.is_empty()).then(|| SubmitRequest::LcdMessage {
                text: text.to_owned(),
            })
        }
    }
}

pub struct ActionSubmitter<B> {
    backend: Arc<B>,
}

impl<B: Backend> ActionSubmitter<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn submit(&self, action: AuthenticatedAction) -> SubmitOutcome {
        let kind = action.kind();
        let messages = kind.messages();

        let Some(request) = validate(&action) else {
            debug!(action = %kind, "rejected locally: missing or invalid input");
            return Self::finish(kind, SubmitPhase::Rejected, kind.invalid_input());
        };

        let result = self.send(&request).await;

        match result {
            Ok(ActionResult { success: true, .. }) => {
                info!(action = %kind, "action accepted");
                Self::finish(kind, SubmitPhase::Succeeded, Feedback::success(messages.success))
            }
            Ok(ActionResult { message, .. }) => {
                info!(action = %kind, message = ?message, "action rejected by backend");
                let text = message.as_deref().unwrap_or(messages.fallback);
                Self::finish(kind, SubmitPhase::Rejected, Feedback::error(text))
            }
            Err(e) => {
                warn!(action = %kind, error = %e, "action failed");
                Self::finish(
                    kind,
                    SubmitPhase::TransportError,
                    Feedback::error(messages.transport),
                )
            }
        }
    }

    async fn send(&self, request: &SubmitRequest) -> Result<ActionResult, CoreError> {
        let raw = self.backend.submit(request).await?;
        Ok(decode_action_result(&raw)?)
    }

    fn finish(action: ActionKind, phase: SubmitPhase, feedback: Feedback) -> SubmitOutcome {
        let succeeded = phase == SubmitPhase::Succeeded;
        SubmitOutcome {
            action,
            phase,
            feedback,
            clear_input: succeeded && action.clears_input(),
            repoll: if succeeded { action.repoll() } else { None },
        }
    }
}
