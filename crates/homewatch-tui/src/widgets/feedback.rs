//! Per-form feedback state and its one-line rendering.

use ratatui::text::{Line, Span};

use homewatch_core::submit::validate;
use homewatch_core::{ActionKind, AuthenticatedAction, Feedback, SubmitOutcome, Tone};

use crate::action::{Action, FormRequest};
use crate::theme;

/// Feedback slot of one form. Only outcomes for `kinds` land here.
#[derive(Debug, Default)]
pub struct FormStatus {
    pending: Option<ActionKind>,
    feedback: Option<Feedback>,
}

impl FormStatus {
    /// Send `request` unless its input is already known to be bad, in which
    /// case the error is shown at once and nothing is pending.
    pub fn submit(&mut self, request: FormRequest) -> Option<Action> {
        let kind = request.kind();
        if validate(&AuthenticatedAction::from(request.clone())).is_none() {
            self.pending = None;
            self.feedback = Some(kind.invalid_input());
            return None;
        }
        self.pending = Some(kind);
        self.feedback = None;
        Some(Action::Submit(request))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record `outcome` if it belongs to this form; returns whether it did.
    pub fn finish(&mut self, outcome: &SubmitOutcome, kinds: &[ActionKind]) -> bool {
        if !kinds.contains(&outcome.action) {
            return false;
        }
        self.pending = None;
        self.feedback = Some(outcome.feedback.clone());
        true
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn line(&self) -> Line<'static> {
        if self.pending.is_some() {
            return Line::from(Span::styled("  Sending…", theme::key_hint()));
        }
        match self.feedback() {
            Some(fb) => {
                let style = match fb.tone {
                    Tone::Success => theme::feedback_success(),
                    Tone::Error => theme::feedback_error(),
                };
                Line::from(Span::styled(format!("  {}", fb.message), style))
            }
            None => Line::default(),
        }
    }
}
