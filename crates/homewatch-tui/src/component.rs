//! The interface every screen implements.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::action::Action;

/// A screen reacts to keys (active screen only) and to broadcast actions,
/// and draws itself from its own state. It never talks to the controller;
/// anything that needs the network goes back out as an [`Action`].
pub trait Component: Send {
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Panel data, submit outcomes and clock ticks. The returned action, if
    /// any, is queued behind the current one.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    fn set_focused(&mut self, _focused: bool) {}

    /// A text field is open, so single-letter shortcuts belong to it.
    fn captures_input(&self) -> bool {
        false
    }
}
