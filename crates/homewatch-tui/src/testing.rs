//! Rendering helpers for unit tests.
#![allow(clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

use homewatch_core::{PanelId, PanelView};

use crate::component::Component;

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Buffer contents, one string per row.
pub fn buffer_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_component(component: &dyn Component, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| component.render(frame, frame.area()))
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

/// A live view of `panel` built from a raw backend body.
pub fn live_view(panel: PanelId, raw: &serde_json::Value) -> PanelView {
    let mut view = PanelView::initial(panel);
    let update = homewatch_core::panel::render_update(panel, raw, 50).unwrap();
    view.apply(update, 1);
    view
}
