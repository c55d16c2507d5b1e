//! Single-line text input on top of `tui-input`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::{Input, InputRequest};

use crate::theme;

pub struct TextField {
    label: &'static str,
    input: Input,
    /// Render `●` per character (PIN entry).
    masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            input: Input::default(),
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }

    /// Apply an editing key. Returns `false` for keys the field ignores
    /// (Enter, Esc, Tab) so the caller can handle them.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let request = match key.code {
            KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
            KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
            KeyCode::Char(c) if !ctrl => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return false,
        };
        self.input.handle(request);
        true
    }

    fn display(&self) -> String {
        if self.masked {
            "\u{25CF}".repeat(self.input.value().chars().count())
        } else {
            self.input.value().to_owned()
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, active: bool) {
        let border = if active {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let label_style = if active {
            Style::default().fg(theme::NEON_CYAN)
        } else {
            theme::label()
        };
        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.label), label_style))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);

        let inner = block.inner(area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(self.display(), theme::value()))).block(block),
            area,
        );

        if active {
            let cursor = u16::try_from(self.input.visual_cursor()).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(cursor).min(inner.right().saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }
}
