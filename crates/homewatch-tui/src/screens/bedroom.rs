//! Bedroom node screen: climate, IR history, LED color and LCD message.

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use strum::IntoEnumIterator;

use homewatch_core::{ActionKind, Command, LedColor, PanelId, PanelView};

use crate::action::{Action, FormRequest};
use crate::component::Component;
use crate::theme;
use crate::widgets::feedback::FormStatus;
use crate::widgets::panel::render_fields_block;
use crate::widgets::table::render_table;
use crate::widgets::text_field::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    /// Choosing an LED color; the index points into `colors`.
    PickColor,
    EditMessage,
}

pub struct BedroomScreen {
    focused: bool,
    view: PanelView,
    colors: Vec<LedColor>,
    color_index: usize,
    message: TextField,
    mode: Mode,
    status: FormStatus,
    now: DateTime<Utc>,
}

impl BedroomScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            view: PanelView::initial(PanelId::Bedroom),
            colors: LedColor::iter().collect(),
            color_index: 0,
            message: TextField::new("LCD message"),
            mode: Mode::Browse,
            status: FormStatus::default(),
            now: Utc::now(),
        }
    }

    fn selected_color(&self) -> LedColor {
        self.colors
            .get(self.color_index)
            .copied()
            .unwrap_or(LedColor::Off)
    }

    fn handle_color_key(&mut self, key: KeyEvent) -> Option<Action> {
        let count = self.colors.len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.color_index = (self.color_index + count - 1) % count;
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.color_index = (self.color_index + 1) % count;
                None
            }
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                Some(Action::Dispatch(Command::SetColor(self.selected_color())))
            }
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                None
            }
            _ => None,
        }
    }

    fn handle_message_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                self.status.submit(FormRequest::LcdMessage {
                    text: self.message.value().to_owned(),
                })
            }
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                None
            }
            _ => {
                self.message.handle_key(key);
                None
            }
        }
    }

    fn color_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("  ", theme::key_hint())];
        for (i, color) in self.colors.iter().enumerate() {
            let style = if self.mode == Mode::PickColor && i == self.color_index {
                theme::selected()
            } else {
                theme::key_hint()
            };
            spans.push(Span::styled(format!(" {color} "), style));
        }
        Line::from(spans)
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Controls ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.mode == Mode::Browse {
                theme::border_default()
            } else {
                theme::border_focused()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [color_area, message_area, feedback_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(self.color_line()), color_area);
        self.message
            .render(frame, message_area, self.mode == Mode::EditMessage);
        frame.render_widget(Paragraph::new(self.status.line()), feedback_area);

        let hints = match self.mode {
            Mode::Browse => Line::from(vec![
                Span::styled("  c ", theme::key_hint_key()),
                Span::styled("LED color  ", theme::key_hint()),
                Span::styled("m ", theme::key_hint_key()),
                Span::styled("LCD message", theme::key_hint()),
            ]),
            Mode::PickColor => Line::from(vec![
                Span::styled("  ←/→ ", theme::key_hint_key()),
                Span::styled("choose  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("apply  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
            Mode::EditMessage => Line::from(vec![
                Span::styled("  Enter ", theme::key_hint_key()),
                Span::styled("send  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        };
        frame.render_widget(Paragraph::new(hints), hint_area);
    }
}

impl Component for BedroomScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.mode {
            Mode::PickColor => self.handle_color_key(key),
            Mode::EditMessage => self.handle_message_key(key),
            Mode::Browse => {
                match key.code {
                    KeyCode::Char('c') => self.mode = Mode::PickColor,
                    KeyCode::Char('m') if !self.status.is_pending() => {
                        self.mode = Mode::EditMessage;
                    }
                    _ => {}
                }
                None
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PanelUpdated(view) if view.panel == PanelId::Bedroom => {
                self.view = view.clone();
            }
            Action::SubmitFinished(outcome) => {
                if self.status.finish(outcome, &[ActionKind::LcdMessage]) && outcome.clear_input {
                    self.message.clear();
                }
            }
            Action::Tick => self.now = Utc::now(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);
        let [fields_area, ir_area] =
            Layout::vertical([Constraint::Length(9), Constraint::Min(4)]).areas(left);
        let [controls_area, _] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(right);

        render_fields_block(frame, fields_area, "Bedroom", &self.view, self.focused, self.now);
        if let Some(table) = &self.view.table {
            render_table(frame, ir_area, "IR readings", table);
        }
        self.render_controls(frame, controls_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_input(&self) -> bool {
        self.mode != Mode::Browse
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homewatch_core::{Feedback, SubmitOutcome, SubmitPhase, Tone};
    use serde_json::json;

    use super::*;
    use crate::testing::{char_key, key, live_view, render_component};

    #[test]
    fn renders_fields_and_ir_reading() {
        let mut screen = BedroomScreen::new();
        let view = live_view(
            PanelId::Bedroom,
            &json!({ "bedroom_temp": 19, "rgbled": "BLUE", "bedroom_ir": "0xFF30CF" }),
        );
        screen.update(&Action::PanelUpdated(view)).unwrap();

        let text = render_component(&screen, 140, 24);
        assert!(text.contains("19.0 °C"), "{text}");
        assert!(text.contains("BLUE"), "{text}");
        assert!(text.contains("0xFF30CF"), "{text}");
        assert!(text.contains("IR readings (1)"), "{text}");
    }

    #[test]
    fn color_picker_wraps_and_dispatches() {
        let mut screen = BedroomScreen::new();
        screen.handle_key_event(char_key('c')).unwrap();
        assert!(screen.captures_input());

        screen.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(screen.selected_color(), LedColor::Off);
        screen.handle_key_event(char_key('l')).unwrap();
        screen.handle_key_event(char_key('l')).unwrap();
        assert_eq!(screen.selected_color(), LedColor::Green);

        match screen.handle_key_event(key(KeyCode::Enter)).unwrap() {
            Some(Action::Dispatch(Command::SetColor(color))) => assert_eq!(color, LedColor::Green),
            other => panic!("expected color dispatch, got {other:?}"),
        }
        assert!(!screen.captures_input());
    }

    #[test]
    fn blank_lcd_message_is_refused_locally() {
        let mut screen = BedroomScreen::new();
        screen.handle_key_event(char_key('m')).unwrap();
        screen.handle_key_event(char_key(' ')).unwrap();

        assert!(screen.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());
        assert!(!screen.status.is_pending());
        pretty_assertions::assert_eq!(
            screen.status.feedback(),
            Some(&Feedback {
                message: "Enter a message.".into(),
                tone: Tone::Error,
            })
        );
        let text = render_component(&screen, 140, 24);
        assert!(text.contains("Enter a message."), "{text}");
        assert!(!text.contains("Sending"), "{text}");
    }

    #[test]
    fn lcd_message_clears_after_success() {
        let mut screen = BedroomScreen::new();
        screen.handle_key_event(char_key('m')).unwrap();
        for c in "hi there".chars() {
            screen.handle_key_event(char_key(c)).unwrap();
        }
        match screen.handle_key_event(key(KeyCode::Enter)).unwrap() {
            Some(Action::Submit(FormRequest::LcdMessage { text })) => assert_eq!(text, "hi there"),
            other => panic!("expected LCD submit, got {other:?}"),
        }

        let outcome = SubmitOutcome {
            action: ActionKind::LcdMessage,
            phase: SubmitPhase::Succeeded,
            feedback: Feedback {
                message: "Message sent to LCD.".into(),
                tone: Tone::Success,
            },
            clear_input: true,
            repoll: Some(PanelId::Bedroom),
        };
        screen.update(&Action::SubmitFinished(outcome)).unwrap();
        assert_eq!(screen.message.value(), "");
        assert!(render_component(&screen, 140, 24).contains("Message sent to LCD."));
    }
}
