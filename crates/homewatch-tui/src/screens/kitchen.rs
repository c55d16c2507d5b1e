//! Kitchen node screen with the stopwatch timer settings form.

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use homewatch_core::{ActionKind, PanelId, PanelView};

use crate::action::{Action, FormRequest};
use crate::component::Component;
use crate::theme;
use crate::widgets::feedback::FormStatus;
use crate::widgets::panel::render_fields_block;
use crate::widgets::text_field::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerField {
    InitialSeconds,
    BtnIncrement,
}

pub struct KitchenScreen {
    focused: bool,
    view: PanelView,
    initial_seconds: TextField,
    btn_increment: TextField,
    editing: Option<TimerField>,
    status: FormStatus,
    now: DateTime<Utc>,
}

impl KitchenScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            view: PanelView::initial(PanelId::Kitchen),
            initial_seconds: TextField::new("Initial seconds"),
            btn_increment: TextField::new("Button increment (s)"),
            editing: None,
            status: FormStatus::default(),
            now: Utc::now(),
        }
    }

    fn handle_editing_key(&mut self, field: TimerField, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.editing = Some(match field {
                    TimerField::InitialSeconds => TimerField::BtnIncrement,
                    TimerField::BtnIncrement => TimerField::InitialSeconds,
                });
                None
            }
            KeyCode::Enter => {
                self.editing = None;
                self.status.submit(FormRequest::TimerConfig {
                    initial_seconds: self.initial_seconds.value().to_owned(),
                    btn_increment: self.btn_increment.value().to_owned(),
                })
            }
            KeyCode::Esc => {
                self.editing = None;
                None
            }
            _ => {
                match field {
                    TimerField::InitialSeconds => self.initial_seconds.handle_key(key),
                    TimerField::BtnIncrement => self.btn_increment.handle_key(key),
                };
                None
            }
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Stopwatch timer ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.editing.is_some() {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [initial_area, increment_area, feedback_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.initial_seconds.render(
            frame,
            initial_area,
            self.editing == Some(TimerField::InitialSeconds),
        );
        self.btn_increment.render(
            frame,
            increment_area,
            self.editing == Some(TimerField::BtnIncrement),
        );
        frame.render_widget(Paragraph::new(self.status.line()), feedback_area);

        let hints = if self.editing.is_some() {
            Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("next field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  t ", theme::key_hint_key()),
                Span::styled("edit timer settings", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), hint_area);
    }
}

impl Component for KitchenScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(field) = self.editing {
            return Ok(self.handle_editing_key(field, key));
        }
        if key.code == KeyCode::Char('t') && !self.status.is_pending() {
            self.editing = Some(TimerField::InitialSeconds);
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PanelUpdated(view) if view.panel == PanelId::Kitchen => {
                self.view = view.clone();
            }
            Action::SubmitFinished(outcome) => {
                if self.status.finish(outcome, &[ActionKind::TimerConfig]) && outcome.clear_input {
                    self.initial_seconds.clear();
                    self.btn_increment.clear();
                }
            }
            Action::Tick => self.now = Utc::now(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [fields_area, form_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);
        let [form_area, _] =
            Layout::vertical([Constraint::Length(10), Constraint::Min(0)]).areas(form_area);

        render_fields_block(frame, fields_area, "Kitchen", &self.view, self.focused, self.now);
        self.render_form(frame, form_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_input(&self) -> bool {
        self.editing.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homewatch_core::{Feedback, Tone};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::testing::{char_key, key, live_view, render_component};

    fn type_text(screen: &mut KitchenScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(char_key(c)).unwrap();
        }
    }

    #[test]
    fn renders_kitchen_fields() {
        let mut screen = KitchenScreen::new();
        let view = live_view(
            PanelId::Kitchen,
            &json!({ "kitchen_temp": 21.5, "kitchen_hum": 40, "display4sd": " 00:42 " }),
        );
        screen.update(&Action::PanelUpdated(view)).unwrap();

        let text = render_component(&screen, 120, 16);
        assert!(text.contains("21.5 °C"), "{text}");
        assert!(text.contains("40.0 %"), "{text}");
        assert!(text.contains("00:42"), "{text}");
        assert!(text.contains("Stopwatch timer"), "{text}");
    }

    #[test]
    fn timer_form_submits_both_fields() {
        let mut screen = KitchenScreen::new();
        screen.handle_key_event(char_key('t')).unwrap();
        assert!(screen.captures_input());

        type_text(&mut screen, "30");
        screen.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut screen, "5");

        match screen.handle_key_event(key(KeyCode::Enter)).unwrap() {
            Some(Action::Submit(FormRequest::TimerConfig {
                initial_seconds,
                btn_increment,
            })) => {
                assert_eq!(initial_seconds, "30");
                assert_eq!(btn_increment, "5");
            }
            other => panic!("expected timer submit, got {other:?}"),
        }
        assert!(!screen.captures_input());
    }

    #[test]
    fn non_numeric_timer_values_are_refused_locally() {
        let mut screen = KitchenScreen::new();
        screen.handle_key_event(char_key('t')).unwrap();
        type_text(&mut screen, "abc");
        screen.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut screen, "5");

        assert!(screen.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());
        assert!(!screen.status.is_pending());
        assert_eq!(
            screen.status.feedback(),
            Some(&Feedback {
                message: "Enter valid numeric values.".into(),
                tone: Tone::Error,
            })
        );
        assert_eq!(screen.initial_seconds.value(), "abc");
        assert!(!render_component(&screen, 120, 16).contains("Sending"));
    }

    #[test]
    fn t_is_typed_while_editing() {
        let mut screen = KitchenScreen::new();
        screen.handle_key_event(char_key('t')).unwrap();
        screen.handle_key_event(char_key('t')).unwrap();
        assert_eq!(screen.initial_seconds.value(), "t");
    }
}
