//! Alarm screen: alarm state, PIN form, people series and event history.

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
use crate::widgets::table::render_table;
use crate::widgets::text_field::TextField;

const PIN_ACTIONS: &[ActionKind] = &[ActionKind::Deactivate, ActionKind::Arm, ActionKind::Disarm];

pub struct AlarmScreen {
    focused: bool,
    state: PanelView,
    series: PanelView,
    events: PanelView,
    pin: TextField,
    /// Action the PIN field is being filled in for; `None` when not editing.
    editing: Option<ActionKind>,
    status: FormStatus,
    now: DateTime<Utc>,
}

impl AlarmScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            state: PanelView::initial(PanelId::AlarmState),
            series: PanelView::initial(PanelId::PeopleSeries),
            events: PanelView::initial(PanelId::AlarmEvents),
            pin: TextField::masked("PIN"),
            editing: None,
            status: FormStatus::default(),
            now: Utc::now(),
        }
    }

    fn request(&self, kind: ActionKind) -> FormRequest {
        let pin = self.pin.value().to_owned();
        match kind {
            ActionKind::Arm => FormRequest::Arm { pin },
            ActionKind::Disarm => FormRequest::Disarm { pin },
            _ => FormRequest::Deactivate { pin },
        }
    }

    fn handle_editing_key(&mut self, kind: ActionKind, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                self.editing = None;
                let request = self.request(kind);
                self.status.submit(request)
            }
            KeyCode::Esc => {
                self.editing = None;
                None
            }
            _ => {
                self.pin.handle_key(key);
                None
            }
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let title = match self.editing {
            Some(ActionKind::Arm) => " Arm system ",
            Some(ActionKind::Disarm) => " Disarm system ",
            Some(_) => " Deactivate alarm ",
            None => " Alarm control ",
        };
        let block = Block::default()
            .title(Span::styled(title, theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.editing.is_some() {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [field_area, feedback_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.pin.render(frame, field_area, self.editing.is_some());
        frame.render_widget(Paragraph::new(self.status.line()), feedback_area);

        let hints = if self.editing.is_some() {
            Line::from(vec![
                Span::styled("  Enter ", theme::key_hint_key()),
                Span::styled("submit  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  d ", theme::key_hint_key()),
                Span::styled("deactivate  ", theme::key_hint()),
                Span::styled("a ", theme::key_hint_key()),
                Span::styled("arm  ", theme::key_hint()),
                Span::styled("x ", theme::key_hint_key()),
                Span::styled("disarm", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), hint_area);
    }
}

impl Component for AlarmScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(kind) = self.editing {
            return Ok(self.handle_editing_key(kind, key));
        }
        let kind = match key.code {
            KeyCode::Char('d') => ActionKind::Deactivate,
            KeyCode::Char('a') => ActionKind::Arm,
            KeyCode::Char('x') => ActionKind::Disarm,
            _ => return Ok(None),
        };
        if !self.status.is_pending() {
            self.editing = Some(kind);
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PanelUpdated(view) => match view.panel {
                PanelId::AlarmState => self.state = view.clone(),
                PanelId::PeopleSeries => self.series = view.clone(),
                PanelId::AlarmEvents => self.events = view.clone(),
                _ => {}
            },
            Action::SubmitFinished(outcome) => {
                if self.status.finish(outcome, PIN_ACTIONS) && outcome.clear_input {
                    self.pin.clear();
                }
            }
            Action::Tick => self.now = Utc::now(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [top, tables] =
            Layout::vertical([Constraint::Length(7), Constraint::Min(5)]).areas(area);
        let [state_area, form_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(top);
        let [series_area, events_area] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
                .areas(tables);

        render_fields_block(frame, state_area, "Alarm", &self.state, self.focused, self.now);
        self.render_form(frame, form_area);
        if let Some(table) = &self.series.table {
            render_table(frame, series_area, "People count", table);
        }
        if let Some(table) = &self.events.table {
            render_table(frame, events_area, "Alarm events", table);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_input(&self) -> bool {
        self.editing.is_some()
    }
}
