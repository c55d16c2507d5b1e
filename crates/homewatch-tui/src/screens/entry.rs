//! Entry node screen: door sensors and actuators.

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use homewatch_core::{PanelId, PanelView};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::panel::render_fields_block;

pub struct EntryScreen {
    focused: bool,
    view: PanelView,
    now: DateTime<Utc>,
}

impl EntryScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            view: PanelView::initial(PanelId::Entry),
            now: Utc::now(),
        }
    }
}

impl Component for EntryScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PanelUpdated(view) if view.panel == PanelId::Entry => self.view = view.clone(),
            Action::Tick => self.now = Utc::now(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [fields_area, hint_area] =
            Layout::vertical([Constraint::Length(9), Constraint::Length(1)]).areas(area);
        render_fields_block(frame, fields_area, "Entry", &self.view, self.focused, self.now);

        let hints = Line::from(vec![
            Span::styled("  l ", theme::key_hint_key()),
            Span::styled("light on  ", theme::key_hint()),
            Span::styled("L ", theme::key_hint_key()),
            Span::styled("light off  ", theme::key_hint()),
            Span::styled("b ", theme::key_hint_key()),
            Span::styled("beep", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), hint_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{live_view, render_component};

    #[test]
    fn disabled_panel_says_so() {
        let mut screen = EntryScreen::new();
        screen
            .update(&Action::PanelUpdated(PanelView::disabled(PanelId::Entry)))
            .unwrap();
        let text = render_component(&screen, 80, 12);
        assert!(text.contains("polling disabled"), "{text}");
        assert!(text.contains("Door button"), "{text}");
    }

    #[test]
    fn renders_sensor_values() {
        let mut screen = EntryScreen::new();
        let view = live_view(
            PanelId::Entry,
            &json!({ "door_button": true, "door_distance": 42, "door_light": false }),
        );
        screen.update(&Action::PanelUpdated(view)).unwrap();

        let text = render_component(&screen, 80, 12);
        assert!(text.contains("Pressed"), "{text}");
        assert!(text.contains("42.0 cm"), "{text}");
        assert!(text.contains("OFF"), "{text}");
    }

    #[test]
    fn ignores_other_panels() {
        let mut screen = EntryScreen::new();
        let view = live_view(PanelId::Kitchen, &json!({ "kitchen_temp": 20 }));
        screen.update(&Action::PanelUpdated(view)).unwrap();
        assert_eq!(screen.view.panel, PanelId::Entry);
    }
}
