//! Bordered block listing a panel's rendered fields.

use std::time::Duration;

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use homewatch_core::{PanelStatus, PanelView, RenderedField};

use crate::theme;

/// "live · 4s ago", "waiting", "polling disabled".
pub fn status_label(view: &PanelView, now: DateTime<Utc>) -> String {
    match (view.status, view.last_updated) {
        (PanelStatus::Live, Some(at)) => {
            let secs = (now - at).num_seconds().max(0).unsigned_abs();
            format!(
                "live · {} ago",
                humantime::format_duration(Duration::from_secs(secs))
            )
        }
        (status, _) => status.to_string(),
    }
}

fn status_style(status: PanelStatus) -> Style {
    match status {
        PanelStatus::Live => Style::default().fg(theme::SUCCESS_GREEN),
        PanelStatus::Waiting => Style::default().fg(theme::ELECTRIC_YELLOW),
        PanelStatus::Disabled => theme::key_hint(),
    }
}

fn value_style(field: &RenderedField) -> Style {
    match field.highlight {
        Some(true) => theme::value_active(),
        Some(false) => theme::value_quiet(),
        None => theme::value(),
    }
}

/// One line per field, labels padded to a common width.
pub fn field_lines(fields: &[RenderedField]) -> Vec<Line<'static>> {
    let width = fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);

    fields
        .iter()
        .map(|field| {
            Line::from(vec![
                Span::styled(format!("  {:<width$}  ", field.label), theme::label()),
                Span::styled(field.text.clone(), value_style(field)),
            ])
        })
        .collect()
}

pub fn render_fields_block(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    view: &PanelView,
    focused: bool,
    now: DateTime<Utc>,
) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {title} "), theme::title_style()),
            Span::styled(format!("{} ", status_label(view, now)), status_style(view.status)),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        });

    frame.render_widget(Paragraph::new(field_lines(&view.fields)).block(block), area);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;
    use homewatch_core::PanelId;

    use super::*;

    #[test]
    fn status_label_reports_age_when_live() {
        let now = Utc::now();
        let mut view = PanelView::initial(PanelId::Kitchen);
        assert_eq!(status_label(&view, now), "waiting");

        view.status = PanelStatus::Live;
        view.last_updated = Some(now - TimeDelta::seconds(4));
        assert_eq!(status_label(&view, now), "live · 4s ago");

        let disabled = PanelView::disabled(PanelId::Entry);
        assert_eq!(status_label(&disabled, now), "polling disabled");
    }

    #[test]
    fn highlight_drives_value_style() {
        let field = |highlight| RenderedField {
            field: "door_motion",
            label: "Motion",
            text: "MOTION".into(),
            highlight,
        };
        assert_eq!(value_style(&field(Some(true))), theme::value_active());
        assert_eq!(value_style(&field(Some(false))), theme::value_quiet());
        assert_eq!(value_style(&field(None)), theme::value());
    }
}
