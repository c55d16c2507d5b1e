// ── Bounded tables ──
//
// Each render rebuilds the whole row list from the latest snapshot; nothing
// is carried over between ticks.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::{AlarmEvent, FieldValue, SeriesPoint};

use super::PLACEHOLDER;

/// Text of the single row shown when a feed is empty.
pub const EMPTY_TEXT: &str = "No data.";

pub const SERIES_COLUMNS: &[&str] = &["Time", "Value"];
pub const EVENT_COLUMNS: &[&str] = &["Time", "Node", "Measurement", "Field", "Value"];
pub const IR_COLUMNS: &[&str] = &["Time", "Value"];

/// Which end of a feed to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDirection {
    /// First N items (newest-first feeds).
    Head,
    /// Last N items (oldest-first feeds).
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    pub direction: WindowDirection,
    pub size: usize,
}

impl WindowPolicy {
    pub const fn head(size: usize) -> Self {
        Self {
            direction: WindowDirection::Head,
            size,
        }
    }

    pub const fn tail(size: usize) -> Self {
        Self {
            direction: WindowDirection::Tail,
            size,
        }
    }

    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let n = self.size.min(items.len());
        match self.direction {
            WindowDirection::Head => &items[..n],
            WindowDirection::Tail => &items[items.len() - n..],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TableRow {
    Cells(Vec<String>),
    /// One cell spanning `span` columns.
    Placeholder { text: &'static str, span: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundedTable {
    pub columns: &'static [&'static str],
    pub rows: Vec<TableRow>,
}

impl BoundedTable {
    /// An empty feed becomes exactly one placeholder row.
    pub fn from_rows(columns: &'static [&'static str], rows: Vec<Vec<String>>) -> Self {
        let rows = if rows.is_empty() {
            vec![TableRow::Placeholder {
                text: EMPTY_TEXT,
                span: columns.len(),
            }]
        } else {
            rows.into_iter().map(TableRow::Cells).collect()
        };
        Self { columns, rows }
    }

    /// Initial contents before the first poll.
    pub fn empty(columns: &'static [&'static str]) -> Self {
        Self::from_rows(columns, Vec::new())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [TableRow::Placeholder { .. }])
    }

    /// Number of data rows (the placeholder row does not count).
    pub fn data_len(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, TableRow::Cells(_)))
            .count()
    }
}

fn cell(value: &FieldValue) -> String {
    if value.is_null() {
        PLACEHOLDER.to_owned()
    } else {
        value.to_string()
    }
}

pub fn render_series(points: &[SeriesPoint], window: WindowPolicy) -> BoundedTable {
    let rows = window
        .apply(points)
        .iter()
        .map(|p| vec![p.time.local_display(), cell(&p.value)])
        .collect();
    BoundedTable::from_rows(SERIES_COLUMNS, rows)
}

pub fn render_events(events: &[AlarmEvent], window: WindowPolicy) -> BoundedTable {
    let rows = window
        .apply(events)
        .iter()
        .map(|e| {
            vec![
                e.time.local_display(),
                e.node_id.clone().unwrap_or_else(|| "-".to_owned()),
                cell(&e.measurement),
                cell(&e.field),
                cell(&e.value),
            ]
        })
        .collect();
    BoundedTable::from_rows(EVENT_COLUMNS, rows)
}

/// Only the latest IR reading is known, so the row is stamped with `now`.
pub fn render_ir(reading: Option<&FieldValue>, now: DateTime<Local>) -> BoundedTable {
    let rows = reading
        .filter(|v| !v.is_null())
        .map(|v| vec![now.format("%H:%M:%S").to_string(), v.to_string()])
        .into_iter()
        .collect();
    BoundedTable::from_rows(IR_COLUMNS, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Timestamp;
    use pretty_assertions::assert_eq;

    fn series(n: usize) -> Vec<SeriesPoint> {
        (0..n)
            .map(|i| SeriesPoint {
                time: Timestamp::Raw(format!("t{i}")),
                value: FieldValue::Text(format!("v{i}")),
            })
            .collect()
    }

    fn first_cell(row: &TableRow) -> &str {
        match row {
            TableRow::Cells(cells) => &cells[0],
            TableRow::Placeholder { text, .. } => text,
        }
    }

    #[test]
    fn tail_window_keeps_last_fifty() {
        let table = render_series(&series(120), WindowPolicy::tail(50));
        assert_eq!(table.rows.len(), 50);
        assert_eq!(first_cell(&table.rows[0]), "t70");
        assert_eq!(first_cell(&table.rows[49]), "t119");
    }

    #[test]
    fn head_window_keeps_first_fifty() {
        let events: Vec<AlarmEvent> = (0..80)
            .map(|i| AlarmEvent {
                time: Timestamp::Raw(format!("t{i}")),
                node_id: None,
                measurement: FieldValue::Text("door".into()),
                field: FieldValue::Text("motion".into()),
                value: FieldValue::Bool(true),
            })
            .collect();
        let table = render_events(&events, WindowPolicy::head(50));
        assert_eq!(table.data_len(), 50);
        assert_eq!(first_cell(&table.rows[0]), "t0");
        assert_eq!(first_cell(&table.rows[49]), "t49");
        assert_eq!(
            table.rows[0],
            TableRow::Cells(vec![
                "t0".into(),
                "-".into(),
                "door".into(),
                "motion".into(),
                "true".into()
            ])
        );
    }

    #[test]
    fn short_feed_is_rendered_whole() {
        let table = render_series(&series(3), WindowPolicy::tail(50));
        assert_eq!(table.data_len(), 3);
    }

    #[test]
    fn empty_feed_gets_one_spanning_placeholder() {
        let table = render_events(&[], WindowPolicy::head(50));
        assert_eq!(
            table.rows,
            vec![TableRow::Placeholder {
                text: EMPTY_TEXT,
                span: 5
            }]
        );
        assert!(table.is_placeholder());
    }

    #[test]
    fn ir_null_reading_is_placeholder() {
        let now = Local::now();
        assert!(render_ir(None, now).is_placeholder());
        assert!(render_ir(Some(&FieldValue::Null), now).is_placeholder());

        let table = render_ir(Some(&FieldValue::Number(1.0)), now);
        assert_eq!(
            table.rows,
            vec![TableRow::Cells(vec![
                now.format("%H:%M:%S").to_string(),
                "1".into()
            ])]
        );
    }
}
