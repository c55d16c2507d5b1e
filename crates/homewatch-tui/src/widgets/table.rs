//! ratatui rendering of a `BoundedTable`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use homewatch_core::{BoundedTable, TableRow};

use crate::theme;

/// Column widths: the time column is fixed, the rest share what remains.
fn widths(columns: usize) -> Vec<Constraint> {
    std::iter::once(Constraint::Length(19))
        .chain(std::iter::repeat_n(Constraint::Fill(1), columns.saturating_sub(1)))
        .collect()
}

fn row(row: &TableRow) -> Row<'static> {
    match row {
        TableRow::Cells(cells) => Row::new(cells.iter().cloned().map(Cell::from)),
        // ratatui has no column span; the text sits in the first cell.
        TableRow::Placeholder { text, .. } => {
            Row::new([Cell::from(Span::styled(*text, theme::key_hint()))])
        }
    }
}

pub fn render_table(frame: &mut Frame, area: Rect, title: &str, table: &BoundedTable) {
    let header = Row::new(table.columns.iter().map(|c| Cell::from(*c))).style(theme::table_header());
    let rows = table.rows.iter().map(row);

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} ({}) ", table.data_len()),
            theme::title_style(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default());

    let widget = Table::new(rows, widths(table.columns.len()))
        .header(header)
        .style(theme::table_row())
        .block(block);
    frame.render_widget(widget, area);
}
