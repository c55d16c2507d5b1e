//! Output formatting: table, JSON, YAML, plain.
//!
//! Panels render as a detail block of labelled values followed by their
//! bounded table, if any. Structured formats serialize the `PanelView`.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

use chrono::Local;
use owo_colors::OwoColorize;
use tabled::{builder::Builder, settings::Style};

use homewatch_core::{
    BoundedTable, Feedback, PanelId, PanelStatus, PanelView, RenderedField, TableRow, Tone,
};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn paint_value(field: &RenderedField, color: bool) -> String {
    match (color, field.highlight) {
        (true, Some(true)) => field.text.red().bold().to_string(),
        (true, Some(false)) => field.text.green().to_string(),
        _ => field.text.clone(),
    }
}

fn paint_status(status: PanelStatus, color: bool) -> String {
    let text = status.to_string();
    if !color {
        return text;
    }
    match status {
        PanelStatus::Live => text.green().to_string(),
        PanelStatus::Waiting => text.yellow().to_string(),
        PanelStatus::Disabled => text.dimmed().to_string(),
    }
}

// ── Panels ───────────────────────────────────────────────────────────

pub fn panel_title(panel: PanelId) -> &'static str {
    match panel {
        PanelId::AlarmState => "Alarm",
        PanelId::PeopleSeries => "People count",
        PanelId::AlarmEvents => "Alarm events",
        PanelId::Entry => "Entry (node 1)",
        PanelId::Kitchen => "Kitchen (node 2)",
        PanelId::Bedroom => "Bedroom (node 3)",
    }
}

/// Render one panel in the chosen format.
pub fn render_panel(format: &OutputFormat, view: &PanelView, color: bool) -> String {
    match format {
        OutputFormat::Table => panel_detail(view, color),
        OutputFormat::Json => render_json_pretty(view),
        OutputFormat::JsonCompact => render_json_compact(view),
        OutputFormat::Yaml => render_yaml(view),
        OutputFormat::Plain => panel_plain(view),
    }
}

fn panel_detail(view: &PanelView, color: bool) -> String {
    let mut out = String::new();
    let updated = view.last_updated.map_or_else(
        || "never".to_owned(),
        |at| at.with_timezone(&Local).format("%H:%M:%S").to_string(),
    );
    let _ = writeln!(
        out,
        "{} [{}, updated {updated}]",
        panel_title(view.panel),
        paint_status(view.status, color)
    );

    let width = view
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);
    for field in &view.fields {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            format!("{}:", field.label),
            paint_value(field, color),
            width = width + 1
        );
    }

    if let Some(table) = &view.table {
        out.push_str(&render_table(table));
    }
    out.trim_end().to_owned()
}

fn panel_plain(view: &PanelView) -> String {
    let mut lines: Vec<String> = view
        .fields
        .iter()
        .map(|f| format!("{}={}", f.field, f.text))
        .collect();
    if let Some(table) = &view.table {
        lines.extend(table.rows.iter().map(|row| match row {
            TableRow::Cells(cells) => cells.join("\t"),
            TableRow::Placeholder { text, .. } => (*text).to_owned(),
        }));
    }
    lines.join("\n")
}

/// Rounded table with one header row. A placeholder row fills its first
/// cell and leaves the rest blank.
pub fn render_table(table: &BoundedTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().map(|c| (*c).to_owned()));
    for row in &table.rows {
        match row {
            TableRow::Cells(cells) => builder.push_record(cells.iter().cloned()),
            TableRow::Placeholder { text, span } => builder.push_record(
                std::iter::once((*text).to_owned())
                    .chain(std::iter::repeat_n(String::new(), span.saturating_sub(1))),
            ),
        }
    }
    builder.build().with(Style::rounded()).to_string()
}

// ── Action feedback ──────────────────────────────────────────────────

pub fn render_feedback(feedback: &Feedback, color: bool) -> String {
    match (color, feedback.tone) {
        (true, Tone::Success) => feedback.message.green().to_string(),
        (true, Tone::Error) => feedback.message.red().to_string(),
        (false, _) => feedback.message.clone(),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
