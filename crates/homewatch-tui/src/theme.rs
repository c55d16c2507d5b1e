//! Palette and semantic styles for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ──────────────────────────────────────────────────────────

pub const ACCENT_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36

// ── Semantic Styles ──────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn label() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Plain field value.
pub fn value() -> Style {
    Style::default().fg(NEON_CYAN)
}

/// Highlighted value with its marker set (alarm, motion).
pub fn value_active() -> Style {
    Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)
}

/// Highlighted value with its marker clear.
pub fn value_quiet() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(ACCENT_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn feedback_success() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

pub fn feedback_error() -> Style {
    Style::default().fg(ERROR_RED)
}

pub fn selected() -> Style {
    Style::default()
        .fg(ACCENT_PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}
