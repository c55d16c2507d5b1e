use serde::Serialize;

use crate::model::{FieldSource, FieldValue};

use super::PLACEHOLDER;

/// How a single field value becomes display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// One decimal place plus unit, e.g. `21.5 °C`.
    NumericUnit { unit: &'static str },
    /// One of two labels by truthiness. Absent reads as negative.
    BoolLabel { on: &'static str, off: &'static str },
    /// Like `BoolLabel`, plus an active marker driven by the same value.
    BoolHighlight { on: &'static str, off: &'static str },
    /// `BoolHighlight` with a third label for "the backend did not say".
    TriStateHighlight {
        on: &'static str,
        off: &'static str,
        unknown: &'static str,
    },
    /// The value's own text, verbatim.
    Passthrough,
    /// The value's own text without surrounding whitespace.
    Trimmed,
    /// An integer, printed as-is.
    Count,
}

impl Formatter {
    /// Returns the display text and, for highlight formatters, the marker state.
    pub fn format(self, value: Option<&FieldValue>) -> (String, Option<bool>) {
        let value = value.filter(|v| !v.is_null());
        match self {
            Self::NumericUnit { unit } => {
                let text = value
                    .and_then(FieldValue::as_f64)
                    .map_or_else(|| PLACEHOLDER.to_owned(), |n| format!("{n:.1} {unit}"));
                (text, None)
            }
            Self::BoolLabel { on, off } => {
                let label = if value.is_some_and(FieldValue::truthy) { on } else { off };
                (label.to_owned(), None)
            }
            Self::BoolHighlight { on, off } => {
                let active = value.is_some_and(FieldValue::truthy);
                let label = if active { on } else { off };
                (label.to_owned(), Some(active))
            }
            Self::TriStateHighlight { on, off, unknown } => match value {
                None => (unknown.to_owned(), Some(false)),
                Some(v) => Self::BoolHighlight { on, off }.format(Some(v)),
            },
            Self::Passthrough => {
                let text = value.map_or_else(|| PLACEHOLDER.to_owned(), ToString::to_string);
                (text, None)
            }
            Self::Trimmed => {
                let text = value.map_or_else(
                    || PLACEHOLDER.to_owned(),
                    |v| v.to_string().trim().to_owned(),
                );
                (text, None)
            }
            Self::Count => {
                let text = value
                    .and_then(FieldValue::as_integer)
                    .map_or_else(|| PLACEHOLDER.to_owned(), |n| n.to_string());
                (text, None)
            }
        }
    }
}

/// Declares which field feeds which panel slot, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    pub field: &'static str,
    pub label: &'static str,
    pub formatter: Formatter,
}

impl FieldBinding {
    pub const fn new(field: &'static str, label: &'static str, formatter: Formatter) -> Self {
        Self {
            field,
            label,
            formatter,
        }
    }

    pub fn render(&self, source: &impl FieldSource) -> RenderedField {
        let value = source.field(self.field);
        let (text, highlight) = self.formatter.format(value.as_ref());
        RenderedField {
            field: self.field,
            label: self.label,
            text,
            highlight,
        }
    }

    /// Slot contents before the first successful poll.
    pub fn pending(&self) -> RenderedField {
        RenderedField {
            field: self.field,
            label: self.label,
            text: PLACEHOLDER.to_owned(),
            highlight: None,
        }
    }
}

/// A panel slot ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedField {
    pub field: &'static str,
    pub label: &'static str,
    pub text: String,
    /// `Some` only for highlight formatters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
}

/// Render every binding of a table against one decoded record.
pub fn render_fields(bindings: &[FieldBinding], source: &impl FieldSource) -> Vec<RenderedField> {
    bindings.iter().map(|b| b.render(source)).collect()
}
