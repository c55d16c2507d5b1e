// ── Renderers ──
//
// Pure functions from decoded records to display values. Nothing in here
// performs I/O; the poller writes the results into a panel's watch channel.

pub mod bindings;
pub mod field;
pub mod table;

pub use field::{FieldBinding, Formatter, RenderedField, render_fields};
pub use table::{BoundedTable, TableRow, WindowDirection, WindowPolicy};

/// Shown in place of any value the backend did not provide.
pub const PLACEHOLDER: &str = "–";
