//! State synchronization and command dispatch for the homewatch client.
//!
//! - **[`Controller`]**: facade owning one [`PollerHandle`] per panel, the
//!   [`CommandDispatcher`] and the [`ActionSubmitter`]. Panel contents are
//!   published as [`PanelView`]s on `tokio::sync::watch` channels.
//!
//! - **Decode → render pipeline**: [`decode`] turns raw JSON into typed
//!   records with optional fields; [`render`] maps them onto display text via
//!   declarative [`FieldBinding`] tables and bounded tables.
//!
//! - **[`Backend`]**: the seam between this crate and the HTTP client.
//!   Implemented for [`homewatch_api::HomeClient`].

pub mod backend;
pub mod config;
pub mod controller;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod panel;
pub mod poller;
pub mod render;
pub mod submit;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{Backend, Feed};
pub use config::ClientConfig;
pub use controller::Controller;
pub use decode::DecodeError;
pub use dispatch::{CommandDispatcher, DispatchOutcome};
pub use error::CoreError;
pub use model::{
    ActionResult, AlarmEvent, AlarmState, AuthenticatedAction, BuzzerAction, Command, FieldValue,
    LedColor, NodeId, NodeState, SeriesPoint, Switch, Timestamp,
};
pub use panel::{PanelId, PanelStatus, PanelView};
pub use poller::{PollerHandle, TickOutcome};
pub use render::{BoundedTable, FieldBinding, Formatter, PLACEHOLDER, RenderedField, TableRow};
pub use submit::{ActionKind, ActionSubmitter, Feedback, SubmitOutcome, SubmitPhase, Tone};

// Transport knobs callers set on `ClientConfig`.
pub use homewatch_api::{TlsMode, TransportConfig};
