// ── Domain model ──
//
// Typed records produced by the decoder and consumed by the renderers,
// plus the request types that flow the other way.

pub mod command;
pub mod state;
pub mod value;

pub use command::{
    ActionResult, AuthenticatedAction, BuzzerAction, Command, LedColor, SubmitRequest, Switch,
};
pub use state::{AlarmEvent, AlarmState, FieldSource, NodeId, NodeState, SeriesPoint};
pub use value::{FieldValue, Timestamp};
