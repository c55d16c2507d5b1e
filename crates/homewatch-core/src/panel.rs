// ── Panels ──
//
// A panel is one independently polled region of the display. Its current
// contents live in a `PanelView`, published through a watch channel.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::Value;
use strum::{Display, EnumIter};

use crate::decode::{self, DecodeError};
use crate::model::NodeId;
use crate::render::table::{self, EVENT_COLUMNS, IR_COLUMNS, SERIES_COLUMNS};
use crate::render::{BoundedTable, FieldBinding, RenderedField, WindowPolicy, bindings};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    AlarmState,
    PeopleSeries,
    AlarmEvents,
    Entry,
    Kitchen,
    Bedroom,
}

impl PanelId {
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Entry => Some(NodeId::Entry),
            Self::Kitchen => Some(NodeId::Kitchen),
            Self::Bedroom => Some(NodeId::Bedroom),
            Self::AlarmState | Self::PeopleSeries | Self::AlarmEvents => None,
        }
    }

    /// Alarm feeds share the slower cadence; node panels the faster one.
    pub fn is_alarm_feed(self) -> bool {
        self.node().is_none()
    }

    pub fn bindings(self) -> &'static [FieldBinding] {
        match self {
            Self::AlarmState => bindings::ALARM,
            Self::PeopleSeries | Self::AlarmEvents => &[],
            Self::Entry => bindings::ENTRY,
            Self::Kitchen => bindings::KITCHEN,
            Self::Bedroom => bindings::BEDROOM,
        }
    }

    fn columns(self) -> Option<&'static [&'static str]> {
        match self {
            Self::PeopleSeries => Some(SERIES_COLUMNS),
            Self::AlarmEvents => Some(EVENT_COLUMNS),
            Self::Bedroom => Some(IR_COLUMNS),
            Self::AlarmState | Self::Entry | Self::Kitchen => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelStatus {
    /// No successful poll yet.
    #[strum(to_string = "waiting")]
    Waiting,
    #[strum(to_string = "live")]
    Live,
    /// This panel's poller is switched off in configuration.
    #[strum(to_string = "polling disabled")]
    Disabled,
}

/// Everything needed to draw one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub panel: PanelId,
    pub fields: Vec<RenderedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<BoundedTable>,
    pub status: PanelStatus,
    pub last_updated: Option<DateTime<Utc>>,
    /// Id of the poll tick that produced this view; 0 before the first.
    #[serde(skip)]
    pub tick: u64,
}

impl PanelView {
    pub fn initial(panel: PanelId) -> Self {
        Self {
            panel,
            fields: panel.bindings().iter().map(FieldBinding::pending).collect(),
            table: panel.columns().map(BoundedTable::empty),
            status: PanelStatus::Waiting,
            last_updated: None,
            tick: 0,
        }
    }

    pub fn disabled(panel: PanelId) -> Self {
        Self {
            status: PanelStatus::Disabled,
            ..Self::initial(panel)
        }
    }

    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.field == name)
    }

    /// Replace contents with a freshly rendered snapshot.
    pub fn apply(&mut self, update: PanelUpdate, tick: u64) {
        self.fields = update.fields;
        self.table = update.table;
        self.status = PanelStatus::Live;
        self.last_updated = Some(Utc::now());
        self.tick = tick;
    }
}

/// Rendered output of one successful poll.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelUpdate {
    pub fields: Vec<RenderedField>,
    pub table: Option<BoundedTable>,
}

/// Decode a raw response for `panel` and render it. `rows` caps table length.
pub fn render_update(panel: PanelId, raw: &Value, rows: usize) -> Result<PanelUpdate, DecodeError> {
    let update = match panel {
        PanelId::AlarmState => {
            let state = decode::decode_alarm_state(raw)?;
            PanelUpdate {
                fields: crate::render::render_fields(bindings::ALARM, &state),
                table: None,
            }
        }
        PanelId::PeopleSeries => {
            let points = decode::decode_series(raw)?;
            PanelUpdate {
                fields: Vec::new(),
                table: Some(table::render_series(&points, WindowPolicy::tail(rows))),
            }
        }
        PanelId::AlarmEvents => {
            let events = decode::decode_events(raw)?;
            PanelUpdate {
                fields: Vec::new(),
                table: Some(table::render_events(&events, WindowPolicy::head(rows))),
            }
        }
        PanelId::Entry => render_node(NodeId::Entry, raw)?,
        PanelId::Kitchen => render_node(NodeId::Kitchen, raw)?,
        PanelId::Bedroom => render_node(NodeId::Bedroom, raw)?,
    };
    Ok(update)
}

fn render_node(node: NodeId, raw: &Value) -> Result<PanelUpdate, DecodeError> {
    let state = decode::decode_node_state(node, raw)?;
    let table =
        (node == NodeId::Bedroom).then(|| table::render_ir(state.get("bedroom_ir"), Local::now()));
    Ok(PanelUpdate {
        fields: crate::render::render_fields(bindings::for_node(node), &state),
        table,
    })
}
