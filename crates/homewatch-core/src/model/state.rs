use std::collections::BTreeMap;

use homewatch_api::Node;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::value::{FieldValue, Timestamp};

/// Anything a field binding table can read named values from.
pub trait FieldSource {
    /// `None` when the field is absent or `null`.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

// ── Alarm ────────────────────────────────────────────────────────────

/// Security state of the house. `None` means the backend did not say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlarmState {
    pub active: Option<bool>,
    pub people_count: Option<i64>,
}

impl FieldSource for AlarmState {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "alarm_state" => self.active.map(FieldValue::Bool),
            "people_count" => self.people_count.map(|n| FieldValue::Number(n as f64)),
            _ => None,
        }
    }
}

/// One sample of the people-count series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub time: Timestamp,
    pub value: FieldValue,
}

/// One entry of the alarm event feed.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmEvent {
    pub time: Timestamp,
    /// Reporting node, when the backend knows it.
    pub node_id: Option<String>,
    pub measurement: FieldValue,
    pub field: FieldValue,
    pub value: FieldValue,
}

// ── Nodes ────────────────────────────────────────────────────────────

/// The three physical sensor nodes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum NodeId {
    Entry,
    Kitchen,
    Bedroom,
}

impl NodeId {
    pub fn api_node(self) -> Node {
        match self {
            Self::Entry => Node::Pi1,
            Self::Kitchen => Node::Pi2,
            Self::Bedroom => Node::Pi3,
        }
    }

    /// Field names this node reports. Anything else in a payload is ignored.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Entry => &[
                "door_button",
                "door_motion",
                "door_membrane",
                "door_distance",
                "door_light",
                "door_buzzer",
                "alarm_state",
            ],
            Self::Kitchen => &[
                "display4sd",
                "kitchen_button",
                "door_motion",
                "door_button",
                "door_distance",
                "kitchen_temp",
                "kitchen_hum",
                "gyroscope",
                "people_count",
            ],
            Self::Bedroom => &[
                "bedroom_temp",
                "bedroom_hum",
                "master_temp",
                "master_hum",
                "rgbled",
                "lcdmessage",
                "livingroom_motion",
                "bedroom_ir",
            ],
        }
    }
}

/// Latest readings of one node. Absent and `null` fields are not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    pub node: NodeId,
    pub fields: BTreeMap<&'static str, FieldValue>,
}

impl NodeState {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

impl FieldSource for NodeState {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_parse_case_insensitively() {
        assert_eq!("Kitchen".parse::<NodeId>().ok(), Some(NodeId::Kitchen));
        assert_eq!(NodeId::Bedroom.to_string(), "bedroom");
        assert_eq!(NodeId::Entry.api_node(), Node::Pi1);
    }

    #[test]
    fn alarm_state_exposes_bound_fields() {
        let state = AlarmState {
            active: None,
            people_count: Some(2),
        };
        assert_eq!(state.field("alarm_state"), None);
        assert_eq!(state.field("people_count"), Some(FieldValue::Number(2.0)));
    }
}
