// ── Response decoder ──
//
// One function per response shape. A payload with the wrong overall shape
// is a `DecodeError`; a single malformed field inside a good payload is just
// `None`, so one bad sensor never blanks a whole panel.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{
    ActionResult, AlarmEvent, AlarmState, FieldValue, NodeId, NodeState, SeriesPoint, Timestamp,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected {expected}, got {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expect_object<'a>(value: &'a Value) -> Result<&'a Map<String, Value>, DecodeError> {
    value.as_object().ok_or(DecodeError::Shape {
        expected: "object",
        found: kind_of(value),
    })
}

/// `null` is an empty feed; anything else must be an array. Non-object
/// entries are skipped.
fn expect_records(value: &Value) -> Result<Vec<&Map<String, Value>>, DecodeError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.iter().filter_map(Value::as_object).collect()),
        other => Err(DecodeError::Shape {
            expected: "array",
            found: kind_of(other),
        }),
    }
}

fn field(obj: &Map<String, Value>, name: &str) -> FieldValue {
    obj.get(name).map_or(FieldValue::Null, FieldValue::from)
}

// ── Shapes ───────────────────────────────────────────────────────────

/// `{alarm_state, people_count}`
pub fn decode_alarm_state(value: &Value) -> Result<AlarmState, DecodeError> {
    let obj = expect_object(value)?;
    let active = match field(obj, "alarm_state") {
        FieldValue::Null => None,
        other => Some(other.truthy()),
    };
    let people_count = field(obj, "people_count").as_integer();
    Ok(AlarmState {
        active,
        people_count,
    })
}

/// `[{time, value}, ...]`, oldest first. Order is preserved.
pub fn decode_series(value: &Value) -> Result<Vec<SeriesPoint>, DecodeError> {
    Ok(expect_records(value)?
        .into_iter()
        .map(|obj| SeriesPoint {
            time: Timestamp::from_json(obj.get("time")),
            value: field(obj, "value"),
        })
        .collect())
}

/// Reporting node: `node_id`, else the older `pi_id` key. Falsy means unknown.
fn event_node(obj: &Map<String, Value>) -> Option<String> {
    ["node_id", "pi_id"]
        .into_iter()
        .map(|key| field(obj, key))
        .find(FieldValue::truthy)
        .as_ref()
        .map(ToString::to_string)
}

/// `[{time, node_id | pi_id, measurement, field, value}, ...]`, newest first.
pub fn decode_events(value: &Value) -> Result<Vec<AlarmEvent>, DecodeError> {
    Ok(expect_records(value)?
        .into_iter()
        .map(|obj| AlarmEvent {
            time: Timestamp::from_json(obj.get("time")),
            node_id: event_node(obj),
            measurement: field(obj, "measurement"),
            field: field(obj, "field"),
            value: field(obj, "value"),
        })
        .collect())
}

/// Keeps only the fields `node` is known to report.
pub fn decode_node_state(node: NodeId, value: &Value) -> Result<NodeState, DecodeError> {
    let obj = expect_object(value)?;
    let mut state = NodeState::new(node);
    for &name in node.fields() {
        let v = field(obj, name);
        if !v.is_null() {
            state.fields.insert(name, v);
        }
    }
    Ok(state)
}

/// `{success, message?}`
pub fn decode_action_result(value: &Value) -> Result<ActionResult, DecodeError> {
    let obj = expect_object(value)?;
    let message = obj
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned);
    Ok(ActionResult {
        success: field(obj, "success").truthy(),
        message,
    })
}
