// Field binding tables, one per panel.

use crate::model::NodeId;

use super::field::{FieldBinding, Formatter};

const CELSIUS: Formatter = Formatter::NumericUnit { unit: "°C" };
const PERCENT: Formatter = Formatter::NumericUnit { unit: "%" };
const CENTIMETRES: Formatter = Formatter::NumericUnit { unit: "cm" };
const MOTION: Formatter = Formatter::BoolHighlight {
    on: "MOTION",
    off: "NO MOTION",
};
const PRESSED: Formatter = Formatter::BoolLabel {
    on: "Pressed",
    off: "Not pressed",
};

pub const ALARM: &[FieldBinding] = &[
    FieldBinding::new(
        "alarm_state",
        "Alarm",
        Formatter::TriStateHighlight {
            on: "ALARM",
            off: "NORMAL",
            unknown: "UNKNOWN",
        },
    ),
    FieldBinding::new("people_count", "People inside", Formatter::Count),
];

pub const ENTRY: &[FieldBinding] = &[
    FieldBinding::new("door_button", "Door button", PRESSED),
    FieldBinding::new(
        "door_motion",
        "Door motion",
        Formatter::BoolLabel {
            on: "Motion",
            off: "No motion",
        },
    ),
    FieldBinding::new("door_membrane", "Membrane switch", PRESSED),
    FieldBinding::new("door_distance", "Door distance", CENTIMETRES),
    FieldBinding::new(
        "door_light",
        "Door light",
        Formatter::BoolLabel { on: "ON", off: "OFF" },
    ),
    FieldBinding::new(
        "door_buzzer",
        "Door buzzer",
        Formatter::BoolLabel {
            on: "ACTIVE",
            off: "SILENT",
        },
    ),
    FieldBinding::new(
        "alarm_state",
        "Alarm",
        Formatter::BoolLabel {
            on: "ALARM",
            off: "NORMAL",
        },
    ),
];

pub const KITCHEN: &[FieldBinding] = &[
    FieldBinding::new("display4sd", "Stopwatch display", Formatter::Trimmed),
    FieldBinding::new(
        "kitchen_button",
        "Kitchen button",
        Formatter::BoolLabel {
            on: "PRESSED",
            off: "IDLE",
        },
    ),
    FieldBinding::new("door_motion", "Door motion", MOTION),
    FieldBinding::new(
        "door_button",
        "Door",
        Formatter::BoolLabel {
            on: "OPEN",
            off: "CLOSED",
        },
    ),
    FieldBinding::new("door_distance", "Door distance", CENTIMETRES),
    FieldBinding::new("kitchen_temp", "Temperature", CELSIUS),
    FieldBinding::new("kitchen_hum", "Humidity", PERCENT),
    FieldBinding::new("gyroscope", "Gyroscope", Formatter::Passthrough),
    FieldBinding::new("people_count", "People inside", Formatter::Count),
];

pub const BEDROOM: &[FieldBinding] = &[
    FieldBinding::new("bedroom_temp", "Bedroom temperature", CELSIUS),
    FieldBinding::new("bedroom_hum", "Bedroom humidity", PERCENT),
    FieldBinding::new("master_temp", "Master bedroom temperature", CELSIUS),
    FieldBinding::new("master_hum", "Master bedroom humidity", PERCENT),
    FieldBinding::new("rgbled", "RGB LED", Formatter::Passthrough),
    FieldBinding::new("lcdmessage", "LCD message", Formatter::Passthrough),
    FieldBinding::new("livingroom_motion", "Living room motion", MOTION),
];

pub fn for_node(node: NodeId) -> &'static [FieldBinding] {
    match node {
        NodeId::Entry => ENTRY,
        NodeId::Kitchen => KITCHEN,
        NodeId::Bedroom => BEDROOM,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::decode::decode_node_state;
    use crate::render::{PLACEHOLDER, render_fields};
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn every_binding_reads_a_reported_field() {
        for node in NodeId::iter() {
            for binding in for_node(node) {
                assert!(
                    node.fields().contains(&binding.field),
                    "{node} binds unknown field {}",
                    binding.field
                );
            }
        }
    }

    #[test]
    fn kitchen_with_partial_payload() {
        let state = decode_node_state(
            NodeId::Kitchen,
            &json!({ "kitchen_temp": 21.46, "door_motion": 1 }),
        )
        .unwrap();
        let fields = render_fields(KITCHEN, &state);
        let text = |name: &str| {
            fields
                .iter()
                .find(|f| f.field == name)
                .map(|f| f.text.clone())
                .unwrap()
        };

        assert_eq!(text("kitchen_temp"), "21.5 °C");
        assert_eq!(text("kitchen_hum"), PLACEHOLDER);
        assert_eq!(text("door_motion"), "MOTION");
        assert_eq!(text("door_button"), "CLOSED");
        assert_eq!(text("people_count"), PLACEHOLDER);
    }

    #[test]
    fn only_the_stopwatch_display_is_trimmed() {
        let text = |node: NodeId, payload: serde_json::Value| {
            let state = decode_node_state(node, &payload).unwrap();
            render_fields(for_node(node), &state)
                .into_iter()
                .find(|f| f.field == "lcdmessage" || f.field == "display4sd")
                .map(|f| f.text)
                .unwrap()
        };

        assert_eq!(
            text(NodeId::Bedroom, json!({ "lcdmessage": " hi " })),
            " hi "
        );
        assert_eq!(
            text(NodeId::Kitchen, json!({ "display4sd": " 00:42 " })),
            "00:42"
        );
    }
}
