use serde::{Deserialize, Serialize};

use crate::Channel;

/// A command for one channel of an HVAC unit.
///
/// The variant carries the value; whether it applies to a channel is decided
/// by the encoder. Dispatchers hand every command to every channel, so a
/// mismatched variant is ignored rather than rejected.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Switch(bool),
    Decimal(f64),
    Symbol(String),
    Refresh,
}

/// A decoded channel reading.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StateValue {
    Switch(bool),
    Decimal(f64),
    Symbol(String),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct StateUpdate {
    pub channel: Channel,
    pub value: StateValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_json_shape() {
        let update = StateUpdate {
            channel: Channel::FanSpeed,
            value: StateValue::Symbol("h".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"channel": "fan_speed", "value": {"symbol": "h"}})
        );
    }
}
