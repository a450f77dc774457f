//! Translation between typed unit commands and CoolMasterNet protocol lines.

use crate::{Channel, Command, Error, StateValue};

/// Build the protocol line for `command` on `channel` of unit `uid`.
///
/// Returns `None` when the combination has no protocol command: a write to
/// the read-only current temperature channel, a value variant the channel
/// does not accept, or a refresh request (which is served by queries, not by
/// a command).
pub fn encode(channel: Channel, command: &Command, uid: &str) -> Option<String> {
    match (channel, command) {
        (Channel::Power, Command::Switch(true)) => Some(format!("on {uid}")),
        (Channel::Power, Command::Switch(false)) => Some(format!("off {uid}")),
        (Channel::SetTemperature, Command::Decimal(value)) => Some(format!("temp {uid} {value}")),
        // the mode token is the protocol verb itself; unknown tokens are
        // forwarded as-is and rejected by the controller
        (Channel::Mode, Command::Symbol(token)) => Some(format!("{token} {uid}")),
        (Channel::FanSpeed, Command::Symbol(token)) => Some(format!("fspeed {uid} {token}")),
        (Channel::LouvrePosition, Command::Symbol(token)) => Some(format!("swing {uid} {token}")),
        _ => None,
    }
}

/// Build the query line for one channel of unit `uid`.
pub fn query(uid: &str, channel: Channel) -> String {
    format!("query {uid} {}", channel.query_char())
}

/// Decode a raw query response for `channel` into a typed value.
///
/// `Ok(None)` means the reading has no mapping (an ordinal outside the
/// tables); a refresh treats it the same as a missing response. A garbled
/// temperature is the one distinct error, so it can be told apart from
/// transport trouble in the logs.
pub fn decode(channel: Channel, raw: &str) -> Result<Option<StateValue>, Error> {
    let value = match channel {
        Channel::Power => Some(StateValue::Switch(raw == "1")),
        Channel::CurrentTemperature | Channel::SetTemperature => match raw.parse::<f64>() {
            Ok(value) => Some(StateValue::Decimal(value)),
            Err(_) => {
                return Err(Error::MalformedDecimal {
                    channel,
                    value: raw.to_string(),
                })
            }
        },
        Channel::Mode => mode_for_ordinal(raw).map(|token| StateValue::Symbol(token.to_string())),
        Channel::LouvrePosition => Some(StateValue::Symbol(raw.to_string())),
        Channel::FanSpeed => {
            fan_for_ordinal(raw).map(|token| StateValue::Symbol(token.to_string()))
        }
    };

    Ok(value)
}

/// The query command reports the operation mode as a digit, but no digit is a
/// token the mode command accepts, so readings go through this table.
pub fn mode_for_ordinal(ordinal: &str) -> Option<&'static str> {
    match ordinal {
        "0" => Some("cool"),
        "1" => Some("heat"),
        "2" => Some("auto"),
        "3" => Some("dry"),
        // 4 is aux heat, which has no settable command of its own
        "4" => Some("heat"),
        "5" => Some("fan"),
        _ => None,
    }
}

/// The query command reports the fan speed as a digit, while the `fspeed`
/// command takes single-letter abbreviations.
pub fn fan_for_ordinal(ordinal: &str) -> Option<&'static str> {
    match ordinal {
        "0" => Some("l"), // low
        "1" => Some("m"), // medium
        "2" => Some("h"), // high
        "3" => Some("a"), // auto
        "4" => Some("t"), // top
        _ => None,
    }
}
