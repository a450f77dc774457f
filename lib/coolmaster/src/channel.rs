use std::fmt;

use serde::{Deserialize, Serialize};

/// One controllable or observable property of an HVAC unit.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Power,
    SetTemperature,
    CurrentTemperature,
    Mode,
    FanSpeed,
    LouvrePosition,
}

impl Channel {
    /// Channels in the order a refresh cycle queries them.
    pub const ALL: [Channel; 6] = [
        Channel::Power,
        Channel::CurrentTemperature,
        Channel::SetTemperature,
        Channel::Mode,
        Channel::LouvrePosition,
        Channel::FanSpeed,
    ];

    /// The character the `query` protocol command uses for this channel.
    pub fn query_char(&self) -> char {
        match self {
            Channel::Power => 'o',
            Channel::CurrentTemperature => 'a',
            Channel::SetTemperature => 't',
            Channel::Mode => 'm',
            Channel::LouvrePosition => 's',
            Channel::FanSpeed => 'f',
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Channel::CurrentTemperature)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Power => f.write_str("power"),
            Channel::SetTemperature => f.write_str("set_temperature"),
            Channel::CurrentTemperature => f.write_str("current_temperature"),
            Channel::Mode => f.write_str("mode"),
            Channel::FanSpeed => f.write_str("fan_speed"),
            Channel::LouvrePosition => f.write_str("louvre_position"),
        }
    }
}
