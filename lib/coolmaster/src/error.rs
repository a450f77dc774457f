use std::fmt;

use crate::Channel;

#[derive(Debug)]
pub enum Error {
    Disconnected,
    Io(std::io::Error),
    Controller(String),
    MalformedDecimal { channel: Channel, value: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Controller(reply) => write!(f, "controller error: {reply}"),
            Self::MalformedDecimal { channel, value } => {
                write!(f, "malformed decimal '{value}' on channel {channel}")
            }
        }
    }
}

impl std::error::Error for Error {}
