mod channel;
pub use channel::Channel;

mod command;
pub use command::{Command, StateUpdate, StateValue};

mod connection;
pub use connection::{Connection, TcpConnection};

mod error;
pub use error::Error;

pub mod protocol;

mod unit;
pub use unit::HvacUnit;

pub type Result<T> = std::result::Result<T, Error>;
