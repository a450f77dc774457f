use log::{debug, error};

use crate::{protocol, Channel, Command, Connection, StateUpdate, StateValue};

/// One addressable unit on the controller bus.
///
/// Holds the unit UID for the session and the connection handle. Writes are
/// fire and forget: transport trouble is logged here and the next refresh
/// cycle picks the state back up.
pub struct HvacUnit<C> {
    uid: String,
    connection: C,
}

impl<C: Connection> HvacUnit<C> {
    pub fn new<U: Into<String>>(uid: U, connection: C) -> Self {
        Self {
            uid: uid.into(),
            connection,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Dispatch one command to `channel`.
    ///
    /// Combinations without a protocol command are ignored; a refresh request
    /// runs the full query cycle and returns its updates.
    pub async fn handle_command(
        &mut self,
        channel: Channel,
        command: &Command,
    ) -> Vec<StateUpdate> {
        if let Command::Refresh = command {
            return self.refresh().await;
        }

        if let Some(line) = protocol::encode(channel, command, &self.uid) {
            if let Err(err) = self.connection.send_command(&line).await {
                error!("failed to set {} -> {:?}: {}", channel, command, err);
            }
        } else {
            debug!("ignored {:?} for channel {}", command, channel);
        }

        Vec::new()
    }

    /// Query every channel of the unit once.
    ///
    /// Channels whose query fails or decodes to nothing are left out; one bad
    /// reading never blocks the rest of the cycle.
    pub async fn refresh(&mut self) -> Vec<StateUpdate> {
        let mut updates = Vec::with_capacity(Channel::ALL.len());

        for channel in Channel::ALL {
            if let Some(value) = self.query(channel).await {
                updates.push(StateUpdate { channel, value });
            }
        }

        updates
    }

    async fn query(&mut self, channel: Channel) -> Option<StateValue> {
        let command = protocol::query(&self.uid, channel);

        let raw = match self.connection.send_command(&command).await {
            Ok(raw) => raw,
            Err(err) => {
                error!("query '{}' failed: {}", command, err);
                return None;
            }
        };

        if raw.is_empty() {
            return None;
        }

        match protocol::decode(channel, &raw) {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                debug!("no mapping for '{}' on channel {}", raw, channel);
                None
            }
            Err(err) => {
                error!("dropped reading: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::Error;

    #[derive(Default)]
    struct FakeConnection {
        responses: HashMap<&'static str, &'static str>,
        failing: Vec<&'static str>,
        sent: Vec<String>,
    }

    impl Connection for FakeConnection {
        fn is_connected(&self) -> bool {
            true
        }

        async fn send_command(&mut self, command: &str) -> crate::Result<String> {
            self.sent.push(command.to_string());

            if self.failing.iter().any(|failing| *failing == command) {
                return Err(Error::Disconnected);
            }

            let response = self.responses.get(command).copied().unwrap_or_default();
            Ok(response.to_string())
        }
    }

    fn healthy_connection() -> FakeConnection {
        FakeConnection {
            responses: HashMap::from([
                ("query L1.100 o", "1"),
                ("query L1.100 a", "24.5"),
                ("query L1.100 t", "23"),
                ("query L1.100 m", "0"),
                ("query L1.100 s", "a"),
                ("query L1.100 f", "2"),
            ]),
            ..Default::default()
        }
    }

    fn channels(updates: &[StateUpdate]) -> Vec<Channel> {
        updates.iter().map(|update| update.channel).collect()
    }

    #[tokio::test]
    async fn test_refresh_decodes_every_channel() {
        let mut unit = HvacUnit::new("L1.100", healthy_connection());

        let updates = unit.refresh().await;

        assert_eq!(
            updates,
            vec![
                StateUpdate {
                    channel: Channel::Power,
                    value: StateValue::Switch(true),
                },
                StateUpdate {
                    channel: Channel::CurrentTemperature,
                    value: StateValue::Decimal(24.5),
                },
                StateUpdate {
                    channel: Channel::SetTemperature,
                    value: StateValue::Decimal(23.0),
                },
                StateUpdate {
                    channel: Channel::Mode,
                    value: StateValue::Symbol("cool".to_string()),
                },
                StateUpdate {
                    channel: Channel::LouvrePosition,
                    value: StateValue::Symbol("a".to_string()),
                },
                StateUpdate {
                    channel: Channel::FanSpeed,
                    value: StateValue::Symbol("h".to_string()),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_refresh_survives_failed_query() {
        let mut connection = healthy_connection();
        connection.failing = vec!["query L1.100 a"];

        let mut unit = HvacUnit::new("L1.100", connection);
        let updates = unit.refresh().await;

        assert_eq!(
            channels(&updates),
            vec![
                Channel::Power,
                Channel::SetTemperature,
                Channel::Mode,
                Channel::LouvrePosition,
                Channel::FanSpeed,
            ]
        );
    }

    #[tokio::test]
    async fn test_refresh_skips_unmapped_mode_ordinal() {
        let mut connection = healthy_connection();
        connection.responses.insert("query L1.100 m", "9");

        let mut unit = HvacUnit::new("L1.100", connection);
        let updates = unit.refresh().await;

        assert!(!channels(&updates).contains(&Channel::Mode));
        assert_eq!(updates.len(), 5);
    }

    #[tokio::test]
    async fn test_refresh_skips_malformed_decimal() {
        let mut connection = healthy_connection();
        connection.responses.insert("query L1.100 a", "2x.5");

        let mut unit = HvacUnit::new("L1.100", connection);
        let updates = unit.refresh().await;

        assert!(!channels(&updates).contains(&Channel::CurrentTemperature));
        assert_eq!(updates.len(), 5);
    }

    #[tokio::test]
    async fn test_refresh_skips_empty_response() {
        let mut connection = healthy_connection();
        connection.responses.remove("query L1.100 s");

        let mut unit = HvacUnit::new("L1.100", connection);
        let updates = unit.refresh().await;

        assert!(!channels(&updates).contains(&Channel::LouvrePosition));
        assert_eq!(updates.len(), 5);
    }

    #[tokio::test]
    async fn test_refresh_reads_power_off() {
        let mut connection = healthy_connection();
        connection.responses.insert("query L1.100 o", "0");

        let mut unit = HvacUnit::new("L1.100", connection);
        let updates = unit.refresh().await;

        assert_eq!(
            updates[0],
            StateUpdate {
                channel: Channel::Power,
                value: StateValue::Switch(false),
            }
        );
    }

    #[tokio::test]
    async fn test_handle_command_sends_protocol_line() {
        let mut unit = HvacUnit::new("L1.100", FakeConnection::default());

        let updates = unit
            .handle_command(Channel::Power, &Command::Switch(true))
            .await;

        assert!(updates.is_empty());
        assert_eq!(unit.connection().sent, vec!["on L1.100"]);
    }

    #[tokio::test]
    async fn test_handle_command_ignores_mismatches() {
        let mut unit = HvacUnit::new("L1.100", FakeConnection::default());

        unit.handle_command(Channel::Power, &Command::Symbol("on".to_string()))
            .await;
        unit.handle_command(Channel::Mode, &Command::Switch(true))
            .await;
        unit.handle_command(Channel::CurrentTemperature, &Command::Decimal(20.0))
            .await;

        assert!(unit.connection().sent.is_empty());
    }

    #[tokio::test]
    async fn test_handle_command_swallows_transport_failure() {
        let connection = FakeConnection {
            failing: vec!["off L1.100"],
            ..Default::default()
        };

        let mut unit = HvacUnit::new("L1.100", connection);
        let updates = unit
            .handle_command(Channel::Power, &Command::Switch(false))
            .await;

        assert!(updates.is_empty());
        assert_eq!(unit.connection().sent, vec!["off L1.100"]);
    }

    #[tokio::test]
    async fn test_refresh_request_runs_query_cycle() {
        let mut unit = HvacUnit::new("L1.100", healthy_connection());

        let updates = unit.handle_command(Channel::Power, &Command::Refresh).await;

        assert_eq!(updates.len(), 6);
    }

    #[tokio::test]
    async fn test_decoded_mode_reencodes_to_same_verb() {
        let mut unit = HvacUnit::new("L1.100", healthy_connection());

        let updates = unit.refresh().await;
        let mode = updates
            .iter()
            .find(|update| update.channel == Channel::Mode)
            .unwrap();

        let token = match &mode.value {
            StateValue::Symbol(token) => token.clone(),
            value => panic!("unexpected value: {value:?}"),
        };

        unit.handle_command(Channel::Mode, &Command::Symbol(token))
            .await;

        assert_eq!(unit.connection().sent.last().unwrap(), "cool L1.100");
    }
}
