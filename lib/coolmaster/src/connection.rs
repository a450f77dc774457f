use log::{debug, trace};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::{Error, Result};

/// The controller link used by [`HvacUnit`](crate::HvacUnit).
///
/// One request is in flight at a time; the trait imposes no locking of its
/// own. Readiness is the caller's concern: check [`is_connected`] before
/// dispatching commands.
///
/// [`is_connected`]: Connection::is_connected
#[allow(async_fn_in_trait)]
pub trait Connection {
    fn is_connected(&self) -> bool;

    /// Send one protocol line and return the response payload.
    async fn send_command(&mut self, command: &str) -> Result<String>;
}

/// ASCII line client for the controller's TCP port.
///
/// Commands are CRLF terminated. The controller echoes the command, prints
/// the response lines, and finishes with `OK` or `ERROR: n` before the next
/// `>` prompt. No retry and no timeout here; stalls and reconnects are the
/// caller's cadence to manage.
pub struct TcpConnection<S = TcpStream> {
    stream: BufReader<S>,
    connected: bool,
}

impl TcpConnection<TcpStream> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;

        debug!("connected controller");

        Ok(Self::with_stream(stream))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> TcpConnection<S> {
    fn with_stream(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
            connected: true,
        }
    }

    async fn exchange(&mut self, command: &str) -> Result<String> {
        trace!("sent {command}");

        self.stream.get_mut().write_all(command.as_bytes()).await?;
        self.stream.get_mut().write_all(b"\r\n").await?;

        let mut response = Vec::new();

        loop {
            let mut line = String::new();
            if self.stream.read_line(&mut line).await? == 0 {
                return Err(Error::Disconnected);
            }

            let line = line.trim().trim_start_matches('>').trim_start();

            trace!("received {line}");

            // prompt or echo of our own command
            if line.is_empty() || line == command {
                continue;
            }

            if line == "OK" {
                return Ok(response.join("\n"));
            }

            if line.starts_with("ERROR") {
                return Err(Error::Controller(line.to_string()));
            }

            response.push(line.to_string());
        }
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Connection for TcpConnection<S> {
    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn send_command(&mut self, command: &str) -> Result<String> {
        match self.exchange(command).await {
            Ok(response) => Ok(response),
            Err(err) => {
                // a controller-level ERROR reply leaves the link usable
                if !matches!(err, Error::Controller(_)) {
                    self.connected = false;
                }

                Err(err)
            }
        }
    }
}
