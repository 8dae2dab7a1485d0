//! One-shot TCP client for the sandtimer display.
//!
//! Every command opens a fresh connection, writes the JSON payload and closes
//! the connection. Nothing is read back: delivery succeeds once the transport
//! has accepted every byte.

use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::types::{TimerCommand, TimerError, TimerResult};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 61420;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can deliver timer commands.
pub trait TimerService {
    fn send(&self, command: &TimerCommand) -> TimerResult<()>;

    fn start_timer(&self, label: &str, seconds: u32) -> TimerResult<()> {
        self.send(&TimerCommand::Start {
            label: label.to_string(),
            seconds,
        })
    }

    fn reset_timer(&self, label: &str) -> TimerResult<()> {
        self.send(&TimerCommand::Reset {
            label: label.to_string(),
        })
    }

    fn cancel_timer(&self, label: &str) -> TimerResult<()> {
        self.send(&TimerCommand::Cancel {
            label: label.to_string(),
        })
    }
}

/// TCP client for a sandtimer listening on `host:port`.
#[derive(Debug, Clone)]
pub struct TimerClient {
    host: String,
    port: u16,
    timeout: Duration,
}

impl Default for TimerClient {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT)
    }
}

impl TimerClient {
    /// A zero `timeout` disables the connect and write deadlines.
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn deliver(&self, addr: SocketAddr, payload: &[u8]) -> TimerResult<()> {
        let connected = if self.timeout.is_zero() {
            TcpStream::connect(addr)
        } else {
            TcpStream::connect_timeout(&addr, self.timeout)
        };
        let mut stream = connected.map_err(|source| TimerError::Connect { addr, source })?;

        let send_err = |source| TimerError::Send { addr, source };
        if !self.timeout.is_zero() {
            stream
                .set_write_timeout(Some(self.timeout))
                .map_err(send_err)?;
        }
        stream.write_all(payload).map_err(send_err)?;
        stream.flush().map_err(send_err)?;

        // The receiver reads until EOF; a failed half-close after a full
        // write does not lose data.
        if let Err(e) = stream.shutdown(Shutdown::Write) {
            tracing::debug!("Shutdown after send to {addr} failed: {e}");
        }
        Ok(())
    }
}

impl TimerService for TimerClient {
    fn send(&self, command: &TimerCommand) -> TimerResult<()> {
        let payload = command.to_value().dump()?;

        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| TimerError::Resolve {
                host: self.host.clone(),
                source,
            })?;

        let mut last_error = None;
        for addr in addrs {
            tracing::debug!(%addr, cmd = command.name(), label = command.label(), "sending timer command");
            match self.deliver(addr, payload.as_bytes()) {
                Ok(()) => {
                    tracing::info!(%addr, cmd = command.name(), label = command.label(), "timer command delivered");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("{e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| TimerError::NoAddresses {
            host: self.host.clone(),
        }))
    }
}
