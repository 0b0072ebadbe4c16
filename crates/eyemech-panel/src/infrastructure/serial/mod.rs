//! Serial infrastructure for the control panel.
//!
//! The link to the microcontroller is write-only: commands go out, nothing is
//! ever read back.  Opening a port is abstracted behind [`PortOpener`] so the
//! transport can be tested with an in-memory link instead of real hardware.
//!
//! - [`transport::SerialTransport`] owns the single live connection.
//! - [`system::SystemPortOpener`] opens real ports through `serialport`.
//! - [`mock::MemoryPortOpener`] records writes for tests.

use std::fmt;
use std::io::Write;

use thiserror::Error;

pub mod mock;
pub mod system;
pub mod transport;

pub use system::{list_available_ports, SystemPortOpener};
pub use transport::{SerialTransport, TransportSettings};

/// Baud rate the EyeMech firmware listens at.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// The only runtime failure in the panel: a port could not be used.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// No port identifier was supplied.
    #[error("no serial port selected")]
    NoPortSelected,

    /// The port is busy, missing, or not accessible.
    #[error("failed to open {port}: {reason}")]
    Open { port: String, reason: String },

    /// The OS could not list serial ports.
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(String),
}

/// Description of a successfully opened connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub port: String,
    pub baud_rate: u32,
}

impl fmt::Display for ConnectionInfo {
    /// Renders as `port@baud`, e.g. `/dev/ttyACM0@9600`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.port, self.baud_rate)
    }
}

/// Write half of an open serial link.  Dropping it closes the port.
pub type SerialLink = Box<dyn Write + Send>;

/// Opens serial links by port identifier.
#[cfg_attr(test, mockall::automock)]
pub trait PortOpener {
    /// Opens `port` at `baud_rate`.
    fn open(&self, port: &str, baud_rate: u32) -> Result<SerialLink, ConnectionError>;
}
