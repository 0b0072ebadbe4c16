//! SerialTransport: owns the one live connection to the EyeMech controller.
//!
//! Connecting always closes the previous link first, so at most one port is
//! open at a time.  Sending is best effort: without a connection it does
//! nothing, and a failed write is logged and forgotten.

use std::io::Write;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{ConnectionError, ConnectionInfo, PortOpener, SerialLink, DEFAULT_BAUD_RATE};
use crate::application::command_encoder::CommandSink;

/// Wait after opening a port for boards that reset when the line opens.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Line terminator appended to every command.
const LINE_TERMINATOR: u8 = b'\n';

/// Fixed link parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSettings {
    pub baud_rate: u32,
    /// Blocking wait after a successful open, before the link is declared ready.
    pub settle_delay: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

struct OpenLink {
    info: ConnectionInfo,
    writer: SerialLink,
}

/// Write-only serial transport.
pub struct SerialTransport<O: PortOpener> {
    opener: O,
    settings: TransportSettings,
    link: Option<OpenLink>,
}

impl<O: PortOpener> SerialTransport<O> {
    pub fn new(opener: O, settings: TransportSettings) -> Self {
        Self {
            opener,
            settings,
            link: None,
        }
    }

    /// Opens `port`, replacing any existing connection.
    ///
    /// The previous link is closed before the new one is attempted, then the
    /// calling thread blocks for the settle delay.  An empty identifier is
    /// rejected up front and leaves the current link untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] if the port cannot be opened.  The transport
    /// is left disconnected in that case.
    pub fn connect(&mut self, port: &str) -> Result<ConnectionInfo, ConnectionError> {
        if port.trim().is_empty() {
            return Err(ConnectionError::NoPortSelected);
        }

        self.disconnect();

        let writer = self.opener.open(port, self.settings.baud_rate)?;

        if !self.settings.settle_delay.is_zero() {
            debug!("waiting {:?} for {port} to settle", self.settings.settle_delay);
            thread::sleep(self.settings.settle_delay);
        }

        let info = ConnectionInfo {
            port: port.to_string(),
            baud_rate: self.settings.baud_rate,
        };
        info!("connected: {info}");
        self.link = Some(OpenLink {
            info: info.clone(),
            writer,
        });
        Ok(info)
    }

    /// Closes the current link, if any.
    pub fn disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            info!("closing {}", link.info);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn connection(&self) -> Option<&ConnectionInfo> {
        self.link.as_ref().map(|l| &l.info)
    }

    /// Writes `line` plus a newline if connected; otherwise does nothing.
    pub fn send(&mut self, line: &str) {
        debug!("→ {line}");
        let Some(link) = self.link.as_mut() else {
            return;
        };

        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(LINE_TERMINATOR);

        if let Err(e) = link.writer.write_all(&bytes).and_then(|()| link.writer.flush()) {
            warn!("write to {} failed: {e}", link.info);
        }
    }
}

impl<O: PortOpener> CommandSink for SerialTransport<O> {
    fn send_line(&mut self, line: &str) {
        self.send(line);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::serial::mock::{LinkEvent, MemoryPortOpener};
    use crate::infrastructure::serial::MockPortOpener;

    fn instant() -> TransportSettings {
        TransportSettings {
            baud_rate: DEFAULT_BAUD_RATE,
            settle_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_connect_failure_leaves_transport_closed() {
        // Arrange
        let mut opener = MockPortOpener::new();
        opener.expect_open().times(1).returning(|port, baud| {
            assert_eq!(baud, 9600);
            Err(ConnectionError::Open {
                port: port.to_string(),
                reason: "Permission denied".to_string(),
            })
        });
        let mut transport = SerialTransport::new(opener, instant());

        // Act
        let result = transport.connect("/dev/ttyACM0");

        // Assert
        let err = result.expect_err("open failure must surface");
        assert_eq!(err.to_string(), "failed to open /dev/ttyACM0: Permission denied");
        assert!(!transport.is_connected());
        assert!(transport.connection().is_none());
    }

    #[test]
    fn test_empty_port_is_rejected_without_opening() {
        let mut opener = MockPortOpener::new();
        opener.expect_open().times(0);
        let mut transport = SerialTransport::new(opener, instant());

        let result = transport.connect("  ");

        assert!(matches!(result, Err(ConnectionError::NoPortSelected)));
    }

    #[test]
    fn test_connect_reports_port_at_baud() {
        let opener = MemoryPortOpener::new();
        let mut transport = SerialTransport::new(opener, instant());

        let info = transport.connect("COM3").expect("connect should succeed");

        assert_eq!(info.to_string(), "COM3@9600");
        assert!(transport.is_connected());
    }

    #[test]
    fn test_send_while_disconnected_is_silent_noop() {
        let opener = MemoryPortOpener::new();
        let mut transport = SerialTransport::new(opener.clone(), instant());

        transport.send("BLINK");

        assert!(opener.written().is_empty());
        assert!(opener.events().is_empty());
    }

    #[test]
    fn test_send_appends_newline() {
        let opener = MemoryPortOpener::new();
        let mut transport = SerialTransport::new(opener.clone(), instant());
        transport.connect("COM3").unwrap();

        transport.send("EYE 0.00 50.00");
        transport.send_line("BLINK");

        assert_eq!(opener.written(), b"EYE 0.00 50.00\nBLINK\n");
    }

    #[test]
    fn test_reconnect_closes_previous_link_first() {
        // Arrange
        let opener = MemoryPortOpener::new();
        let mut transport = SerialTransport::new(opener.clone(), instant());
        transport.connect("COM3").unwrap();

        // Act
        transport.connect("COM4").unwrap();

        // Assert
        assert_eq!(
            opener.events(),
            vec![
                LinkEvent::Opened("COM3".to_string()),
                LinkEvent::Closed("COM3".to_string()),
                LinkEvent::Opened("COM4".to_string()),
            ]
        );
        assert_eq!(transport.connection().map(|c| c.port.as_str()), Some("COM4"));
    }

    #[test]
    fn test_failed_reconnect_drops_previous_link() {
        let opener = MemoryPortOpener::new();
        opener.fail_port("COM9");
        let mut transport = SerialTransport::new(opener.clone(), instant());
        transport.connect("COM3").unwrap();

        assert!(transport.connect("COM9").is_err());

        assert!(!transport.is_connected());
        transport.send("BLINK");
        assert!(opener.written().is_empty());
    }

    #[test]
    fn test_write_error_is_swallowed() {
        let opener = MemoryPortOpener::new();
        opener.fail_writes();
        let mut transport = SerialTransport::new(opener.clone(), instant());
        transport.connect("COM3").unwrap();

        transport.send("LID 1");

        assert!(transport.is_connected());
    }

    #[test]
    fn test_settle_delay_blocks_connect() {
        let opener = MemoryPortOpener::new();
        let settings = TransportSettings {
            baud_rate: 9600,
            settle_delay: Duration::from_millis(30),
        };
        let mut transport = SerialTransport::new(opener, settings);

        let started = std::time::Instant::now();
        transport.connect("COM3").unwrap();

        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
