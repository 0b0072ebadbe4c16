//! In-memory port opener for testing.
//!
//! Allows tests to observe every byte written to the link, plus the order in
//! which links were opened and closed, without a serial device attached.

use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::{ConnectionError, PortOpener, SerialLink};

/// Something that happened to a link handed out by [`MemoryPortOpener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Opened(String),
    Closed(String),
}

#[derive(Default)]
struct Shared {
    written: Vec<u8>,
    events: Vec<LinkEvent>,
    failing_ports: HashSet<String>,
    fail_writes: bool,
}

/// A [`PortOpener`] whose links write into a shared buffer.
///
/// Clones share state, so a test can keep one handle while the transport
/// owns another.
#[derive(Clone, Default)]
pub struct MemoryPortOpener {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryPortOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every future `open` of `port` fail as if the device were busy.
    pub fn fail_port(&self, port: &str) {
        self.lock().failing_ports.insert(port.to_string());
    }

    /// Makes every write on every link fail.
    pub fn fail_writes(&self) {
        self.lock().fail_writes = true;
    }

    /// All bytes written so far, across all links.
    pub fn written(&self) -> Vec<u8> {
        self.lock().written.clone()
    }

    /// Written bytes split into lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.lock().written)
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn events(&self) -> Vec<LinkEvent> {
        self.lock().events.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared.lock().expect("lock poisoned")
    }
}

impl PortOpener for MemoryPortOpener {
    fn open(&self, port: &str, _baud_rate: u32) -> Result<SerialLink, ConnectionError> {
        let mut shared = self.lock();
        if shared.failing_ports.contains(port) {
            return Err(ConnectionError::Open {
                port: port.to_string(),
                reason: "Device or resource busy".to_string(),
            });
        }
        shared.events.push(LinkEvent::Opened(port.to_string()));
        Ok(Box::new(MemoryLink {
            port: port.to_string(),
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct MemoryLink {
    port: String,
    shared: Arc<Mutex<Shared>>,
}

impl Write for MemoryLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut shared = self.shared.lock().expect("lock poisoned");
        if shared.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "link unplugged"));
        }
        shared.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MemoryLink {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.lock() {
            shared.events.push(LinkEvent::Closed(self.port.clone()));
        }
    }
}
