//! Real serial ports via the `serialport` crate.

use std::time::Duration;

use tracing::debug;

use super::{ConnectionError, PortOpener, SerialLink};

/// Read timeout applied to every opened port.
const PORT_TIMEOUT: Duration = Duration::from_secs(1);

/// Opens ports on the host through the OS serial driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPortOpener;

impl PortOpener for SystemPortOpener {
    fn open(&self, port: &str, baud_rate: u32) -> Result<SerialLink, ConnectionError> {
        debug!("opening {port} at {baud_rate} baud");
        let handle = serialport::new(port, baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .flow_control(serialport::FlowControl::None)
            .timeout(PORT_TIMEOUT)
            .open()
            .map_err(|e| ConnectionError::Open {
                port: port.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(handle))
    }
}

/// Lists the serial ports present on this machine, in the order the OS
/// reports them.
///
/// # Errors
///
/// Returns [`ConnectionError::Enumerate`] if the OS query fails.
pub fn list_available_ports() -> Result<Vec<String>, ConnectionError> {
    let ports = serialport::available_ports().map_err(|e| ConnectionError::Enumerate(e.to_string()))?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
