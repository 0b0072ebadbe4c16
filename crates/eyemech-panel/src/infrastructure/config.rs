//! Runtime settings for the control panel.
//!
//! There is no configuration file: every value comes from the command line
//! and falls back to the defaults the EyeMech firmware was built against.
//!
//! | Setting         | Default | Meaning                                   |
//! |-----------------|---------|-------------------------------------------|
//! | `baud_rate`     | 9600    | serial line speed                         |
//! | `settle_delay`  | 2 s     | wait after opening a port                 |
//! | `send_interval` | 10 ms   | minimum gap between throttled gaze lines  |
//! | `canvas_size`   | 400 px  | side of the square radar canvas           |
//! | `margin`        | 20 px   | border between canvas edge and circle     |
//! | `log_level`     | `info`  | `tracing` filter when `RUST_LOG` is unset |

use std::time::Duration;

use eyemech_core::domain::interaction::DEFAULT_SEND_INTERVAL;
use eyemech_core::domain::radar::{DEFAULT_CANVAS_SIZE, DEFAULT_MARGIN};
use eyemech_core::{GeometryError, RadarGeometry, RadarSurface};
use thiserror::Error;

use super::serial::TransportSettings;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Error type for invalid runtime settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("baud rate must be positive")]
    ZeroBaudRate,

    #[error("invalid radar layout: {0}")]
    Geometry(#[from] GeometryError),

    #[error("unknown log level {0:?} (expected one of error, warn, info, debug, trace)")]
    UnknownLogLevel(String),
}

/// Validated-on-demand settings for one run of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub transport: TransportSettings,
    pub send_interval: Duration,
    pub canvas_size: i32,
    pub margin: i32,
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            transport: TransportSettings::default(),
            send_interval: DEFAULT_SEND_INTERVAL,
            canvas_size: DEFAULT_CANVAS_SIZE,
            margin: DEFAULT_MARGIN,
            log_level: "info".to_string(),
        }
    }
}

impl PanelConfig {
    /// Checks every setting, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.baud_rate == 0 {
            return Err(ConfigError::ZeroBaudRate);
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::UnknownLogLevel(self.log_level.clone()));
        }
        self.geometry()?;
        Ok(())
    }

    /// Radar geometry derived from the canvas settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] if the margin leaves no circle.
    pub fn geometry(&self) -> Result<RadarGeometry, ConfigError> {
        Ok(RadarGeometry::from_canvas(self.canvas_size, self.margin)?)
    }

    /// A fresh radar surface with this configuration's geometry and throttle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] if the margin leaves no circle.
    pub fn surface(&self) -> Result<RadarSurface, ConfigError> {
        Ok(RadarSurface::new(self.geometry()?, self.send_interval))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
