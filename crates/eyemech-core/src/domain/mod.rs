//! Domain rules for the EyeMech control panel.
//!
//! Nothing in here touches a serial port, a window, or a clock.  Timestamps
//! arrive inside events, so the same inputs always produce the same commands
//! and every rule can be tested in isolation.

/// Radar circle and the pixel → gaze mapping.
pub mod radar;

/// Drag session state machine and gesture handling.
pub mod interaction;
