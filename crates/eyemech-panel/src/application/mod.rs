//! Application layer use cases for the control panel.
//!
//! Use cases in this layer orchestrate domain objects from `eyemech_core`
//! and depend on the [`command_encoder::CommandSink`] abstraction rather than
//! on a concrete serial port.  They contain no OS calls and no I/O.
//!
//! - **`command_encoder`** – Turns gaze, lid and blink actions into protocol
//!   lines and hands them to a sink.
//!
//! - **`control_panel`** – Feeds pointer events through the radar state
//!   machine and dispatches the resulting commands.

pub mod command_encoder;
pub mod control_panel;
