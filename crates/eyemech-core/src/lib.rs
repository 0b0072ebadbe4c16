//! # eyemech-core
//!
//! Shared library for the EyeMech control panel containing the serial command
//! protocol and the radar interaction logic.
//!
//! It has zero dependencies on OS APIs, UI frameworks, or serial ports, so
//! every rule here can be tested without hardware attached.
//!
//! # Architecture overview
//!
//! The EyeMech is an animatronic eye driven by a microcontroller.  The host
//! steers the gaze by sending short ASCII lines over a serial link.  The
//! operator points at a circular "radar"; the pointer position becomes a gaze
//! target in `[-50, 50]` on both axes.
//!
//! - **`protocol`** – The three newline-terminated commands (`EYE`, `LID`,
//!   `BLINK`), how they are rendered to text and parsed back.
//!
//! - **`domain`** – Pure interaction rules: the radar geometry and its
//!   coordinate mapping, plus the drag state machine that throttles gaze
//!   updates and turns wheel and right-click gestures into commands.

pub mod domain;
pub mod protocol;

pub use domain::interaction::{PointerEvent, RadarState, RadarSurface, WheelGesture};
pub use domain::radar::{GazePoint, GeometryError, PixelPoint, RadarGeometry, GAZE_LIMIT};
pub use protocol::command::{EyeCommand, ProtocolError};
