//! Protocol module containing the host-to-device command set.
//!
//! The wire format is line-oriented ASCII with no acknowledgement channel:
//!
//! ```text
//! EYE <x> <y>      x,y with exactly two decimals, range [-50.00, 50.00]
//! LID <delta>      signed integer step count
//! BLINK            no arguments
//! ```

pub mod command;

pub use command::{EyeCommand, ProtocolError};
