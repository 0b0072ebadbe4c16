//! EyeMech command encoder: turns semantic actions into protocol lines.
//!
//! The encoder depends only on the [`CommandSink`] trait, so the serial
//! transport can be swapped for a recording sink in tests.

use eyemech_core::EyeCommand;

/// Destination for encoded command lines.
///
/// Sending is fire-and-forget: implementations never report failure back to
/// the caller, matching a protocol that has no acknowledgement channel.
pub trait CommandSink {
    /// Delivers one line.  The line carries no terminator.
    fn send_line(&mut self, line: &str);
}

/// Encodes gaze, lid and blink actions and forwards each as exactly one line.
pub struct EyeMech<S: CommandSink> {
    sink: S,
}

impl<S: CommandSink> EyeMech<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Sends `EYE <x> <y>` with two decimals per coordinate.
    pub fn move_eye(&mut self, x: f64, y: f64) {
        self.send(EyeCommand::Eye { x, y });
    }

    /// Sends `LID <delta>`.
    pub fn control_lid(&mut self, delta: i32) {
        self.send(EyeCommand::Lid(delta));
    }

    /// Sends `BLINK`.
    pub fn blink(&mut self) {
        self.send(EyeCommand::Blink);
    }

    pub fn send(&mut self, command: EyeCommand) {
        self.sink.send_line(&command.encode());
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
