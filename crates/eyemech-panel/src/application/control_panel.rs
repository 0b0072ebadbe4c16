//! ControlPanelUseCase: routes pointer events on the radar to the eye mechanism.
//!
//! Pointer events are fed through the [`RadarSurface`] state machine; every
//! command it produces is encoded and handed to the [`CommandSink`] at once.
//! Nothing is buffered, so a dropped sample is gone for good.

use eyemech_core::{EyeCommand, PixelPoint, PointerEvent, RadarState, RadarSurface};
use tracing::debug;

use super::command_encoder::{CommandSink, EyeMech};

/// Counters describing what a panel has processed so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelStats {
    pub events: u64,
    pub gaze_commands: u64,
    pub lid_commands: u64,
    pub blink_commands: u64,
}

impl PanelStats {
    pub fn commands(&self) -> u64 {
        self.gaze_commands + self.lid_commands + self.blink_commands
    }

    fn record(&mut self, command: &EyeCommand) {
        match command {
            EyeCommand::Eye { .. } => self.gaze_commands += 1,
            EyeCommand::Lid(_) => self.lid_commands += 1,
            EyeCommand::Blink => self.blink_commands += 1,
        }
    }
}

/// The control panel use case.
pub struct ControlPanel<S: CommandSink> {
    surface: RadarSurface,
    eye: EyeMech<S>,
    stats: PanelStats,
}

impl<S: CommandSink> ControlPanel<S> {
    pub fn new(surface: RadarSurface, sink: S) -> Self {
        Self {
            surface,
            eye: EyeMech::new(sink),
            stats: PanelStats::default(),
        }
    }

    /// Handles one pointer event and returns the command that was sent, if any.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<EyeCommand> {
        self.stats.events += 1;
        let command = self.surface.handle(event)?;
        debug!(?event, keyword = command.keyword(), %command, "dispatching");
        self.stats.record(&command);
        self.eye.send(command);
        Some(command)
    }

    pub fn state(&self) -> RadarState {
        self.surface.state()
    }

    pub fn marker(&self) -> PixelPoint {
        self.surface.marker()
    }

    pub fn stats(&self) -> PanelStats {
        self.stats
    }

    /// Direct access to the encoder for actions that do not come from the radar.
    pub fn eye_mut(&mut self) -> &mut EyeMech<S> {
        &mut self.eye
    }

    pub fn sink(&self) -> &S {
        self.eye.sink()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
