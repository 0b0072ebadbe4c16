//! Drag sampling state machine for the radar surface.
//!
//! ```text
//!            press                 release
//!   Idle ───────────▶ Dragging ───────────▶ Idle
//!                       │  ▲
//!                       └──┘ move (emit at most once per interval)
//! ```
//!
//! Right-click and wheel gestures are accepted in either state and never
//! change it.  The handlers are pure: they take the current state and an
//! event and return the next state plus the command to transmit, if any.
//! Rate limiting compares event timestamps and never sleeps; samples that
//! arrive too early are dropped, not queued.

use std::time::Duration;

use tracing::trace;

use crate::domain::radar::{PixelPoint, RadarGeometry};
use crate::protocol::command::EyeCommand;

/// Wheel delta reported for one notch on platforms with continuous units.
pub const WHEEL_NOTCH: i32 = 120;

/// Minimum time between two throttled gaze updates during a drag.
pub const DEFAULT_SEND_INTERVAL: Duration = Duration::from_millis(10);

/// A scroll gesture as delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelGesture {
    /// Continuous delta in multiples of [`WHEEL_NOTCH`] (Windows, macOS).
    Delta(i32),
    /// One discrete notch away from the user (X11 button 4).
    NotchUp,
    /// One discrete notch towards the user (X11 button 5).
    NotchDown,
}

impl WheelGesture {
    /// Signed lid step count for this gesture.
    ///
    /// Continuous deltas are divided by [`WHEEL_NOTCH`] truncating toward
    /// zero, so `-60` and `60` both yield `0` and `-240` yields `-2`.  A zero
    /// step count is still sent as `LID 0`.
    pub fn steps(self) -> i32 {
        match self {
            WheelGesture::Delta(delta) => delta / WHEEL_NOTCH,
            WheelGesture::NotchUp => 1,
            WheelGesture::NotchDown => -1,
        }
    }
}

/// Pointer input on the radar, timestamped in milliseconds on a monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Primary button pressed at a canvas position.
    Press { x: i32, y: i32, time_ms: u64 },
    /// Pointer moved with the primary button held.
    Move { x: i32, y: i32, time_ms: u64 },
    /// Primary button released.
    Release { time_ms: u64 },
    /// Secondary button clicked.
    RightClick { time_ms: u64 },
    /// Wheel scrolled.
    Wheel { gesture: WheelGesture, time_ms: u64 },
}

impl PointerEvent {
    pub fn time_ms(&self) -> u64 {
        match *self {
            PointerEvent::Press { time_ms, .. }
            | PointerEvent::Move { time_ms, .. }
            | PointerEvent::Release { time_ms }
            | PointerEvent::RightClick { time_ms }
            | PointerEvent::Wheel { time_ms, .. } => time_ms,
        }
    }

    /// Canvas position carried by press and move events.
    pub fn position(&self) -> Option<PixelPoint> {
        match *self {
            PointerEvent::Press { x, y, .. } | PointerEvent::Move { x, y, .. } => {
                Some(PixelPoint::new(x, y))
            }
            _ => None,
        }
    }
}

/// Drag session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadarState {
    #[default]
    Idle,
    /// Primary button is held; `last_emit_ms` is when the last gaze was sent.
    Dragging { last_emit_ms: u64 },
}

impl RadarState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, RadarState::Dragging { .. })
    }

    /// Applies one event and returns the next state and the command to send.
    pub fn handle(
        self,
        event: &PointerEvent,
        geometry: &RadarGeometry,
        send_interval: Duration,
    ) -> (RadarState, Option<EyeCommand>) {
        match *event {
            PointerEvent::Press { x, y, time_ms } => {
                // The press always emits, whatever the throttle says.
                let command = gaze_command(geometry, PixelPoint::new(x, y));
                (RadarState::Dragging { last_emit_ms: time_ms }, Some(command))
            }
            PointerEvent::Move { x, y, time_ms } => match self {
                RadarState::Idle => (self, None),
                RadarState::Dragging { last_emit_ms } => {
                    let elapsed = Duration::from_millis(time_ms.saturating_sub(last_emit_ms));
                    if elapsed >= send_interval {
                        let command = gaze_command(geometry, PixelPoint::new(x, y));
                        (RadarState::Dragging { last_emit_ms: time_ms }, Some(command))
                    } else {
                        trace!("dropping move sample after {elapsed:?}");
                        (self, None)
                    }
                }
            },
            PointerEvent::Release { .. } => (RadarState::Idle, None),
            PointerEvent::RightClick { .. } => (self, Some(EyeCommand::Blink)),
            PointerEvent::Wheel { gesture, .. } => (self, Some(EyeCommand::Lid(gesture.steps()))),
        }
    }
}

fn gaze_command(geometry: &RadarGeometry, point: PixelPoint) -> EyeCommand {
    let gaze = geometry.map(point);
    EyeCommand::Eye {
        x: gaze.x,
        y: gaze.y,
    }
}

/// The radar surface: geometry, drag state and the marker drawn on it.
///
/// This is the stateful wrapper around [`RadarState::handle`] that a
/// presentation layer drives with raw events.
#[derive(Debug, Clone)]
pub struct RadarSurface {
    geometry: RadarGeometry,
    send_interval: Duration,
    state: RadarState,
    marker: PixelPoint,
}

impl RadarSurface {
    pub fn new(geometry: RadarGeometry, send_interval: Duration) -> Self {
        Self {
            geometry,
            send_interval,
            state: RadarState::Idle,
            marker: geometry.center(),
        }
    }

    pub fn geometry(&self) -> &RadarGeometry {
        &self.geometry
    }

    pub fn state(&self) -> RadarState {
        self.state
    }

    /// Pixel position of the last transmitted gaze target.
    pub fn marker(&self) -> PixelPoint {
        self.marker
    }

    /// Feeds one event through the state machine.
    pub fn handle(&mut self, event: PointerEvent) -> Option<EyeCommand> {
        let (next, command) = self.state.handle(&event, &self.geometry, self.send_interval);
        self.state = next;
        if let (Some(EyeCommand::Eye { .. }), Some(point)) = (command, event.position()) {
            self.marker = self.geometry.clamp(point);
        }
        command
    }
}

impl Default for RadarSurface {
    fn default() -> Self {
        Self::new(RadarGeometry::default(), DEFAULT_SEND_INTERVAL)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
