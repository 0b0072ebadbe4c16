//! Recorded pointer-event scripts.
//!
//! A script is a TOML file listing radar events in order, so a gesture
//! sequence can be replayed against the EyeMech without a pointing device:
//!
//! ```toml
//! [[event]]
//! kind = "press"
//! x = 200
//! y = 20
//! time_ms = 0
//!
//! [[event]]
//! kind = "wheel"
//! delta = 240
//! time_ms = 50
//! ```
//!
//! `kind` is one of `press`, `move`, `release`, `right_click`, `wheel`,
//! `wheel_up`, `wheel_down`.  Press and move need `x` and `y`; `wheel` needs
//! `delta`.  `time_ms` may be omitted, in which case the event happens at the
//! same instant as the one before it.  Timestamps must never decrease.

use std::path::{Path, PathBuf};

use eyemech_core::{PointerEvent, WheelGesture};
use serde::Deserialize;
use thiserror::Error;

/// Error type for loading an event script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error reading script at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("event #{index} ({kind}) is missing `{field}`")]
    MissingField {
        index: usize,
        kind: &'static str,
        field: &'static str,
    },

    #[error("event #{index} goes back in time: {found} ms after {previous} ms")]
    TimeWentBackwards { index: usize, previous: u64, found: u64 },
}

// ── File schema ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptFile {
    #[serde(default, rename = "event")]
    events: Vec<ScriptEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EventKind {
    Press,
    Move,
    Release,
    RightClick,
    Wheel,
    WheelUp,
    WheelDown,
}

impl EventKind {
    fn name(self) -> &'static str {
        match self {
            EventKind::Press => "press",
            EventKind::Move => "move",
            EventKind::Release => "release",
            EventKind::RightClick => "right_click",
            EventKind::Wheel => "wheel",
            EventKind::WheelUp => "wheel_up",
            EventKind::WheelDown => "wheel_down",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptEntry {
    kind: EventKind,
    x: Option<i32>,
    y: Option<i32>,
    delta: Option<i32>,
    time_ms: Option<u64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Reads and parses the script at `path`.
///
/// # Errors
///
/// Returns [`ScriptError`] if the file cannot be read or is not a valid script.
pub fn load_script(path: &Path) -> Result<Vec<PointerEvent>, ScriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

/// Parses script text into timestamped pointer events.
///
/// # Errors
///
/// Returns [`ScriptError`] on malformed TOML, unknown event kinds, missing
/// fields, or decreasing timestamps.
pub fn parse_script(text: &str) -> Result<Vec<PointerEvent>, ScriptError> {
    let file: ScriptFile = toml::from_str(text)?;
    let mut events = Vec::with_capacity(file.events.len());
    let mut previous = 0u64;

    for (index, entry) in file.events.into_iter().enumerate() {
        let time_ms = entry.time_ms.unwrap_or(previous);
        if time_ms < previous {
            return Err(ScriptError::TimeWentBackwards {
                index,
                previous,
                found: time_ms,
            });
        }
        previous = time_ms;
        events.push(entry.into_event(index, time_ms)?);
    }
    Ok(events)
}

impl ScriptEntry {
    fn into_event(self, index: usize, time_ms: u64) -> Result<PointerEvent, ScriptError> {
        let kind = self.kind;
        let require = |value: Option<i32>, field: &'static str| {
            value.ok_or(ScriptError::MissingField {
                index,
                kind: kind.name(),
                field,
            })
        };

        let event = match kind {
            EventKind::Press => PointerEvent::Press {
                x: require(self.x, "x")?,
                y: require(self.y, "y")?,
                time_ms,
            },
            EventKind::Move => PointerEvent::Move {
                x: require(self.x, "x")?,
                y: require(self.y, "y")?,
                time_ms,
            },
            EventKind::Release => PointerEvent::Release { time_ms },
            EventKind::RightClick => PointerEvent::RightClick { time_ms },
            EventKind::Wheel => PointerEvent::Wheel {
                gesture: WheelGesture::Delta(require(self.delta, "delta")?),
                time_ms,
            },
            EventKind::WheelUp => PointerEvent::Wheel {
                gesture: WheelGesture::NotchUp,
                time_ms,
            },
            EventKind::WheelDown => PointerEvent::Wheel {
                gesture: WheelGesture::NotchDown,
                time_ms,
            },
        };
        Ok(event)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_event_kind() {
        // Arrange
        let text = r#"
            [[event]]
            kind = "press"
            x = 200
            y = 20
            time_ms = 0

            [[event]]
            kind = "move"
            x = 210
            y = 30
            time_ms = 15

            [[event]]
            kind = "release"

            [[event]]
            kind = "right_click"
            time_ms = 20

            [[event]]
            kind = "wheel"
            delta = -240
            time_ms = 21

            [[event]]
            kind = "wheel_up"
            time_ms = 22

            [[event]]
            kind = "wheel_down"
            time_ms = 23
        "#;

        // Act
        let events = parse_script(text).expect("script should parse");

        // Assert
        assert_eq!(
            events,
            vec![
                PointerEvent::Press { x: 200, y: 20, time_ms: 0 },
                PointerEvent::Move { x: 210, y: 30, time_ms: 15 },
                PointerEvent::Release { time_ms: 15 },
                PointerEvent::RightClick { time_ms: 20 },
                PointerEvent::Wheel { gesture: WheelGesture::Delta(-240), time_ms: 21 },
                PointerEvent::Wheel { gesture: WheelGesture::NotchUp, time_ms: 22 },
                PointerEvent::Wheel { gesture: WheelGesture::NotchDown, time_ms: 23 },
            ]
        );
    }

    #[test]
    fn test_empty_script_has_no_events() {
        assert_eq!(parse_script("").expect("empty is valid"), Vec::new());
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = parse_script("[[event]]\nkind = \"double_click\"\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn test_press_without_coordinates_is_rejected() {
        let err = parse_script("[[event]]\nkind = \"press\"\nx = 5\n").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::MissingField { index: 0, kind: "press", field: "y" }
        ));
    }

    #[test]
    fn test_wheel_without_delta_is_rejected() {
        let err = parse_script("[[event]]\nkind = \"wheel\"\n").unwrap_err();
        assert!(matches!(err, ScriptError::MissingField { field: "delta", .. }));
    }

    #[test]
    fn test_decreasing_timestamp_is_rejected() {
        let text = "[[event]]\nkind = \"right_click\"\ntime_ms = 10\n\n[[event]]\nkind = \"right_click\"\ntime_ms = 5\n";
        let err = parse_script(text).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::TimeWentBackwards { index: 1, previous: 10, found: 5 }
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_script(Path::new("/nonexistent/eyemech-script.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/eyemech-script.toml"));
    }
}
