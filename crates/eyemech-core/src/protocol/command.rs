//! Text encoding and parsing of EyeMech commands.
//!
//! Wire format (one command per line, host to device only):
//! ```text
//! EYE <x:%.2f> <y:%.2f>
//! LID <delta>
//! BLINK
//! ```
//! The line terminator is added by the transport, not by [`EyeCommand::encode`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::radar::GAZE_LIMIT;

/// Keyword that starts a gaze command.
pub const EYE_KEYWORD: &str = "EYE";
/// Keyword that starts an eyelid step command.
pub const LID_KEYWORD: &str = "LID";
/// Keyword of the blink command.
pub const BLINK_KEYWORD: &str = "BLINK";

/// Errors that can occur while parsing or validating a command line.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The line contained nothing but whitespace.
    #[error("empty command line")]
    Empty,

    /// The first token is not one of `EYE`, `LID`, `BLINK`.
    #[error("unknown command keyword: {0:?}")]
    UnknownKeyword(String),

    /// The keyword was followed by the wrong number of arguments.
    #[error("{keyword} expects {expected} argument(s), got {found}")]
    ArgumentCount {
        keyword: &'static str,
        expected: usize,
        found: usize,
    },

    /// An argument could not be parsed as a number.
    #[error("{keyword}: invalid number {value:?}")]
    InvalidNumber { keyword: &'static str, value: String },

    /// A gaze coordinate lies outside `[-50, 50]` (or is not finite).
    #[error("gaze coordinate {0} is outside [-50, 50]")]
    GazeOutOfRange(f64),
}

/// A single command understood by the EyeMech firmware.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EyeCommand {
    /// Move the gaze to `(x, y)`, both in `[-50, 50]`.  Positive `y` looks up.
    Eye { x: f64, y: f64 },
    /// Open (positive) or close (negative) the eyelids by this many steps.
    Lid(i32),
    /// Close and reopen the eyelids once.
    Blink,
}

impl EyeCommand {
    /// Builds a gaze command, rejecting coordinates outside `[-50, 50]`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::GazeOutOfRange`] for the first offending axis.
    pub fn gaze(x: f64, y: f64) -> Result<Self, ProtocolError> {
        check_gaze(x)?;
        check_gaze(y)?;
        Ok(EyeCommand::Eye { x, y })
    }

    /// Renders the command as a single line without the trailing newline.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eyemech_core::EyeCommand;
    ///
    /// assert_eq!(EyeCommand::Eye { x: 12.5, y: -3.0 }.encode(), "EYE 12.50 -3.00");
    /// assert_eq!(EyeCommand::Lid(-2).encode(), "LID -2");
    /// assert_eq!(EyeCommand::Blink.encode(), "BLINK");
    /// ```
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Returns the keyword this command starts with.
    pub fn keyword(&self) -> &'static str {
        match self {
            EyeCommand::Eye { .. } => EYE_KEYWORD,
            EyeCommand::Lid(_) => LID_KEYWORD,
            EyeCommand::Blink => BLINK_KEYWORD,
        }
    }
}

impl fmt::Display for EyeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EyeCommand::Eye { x, y } => write!(f, "{EYE_KEYWORD} {x:.2} {y:.2}"),
            EyeCommand::Lid(delta) => write!(f, "{LID_KEYWORD} {delta}"),
            EyeCommand::Blink => f.write_str(BLINK_KEYWORD),
        }
    }
}

impl FromStr for EyeCommand {
    type Err = ProtocolError;

    /// Parses one command line.  A trailing `\n` or `\r\n` is accepted.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(ProtocolError::Empty)?;
        let args: Vec<&str> = tokens.collect();

        match keyword {
            EYE_KEYWORD => {
                expect_args(EYE_KEYWORD, &args, 2)?;
                let x = parse_number::<f64>(EYE_KEYWORD, args[0])?;
                let y = parse_number::<f64>(EYE_KEYWORD, args[1])?;
                EyeCommand::gaze(x, y)
            }
            LID_KEYWORD => {
                expect_args(LID_KEYWORD, &args, 1)?;
                Ok(EyeCommand::Lid(parse_number(LID_KEYWORD, args[0])?))
            }
            BLINK_KEYWORD => {
                expect_args(BLINK_KEYWORD, &args, 0)?;
                Ok(EyeCommand::Blink)
            }
            other => Err(ProtocolError::UnknownKeyword(other.to_string())),
        }
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn check_gaze(value: f64) -> Result<(), ProtocolError> {
    // NaN fails the range check as well.
    if (-GAZE_LIMIT..=GAZE_LIMIT).contains(&value) {
        Ok(())
    } else {
        Err(ProtocolError::GazeOutOfRange(value))
    }
}

fn expect_args(keyword: &'static str, args: &[&str], expected: usize) -> Result<(), ProtocolError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ProtocolError::ArgumentCount {
            keyword,
            expected,
            found: args.len(),
        })
    }
}

fn parse_number<T: FromStr>(keyword: &'static str, token: &str) -> Result<T, ProtocolError> {
    token.parse().map_err(|_| ProtocolError::InvalidNumber {
        keyword,
        value: token.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_uses_two_decimals() {
        assert_eq!(EyeCommand::Eye { x: 1.0, y: 2.346 }.encode(), "EYE 1.00 2.35");
        assert_eq!(EyeCommand::Eye { x: -50.0, y: 50.0 }.encode(), "EYE -50.00 50.00");
    }

    #[test]
    fn test_eye_keeps_sign_of_negative_zero() {
        // The radar centre maps to (0.0, -0.0) because y is negated.
        assert_eq!(EyeCommand::Eye { x: 0.0, y: -0.0 }.encode(), "EYE 0.00 -0.00");
    }

    #[test]
    fn test_lid_is_plain_signed_integer() {
        assert_eq!(EyeCommand::Lid(3).encode(), "LID 3");
        assert_eq!(EyeCommand::Lid(-1).encode(), "LID -1");
        assert_eq!(EyeCommand::Lid(0).encode(), "LID 0");
    }

    #[test]
    fn test_blink_has_no_arguments() {
        assert_eq!(EyeCommand::Blink.encode(), "BLINK");
    }

    #[test]
    fn test_parse_accepts_trailing_newline() {
        assert_eq!("BLINK\r\n".parse::<EyeCommand>(), Ok(EyeCommand::Blink));
        assert_eq!("LID -4\n".parse::<EyeCommand>(), Ok(EyeCommand::Lid(-4)));
    }

    #[test]
    fn test_parse_eye_line() {
        let cmd: EyeCommand = "EYE 10.25 -42.00".parse().unwrap();
        assert_eq!(cmd, EyeCommand::Eye { x: 10.25, y: -42.0 });
    }

    #[test]
    fn test_parse_rejects_empty_line() {
        assert_eq!("   ".parse::<EyeCommand>(), Err(ProtocolError::Empty));
    }

    #[test]
    fn test_parse_rejects_lowercase_keyword() {
        assert_eq!(
            "blink".parse::<EyeCommand>(),
            Err(ProtocolError::UnknownKeyword("blink".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_wrong_argument_count() {
        assert_eq!(
            "EYE 1.0".parse::<EyeCommand>(),
            Err(ProtocolError::ArgumentCount {
                keyword: EYE_KEYWORD,
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            "BLINK now".parse::<EyeCommand>(),
            Err(ProtocolError::ArgumentCount { found: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_fractional_lid() {
        assert_eq!(
            "LID 1.5".parse::<EyeCommand>(),
            Err(ProtocolError::InvalidNumber {
                keyword: LID_KEYWORD,
                value: "1.5".to_string()
            })
        );
    }

    #[test]
    fn test_gaze_rejects_out_of_range_and_nan() {
        assert_eq!(EyeCommand::gaze(50.01, 0.0), Err(ProtocolError::GazeOutOfRange(50.01)));
        assert!(EyeCommand::gaze(0.0, f64::NAN).is_err());
        assert!(EyeCommand::gaze(-50.0, 50.0).is_ok());
    }

    #[test]
    fn test_keyword_matches_encoded_prefix() {
        for cmd in [EyeCommand::Eye { x: 0.0, y: 0.0 }, EyeCommand::Lid(1), EyeCommand::Blink] {
            assert!(cmd.encode().starts_with(cmd.keyword()));
        }
    }
}
