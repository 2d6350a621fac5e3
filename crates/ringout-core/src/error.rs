use crate::player::PlayerIndex;

/// Precondition violations detected while building a match.
///
/// Only construction can fail. Once a `Match` exists, every per-tick path
/// absorbs inconsistent input instead of returning an error.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    EmptyRoster,
    ControlledPlayerOutOfRange {
        index: PlayerIndex,
        roster_len: usize,
    },
    InvalidGeometry(String),
    InvalidTiming(String),
    InvalidTuning(String),
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRoster => write!(f, "roster must contain at least one player"),
            Self::ControlledPlayerOutOfRange { index, roster_len } => write!(
                f,
                "controlled player {index} is outside a roster of {roster_len}"
            ),
            Self::InvalidGeometry(m) | Self::InvalidTiming(m) | Self::InvalidTuning(m) => {
                write!(f, "{m}")
            },
        }
    }
}

impl std::error::Error for MatchError {}
