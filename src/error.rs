//! Error taxonomy for session start and leaderboard I/O

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// Requested difficulty is not one of the configured tiers
    UnknownDifficulty { requested: String },
    /// Leaderboard backing store could not be read or written
    PersistenceUnavailable { reason: String },
    /// A leaderboard line did not parse
    MalformedRecord { line: String, reason: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDifficulty { requested } => {
                write!(f, "unknown difficulty: {requested:?}")
            }
            Self::PersistenceUnavailable { reason } => {
                write!(f, "leaderboard unavailable: {reason}")
            }
            Self::MalformedRecord { line, reason } => {
                write!(f, "malformed leaderboard record {line:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_input() {
        let err = GameError::UnknownDifficulty {
            requested: "Nightmare".to_string(),
        };
        assert_eq!(err.to_string(), "unknown difficulty: \"Nightmare\"");

        let err = GameError::MalformedRecord {
            line: "Ann, 10".to_string(),
            reason: "expected 3 fields, got 2".to_string(),
        };
        assert!(err.to_string().contains("Ann, 10"));
        assert!(err.to_string().contains("expected 3 fields"));
    }
}
