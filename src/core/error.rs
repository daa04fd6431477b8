//! Error taxonomy.
//!
//! ## LoadError
//!
//! Outcome of reading one snapshot or action file. The store never raises
//! past its own boundary: a missing or unreadable file comes back as a value
//! and the navigator turns it into an availability flag.
//!
//! ## ReplayError
//!
//! Crate-level error returned to callers of the query operations.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a single position file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The file for this position does not exist (or cannot be opened).
    #[error("no such file: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but its contents are not a valid snapshot or log.
    #[error("malformed {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl LoadError {
    /// Path of the file that failed to load.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::NotFound { path } | LoadError::Malformed { path, .. } => path,
        }
    }

    /// Check if this is a missing-file failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// Errors surfaced to callers of the replay API.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A player reference that resolves to nobody in the player order.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// A region name the player does not have.
    #[error("player {player} has no region '{region}'")]
    UnknownRegion { player: String, region: String },

    /// Data was requested at a position whose files failed to load.
    #[error("no data for turn {turn} player {player}")]
    Unavailable { turn: u32, player: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_path() {
        let err = LoadError::Malformed {
            path: PathBuf::from("game-2-1.json"),
            reason: "missing field `cards`".into(),
        };

        assert_eq!(err.path(), &PathBuf::from("game-2-1.json"));
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "malformed game-2-1.json: missing field `cards`"
        );
    }

    #[test]
    fn test_replay_error_from_load() {
        let err: ReplayError = LoadError::NotFound {
            path: PathBuf::from("actions-3-2.json"),
        }
        .into();

        assert!(matches!(err, ReplayError::Load(ref e) if e.is_not_found()));
        assert_eq!(err.to_string(), "no such file: actions-3-2.json");
    }
}
