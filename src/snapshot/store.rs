//! File-backed snapshot and action log store.
//!
//! The store reads `game-<t>-<p>.json` and `actions-<t>-<p>.json` files on
//! demand. It keeps one cache slot per file kind, holding the most recent
//! *successful* load, so asking again for the same position costs nothing
//! and a failed load never leaves a stale entry under the new key.
//!
//! Loads never panic and never retry: a missing file is permanent for its
//! position.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::core::{ActionLog, LoadError, PlayerRef, PositionKey, ReplayConfig, ReplayError};

use super::state::Snapshot;

/// Reads snapshots and action logs for a game directory.
#[derive(Debug)]
pub struct SnapshotStore {
    config: ReplayConfig,

    /// Fixed seat order, read once from the first snapshot.
    player_order: Vec<String>,

    snapshot_slot: Option<(PositionKey, Arc<Snapshot>)>,
    log_slot: Option<(PositionKey, Arc<ActionLog>)>,
}

impl SnapshotStore {
    /// Open a game directory.
    ///
    /// Reads the configured first snapshot to learn the player order; fails
    /// if that snapshot cannot be loaded.
    pub fn open(config: ReplayConfig) -> Result<Self, ReplayError> {
        let first = read_snapshot(&config.snapshot_path(config.first_snapshot))?;
        tracing::debug!(
            game_dir = %config.game_dir.display(),
            players = ?first.player_order,
            "opened game"
        );

        Ok(Self {
            player_order: first.player_order.clone(),
            snapshot_slot: Some((config.first_snapshot, Arc::new(first))),
            log_slot: None,
            config,
        })
    }

    /// The configuration this store reads with.
    #[must_use]
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Seat order of the game.
    #[must_use]
    pub fn player_order(&self) -> &[String] {
        &self.player_order
    }

    /// Resolve a player reference to its 1-based seat.
    pub fn player_index(&self, player: &PlayerRef) -> Result<u32, ReplayError> {
        player.index_in(&self.player_order)
    }

    /// Load the snapshot for a player-turn.
    ///
    /// Fails with `UnknownPlayer` for a name not in the player order, and
    /// with `Load` when the file is missing or malformed.
    pub fn load_snapshot(
        &mut self,
        turn: u32,
        player: impl Into<PlayerRef>,
    ) -> Result<Arc<Snapshot>, ReplayError> {
        let key = PositionKey::new(turn, self.player_index(&player.into())?);
        Ok(self.snapshot_at(key)?)
    }

    /// Load the action log for a player-turn.
    pub fn load_action_log(
        &mut self,
        turn: u32,
        player: impl Into<PlayerRef>,
    ) -> Result<Arc<ActionLog>, ReplayError> {
        let key = PositionKey::new(turn, self.player_index(&player.into())?);
        Ok(self.action_log_at(key)?)
    }

    /// Load the snapshot at a resolved position.
    pub fn snapshot_at(&mut self, key: PositionKey) -> Result<Arc<Snapshot>, LoadError> {
        if let Some((cached, snapshot)) = &self.snapshot_slot {
            if *cached == key {
                return Ok(Arc::clone(snapshot));
            }
        }

        let snapshot = Arc::new(read_snapshot(&self.config.snapshot_path(key))?);
        self.snapshot_slot = Some((key, Arc::clone(&snapshot)));
        Ok(snapshot)
    }

    /// Load the action log at a resolved position.
    pub fn action_log_at(&mut self, key: PositionKey) -> Result<Arc<ActionLog>, LoadError> {
        if let Some((cached, log)) = &self.log_slot {
            if *cached == key {
                return Ok(Arc::clone(log));
            }
        }

        let log = Arc::new(read_action_log(&self.config.actions_path(key))?);
        self.log_slot = Some((key, Arc::clone(&log)));
        Ok(log)
    }

    /// Position and contents of the most recent successful snapshot load.
    #[must_use]
    pub fn current_snapshot(&self) -> Option<(PositionKey, &Snapshot)> {
        self.snapshot_slot.as_ref().map(|(k, s)| (*k, s.as_ref()))
    }

    /// Position and contents of the most recent successful action log load.
    #[must_use]
    pub fn current_action_log(&self) -> Option<(PositionKey, &ActionLog)> {
        self.log_slot.as_ref().map(|(k, l)| (*k, l.as_ref()))
    }
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Malformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    })
}

fn read_snapshot(path: &Path) -> Result<Snapshot, LoadError> {
    let text = read_to_string(path)?;
    Snapshot::from_json(&text).map_err(|err| LoadError::Malformed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

fn read_action_log(path: &Path) -> Result<ActionLog, LoadError> {
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|err| LoadError::Malformed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
