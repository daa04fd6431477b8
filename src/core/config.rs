//! Replay configuration.
//!
//! A game directory holds one snapshot file and one action file per recorded
//! player-turn:
//!
//! - `<snapshot_prefix>-<turn>-<player>.<extension>` (default `game-3-2.json`)
//! - `<actions_prefix>-<turn>-<player>.<extension>` (default `actions-3-2.json`)
//!
//! `ReplayConfig` names the directory and the naming scheme. Hosts build it
//! once and hand it to `Navigator::open`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::position::PositionKey;

/// How much of the log is revealed when entering a position without a
/// direction (opening a game, or jumping).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialReveal {
    /// Only the first entry.
    #[default]
    First,
    /// The whole log.
    All,
}

/// Configuration for one replayed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Directory holding the snapshot and action files.
    pub game_dir: PathBuf,

    /// File name prefix of snapshot files.
    pub snapshot_prefix: String,

    /// File name prefix of action log files.
    pub actions_prefix: String,

    /// File extension (without the dot).
    pub extension: String,

    /// Snapshot the player order is read from.
    pub first_snapshot: PositionKey,

    /// Reveal policy for the initial position.
    pub initial_reveal: InitialReveal,
}

impl ReplayConfig {
    /// Create a configuration with the default file naming.
    pub fn new(game_dir: impl Into<PathBuf>) -> Self {
        Self {
            game_dir: game_dir.into(),
            snapshot_prefix: "game".to_string(),
            actions_prefix: "actions".to_string(),
            extension: "json".to_string(),
            first_snapshot: PositionKey::default(),
            initial_reveal: InitialReveal::default(),
        }
    }

    /// Set the snapshot file prefix.
    #[must_use]
    pub fn with_snapshot_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.snapshot_prefix = prefix.into();
        self
    }

    /// Set the action log file prefix.
    #[must_use]
    pub fn with_actions_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.actions_prefix = prefix.into();
        self
    }

    /// Set the file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Read the player order from a different snapshot.
    #[must_use]
    pub fn with_first_snapshot(mut self, key: PositionKey) -> Self {
        self.first_snapshot = key;
        self
    }

    /// Reveal the whole log of the initial position.
    #[must_use]
    pub fn reveal_all_initially(mut self) -> Self {
        self.initial_reveal = InitialReveal::All;
        self
    }

    /// The game directory.
    #[must_use]
    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    /// Path of the snapshot file for a player-turn.
    #[must_use]
    pub fn snapshot_path(&self, key: PositionKey) -> PathBuf {
        self.file_path(&self.snapshot_prefix, key)
    }

    /// Path of the action log file for a player-turn.
    #[must_use]
    pub fn actions_path(&self, key: PositionKey) -> PathBuf {
        self.file_path(&self.actions_prefix, key)
    }

    /// Parse an action log file name back into its player-turn.
    ///
    /// Returns `None` for anything that is not `<actions_prefix>-<t>-<p>.<ext>`.
    #[must_use]
    pub fn parse_actions_file_name(&self, name: &str) -> Option<PositionKey> {
        let stem = name
            .strip_prefix(self.actions_prefix.as_str())?
            .strip_prefix('-')?
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        let (turn, player) = stem.split_once('-')?;
        Some(PositionKey::new(turn.parse().ok()?, player.parse().ok()?))
    }

    fn file_path(&self, prefix: &str, key: PositionKey) -> PathBuf {
        self.game_dir.join(format!(
            "{}-{}-{}.{}",
            prefix, key.turn, key.player, self.extension
        ))
    }
}
