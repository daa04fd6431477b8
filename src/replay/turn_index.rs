//! Turn index: which player-turns have a recorded action file.
//!
//! Not every player has a surviving record for every turn (eliminated
//! players stop producing files), so the index, not the player count, is
//! what stepping follows. It is built once by scanning the game directory.

use std::fs;
use std::ops::Bound::{Excluded, Unbounded};

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

use crate::core::{PositionKey, ReplayConfig, ReplayError};

/// Turn number -> recorded player seats for that turn.
///
/// Backed by persistent ordered maps, so handing a copy to a renderer is
/// cheap. Serializes as `{"<turn>": [<player>, ...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnIndex {
    turns: OrdMap<u32, OrdSet<u32>>,
}

impl TurnIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from the action files in a game directory.
    ///
    /// Files that do not follow the action file naming are skipped.
    pub fn scan(config: &ReplayConfig) -> Result<Self, ReplayError> {
        let mut index = Self::new();

        for entry in fs::read_dir(config.game_dir())? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            match config.parse_actions_file_name(name) {
                Some(key) => index.insert(key),
                None => tracing::trace!(file = name, "not an action file, skipped"),
            }
        }

        tracing::debug!(
            turns = index.turn_count(),
            positions = index.len(),
            "scanned turn index"
        );
        Ok(index)
    }

    /// Record a player-turn.
    pub fn insert(&mut self, key: PositionKey) {
        let mut players = self.turns.get(&key.turn).cloned().unwrap_or_default();
        players.insert(key.player);
        self.turns.insert(key.turn, players);
    }

    /// Check if a player-turn is recorded.
    #[must_use]
    pub fn contains(&self, key: PositionKey) -> bool {
        self.turns
            .get(&key.turn)
            .is_some_and(|players| players.contains(&key.player))
    }

    /// Number of recorded player-turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.values().map(OrdSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns with at least one record.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Recorded turns in increasing order.
    pub fn turns(&self) -> impl Iterator<Item = u32> + '_ {
        self.turns.keys().copied()
    }

    /// Recorded players of a turn in increasing order.
    #[must_use]
    pub fn players_in(&self, turn: u32) -> Vec<u32> {
        self.turns
            .get(&turn)
            .map(|players| players.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every recorded player-turn, in replay order.
    pub fn iter(&self) -> impl Iterator<Item = PositionKey> + '_ {
        self.turns.iter().flat_map(|(turn, players)| {
            players.iter().map(move |player| PositionKey::new(*turn, *player))
        })
    }

    /// First recorded player-turn.
    #[must_use]
    pub fn first(&self) -> Option<PositionKey> {
        let (turn, players) = self.turns.get_min()?;
        players.get_min().map(|p| PositionKey::new(*turn, *p))
    }

    /// Last recorded player-turn.
    #[must_use]
    pub fn last(&self) -> Option<PositionKey> {
        let (turn, players) = self.turns.get_max()?;
        players.get_max().map(|p| PositionKey::new(*turn, *p))
    }

    /// The recorded player-turn after `key`: a later player of the same
    /// turn, else the first recorded player of the next recorded turn.
    #[must_use]
    pub fn next_after(&self, key: PositionKey) -> Option<PositionKey> {
        let same_turn = self
            .turns
            .get(&key.turn)
            .and_then(|players| players.range((Excluded(key.player), Unbounded)).next().copied());
        if let Some(player) = same_turn {
            return Some(PositionKey::new(key.turn, player));
        }

        self.turns
            .range((Excluded(key.turn), Unbounded))
            .find_map(|(turn, players)| players.get_min().map(|p| PositionKey::new(*turn, *p)))
    }

    /// The recorded player-turn before `key`: an earlier player of the same
    /// turn, else the last recorded player of the previous recorded turn.
    #[must_use]
    pub fn previous_before(&self, key: PositionKey) -> Option<PositionKey> {
        let same_turn = self.turns.get(&key.turn).and_then(|players| {
            players
                .range((Unbounded, Excluded(key.player)))
                .last()
                .copied()
        });
        if let Some(player) = same_turn {
            return Some(PositionKey::new(key.turn, player));
        }

        // Recorded turns are never empty
        self.turns
            .range((Unbounded, Excluded(key.turn)))
            .last()
            .and_then(|(turn, players)| players.get_max().map(|p| PositionKey::new(*turn, *p)))
    }
}

impl FromIterator<PositionKey> for TurnIndex {
    fn from_iter<I: IntoIterator<Item = PositionKey>>(iter: I) -> Self {
        let mut index = Self::new();
        for key in iter {
            index.insert(key);
        }
        index
    }
}
