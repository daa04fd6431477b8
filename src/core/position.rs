//! Replay positions.
//!
//! A `PositionKey` names one recorded player-turn: the pair every snapshot
//! and action file is keyed by. A `Position` adds how much of that
//! player-turn's action log has been revealed.

use serde::{Deserialize, Serialize};

/// A (turn, player) pair. Both are 1-based.
///
/// Ordering is turn-major, then player, which is the replay order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionKey {
    pub turn: u32,
    pub player: u32,
}

impl PositionKey {
    /// Create a new position key.
    #[must_use]
    pub const fn new(turn: u32, player: u32) -> Self {
        Self { turn, player }
    }

    /// The key whose snapshot describes the board as this player-turn began:
    /// the same player one turn earlier, or this key itself on turn 1.
    #[must_use]
    pub const fn previous_turn(self) -> Self {
        if self.turn > 1 {
            Self::new(self.turn - 1, self.player)
        } else {
            self
        }
    }
}

impl Default for PositionKey {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for PositionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.turn, self.player)
    }
}

/// Full navigator position: player-turn plus revealed action index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub key: PositionKey,

    /// Index of the last revealed action in this player-turn's log.
    pub action_index: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(turn: u32, player: u32, action_index: usize) -> Self {
        Self {
            key: PositionKey::new(turn, player),
            action_index,
        }
    }

    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.key.turn
    }

    #[must_use]
    pub const fn player(&self) -> u32 {
        self.key.player
    }
}
