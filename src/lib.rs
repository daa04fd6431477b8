//! # jol-replay
//!
//! Step-by-step replay of a recorded multiplayer card game.
//!
//! A recorded game is a directory of per-player-turn files: a full board
//! snapshot (`game-<turn>-<player>.json`) and the chat/action log of that
//! player-turn (`actions-<turn>-<player>.json`). This crate lets a host walk
//! through the recording turn by turn or action by action, and at every
//! position rebuild what each player's regions hold, including cards nested
//! inside other cards.
//!
//! ## Design Principles
//!
//! 1. **Replay, never simulate**: Snapshots are read, not derived. No game
//!    rules are evaluated.
//!
//! 2. **Recorded files drive stepping**: The turn index built from the
//!    action files decides which player-turns exist, so players without a
//!    record for a turn are skipped.
//!
//! 3. **Missing data is a state, not a crash**: A position whose files do
//!    not load is still a position; its data is reported unavailable.
//!
//! ## Modules
//!
//! - `core`: Positions, player references, action logs, config, errors
//! - `cards`: Card table model and containment forest rebuilding
//! - `snapshot`: Snapshot model and the file-backed store
//! - `zones`: Region contents resolution
//! - `replay`: Turn index and navigator
//!
//! ## Example
//!
//! ```no_run
//! use jol_replay::{Navigator, ReplayConfig, TurnChange};
//!
//! let mut nav = Navigator::open(ReplayConfig::new("games/cranky-awing")).unwrap();
//! nav.subscribe(|change: &TurnChange<'_>| {
//!     println!("turn {} player {}", change.turn(), change.player());
//! });
//!
//! while nav.next_action().changed() {
//!     for player in nav.players().to_vec() {
//!         let forest = nav.forest(player.as_str(), "Ready").unwrap();
//!         for row in forest.flatten() {
//!             println!("{:indent$}{} {}", "", row.label, row.card.name, indent = row.depth * 2);
//!         }
//!     }
//! }
//! ```

pub mod core;
pub mod cards;
pub mod snapshot;
pub mod zones;
pub mod replay;

// Re-export commonly used types
pub use crate::core::{
    ActionEntry, ActionLog,
    InitialReveal, ReplayConfig,
    LoadError, ReplayError,
    PlayerRef, Position, PositionKey,
};

pub use crate::cards::{
    build_forest, CardKey, CardNode, CardRecord, Forest, ForestAnomaly, ForestRow, RegionId,
};

pub use crate::snapshot::{MalformedSnapshot, PlayerState, RegionRef, Snapshot, SnapshotStore};

pub use crate::zones::{normalize_region_name, region_contents, RegionContents, TurnContext};

pub use crate::replay::{Navigator, ReplayObserver, Step, TurnChange, TurnIndex};
