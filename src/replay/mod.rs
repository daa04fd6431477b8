//! Replay navigation: the turn index and the navigator state machine.
//!
//! ## Key Types
//!
//! - `TurnIndex`: Which player-turns have recorded files
//! - `Navigator`: Current position, stepping, and the data loaded for it
//! - `ReplayObserver`/`TurnChange`: Change notification for renderers
//! - `Step`: What a step operation did

pub mod navigator;
pub mod turn_index;

pub use navigator::{Navigator, ReplayObserver, Step, TurnChange};
pub use turn_index::TurnIndex;
