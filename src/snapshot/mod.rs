//! Snapshots: the per-player-turn board model and the file store serving it.

pub mod state;
pub mod store;

pub use state::{MalformedSnapshot, PlayerState, RegionRef, Snapshot};
pub use store::SnapshotStore;
