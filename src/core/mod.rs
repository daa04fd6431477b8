//! Core replay types: positions, players, action logs, configuration, errors.
//!
//! Everything here is independent of the on-disk snapshot format; the
//! `snapshot`, `zones`, `cards` and `replay` modules build on it.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod position;

pub use action::{ActionEntry, ActionLog};
pub use config::{InitialReveal, ReplayConfig};
pub use error::{LoadError, ReplayError};
pub use player::PlayerRef;
pub use position::{Position, PositionKey};
