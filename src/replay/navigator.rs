//! Turn and action navigation.
//!
//! The `Navigator` owns the replay position and everything loaded for it:
//!
//! - `(turn, player)`: the player-turn being shown
//! - `action_index`: how far into that player-turn's log the viewer is
//!
//! ## Stepping
//!
//! - `next_action`: reveal one more log entry; past the last entry, move to
//!   the next recorded player-turn and show its first entry
//! - `previous_action`: hide the last revealed entry; before the first one,
//!   move to the previous recorded player-turn with its whole log revealed
//! - `next_turn`/`previous_turn`: move by one recorded player-turn, following
//!   the `TurnIndex` across turn boundaries
//!
//! Stepping past either end of the recording is a no-op (`Step::Stuck`).
//!
//! ## Loading
//!
//! Every move reloads the snapshot and action log of the new position. A
//! failed load still moves: the position is reported with its data marked
//! unavailable, never with the previous position's data. If either file
//! fails, both the state and the actions are unavailable.
//!
//! ## Notification
//!
//! Observers are called after every change, once the navigator's getters
//! already reflect the new position. Hosts that do not want callbacks can
//! use the returned `Step` instead.
//!
//! A navigator is single-threaded; hosts sharing one across threads must
//! serialize whole step calls.

use std::sync::Arc;

use crate::cards::Forest;
use crate::core::{
    ActionEntry, ActionLog, InitialReveal, LoadError, PlayerRef, Position, PositionKey,
    ReplayConfig, ReplayError,
};
use crate::snapshot::{PlayerState, Snapshot, SnapshotStore};
use crate::zones::{region_contents, RegionContents, TurnContext};

use super::turn_index::TurnIndex;

/// What a step operation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Same player-turn, different revealed action index.
    Revealed,
    /// Moved to another player-turn.
    Moved,
    /// Already at the end of the recording in that direction.
    Stuck,
}

impl Step {
    /// Check if anything changed.
    #[must_use]
    pub fn changed(self) -> bool {
        !matches!(self, Step::Stuck)
    }
}

/// Change notification delivered to observers.
#[derive(Clone, Copy, Debug)]
pub struct TurnChange<'a> {
    pub position: Position,

    /// Snapshot of the new position, `None` if the position has no data.
    pub snapshot: Option<&'a Snapshot>,

    /// Revealed log prefix, `None` exactly when `snapshot` is.
    pub actions: Option<&'a [ActionEntry]>,
}

impl TurnChange<'_> {
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.position.turn()
    }

    #[must_use]
    pub fn player(&self) -> u32 {
        self.position.player()
    }

    /// Check if both state and actions are available.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.snapshot.is_some() && self.actions.is_some()
    }
}

/// Receiver of navigation changes.
///
/// Any `FnMut(&TurnChange)` closure is an observer.
pub trait ReplayObserver {
    fn turn_changed(&mut self, change: &TurnChange<'_>);
}

impl<F> ReplayObserver for F
where
    F: FnMut(&TurnChange<'_>),
{
    fn turn_changed(&mut self, change: &TurnChange<'_>) {
        self(change)
    }
}

/// Replay navigator over one game directory.
pub struct Navigator {
    store: SnapshotStore,
    index: TurnIndex,
    position: Position,
    initial_reveal: InitialReveal,

    /// Snapshot of the current position.
    snapshot: Option<Arc<Snapshot>>,

    /// Snapshot region queries read (see `TurnContext`).
    context: Option<Arc<Snapshot>>,

    log: Option<Arc<ActionLog>>,

    observers: Vec<Box<dyn ReplayObserver>>,
}

impl Navigator {
    /// Open a game directory and load its first position, `(1, 1)`.
    ///
    /// Fails if the directory cannot be scanned or the snapshot holding the
    /// player order cannot be loaded. A missing `(1, 1)` action log is not
    /// an error; it shows up as unavailable actions.
    pub fn open(config: ReplayConfig) -> Result<Self, ReplayError> {
        let index = TurnIndex::scan(&config)?;
        let initial_reveal = config.initial_reveal;
        let store = SnapshotStore::open(config)?;

        let mut navigator = Self {
            store,
            index,
            position: Position::default(),
            initial_reveal,
            snapshot: None,
            context: None,
            log: None,
            observers: Vec::new(),
        };
        navigator.enter(PositionKey::default(), initial_reveal == InitialReveal::All);
        Ok(navigator)
    }

    /// Register an observer for position changes.
    pub fn subscribe(&mut self, observer: impl ReplayObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Position ===

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.position.turn()
    }

    #[must_use]
    pub fn player(&self) -> u32 {
        self.position.player()
    }

    #[must_use]
    pub fn action_index(&self) -> usize {
        self.position.action_index
    }

    /// Recorded player-turns of this game.
    #[must_use]
    pub fn turn_index(&self) -> &TurnIndex {
        &self.index
    }

    // === Loaded data ===

    /// Check if the current position's snapshot and action log loaded.
    #[must_use]
    pub fn state_available(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Same as `state_available`: the two load or fail together.
    #[must_use]
    pub fn actions_available(&self) -> bool {
        self.log.is_some()
    }

    /// Snapshot at the current position.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_deref()
    }

    /// Full action log of the current position.
    #[must_use]
    pub fn action_log(&self) -> Option<&ActionLog> {
        self.log.as_deref()
    }

    /// The revealed prefix of the current action log.
    #[must_use]
    pub fn revealed_actions(&self) -> Option<&[ActionEntry]> {
        self.log
            .as_deref()
            .map(|log| log.revealed(self.position.action_index))
    }

    /// The most recently revealed action.
    #[must_use]
    pub fn latest_action(&self) -> Option<&ActionEntry> {
        self.revealed_actions().and_then(<[ActionEntry]>::last)
    }

    // === Queries ===

    /// Seat order of the game.
    #[must_use]
    pub fn players(&self) -> &[String] {
        self.store.player_order()
    }

    /// A player's state at the current position, by seat or by name.
    pub fn player_data(&self, player: impl Into<PlayerRef>) -> Result<&PlayerState, ReplayError> {
        let player = player.into();
        let (_, name) = player.resolve(self.store.player_order())?;
        let snapshot = self.snapshot.as_deref().ok_or(ReplayError::Unavailable {
            turn: self.turn(),
            player: self.player(),
        })?;

        snapshot
            .player(name)
            .ok_or_else(|| ReplayError::UnknownPlayer(name.to_string()))
    }

    /// Region names a player has at the current position.
    pub fn player_regions(&self, player: impl Into<PlayerRef>) -> Result<Vec<&str>, ReplayError> {
        Ok(self.player_data(player)?.region_names())
    }

    /// Cards in a player's region as the current player-turn began.
    ///
    /// Reads the previous turn's snapshot for the current player (the
    /// current one on turn 1).
    pub fn region_contents(
        &self,
        player: impl Into<PlayerRef>,
        region: &str,
    ) -> Result<RegionContents, ReplayError> {
        let snapshot = self.context.as_deref().ok_or_else(|| {
            let key = TurnContext::new(self.position.key).snapshot_key();
            ReplayError::Unavailable {
                turn: key.turn,
                player: key.player,
            }
        })?;

        region_contents(snapshot, self.store.player_order(), &player.into(), region)
    }

    /// Containment forest of a player's region as the current player-turn
    /// began.
    pub fn forest(&self, player: impl Into<PlayerRef>, region: &str) -> Result<Forest, ReplayError> {
        Ok(self.region_contents(player, region)?.forest())
    }

    // === Stepping ===

    /// Reveal the next action, rolling into the next player-turn when the
    /// current log is exhausted.
    pub fn next_action(&mut self) -> Step {
        let can_reveal = self
            .log
            .as_ref()
            .is_some_and(|log| self.position.action_index + 1 < log.len());

        if !can_reveal {
            return self.advance_turn(false);
        }

        self.position.action_index += 1;
        self.trace_latest();
        self.notify();
        Step::Revealed
    }

    /// Hide the last revealed action, rolling back into the previous
    /// player-turn (fully revealed) from the first action.
    pub fn previous_action(&mut self) -> Step {
        if self.position.action_index == 0 {
            return self.rewind_turn(true);
        }

        self.position.action_index -= 1;
        self.trace_latest();
        self.notify();
        Step::Revealed
    }

    /// Move to the next recorded player-turn, at its first action.
    pub fn next_turn(&mut self) -> Step {
        self.advance_turn(false)
    }

    /// Move to the previous recorded player-turn, at its first action.
    pub fn previous_turn(&mut self) -> Step {
        self.rewind_turn(false)
    }

    /// Move to the next recorded player-turn.
    ///
    /// With `end_of_turn` its whole log is revealed, otherwise only the
    /// first action.
    pub fn advance_turn(&mut self, end_of_turn: bool) -> Step {
        match self.index.next_after(self.position.key) {
            Some(key) => self.move_to(key, end_of_turn),
            None => {
                tracing::debug!(position = %self.position.key, "already at last recorded turn");
                Step::Stuck
            }
        }
    }

    /// Move to the previous recorded player-turn.
    pub fn rewind_turn(&mut self, end_of_turn: bool) -> Step {
        match self.index.previous_before(self.position.key) {
            Some(key) => self.move_to(key, end_of_turn),
            None => {
                tracing::debug!(position = %self.position.key, "already at first recorded turn");
                Step::Stuck
            }
        }
    }

    /// Jump straight to a recorded player-turn.
    ///
    /// The log is revealed per the configured initial reveal policy.
    pub fn jump_to(&mut self, turn: u32, player: impl Into<PlayerRef>) -> Result<Step, ReplayError> {
        let player = self.store.player_index(&player.into())?;
        let key = PositionKey::new(turn, player);
        if !self.index.contains(key) {
            return Err(ReplayError::Unavailable { turn, player });
        }

        Ok(self.move_to(key, self.initial_reveal == InitialReveal::All))
    }

    // === Internals ===

    fn move_to(&mut self, key: PositionKey, end_of_turn: bool) -> Step {
        tracing::debug!(from = %self.position.key, to = %key, end_of_turn, "changing turn");
        self.enter(key, end_of_turn);
        self.notify();
        Step::Moved
    }

    /// Load everything for `key` and make it the current position.
    fn enter(&mut self, key: PositionKey, end_of_turn: bool) {
        // Context first: the store's cache slot has to end on `key`
        let context_key = TurnContext::new(key).snapshot_key();
        self.context = available(context_key, "state", self.store.snapshot_at(context_key));
        self.snapshot = available(key, "state", self.store.snapshot_at(key));
        self.log = available(key, "action", self.store.action_log_at(key));

        // A position is shown whole or not at all
        if self.snapshot.is_none() || self.log.is_none() {
            self.snapshot = None;
            self.log = None;
        }

        let action_index = match &self.log {
            Some(log) if end_of_turn => log.last_index(),
            _ => 0,
        };
        self.position = Position { key, action_index };
    }

    fn notify(&mut self) {
        let change = TurnChange {
            position: self.position,
            snapshot: self.snapshot.as_deref(),
            actions: self
                .log
                .as_deref()
                .map(|log| log.revealed(self.position.action_index)),
        };

        for observer in &mut self.observers {
            observer.turn_changed(&change);
        }
    }

    fn trace_latest(&self) {
        if let Some(action) = self.latest_action() {
            tracing::debug!(
                position = %self.position.key,
                index = self.position.action_index,
                %action,
                "revealed action"
            );
        }
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("position", &self.position)
            .field("state_available", &self.state_available())
            .field("actions_available", &self.actions_available())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

/// Turn a load outcome into availability, logging the failure.
fn available<T>(key: PositionKey, what: &str, loaded: Result<T, LoadError>) -> Option<T> {
    match loaded {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(
                turn = key.turn,
                player = key.player,
                error = %err,
                "unable to get {} data",
                what
            );
            None
        }
    }
}
