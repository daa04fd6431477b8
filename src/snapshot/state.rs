//! Game snapshots: the full board as of the end of one player-turn.
//!
//! ## Snapshot
//!
//! - `player_order`: seat order, fixed for the whole game
//! - `players`: per-player pool, victory points and regions
//! - `cards`: flat table of every card, keyed by card id
//!
//! Snapshots are immutable once loaded. `Snapshot::from_json` checks the
//! cross-references the rest of the crate relies on, so a snapshot that
//! loads is one whose card table can be resolved into regions.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardKey, CardRecord, RegionId};
use crate::zones::normalize_region_name;

/// Why a snapshot file was rejected.
#[derive(Debug, Error)]
pub enum MalformedSnapshot {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A name in `playerOrder` has no entry in `players`.
    #[error("player '{0}' is in playerOrder but not in players")]
    MissingPlayer(String),

    /// Two of a player's region names are the same once normalized
    /// (`"Ash heap"` and `"ASH_HEAP"`).
    #[error("player '{player}' has more than one region named '{region}'")]
    DuplicateRegionName { player: String, region: String },

    /// Two regions share one numeric id.
    #[error("region id {0} is used by more than one region")]
    DuplicateRegionId(RegionId),

    /// A card points at a region id no player has.
    #[error("card {card} is in {region}, which no player has")]
    UnknownRegion { card: CardKey, region: RegionId },
}

/// A player's handle on one region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRef {
    pub id: RegionId,

    /// Top-level cards physically present, in game-declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<CardKey>,
}

impl RegionRef {
    /// Create an empty region.
    #[must_use]
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            cards: Vec::new(),
        }
    }

    /// Set the top-level card order.
    #[must_use]
    pub fn with_cards(mut self, cards: &[&str]) -> Self {
        self.cards = cards.iter().map(|&c| CardKey::new(c)).collect();
        self
    }
}

/// One player's public state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub name: String,

    /// Resource count.
    #[serde(default)]
    pub pool: i64,

    /// 0.0 means "not applicable" and is not displayed.
    #[serde(default)]
    pub victory_points: f64,

    /// Region name -> region handle.
    #[serde(default)]
    pub regions: FxHashMap<String, RegionRef>,
}

impl PlayerState {
    /// Find a region by name, ignoring case and treating spaces as `_`.
    ///
    /// Loaded snapshots have at most one match (see `Snapshot::from_json`).
    /// Returns the name as the snapshot spells it, and the region.
    #[must_use]
    pub fn region(&self, name: &str) -> Option<(&str, &RegionRef)> {
        let wanted = normalize_region_name(name);
        self.regions
            .iter()
            .find(|(n, _)| normalize_region_name(n) == wanted)
            .map(|(n, r)| (n.as_str(), r))
    }

    /// Region names, sorted.
    #[must_use]
    pub fn region_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Display line: `Name (pool)`, plus ` - N VP` when victory points apply.
    #[must_use]
    pub fn nameplate(&self) -> String {
        if self.victory_points != 0.0 {
            format!("{} ({}) - {} VP", self.name, self.pool, self.victory_points)
        } else {
            format!("{} ({})", self.name, self.pool)
        }
    }
}

/// Full game state as of the end of one player-turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub player_order: Vec<String>,
    pub players: FxHashMap<String, PlayerState>,
    pub cards: FxHashMap<CardKey, CardRecord>,
}

impl Snapshot {
    /// Parse and validate a snapshot document.
    pub fn from_json(json: &str) -> Result<Self, MalformedSnapshot> {
        let mut snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check cross-references and stamp each card with its table key.
    fn validate(&mut self) -> Result<(), MalformedSnapshot> {
        if let Some(missing) = self
            .player_order
            .iter()
            .find(|name| !self.players.contains_key(*name))
        {
            return Err(MalformedSnapshot::MissingPlayer(missing.clone()));
        }

        for (player, state) in &self.players {
            let mut names = FxHashSet::default();
            for name in state.regions.keys() {
                let normalized = normalize_region_name(name);
                if !names.insert(normalized.clone()) {
                    return Err(MalformedSnapshot::DuplicateRegionName {
                        player: player.clone(),
                        region: normalized,
                    });
                }
            }
        }

        let mut region_ids = FxHashSet::default();
        for region in self.players.values().flat_map(|p| p.regions.values()) {
            if !region_ids.insert(region.id) {
                return Err(MalformedSnapshot::DuplicateRegionId(region.id));
            }
        }

        for (key, card) in self.cards.iter_mut() {
            if !region_ids.contains(&card.region) {
                return Err(MalformedSnapshot::UnknownRegion {
                    card: key.clone(),
                    region: card.region,
                });
            }
            card.id = key.clone();
        }

        Ok(())
    }

    /// Look up a player by name.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&PlayerState> {
        self.players.get(name)
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: &CardKey) -> Option<&CardRecord> {
        self.cards.get(id)
    }

    /// Cards currently occupying a region.
    pub fn cards_in(&self, region: RegionId) -> impl Iterator<Item = (&CardKey, &CardRecord)> {
        self.cards.iter().filter(move |(_, c)| c.region == region)
    }

    /// Which player and region name own a region id.
    #[must_use]
    pub fn region_owner(&self, region: RegionId) -> Option<(&str, &str)> {
        self.players.iter().find_map(|(player, state)| {
            state
                .regions
                .iter()
                .find(|(_, r)| r.id == region)
                .map(|(name, _)| (player.as_str(), name.as_str()))
        })
    }
}
