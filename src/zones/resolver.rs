//! Region contents resolution.
//!
//! A region's cards are found by filtering the snapshot's flat card table on
//! the region's numeric id. The result is exactly the input the forest
//! builder needs: the region handle (for its declared top-level order) and
//! the id-keyed cards that physically sit in it. Cards of other regions are
//! never pulled in, even when a card here lists them as children.
//!
//! ## Turn context
//!
//! While a player-turn is being replayed, its own actions have not resolved
//! into the board yet. Region contents for position `(t, p)` are therefore
//! read from the snapshot at `(t - 1, p)`; on turn 1 there is no earlier
//! snapshot and `(1, p)` itself is used.

use rustc_hash::FxHashMap;

use crate::cards::{build_forest, CardKey, CardRecord, Forest};
use crate::core::{PlayerRef, PositionKey, ReplayError};
use crate::snapshot::{RegionRef, Snapshot};

/// Canonical region key: upper case, spaces as underscores.
///
/// ```
/// use jol_replay::zones::normalize_region_name;
///
/// assert_eq!(normalize_region_name("Ash heap"), "ASH_HEAP");
/// assert_eq!(normalize_region_name("READY"), "READY");
/// ```
#[must_use]
pub fn normalize_region_name(name: &str) -> String {
    name.trim().to_uppercase().replace(' ', "_")
}

/// The replay position a region query is made from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnContext {
    pub position: PositionKey,
}

impl TurnContext {
    #[must_use]
    pub const fn new(position: PositionKey) -> Self {
        Self { position }
    }

    /// Which snapshot region contents are read from.
    #[must_use]
    pub const fn snapshot_key(&self) -> PositionKey {
        self.position.previous_turn()
    }
}

/// The cards physically present in one player's region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionContents {
    /// Owning player's name.
    pub player: String,

    /// Region name as the snapshot spells it.
    pub region_name: String,

    pub region: RegionRef,

    /// Cards whose region id is this region's, keyed by id.
    pub card_data: FxHashMap<CardKey, CardRecord>,
}

impl RegionContents {
    /// Number of cards in the region, attached cards included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.card_data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card_data.is_empty()
    }

    /// Rebuild the region's containment forest.
    #[must_use]
    pub fn forest(&self) -> Forest {
        build_forest(&self.card_data, &self.region.cards)
    }
}

/// Resolve one player's region in a snapshot.
///
/// `player_order` is the game's fixed seat order, used to turn a numeric
/// player reference into a name.
pub fn region_contents(
    snapshot: &Snapshot,
    player_order: &[String],
    player: &PlayerRef,
    region: &str,
) -> Result<RegionContents, ReplayError> {
    let (_, name) = player.resolve(player_order)?;
    let state = snapshot
        .player(name)
        .ok_or_else(|| ReplayError::UnknownPlayer(name.to_string()))?;

    let (region_name, region_ref) =
        state
            .region(region)
            .ok_or_else(|| ReplayError::UnknownRegion {
                player: name.to_string(),
                region: region.to_string(),
            })?;

    let card_data = snapshot
        .cards_in(region_ref.id)
        .map(|(k, c)| (k.clone(), c.clone()))
        .collect();

    Ok(RegionContents {
        player: name.to_string(),
        region_name: region_name.to_string(),
        region: region_ref.clone(),
        card_data,
    })
}
