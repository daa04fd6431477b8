//! Card records as they appear in a snapshot's flat card table.
//!
//! A snapshot does not store cards inside regions. Every card lives in one
//! flat table keyed by `CardKey`, records the numeric `RegionId` it occupies,
//! and lists the cards directly attached to it (equipment on a minion,
//! retainers, and so on). The containment tree is rebuilt from that.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Card identifier, as used for keys of the card table.
///
/// Snapshots write ids as JSON strings in object keys and usually as strings
/// in child lists; bare numbers are accepted too.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawCardKey")]
pub struct CardKey(pub String);

impl CardKey {
    /// Create a new card key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCardKey {
    Text(String),
    Number(u64),
}

impl From<RawCardKey> for CardKey {
    fn from(raw: RawCardKey) -> Self {
        match raw {
            RawCardKey::Text(s) => CardKey(s),
            RawCardKey::Number(n) => CardKey(n.to_string()),
        }
    }
}

impl From<&str> for CardKey {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable numeric identifier of a region.
///
/// Cards are matched to regions by this id, never by region name: a card
/// taken by another player keeps pointing at the region it physically sits
/// in, whichever player that region belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

impl RegionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Region({})", self.0)
    }
}

/// One entry of the flat card table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Filled in from the table key when the snapshot is loaded.
    #[serde(default)]
    pub id: CardKey,

    pub name: String,

    /// Region the card currently occupies.
    pub region: RegionId,

    /// Cards directly attached to this one, in declared order.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub cards: SmallVec<[CardKey; 4]>,
}

impl CardRecord {
    /// Create a card with no attached cards.
    pub fn new(id: impl Into<String>, name: impl Into<String>, region: RegionId) -> Self {
        Self {
            id: CardKey::new(id),
            name: name.into(),
            region,
            cards: SmallVec::new(),
        }
    }

    /// Attach a child card id.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<String>) -> Self {
        self.cards.push(CardKey::new(child));
        self
    }

    /// Check if any cards are attached.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.cards.is_empty()
    }
}
