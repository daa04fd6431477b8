//! Containment forest reconstruction.
//!
//! Given the cards of one region (a flat, id-keyed table) and the region's
//! declared top-level order, rebuild the tree of which card holds which and
//! number it as an outline: `1`, `1.1`, `1.1.1`, `1.2`, `2`, ...
//!
//! ## Rules
//!
//! - A card is a root iff no *other* card of the same table lists it as a
//!   child. Cards in other regions never count as parents here.
//! - Roots are numbered in the region's declared order; roots the region
//!   does not list follow in card-id order.
//! - Children are walked in declared order and numbered consecutively.
//!
//! ## Anomalies
//!
//! Malformed containment never panics or loops. Each problem is recorded as
//! a `ForestAnomaly` on the returned `Forest` and logged:
//!
//! - a child that is not in the table (it belongs to another region) is
//!   skipped and appears only in its own region's tree
//! - a card listed under two parents stays under the first one reached
//! - a child that is also an ancestor on the current path is not descended
//!   into; cards only reachable through such a cycle are promoted to roots

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::record::{CardKey, CardRecord};

/// A card placed in the forest, with its outline label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardNode {
    /// Dotted outline label (`"2.1.3"`).
    pub label: String,
    pub card: CardRecord,
    pub children: Vec<CardNode>,
}

impl CardNode {
    /// Nesting depth, 0 for roots.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.label.matches('.').count()
    }

    /// Total nodes in this subtree, including this one.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(CardNode::size).sum::<usize>()
    }
}

/// A containment problem found while building a forest.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ForestAnomaly {
    /// `parent` lists `child`, but `child` is not in this region.
    #[error("card {parent} lists child {child} from another region")]
    ForeignChild { parent: CardKey, child: CardKey },

    /// `card` is listed by more than one parent; it stays under the first.
    #[error("card {card} is also listed under {parent}")]
    DuplicateChild { card: CardKey, parent: CardKey },

    /// `card` lists `ancestor`, which already encloses it.
    #[error("containment cycle: {card} lists its ancestor {ancestor}")]
    Cycle { card: CardKey, ancestor: CardKey },

    /// The region lists `card` at top level, but the card is elsewhere.
    #[error("region lists card {card} that is not in it")]
    MissingListed { card: CardKey },
}

/// One row of a depth-first walk over a forest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForestRow<'a> {
    pub label: &'a str,
    pub depth: usize,
    pub card: &'a CardRecord,
}

/// The rebuilt containment forest of one region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Forest {
    pub roots: Vec<CardNode>,
    pub anomalies: Vec<ForestAnomaly>,
}

impl Forest {
    /// Total number of placed cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.iter().map(CardNode::size).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Check if the data was well-formed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Depth-first, declared-order rows. This is the order a region list is
    /// drawn in.
    #[must_use]
    pub fn flatten(&self) -> Vec<ForestRow<'_>> {
        fn walk<'a>(node: &'a CardNode, depth: usize, out: &mut Vec<ForestRow<'a>>) {
            out.push(ForestRow {
                label: &node.label,
                depth,
                card: &node.card,
            });
            for child in &node.children {
                walk(child, depth + 1, out);
            }
        }

        let mut rows = Vec::with_capacity(self.len());
        for root in &self.roots {
            walk(root, 0, &mut rows);
        }
        rows
    }

    /// Find the node with the given label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&CardNode> {
        let mut segments = label.split('.').map(|s| s.parse::<usize>().ok());
        let first = segments.next()??.checked_sub(1)?;
        let mut node = self.roots.get(first)?;
        for segment in segments {
            node = node.children.get(segment?.checked_sub(1)?)?;
        }
        Some(node)
    }

    /// `(label, card name)` pairs in depth-first order.
    #[must_use]
    pub fn labels(&self) -> Vec<(String, String)> {
        self.flatten()
            .into_iter()
            .map(|row| (row.label.to_string(), row.card.name.clone()))
            .collect()
    }
}

/// Rebuild the containment forest of one region.
///
/// `cards` must already be filtered to a single region; `top_level` is the
/// region's declared card order.
#[must_use]
pub fn build_forest(cards: &FxHashMap<CardKey, CardRecord>, top_level: &[CardKey]) -> Forest {
    let mut builder = ForestBuilder {
        cards,
        placed: FxHashSet::default(),
        anomalies: Vec::new(),
    };

    // Cards some other card in this table claims as a child
    let mut claimed: FxHashSet<&CardKey> = FxHashSet::default();
    for (key, card) in cards {
        for child in &card.cards {
            if child != key && cards.contains_key(child) {
                claimed.insert(child);
            }
        }
    }

    let order = builder.root_order(top_level);

    let mut roots = Vec::new();
    for key in order.iter().filter(|k| !claimed.contains(**k)) {
        let label = (roots.len() + 1).to_string();
        roots.push(builder.attach(key, label, &mut Vec::new()));
    }

    // Only cards reachable solely through a cycle are left over
    for key in &order {
        if !builder.placed.contains(*key) {
            let label = (roots.len() + 1).to_string();
            roots.push(builder.attach(key, label, &mut Vec::new()));
        }
    }

    for anomaly in &builder.anomalies {
        tracing::warn!(%anomaly, "containment anomaly");
    }

    Forest {
        roots,
        anomalies: builder.anomalies,
    }
}

struct ForestBuilder<'a> {
    cards: &'a FxHashMap<CardKey, CardRecord>,
    placed: FxHashSet<CardKey>,
    anomalies: Vec<ForestAnomaly>,
}

impl<'a> ForestBuilder<'a> {
    /// Every card of the table once: declared top-level order first, then the
    /// rest by card id.
    fn root_order(&mut self, top_level: &[CardKey]) -> Vec<&'a CardKey> {
        let cards = self.cards;
        let mut seen: FxHashSet<&CardKey> = FxHashSet::default();
        let mut order = Vec::with_capacity(cards.len());

        for key in top_level {
            match cards.get_key_value(key) {
                Some((key, _)) => {
                    if seen.insert(key) {
                        order.push(key);
                    }
                }
                None => self
                    .anomalies
                    .push(ForestAnomaly::MissingListed { card: key.clone() }),
            }
        }

        let mut rest: Vec<&CardKey> = cards.keys().filter(|k| !seen.contains(k)).collect();
        rest.sort_by(|a, b| id_sort_key(a).cmp(&id_sort_key(b)));
        order.extend(rest);
        order
    }

    fn attach(&mut self, key: &CardKey, label: String, path: &mut Vec<CardKey>) -> CardNode {
        let cards = self.cards;
        let card = &cards[key];
        self.placed.insert(key.clone());
        path.push(key.clone());

        let mut children = Vec::new();
        for child in &card.cards {
            if !cards.contains_key(child) {
                self.anomalies.push(ForestAnomaly::ForeignChild {
                    parent: key.clone(),
                    child: child.clone(),
                });
            } else if path.contains(child) {
                self.anomalies.push(ForestAnomaly::Cycle {
                    card: key.clone(),
                    ancestor: child.clone(),
                });
            } else if self.placed.contains(child) {
                self.anomalies.push(ForestAnomaly::DuplicateChild {
                    card: child.clone(),
                    parent: key.clone(),
                });
            } else {
                let child_label = format!("{}.{}", label, children.len() + 1);
                children.push(self.attach(child, child_label, path));
            }
        }

        path.pop();
        CardNode {
            label,
            card: card.clone(),
            children,
        }
    }
}

/// Numeric ids in numeric order, anything else after them lexically.
fn id_sort_key(key: &CardKey) -> (u8, u64, &str) {
    match key.as_str().parse::<u64>() {
        Ok(n) => (0, n, key.as_str()),
        Err(_) => (1, 0, key.as_str()),
    }
}
