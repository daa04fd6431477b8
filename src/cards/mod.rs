//! Cards: the flat card table model and containment forest rebuilding.
//!
//! ## Key Types
//!
//! - `CardKey`: Card identifier (key of the snapshot's card table)
//! - `RegionId`: Numeric region identifier cards point at
//! - `CardRecord`: One card, with the ids of cards attached to it
//! - `Forest`/`CardNode`: Rebuilt containment tree with outline labels

pub mod forest;
pub mod record;

pub use forest::{build_forest, CardNode, Forest, ForestAnomaly, ForestRow};
pub use record::{CardKey, CardRecord, RegionId};
