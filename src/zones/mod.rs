//! Regions: resolving which cards sit in a player's region.
//!
//! ## Key Types
//!
//! - `RegionContents`: A region handle plus the cards filtered into it
//! - `TurnContext`: The replay position a query is made from, which decides
//!   the snapshot it reads

pub mod resolver;

pub use resolver::{normalize_region_name, region_contents, RegionContents, TurnContext};
