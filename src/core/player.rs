//! Player references.
//!
//! Callers may name a player either by 1-based seat index or by the literal
//! player name. `PlayerRef` carries either form until it is resolved against
//! the game's fixed player order.

use serde::{Deserialize, Serialize};

use super::error::ReplayError;

/// Reference to a player, by 1-based seat or by name.
///
/// ```
/// use jol_replay::core::PlayerRef;
///
/// let order = vec!["Ankha".to_string(), "Bram".to_string()];
///
/// assert_eq!(PlayerRef::from(2u32).resolve(&order).unwrap(), (2, "Bram"));
/// assert_eq!(PlayerRef::from("Ankha").resolve(&order).unwrap(), (1, "Ankha"));
/// assert!(PlayerRef::from(3u32).resolve(&order).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRef {
    /// 1-based position in the player order.
    Index(u32),
    /// Player name as it appears in the player order.
    Name(String),
}

impl PlayerRef {
    /// Resolve against a player order, returning the 1-based index and name.
    pub fn resolve<'a>(&self, order: &'a [String]) -> Result<(u32, &'a str), ReplayError> {
        match self {
            PlayerRef::Index(ix) => {
                let slot = (*ix as usize)
                    .checked_sub(1)
                    .and_then(|i| order.get(i))
                    .ok_or_else(|| ReplayError::UnknownPlayer(ix.to_string()))?;
                Ok((*ix, slot.as_str()))
            }
            PlayerRef::Name(name) => order
                .iter()
                .position(|p| p == name)
                .map(|i| (i as u32 + 1, order[i].as_str()))
                .ok_or_else(|| ReplayError::UnknownPlayer(name.clone())),
        }
    }

    /// Resolve to the 1-based index only.
    pub fn index_in(&self, order: &[String]) -> Result<u32, ReplayError> {
        self.resolve(order).map(|(ix, _)| ix)
    }
}

impl From<u32> for PlayerRef {
    fn from(ix: u32) -> Self {
        PlayerRef::Index(ix)
    }
}

impl From<&str> for PlayerRef {
    fn from(name: &str) -> Self {
        PlayerRef::Name(name.to_string())
    }
}

impl From<String> for PlayerRef {
    fn from(name: String) -> Self {
        PlayerRef::Name(name)
    }
}

impl From<&String> for PlayerRef {
    fn from(name: &String) -> Self {
        PlayerRef::Name(name.clone())
    }
}

impl std::fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerRef::Index(ix) => write!(f, "Player {}", ix),
            PlayerRef::Name(name) => f.write_str(name),
        }
    }
}
