//! Action logs: the recorded chat and action lines of one player-turn.
//!
//! Logs are historical and append-only. The navigator never shows a whole
//! log at once; it reveals a growing prefix via `ActionLog::revealed`.

use serde::{Deserialize, Serialize};

/// One recorded line of a player-turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    /// Timestamp as recorded by the game server (opaque text).
    pub timestamp: String,

    /// Acting player, if the line has one. System lines do not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub message: String,
}

impl ActionEntry {
    /// Create a new entry.
    pub fn new(
        timestamp: impl Into<String>,
        source: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            source: source.map(str::to_string),
            message: message.into(),
        }
    }

    /// Plain-text rendering: `<timestamp> [<source> ]<message>`.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.source {
            Some(source) => format!("{} {} {}", self.timestamp, source, self.message),
            None => format!("{} {}", self.timestamp, self.message),
        }
    }
}

impl std::fmt::Display for ActionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// The action log of one player-turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLog {
    /// Server-side identifier of the turn (e.g. `"3.2"`).
    #[serde(default)]
    pub turn_id: String,

    pub chats: Vec<ActionEntry>,
}

impl ActionLog {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// Index of the final entry (0 for an empty log).
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.chats.len().saturating_sub(1)
    }

    /// Entries `0..=action_index`, clamped to the log length.
    #[must_use]
    pub fn revealed(&self, action_index: usize) -> &[ActionEntry] {
        let end = (action_index + 1).min(self.chats.len());
        &self.chats[..end]
    }
}
