//! Shared fixtures: recorded game directories written to a temp dir.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

pub const PLAYERS: [&str; 3] = ["Ankha", "Bram", "Cyd"];

/// READY region id of a 1-based seat.
pub fn ready_id(seat: u32) -> u64 {
    u64::from(seat) * 10 + 1
}

/// ASH_HEAP region id of a 1-based seat.
pub fn ash_heap_id(seat: u32) -> u64 {
    u64::from(seat) * 10 + 2
}

/// Pool value stamped into every player of the snapshot at `(turn, player)`,
/// so tests can tell which file was read.
pub fn marker(turn: u32, player: u32) -> i64 {
    i64::from(turn * 100 + player)
}

/// Snapshot document for `(turn, player)`.
///
/// Ankha's READY holds a minion named after the position, carrying a sword.
/// Bram's ASH_HEAP holds one burned card.
pub fn snapshot_doc(turn: u32, player: u32) -> Value {
    let mut players = serde_json::Map::new();
    for (i, name) in PLAYERS.iter().enumerate() {
        let seat = i as u32 + 1;
        let ready_cards: Vec<&str> = if seat == 1 { vec!["1"] } else { vec![] };
        let victory_points = if seat == 3 { 1.0 } else { 0.0 };
        players.insert(
            name.to_string(),
            json!({
                "name": name,
                "pool": marker(turn, player),
                "victoryPoints": victory_points,
                "regions": {
                    "READY": {"id": ready_id(seat), "cards": ready_cards},
                    "ASH_HEAP": {"id": ash_heap_id(seat)}
                }
            }),
        );
    }

    json!({
        "playerOrder": PLAYERS,
        "players": players,
        "cards": {
            "1": {"name": format!("Minion {}-{}", turn, player), "region": ready_id(1), "cards": ["2"]},
            "2": {"name": "Sword", "region": ready_id(1)},
            "3": {"name": "Burned", "region": ash_heap_id(2)}
        }
    })
}

/// Action log document with `count` entries.
pub fn actions_doc(turn: u32, player: u32, count: usize) -> Value {
    let chats: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "timestamp": format!("{:02}:{:02}", turn, i),
                "source": PLAYERS[(player - 1) as usize],
                "message": action_message(turn, player, i)
            })
        })
        .collect();

    json!({"turnId": format!("{}.{}", turn, player), "chats": chats})
}

pub fn action_message(turn: u32, player: u32, index: usize) -> String {
    format!("t{}p{}a{}", turn, player, index)
}

pub fn write_json(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Recorded player-turns of the standard game and their log lengths.
///
/// Bram has no record for turn 2; turn 3 only has Ankha.
pub const RECORDED: [((u32, u32), usize); 6] = [
    ((1, 1), 2),
    ((1, 2), 3),
    ((1, 3), 1),
    ((2, 1), 2),
    ((2, 3), 4),
    ((3, 1), 3),
];

/// Route crate logs to the test output, filtered by `RUST_LOG` (default
/// `warn`). Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Write the standard game: a snapshot and a log for every recorded turn.
pub fn standard_game() -> TempDir {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    for ((turn, player), count) in RECORDED {
        write_json(dir.path(), &format!("game-{}-{}.json", turn, player), &snapshot_doc(turn, player));
        write_json(dir.path(), &format!("actions-{}-{}.json", turn, player), &actions_doc(turn, player, count));
    }
    dir
}

/// Log length of a recorded turn in the standard game.
pub fn log_len(turn: u32, player: u32) -> usize {
    RECORDED
        .iter()
        .find(|((t, p), _)| *t == turn && *p == player)
        .map(|(_, n)| *n)
        .unwrap()
}
