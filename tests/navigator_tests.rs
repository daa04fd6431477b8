//! Navigator integration tests.
//!
//! These tests replay recorded game directories written to a temp dir and
//! verify stepping across player and turn boundaries, reload behavior and
//! change notification.

mod common;

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use jol_replay::{
    CardKey, Navigator, Position, PositionKey, ReplayConfig, ReplayError, Snapshot, Step,
    TurnChange,
};

use common::{action_message, actions_doc, log_len, marker, snapshot_doc, standard_game, write_json};

fn open(dir: &tempfile::TempDir) -> Navigator {
    Navigator::open(ReplayConfig::new(dir.path())).unwrap()
}

/// Record every notification as (turn, player, action index, revealed count,
/// state available).
fn record(nav: &mut Navigator) -> Rc<RefCell<Vec<(u32, u32, usize, Option<usize>, bool)>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    nav.subscribe(move |change: &TurnChange<'_>| {
        sink.borrow_mut().push((
            change.turn(),
            change.player(),
            change.position.action_index,
            change.actions.map(<[_]>::len),
            change.snapshot.is_some(),
        ));
    });
    seen
}

/// Test the initial position is loaded eagerly.
#[test]
fn test_open_at_first_position() {
    let dir = standard_game();
    let nav = open(&dir);

    assert_eq!(nav.position(), Position::new(1, 1, 0));
    assert!(nav.state_available());
    assert!(nav.actions_available());
    assert_eq!(nav.revealed_actions().unwrap().len(), 1);
    assert_eq!(nav.latest_action().unwrap().message, action_message(1, 1, 0));
    assert_eq!(nav.players(), &["Ankha", "Bram", "Cyd"]);
}

/// Test next_turn from (1,1) visits every recorded player-turn in order.
#[test]
fn test_next_turn_visits_every_recorded_position() {
    let dir = standard_game();
    let mut nav = open(&dir);

    let mut visited = vec![nav.position().key];
    while nav.next_turn() == Step::Moved {
        assert_eq!(nav.action_index(), 0);
        visited.push(nav.position().key);
    }

    let expected: Vec<_> = nav.turn_index().iter().collect();
    assert_eq!(visited, expected);
    assert_eq!(nav.position().key, PositionKey::new(3, 1));
    assert_eq!(nav.position().key, nav.turn_index().last().unwrap());
}

/// Test stepping past the last recorded position is a no-op.
#[test]
fn test_last_position_is_stuck() {
    let dir = standard_game();
    let mut nav = open(&dir);
    while nav.next_turn().changed() {}

    let before = nav.position();
    let seen = record(&mut nav);

    assert_eq!(nav.next_turn(), Step::Stuck);
    assert_eq!(nav.position(), before);
    assert!(seen.borrow().is_empty());
}

/// Test previous_turn walks back to (1,1) and stops there.
#[test]
fn test_previous_turn_back_to_start() {
    let dir = standard_game();
    let mut nav = open(&dir);
    while nav.next_turn().changed() {}

    let mut visited = vec![nav.position().key];
    while nav.previous_turn() == Step::Moved {
        assert_eq!(nav.action_index(), 0);
        visited.push(nav.position().key);
    }
    visited.reverse();

    let expected: Vec<_> = nav.turn_index().iter().collect();
    assert_eq!(visited, expected);
    assert_eq!(nav.position(), Position::new(1, 1, 0));
    assert_eq!(nav.previous_turn(), Step::Stuck);
}

/// Test a missing record is skipped: Bram has no turn 2 file.
#[test]
fn test_turn_boundary_skips_unrecorded_player() {
    let dir = standard_game();
    let mut nav = open(&dir);
    nav.jump_to(2, "Ankha").unwrap();

    nav.next_turn();
    assert_eq!(nav.position().key, PositionKey::new(2, 3));

    nav.previous_turn();
    assert_eq!(nav.position().key, PositionKey::new(2, 1));

    nav.previous_turn();
    assert_eq!(nav.position().key, PositionKey::new(1, 3));
}

/// Test next_action reveals within a log, then rolls into the next position.
#[test]
fn test_next_action_rolls_into_next_position() {
    let dir = standard_game();
    let mut nav = open(&dir);

    assert_eq!(nav.next_action(), Step::Revealed);
    assert_eq!(nav.position(), Position::new(1, 1, 1));
    assert_eq!(nav.revealed_actions().unwrap().len(), 2);

    // (1,1) has two actions; the next step crosses into (1,2)
    assert_eq!(nav.next_action(), Step::Moved);
    assert_eq!(nav.position(), Position::new(1, 2, 0));
    assert_eq!(nav.latest_action().unwrap().message, action_message(1, 2, 0));
}

/// Test previous_action at a boundary lands on the last action of the prior
/// position.
#[test]
fn test_previous_action_reveals_prior_log() {
    let dir = standard_game();
    let mut nav = open(&dir);
    nav.next_turn();
    assert_eq!(nav.position(), Position::new(1, 2, 0));

    assert_eq!(nav.previous_action(), Step::Moved);

    let last = log_len(1, 1) - 1;
    assert_eq!(nav.position(), Position::new(1, 1, last));
    assert_eq!(nav.revealed_actions().unwrap().len(), log_len(1, 1));
}

/// Test next_action then previous_action returns to the same position away
/// from boundaries.
#[test]
fn test_action_round_trip() {
    let dir = standard_game();
    let mut nav = open(&dir);
    nav.jump_to(2, 3u32).unwrap(); // Four actions

    nav.next_action();
    let start = nav.position();

    assert_eq!(nav.next_action(), Step::Revealed);
    assert_eq!(nav.previous_action(), Step::Revealed);
    assert_eq!(nav.position(), start);
}

/// Test previous_action at the very start is a no-op.
#[test]
fn test_previous_action_at_start_is_stuck() {
    let dir = standard_game();
    let mut nav = open(&dir);

    assert_eq!(nav.previous_action(), Step::Stuck);
    assert_eq!(nav.position(), Position::new(1, 1, 0));
}

/// Test action-by-action replay covers every entry of every log once.
#[test]
fn test_full_action_replay() {
    let dir = standard_game();
    let mut nav = open(&dir);

    let mut messages = vec![nav.latest_action().unwrap().message.clone()];
    while nav.next_action().changed() {
        messages.push(nav.latest_action().unwrap().message.clone());
    }

    let expected: Vec<String> = nav
        .turn_index()
        .iter()
        .flat_map(|k| (0..log_len(k.turn, k.player)).map(move |i| action_message(k.turn, k.player, i)))
        .collect();
    assert_eq!(messages, expected);
    assert_eq!(nav.position(), Position::new(3, 1, log_len(3, 1) - 1));
}

/// Test observers see every change, after the getters already moved.
#[test]
fn test_notifications() {
    let dir = standard_game();
    let mut nav = open(&dir);
    let seen = record(&mut nav);

    nav.next_action(); // Reveal (1,1) #1
    nav.next_action(); // Into (1,2)
    nav.previous_action(); // Back to (1,1), fully revealed

    assert_eq!(
        *seen.borrow(),
        vec![
            (1, 1, 1, Some(2), true),
            (1, 2, 0, Some(1), true),
            (1, 1, 1, Some(2), true),
        ]
    );
}

/// Test player data by seat and by name are the same, and come from the
/// current position's snapshot.
#[test]
fn test_player_data_by_seat_and_name() {
    let dir = standard_game();
    let mut nav = open(&dir);
    nav.next_turn();
    nav.next_turn();

    let by_seat = nav.player_data(3u32).unwrap().clone();
    let by_name = nav.player_data("Cyd").unwrap().clone();

    assert_eq!(by_seat, by_name);
    assert_eq!(by_seat.pool, marker(1, 3));
    assert_eq!(by_seat.nameplate(), format!("Cyd ({}) - 1 VP", marker(1, 3)));
    assert!(matches!(nav.player_data("Dana"), Err(ReplayError::UnknownPlayer(_))));
    assert!(matches!(nav.player_data(4u32), Err(ReplayError::UnknownPlayer(_))));
}

/// Test region contents read the previous turn's snapshot after turn 1.
#[test]
fn test_region_contents_read_previous_turn() {
    let dir = standard_game();
    let mut nav = open(&dir);

    // Turn 1 reads its own snapshot
    nav.jump_to(1, 2u32).unwrap();
    let forest = nav.forest("Ankha", "Ready").unwrap();
    assert_eq!(forest.roots[0].card.name, "Minion 1-2");

    // Turn 2, Cyd reads turn 1, Cyd
    nav.jump_to(2, "Cyd").unwrap();
    let forest = nav.forest(1u32, "ready").unwrap();
    assert_eq!(forest.roots[0].card.name, "Minion 1-3");
    assert_eq!(forest.roots[0].children[0].label, "1.1");

    // While the snapshot getter shows the current position
    assert_eq!(nav.snapshot().unwrap().player("Ankha").unwrap().pool, marker(2, 3));
}

/// Test region contents filter by region id across players.
#[test]
fn test_region_contents_by_region() {
    let dir = standard_game();
    let nav = open(&dir);

    let heap = nav.region_contents("Bram", "Ash heap").unwrap();
    assert_eq!(heap.region_name, "ASH_HEAP");
    assert_eq!(heap.len(), 1);
    assert!(heap.card_data.contains_key(&CardKey::new("3")));

    assert!(nav.region_contents("Ankha", "Ash heap").unwrap().is_empty());
    assert!(matches!(
        nav.region_contents("Ankha", "Crypt"),
        Err(ReplayError::UnknownRegion { .. })
    ));
    assert_eq!(nav.player_regions(1u32).unwrap(), vec!["ASH_HEAP", "READY"]);
}

/// Test a position without a snapshot is entered with neither state nor
/// actions available.
#[test]
fn test_missing_snapshot_is_unavailable() {
    let dir = standard_game();
    fs::remove_file(dir.path().join("game-2-1.json")).unwrap();
    let mut nav = open(&dir);
    nav.jump_to(1, 3u32).unwrap();
    let seen = record(&mut nav);

    assert_eq!(nav.next_turn(), Step::Moved);

    assert_eq!(nav.position(), Position::new(2, 1, 0));
    assert!(!nav.state_available());
    assert!(!nav.actions_available());
    assert!(nav.snapshot().is_none());
    assert!(nav.revealed_actions().is_none());
    assert!(matches!(
        nav.player_data(1u32),
        Err(ReplayError::Unavailable { turn: 2, player: 1 })
    ));
    assert_eq!(*seen.borrow(), vec![(2, 1, 0, None, false)]);

    // No log to step through, so the next action is the next position
    assert_eq!(nav.next_action(), Step::Moved);
    assert_eq!(nav.position(), Position::new(2, 3, 0));
    assert_eq!(nav.previous_action(), Step::Moved);
    assert_eq!(nav.position(), Position::new(2, 1, 0));

    // Regions at (2,1) come from (1,1), which is fine
    assert!(nav.region_contents(1u32, "Ready").is_ok());

    // Regions at (3,1) would come from (2,1)
    nav.next_turn();
    nav.next_turn();
    assert_eq!(nav.position().key, PositionKey::new(3, 1));
    assert!(nav.state_available());
    assert!(matches!(
        nav.region_contents(1u32, "Ready"),
        Err(ReplayError::Unavailable { turn: 2, player: 1 })
    ));
}

/// Test a position without an action log still moves, reports its state
/// unavailable too, and action stepping continues past it.
#[test]
fn test_missing_action_log() {
    let dir = standard_game();
    // Recorded in the index, but unreadable
    fs::write(dir.path().join("actions-1-2.json"), "not json").unwrap();
    let mut nav = open(&dir);

    nav.next_turn();
    assert_eq!(nav.position(), Position::new(1, 2, 0));
    assert!(!nav.actions_available());
    assert!(!nav.state_available());
    assert!(nav.revealed_actions().is_none());
    assert!(nav.snapshot().is_none());

    assert_eq!(nav.next_action(), Step::Moved);
    assert_eq!(nav.position().key, PositionKey::new(1, 3));
}

/// Test an empty log keeps the action index at zero.
#[test]
fn test_empty_action_log() {
    let dir = standard_game();
    write_json(dir.path(), "actions-1-2.json", &actions_doc(1, 2, 0));
    let mut nav = open(&dir);
    nav.next_turn();

    assert_eq!(nav.revealed_actions(), Some(&[][..]));
    assert_eq!(nav.next_action(), Step::Moved);
    assert_eq!(nav.position(), Position::new(1, 3, 0));

    assert_eq!(nav.previous_action(), Step::Moved);
    assert_eq!(nav.position(), Position::new(1, 2, 0));
}

/// Test jump_to validates its target.
#[test]
fn test_jump_to_unrecorded_position() {
    let dir = standard_game();
    let mut nav = open(&dir);

    assert!(matches!(
        nav.jump_to(2, "Bram"),
        Err(ReplayError::Unavailable { turn: 2, player: 2 })
    ));
    assert!(matches!(nav.jump_to(1, "Dana"), Err(ReplayError::UnknownPlayer(_))));
    assert_eq!(nav.position(), Position::new(1, 1, 0));
}

/// Test the reveal-all policy on open and jump.
#[test]
fn test_reveal_all_initially() {
    let dir = standard_game();
    let mut nav = Navigator::open(ReplayConfig::new(dir.path()).reveal_all_initially()).unwrap();

    assert_eq!(nav.action_index(), log_len(1, 1) - 1);

    nav.jump_to(2, 3u32).unwrap();
    assert_eq!(nav.action_index(), log_len(2, 3) - 1);

    // Directional steps are unaffected
    nav.next_turn();
    assert_eq!(nav.action_index(), 0);
}

/// Test the loaded snapshot matches its file for every recorded position.
#[test]
fn test_snapshots_match_files() {
    let dir = standard_game();
    let mut nav = open(&dir);

    loop {
        let key = nav.position().key;
        let expected = Snapshot::from_json(&snapshot_doc(key.turn, key.player).to_string()).unwrap();
        let loaded = nav.snapshot().unwrap();
        let reparsed = Snapshot::from_json(&serde_json::to_string(loaded).unwrap()).unwrap();

        assert_eq!(loaded, &expected);
        assert_eq!(reparsed, expected);
        assert_eq!(nav.action_log().unwrap().turn_id, format!("{}.{}", key.turn, key.player));

        if !nav.next_turn().changed() {
            break;
        }
    }
}

/// Test opening a directory without the first snapshot fails.
#[test]
fn test_open_without_first_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "actions-1-1.json", &actions_doc(1, 1, 1));

    assert!(matches!(
        Navigator::open(ReplayConfig::new(dir.path())),
        Err(ReplayError::Load(_))
    ));
}
