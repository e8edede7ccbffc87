use std::collections::BTreeSet;

use conway::{GridEngine, GridSnapshot};

fn engine_with(width: usize, height: usize, live: &[(usize, usize)]) -> GridEngine {
    let mut engine = GridEngine::new(width, height).unwrap();
    for &(x, y) in live {
        assert!(engine.set_cell(x, y, true), "({x}, {y}) is off the board");
    }
    engine
}

fn live_set(snapshot: &GridSnapshot) -> BTreeSet<(usize, usize)> {
    snapshot.live_cells().into_iter().collect()
}

#[test]
fn cell_count_always_matches_dimensions() {
    for (width, height) in [(1, 1), (1, 9), (7, 3), (32, 18)] {
        let mut engine = GridEngine::with_rng_seed(width, height, 5).unwrap();
        let expected = width * height;
        assert_eq!(engine.current_state().cells.len(), expected);
        assert_eq!(engine.seed().cells.len(), expected);
        assert_eq!(engine.step().cells.len(), expected);
        assert_eq!(engine.reset().cells.len(), expected);
        assert_eq!(engine.clear().cells.len(), expected);
    }
}

#[test]
fn unallocatable_board_is_reported_not_aborted() {
    assert!(GridEngine::new(1 << 31, 1 << 31).is_err());
}

#[test]
fn clear_is_idempotent() {
    let mut engine = GridEngine::with_rng_seed(6, 6, 11).unwrap();
    engine.seed();
    engine.step();

    let first = engine.clear();
    let second = engine.clear();
    assert_eq!(first, second);
    assert_eq!(first.live_count(), 0);
    assert_eq!(first.generation, 0);
}

#[test]
fn dead_board_is_a_fixed_point() {
    let mut engine = GridEngine::new(3, 3).unwrap();
    let next = engine.step();
    assert_eq!(next.live_count(), 0);
    assert_eq!(next.generation, 1);
}

#[test]
fn block_is_a_still_life() {
    let block = [(1, 1), (2, 1), (1, 2), (2, 2)];
    let mut engine = engine_with(4, 4, &block);
    let before = live_set(&engine.current_state());
    let after = engine.step();
    assert_eq!(live_set(&after), before);

    let mut engine = engine_with(8, 6, &[(3, 2), (4, 2), (3, 3), (4, 3)]);
    let before = live_set(&engine.current_state());
    assert_eq!(live_set(&engine.step()), before);
}

#[test]
fn lone_corner_cell_dies() {
    let mut engine = engine_with(3, 3, &[(0, 0)]);
    assert_eq!(engine.step().live_count(), 0);
}

#[test]
fn left_edge_does_not_wrap_to_previous_row() {
    // (0, 1) has real neighbors (0, 0) and (1, 0). A wrapping scan would also count
    // (2, 0) through x = -1 and bring (0, 1) to life.
    let mut engine = engine_with(3, 3, &[(0, 0), (1, 0), (2, 0)]);
    let next = engine.step();
    assert!(!next.is_alive(0, 1));
    assert_eq!(live_set(&next), BTreeSet::from([(1, 0), (1, 1)]));
}

#[test]
fn right_edge_does_not_wrap_to_next_row() {
    // (2, 1) has real neighbors (2, 2) and (1, 2). A wrapping scan would also count
    // (0, 2) through x = width.
    let mut engine = engine_with(3, 3, &[(0, 2), (1, 2), (2, 2)]);
    let next = engine.step();
    assert!(!next.is_alive(2, 1));
    assert!(!next.is_alive(0, 1));
    assert_eq!(live_set(&next), BTreeSet::from([(1, 1), (1, 2)]));
}

#[test]
fn bottom_edge_has_no_phantom_row() {
    // Horizontal bar on the last row: the cells below it do not exist, so only the
    // row above gains a cell.
    let mut engine = engine_with(5, 3, &[(1, 2), (2, 2), (3, 2)]);
    let next = engine.step();
    assert_eq!(live_set(&next), BTreeSet::from([(2, 1), (2, 2)]));
}

#[test]
fn generation_counts_steps_and_resets() {
    let mut engine = GridEngine::with_rng_seed(10, 10, 21).unwrap();
    for n in 1..=25 {
        assert_eq!(engine.step().generation, n);
    }
    assert_eq!(engine.reset().generation, 0);
    engine.step();
    engine.step();
    assert_eq!(engine.clear().generation, 0);
    assert_eq!(engine.generation(), 0);
}

#[test]
fn vertical_blinker_turns_horizontal() {
    let mut engine = engine_with(5, 5, &[(1, 1), (1, 2), (1, 3)]);
    let next = engine.step();
    assert_eq!(live_set(&next), BTreeSet::from([(0, 2), (1, 2), (2, 2)]));
    assert!(!next.is_alive(1, 1));
    assert!(!next.is_alive(1, 3));

    let back = engine.step();
    assert_eq!(live_set(&back), BTreeSet::from([(1, 1), (1, 2), (1, 3)]));
}

#[test]
fn snapshots_are_detached_from_the_engine() {
    let mut engine = engine_with(5, 5, &[(1, 1), (1, 2), (1, 3)]);
    let held = engine.current_state();
    engine.step();
    engine.clear();
    assert_eq!(live_set(&held), BTreeSet::from([(1, 1), (1, 2), (1, 3)]));
    assert_eq!(held.generation, 0);
}

#[test]
fn current_state_does_not_advance() {
    let mut engine = GridEngine::new(4, 4).unwrap();
    engine.step();
    assert_eq!(engine.current_state().generation, 1);
    assert_eq!(engine.current_state().generation, 1);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut engine = engine_with(3, 2, &[(2, 1)]);
    engine.step();
    let snapshot = engine.current_state();
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: GridSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);
}

#[test]
fn snapshot_json_with_wrong_cell_count_is_rejected() {
    let short = r#"{"width":3,"height":3,"cells":[true],"generation":0}"#;
    assert!(serde_json::from_str::<GridSnapshot>(short).is_err());
}
