use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use core::sync::atomic::{AtomicUsize, Ordering};

fn ids(prefix: &str, count: usize) -> Arc<Vec<String>> {
    Arc::new((0..count).map(|i| format!("{prefix}-{i}")).collect())
}

fn engine_over(keys: &Arc<Vec<String>>) -> WindowEngine<String> {
    let keys = Arc::clone(keys);
    WindowEngine::new(
        WindowOptions::new(keys.len(), move |i| keys[i].clone())
            .with_page_size(20)
            .with_initial_load_count(12),
    )
    .unwrap()
}

fn cols(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

// WindowEngine

#[test]
fn initial_load_clamps_to_collection() {
    let e = engine_over(&ids("a", 10_000));
    assert_eq!(e.materialized(), 12);
    assert!(e.has_more());
    assert!(!e.is_loading());

    let small = engine_over(&ids("a", 5));
    assert_eq!(small.materialized(), 5);
    assert!(!small.has_more());
}

#[test]
fn empty_collection_has_nothing_to_load() {
    let mut e = engine_over(&ids("a", 0));
    assert_eq!(e.materialized(), 0);
    assert!(!e.has_more());
    assert!(!e.load_more());
    assert_eq!(e.commit_pending(), CommitOutcome::Idle);
}

#[test]
fn invalid_config_fails_fast() {
    let keys = ids("a", 10);
    let k = Arc::clone(&keys);
    let err = WindowEngine::new(
        WindowOptions::new(10, move |i| k[i].clone()).with_page_size(0),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::InvalidPageSize);

    let k = Arc::clone(&keys);
    let err = WindowEngine::new(
        WindowOptions::new(10, move |i| k[i].clone()).with_initial_load_count(0),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::InvalidInitialLoadCount);
}

#[test]
fn sentinel_trigger_grows_by_one_page() {
    let mut e = engine_over(&ids("a", 10_000));
    assert!(e.notify_end_sentinel_visible());
    assert!(e.is_loading());
    assert_eq!(e.materialized(), 12, "growth is deferred to the commit");

    assert_eq!(e.commit_pending(), CommitOutcome::Applied);
    assert_eq!(e.materialized(), 32);
    assert!(e.has_more());
    assert!(!e.is_loading());
}

#[test]
fn at_most_one_load_in_flight() {
    let mut e = engine_over(&ids("a", 10_000));
    assert!(e.load_more());
    for _ in 0..10 {
        assert!(!e.load_more());
        assert!(!e.notify_end_sentinel_visible());
    }
    assert_eq!(e.commit_pending(), CommitOutcome::Applied);
    assert_eq!(e.materialized(), 32, "burst advances by exactly one page");
    assert_eq!(e.commit_pending(), CommitOutcome::Idle);
}

#[test]
fn final_page_is_clamped_and_exhausts() {
    let keys = ids("a", 25);
    let mut e = engine_over(&keys);
    assert_eq!(e.materialized(), 12);
    assert!(e.load_more());
    assert_eq!(e.commit_pending(), CommitOutcome::Applied);
    assert_eq!(e.materialized(), 25);
    assert!(!e.has_more());
    assert!(!e.load_more());
}

#[test]
fn reset_discards_in_flight_commit() {
    let mut e = engine_over(&ids("a", 10_000));
    assert!(e.load_more());
    e.reset();
    assert!(!e.is_loading());
    assert_eq!(e.materialized(), 0);
    assert!(e.has_more());

    assert_eq!(e.commit_pending(), CommitOutcome::Stale);
    assert_eq!(e.materialized(), 0, "stale commit must not resurrect the window");
}

#[test]
fn sync_after_reset_reapplies_initial_load() {
    let mut e = engine_over(&ids("a", 100));
    e.reset();
    assert_eq!(e.materialized(), 0);
    assert_eq!(e.epoch(), None);

    // Same collection, but the reset invalidated the fingerprint.
    assert!(e.sync_collection());
    assert_eq!(e.materialized(), 12);
    assert!(e.has_more());
    assert!(e.epoch().is_some());
    assert!(!e.sync_collection());
}

#[test]
fn reset_is_idempotent() {
    let mut e = engine_over(&ids("a", 100));
    e.reset();
    let state = e.window_state();
    e.reset();
    assert_eq!(e.window_state(), state);
}

#[test]
fn epoch_change_discards_in_flight_commit() {
    let mut e = engine_over(&ids("a", 10_000));
    assert!(e.load_more());

    // Collection replaced while the step is in flight.
    let next = ids("b", 5);
    let keys = Arc::clone(&next);
    e.set_collection(next.len(), move |i| keys[i].clone());
    assert_eq!(e.materialized(), 5, "initial load against the new epoch");
    assert!(!e.has_more());

    assert_eq!(e.commit_pending(), CommitOutcome::Stale);
    assert_eq!(e.materialized(), 5);
}

#[test]
fn reference_change_does_not_reset() {
    let mut e = engine_over(&ids("a", 10_000));
    assert!(e.load_more());
    assert_eq!(e.commit_pending(), CommitOutcome::Applied);
    assert_eq!(e.materialized(), 32);

    // A fresh allocation with the same id sequence: epoch is unchanged.
    let same = ids("a", 10_000);
    let keys = Arc::clone(&same);
    e.set_collection(same.len(), move |i| keys[i].clone());
    assert_eq!(e.materialized(), 32);

    assert!(!e.sync_collection());
    assert_eq!(e.materialized(), 32);
}

#[test]
fn id_sequence_change_resets() {
    let keys = ids("a", 100);
    let mut e = engine_over(&keys);
    assert!(e.load_more());
    assert_eq!(e.commit_pending(), CommitOutcome::Applied);
    assert_eq!(e.materialized(), 32);

    // Reorder: swap the first two ids.
    let mut reordered: Vec<String> = keys.iter().cloned().collect();
    reordered.swap(0, 1);
    let reordered = Arc::new(reordered);
    let k = Arc::clone(&reordered);
    e.set_collection(reordered.len(), move |i| k[i].clone());
    assert_eq!(e.materialized(), 12);
    assert!(e.has_more());
}

#[test]
fn large_gallery_session_end_to_end() {
    // 10 000 items, page 20, initial 12: init → 12, sentinel → 32,
    // 5-item epoch swap → min(12, 5) = 5 with nothing more to load.
    let mut e = engine_over(&ids("img", 10_000));
    assert_eq!(e.materialized(), 12);
    assert!(e.has_more());

    assert!(e.notify_end_sentinel_visible());
    assert_eq!(e.commit_pending(), CommitOutcome::Applied);
    assert_eq!(e.materialized(), 32);

    let subset = ids("img", 5);
    let k = Arc::clone(&subset);
    e.set_collection(5, move |i| k[i].clone());
    assert_eq!(e.materialized(), 5);
    assert!(!e.has_more());
}

#[test]
fn on_change_fires_and_batches() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    CALLS.store(0, Ordering::SeqCst);

    let keys = ids("a", 100);
    let k = Arc::clone(&keys);
    let mut e = WindowEngine::new(
        WindowOptions::new(100, move |i| k[i].clone()).with_on_change(Some(
            |_: &WindowEngine<String>| {
                CALLS.fetch_add(1, Ordering::SeqCst);
            },
        )),
    )
    .unwrap();

    e.load_more();
    e.commit_pending();
    let after_steps = CALLS.load(Ordering::SeqCst);
    assert_eq!(after_steps, 2);

    e.batch_update(|e| {
        e.reset();
        e.sync_collection();
    });
    assert_eq!(CALLS.load(Ordering::SeqCst), after_steps + 1, "batched into one");
}

#[test]
fn window_state_snapshot_tracks_engine() {
    let mut e = engine_over(&ids("a", 100));
    assert_eq!(
        e.window_state(),
        WindowState {
            materialized: 12,
            page_size: 20,
            has_more: true,
            is_loading: false,
        }
    );
    e.load_more();
    assert!(e.window_state().is_loading);
}

#[test]
fn for_each_materialized_key_covers_prefix() {
    let e = engine_over(&ids("a", 100));
    let mut seen = Vec::new();
    e.for_each_materialized_key(|k| seen.push(k));
    assert_eq!(seen.len(), 12);
    assert_eq!(seen[0], "a-0");
    assert_eq!(seen[11], "a-11");
}

// Epoch

#[test]
fn epoch_distinguishes_sequences() {
    let a = Epoch::compute(3, |i| i as u64);
    let same = Epoch::compute(3, |i| i as u64);
    assert_eq!(a, same);

    let reordered = Epoch::compute(3, |i| [1u64, 0, 2][i]);
    assert_ne!(a, reordered);

    let shorter = Epoch::compute(2, |i| i as u64);
    assert_ne!(a, shorter);

    let appended = Epoch::compute(4, |i| i as u64);
    assert_ne!(a, appended);
}

// ResourceGate

#[test]
fn ready_set_is_monotone_and_notifies_once() {
    static READY: AtomicUsize = AtomicUsize::new(0);
    READY.store(0, Ordering::SeqCst);

    let mut gate = ResourceGate::new(GateOptions::new().with_on_ready(Some(|_: &String| {
        READY.fetch_add(1, Ordering::SeqCst);
    })))
    .unwrap();

    let key = String::from("img-1");
    assert!(!gate.is_ready(&key));
    assert!(gate.mark_visible(key.clone()));
    assert!(gate.is_ready(&key));

    // Scroll away and back: toggles never demote or re-fire.
    for _ in 0..3 {
        assert!(!gate.mark_visible(key.clone()));
    }
    assert!(gate.is_ready(&key));
    assert_eq!(READY.load(Ordering::SeqCst), 1);
    assert_eq!(gate.ready_len(), 1);
}

#[test]
fn gate_clear_drops_authorizations() {
    let mut gate = ResourceGate::<String>::new(GateOptions::new()).unwrap();
    gate.mark_visible(String::from("x"));
    gate.mark_visible(String::from("y"));
    assert_eq!(gate.ready_len(), 2);
    gate.clear();
    assert_eq!(gate.ready_len(), 0);
    assert!(!gate.is_ready(&String::from("x")));
}

#[test]
fn gate_rejects_bad_threshold() {
    let err = ResourceGate::<String>::new(GateOptions::new().with_threshold(1.5)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidThreshold(1.5));
    assert!(ResourceGate::<String>::new(GateOptions::new().with_threshold(-0.1)).is_err());
    assert!(ResourceGate::<String>::new(GateOptions::new().with_threshold(0.0)).is_ok());
    assert!(ResourceGate::<String>::new(GateOptions::new().with_threshold(1.0)).is_ok());
}

// SelectionCursor

#[test]
fn reconcile_selects_first_item_when_view_gains_content() {
    let mut c = SelectionCursor::new();
    assert_eq!(c.reconcile(0), None);

    let change = c.reconcile(10).unwrap();
    assert_eq!(change.index, Some(0));
    assert_eq!(change.source, SelectionSource::Programmatic);
    assert_eq!(
        change.align,
        Some(AlignRequest {
            index: 0,
            align: Align::Center
        })
    );
}

#[test]
fn reconcile_is_idempotent() {
    let mut c = SelectionCursor::new();
    assert!(c.reconcile(10).is_some());
    assert_eq!(c.reconcile(10), None, "no redundant alignment request");
    assert_eq!(c.selection(), Some(0));
}

#[test]
fn reconcile_clamps_after_shrink_and_clears_on_empty() {
    let mut c = SelectionCursor::new();
    c.select(30, SelectionSource::User, 50);
    assert_eq!(c.selection(), Some(30));

    let change = c.reconcile(8).unwrap();
    assert_eq!(change.index, Some(7));
    assert_eq!(change.source, SelectionSource::Programmatic);

    let change = c.reconcile(0).unwrap();
    assert_eq!(change.index, None);
    assert_eq!(change.align, None);
    assert_eq!(c.selection(), None);
    assert_eq!(c.reconcile(0), None);
}

#[test]
fn reconcile_index_always_in_range() {
    for materialized in 0..=40usize {
        for start in [0usize, 1, 5, 39, 40, 100] {
            let mut c = SelectionCursor::new();
            if start > 0 {
                c.select(start, SelectionSource::User, 100);
            }
            c.reconcile(materialized);
            match c.selection() {
                None => assert_eq!(materialized, 0),
                Some(i) => assert!(i < materialized),
            }
        }
    }
}

#[test]
fn grid_movement_steps_by_row_and_column() {
    let layout = Layout::Grid { columns: cols(5) };
    let mut c = SelectionCursor::new();
    c.select(7, SelectionSource::User, 50);

    let change = c.move_selection(Direction::Down, layout, 50).unwrap();
    assert_eq!(change.index, Some(12));
    assert_eq!(change.source, SelectionSource::User);

    assert_eq!(c.move_selection(Direction::Up, layout, 50).unwrap().index, Some(7));
    assert_eq!(c.move_selection(Direction::Left, layout, 50).unwrap().index, Some(6));
    assert_eq!(c.move_selection(Direction::Right, layout, 50).unwrap().index, Some(7));
}

#[test]
fn grid_movement_clamps_at_edges() {
    let layout = Layout::Grid { columns: cols(5) };
    let mut c = SelectionCursor::new();
    c.select(0, SelectionSource::User, 12);

    assert_eq!(c.move_selection(Direction::Up, layout, 12), None);
    assert_eq!(c.move_selection(Direction::Left, layout, 12), None);

    // Down from the last partial row clamps onto the last item.
    c.select(9, SelectionSource::User, 12);
    assert_eq!(c.move_selection(Direction::Down, layout, 12).unwrap().index, Some(11));
    assert_eq!(c.move_selection(Direction::Down, layout, 12), None);
    assert_eq!(c.move_selection(Direction::Right, layout, 12), None);
}

#[test]
fn linear_movement_ignores_horizontal() {
    let mut c = SelectionCursor::new();
    c.select(3, SelectionSource::User, 10);

    assert_eq!(c.move_selection(Direction::Down, Layout::Linear, 10).unwrap().index, Some(4));
    assert_eq!(c.move_selection(Direction::Up, Layout::Linear, 10).unwrap().index, Some(3));
    assert_eq!(c.move_selection(Direction::Left, Layout::Linear, 10), None);
    assert_eq!(c.move_selection(Direction::Right, Layout::Linear, 10), None);
}

#[test]
fn movement_from_no_selection_lands_on_first_item() {
    let mut c = SelectionCursor::new();
    assert_eq!(c.move_selection(Direction::Down, Layout::Linear, 0), None);

    let change = c.move_selection(Direction::Down, Layout::Linear, 10).unwrap();
    assert_eq!(change.index, Some(0));
    assert_eq!(change.source, SelectionSource::User);
}

#[test]
fn select_clamps_and_realigns() {
    let mut c = SelectionCursor::new();
    let change = c.select(999, SelectionSource::User, 10).unwrap();
    assert_eq!(change.index, Some(9));

    // Re-selecting the same index still re-centers it.
    let change = c.select(9, SelectionSource::User, 10).unwrap();
    assert_eq!(change.align.unwrap().index, 9);

    assert_eq!(c.select(0, SelectionSource::User, 0), None);
}

// Breakpoints

#[test]
fn default_breakpoints_match_responsive_tiers() {
    let bp = Breakpoints::default();
    assert_eq!(bp.columns_for(320).get(), 1);
    assert_eq!(bp.columns_for(640).get(), 2);
    assert_eq!(bp.columns_for(800).get(), 3);
    assert_eq!(bp.columns_for(1024).get(), 4);
    assert_eq!(bp.columns_for(1440).get(), 5);
    assert_eq!(bp.columns_for(2560).get(), 6);
}

#[test]
fn breakpoints_accept_unordered_entries() {
    let bp = Breakpoints::new([(600, cols(2)), (1200, cols(4)), (900, cols(3))]);
    assert_eq!(bp.columns_for(599).get(), 1);
    assert_eq!(bp.columns_for(600).get(), 2);
    assert_eq!(bp.columns_for(1199).get(), 3);
    assert_eq!(bp.columns_for(5000).get(), 4);
    assert_eq!(
        bp.grid_layout_for(1200),
        Layout::Grid { columns: cols(4) }
    );
}
