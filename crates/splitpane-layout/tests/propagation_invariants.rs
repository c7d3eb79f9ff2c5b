//! Property invariants for boundary propagation, collapse, rescale, and
//! drag streams.
//!
//! Extents are generated as whole numbers so sums are exact and tolerances
//! only have to absorb the arithmetic done by the engine itself.

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::sample::Index;
use splitpane_layout::{
    EngineConfig, PointerPosition, PropagationBounds, SizeModel, SplitPaneEngine,
    default_pane_key, move_boundary, propagate, recalculate, reconcile_collapsed,
};

const MIN: f64 = 50.0;
const TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 11
    }

    fn next_range(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min + 1) as u64;
        min + (self.next_u64() % span) as i64
    }

    fn choose_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

fn extents_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(50u32..400, 2..8)
        .prop_map(|values| values.into_iter().map(f64::from).collect())
}

fn total(extents: &[f64]) -> f64 {
    extents.iter().sum()
}

fn assert_minimums(extents: &[f64], bounds: &PropagationBounds<'_>) {
    for (index, extent) in extents.iter().enumerate() {
        assert!(
            *extent >= bounds.effective_min(index) - TOLERANCE,
            "pane {index} fell to {extent} in {extents:?}"
        );
    }
}

fn model(extents: &[f64], reversed: bool) -> SizeModel {
    let config = EngineConfig::default()
        .with_collapse(true)
        .with_collapse_reversed(reversed)
        .with_initial_extents(extents.to_vec());
    SizeModel::from_config((0..extents.len()).map(default_pane_key).collect(), &config)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn propagation_conserves_total_and_minimums(
        mut extents in extents_strategy(),
        moves in prop::collection::vec((any::<Index>(), -600i32..600), 1..24),
    ) {
        let collapsed = BTreeSet::new();
        let mins = vec![MIN; extents.len()];
        let bounds = PropagationBounds { min_extents: &mins, collapsed: &collapsed, collapsed_size: MIN };
        let before = total(&extents);
        for (boundary, offset) in moves {
            let boundary = boundary.index(extents.len() - 1);
            let applied = propagate(&mut extents, boundary, f64::from(offset), &bounds);
            prop_assert!(applied.abs() <= f64::from(offset).abs() + TOLERANCE);
            prop_assert!((total(&extents) - before).abs() < TOLERANCE);
            assert_minimums(&extents, &bounds);
        }
    }

    #[test]
    fn collapsed_panes_keep_collapsed_size_through_moves(
        extents in extents_strategy(),
        collapsed_pick in any::<Index>(),
        reversed in any::<bool>(),
        moves in prop::collection::vec((any::<Index>(), -300i32..300), 1..16),
    ) {
        let mut extents = extents;
        let len = extents.len();
        // Only panes that can collapse in this direction, and never the
        // divider the collapsed pane owns: neither is reachable from a drag.
        let pane = if reversed { 1 + collapsed_pick.index(len - 1) } else { collapsed_pick.index(len - 1) };
        let own_boundary = if reversed { pane - 1 } else { pane };
        extents[pane] = MIN;
        let collapsed = BTreeSet::from([pane]);
        let mins = vec![MIN; len];
        let bounds = PropagationBounds { min_extents: &mins, collapsed: &collapsed, collapsed_size: MIN };
        let before = total(&extents);
        for (boundary, offset) in moves {
            let boundary = boundary.index(len - 1);
            if boundary == own_boundary {
                continue;
            }
            move_boundary(&mut extents, boundary, f64::from(offset), reversed, &bounds);
            prop_assert!((total(&extents) - before).abs() < TOLERANCE);
            prop_assert!((extents[pane] - MIN).abs() < TOLERANCE);
            assert_minimums(&extents, &bounds);
        }
    }

    #[test]
    fn edge_boundaries_are_no_ops(extents in extents_strategy(), offset in -600i32..600) {
        let collapsed = BTreeSet::new();
        let mins = vec![MIN; extents.len()];
        let bounds = PropagationBounds { min_extents: &mins, collapsed: &collapsed, collapsed_size: MIN };
        let mut moved = extents.clone();
        prop_assert_eq!(propagate(&mut moved, extents.len() - 1, f64::from(offset), &bounds), 0.0);
        prop_assert_eq!(propagate(&mut moved, usize::MAX, f64::from(offset), &bounds), 0.0);
        prop_assert_eq!(moved, extents);
    }

    #[test]
    fn collapse_round_trip_restores_extent(
        extents in extents_strategy(),
        pick in any::<Index>(),
        reversed in any::<bool>(),
    ) {
        let len = extents.len();
        // Forward layouts cannot collapse the last pane, reversed ones the first.
        let pane = if reversed { 1 + pick.index(len - 1) } else { pick.index(len - 1) };
        let mut model = model(&extents, reversed);

        reconcile_collapsed(&mut model, &BTreeSet::from([pane]), reversed);
        prop_assert!((model.extents()[pane] - MIN).abs() < TOLERANCE);
        prop_assert_eq!(model.collapsed_sizes()[pane], Some(extents[pane]));

        reconcile_collapsed(&mut model, &BTreeSet::new(), reversed);
        for (after, before) in model.extents().iter().zip(&extents) {
            prop_assert!((after - before).abs() < TOLERANCE);
        }
        prop_assert!(model.collapsed_sizes().iter().all(Option::is_none));
    }

    #[test]
    fn rescale_with_equal_totals_is_identity(previous in extents_strategy()) {
        let collapsed = BTreeSet::new();
        let mins = vec![MIN; previous.len()];
        let bounds = PropagationBounds { min_extents: &mins, collapsed: &collapsed, collapsed_size: MIN };
        let measured: Vec<f64> = previous.iter().rev().copied().collect();
        prop_assert_eq!(recalculate(&measured, Some(previous.as_slice()), &bounds), previous);
    }
}

fn paired_extents_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (2usize..7).prop_flat_map(|len| {
        (
            prop::collection::vec(50u32..400, len),
            prop::collection::vec(50u32..400, len),
        )
            .prop_map(|(before, after)| {
                (
                    before.into_iter().map(f64::from).collect(),
                    after.into_iter().map(f64::from).collect(),
                )
            })
    })
}

fn drag(engine: &mut SplitPaneEngine, boundary: usize, offset: f64) {
    engine
        .begin_drag(boundary, PointerPosition::new(0.0, 0.0))
        .expect("forward boundaries below len - 1 are valid");
    engine.update_drag(PointerPosition::new(offset, 0.0));
    engine.end_drag();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn pane_set_changes_after_mount_keep_total_and_minimums(
        extents in extents_strategy(),
        keep in prop::collection::vec(any::<bool>(), 8),
        added in prop::collection::vec(any::<Index>(), 0..3),
        moves in prop::collection::vec((any::<Index>(), -400i32..400), 0..12),
    ) {
        let keys: Vec<String> = (0..extents.len()).map(|index| format!("kept.{index}")).collect();
        let config = EngineConfig::default().with_initial_extents(extents.clone());
        let mut engine = SplitPaneEngine::with_keys(keys.clone(), config, ());
        engine.mount(&extents).expect("measurement matches pane count");
        let before = total(&extents);

        let mut next: Vec<String> = keys
            .into_iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(key, _)| key)
            .collect();
        for (serial, position) in added.iter().enumerate() {
            let at = position.index(next.len() + 1);
            next.insert(at, format!("added.{serial}"));
        }
        prop_assume!(next.len() >= 2 && before >= MIN * next.len() as f64);

        engine.sync_panes(next);
        prop_assert!((total(engine.extents()) - before).abs() < TOLERANCE);
        assert_minimums(engine.extents(), &engine.model().bounds());

        for (boundary, offset) in moves {
            let boundary = boundary.index(engine.pane_count() - 1);
            drag(&mut engine, boundary, f64::from(offset));
            prop_assert!((total(engine.extents()) - before).abs() < TOLERANCE);
            assert_minimums(engine.extents(), &engine.model().bounds());
        }
    }

    #[test]
    fn container_resize_during_drag_is_kept_on_commit(
        (extents, measured) in paired_extents_strategy(),
        boundary in any::<Index>(),
        offset in -400i32..400,
        follow_up in -400i32..400,
    ) {
        let config = EngineConfig::default().with_initial_extents(extents.clone());
        let mut engine = SplitPaneEngine::new(extents.len(), config);
        engine.mount(&extents).expect("measurement matches pane count");
        let boundary = boundary.index(extents.len() - 1);

        engine
            .begin_drag(boundary, PointerPosition::new(0.0, 0.0))
            .expect("forward boundaries below len - 1 are valid");
        engine.update_drag(PointerPosition::new(f64::from(offset), 0.0));
        engine.on_container_resize(&measured).expect("measurement matches pane count");
        let after = total(&measured);
        prop_assert!((total(engine.in_progress_extents()) - after).abs() < TOLERANCE);
        assert_minimums(engine.in_progress_extents(), &engine.model().bounds());

        engine.update_drag(PointerPosition::new(f64::from(follow_up), 0.0));
        engine.end_drag();
        prop_assert!((total(engine.extents()) - after).abs() < TOLERANCE);
        assert_minimums(engine.extents(), &engine.model().bounds());
    }
}

/// Replays a random drag stream against the engine, checking the committed
/// total and minimums after every step, and that each update only depends on
/// the latest pointer position.
fn run_drag_stream(seed: u64, steps: usize) {
    let mut rng = Lcg::new(seed);
    let len = 2 + rng.choose_index(5);
    let extents: Vec<f64> = (0..len).map(|_| rng.next_range(50, 400) as f64).collect();
    let config = EngineConfig::default()
        .with_collapse(true)
        .with_initial_extents(extents.clone());
    let mut engine = SplitPaneEngine::new(len, config);
    let before = total(&extents);

    for _ in 0..steps {
        match rng.choose_index(4) {
            0 => {
                let boundary = rng.choose_index(len - 1);
                let anchor = rng.next_range(0, 1_000) as f64;
                engine
                    .begin_drag(boundary, PointerPosition::new(anchor, 0.0))
                    .expect("forward boundaries below len - 1 are valid");
            }
            1 => {
                let x = rng.next_range(-500, 1_500) as f64;
                let streamed = engine.update_drag(PointerPosition::new(x, 0.0)).to_vec();
                if engine.is_dragging() {
                    let mut fresh = engine.extents().to_vec();
                    let session = engine.drag_session().expect("dragging");
                    move_boundary(
                        &mut fresh,
                        session.boundary,
                        session.raw_offset(),
                        false,
                        &engine.model().bounds(),
                    );
                    assert_eq!(streamed, fresh);
                }
            }
            2 => {
                engine.end_drag();
            }
            _ => {
                let pane = rng.choose_index(len - 1);
                engine.toggle_collapse(pane).expect("forward panes below len - 1 collapse");
            }
        }
        assert!((total(engine.extents()) - before).abs() < TOLERANCE);
        assert!((total(engine.in_progress_extents()) - before).abs() < TOLERANCE);
        assert_minimums(engine.extents(), &engine.model().bounds());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_drag_streams_preserve_invariants(seed in any::<u64>(), steps in 10usize..120) {
        run_drag_stream(seed, steps);
    }
}

#[test]
fn drag_stream_seed_corpus() {
    for seed in [0_u64, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, u64::MAX] {
        run_drag_stream(seed, 200);
    }
}

#[test]
fn cascade_example_from_three_equal_panes() {
    let collapsed = BTreeSet::new();
    let mins = [MIN; 3];
    let bounds = PropagationBounds {
        min_extents: &mins,
        collapsed: &collapsed,
        collapsed_size: MIN,
    };
    let mut extents = vec![100.0, 100.0, 100.0];
    assert_eq!(propagate(&mut extents, 0, -80.0, &bounds), -50.0);
    assert_eq!(extents, vec![50.0, 150.0, 100.0]);
}

#[test]
fn collapsed_sibling_shifts_instead_of_growing() {
    let collapsed = BTreeSet::from([1]);
    let mins = [MIN; 3];
    let bounds = PropagationBounds {
        min_extents: &mins,
        collapsed: &collapsed,
        collapsed_size: MIN,
    };
    let mut extents = vec![200.0, 50.0, 200.0];
    // Shrinking pane 0 would normally grow pane 1; the collapsed pane moves instead.
    move_boundary(&mut extents, 0, -60.0, false, &bounds);
    assert_eq!(extents, vec![140.0, 50.0, 260.0]);
}
