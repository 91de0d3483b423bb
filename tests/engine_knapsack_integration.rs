use knap_dp::{EngineBuilder, KnapsackProblem, LayeredEngine, LayeredProblem, PathCell};
use proptest::prelude::*;

fn valid_path(problem: &KnapsackProblem, path: &[PathCell]) -> bool {
    let items = problem.items();
    if path.len() != items.len() + 1 {
        return false;
    }
    if path.first().map(|c| c.value) != Some(0) {
        return false;
    }
    if path.last().map(|c| c.budget) != Some(problem.capacity()) {
        return false;
    }
    path.windows(2).zip(items).all(|(w, item)| {
        let (before, after) = (w[0], w[1]);
        if before.value == after.value {
            before.budget == after.budget
        } else {
            after.budget == before.budget + item.weight && after.value == before.value + item.value
        }
    })
}

#[test]
fn reference_path() {
    let problem = KnapsackProblem::from_slices(&[1, 3, 4], &[15, 20, 30], 4).unwrap();
    let (best, path) = LayeredEngine::new(&problem).run();
    assert_eq!(best, 35);
    assert!(valid_path(&problem, &path));
    assert_eq!(
        path,
        vec![
            PathCell { budget: 0, value: 0 },
            PathCell { budget: 1, value: 15 },
            PathCell { budget: 4, value: 35 },
            PathCell { budget: 4, value: 35 },
        ]
    );
}

#[test]
fn table_mode_matches_engine_frontiers() {
    let problem = KnapsackProblem::from_slices(&[2, 3, 4, 5], &[3, 4, 5, 6], 5).unwrap();
    let engine = LayeredEngine::new(&problem);
    let rows = engine.table();
    assert_eq!(rows.len(), problem.num_layers());
    assert_eq!(rows, problem.table().into_rows());
    assert_eq!(engine.run_cost(), 7);
}

fn instance() -> impl Strategy<Value = (Vec<usize>, Vec<u64>, usize)> {
    (1usize..=24).prop_flat_map(|n| {
        (
            proptest::collection::vec(0usize..=15, n),
            proptest::collection::vec(0u64..=99, n),
            0usize..=40,
        )
    })
}

proptest! {
    #[test]
    fn checkpointed_selection_matches_table_selection(
        (weights, values, capacity) in instance(),
        block in 1usize..8,
    ) {
        let problem = KnapsackProblem::from_slices(&weights, &values, capacity).unwrap();
        let from_table = problem.table().selection(&problem);
        prop_assert_eq!(problem.select_with_block_size(block), from_table.clone());
        prop_assert_eq!(problem.select(), from_table);
    }

    #[test]
    fn paths_are_consistent_for_any_block_size(
        (weights, values, capacity) in instance(),
        block in 1usize..30,
    ) {
        let problem = KnapsackProblem::from_slices(&weights, &values, capacity).unwrap();
        let engine = EngineBuilder::new(&problem).with_block_size(block).build();
        let (best, path) = engine.run();
        prop_assert_eq!(best, problem.max_value());
        prop_assert!(valid_path(&problem, &path));
        prop_assert_eq!(path.last().map(|c| c.value), Some(best));
    }
}
