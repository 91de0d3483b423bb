#![cfg(feature = "parallel")]

use knap_dp::{solve, KnapsackProblem};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Plain two-loop table, no engine and no rayon.
fn serial_rows(weights: &[usize], values: &[u64], capacity: usize) -> Vec<Vec<u64>> {
    let mut rows: Vec<Vec<u64>> = Vec::with_capacity(weights.len());
    let mut prev = vec![0u64; capacity + 1];
    for (&w, &v) in weights.iter().zip(values) {
        let mut next = prev.clone();
        for j in w..=capacity {
            next[j] = prev[j].max(prev[j - w] + v);
        }
        rows.push(next.clone());
        prev = next;
    }
    rows
}

proptest! {
    #[test]
    fn parallel_rows_match_serial(
        weights in proptest::collection::vec(0usize..=25, 1..16),
        seed in any::<u64>(),
        capacity in 0usize..=200,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let values: Vec<u64> = weights.iter().map(|_| rng.gen_range(0..500)).collect();
        let table = solve(&weights, &values, capacity).unwrap();
        prop_assert_eq!(table.into_rows(), serial_rows(&weights, &values, capacity));
    }
}

#[test]
fn wide_rows_match_serial() {
    let mut rng = StdRng::seed_from_u64(7);
    let n = 40;
    let capacity = 20_000;
    let weights: Vec<usize> = (0..n).map(|_| rng.gen_range(1..2_000)).collect();
    let values: Vec<u64> = (0..n).map(|_| rng.gen_range(1..10_000)).collect();
    let problem = KnapsackProblem::from_slices(&weights, &values, capacity).unwrap();
    let expected = serial_rows(&weights, &values, capacity);
    assert_eq!(problem.table().into_rows(), expected);
    assert_eq!(problem.max_value(), expected[n - 1][capacity]);
    assert_eq!(problem.select().total_value, expected[n - 1][capacity]);
}
