use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use knap_dp::KnapsackProblem;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_instance(rng: &mut StdRng, n: usize, capacity: usize) -> KnapsackProblem {
    let weights: Vec<usize> = (0..n).map(|_| rng.gen_range(1..=capacity / 4 + 1)).collect();
    let values: Vec<u64> = (0..n).map(|_| rng.gen_range(1..=1_000)).collect();
    KnapsackProblem::from_slices(&weights, &values, capacity).expect("valid instance")
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn bench_full_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("knapsack_full_table");
    for &(n, capacity) in &[(100usize, 1_000usize), (500, 5_000), (1_000, 10_000)] {
        group.bench_function(format!("n{n}_w{capacity}"), |b| {
            b.iter_batched(
                || random_instance(&mut StdRng::seed_from_u64(42), n, capacity),
                |problem| {
                    let before = rss_kib();
                    let table = problem.table();
                    let after = rss_kib();
                    criterion::black_box(table.optimal_value());
                    // record memory delta to stderr to avoid criterion noise
                    eprintln!(
                        "RSS KiB delta (table n={n} w={capacity}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_table);
criterion_main!(benches);
