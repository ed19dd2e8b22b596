//! Scaling benchmark: random square boards of increasing side length.
//!
//! Each board is stepped on its own rayon worker; a single board is always
//! stepped serially. Use with `--release` for meaningful results.

#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Instant;

use rayon::prelude::*;
use sparse_life::{Rect, SparseLife, SparseLifeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SEED: u64 = 0x5EED_1234_ABCD_EF01;

struct BenchResult {
    side: i32,
    iters: u64,
    initial: usize,
    final_pop: usize,
    total_ms: f64,
}

fn bench_sparse(side: i32, iters: u64) -> BenchResult {
    let mut engine = SparseLife::with_config(
        SparseLifeConfig::default()
            .seed(SEED)
            .capacity((side as usize * side as usize) / 2),
    );
    engine.randomize(Rect::new(0, side - 1, 0, side - 1));
    let initial = engine.population();

    let start = Instant::now();
    engine.step_n(iters);
    let duration = start.elapsed();

    BenchResult {
        side,
        iters,
        initial,
        final_pop: engine.population(),
        total_ms: duration.as_secs_f64() * 1000.0,
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let scales: &[(i32, u64)] = &[
        (64, 200),
        (128, 200),
        (256, 100),
        (512, 50),
        (1024, 20),
    ];

    info!(boards = scales.len(), threads = rayon::current_num_threads(), "starting");
    let results: Vec<BenchResult> = scales
        .par_iter()
        .map(|&(side, iters)| bench_sparse(side, iters))
        .collect();

    println!(
        "{:<12} {:>10} {:>10} {:>8} {:>12} {:>10}",
        "Grid", "Initial", "Final", "Iters", "Total(ms)", "Avg(ms)"
    );
    println!("{}", "-".repeat(68));

    for r in &results {
        let avg_ms = r.total_ms / r.iters as f64;
        println!(
            "{:<12} {:>10} {:>10} {:>8} {:>12.1} {:>10.4}",
            format!("{}x{}", r.side, r.side),
            r.initial,
            r.final_pop,
            r.iters,
            r.total_ms,
            avg_ms
        );
    }
}
