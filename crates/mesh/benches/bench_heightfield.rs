use std::hint::black_box;
use std::time::Instant;

use wavegrid_common::WaveParams;
use wavegrid_mesh::{GridConfig, Heightfield, PointGrid};

fn make_grid(segments: u32) -> PointGrid {
    PointGrid::new(GridConfig {
        size: 10.0,
        segments,
    })
    .expect("valid grid")
}

fn bench_sequential(segments: u32, iterations: usize) {
    let grid = make_grid(segments);
    let params = WaveParams::default();

    let start = Instant::now();
    for i in 0..iterations {
        let t = i as f32 / 60.0;
        let _ = black_box(Heightfield::evaluate_sequential(
            black_box(&grid),
            t,
            &params,
        ));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  sequential ({} points, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        grid.len()
    );
}

fn bench_threaded(segments: u32, iterations: usize) {
    let grid = make_grid(segments);
    let params = WaveParams::default();

    let start = Instant::now();
    for i in 0..iterations {
        let t = i as f32 / 60.0;
        let _ = black_box(Heightfield::evaluate(black_box(&grid), t, &params));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  threaded ({} points, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        grid.len()
    );
}

fn main() {
    println!("=== Heightfield Benchmarks ===\n");

    println!("Sequential evaluation:");
    bench_sequential(64, 200);
    bench_sequential(200, 50);
    bench_sequential(512, 10);

    println!("\nThreaded evaluation:");
    bench_threaded(64, 200);
    bench_threaded(200, 50);
    bench_threaded(512, 10);

    println!("\n=== Done ===");
}
