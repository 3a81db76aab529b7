use std::num::NonZeroUsize;

use wavegrid_common::WaveParams;
use wavegrid_kernel::displacement;

use crate::grid::PointGrid;

/// Below this many points per worker, threads cost more than they save.
const MIN_POINTS_PER_THREAD: usize = 4096;

/// Displacement of every grid point at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    side: usize,
    time: f32,
    heights: Vec<f32>,
}

impl Heightfield {
    /// Evaluate the kernel over the whole grid, spreading the work over the
    /// available cores.
    pub fn evaluate(grid: &PointGrid, time: f32, params: &WaveParams) -> Self {
        let threads = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::evaluate_with_threads(grid, time, params, threads)
    }

    /// Single-threaded evaluation.
    pub fn evaluate_sequential(grid: &PointGrid, time: f32, params: &WaveParams) -> Self {
        let heights = grid
            .points()
            .iter()
            .map(|&p| displacement(p, time, params))
            .collect();
        Self {
            side: grid.side(),
            time,
            heights,
        }
    }

    /// Evaluate using up to `threads` scoped workers over disjoint chunks.
    ///
    /// Points are independent, so each worker owns one output slice.
    pub fn evaluate_with_threads(
        grid: &PointGrid,
        time: f32,
        params: &WaveParams,
        threads: usize,
    ) -> Self {
        let points = grid.points();
        let workers = threads
            .max(1)
            .min(points.len().div_ceil(MIN_POINTS_PER_THREAD).max(1));

        if workers == 1 {
            return Self::evaluate_sequential(grid, time, params);
        }

        let _span = tracing::debug_span!("heightfield_evaluate", points = points.len(), workers)
            .entered();

        let chunk = points.len().div_ceil(workers);
        let mut heights = vec![0.0_f32; points.len()];
        std::thread::scope(|s| {
            for (src, dst) in points.chunks(chunk).zip(heights.chunks_mut(chunk)) {
                s.spawn(move || {
                    for (h, &p) in dst.iter_mut().zip(src) {
                        *h = displacement(p, time, params);
                    }
                });
            }
        });

        tracing::trace!(time, "heightfield evaluated");

        Self {
            side: grid.side(),
            time,
            heights,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Points per side, matching the source grid.
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn at(&self, col: usize, row: usize) -> Option<f32> {
        (col < self.side && row < self.side).then(|| self.heights[row * self.side + col])
    }

    /// Smallest and largest height, or `None` for an empty field.
    pub fn bounds(&self) -> Option<(f32, f32)> {
        self.heights.iter().copied().fold(None, |acc, h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    pub fn mean(&self) -> f32 {
        if self.heights.is_empty() {
            return 0.0;
        }
        self.heights.iter().sum::<f32>() / self.heights.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;
    use wavegrid_kernel::max_displacement;

    fn grid(segments: u32) -> PointGrid {
        PointGrid::new(GridConfig {
            size: 8.0,
            segments,
        })
        .unwrap()
    }

    #[test]
    fn threaded_matches_sequential() {
        let grid = grid(150);
        let params = WaveParams::default();
        let seq = Heightfield::evaluate_sequential(&grid, 2.5, &params);
        for threads in [1, 2, 3, 8] {
            let par = Heightfield::evaluate_with_threads(&grid, 2.5, &params, threads);
            assert_eq!(par, seq, "threads={threads}");
        }
    }

    #[test]
    fn matches_kernel_per_point() {
        let grid = grid(10);
        let params = WaveParams::default();
        let field = Heightfield::evaluate(&grid, 0.75, &params);
        assert_eq!(field.side(), 11);
        assert_eq!(field.heights().len(), grid.len());
        let p = grid.point(3, 7).unwrap();
        assert_eq!(field.at(3, 7), Some(displacement(p, 0.75, &params)));
        assert_eq!(field.at(11, 0), None);
    }

    #[test]
    fn bounds_within_amplitude() {
        let grid = grid(40);
        let params = WaveParams::default();
        let field = Heightfield::evaluate(&grid, 10.0, &params);
        let (lo, hi) = field.bounds().unwrap();
        assert!(lo >= 0.0);
        assert!(hi <= max_displacement(&params));
        assert!(lo <= field.mean() && field.mean() <= hi);
    }

    #[test]
    fn time_moves_the_surface() {
        let grid = grid(20);
        let params = WaveParams::default();
        let a = Heightfield::evaluate(&grid, 0.0, &params);
        let b = Heightfield::evaluate(&grid, 1.0, &params);
        assert_ne!(a.heights(), b.heights());
        assert_eq!(b.time(), 1.0);
    }
}
