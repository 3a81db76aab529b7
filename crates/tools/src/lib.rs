//! Developer tooling: frame-time history and the on-screen FPS counter.
//!
//! # Invariants
//! - Stats only observe frame timing; they never feed back into rendering.

mod stats;

pub use stats::{FrameStats, FrameTimer, StatsSummary};

pub fn crate_info() -> &'static str {
    "wavegrid-tools v0.1.0"
}
