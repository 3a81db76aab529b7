//! Point grid geometry and CPU-side evaluation of the displacement kernel.
//!
//! # Invariants
//! - Grid geometry is built once and never mutated; only heights change.
//! - Chunked (multi-threaded) evaluation is bit-identical to a sequential pass.

mod grid;
mod heightfield;

pub use grid::{GridConfig, MeshError, PointGrid};
pub use heightfield::Heightfield;

pub fn crate_info() -> &'static str {
    "wavegrid-mesh v0.1.0"
}
