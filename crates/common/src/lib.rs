//! Shared types for wavegrid: the seven tunable wave parameters, their
//! ranges and steps, a lock-free parameter store, and preset loading.
//!
//! # Invariants
//! - `WaveParams` is a plain value; every evaluation receives it explicitly.
//! - Range enforcement happens here, at the boundary, never in the kernel.

mod params;
mod preset;
mod store;

pub use params::{ParamError, ParamId, ParamRange, WaveLayer, WaveParams};
pub use preset::ParamPreset;
pub use store::ParamStore;

pub fn crate_info() -> &'static str {
    "wavegrid-common v0.1.0"
}
