//! Input: raw window events are translated into `Action`s, and orbit
//! gestures are smoothed by `OrbitControls` into per-frame camera deltas.
//!
//! # Invariants
//! - Consumers react to actions, never to raw window events.
//! - Controls own no camera; they only emit deltas, once per frame.

pub mod action;
pub mod orbit;

pub use action::Action;
pub use orbit::{OrbitControls, OrbitDelta};

pub fn crate_info() -> &'static str {
    "wavegrid-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
