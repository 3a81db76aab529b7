//! Rendering adapter: renderer-agnostic frame model.
//!
//! # Invariants
//! - Renderers read a `FrameState`; they never mutate parameters.
//! - A frame is fully described by its time and parameter snapshot.
//!
//! Besides the trait, this crate ships a text renderer that draws the
//! heightfield as ASCII shading, used by the CLI and in tests.

mod clock;
mod renderer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use renderer::{FrameState, Renderer, TextRenderer, TextView};

pub fn crate_info() -> &'static str {
    "wavegrid-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
