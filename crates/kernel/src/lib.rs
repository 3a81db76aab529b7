//! Displacement kernel: the per-vertex function that turns a flat grid into
//! a rolling surface.
//!
//! This is the CPU reference for the WGSL vertex stage in
//! `wavegrid-render-wgpu`; both must produce the same values.
//!
//! # Invariants
//! - Every function is pure: same inputs, bit-identical output.
//! - Total over finite inputs. Parameters are not clamped here.

pub mod displacement;
pub mod noise;

pub use displacement::{
    LAYER2_ANGLE, LAYER2_TIME_SCALE, displace, displacement, layer_coordinates, max_displacement,
    rotation,
};
pub use noise::{FRACT_MAX, HASH_SCALE, HASH_WEIGHTS, hash, value_noise};
