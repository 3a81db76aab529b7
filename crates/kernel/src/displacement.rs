//! Layered wave displacement.
//!
//! ```text
//! layer1 = (x, y) * freq1 + t * speed1
//! layer2 = rotate(π/4) · (y, x) * freq2 - t * speed2 * 0.6
//! z      = noise(layer1) * amp1 + noise(layer2) * amp2
//! ```
//!
//! The second layer samples swapped axes through a fixed 45° rotation and
//! scrolls backwards at 0.6× its own speed, so the two layers never line up.

use glam::{Mat2, Vec2, Vec3};
use wavegrid_common::WaveParams;

use crate::noise::value_noise;

/// Fixed rotation applied to the second layer's sample coordinate.
pub const LAYER2_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
/// Fixed multiplier on the second layer's (reversed) scroll speed.
pub const LAYER2_TIME_SCALE: f32 = 0.6;

/// Counter-clockwise rotation `[[cos, -sin], [sin, cos]]`.
pub fn rotation(angle: f32) -> Mat2 {
    Mat2::from_angle(angle)
}

/// Noise-space sample points of both layers for planar position `p` at `time`.
pub fn layer_coordinates(p: Vec2, time: f32, params: &WaveParams) -> (Vec2, Vec2) {
    let first = &params.primary;
    let second = &params.secondary;

    let layer1 = p * first.frequency + time * first.speed;

    let swapped = Vec2::new(p.y, p.x);
    let layer2 = rotation(LAYER2_ANGLE) * swapped * second.frequency
        - time * second.speed * LAYER2_TIME_SCALE;

    (layer1, layer2)
}

/// Height offset of planar position `p` at `time`.
pub fn displacement(p: Vec2, time: f32, params: &WaveParams) -> f32 {
    let (layer1, layer2) = layer_coordinates(p, time, params);
    value_noise(layer1) * params.primary.amplitude
        + value_noise(layer2) * params.secondary.amplitude
}

/// Displaced local-space position `(x, y, z)`.
pub fn displace(p: Vec2, time: f32, params: &WaveParams) -> Vec3 {
    p.extend(displacement(p, time, params))
}

/// Upper bound on `|displacement|` for a parameter set.
pub fn max_displacement(params: &WaveParams) -> f32 {
    params.primary.amplitude.abs() + params.secondary.amplitude.abs()
}
