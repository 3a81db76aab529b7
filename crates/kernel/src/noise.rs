//! Lattice hash and 2D value noise.

use glam::Vec2;

/// Dot-product weights for the lattice hash.
pub const HASH_WEIGHTS: Vec2 = Vec2::new(12.9898, 78.233);
/// Scale applied to the sine before taking the fractional part.
pub const HASH_SCALE: f32 = 43758.5453;

/// Largest `f32` strictly below one.
pub const FRACT_MAX: f32 = 1.0 - f32::EPSILON / 2.0;

/// Fractional part in [0, 1).
///
/// `x - floor(x)` rounds to exactly 1.0 for tiny negative `x`, so the result
/// saturates at `FRACT_MAX`.
pub(crate) fn fract(x: f32) -> f32 {
    (x - x.floor()).min(FRACT_MAX)
}

/// Pseudo-random scalar in [0, 1) for a 2D coordinate.
///
/// Not a quality RNG; it only needs to look uncorrelated between
/// neighbouring lattice points.
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(HASH_WEIGHTS).sin() * HASH_SCALE)
}

/// Hermite smoothstep weight `f * f * (3 - 2f)`.
fn smooth(f: Vec2) -> Vec2 {
    f * f * (Vec2::splat(3.0) - 2.0 * f)
}

/// Smooth value noise: hashes at the four corners of the unit cell holding
/// `p`, blended with smoothstep weights.
///
/// Equals `hash(p)` exactly at lattice points and stays within the range of
/// the four corner hashes.
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;

    let a = hash(i);
    let b = hash(i + Vec2::X);
    let c = hash(i + Vec2::Y);
    let d = hash(i + Vec2::ONE);

    let u = smooth(f);
    let ab = a + (b - a) * u.x;
    ab + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}
