//! wgpu render backend for the wave grid.
//!
//! Draws every grid point as a screen-aligned round sprite. Displacement is
//! computed in the vertex shader by a WGSL port of `wavegrid-kernel`.
//!
//! # Invariants
//! - Renderer never mutates parameters.
//! - Vertex geometry is uploaded once; only uniforms change per frame.
//! - Shader constants are generated from the kernel's Rust constants.

mod camera;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::PointCloudRenderer;
pub use shaders::point_shader_source;
