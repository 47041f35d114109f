//! Projection and rasterization.
//!
//! Frames are drawn at a supersampled resolution with `vello_cpu` and box-filtered down to the
//! output size.

/// CPU frame renderer.
pub mod cpu;
pub(crate) mod downsample;
/// Rendered frame buffer.
pub mod frame;
/// World-to-screen projection and culling.
pub mod project;
