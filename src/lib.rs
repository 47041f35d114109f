//! splinecam renders a virtual camera flying along a cubic spline chain.
//!
//! The curve is sampled forward a little each frame, the camera eases toward the newest sample,
//! and the revealed path plus its control points are drawn into a numbered image sequence.
//!
//! - Load a [`CurveModel`] from the spline-chain text format
//! - Build a [`FrameSequenceDriver`] from a validated [`RenderConfig`]
//! - Stream frames into a [`FrameSink`] such as [`PngSequenceSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Camera smoothing.
pub mod camera;
/// Curve model and sampling.
pub mod curve;
/// Frame sinks.
pub mod encode;
/// Projection and rasterization.
pub mod render;
/// Configuration and the frame loop.
pub mod session;

pub use crate::foundation::core::{Canvas, FrameIndex, Point, Rgb8, Vec2};
pub use crate::foundation::error::{SplineCamError, SplineCamResult};

pub use crate::camera::state::{CameraState, TrackMode};
pub use crate::curve::cursor::{Advance, EvaluationState, PointHistory, Sample};
pub use crate::curve::model::{Coefficients, CurveModel};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::cpu::{FrameRenderer, RenderStyle};
pub use crate::render::frame::FrameRgb;
pub use crate::render::project::Projector;
pub use crate::session::config::RenderConfig;
pub use crate::session::driver::{
    FrameSequenceDriver, FrameStep, Progress, RunOutcome, RunStats, VisibleGeometry,
};
