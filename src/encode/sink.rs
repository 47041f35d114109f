use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{SplineCamError, SplineCamResult};
use crate::render::frame::FrameRgb;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Size of every frame that will be pushed.
    pub canvas: Canvas,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called with contiguous, strictly increasing indices starting
/// at `FrameIndex(0)`. A sink error aborts the run.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SplineCamResult<()>;
    /// Push the next frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> SplineCamResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SplineCamResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRgb)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRgb)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SplineCamResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> SplineCamResult<()> {
        check_next_index(self.frames.len() as u64, idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SplineCamResult<()> {
        self.ended = true;
        Ok(())
    }
}

pub(crate) fn check_next_index(expected: u64, idx: FrameIndex) -> SplineCamResult<()> {
    if idx.0 != expected {
        return Err(SplineCamError::encode(format!(
            "frame {} pushed out of order; expected frame {expected}",
            idx.0
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
