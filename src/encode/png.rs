use crate::encode::sink::{FrameSink, SinkConfig, check_next_index};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SplineCamError, SplineCamResult};
use crate::render::frame::FrameRgb;
use std::path::{Path, PathBuf};

/// Writes each frame to `<dir>/<index>.png`, zero-padded to at least four digits.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    pad: usize,
    cfg: Option<SinkConfig>,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir`. The directory is created in `begin` if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pad: 4,
            cfg: None,
            written: 0,
        }
    }

    /// Override the zero-padding width of frame file names.
    pub fn with_padding(mut self, pad: usize) -> Self {
        self.pad = pad;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.written
    }

    /// Path used for frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{:0pad$}.png", idx.0, pad = self.pad))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SplineCamResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SplineCamError::encode(format!(
                "create output dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> SplineCamResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(SplineCamError::encode("push_frame called before begin"));
        };
        if frame.width != cfg.canvas.width || frame.height != cfg.canvas.height {
            return Err(SplineCamError::encode(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.canvas.width, cfg.canvas.height
            )));
        }
        check_next_index(self.written, idx)?;

        let path = self.frame_path(idx);
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| SplineCamError::encode(format!("write png '{}': {e}", path.display())))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> SplineCamResult<()> {
        tracing::debug!(dir = %self.dir.display(), frames = self.written, "png sequence complete");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
