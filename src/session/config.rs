use crate::camera::state::TrackMode;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{SplineCamError, SplineCamResult};
use crate::render::cpu::RenderStyle;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Run-wide constants. Read once before the first frame and never re-read.
///
/// Every field has a default, so a JSON config only needs the values it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Frame budget. The run stops after this many frames even if the curve is not exhausted.
    pub max_frames: u64,
    /// x advance per frame.
    pub step: f64,
    /// Sub-advancements per frame; each moves x by `step / sub_steps`.
    pub sub_steps: u32,
    /// Camera smoothing factor per frame, in (0, 1).
    pub cam_t: f64,
    /// Viewport width in world units.
    pub cam_width: f64,
    /// Viewport height in world units.
    pub cam_height: f64,
    /// Integer supersampling factor.
    pub supersample: u32,
    /// Final frame width in pixels.
    pub output_width: u32,
    /// Final frame height in pixels.
    pub output_height: u32,
    /// Vertical camera tracking.
    pub track_mode: TrackMode,
    /// Path stroke width in supersampled pixels.
    pub stroke_width: f64,
    /// Control point marker radius in supersampled pixels.
    pub marker_radius: f64,
    /// History culling margin in world units.
    pub line_margin: f64,
    /// Control point culling margin in world units.
    pub point_margin: f64,
    /// Background color.
    pub background: Rgb8,
    /// Path color.
    pub ink: Rgb8,
    /// Control point marker color.
    pub marker: Rgb8,
    /// Drop history points once they fall permanently behind the camera.
    pub evict_offscreen_history: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_frames: 24 * 96,
            step: 0.008,
            sub_steps: 2,
            cam_t: 0.04,
            cam_width: 1.9,
            cam_height: 1.0,
            supersample: 2,
            output_width: 1920,
            output_height: 1080,
            track_mode: TrackMode::Tracking,
            stroke_width: 6.0,
            marker_radius: 9.0,
            line_margin: 20.0,
            point_margin: 10.0,
            background: Rgb8::new(226, 220, 205),
            ink: Rgb8::new(10, 10, 10),
            marker: Rgb8::new(10, 10, 10),
            evict_offscreen_history: false,
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SplineCamResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SplineCamError::serde(format!("parse render config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SplineCamResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SplineCamError::serde(format!("open render config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every constant before a run starts.
    pub fn validate(&self) -> SplineCamResult<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SplineCamError::validation("step must be finite and > 0"));
        }
        if self.sub_steps == 0 {
            return Err(SplineCamError::validation("sub_steps must be > 0"));
        }
        if !(self.cam_t > 0.0 && self.cam_t < 1.0) {
            return Err(SplineCamError::validation("cam_t must be in (0, 1)"));
        }
        if !(self.cam_width.is_finite() && self.cam_width > 0.0)
            || !(self.cam_height.is_finite() && self.cam_height > 0.0)
        {
            return Err(SplineCamError::validation(
                "cam_width and cam_height must be finite and > 0",
            ));
        }
        if self.supersample == 0 {
            return Err(SplineCamError::validation("supersample must be >= 1"));
        }
        self.output_canvas()?;
        self.render_canvas()?.as_u16()?;
        for (name, v) in [
            ("stroke_width", self.stroke_width),
            ("marker_radius", self.marker_radius),
            ("line_margin", self.line_margin),
            ("point_margin", self.point_margin),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SplineCamError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.point_margin > self.line_margin {
            return Err(SplineCamError::validation(
                "point_margin must not exceed line_margin",
            ));
        }
        Ok(())
    }

    /// Final frame size.
    pub fn output_canvas(&self) -> SplineCamResult<Canvas> {
        Canvas::new(self.output_width, self.output_height)
    }

    /// Supersampled drawing size.
    pub fn render_canvas(&self) -> SplineCamResult<Canvas> {
        Ok(self.output_canvas()?.scaled(self.supersample))
    }

    /// Drawing parameters for the renderer.
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            background: self.background,
            ink: self.ink,
            marker: self.marker,
            stroke_width: self.stroke_width,
            marker_radius: self.marker_radius,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
