use crate::foundation::core::Point;
use crate::foundation::error::{SplineCamError, SplineCamResult};

/// Whether the camera follows the curve vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackMode {
    /// `cy` never changes after initialization.
    Locked,
    /// `cy` is smoothed toward the curve like `cx`.
    #[default]
    Tracking,
}

/// Camera center, smoothed toward the newest evaluated point once per frame.
///
/// This is a first-order exponential moving average with no clamping. While the target keeps
/// moving forward the camera trails behind it and never catches up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    center: Point,
    t: f64,
    mode: TrackMode,
}

impl CameraState {
    /// Create a camera centered on `initial`. `t` must lie in the open interval (0, 1).
    pub fn new(initial: Point, t: f64, mode: TrackMode) -> SplineCamResult<Self> {
        if !(t > 0.0 && t < 1.0) {
            return Err(SplineCamError::validation(format!(
                "camera smoothing factor must be in (0, 1), got {t}"
            )));
        }
        Ok(Self {
            center: initial,
            t,
            mode,
        })
    }

    /// Current center in world units.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Smoothing factor applied per update.
    pub fn smoothing(&self) -> f64 {
        self.t
    }

    /// Vertical tracking mode.
    pub fn mode(&self) -> TrackMode {
        self.mode
    }

    /// Move a fraction `t` of the way toward `target`.
    pub fn update(&mut self, target: Point) {
        self.center.x += (target.x - self.center.x) * self.t;
        if self.mode == TrackMode::Tracking {
            self.center.y += (target.y - self.center.y) * self.t;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/state.rs"]
mod tests;
