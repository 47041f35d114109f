use crate::curve::cursor::Sample;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{SplineCamError, SplineCamResult};

/// World-to-screen mapping for a camera viewport of fixed world extents.
///
/// Pure: the camera center is passed per call and nothing is cached between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    view_w: f64,
    view_h: f64,
    out_w: f64,
    out_h: f64,
}

impl Projector {
    /// `view_w`/`view_h` are the viewport extents in world units; `canvas` is the pixel target.
    pub fn new(view_w: f64, view_h: f64, canvas: Canvas) -> SplineCamResult<Self> {
        if !(view_w.is_finite() && view_w > 0.0 && view_h.is_finite() && view_h > 0.0) {
            return Err(SplineCamError::validation(
                "camera viewport extents must be finite and > 0",
            ));
        }
        Ok(Self {
            view_w,
            view_h,
            out_w: f64::from(canvas.width),
            out_h: f64::from(canvas.height),
        })
    }

    /// Map a world point to pixel coordinates.
    pub fn project(&self, center: Point, world: Point) -> Point {
        Point::new(
            (world.x - center.x) / self.view_w * self.out_w + self.out_w / 2.0,
            (world.y - center.y) / self.view_h * self.out_h + self.out_h / 2.0,
        )
    }

    /// Closed x-interval kept by culling with the given margin.
    pub fn visible_x_range(&self, center: Point, margin: f64) -> (f64, f64) {
        let half = self.view_w / 2.0 + margin;
        (center.x - half, center.x + half)
    }

    /// `true` when world x survives culling.
    pub fn is_visible(&self, center: Point, wx: f64, margin: f64) -> bool {
        let (lo, hi) = self.visible_x_range(center, margin);
        wx >= lo && wx <= hi
    }

    /// Cull and project history samples, keeping chronological order.
    pub fn project_history(&self, center: Point, samples: &[Sample], margin: f64) -> Vec<Point> {
        samples
            .iter()
            .filter(|s| self.is_visible(center, s.pos.x, margin))
            .map(|s| self.project(center, s.pos))
            .collect()
    }

    /// Cull and project control points.
    pub fn project_points(&self, center: Point, points: &[Point], margin: f64) -> Vec<Point> {
        points
            .iter()
            .filter(|p| self.is_visible(center, p.x, margin))
            .map(|p| self.project(center, *p))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/project.rs"]
mod tests;
