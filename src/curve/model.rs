use crate::foundation::core::Point;
use crate::foundation::error::{SplineCamError, SplineCamResult};

/// Cubic coefficients of one segment: `y = a·x³ + b·x² + c·x + d`.
///
/// The polynomial is in absolute x, not in a segment-local parameter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coefficients {
    /// Cubic term.
    pub a: f64,
    /// Quadratic term.
    pub b: f64,
    /// Linear term.
    pub c: f64,
    /// Constant term.
    pub d: f64,
}

impl Coefficients {
    /// Build coefficients from `[a, b, c, d]`.
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Evaluate the cubic at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }
}

/// A spline chain: control points sorted by x, and one cubic per gap between them.
///
/// Loaded once and shared read-only by every stage of the frame pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveModel {
    points: Vec<Point>,
    segments: Vec<Coefficients>,
}

impl CurveModel {
    /// Build a validated curve.
    ///
    /// Requires at least two control points, exactly one segment per gap, finite values and
    /// strictly ascending x.
    pub fn new(points: Vec<Point>, segments: Vec<Coefficients>) -> SplineCamResult<Self> {
        if points.len() < 2 {
            return Err(SplineCamError::validation(
                "curve needs at least two control points",
            ));
        }
        if segments.len() != points.len() - 1 {
            return Err(SplineCamError::validation(format!(
                "curve with {} control points needs {} segments, got {}",
                points.len(),
                points.len() - 1,
                segments.len()
            )));
        }
        if let Some(i) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(SplineCamError::validation(format!(
                "control point {i} is not finite"
            )));
        }
        if let Some(i) = segments.iter().position(|s| {
            ![s.a, s.b, s.c, s.d].iter().all(|v| v.is_finite())
        }) {
            return Err(SplineCamError::validation(format!(
                "segment {i} has non-finite coefficients"
            )));
        }
        if let Some(i) = points.windows(2).position(|w| w[1].x <= w[0].x) {
            return Err(SplineCamError::validation(format!(
                "control point {} must have x greater than control point {i}",
                i + 1
            )));
        }
        Ok(Self { points, segments })
    }

    /// Control points in ascending x order.
    pub fn control_points(&self) -> &[Point] {
        &self.points
    }

    /// Segment coefficients, co-indexed with the control point that starts each segment.
    pub fn segments(&self) -> &[Coefficients] {
        &self.segments
    }

    /// Number of segments (control points minus one).
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// x of the first control point.
    pub fn domain_start(&self) -> f64 {
        self.points[0].x
    }

    /// x of the last control point.
    pub fn domain_end(&self) -> f64 {
        self.points[self.points.len() - 1].x
    }

    /// The first control point.
    pub fn first_point(&self) -> Point {
        self.points[0]
    }

    /// Nominal `[start, end)` x-domain of segment `i`.
    pub fn segment_domain(&self, i: usize) -> Option<(f64, f64)> {
        if i >= self.segments.len() {
            return None;
        }
        Some((self.points[i].x, self.points[i + 1].x))
    }

    /// Evaluate segment `segment` at `x`.
    ///
    /// The caller is responsible for choosing the segment whose domain holds `x`; the polynomial
    /// is evaluated as-is otherwise. Only an out-of-range index is reported.
    pub fn value_at(&self, x: f64, segment: usize) -> SplineCamResult<f64> {
        self.segments
            .get(segment)
            .map(|c| c.eval(x))
            .ok_or_else(|| {
                SplineCamError::evaluation(format!(
                    "segment index {segment} out of range (curve has {} segments)",
                    self.segments.len()
                ))
            })
    }

    /// Fraction of the domain covered at `x`, in percent.
    pub fn percent_complete(&self, x: f64) -> f64 {
        let span = self.domain_end() - self.domain_start();
        (x - self.domain_start()) / span * 100.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/model.rs"]
mod tests;
