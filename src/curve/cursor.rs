use crate::curve::model::CurveModel;
use crate::foundation::core::Point;
use crate::foundation::error::{SplineCamError, SplineCamResult};

/// One evaluated point on the curve, tagged with the segment that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// World-space position.
    pub pos: Point,
    /// Segment index active when the point was evaluated.
    pub segment: usize,
}

/// Result of a single sub-advancement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    /// The cursor moved and produced a new sample.
    Sampled(Sample),
    /// The cursor stepped past the last control point. Terminal.
    Exhausted,
}

/// Forward-only evaluation cursor over a [`CurveModel`].
///
/// `x` grows by a constant delta per sub-step and the segment index only ever moves forward.
/// There is no resynchronization to exact control point x values.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationState {
    x: f64,
    segment: usize,
    dx: f64,
    exhausted: bool,
}

impl EvaluationState {
    /// Start at the first control point with a per-sub-step delta of `step / sub_steps`.
    pub fn new(curve: &CurveModel, step: f64, sub_steps: u32) -> SplineCamResult<Self> {
        if sub_steps == 0 {
            return Err(SplineCamError::validation("sub_steps must be > 0"));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(SplineCamError::validation(
                "step must be finite and > 0",
            ));
        }
        Ok(Self {
            x: curve.domain_start(),
            segment: 0,
            dx: step / f64::from(sub_steps),
            exhausted: false,
        })
    }

    /// Current x.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Current segment index.
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// x delta applied per sub-step.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// `true` once the cursor has run off the end of the curve.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Move forward by one sub-step and evaluate the curve there.
    ///
    /// Once [`Advance::Exhausted`] has been returned the cursor is frozen and keeps returning it.
    pub fn advance(&mut self, curve: &CurveModel) -> SplineCamResult<Advance> {
        if self.exhausted {
            return Ok(Advance::Exhausted);
        }

        self.x += self.dx;
        let points = curve.control_points();
        while self.segment < curve.segment_count() && self.x > points[self.segment + 1].x {
            self.segment += 1;
        }
        if self.segment >= curve.segment_count() {
            self.exhausted = true;
            return Ok(Advance::Exhausted);
        }

        let y = curve.value_at(self.x, self.segment)?;
        Ok(Advance::Sampled(Sample {
            pos: Point::new(self.x, y),
            segment: self.segment,
        }))
    }
}

/// Append-only record of evaluated points, in the order they were produced.
///
/// The only removal is [`PointHistory::evict_before`], which drops a prefix that can no longer
/// become visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointHistory {
    samples: Vec<Sample>,
    evicted: usize,
}

impl PointHistory {
    /// History seeded with the curve's first control point (segment 0).
    pub fn seeded(curve: &CurveModel) -> Self {
        Self {
            samples: vec![Sample {
                pos: curve.first_point(),
                segment: 0,
            }],
            evicted: 0,
        }
    }

    /// Append a sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Retained samples in chronological order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples ever recorded, including evicted ones.
    pub fn total_recorded(&self) -> usize {
        self.evicted + self.samples.len()
    }

    /// Drop the leading samples with `x < min_x`. Returns how many were dropped.
    ///
    /// Samples are ordered by x, so the dropped set is always a prefix.
    pub fn evict_before(&mut self, min_x: f64) -> usize {
        let n = self.samples.partition_point(|s| s.pos.x < min_x);
        if n > 0 {
            self.samples.drain(..n);
            self.evicted += n;
        }
        n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/cursor.rs"]
mod tests;
