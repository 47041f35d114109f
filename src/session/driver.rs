use crate::camera::state::CameraState;
use crate::curve::cursor::{Advance, EvaluationState, PointHistory};
use crate::curve::model::CurveModel;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::SplineCamResult;
use crate::render::cpu::FrameRenderer;
use crate::render::frame::FrameRgb;
use crate::render::project::Projector;
use crate::session::config::RenderConfig;

/// Why a run stopped. Neither case is an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The cursor stepped past the last control point.
    Exhausted,
    /// `max_frames` frames were emitted first.
    BudgetReached,
}

/// Position report for one emitted frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Frame that was just rendered.
    pub frame: FrameIndex,
    /// Cursor x after the frame's sub-steps.
    pub x: f64,
    /// x of the first control point.
    pub domain_start: f64,
    /// x of the last control point.
    pub domain_end: f64,
    /// Share of the domain covered, in percent.
    pub percent: f64,
}

/// Result of one driver iteration.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameStep {
    /// A frame was produced.
    Rendered {
        /// Index of the frame; contiguous from 0.
        index: FrameIndex,
        /// The frame pixels.
        frame: FrameRgb,
        /// Where the cursor stood.
        progress: Progress,
    },
    /// Terminal. Every later call returns the same value.
    Finished(RunOutcome),
}

/// Screen-space geometry of the current frame after culling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibleGeometry {
    /// Projected history points in chronological order.
    pub polyline: Vec<Point>,
    /// Projected control points.
    pub markers: Vec<Point>,
}

/// Summary of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunStats {
    /// Frames handed to the sink.
    pub frames_emitted: u64,
    /// Curve samples evaluated, including the seed point.
    pub samples: usize,
    /// Why the run stopped.
    pub outcome: RunOutcome,
}

/// Per-frame loop: advance the cursor, move the camera, cull, project, draw.
///
/// Owns all mutable run state. The curve is borrowed read-only.
#[derive(Debug)]
pub struct FrameSequenceDriver<'a> {
    curve: &'a CurveModel,
    cfg: RenderConfig,

    cursor: EvaluationState,
    history: PointHistory,
    camera: CameraState,
    projector: Projector,
    renderer: FrameRenderer,

    next: FrameIndex,
    finished: Option<RunOutcome>,
}

impl<'a> FrameSequenceDriver<'a> {
    /// Validate `cfg` and set up a run at the start of `curve`.
    pub fn new(curve: &'a CurveModel, cfg: RenderConfig) -> SplineCamResult<Self> {
        cfg.validate()?;
        let cursor = EvaluationState::new(curve, cfg.step, cfg.sub_steps)?;
        let camera = CameraState::new(curve.first_point(), cfg.cam_t, cfg.track_mode)?;
        let renderer = FrameRenderer::new(cfg.output_canvas()?, cfg.supersample, cfg.style())?;
        let projector = Projector::new(cfg.cam_width, cfg.cam_height, renderer.render_canvas())?;
        Ok(Self {
            curve,
            cursor,
            history: PointHistory::seeded(curve),
            camera,
            projector,
            renderer,
            cfg,
            next: FrameIndex(0),
            finished: None,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    /// Evaluation cursor.
    pub fn cursor(&self) -> &EvaluationState {
        &self.cursor
    }

    /// Camera state.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Retained point history.
    pub fn history(&self) -> &PointHistory {
        &self.history
    }

    /// Projector mapping world to supersampled canvas pixels.
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Number of frames emitted so far.
    pub fn frames_emitted(&self) -> u64 {
        self.next.0
    }

    /// Terminal outcome, once reached.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.finished
    }

    /// Cull and project history and control points for the current camera position.
    pub fn visible(&self) -> VisibleGeometry {
        let center = self.camera.center();
        VisibleGeometry {
            polyline: self.projector.project_history(
                center,
                self.history.samples(),
                self.cfg.line_margin,
            ),
            markers: self.projector.project_points(
                center,
                self.curve.control_points(),
                self.cfg.point_margin,
            ),
        }
    }

    /// Run one iteration of the loop.
    ///
    /// Exhaustion is detected mid-frame, before drawing, so no frame is produced past the end of
    /// the curve.
    pub fn step(&mut self) -> SplineCamResult<FrameStep> {
        if let Some(outcome) = self.finished {
            return Ok(FrameStep::Finished(outcome));
        }
        if self.next.0 >= self.cfg.max_frames {
            return Ok(self.finish(RunOutcome::BudgetReached));
        }

        for _ in 0..self.cfg.sub_steps {
            match self.cursor.advance(self.curve)? {
                Advance::Sampled(s) => self.history.push(s),
                Advance::Exhausted => return Ok(self.finish(RunOutcome::Exhausted)),
            }
        }

        if let Some(latest) = self.history.last() {
            self.camera.update(latest.pos);
        }
        if self.cfg.evict_offscreen_history {
            let (lo, _) = self
                .projector
                .visible_x_range(self.camera.center(), self.cfg.line_margin);
            self.history.evict_before(lo);
        }

        let geom = self.visible();
        let frame = self.renderer.render(&geom.polyline, &geom.markers)?;

        let index = self.next;
        self.next = index.next();
        let x = self.cursor.x();
        let progress = Progress {
            frame: index,
            x,
            domain_start: self.curve.domain_start(),
            domain_end: self.curve.domain_end(),
            percent: self.curve.percent_complete(x),
        };
        tracing::debug!(
            frame = index.0,
            "{:.2} < {:.2} < {:.2} ({:.2}%)",
            progress.domain_start,
            progress.x,
            progress.domain_end,
            progress.percent
        );
        Ok(FrameStep::Rendered {
            index,
            frame,
            progress,
        })
    }

    /// Drive the loop to completion, streaming frames into `sink`.
    #[tracing::instrument(skip_all, fields(max_frames = self.cfg.max_frames))]
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> SplineCamResult<RunStats> {
        tracing::info!(
            domain_start = self.curve.domain_start(),
            domain_end = self.curve.domain_end(),
            segments = self.curve.segment_count(),
            max_frames = self.cfg.max_frames,
            "run started"
        );
        sink.begin(SinkConfig {
            canvas: self.renderer.output_canvas(),
        })?;
        let outcome = loop {
            match self.step()? {
                FrameStep::Rendered { index, frame, .. } => sink.push_frame(index, &frame)?,
                FrameStep::Finished(outcome) => break outcome,
            }
        };
        sink.end()?;

        let stats = RunStats {
            frames_emitted: self.next.0,
            samples: self.history.total_recorded(),
            outcome,
        };
        tracing::info!(
            frames = stats.frames_emitted,
            samples = stats.samples,
            outcome = ?stats.outcome,
            "run finished"
        );
        Ok(stats)
    }

    fn finish(&mut self, outcome: RunOutcome) -> FrameStep {
        self.finished = Some(outcome);
        FrameStep::Finished(outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
