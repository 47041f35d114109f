use super::*;
use crate::camera::state::TrackMode;
use crate::curve::model::Coefficients;
use crate::encode::sink::InMemorySink;

fn identity_curve() -> CurveModel {
    CurveModel::from_text("0 0\n0 0 1 0\n1 1\n").unwrap()
}

/// Piecewise chain over `[0, n]` with a wiggle per unit segment.
fn wiggle_curve(n: usize) -> CurveModel {
    let mut points = Vec::new();
    let mut segments = Vec::new();
    for i in 0..=n {
        let x = i as f64;
        points.push(Point::new(x, if i % 2 == 0 { 0.0 } else { 0.4 }));
    }
    for i in 0..n {
        let (x0, y0) = (points[i].x, points[i].y);
        let slope = points[i + 1].y - y0;
        segments.push(Coefficients::new(0.0, 0.0, slope, y0 - slope * x0));
    }
    CurveModel::new(points, segments).unwrap()
}

fn small_cfg() -> RenderConfig {
    RenderConfig {
        max_frames: 1000,
        step: 0.1,
        sub_steps: 1,
        cam_t: 0.2,
        cam_width: 1.0,
        cam_height: 1.0,
        supersample: 1,
        output_width: 32,
        output_height: 16,
        stroke_width: 2.0,
        marker_radius: 2.0,
        ..RenderConfig::default()
    }
}

#[test]
fn identity_curve_terminates_before_leaving_domain() {
    let curve = identity_curve();
    let mut driver = FrameSequenceDriver::new(&curve, small_cfg()).unwrap();
    let mut sink = InMemorySink::new();
    let stats = driver.run(&mut sink).unwrap();

    assert_eq!(stats.outcome, RunOutcome::Exhausted);
    assert_eq!(stats.frames_emitted, 10);
    assert_eq!(sink.frames().len(), 10);
    assert!(sink.is_ended());
    assert!(driver.history().samples().iter().all(|s| s.pos.x <= 1.0));
    assert_eq!(driver.step().unwrap(), FrameStep::Finished(RunOutcome::Exhausted));
}

#[test]
fn frame_budget_stops_run() {
    let curve = wiggle_curve(4);
    let cfg = RenderConfig {
        max_frames: 3,
        ..small_cfg()
    };
    let mut driver = FrameSequenceDriver::new(&curve, cfg).unwrap();
    let mut sink = InMemorySink::new();
    let stats = driver.run(&mut sink).unwrap();
    assert_eq!(stats.outcome, RunOutcome::BudgetReached);
    assert_eq!(stats.frames_emitted, 3);
    assert_eq!(stats.samples, 4);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn zero_budget_emits_nothing() {
    let curve = identity_curve();
    let cfg = RenderConfig {
        max_frames: 0,
        ..small_cfg()
    };
    let mut driver = FrameSequenceDriver::new(&curve, cfg).unwrap();
    let mut sink = InMemorySink::new();
    let stats = driver.run(&mut sink).unwrap();
    assert_eq!(stats.frames_emitted, 0);
    assert_eq!(stats.outcome, RunOutcome::BudgetReached);
    assert!(sink.frames().is_empty());
}

#[test]
fn cursor_and_progress_are_monotonic() {
    let curve = wiggle_curve(3);
    let cfg = RenderConfig {
        step: 0.07,
        sub_steps: 3,
        ..small_cfg()
    };
    let mut driver = FrameSequenceDriver::new(&curve, cfg).unwrap();
    let mut last_x = f64::NEG_INFINITY;
    let mut last_seg = 0;
    let mut expected = 0;
    while let FrameStep::Rendered {
        index, progress, ..
    } = driver.step().unwrap()
    {
        assert_eq!(index, FrameIndex(expected));
        expected += 1;
        assert!(progress.x > last_x);
        assert!(progress.percent >= 0.0 && progress.percent <= 100.0);
        assert_eq!(progress.domain_start, 0.0);
        assert_eq!(progress.domain_end, 3.0);
        assert!(driver.cursor().segment() >= last_seg);
        last_x = progress.x;
        last_seg = driver.cursor().segment();
    }
    assert_eq!(driver.outcome(), Some(RunOutcome::Exhausted));
    assert_eq!(driver.history().len(), driver.history().total_recorded());
}

#[test]
fn locked_mode_holds_camera_y() {
    let curve = wiggle_curve(4);
    let cfg = RenderConfig {
        track_mode: TrackMode::Locked,
        ..small_cfg()
    };
    let mut driver = FrameSequenceDriver::new(&curve, cfg).unwrap();
    let y0 = driver.camera().center().y;
    while let FrameStep::Rendered { .. } = driver.step().unwrap() {
        assert_eq!(driver.camera().center().y, y0);
    }
}

#[test]
fn tracking_mode_moves_camera_y() {
    let curve = wiggle_curve(4);
    let mut driver = FrameSequenceDriver::new(&curve, small_cfg()).unwrap();
    let y0 = driver.camera().center().y;
    for _ in 0..5 {
        driver.step().unwrap();
    }
    assert!(driver.camera().center().y > y0);
}

#[test]
fn camera_lags_behind_cursor() {
    let curve = wiggle_curve(4);
    let mut driver = FrameSequenceDriver::new(&curve, small_cfg()).unwrap();
    while let FrameStep::Rendered { .. } = driver.step().unwrap() {
        assert!(driver.camera().center().x < driver.cursor().x());
    }
}

#[test]
fn culled_points_never_reach_the_polyline() {
    let curve = wiggle_curve(6);
    let cfg = RenderConfig {
        line_margin: 0.1,
        point_margin: 0.05,
        step: 0.05,
        cam_t: 0.1,
        ..small_cfg()
    };
    let mut driver = FrameSequenceDriver::new(&curve, cfg).unwrap();
    while let FrameStep::Rendered { .. } = driver.step().unwrap() {
        let center = driver.camera().center();
        let (lo, hi) = driver.projector().visible_x_range(center, 0.1);
        let expected: Vec<Point> = driver
            .history()
            .samples()
            .iter()
            .filter(|s| s.pos.x >= lo && s.pos.x <= hi)
            .map(|s| driver.projector().project(center, s.pos))
            .collect();
        let geom = driver.visible();
        assert_eq!(geom.polyline, expected);

        let (plo, phi) = driver.projector().visible_x_range(center, 0.05);
        let markers = curve
            .control_points()
            .iter()
            .filter(|p| p.x >= plo && p.x <= phi)
            .count();
        assert_eq!(geom.markers.len(), markers);
    }
}

#[test]
fn eviction_does_not_change_frames() {
    let curve = wiggle_curve(6);
    let base = RenderConfig {
        line_margin: 0.1,
        point_margin: 0.05,
        step: 0.05,
        cam_t: 0.1,
        ..small_cfg()
    };
    let evicting = RenderConfig {
        evict_offscreen_history: true,
        ..base.clone()
    };

    let mut a = FrameSequenceDriver::new(&curve, base).unwrap();
    let mut sink_a = InMemorySink::new();
    let stats_a = a.run(&mut sink_a).unwrap();

    let mut b = FrameSequenceDriver::new(&curve, evicting).unwrap();
    let mut sink_b = InMemorySink::new();
    let stats_b = b.run(&mut sink_b).unwrap();

    assert_eq!(stats_a, stats_b);
    assert!(b.history().len() < a.history().len());
    assert_eq!(sink_a.frames(), sink_b.frames());
}

#[test]
fn rejects_invalid_config() {
    let curve = identity_curve();
    let cfg = RenderConfig {
        cam_t: 0.0,
        ..small_cfg()
    };
    assert!(FrameSequenceDriver::new(&curve, cfg).is_err());
}

#[derive(Clone, Default)]
struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn run_logs_start_and_finish() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let curve = identity_curve();
    tracing::subscriber::with_default(subscriber, || {
        let mut driver = FrameSequenceDriver::new(&curve, small_cfg()).unwrap();
        driver.run(&mut InMemorySink::new()).unwrap();
    });

    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let start = text.find("run started").expect("missing start log");
    let end = text.find("run finished").expect("missing finish log");
    assert!(start < end);
    assert!(text.contains("max_frames=1000"));
    assert!(text.contains("domain_end=1"));
}
