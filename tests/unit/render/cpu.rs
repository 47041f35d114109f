use super::*;

const BG: Rgb8 = Rgb8::new(226, 220, 205);
const INK: Rgb8 = Rgb8::new(10, 10, 10);
const MARKER: Rgb8 = Rgb8::new(200, 30, 30);

fn renderer(supersample: u32) -> FrameRenderer {
    FrameRenderer::new(
        Canvas::new(64, 32).unwrap(),
        supersample,
        RenderStyle {
            background: BG,
            ink: INK,
            marker: MARKER,
            stroke_width: 4.0,
            marker_radius: 6.0,
        },
    )
    .unwrap()
}

#[test]
fn empty_frame_is_background() {
    let mut r = renderer(2);
    let frame = r.render(&[], &[]).unwrap();
    assert_eq!((frame.width, frame.height), (64, 32));
    assert_eq!(frame.data.len(), 64 * 32 * 3);
    assert!(frame.data.chunks_exact(3).all(|px| px == [226, 220, 205]));
}

#[test]
fn render_canvas_is_supersampled() {
    let r = renderer(3);
    assert_eq!(r.render_canvas(), Canvas { width: 192, height: 96 });
    assert_eq!(r.output_canvas(), Canvas { width: 64, height: 32 });
}

#[test]
fn polyline_is_drawn_in_ink() {
    let mut r = renderer(2);
    // Horizontal line across the middle of the 128x64 canvas.
    let line = [Point::new(0.0, 32.0), Point::new(128.0, 32.0)];
    let frame = r.render(&line, &[]).unwrap();
    let mid = frame.pixel(32, 16).unwrap();
    assert!(mid[0] < 100, "expected dark pixel on the stroke, got {mid:?}");
    assert_eq!(frame.pixel(32, 2).unwrap(), [226, 220, 205]);
}

#[test]
fn markers_are_filled() {
    let mut r = renderer(1);
    let frame = r.render(&[], &[Point::new(40.0, 10.0)]).unwrap();
    assert_eq!(frame.pixel(40, 10).unwrap(), [200, 30, 30]);
    assert_eq!(frame.pixel(10, 25).unwrap(), [226, 220, 205]);
}

#[test]
fn single_point_polyline_draws_nothing() {
    let mut r = renderer(1);
    let frame = r.render(&[Point::new(10.0, 10.0)], &[]).unwrap();
    assert!(frame.data.chunks_exact(3).all(|px| px == [226, 220, 205]));
}

#[test]
fn reuses_context_across_frames() {
    let mut r = renderer(2);
    let a = r.render(&[], &[Point::new(20.0, 20.0)]).unwrap();
    let b = r.render(&[], &[Point::new(20.0, 20.0)]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rejects_oversized_canvas_and_bad_style() {
    let style = RenderStyle {
        background: BG,
        ink: INK,
        marker: INK,
        stroke_width: 1.0,
        marker_radius: 1.0,
    };
    assert!(FrameRenderer::new(Canvas::new(40_000, 10).unwrap(), 2, style).is_err());
    assert!(FrameRenderer::new(Canvas::new(10, 10).unwrap(), 0, style).is_err());
    let bad = RenderStyle {
        stroke_width: -1.0,
        ..style
    };
    assert!(FrameRenderer::new(Canvas::new(10, 10).unwrap(), 1, bad).is_err());
}

#[test]
fn markers_are_drawn_over_the_path() {
    let mut r = renderer(1);
    let line = [Point::new(0.0, 10.0), Point::new(64.0, 10.0)];
    let frame = r.render(&line, &[Point::new(40.0, 10.0)]).unwrap();
    assert_eq!(frame.pixel(40, 10).unwrap(), [200, 30, 30]);
    assert_eq!(frame.pixel(20, 10).unwrap(), [10, 10, 10]);
}
