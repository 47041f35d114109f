use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{SplineCamError, SplineCamResult};
use crate::render::downsample::downsample_rgba_to_rgb;
use crate::render::frame::FrameRgb;
use vello_cpu::kurbo::Shape as _;

/// Fixed drawing parameters shared by every frame.
///
/// Sizes are in supersampled canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    /// Canvas fill color.
    pub background: Rgb8,
    /// Path color.
    pub ink: Rgb8,
    /// Control point marker color.
    pub marker: Rgb8,
    /// Path stroke width.
    pub stroke_width: f64,
    /// Control point marker radius.
    pub marker_radius: f64,
}

/// CPU rasterizer powered by `vello_cpu`.
///
/// Draws at `output * supersample` and box-filters down to the output size.
pub struct FrameRenderer {
    output: Canvas,
    supersample: u32,
    style: RenderStyle,

    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl std::fmt::Debug for FrameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("output", &self.output)
            .field("supersample", &self.supersample)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl FrameRenderer {
    /// Create a renderer producing frames of size `output`.
    pub fn new(output: Canvas, supersample: u32, style: RenderStyle) -> SplineCamResult<Self> {
        if supersample == 0 {
            return Err(SplineCamError::validation("supersample must be >= 1"));
        }
        Canvas::new(output.width, output.height)?;
        output.scaled(supersample).as_u16()?;
        if !(style.stroke_width.is_finite() && style.stroke_width >= 0.0) {
            return Err(SplineCamError::validation(
                "stroke width must be finite and >= 0",
            ));
        }
        if !(style.marker_radius.is_finite() && style.marker_radius >= 0.0) {
            return Err(SplineCamError::validation(
                "marker radius must be finite and >= 0",
            ));
        }
        Ok(Self {
            output,
            supersample,
            style,
            ctx: None,
            pixmap: None,
        })
    }

    /// Size of the emitted frames.
    pub fn output_canvas(&self) -> Canvas {
        self.output
    }

    /// Size of the internal supersampled canvas; projection targets this.
    pub fn render_canvas(&self) -> Canvas {
        self.output.scaled(self.supersample)
    }

    /// Draw one frame.
    ///
    /// `polyline` is stroked in order, then a filled marker is drawn at each of `markers`, so
    /// markers always sit on top of the path. Coordinates are pixels on the supersampled canvas.
    pub fn render(&mut self, polyline: &[Point], markers: &[Point]) -> SplineCamResult<FrameRgb> {
        let canvas = self.render_canvas();
        let (w, h) = canvas.as_u16()?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        self.draw(&mut ctx, canvas, polyline, markers);
        ctx.flush();

        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        ctx.render_to_pixmap(&mut pixmap);

        let frame = downsample_rgba_to_rgb(
            pixmap.data_as_u8_slice(),
            canvas.width,
            canvas.height,
            self.supersample,
        );
        self.ctx = Some(ctx);
        self.pixmap = Some(pixmap);
        frame
    }

    fn draw(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        canvas: Canvas,
        polyline: &[Point],
        markers: &[Point],
    ) {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(self.style.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));

        ctx.set_paint(color_to_cpu(self.style.ink));
        if polyline.len() >= 2 && self.style.stroke_width > 0.0 {
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(point_to_cpu(polyline[0]));
            for &p in &polyline[1..] {
                path.line_to(point_to_cpu(p));
            }
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(self.style.stroke_width)
                    .with_join(vello_cpu::kurbo::Join::Round),
            );
            ctx.stroke_path(&path);
        }

        if self.style.marker_radius > 0.0 {
            ctx.set_paint(color_to_cpu(self.style.marker));
            for &m in markers {
                let circle =
                    vello_cpu::kurbo::Circle::new(point_to_cpu(m), self.style.marker_radius);
                ctx.fill_path(&circle.to_path(0.1));
            }
        }
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn color_to_cpu(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
