//! Raster surface backed by a tiny-skia pixmap.
//!
//! The pixmap is sized in physical pixels (`css size × device pixel ratio`)
//! and every draw starts from a uniform device-pixel-ratio scale, so callers
//! work in CSS pixels and strokes stay crisp on dense displays. Text goes
//! through usvg/resvg so it is shaped with real fonts.

use std::fmt::Write;
use std::sync::Arc;

use plan_core::{Point, SurfaceSize};
use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use usvg::fontdb::Database;

use super::{DrawSurface, PixelRect};
use crate::error::{RenderError, RenderResult};
use crate::style::{Color, StrokeStyle, TextAlign, TextBaseline, TextStyle};

/// Largest backing store accepted, in physical pixels (256 MiB of RGBA).
pub const MAX_SURFACE_PIXELS: u64 = 64 * 1024 * 1024;

/// Raster backing surface.
pub struct PixmapSurface {
    pixmap: Pixmap,
    size: SurfaceSize,
    current: Transform,
    stack: Vec<Transform>,
    fonts: Arc<Database>,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("size", &self.size)
            .field("physical", &(self.pixmap.width(), self.pixmap.height()))
            .field("depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl PixmapSurface {
    /// Allocate a surface for the given container size.
    ///
    /// # Errors
    ///
    /// Returns an error if the pixmap cannot be allocated.
    pub fn new(size: SurfaceSize, fonts: Arc<Database>) -> RenderResult<Self> {
        let pixmap = allocate(size)?;
        Ok(Self {
            pixmap,
            size,
            current: base_transform(size),
            stack: Vec::new(),
            fonts,
        })
    }

    /// Resize the backing store and reset the transform to the new
    /// device-pixel-ratio scale. Contents are discarded; redraw afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the new pixmap cannot be allocated. The old
    /// backing store is kept in that case.
    pub fn resize(&mut self, size: SurfaceSize) -> RenderResult<()> {
        self.pixmap = allocate(size)?;
        self.size = size;
        self.current = base_transform(size);
        self.stack.clear();
        tracing::debug!(
            "Pixmap surface resized to {}x{} (css {}x{} @{}x)",
            self.pixmap.width(),
            self.pixmap.height(),
            size.width,
            size.height,
            size.device_pixel_ratio
        );
        Ok(())
    }

    /// Physical size a container would need, or an error if it exceeds
    /// [`MAX_SURFACE_PIXELS`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] when the area is over the limit.
    pub fn check_size(size: SurfaceSize) -> RenderResult<(u32, u32)> {
        let (w, h) = size.physical_pixels();
        match u64::from(w).checked_mul(u64::from(h)) {
            Some(area) if area <= MAX_SURFACE_PIXELS => Ok((w, h)),
            _ => Err(RenderError::Surface(format!(
                "{w}x{h} backing store exceeds {MAX_SURFACE_PIXELS} pixels"
            ))),
        }
    }

    /// The backing pixmap (premultiplied RGBA, physical pixels).
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Backing store size in physical pixels.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Un-premultiplied color of a physical pixel.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color {
            r: p.red(),
            g: p.green(),
            b: p.blue(),
            a: p.alpha(),
        })
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        paint
    }

    #[allow(clippy::cast_possible_truncation)]
    fn stroke(style: &StrokeStyle) -> Stroke {
        Stroke {
            width: style.width as f32,
            line_cap: style.cap.into(),
            ..Stroke::default()
        }
    }

    fn stroke_path(&mut self, builder: PathBuilder, style: &StrokeStyle) {
        let Some(path) = builder.finish() else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &Self::paint(style.color),
            &Self::stroke(style),
            self.current,
            None,
        );
    }

    fn render_text(&mut self, text: &str, at: Point, style: &TextStyle) -> RenderResult<()> {
        let (w, h) = self.physical_size();
        let t = self.current;
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
        };
        let baseline = match style.baseline {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "central",
        };
        let weight = if style.bold { "bold" } else { "normal" };

        let mut svg = String::with_capacity(512);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        );
        let _ = write!(
            svg,
            "<text transform=\"matrix({} {} {} {} {} {})\" x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" font-weight=\"{weight}\" fill=\"{}\" fill-opacity=\"{}\" text-anchor=\"{anchor}\" dominant-baseline=\"{baseline}\">{}</text>",
            t.sx,
            t.ky,
            t.kx,
            t.sy,
            t.tx,
            t.ty,
            at.x,
            at.y,
            style.size,
            style.color.to_hex(),
            style.color.opacity(),
            escape_xml(text),
        );
        svg.push_str("</svg>");

        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fonts);
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| RenderError::Text(format!("'{text}': {e}")))?;
        resvg::render(&tree, Transform::identity(), &mut self.pixmap.as_mut());
        Ok(())
    }
}

impl DrawSurface for PixmapSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.current = t;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn translate(&mut self, dx: f64, dy: f64) {
        self.current = self.current.pre_translate(dx as f32, dy as f32);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn rotate(&mut self, degrees: f64) {
        self.current = self.current.pre_rotate(degrees as f32);
    }

    fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let Some(r) = to_skia_rect(rect) else {
            return;
        };
        self.pixmap
            .fill_rect(r, &Self::paint(color), self.current, None);
    }

    fn stroke_rect(&mut self, rect: PixelRect, stroke: &StrokeStyle) {
        let Some(r) = to_skia_rect(rect) else {
            return;
        };
        let path = PathBuilder::from_rect(r);
        self.pixmap.stroke_path(
            &path,
            &Self::paint(stroke.color),
            &Self::stroke(stroke),
            self.current,
            None,
        );
    }

    #[allow(clippy::cast_possible_truncation)]
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        self.stroke_path(pb, stroke);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        stroke: &StrokeStyle,
    ) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        let mut pb = PathBuilder::new();
        append_arc(&mut pb, center, radius, start_deg, end_deg);
        self.stroke_path(pb, stroke);
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        if text.trim().is_empty() {
            return;
        }
        if let Err(e) = self.render_text(text, at, style) {
            tracing::warn!("Skipping label: {e}");
        }
    }
}

fn allocate(size: SurfaceSize) -> RenderResult<Pixmap> {
    let (w, h) = PixmapSurface::check_size(size)?;
    Pixmap::new(w, h).ok_or_else(|| RenderError::Surface(format!("cannot allocate {w}x{h} pixmap")))
}

#[allow(clippy::cast_possible_truncation)]
fn base_transform(size: SurfaceSize) -> Transform {
    let dpr = size.device_pixel_ratio as f32;
    Transform::from_scale(dpr, dpr)
}

#[allow(clippy::cast_possible_truncation)]
fn to_skia_rect(rect: PixelRect) -> Option<Rect> {
    let r = rect.normalized();
    Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
}

/// Append a clockwise arc as cubic segments of at most 90 degrees.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn append_arc(pb: &mut PathBuilder, center: Point, radius: f64, start_deg: f64, end_deg: f64) {
    let sweep = (end_deg - start_deg).to_radians();
    let segments = (sweep.abs() / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f64;
    // Control point distance for a circular cubic spanning `step`.
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let at = |angle: f64| {
        (
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    };

    let mut a0 = start_deg.to_radians();
    let (x0, y0) = at(a0);
    pb.move_to(x0 as f32, y0 as f32);
    for _ in 0..segments {
        let a1 = a0 + step;
        let (sx, sy) = at(a0);
        let (ex, ey) = at(a1);
        let c1 = (sx - k * radius * a0.sin(), sy + k * radius * a0.cos());
        let c2 = (ex + k * radius * a1.sin(), ey - k * radius * a1.cos());
        pb.cubic_to(
            c1.0 as f32,
            c1.1 as f32,
            c2.0 as f32,
            c2.1 as f32,
            ex as f32,
            ey as f32,
        );
        a0 = a1;
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
