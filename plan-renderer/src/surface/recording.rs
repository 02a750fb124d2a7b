//! Headless surface that records draw calls instead of rasterizing.
//!
//! Useful for hosts that forward drawing to another backend and for
//! asserting layer order and per-element visits without comparing pixels.

use plan_core::{Point, SurfaceSize};
use tiny_skia::Transform;

use super::{DrawSurface, PixelRect};
use crate::style::{Color, StrokeStyle, TextStyle};

/// A primitive draw call, in the coordinates it was issued with.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Whole-surface clear.
    Clear(Color),
    /// Filled rectangle.
    FillRect {
        /// Rectangle.
        rect: PixelRect,
        /// Fill color.
        color: Color,
    },
    /// Rectangle outline.
    StrokeRect {
        /// Rectangle.
        rect: PixelRect,
        /// Stroke.
        stroke: StrokeStyle,
    },
    /// Straight segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke.
        stroke: StrokeStyle,
    },
    /// Circular arc.
    Arc {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Start angle in degrees.
        start_deg: f64,
        /// End angle in degrees.
        end_deg: f64,
        /// Stroke.
        stroke: StrokeStyle,
    },
    /// Text run.
    Text {
        /// Content.
        text: String,
        /// Anchor.
        at: Point,
        /// Style.
        style: TextStyle,
    },
}

/// A recorded draw call plus the transform in effect when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// The call.
    pub command: DrawCommand,
    /// Local-to-surface transform at the time of the call.
    pub transform: Transform,
}

impl RecordedDraw {
    /// Map a point from the call's local space to surface pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_surface(&self, p: Point) -> Point {
        let mut pt = tiny_skia::Point::from_xy(p.x as f32, p.y as f32);
        self.transform.map_point(&mut pt);
        Point::new(f64::from(pt.x), f64::from(pt.y))
    }
}

/// Surface that keeps every draw call in order.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    current: Transform,
    stack: Vec<Transform>,
    max_depth: usize,
    draws: Vec<RecordedDraw>,
}

impl RecordingSurface {
    /// Create an empty recording with an identity transform.
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            current: Transform::identity(),
            stack: Vec::new(),
            max_depth: 0,
            draws: Vec::new(),
        }
    }

    /// All recorded draw calls, in issue order.
    #[must_use]
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Recorded draw commands without their transforms.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.draws.iter().map(|d| &d.command)
    }

    /// Text runs in issue order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Current number of unrestored saves.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Deepest save nesting seen so far.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Transform currently in effect.
    #[must_use]
    pub fn current_transform(&self) -> Transform {
        self.current
    }

    /// Forget recorded calls, keeping size and transform state.
    pub fn clear_recording(&mut self) {
        self.draws.clear();
    }

    fn record(&mut self, command: DrawCommand) {
        self.draws.push(RecordedDraw {
            command,
            transform: self.current,
        });
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.current);
        self.max_depth = self.max_depth.max(self.stack.len());
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
        self.record(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.record(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: PixelRect, stroke: &StrokeStyle) {
        self.record(DrawCommand::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        self.record(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        stroke: &StrokeStyle,
    ) {
        self.record(DrawCommand::Arc {
            center,
            radius,
            start_deg,
            end_deg,
            stroke: *stroke,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.record(DrawCommand::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }
}
