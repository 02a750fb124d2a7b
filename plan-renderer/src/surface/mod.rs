//! Drawing surfaces.
//!
//! [`DrawSurface`] is the small immediate-mode context the pipeline paints
//! through, modeled on a 2D canvas: a transform stack plus rect, line, arc
//! and text primitives. Coordinates are in the surface's current transform.

pub mod pixmap;
pub mod recording;

use std::ops::{Deref, DerefMut};

use plan_core::{Point, SurfaceSize};

use crate::style::{Color, StrokeStyle, TextStyle};

/// A rectangle in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width; may be negative before [`PixelRect::normalized`].
    pub width: f64,
    /// Height; may be negative before [`PixelRect::normalized`].
    pub height: f64,
}

impl PixelRect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same rectangle with non-negative width and height.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Trait for drawing surfaces.
pub trait DrawSurface {
    /// Visible size in CSS pixels.
    fn size(&self) -> SurfaceSize;

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the last pushed transform. Unbalanced pops are ignored.
    fn restore(&mut self);

    /// Translate the current transform.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotate the current transform clockwise by `degrees`.
    fn rotate(&mut self, degrees: f64);

    /// Fill the entire backing store, ignoring the current transform.
    fn clear(&mut self, color: Color);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: PixelRect, stroke: &StrokeStyle);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle);

    /// Stroke a circular arc from `start_deg` to `end_deg`, clockwise.
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        stroke: &StrokeStyle,
    );

    /// Draw a single line of text anchored at `at`.
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

/// A saved transform that is restored when dropped.
///
/// Derefs to the underlying surface, so drawing through the scope uses the
/// scope's transform and nothing leaks once it goes out of scope, early
/// returns included.
pub struct TransformScope<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> TransformScope<'a, S> {
    /// Save the surface transform and open a scope.
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for TransformScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for TransformScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for TransformScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

impl<S: DrawSurface + ?Sized> std::fmt::Debug for TransformScope<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformScope").finish_non_exhaustive()
    }
}
