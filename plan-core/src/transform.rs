//! Plan-to-surface coordinate transform.
//!
//! Plan coordinates (feet) map to surface pixels through a single isotropic
//! `scale` (pixels per foot) followed by a pixel `offset`. Every layer shares
//! the same transform, so rooms, walls, openings and annotations stay aligned.

use serde::{Deserialize, Serialize};

/// Smallest allowed zoom, in pixels per foot.
pub const MIN_SCALE: f64 = 2.0;
/// Largest allowed zoom, in pixels per foot.
pub const MAX_SCALE: f64 = 50.0;
/// Initial zoom when the host does not configure one.
pub const DEFAULT_SCALE: f64 = 10.0;
/// Pan offset restored by a view reset.
pub const DEFAULT_OFFSET: Point = Point { x: 50.0, y: 50.0 };

/// Clamp a scale into `[MIN_SCALE, MAX_SCALE]`.
///
/// Non-finite input collapses to the nearest bound (NaN to the minimum).
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Uniform scale plus translation from plan space to surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    scale: f64,
    /// Pan offset in pixels.
    pub offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE, DEFAULT_OFFSET)
    }
}

impl ViewTransform {
    /// Create a transform. The scale is clamped.
    #[must_use]
    pub fn new(scale: f64, offset: Point) -> Self {
        Self {
            scale: clamp_scale(scale),
            offset,
        }
    }

    /// Pixels per foot.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Replace the scale, clamping it.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Multiply the scale by `factor`, clamping the result.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Convert a length in feet to pixels (before the offset).
    #[must_use]
    pub fn to_pixels(&self, feet: f64) -> f64 {
        feet * self.scale
    }

    /// Convert a plan point to surface pixels.
    #[must_use]
    pub fn plan_to_surface(&self, plan: Point) -> Point {
        Point::new(
            plan.x * self.scale + self.offset.x,
            plan.y * self.scale + self.offset.y,
        )
    }

    /// Convert a surface pixel back to plan coordinates.
    #[must_use]
    pub fn surface_to_plan(&self, surface: Point) -> Point {
        Point::new(
            (surface.x - self.offset.x) / self.scale,
            (surface.y - self.offset.y) / self.scale,
        )
    }
}
