//! Interactive viewport state.
//!
//! [`ViewportController`] owns scale, offset, drag tracking and the surface
//! size. Fields are private: every change goes through one of the transition
//! methods, which report whether the host has to redraw.

use serde::{Deserialize, Serialize};

use crate::event::{SurfaceSize, ViewportEvent};
use crate::transform::{clamp_scale, Point, ViewTransform, DEFAULT_OFFSET};
use crate::DisplayOptions;

/// Wheel zoom factor when scrolling up.
pub const WHEEL_ZOOM_IN: f64 = 1.1;
/// Wheel zoom factor when scrolling down.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Zoom factor of the zoom in/out buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.2;

/// What a transition requires from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportChange {
    /// Nothing visible changed.
    None,
    /// Transform changed; redraw.
    Redraw,
    /// Surface size changed; resize the backing store, then redraw.
    Resize,
}

impl ViewportChange {
    /// Whether any redraw is needed.
    #[must_use]
    pub fn needs_redraw(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Pan/zoom state for one viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportController {
    transform: ViewTransform,
    initial_scale: f64,
    dragging: bool,
    drag_start: Point,
    surface: SurfaceSize,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(&DisplayOptions::default())
    }
}

impl ViewportController {
    /// Create a controller at the configured initial scale and default offset.
    #[must_use]
    pub fn new(options: &DisplayOptions) -> Self {
        let initial_scale = options.initial_scale();
        Self {
            transform: ViewTransform::new(initial_scale, DEFAULT_OFFSET),
            initial_scale,
            dragging: false,
            drag_start: Point::default(),
            surface: SurfaceSize::default(),
        }
    }

    /// Current plan-to-surface transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Current pixels per foot.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    /// Current pan offset in pixels.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.transform.offset
    }

    /// Scale restored by [`ViewportController::reset`].
    #[must_use]
    pub fn initial_scale(&self) -> f64 {
        self.initial_scale
    }

    /// Whether a pan drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current container size.
    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Change the scale restored by resets. Does not touch the current view.
    pub fn set_initial_scale(&mut self, scale: f64) {
        self.initial_scale = clamp_scale(scale);
    }

    /// Begin a pan at `pointer`.
    pub fn pointer_down(&mut self, pointer: Point) -> ViewportChange {
        self.drag_start = pointer - self.transform.offset;
        self.dragging = true;
        ViewportChange::None
    }

    /// Continue a pan. Ignored unless dragging.
    pub fn pointer_move(&mut self, pointer: Point) -> ViewportChange {
        if !self.dragging {
            return ViewportChange::None;
        }
        self.transform.offset = pointer - self.drag_start;
        ViewportChange::Redraw
    }

    /// End a pan. The offset is left where the last move put it.
    pub fn pointer_up(&mut self) -> ViewportChange {
        self.dragging = false;
        ViewportChange::None
    }

    /// Pointer left the surface; same as releasing it.
    pub fn pointer_leave(&mut self) -> ViewportChange {
        self.pointer_up()
    }

    /// Shift the offset by a pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> ViewportChange {
        self.transform.offset = self.transform.offset + Point::new(dx, dy);
        ViewportChange::Redraw
    }

    /// Wheel zoom. Scrolling down (`delta_y > 0`) zooms out.
    ///
    /// The host is expected to suppress the default page scroll.
    pub fn wheel(&mut self, delta_y: f64) -> ViewportChange {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.transform.zoom_by(factor);
        ViewportChange::Redraw
    }

    /// Button zoom in.
    pub fn zoom_in(&mut self) -> ViewportChange {
        self.transform.zoom_by(BUTTON_ZOOM_STEP);
        ViewportChange::Redraw
    }

    /// Button zoom out.
    pub fn zoom_out(&mut self) -> ViewportChange {
        self.transform.zoom_by(1.0 / BUTTON_ZOOM_STEP);
        ViewportChange::Redraw
    }

    /// Restore the initial scale and the default offset.
    pub fn reset(&mut self) -> ViewportChange {
        self.transform = ViewTransform::new(self.initial_scale, DEFAULT_OFFSET);
        ViewportChange::Redraw
    }

    /// Record a new container size.
    pub fn resize(&mut self, size: SurfaceSize) -> ViewportChange {
        self.surface = size;
        tracing::debug!(
            "Viewport resized to {}x{} @{}x",
            size.width,
            size.height,
            size.device_pixel_ratio
        );
        ViewportChange::Resize
    }

    /// Convert a surface pixel into plan coordinates.
    #[must_use]
    pub fn surface_to_plan(&self, pointer: Point) -> Point {
        self.transform.surface_to_plan(pointer)
    }

    /// Dispatch a host event to the matching transition.
    pub fn apply(&mut self, event: &ViewportEvent) -> ViewportChange {
        match event {
            ViewportEvent::PointerDown(p) => self.pointer_down(*p),
            ViewportEvent::PointerMove(p) => self.pointer_move(*p),
            ViewportEvent::PointerUp => self.pointer_up(),
            ViewportEvent::PointerLeave => self.pointer_leave(),
            ViewportEvent::Wheel { delta_y } => self.wheel(*delta_y),
            ViewportEvent::Resize(size) => self.resize(*size),
        }
    }
}
