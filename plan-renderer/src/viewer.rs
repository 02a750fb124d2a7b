//! Interactive floor plan viewer.
//!
//! [`FloorPlanViewer`] is the control surface a host drives: it owns the
//! viewport controller, the display options, the bound layout and the
//! mounted backing surface. Every call that changes what is visible redraws
//! the whole plan before returning.

use std::sync::Arc;

use plan_core::{
    DisplayOptions, DisplayState, FloorLayout, Point, RoomLayout, SurfaceSize, ViewportChange,
    ViewportController, ViewportEvent,
};
use usvg::fontdb::Database;

use crate::error::RenderResult;
use crate::export::{self, ExportConfig, ExportFormat};
use crate::fonts;
use crate::pipeline::{draw_floor_plan, FrameReport};
use crate::surface::pixmap::PixmapSurface;

/// Floor plan viewer bound to at most one layout.
#[derive(Debug)]
pub struct FloorPlanViewer {
    viewport: ViewportController,
    options: DisplayOptions,
    layout: Option<Arc<FloorLayout>>,
    surface: Option<PixmapSurface>,
    fonts: Arc<Database>,
    frame_count: u64,
    last_report: Option<FrameReport>,
}

impl Default for FloorPlanViewer {
    fn default() -> Self {
        Self::new(DisplayOptions::default())
    }
}

impl FloorPlanViewer {
    /// Create an empty viewer using the system fonts.
    #[must_use]
    pub fn new(options: DisplayOptions) -> Self {
        Self::with_fonts(options, fonts::system_fonts())
    }

    /// Create an empty viewer with an explicit font database.
    #[must_use]
    pub fn with_fonts(options: DisplayOptions, fonts: Arc<Database>) -> Self {
        Self {
            viewport: ViewportController::new(&options),
            options,
            layout: None,
            surface: None,
            fonts,
            frame_count: 0,
            last_report: None,
        }
    }

    /// Bind a layout, or clear it with `None`.
    ///
    /// Binding mounts a backing surface if none exists and draws a frame.
    /// Clearing unmounts the surface, so exports return `None` afterwards.
    /// The view transform is kept either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing surface cannot be allocated.
    pub fn set_layout(&mut self, layout: Option<Arc<FloorLayout>>) -> RenderResult<()> {
        match layout {
            Some(layout) => {
                tracing::info!(
                    rooms = layout.rooms.len(),
                    walls = layout.walls.len(),
                    "Binding floor '{}'",
                    layout.level
                );
                self.layout = Some(layout);
                if self.surface.is_none() {
                    self.surface = Some(PixmapSurface::new(
                        self.viewport.surface(),
                        Arc::clone(&self.fonts),
                    )?);
                }
                self.redraw();
            }
            None => {
                if self.layout.take().is_some() {
                    tracing::info!("Layout cleared");
                }
                self.surface = None;
                self.last_report = None;
            }
        }
        Ok(())
    }

    /// Replace the display options and redraw.
    ///
    /// The new scale becomes the one restored by [`reset_view`]; the current
    /// view is left alone.
    ///
    /// [`reset_view`]: Self::reset_view
    pub fn set_options(&mut self, options: DisplayOptions) {
        self.viewport.set_initial_scale(options.scale);
        self.options = options;
        self.redraw();
    }

    /// Apply a host event, resizing the backing store and redrawing as
    /// needed.
    ///
    /// A resize reaches the controller only after the backing store accepts
    /// it, so a failed resize leaves the viewer exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if a resize cannot reallocate the backing store or
    /// exceeds [`MAX_SURFACE_PIXELS`].
    ///
    /// [`MAX_SURFACE_PIXELS`]: crate::surface::pixmap::MAX_SURFACE_PIXELS
    pub fn handle_event(&mut self, event: &ViewportEvent) -> RenderResult<ViewportChange> {
        if let ViewportEvent::Resize(size) = event {
            match self.surface.as_mut() {
                Some(surface) => surface.resize(*size)?,
                None => {
                    PixmapSurface::check_size(*size)?;
                }
            }
        }
        let change = self.viewport.apply(event);
        if change.needs_redraw() {
            self.redraw();
        }
        Ok(change)
    }

    /// Zoom in one button step.
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.redraw();
    }

    /// Zoom out one button step.
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.redraw();
    }

    /// Restore the initial scale and offset.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.redraw();
    }

    /// Shift the view by a pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        self.redraw();
    }

    /// Resize the container. The backing store becomes
    /// `width × dpr` by `height × dpr` physical pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reallocated.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> RenderResult<()> {
        let size = SurfaceSize::new(width, height, device_pixel_ratio);
        self.handle_event(&ViewportEvent::Resize(size)).map(|_| ())
    }

    /// Draw one frame if a layout is bound and a surface is mounted.
    ///
    /// Returns the report for the frame, or `None` when nothing was drawn.
    pub fn redraw(&mut self) -> Option<&FrameReport> {
        let (Some(layout), Some(surface)) = (self.layout.as_deref(), self.surface.as_mut()) else {
            return None;
        };
        let report = draw_floor_plan(surface, layout, self.viewport.transform(), &self.options);
        self.frame_count += 1;
        tracing::trace!(frame = self.frame_count, "Frame drawn");
        self.last_report = Some(report);
        self.last_report.as_ref()
    }

    /// Snapshot the surface as a `data:` URI.
    ///
    /// Returns `None` iff no surface is mounted. Unsupported mime types are
    /// exported as PNG; `quality` applies to JPEG only.
    #[must_use]
    pub fn export_image(&self, mime_type: &str, quality: Option<f32>) -> Option<String> {
        let format = ExportFormat::from_mime_type(mime_type);
        let config = quality.map_or_else(ExportConfig::default, |q| {
            ExportConfig::default().with_quality(q)
        });
        match self.export_bytes(format, &config)? {
            Ok(bytes) => Some(export::to_data_uri(&bytes, format)),
            Err(e) => {
                tracing::error!("Snapshot export failed: {e}");
                None
            }
        }
    }

    /// Snapshot the surface as encoded bytes. `None` iff no surface is
    /// mounted.
    #[must_use]
    pub fn export_bytes(
        &self,
        format: ExportFormat,
        config: &ExportConfig,
    ) -> Option<RenderResult<Vec<u8>>> {
        let surface = self.surface.as_ref()?;
        Some(export::encode(surface.pixmap(), format, config))
    }

    /// `Empty` until a layout is bound.
    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        DisplayState::for_layout(self.layout.as_deref())
    }

    /// Message for the host to show instead of the canvas, if any.
    #[must_use]
    pub fn placeholder_message(&self) -> Option<&'static str> {
        self.display_state().placeholder_message()
    }

    /// Topmost room under a surface pixel.
    #[must_use]
    pub fn room_at(&self, pointer: Point) -> Option<&RoomLayout> {
        let plan = self.viewport.surface_to_plan(pointer);
        self.layout.as_deref()?.room_at(plan.x, plan.y)
    }

    /// Frames drawn since creation.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Report for the most recent frame.
    #[must_use]
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }

    /// Mounted backing surface.
    #[must_use]
    pub fn surface(&self) -> Option<&PixmapSurface> {
        self.surface.as_ref()
    }

    /// Viewport controller.
    #[must_use]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Current display options.
    #[must_use]
    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Bound layout.
    #[must_use]
    pub fn layout(&self) -> Option<&Arc<FloorLayout>> {
        self.layout.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{PlanRect, EMPTY_PLACEHOLDER};

    fn viewer() -> FloorPlanViewer {
        FloorPlanViewer::with_fonts(DisplayOptions::default(), Arc::new(Database::new()))
    }

    fn layout() -> Arc<FloorLayout> {
        Arc::new(FloorLayout::new("Ground Floor", 40.0, 30.0).with_room(RoomLayout::new(
            "Bedroom",
            "bedroom",
            PlanRect::new(0.0, 0.0, 12.0, 10.0),
        )))
    }

    #[test]
    fn test_empty_viewer() {
        let v = viewer();
        assert_eq!(v.display_state(), DisplayState::Empty);
        assert_eq!(v.placeholder_message(), Some(EMPTY_PLACEHOLDER));
        assert!(v.export_image("image/png", None).is_none());
    }

    #[test]
    fn test_controls_before_layout_do_not_draw() {
        let mut v = viewer();
        v.zoom_in();
        v.reset_view();
        assert_eq!(v.frame_count(), 0);
        assert!(v.surface().is_none());
    }

    #[test]
    fn test_bind_and_clear_layout() {
        let mut v = viewer();
        v.set_layout(Some(layout())).expect("mount");
        assert_eq!(v.display_state(), DisplayState::Rendered);
        assert_eq!(v.frame_count(), 1);
        assert!(v
            .export_image("image/png", None)
            .is_some_and(|uri| uri.starts_with("data:image/png;base64,")));

        v.set_layout(None).expect("unmount");
        assert_eq!(v.display_state(), DisplayState::Empty);
        assert!(v.export_image("image/png", None).is_none());
    }

    #[test]
    fn test_every_control_redraws() {
        let mut v = viewer();
        v.set_layout(Some(layout())).expect("mount");
        v.zoom_in();
        v.zoom_out();
        v.reset_view();
        v.pan_by(5.0, 5.0);
        v.handle_event(&ViewportEvent::Wheel { delta_y: 1.0 })
            .expect("wheel");
        assert_eq!(v.frame_count(), 6);
    }

    #[test]
    fn test_pointer_down_alone_does_not_redraw() {
        let mut v = viewer();
        v.set_layout(Some(layout())).expect("mount");
        let change = v
            .handle_event(&ViewportEvent::PointerDown(Point::new(10.0, 10.0)))
            .expect("down");
        assert_eq!(change, ViewportChange::None);
        assert_eq!(v.frame_count(), 1);
    }

    #[test]
    fn test_room_at_uses_view_transform() {
        let mut v = viewer();
        v.set_layout(Some(layout())).expect("mount");
        assert_eq!(
            v.room_at(Point::new(60.0, 60.0)).map(|r| r.name.as_str()),
            Some("Bedroom")
        );
        assert!(v.room_at(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_failed_resize_keeps_previous_size() {
        let mut v = viewer();
        v.resize(400.0, 300.0, 1.0).expect("resize");
        v.set_layout(Some(layout())).expect("mount");
        let before = v.viewport().surface();

        assert!(v.resize(6.0e8, 1.0, 1.0).is_err());
        assert_eq!(v.viewport().surface(), before);
        assert_eq!(v.surface().map(PixmapSurface::physical_size), Some((400, 300)));

        v.set_layout(None).expect("unmount");
        v.set_layout(Some(layout())).expect("remount");
        assert_eq!(v.surface().map(PixmapSurface::physical_size), Some((400, 300)));
    }

    #[test]
    fn test_oversized_resize_before_layout_is_rejected() {
        let mut v = viewer();
        assert!(v.resize(1.0e6, 1.0e6, 1.0).is_err());
        assert_eq!(v.viewport().surface(), SurfaceSize::default());
        v.set_layout(Some(layout())).expect("mount");
        assert_eq!(v.surface().map(PixmapSurface::physical_size), Some((800, 600)));
    }

    #[test]
    fn test_set_options_keeps_current_scale() {
        let mut v = viewer();
        v.set_layout(Some(layout())).expect("mount");
        v.set_options(DisplayOptions {
            scale: 20.0,
            ..DisplayOptions::default()
        });
        assert!((v.viewport().scale() - 10.0).abs() < f64::EPSILON);
        v.reset_view();
        assert!((v.viewport().scale() - 20.0).abs() < f64::EPSILON);
    }
}
