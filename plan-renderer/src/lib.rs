//! # Saorsa Floor Plan Renderer
//!
//! Rasterizes a [`plan_core::FloorLayout`] onto a 2D surface and exposes the
//! interactive control surface a host drives.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            FloorPlanViewer                  │
//! │  events → ViewportController → redraw       │
//! ├─────────────────────────────────────────────┤
//! │            draw_floor_plan                  │
//! │  clear, grid, rooms, walls, doors, windows, │
//! │  labels, dimensions, corridors, stairs,     │
//! │  title                                      │
//! ├─────────────────────┬───────────────────────┤
//! │ PixmapSurface       │ RecordingSurface      │
//! │ (tiny-skia + resvg) │ (draw call log)       │
//! └─────────────────────┴───────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod fonts;
pub mod pipeline;
pub mod style;
pub mod surface;
pub mod viewer;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat};
pub use pipeline::{draw_floor_plan, FrameReport, Layer};
pub use surface::pixmap::PixmapSurface;
pub use surface::recording::{DrawCommand, RecordedDraw, RecordingSurface};
pub use surface::{DrawSurface, PixelRect, TransformScope};
pub use viewer::FloorPlanViewer;
