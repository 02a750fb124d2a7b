//! # Saorsa Floor Plan Core
//!
//! Core floor plan logic: the layout data model, the plan-to-pixel
//! transform and the interactive viewport controller. Nothing here draws;
//! see `plan-renderer` for the drawing pipeline.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 plan-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Layout Model    │  Viewport Controller     │
//! │  - Rooms/walls   │  - Pan (drag)            │
//! │  - Openings      │  - Wheel/button zoom     │
//! │  - Circulation   │  - Reset, resize         │
//! ├─────────────────────────────────────────────┤
//! │  Transform: feet × scale + offset = pixels  │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod event;
pub mod layout;
pub mod options;
pub mod state;
pub mod transform;
pub mod viewport;

pub use error::{PlanError, PlanResult};
pub use event::{SurfaceSize, ViewportEvent};
pub use layout::{
    BoundingBox, Circulation, FloorLayout, Opening, PlanDocument, PlanRect, RoomLayout, WallKind,
    WallLayout,
};
pub use options::DisplayOptions;
pub use state::{DisplayState, EMPTY_PLACEHOLDER};
pub use transform::{Point, ViewTransform};
pub use viewport::{ViewportChange, ViewportController};

/// Plan core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
