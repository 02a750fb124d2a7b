//! Display flags chosen by the host.

use serde::{Deserialize, Serialize};

use crate::transform::{clamp_scale, DEFAULT_SCALE};

/// Which optional layers to draw, and the initial zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayOptions {
    /// Draw the 5 ft grid.
    pub show_grid: bool,
    /// Draw overall width/height dimension runs.
    pub show_dimensions: bool,
    /// Draw room names and areas.
    pub show_room_labels: bool,
    /// Initial pixels per foot, also restored by a view reset.
    pub scale: f64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_dimensions: true,
            show_room_labels: true,
            scale: DEFAULT_SCALE,
        }
    }
}

impl DisplayOptions {
    /// The configured initial scale, clamped into the allowed zoom range.
    #[must_use]
    pub fn initial_scale(&self) -> f64 {
        clamp_scale(self.scale)
    }

    /// Same options with every optional layer disabled.
    #[must_use]
    pub fn bare(self) -> Self {
        Self {
            show_grid: false,
            show_dimensions: false,
            show_room_labels: false,
            ..self
        }
    }
}
