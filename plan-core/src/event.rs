//! Host input events for viewport interaction.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Size of the host container plus its device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSize {
    /// Container width in CSS pixels.
    pub width: f64,
    /// Container height in CSS pixels.
    pub height: f64,
    /// Physical pixels per CSS pixel.
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl SurfaceSize {
    /// Create a surface size.
    ///
    /// Negative or non-finite dimensions become zero and an invalid ratio
    /// becomes 1.
    #[must_use]
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: sanitize(width),
            height: sanitize(height),
            device_pixel_ratio: dpr,
        }
    }

    /// Backing store dimensions in physical pixels, at least 1x1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn physical_pixels(&self) -> (u32, u32) {
        let w = (self.width * self.device_pixel_ratio).round().max(1.0);
        let h = (self.height * self.device_pixel_ratio).round().max(1.0);
        (w as u32, h as u32)
    }
}

/// Input the host forwards to the viewport.
///
/// Pointer coordinates are in CSS pixels relative to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ViewportEvent {
    /// Pointer pressed; starts a pan.
    PointerDown(Point),
    /// Pointer moved; pans while dragging.
    PointerMove(Point),
    /// Pointer released.
    PointerUp,
    /// Pointer left the surface.
    PointerLeave,
    /// Wheel tick. Positive `deltaY` scrolls down (zoom out).
    #[serde(rename_all = "camelCase")]
    Wheel {
        /// Vertical scroll delta.
        delta_y: f64,
    },
    /// Host container changed size.
    Resize(SurfaceSize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_pixels_scale_with_ratio() {
        let size = SurfaceSize::new(400.0, 300.0, 2.0);
        assert_eq!(size.physical_pixels(), (800, 600));

        let empty = SurfaceSize::new(0.0, -5.0, f64::NAN);
        assert_eq!(empty.physical_pixels(), (1, 1));
        assert!((empty.device_pixel_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_event_json_shape() {
        let event = ViewportEvent::Wheel { delta_y: 120.0 };
        let json = serde_json::to_string(&event).expect("serialize");
        assert_eq!(json, r#"{"type":"Wheel","data":{"deltaY":120.0}}"#);
        let parsed: ViewportEvent =
            serde_json::from_str(r#"{"type":"Wheel","data":{"deltaY":-3}}"#).expect("parse");
        assert_eq!(parsed, ViewportEvent::Wheel { delta_y: -3.0 });

        let parsed: ViewportEvent =
            serde_json::from_str(r#"{"type":"PointerDown","data":{"x":5,"y":6}}"#)
                .expect("parse");
        assert_eq!(parsed, ViewportEvent::PointerDown(Point::new(5.0, 6.0)));

        let parsed: ViewportEvent = serde_json::from_str(
            r#"{"type":"Resize","data":{"width":640,"height":480,"devicePixelRatio":2}}"#,
        )
        .expect("parse");
        assert_eq!(
            parsed,
            ViewportEvent::Resize(SurfaceSize::new(640.0, 480.0, 2.0))
        );
    }
}
