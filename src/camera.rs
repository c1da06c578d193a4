//! Viewport transform: zoom and pan applied to the page container.
//!
//! The camera never touches stroke data. It only describes how the unscaled
//! drawing surface is placed inside the viewport container, equivalent to a
//! CSS `translate(pan) scale(zoom)` with a top-left transform origin.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// A point in screen space (relative to the viewport container) or in
/// surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, zooms out).
    pub dy: f64,
}

/// Direction of a single zoom notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Map a wheel delta to a zoom direction. Scrolling up (`dy < 0`) zooms in.
    /// Returns `None` for a purely horizontal or zero delta.
    #[must_use]
    pub fn from_wheel(delta: WheelDelta) -> Option<Self> {
        if delta.dy < 0.0 {
            Some(Self::In)
        } else if delta.dy > 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

/// Camera state for pan/zoom of the active page.
///
/// `pan_x` / `pan_y` are raw screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point to unscaled surface pixels.
    ///
    /// Inverts the container transform in reverse order: remove the pan,
    /// then divide out the zoom.
    #[must_use]
    pub fn screen_to_surface(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert unscaled surface pixels to a screen-space point.
    #[must_use]
    pub fn surface_to_screen(&self, surface: Point) -> Point {
        Point {
            x: surface.x * self.zoom + self.pan_x,
            y: surface.y * self.zoom + self.pan_y,
        }
    }

    /// Move the view by a raw screen-space delta. Offsets are not clamped.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom one notch in `direction`, keeping the point under `anchor` fixed.
    /// `zoom_step` multiplies (in) or divides (out) the current zoom and the
    /// result is clamped to `[zoom_min, zoom_max]`.
    ///
    /// Returns `true` if the camera changed.
    pub fn zoom_at(&mut self, anchor: Point, direction: ZoomDirection, limits: ZoomLimits) -> bool {
        let next = match direction {
            ZoomDirection::In => self.zoom * limits.step,
            ZoomDirection::Out => self.zoom / limits.step,
        };
        self.zoom_to(anchor, next, limits)
    }

    /// Set the zoom to `next` (clamped), keeping the point under `anchor` fixed.
    ///
    /// Returns `true` if the camera changed. Unusable limits or a NaN target
    /// leave the camera untouched.
    pub fn zoom_to(&mut self, anchor: Point, next: f64, limits: ZoomLimits) -> bool {
        if next.is_nan() || !limits.is_valid() {
            return false;
        }
        let new_zoom = next.clamp(limits.min, limits.max);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        let ratio = new_zoom / self.zoom;
        self.pan_x = anchor.x - (anchor.x - self.pan_x) * ratio;
        self.pan_y = anchor.y - (anchor.y - self.pan_y) * ratio;
        self.zoom = new_zoom;
        true
    }

    /// CSS `transform` value for the page container (origin `0 0`).
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.pan_x, self.pan_y, self.zoom)
    }

    /// Restore zoom 1 and zero pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Zoom clamp range and per-notch factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ZoomLimits {
    /// Whether the range is positive and ordered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min > 0.0 && self.min <= self.max
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: ZOOM_MIN, max: ZOOM_MAX, step: ZOOM_STEP }
    }
}
