//! Coordinate normalization between screen, surface and unit-square space.
//!
//! Persisted stroke geometry lives in `[0,1] x [0,1]`, relative to the
//! unscaled drawing surface. Converting a pointer position therefore takes
//! two steps: undo the viewport transform ([`Camera::screen_to_surface`]),
//! then divide by the surface's own pixel size. Because neither the zoom nor
//! the physical surface size survives into the stored point, the same stroke
//! can be replayed on a surface of any size.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use crate::camera::{Camera, Point};
use crate::doc::StrokePoint;

/// Error returned when a surface cannot be used as a normalization reference.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: f64, height: f64 },
}

/// Unscaled pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Return `self` if it is usable as a normalization reference.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidSurface`] for zero, negative or non-finite dimensions.
    pub fn validate(self) -> Result<Self, NormalizeError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(NormalizeError::InvalidSurface { width: self.width, height: self.height })
        }
    }
}

/// Convert a screen-space pointer position (relative to the viewport
/// container) to a normalized stroke point. Coordinates outside the surface
/// are clamped into `[0,1]`.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidSurface`] if `surface` has no area.
pub fn to_normalized(screen: Point, camera: &Camera, surface: SurfaceSize) -> Result<StrokePoint, NormalizeError> {
    let surface = surface.validate()?;
    let logical = camera.screen_to_surface(screen);
    Ok(StrokePoint::new(logical.x / surface.width, logical.y / surface.height).clamped())
}

/// Convert a normalized point to pixel coordinates on a surface of the given size.
#[must_use]
pub fn to_surface_pixels(point: StrokePoint, surface: SurfaceSize) -> Point {
    Point::new(point.x * surface.width, point.y * surface.height)
}

/// Convert a logical length (stroke width, eraser size) to normalized units
/// using the surface width as the reference.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidSurface`] if `surface` has no area.
pub fn length_to_normalized(length: f64, surface: SurfaceSize) -> Result<f64, NormalizeError> {
    let surface = surface.validate()?;
    Ok(length / surface.width)
}
