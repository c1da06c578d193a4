//! Eraser hit-testing.
//!
//! Erasing is geometric removal: a stroke is deleted in its entirety when any
//! of its points lies within the eraser radius plus the stroke's own half
//! width. Both lengths are normalized against the width of the surface the
//! user is interacting with, so the effective erase area tracks what is on
//! screen.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Stroke, StrokePoint, StrokeStore};
use crate::normalize::{NormalizeError, SurfaceSize, length_to_normalized};

/// A single eraser probe in normalized space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eraser {
    /// Probe center.
    pub center: StrokePoint,
    /// Probe radius in normalized units.
    pub radius: f64,
    /// One logical unit in normalized space, relative to the surface width.
    unit: f64,
}

impl Eraser {
    /// Build a probe from a normalized center and an already-normalized radius.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidSurface`] if `surface` has no area.
    pub fn new(center: StrokePoint, radius: f64, surface: SurfaceSize) -> Result<Self, NormalizeError> {
        let unit = length_to_normalized(1.0, surface)?;
        Ok(Self { center, radius: radius.max(0.0), unit })
    }

    /// Build a probe from a logical eraser size (its diameter, in the same
    /// units as `Stroke::stroke_width`).
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidSurface`] if `surface` has no area.
    pub fn from_size(center: StrokePoint, size: f64, surface: SurfaceSize) -> Result<Self, NormalizeError> {
        Self::new(center, length_to_normalized(size / 2.0, surface)?, surface)
    }

    /// Half of `stroke`'s line width in normalized units.
    #[must_use]
    pub fn half_width(&self, stroke: &Stroke) -> f64 {
        stroke.stroke_width.max(0.0) / 2.0 * self.unit
    }

    /// Whether this probe touches any point of `stroke`. Empty strokes are never hit.
    #[must_use]
    pub fn hits(&self, stroke: &Stroke) -> bool {
        let reach = self.radius + self.half_width(stroke);
        stroke.points.iter().any(|p| p.clamped().distance(self.center) <= reach)
    }

    /// Return the strokes this probe leaves untouched, in their original order.
    #[must_use]
    pub fn apply(&self, strokes: &[Stroke]) -> Vec<Stroke> {
        strokes.iter().filter(|s| !self.hits(s)).cloned().collect()
    }

    /// Remove every stroke this probe touches from `store`. Returns the number removed.
    pub fn erase(&self, store: &mut StrokeStore) -> usize {
        store.retain(|s| !self.hits(s))
    }
}

/// Filter `strokes` through an eraser at `center` with a normalized `radius`.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidSurface`] if `surface` has no area.
pub fn apply(
    strokes: &[Stroke],
    center: StrokePoint,
    radius: f64,
    surface: SurfaceSize,
) -> Result<Vec<Stroke>, NormalizeError> {
    Ok(Eraser::new(center, radius, surface)?.apply(strokes))
}
