//! Engine tuning parsed from host-supplied JSON.
//!
//! Every field is optional; anything omitted falls back to the constant in
//! [`crate::consts`]. Unknown keys are rejected so that a typo in the host's
//! configuration fails loudly instead of silently using a default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::ZoomLimits;
use crate::color::HexColor;
use crate::consts::{
    ERASER_SIZE_DEFAULT, ERASER_SIZE_MAX, ERASER_SIZE_MIN, HIGHLIGHTER_ALPHA, PEN_COLORS, PEN_WIDTH_DEFAULT,
    PEN_WIDTH_MAX, PEN_WIDTH_MIN, THUMBNAIL_MIN_LINE_WIDTH, THUMBNAIL_REFERENCE_WIDTH, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::input::SizeRange;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid engine config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Multiplicative zoom change per wheel notch.
    pub zoom_step: f64,
    pub highlighter_alpha: f64,
    /// Main-view width that thumbnail line widths are scaled against.
    pub thumbnail_reference_width: f64,
    pub thumbnail_min_line_width: f64,
    pub pen_width_min: f64,
    pub pen_width_max: f64,
    pub pen_width_default: f64,
    pub eraser_size_min: f64,
    pub eraser_size_max: f64,
    pub eraser_size_default: f64,
    pub pen_color_default: HexColor,
    /// Preset swatches offered to the user.
    pub palette: Vec<HexColor>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            highlighter_alpha: HIGHLIGHTER_ALPHA,
            thumbnail_reference_width: THUMBNAIL_REFERENCE_WIDTH,
            thumbnail_min_line_width: THUMBNAIL_MIN_LINE_WIDTH,
            pen_width_min: PEN_WIDTH_MIN,
            pen_width_max: PEN_WIDTH_MAX,
            pen_width_default: PEN_WIDTH_DEFAULT,
            eraser_size_min: ERASER_SIZE_MIN,
            eraser_size_max: ERASER_SIZE_MAX,
            eraser_size_default: ERASER_SIZE_DEFAULT,
            pen_color_default: HexColor::default(),
            palette: default_palette(),
        }
    }
}

fn default_palette() -> Vec<HexColor> {
    PEN_COLORS.iter().flat_map(|c| HexColor::parse(c)).collect()
}

impl EngineConfig {
    /// Parse and validate a JSON object. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, unknown keys or bad
    /// colors, and [`ConfigError::Invalid`] when the values are inconsistent.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the ranges are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.zoom_min.is_finite() && self.zoom_min > 0.0) {
            return Err(invalid(format!("zoom_min must be positive, got {}", self.zoom_min)));
        }
        if !(self.zoom_max.is_finite() && self.zoom_max >= self.zoom_min) {
            return Err(invalid(format!("zoom_max {} is below zoom_min {}", self.zoom_max, self.zoom_min)));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(invalid(format!("zoom_step must be greater than 1, got {}", self.zoom_step)));
        }
        if !(0.0..=1.0).contains(&self.highlighter_alpha) {
            return Err(invalid(format!("highlighter_alpha must be in [0, 1], got {}", self.highlighter_alpha)));
        }
        if !(self.thumbnail_reference_width.is_finite() && self.thumbnail_reference_width > 0.0) {
            return Err(invalid(format!(
                "thumbnail_reference_width must be positive, got {}",
                self.thumbnail_reference_width
            )));
        }
        if !(self.thumbnail_min_line_width.is_finite() && self.thumbnail_min_line_width >= 0.0) {
            return Err(invalid(format!(
                "thumbnail_min_line_width must not be negative, got {}",
                self.thumbnail_min_line_width
            )));
        }
        check_range("pen_width", self.pen_width_min, self.pen_width_max, self.pen_width_default)?;
        check_range("eraser_size", self.eraser_size_min, self.eraser_size_max, self.eraser_size_default)?;
        Ok(())
    }

    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits { min: self.zoom_min, max: self.zoom_max, step: self.zoom_step }
    }

    #[must_use]
    pub fn pen_width_range(&self) -> SizeRange {
        SizeRange::new(self.pen_width_min, self.pen_width_max)
    }

    #[must_use]
    pub fn eraser_size_range(&self) -> SizeRange {
        SizeRange::new(self.eraser_size_min, self.eraser_size_max)
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}

fn check_range(name: &str, min: f64, max: f64, default: f64) -> Result<(), ConfigError> {
    if !(min.is_finite() && min > 0.0) {
        return Err(invalid(format!("{name}_min must be positive, got {min}")));
    }
    if !(max.is_finite() && max >= min) {
        return Err(invalid(format!("{name}_max {max} is below {name}_min {min}")));
    }
    if !(min..=max).contains(&default) {
        return Err(invalid(format!("{name}_default {default} is outside [{min}, {max}]")));
    }
    Ok(())
}
