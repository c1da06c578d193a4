//! Input model: tools, mouse buttons, pen/eraser style, and the gesture state machine.
//!
//! `Tool` and `UiState` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture tracked between pointer-down and
//! pointer-up/leave, carrying the context needed to continue it on the next
//! move event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::color::{ColorError, HexColor};
use crate::config::EngineConfig;
use crate::consts::{CURSOR_DRAW, CURSOR_GRAB};
use crate::doc::StrokeHandle;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// No drawing tool; dragging pans the view (default).
    #[default]
    #[serde(rename = "none")]
    Hand,
    /// Opaque freehand ink.
    Pen,
    /// Translucent freehand ink.
    Highlighter,
    /// Whole-stroke eraser.
    Eraser,
}

impl Tool {
    /// Whether a primary press with this tool starts a new stroke.
    #[must_use]
    pub fn draws(self) -> bool {
        matches!(self, Self::Pen | Self::Highlighter)
    }

    /// Cursor shown over the surface while no gesture is active.
    #[must_use]
    pub fn idle_cursor(self) -> &'static str {
        match self {
            Self::Hand => CURSOR_GRAB,
            Self::Pen | Self::Highlighter | Self::Eraser => CURSOR_DRAW,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click). Always pans.
    Middle,
    /// Right mouse button. Ignored.
    Secondary,
}

/// Inclusive `[min, max]` range for a user-adjustable size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `min <= max` with both bounds numeric.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min <= self.max
    }

    /// Clamp `value` into the range, or `None` if it is not a number or the
    /// range itself is inverted.
    #[must_use]
    pub fn clamp(self, value: f64) -> Option<f64> {
        if value.is_nan() || !self.is_valid() { None } else { Some(value.clamp(self.min, self.max)) }
    }
}

/// Persistent tool and style selection supplied by the host toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    pen_color: HexColor,
    pen_width: f64,
    eraser_size: f64,
    pen_range: SizeRange,
    eraser_range: SizeRange,
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl UiState {
    /// Start from the configured defaults with the hand tool selected.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let pen_range = config.pen_width_range();
        let eraser_range = config.eraser_size_range();
        Self {
            tool: Tool::default(),
            pen_color: config.pen_color_default.clone(),
            pen_width: pen_range.clamp(config.pen_width_default).unwrap_or(pen_range.min),
            eraser_size: eraser_range.clamp(config.eraser_size_default).unwrap_or(eraser_range.min),
            pen_range,
            eraser_range,
        }
    }

    #[must_use]
    pub fn pen_color(&self) -> &HexColor {
        &self.pen_color
    }

    #[must_use]
    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    #[must_use]
    pub fn eraser_size(&self) -> f64 {
        self.eraser_size
    }

    /// Select a new pen color. An invalid value leaves the previous color in place.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Invalid`] if `raw` is not a `#RGB` / `#RRGGBB` value.
    pub fn set_pen_color(&mut self, raw: &str) -> Result<&HexColor, ColorError> {
        self.pen_color = HexColor::parse(raw)?;
        Ok(&self.pen_color)
    }

    /// Set the pen width, clamped to the configured range. NaN is ignored.
    /// Returns the width now in effect.
    pub fn set_pen_width(&mut self, width: f64) -> f64 {
        if let Some(w) = self.pen_range.clamp(width) {
            self.pen_width = w;
        }
        self.pen_width
    }

    /// Set the eraser size, clamped to the configured range. NaN is ignored.
    /// Returns the size now in effect.
    pub fn set_eraser_size(&mut self, size: f64) -> f64 {
        if let Some(s) = self.eraser_range.clamp(size) {
            self.eraser_size = s;
        }
        self.eraser_size
    }
}

/// Internal state for the input state machine.
///
/// Only one gesture is tracked at a time; a second pointer-down while a
/// gesture is active is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is inking a new stroke.
    Drawing {
        /// Handle to the stroke appended at pointer-down.
        handle: StrokeHandle,
    },
    /// The user is dragging the eraser across the page.
    Erasing {
        /// Strokes removed so far in this gesture.
        removed: usize,
    },
    /// The user is dragging the view.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short gesture name for log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drawing { .. } => "draw",
            Self::Erasing { .. } => "erase",
            Self::Panning { .. } => "pan",
        }
    }
}
