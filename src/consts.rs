//! Shared numeric constants for the annotation engine.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.2;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 5.0;

/// Multiplicative zoom change per wheel notch.
pub const ZOOM_STEP: f64 = 1.1;

// ── Rendering ───────────────────────────────────────────────────

/// Global alpha for highlighter strokes.
pub const HIGHLIGHTER_ALPHA: f64 = 0.3;

/// Main-view surface width that stroke widths are authored against, used to
/// scale line thickness on thumbnails.
pub const THUMBNAIL_REFERENCE_WIDTH: f64 = 800.0;

/// Thinnest line a thumbnail will draw, in pixels.
pub const THUMBNAIL_MIN_LINE_WIDTH: f64 = 0.5;

// ── Pen / eraser ────────────────────────────────────────────────

pub const PEN_WIDTH_MIN: f64 = 1.0;
pub const PEN_WIDTH_MAX: f64 = 50.0;
pub const PEN_WIDTH_DEFAULT: f64 = 5.0;

pub const ERASER_SIZE_MIN: f64 = 5.0;
pub const ERASER_SIZE_MAX: f64 = 100.0;
pub const ERASER_SIZE_DEFAULT: f64 = 20.0;

/// Pen color selected on startup.
pub const PEN_COLOR_DEFAULT: &str = "#EF4444";

/// Preset swatches offered by the pen settings.
pub const PEN_COLORS: [&str; 6] = ["#000000", "#EF4444", "#3B82F6", "#22C55E", "#A855F7", "#EAB308"];

// ── Cursors ─────────────────────────────────────────────────────

pub const CURSOR_DRAW: &str = "crosshair";
pub const CURSOR_GRAB: &str = "grab";
pub const CURSOR_GRABBING: &str = "grabbing";
