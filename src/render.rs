//! Rendering: replays a stroke sequence onto a 2D drawing surface.
//!
//! Rendering is a pure function of the stroke sequence, the surface size and
//! a [`RenderStyle`]. It never reads the camera: in the main view the zoom is
//! applied to the container element, so line widths are drawn as stored.
//! Thumbnails use the same replay with widths scaled to the thumbnail size.
//!
//! Drawing goes through the [`Surface`] trait. The browser implementation is
//! [`web_sys::CanvasRenderingContext2d`]; [`Recorder`] captures the command
//! stream natively so output can be compared without a browser.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::convert::Infallible;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::EngineConfig;
use crate::doc::Stroke;
use crate::normalize::{SurfaceSize, to_surface_pixels};

/// The subset of the `Canvas2D` API the renderer needs.
pub trait Surface {
    type Error;

    /// Replace the current transform with a uniform scale (device pixel ratio).
    fn set_scale(&mut self, scale: f64) -> Result<(), Self::Error>;
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    /// Round line caps and joins.
    fn set_round_lines(&mut self);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn set_scale(&mut self, scale: f64) -> Result<(), JsValue> {
        self.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
    }

    fn set_round_lines(&mut self) {
        self.set_line_cap("round");
        self.set_line_join("round");
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetScale(f64),
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    StrokeColor(String),
    LineWidth(f64),
    GlobalAlpha(f64),
    RoundLines,
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
}

/// A surface that records every call instead of drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `stroke()` calls, i.e. paths actually painted.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Stroke)).count()
    }
}

impl Surface for Recorder {
    type Error = Infallible;

    fn set_scale(&mut self, scale: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::SetScale(scale));
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeColor(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_round_lines(&mut self) {
        self.commands.push(DrawCommand::RoundLines);
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}

/// Paint parameters that do not come from the strokes themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Global alpha applied to highlighter strokes.
    pub highlighter_alpha: f64,
    /// Multiplier applied to every stored stroke width.
    pub width_scale: f64,
    /// Floor for the scaled line width.
    pub min_line_width: f64,
}

impl RenderStyle {
    /// Main view: widths as stored.
    #[must_use]
    pub fn main(config: &EngineConfig) -> Self {
        Self { highlighter_alpha: config.highlighter_alpha, width_scale: 1.0, min_line_width: 0.0 }
    }

    /// Thumbnail: widths scaled by `thumbnail_width / reference width`, never below the minimum.
    #[must_use]
    pub fn thumbnail(config: &EngineConfig, thumbnail_width: f64) -> Self {
        Self {
            highlighter_alpha: config.highlighter_alpha,
            width_scale: thumbnail_width / config.thumbnail_reference_width,
            min_line_width: config.thumbnail_min_line_width,
        }
    }

    /// Pixel line width for a stroke.
    #[must_use]
    pub fn line_width(&self, stroke: &Stroke) -> f64 {
        (stroke.stroke_width * self.width_scale).max(self.min_line_width)
    }

    /// Global alpha for a stroke.
    #[must_use]
    pub fn alpha(&self, stroke: &Stroke) -> f64 {
        if stroke.is_highlighter { self.highlighter_alpha } else { 1.0 }
    }
}

/// Clear `surface` and draw every stroke in stacking order.
///
/// Points are clamped into `[0,1]` before denormalizing and strokes with no
/// points are skipped, so malformed stored data degrades instead of failing.
/// A single-point stroke produces a path with no segments.
pub fn render<S: Surface + ?Sized>(surface: &mut S, strokes: &[Stroke], size: SurfaceSize, style: &RenderStyle) {
    surface.clear_rect(0.0, 0.0, size.width, size.height);
    for stroke in strokes.iter().filter(|s| !s.is_empty()) {
        draw_stroke(surface, stroke, size, style);
    }
    surface.set_global_alpha(1.0);
}

/// Render a page preview at `size` using thumbnail line scaling.
pub fn render_thumbnail<S: Surface + ?Sized>(
    surface: &mut S,
    strokes: &[Stroke],
    size: SurfaceSize,
    config: &EngineConfig,
) {
    render(surface, strokes, size, &RenderStyle::thumbnail(config, size.width));
}

/// Render onto a backing store scaled by `dpr`, drawing in CSS pixels.
///
/// # Errors
///
/// Returns the surface's error if the transform cannot be set.
pub fn render_scaled<S: Surface + ?Sized>(
    surface: &mut S,
    strokes: &[Stroke],
    size: SurfaceSize,
    dpr: f64,
    style: &RenderStyle,
) -> Result<(), S::Error> {
    surface.set_scale(dpr)?;
    render(surface, strokes, size, style);
    Ok(())
}

fn draw_stroke<S: Surface + ?Sized>(surface: &mut S, stroke: &Stroke, size: SurfaceSize, style: &RenderStyle) {
    surface.set_stroke_color(stroke.color.as_str());
    surface.set_line_width(style.line_width(stroke));
    surface.set_global_alpha(style.alpha(stroke));
    surface.set_round_lines();

    surface.begin_path();
    let mut points = stroke.points.iter().map(|p| to_surface_pixels(p.clamped(), size));
    if let Some(first) = points.next() {
        surface.move_to(first.x, first.y);
    }
    for p in points {
        surface.line_to(p.x, p.y);
    }
    surface.stroke();
}

// =============================================================
// Image layer placement
// =============================================================

/// How an image is fitted into a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFit {
    /// Whole image visible, letterboxed (main view).
    Contain,
    /// Surface fully covered, image cropped (thumbnails).
    Cover,
}

/// Placement rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageFit {
    /// Centered rectangle for an image of natural size `image_w` x `image_h`.
    /// Returns `None` when either size has no area.
    #[must_use]
    pub fn place(self, image_w: f64, image_h: f64, surface: SurfaceSize) -> Option<Rect> {
        let image = SurfaceSize::new(image_w, image_h);
        if !image.is_valid() || !surface.is_valid() {
            return None;
        }
        let sx = surface.width / image.width;
        let sy = surface.height / image.height;
        let scale = match self {
            Self::Contain => sx.min(sy),
            Self::Cover => sx.max(sy),
        };
        let width = image.width * scale;
        let height = image.height * scale;
        Some(Rect { x: (surface.width - width) / 2.0, y: (surface.height - height) / 2.0, width, height })
    }
}
