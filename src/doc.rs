//! Document model: stroke points, strokes, pages, and the per-page stroke store.
//!
//! `Stroke` and `Page` are the persisted shapes handed to the host; they
//! serialize as plain camelCase JSON (`strokeWidth`, `isHighlighter`,
//! `imageSource`). `StrokeStore` is the runtime owner of the active page's
//! stroke sequence: strokes are appended at gesture start, grown only through
//! the [`StrokeHandle`] returned for that gesture, and filtered by the eraser.
//!
//! Sequence order is stacking order: earlier strokes render beneath later ones.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::consts::PEN_WIDTH_DEFAULT;

/// A stroke vertex in normalized `[0,1]` surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
}

impl StrokePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into `[0,1]`. Non-finite values collapse to `0`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { x: clamp_unit(self.x), y: clamp_unit(self.y) }
    }

    /// Euclidean distance in normalized space.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// One continuous ink path from pointer-down to pointer-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    /// CSS hex color.
    pub color: HexColor,
    /// Line width in logical units, independent of the zoom active at draw time.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Highlighter strokes render translucent.
    #[serde(default)]
    pub is_highlighter: bool,
    /// Vertices in drawing order.
    #[serde(default)]
    pub points: Vec<StrokePoint>,
}

fn default_stroke_width() -> f64 {
    PEN_WIDTH_DEFAULT
}

impl Stroke {
    /// Start a stroke at `first`.
    #[must_use]
    pub fn new(color: HexColor, stroke_width: f64, is_highlighter: bool, first: StrokePoint) -> Self {
        Self { color, stroke_width, is_highlighter, points: vec![first] }
    }

    /// Strokes with no points are skipped by the renderer and the eraser.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// What the page shows beneath the ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Plain white canvas.
    #[default]
    Blank,
    /// Imported image drawn by the host beneath the stroke overlay.
    Image,
}

/// A page as supplied by the host page collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Host-assigned identifier.
    pub id: String,
    /// Background kind.
    #[serde(default)]
    pub kind: PageKind,
    /// Content reference for image pages (URL or data URL). The engine never fetches it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_source: Option<String>,
    /// Annotations in stacking order.
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

impl Page {
    /// A blank page with no strokes.
    #[must_use]
    pub fn blank(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    /// An image page with no strokes.
    #[must_use]
    pub fn image(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self { id: id.into(), kind: PageKind::Image, image_source: Some(source.into()), strokes: Vec::new() }
    }

    /// Whether the host should draw an image layer beneath the strokes.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.kind == PageKind::Image && self.image_source.is_some()
    }
}

/// Handle to the stroke being drawn by the current gesture.
///
/// Only the input state machine holds one; dropping it commits the stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeHandle(usize);

impl StrokeHandle {
    /// Position of the stroke in the store.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered stroke sequence of the active page.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
}

impl StrokeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { strokes: Vec::new() }
    }

    /// Replace all strokes with a page's saved sequence.
    pub fn load(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
    }

    /// Append a new stroke on top of the stack and return its handle.
    pub fn begin(&mut self, stroke: Stroke) -> StrokeHandle {
        self.strokes.push(stroke);
        StrokeHandle(self.strokes.len() - 1)
    }

    /// Append a point to the stroke behind `handle`. Returns false if the handle is stale.
    pub fn extend(&mut self, handle: StrokeHandle, point: StrokePoint) -> bool {
        let Some(stroke) = self.strokes.get_mut(handle.0) else {
            return false;
        };
        stroke.points.push(point);
        true
    }

    /// Return a reference to a stroke by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    /// Keep only strokes for which `keep` returns true. Returns the number removed.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Stroke) -> bool,
    {
        let before = self.strokes.len();
        self.strokes.retain(keep);
        before - self.strokes.len()
    }

    /// Remove every stroke. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let n = self.strokes.len();
        self.strokes.clear();
        n
    }

    /// Strokes in stacking order.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Copy of the sequence for handing to the persistence sink.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Stroke> {
        self.strokes.clone()
    }

    /// Number of strokes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Returns `true` if the store contains no strokes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
