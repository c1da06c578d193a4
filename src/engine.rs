use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, WheelDelta, ZoomDirection};
use crate::color::{ColorError, HexColor};
use crate::config::{ConfigError, EngineConfig};
use crate::consts::CURSOR_GRABBING;
use crate::doc::{Page, PageKind, Stroke, StrokePoint, StrokeStore};
use crate::hit::Eraser;
use crate::input::{Button, InputState, Tool, UiState};
use crate::normalize::{SurfaceSize, to_normalized};
use crate::render::{self, RenderStyle, Surface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A gesture finished (or the page was cleared); persist `strokes` for `page_id`.
    StrokesChanged { page_id: String, strokes: Vec<Stroke> },
    /// Pan or zoom changed; reapply the container transform.
    ViewportChanged(Camera),
    SetCursor(String),
    RenderNeeded,
}

/// Errors from the browser wrapper.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("canvas error: {0}")]
    Canvas(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Identity and background of the active page. Its strokes live in the [`StrokeStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    pub id: String,
    pub kind: PageKind,
    pub image_source: Option<String>,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub store: StrokeStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub surface: SurfaceSize,
    pub config: EngineConfig,
    page: Option<PageInfo>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a core with explicit tuning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails [`EngineConfig::validate`].
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        Self {
            store: StrokeStore::new(),
            camera: Camera::default(),
            ui: UiState::from_config(&config),
            input: InputState::default(),
            surface: SurfaceSize::default(),
            config,
            page: None,
        }
    }

    // --- Page provider ---

    /// Make `page` the active page.
    ///
    /// A draw or erase gesture still in progress is committed to the previous
    /// page first, so the returned actions may begin with a `StrokesChanged`
    /// for the old page id. The viewport is reset.
    pub fn load_page(&mut self, page: Page) -> Vec<Action> {
        let mut actions = self.finish_gesture();
        let Page { id, kind, image_source, strokes } = page;
        info!("engine: load page {id} ({} strokes)", strokes.len());

        self.store.load(strokes);
        self.page = Some(PageInfo { id, kind, image_source });
        self.camera.reset();

        actions.push(Action::ViewportChanged(self.camera));
        actions.push(Action::SetCursor(self.cursor().to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record the unscaled size of the drawing surface in CSS pixels.
    pub fn set_surface_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        let next = SurfaceSize::new(width, height);
        if next == self.surface {
            return Vec::new();
        }
        if !next.is_valid() {
            warn!("engine: surface resized to {width}x{height}; pointer input disabled until it has area");
        }
        self.surface = next;
        vec![Action::RenderNeeded]
    }

    // --- Tool / style provider ---

    /// Set the active tool. Only affects how the next pointer-down is interpreted.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        if self.input.is_idle() {
            vec![Action::SetCursor(self.cursor().to_owned())]
        } else {
            Vec::new()
        }
    }

    /// Select a pen color; an invalid value keeps the previous color.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Invalid`] if `raw` is not a hex color.
    pub fn set_pen_color(&mut self, raw: &str) -> Result<HexColor, ColorError> {
        if let Err(e) = self.ui.set_pen_color(raw) {
            warn!("engine: {e}; keeping {}", self.ui.pen_color());
            return Err(e);
        }
        Ok(self.ui.pen_color().clone())
    }

    /// Set the pen width (clamped). Returns the width in effect.
    pub fn set_pen_width(&mut self, width: f64) -> f64 {
        self.ui.set_pen_width(width)
    }

    /// Set the eraser size (clamped). Returns the size in effect.
    pub fn set_eraser_size(&mut self, size: f64) -> f64 {
        self.ui.set_eraser_size(size)
    }

    // --- Input events ---

    /// Start a gesture. Ignored while another gesture is active.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        match (button, self.ui.tool) {
            (Button::Secondary, _) => Vec::new(),
            (Button::Middle, _) | (Button::Primary, Tool::Hand) => self.begin_pan(screen_pt),
            (Button::Primary, Tool::Eraser) => self.begin_erase(screen_pt),
            (Button::Primary, tool) if tool.draws() => self.begin_draw(screen_pt),
            (Button::Primary, _) => Vec::new(),
        }
    }

    /// Continue the active gesture. A move with no gesture in progress is a no-op.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Drawing { handle } => {
                let Some(point) = self.normalize(screen_pt) else {
                    return Vec::new();
                };
                if self.store.extend(handle, point) { vec![Action::RenderNeeded] } else { Vec::new() }
            }
            InputState::Erasing { removed, .. } => {
                let Some(point) = self.normalize(screen_pt) else {
                    return Vec::new();
                };
                let n = self.erase_at(point);
                self.input = InputState::Erasing { removed: removed + n };
                if n > 0 { vec![Action::RenderNeeded] } else { Vec::new() }
            }
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::ViewportChanged(self.camera)]
            }
        }
    }

    /// End the active gesture.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    /// Pointer left the surface; ends the active gesture like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    /// Zoom one notch around `screen_pt` (relative to the viewport container).
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let Some(direction) = ZoomDirection::from_wheel(delta) else {
            return Vec::new();
        };
        if !self.camera.zoom_at(screen_pt, direction, self.config.zoom_limits()) {
            return Vec::new();
        }
        debug!("engine: zoom {:.3} at ({}, {})", self.camera.zoom, screen_pt.x, screen_pt.y);
        vec![Action::ViewportChanged(self.camera)]
    }

    /// Remove every stroke from the active page. Ignored mid-gesture or with no page.
    pub fn erase_all(&mut self) -> Vec<Action> {
        if !self.input.is_idle() {
            debug!("engine: erase all ignored during {} gesture", self.input.name());
            return Vec::new();
        }
        let Some(page) = &self.page else {
            return Vec::new();
        };
        let page_id = page.id.clone();
        let removed = self.store.clear();
        info!("engine: erased all {removed} strokes on page {page_id}");
        vec![Action::StrokesChanged { page_id, strokes: Vec::new() }, Action::RenderNeeded]
    }

    // --- Render ---

    /// Draw the active page's strokes at the current surface size.
    pub fn render_to<S: Surface + ?Sized>(&self, surface: &mut S) {
        render::render(surface, self.store.strokes(), self.surface, &RenderStyle::main(&self.config));
    }

    /// Draw any stroke sequence as a thumbnail of `size`.
    pub fn render_thumbnail_to<S: Surface + ?Sized>(&self, surface: &mut S, strokes: &[Stroke], size: SurfaceSize) {
        render::render_thumbnail(surface, strokes, size, &self.config);
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page.as_ref()
    }

    #[must_use]
    pub fn page_id(&self) -> Option<&str> {
        self.page.as_ref().map(|p| p.id.as_str())
    }

    /// The active page's strokes in stacking order.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        self.store.strokes()
    }

    /// The active page with its current strokes.
    #[must_use]
    pub fn current_page(&self) -> Option<Page> {
        self.page.as_ref().map(|p| Page {
            id: p.id.clone(),
            kind: p.kind,
            image_source: p.image_source.clone(),
            strokes: self.store.snapshot(),
        })
    }

    /// Cursor the host should show over the surface.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self.input {
            InputState::Panning { .. } => CURSOR_GRABBING,
            _ => self.ui.tool.idle_cursor(),
        }
    }

    // --- Gestures ---

    fn begin_pan(&mut self, screen_pt: Point) -> Vec<Action> {
        self.input = InputState::Panning { last_screen: screen_pt };
        debug!("engine: pan begin");
        vec![Action::SetCursor(CURSOR_GRABBING.to_owned())]
    }

    fn begin_draw(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.page.is_none() {
            debug!("engine: draw ignored, no active page");
            return Vec::new();
        }
        let Some(point) = self.normalize(screen_pt) else {
            return Vec::new();
        };
        let stroke = Stroke::new(
            self.ui.pen_color().clone(),
            self.ui.pen_width(),
            self.ui.tool == Tool::Highlighter,
            point,
        );
        let handle = self.store.begin(stroke);
        self.input = InputState::Drawing { handle };
        debug!("engine: draw begin at ({:.4}, {:.4})", point.x, point.y);
        vec![Action::RenderNeeded]
    }

    fn begin_erase(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.page.is_none() {
            debug!("engine: erase ignored, no active page");
            return Vec::new();
        }
        let Some(point) = self.normalize(screen_pt) else {
            return Vec::new();
        };
        let removed = self.erase_at(point);
        self.input = InputState::Erasing { removed };
        debug!("engine: erase begin at ({:.4}, {:.4})", point.x, point.y);
        if removed > 0 { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    fn erase_at(&mut self, point: StrokePoint) -> usize {
        match Eraser::from_size(point, self.ui.eraser_size(), self.surface) {
            Ok(eraser) => eraser.erase(&mut self.store),
            Err(e) => {
                warn!("engine: dropping erase: {e}");
                0
            }
        }
    }

    /// Return to `Idle`, emitting the persistence action for draw/erase gestures.
    fn finish_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::Idle => Vec::new(),
            InputState::Drawing { handle } => {
                let points = self.store.get(handle.index()).map_or(0, |s| s.points.len());
                debug!("engine: draw end ({points} points)");
                self.persist().into_iter().collect()
            }
            InputState::Erasing { removed, .. } => {
                debug!("engine: erase end ({removed} strokes removed)");
                self.persist().into_iter().collect()
            }
            InputState::Panning { .. } => {
                debug!("engine: pan end at ({}, {})", self.camera.pan_x, self.camera.pan_y);
                vec![Action::SetCursor(self.cursor().to_owned())]
            }
        }
    }

    fn persist(&self) -> Option<Action> {
        self.page
            .as_ref()
            .map(|p| Action::StrokesChanged { page_id: p.id.clone(), strokes: self.store.snapshot() })
    }

    fn normalize(&self, screen_pt: Point) -> Option<StrokePoint> {
        match to_normalized(screen_pt, &self.camera, self.surface) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!("engine: dropping pointer event: {e}");
                None
            }
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Canvas`] if the element has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        Self::with_config(canvas, EngineConfig::default())
    }

    /// Create an engine with explicit tuning.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if `config` is inconsistent, or
    /// [`EngineError::Canvas`] if the element has no 2D context.
    pub fn with_config(canvas: HtmlCanvasElement, config: EngineConfig) -> Result<Self, EngineError> {
        let core = EngineCore::with_config(config)?;
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx, dpr: 1.0, core })
    }

    // --- Delegated inputs ---

    pub fn load_page(&mut self, page: Page) -> Vec<Action> {
        self.core.load_page(page)
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    /// # Errors
    ///
    /// Returns [`ColorError::Invalid`] if `raw` is not a hex color.
    pub fn set_pen_color(&mut self, raw: &str) -> Result<HexColor, ColorError> {
        self.core.set_pen_color(raw)
    }

    pub fn set_pen_width(&mut self, width: f64) -> f64 {
        self.core.set_pen_width(width)
    }

    pub fn set_eraser_size(&mut self, size: f64) -> f64 {
        self.core.set_eraser_size(size)
    }

    pub fn erase_all(&mut self) -> Vec<Action> {
        self.core.erase_all()
    }

    // --- Viewport ---

    /// Match the backing store to the container's measured CSS size.
    ///
    /// The canvas is only resized when the size or device pixel ratio actually
    /// changes, since resizing clears it.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let mut actions = self.core.set_surface_size(width_css, height_css);
        if actions.is_empty() && (dpr - self.dpr).abs() < f64::EPSILON {
            return actions;
        }
        self.dpr = dpr;
        self.canvas.set_width(backing_px(width_css, dpr));
        self.canvas.set_height(backing_px(height_css, dpr));
        if actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta)
    }

    // --- Render ---

    /// Draw the active page's strokes to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Canvas`] if the context rejects the transform.
    pub fn render(&mut self) -> Result<(), EngineError> {
        let style = RenderStyle::main(&self.core.config);
        render::render_scaled(&mut self.ctx, self.core.store.strokes(), self.core.surface, self.dpr, &style)
            .map_err(js_error)
    }

    /// Draw `strokes` as a thumbnail onto another canvas element of the given CSS size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Canvas`] if the element has no 2D context.
    pub fn render_thumbnail(
        &self,
        target: &HtmlCanvasElement,
        strokes: &[Stroke],
        width_css: f64,
        height_css: f64,
    ) -> Result<(), EngineError> {
        let mut ctx = context_2d(target)?;
        target.set_width(backing_px(width_css, self.dpr));
        target.set_height(backing_px(height_css, self.dpr));
        ctx.set_scale(self.dpr).map_err(js_error)?;
        self.core.render_thumbnail_to(&mut ctx, strokes, SurfaceSize::new(width_css, height_css));
        Ok(())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    /// CSS transform for the page container.
    #[must_use]
    pub fn container_transform(&self) -> String {
        self.core.camera().css_transform()
    }

    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        self.core.strokes()
    }

    #[must_use]
    pub fn current_page(&self) -> Option<Page> {
        self.core.current_page()
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, EngineError> {
    canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or_else(|| EngineError::Canvas("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EngineError::Canvas("context is not a CanvasRenderingContext2d".into()))
}

fn js_error(e: JsValue) -> EngineError {
    EngineError::Canvas(format!("{e:?}"))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing_px(css: f64, dpr: f64) -> u32 {
    if css.is_finite() && css > 0.0 { (css * dpr).round().min(f64::from(u32::MAX)) as u32 } else { 0 }
}
