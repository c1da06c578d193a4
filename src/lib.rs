//! Page annotation engine: freehand ink, highlighter and eraser over a
//! pan/zoom viewport.
//!
//! Stroke geometry is stored in normalized `[0,1]` coordinates relative to
//! the unscaled drawing surface, so a page's strokes replay losslessly on a
//! surface of any size, including thumbnails. The crate compiles to
//! WebAssembly for the browser and natively for tests. The host layer wires
//! DOM events to the engine, applies [`engine::Action`]s (persisting stroke
//! changes, updating the container transform and cursor) and owns page
//! management and image import.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`input`] | Tools, pen/eraser style, and gesture states |
//! | [`doc`] | Stroke, page and stroke-store types |
//! | [`normalize`] | Screen to normalized coordinate conversion |
//! | [`camera`] | Pan/zoom viewport transform |
//! | [`hit`] | Eraser hit-testing |
//! | [`render`] | Stroke replay onto a 2D surface, thumbnails, image fit |
//! | [`color`] | Hex color validation |
//! | [`config`] | Engine tuning loaded from JSON |
//! | [`consts`] | Shared constants (zoom limits, size ranges, palette) |

pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod normalize;
pub mod render;
