//! Stroke-based vector drawing engine.
//!
//! This crate owns everything between a pointer event and a pixel: the
//! stroke history, the full-replay renderer, pixel-accurate hit-testing,
//! the selection halo, and the gesture classifier that turns raw pointer
//! input into history mutations. There is no persistent bitmap: every redraw
//! clears the target surface and replays the whole history in paint order,
//! which is what makes undoing an eraser stroke bring back what it erased.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`]: history controller, selection, pointer/key handlers |
//! | [`doc`] | Stroke model (`CompletedStroke`, `FreehandStroke`, `TextStroke`) and the [`doc::History`] store |
//! | [`outline`] | Tapered outline algorithm (pressure-weighted points → closed fill path) |
//! | [`render`] | Full-replay stroke renderer with per-tool compositing |
//! | [`hit`] | Hit-testing against rendered stroke shapes |
//! | [`halo`] | Selection halo on the overlay surface |
//! | [`surface`] | Raster surfaces (RGBA pixmaps) and PNG snapshots |
//! | [`input`] | Tools, pointer samples, and the gesture state machine |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`text`] | Embedded bitmap font: text drawing and measurement |
//! | [`color`] | CSS color parsing |
//! | [`summary`] | Human-readable stroke summary for generation requests |
//! | [`consts`] | Shared numeric constants (thresholds, halo padding, etc.) |

pub mod camera;
pub mod color;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod halo;
pub mod hit;
pub mod input;
pub mod outline;
pub mod render;
pub mod summary;
pub mod surface;
pub mod text;
