//! Shared numeric constants for the canvas crate.

// ── Input ───────────────────────────────────────────────────────

/// Pressure assigned to samples from devices that report none.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// A gesture whose pointer strays at least this far from the down point is a drag, not a tap.
pub const TAP_MAX_DISTANCE: f64 = 5.0;

/// A gesture lasting at least this long (milliseconds) is a drag, not a tap.
pub const TAP_MAX_MS: f64 = 200.0;

// ── Compositing ─────────────────────────────────────────────────

/// Fixed opacity of highlighter strokes, independent of the stored opacity.
pub const HIGHLIGHTER_OPACITY: f32 = 0.35;

// ── Halo ────────────────────────────────────────────────────────

/// Extra outline size for multi-point halos, so the glow wraps outside the stroke.
pub const HALO_SIZE_EXTRA: f64 = 8.0;

/// Gap between a dot's edge and its halo ring.
pub const HALO_RING_GAP: f64 = 5.0;

/// Padding on each side of a text stroke's halo rectangle.
pub const TEXT_HALO_PADDING: f64 = 6.0;

// ── Camera ──────────────────────────────────────────────────────

/// Minimum camera zoom factor.
pub const MIN_ZOOM: f64 = 0.3;

/// Maximum camera zoom factor.
pub const MAX_ZOOM: f64 = 5.0;
