//! Input model: tools, pointer samples, modifier keys, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture tracked between pointer-down and
//! pointer-up; [`classify`] decides on release whether it was a tap or a
//! stroke to commit.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::consts::{TAP_MAX_DISTANCE, TAP_MAX_MS};
use crate::doc::{StrokeId, StrokeTool};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Thin tapered ink (default).
    #[default]
    Pencil,
    /// Wide, strongly tapered ink.
    Brush,
    /// Translucent multiply marker.
    Highlighter,
    /// Cuts holes in everything painted before it.
    Eraser,
    /// Tap to place a text label.
    Text,
    /// Tap to select, drag the selection to move it.
    Select,
}

impl Tool {
    /// Tool bound to a single-key shortcut (`p b h e t v`).
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "p" | "P" => Some(Self::Pencil),
            "b" | "B" => Some(Self::Brush),
            "h" | "H" => Some(Self::Highlighter),
            "e" | "E" => Some(Self::Eraser),
            "t" | "T" => Some(Self::Text),
            "v" | "V" => Some(Self::Select),
            _ => None,
        }
    }

    /// The stroke tool this tool draws with, if it draws freehand.
    #[must_use]
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            Self::Pencil => Some(StrokeTool::Pencil),
            Self::Brush => Some(StrokeTool::Brush),
            Self::Highlighter => Some(StrokeTool::Highlighter),
            Self::Eraser => Some(StrokeTool::Eraser),
            Self::Text | Self::Select => None,
        }
    }
}

/// Map a stroke width (1..=60) to a text font size (12..=72).
#[must_use]
pub fn stroke_width_to_font_size(width: f64) -> f64 {
    (12.0 + (width - 1.0) / 59.0 * 60.0).round()
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// One pointer event in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
    /// Reported pressure; `None` or `0` means the device has none.
    pub pressure: Option<f64>,
    /// Event timestamp in milliseconds.
    pub time_ms: f64,
}

impl Pointer {
    #[must_use]
    pub fn new(x: f64, y: f64, time_ms: f64) -> Self {
        Self { x, y, pressure: None, time_ms }
    }

    #[must_use]
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    #[must_use]
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Persistent UI state: active tool, pen settings, and the selection.
///
/// The selection is not part of the history.
#[derive(Debug, Clone)]
pub struct UiState {
    pub tool: Tool,
    /// CSS color used for new strokes and text.
    pub color: String,
    /// Nib width for new strokes; also mapped to the text font size.
    pub stroke_width: f64,
    pub opacity: f64,
    pub selected_id: Option<StrokeId>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: "#000000".into(),
            stroke_width: StrokeTool::Pencil.preset().size,
            opacity: 1.0,
            selected_id: None,
        }
    }
}

/// Gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer is down; not yet known whether this is a tap or a stroke.
    Pressing {
        /// Canvas-space position of pointer-down.
        down: Point,
        /// Timestamp of pointer-down.
        down_ms: f64,
        /// Largest distance from `down` seen so far.
        max_distance: f64,
    },
    /// Moving the selected stroke.
    Dragging {
        id: StrokeId,
        /// Canvas-space position at the previous pointer event.
        last: Point,
    },
}

/// What a released press turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Short and still: select or deselect, never commit.
    Tap,
    /// Anything else: commit the buffered stroke.
    Commit,
}

/// Classify a press by how far the pointer strayed and how long it was held.
#[must_use]
pub fn classify(max_distance: f64, elapsed_ms: f64) -> GestureKind {
    if max_distance < TAP_MAX_DISTANCE && elapsed_ms < TAP_MAX_MS {
        GestureKind::Tap
    } else {
        GestureKind::Commit
    }
}
