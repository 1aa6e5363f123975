//! Stroke model: sample points, freehand and text strokes, and the history store.
//!
//! A drawing is an ordered [`History`] of [`CompletedStroke`]s. Array order is
//! paint order is z-order: later entries paint over earlier ones. The history
//! is only ever appended to, truncated from the end (undo), filtered by id
//! (delete), or replaced wholesale (load/clear). It is never reordered.
//!
//! Eraser strokes are ordinary members of the history. Their destructive effect
//! is recomputed on every replay, so removing one restores what it erased.
//!
//! The serialized form matches saved drawings: freehand strokes are plain
//! objects with a `tool` field; text strokes carry a `"type": "text"` marker
//! and a camelCase `fontSize`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_PRESSURE;

/// Unique identifier for a stroke within one history.
pub type StrokeId = Uuid;

fn default_pressure() -> f64 {
    DEFAULT_PRESSURE
}

/// One pointer sample. `pressure` is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_pressure")]
    pub pressure: f64,
}

impl SamplePoint {
    /// Build a sample, substituting the default pressure when the device
    /// reports none (absent or zero).
    #[must_use]
    pub fn new(x: f64, y: f64, pressure: Option<f64>) -> Self {
        let pressure = match pressure {
            Some(p) if p > 0.0 && p.is_finite() => p.min(1.0),
            _ => DEFAULT_PRESSURE,
        };
        Self { x, y, pressure }
    }
}

/// The tool a freehand stroke was drawn with. Selects outline preset and compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    Pencil,
    Brush,
    Highlighter,
    Eraser,
}

/// Outline parameters for the tapered-outline algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlinePreset {
    /// Default nib diameter for new strokes drawn with this tool.
    pub size: f64,
    /// How much pressure narrows the stroke. `0` is constant width.
    pub thinning: f64,
    /// How aggressively closely spaced points are merged.
    pub smoothing: f64,
    /// How far each point is pulled towards the previous one.
    pub streamline: f64,
}

impl StrokeTool {
    /// Outline preset for this tool.
    #[must_use]
    pub fn preset(self) -> OutlinePreset {
        match self {
            Self::Pencil => OutlinePreset { size: 4.0, thinning: 0.5, smoothing: 0.5, streamline: 0.5 },
            Self::Brush => OutlinePreset { size: 14.0, thinning: 0.7, smoothing: 0.6, streamline: 0.4 },
            Self::Highlighter => OutlinePreset { size: 22.0, thinning: 0.0, smoothing: 0.8, streamline: 0.3 },
            Self::Eraser => OutlinePreset { size: 18.0, thinning: 0.0, smoothing: 0.5, streamline: 0.5 },
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Brush => "brush",
            Self::Highlighter => "highlighter",
            Self::Eraser => "eraser",
        }
    }
}

/// A pressure-tapered freehand path. One point is a tap and renders as a dot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreehandStroke {
    pub id: StrokeId,
    pub points: Vec<SamplePoint>,
    pub color: String,
    pub size: f64,
    pub opacity: f64,
    pub tool: StrokeTool,
}

/// Discriminator carried by text strokes on the wire (`"type": "text"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMarker {
    #[default]
    Text,
}

/// A text label anchored at the top-left of its line box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStroke {
    pub id: StrokeId,
    #[serde(rename = "type")]
    pub marker: TextMarker,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: String,
}

impl TextStroke {
    #[must_use]
    pub fn new(id: StrokeId, text: impl Into<String>, x: f64, y: f64, font_size: f64, color: impl Into<String>) -> Self {
        Self { id, marker: TextMarker::Text, text: text.into(), x, y, font_size, color: color.into() }
    }
}

/// Either kind of committed stroke.
///
/// Untagged on the wire; the text variant is tried first because only it
/// requires the `type` marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletedStroke {
    Text(TextStroke),
    Freehand(FreehandStroke),
}

impl CompletedStroke {
    #[must_use]
    pub fn id(&self) -> StrokeId {
        match self {
            Self::Text(t) => t.id,
            Self::Freehand(f) => f.id,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Translate every sample point (freehand) or the anchor (text).
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Text(t) => {
                t.x += dx;
                t.y += dy;
            }
            Self::Freehand(f) => {
                for p in &mut f.points {
                    p.x += dx;
                    p.y += dy;
                }
            }
        }
    }
}

impl From<FreehandStroke> for CompletedStroke {
    fn from(stroke: FreehandStroke) -> Self {
        Self::Freehand(stroke)
    }
}

impl From<TextStroke> for CompletedStroke {
    fn from(stroke: TextStroke) -> Self {
        Self::Text(stroke)
    }
}

/// Ordered stroke store. Index order is paint order.
#[derive(Debug, Clone, Default)]
pub struct History {
    strokes: Vec<CompletedStroke>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke. Returns `false` and leaves the history untouched if a
    /// stroke with the same id is already present.
    pub fn push(&mut self, stroke: CompletedStroke) -> bool {
        if self.position(stroke.id()).is_some() {
            tracing::warn!(id = %stroke.id(), "duplicate stroke id rejected");
            return false;
        }
        self.strokes.push(stroke);
        true
    }

    /// Remove and return the topmost stroke.
    pub fn pop(&mut self) -> Option<CompletedStroke> {
        self.strokes.pop()
    }

    /// Remove the stroke with `id`, wherever it sits in paint order.
    pub fn remove(&mut self, id: StrokeId) -> Option<CompletedStroke> {
        let index = self.position(id)?;
        Some(self.strokes.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: StrokeId) -> Option<&CompletedStroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: StrokeId) -> Option<&mut CompletedStroke> {
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    /// Index of the stroke with `id` in paint order.
    #[must_use]
    pub fn position(&self, id: StrokeId) -> Option<usize> {
        self.strokes.iter().position(|s| s.id() == id)
    }

    /// Translate the stroke with `id`. Returns `false` if no such stroke exists.
    pub fn translate(&mut self, id: StrokeId, dx: f64, dy: f64) -> bool {
        match self.get_mut(id) {
            Some(stroke) => {
                stroke.translate(dx, dy);
                true
            }
            None => false,
        }
    }

    /// Replace the whole history. Later duplicates of an id are dropped.
    pub fn load(&mut self, strokes: Vec<CompletedStroke>) {
        self.strokes.clear();
        for stroke in strokes {
            self.push(stroke);
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompletedStroke> {
        self.strokes.iter()
    }

    /// Strokes in paint order.
    #[must_use]
    pub fn as_slice(&self) -> &[CompletedStroke] {
        &self.strokes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a CompletedStroke;
    type IntoIter = std::slice::Iter<'a, CompletedStroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
