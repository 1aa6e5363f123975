use uuid::Uuid;

use crate::camera::{Camera, Point};
use crate::doc::{CompletedStroke, FreehandStroke, History, SamplePoint, StrokeId, StrokeTool, TextStroke};
use crate::halo;
use crate::hit::{self, HitArea};
use crate::input::{
    GestureKind, InputState, Key, Modifiers, Pointer, Tool, UiState, WheelDelta, classify, stroke_width_to_font_size,
};
use crate::render;
use crate::surface::{Surface, SurfaceError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Wheel zoom factor per notch when scrolling down (zoom out).
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Wheel zoom factor per notch when scrolling up (zoom in).
const WHEEL_ZOOM_IN: f64 = 1.1;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A stroke was appended to the history.
    StrokeCommitted(CompletedStroke),
    /// A stroke left the history (undo or delete).
    StrokeDeleted { id: StrokeId },
    /// A stroke was translated.
    StrokeMoved { id: StrokeId, dx: f64, dy: f64 },
    /// The history was replaced wholesale (load or clear).
    HistoryReplaced,
    /// The selection changed.
    SelectionChanged(Option<StrokeId>),
    /// A text-tool tap: the host should prompt for text and answer with `add_text`.
    TextRequested { x: f64, y: f64, font_size: f64 },
    /// Pan or zoom changed.
    ViewChanged,
    /// The content surface must be replayed.
    RenderNeeded,
    /// The halo overlay must be redrawn.
    HaloNeeded,
}

/// Core engine state: history, selection, gesture tracking, camera.
///
/// Holds no pixels, only the hit-test area, so it can be driven and
/// inspected without allocating surfaces. Every mutation reports what it
/// changed as [`Action`]s; [`Engine`] turns the render actions into pixels.
pub struct EngineCore {
    pub history: History,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    /// Samples of the stroke being drawn. Never part of the history until committed.
    pub buffer: Vec<SamplePoint>,
    /// Set when the live buffer changed since the last frame.
    pub live_dirty: bool,
    pub area: HitArea,
}

impl EngineCore {
    #[must_use]
    pub fn new(area: HitArea) -> Self {
        Self {
            history: History::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            buffer: Vec::new(),
            live_dirty: false,
            area,
        }
    }

    // --- Data inputs ---

    /// Replace the history with previously saved strokes.
    pub fn load(&mut self, strokes: Vec<CompletedStroke>) -> Vec<Action> {
        self.history.load(strokes);
        self.abort_gesture();
        tracing::debug!(count = self.history.len(), "history loaded");
        let mut actions = vec![Action::HistoryReplaced, Action::RenderNeeded];
        actions.extend(self.set_selection(None));
        actions
    }

    /// Strokes in paint order, for persistence.
    #[must_use]
    pub fn strokes(&self) -> &[CompletedStroke] {
        self.history.as_slice()
    }

    // --- History controller ---

    /// Pop the topmost stroke. No-op on an empty history.
    pub fn undo(&mut self) -> Vec<Action> {
        let Some(stroke) = self.history.pop() else {
            return Vec::new();
        };
        tracing::debug!(id = %stroke.id(), remaining = self.history.len(), "undo");
        let mut actions = vec![Action::StrokeDeleted { id: stroke.id() }, Action::RenderNeeded];
        actions.extend(self.set_selection(None));
        actions
    }

    /// Remove the selected stroke wherever it sits. No-op without a selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if self.history.remove(id).is_some() {
            tracing::debug!(%id, "stroke deleted");
            actions.push(Action::StrokeDeleted { id });
            actions.push(Action::RenderNeeded);
        }
        actions.extend(self.set_selection(None));
        actions
    }

    /// Translate stroke `id` by `(dx, dy)`. No-op for an unknown id.
    pub fn move_stroke(&mut self, id: StrokeId, dx: f64, dy: f64) -> Vec<Action> {
        if !self.history.translate(id, dx, dy) {
            return Vec::new();
        }
        let mut actions = vec![Action::StrokeMoved { id, dx, dy }, Action::RenderNeeded];
        if self.ui.selected_id == Some(id) {
            actions.push(Action::HaloNeeded);
        }
        actions
    }

    /// Empty the history, the selection, and any stroke in progress.
    pub fn clear(&mut self) -> Vec<Action> {
        self.history.clear();
        self.abort_gesture();
        tracing::debug!("history cleared");
        let mut actions = vec![Action::HistoryReplaced, Action::RenderNeeded];
        actions.extend(self.set_selection(None));
        actions.push(Action::HaloNeeded);
        actions
    }

    /// Append a freehand stroke built from `points`, even a single point.
    pub fn commit(&mut self, points: Vec<SamplePoint>, tool: StrokeTool, color: &str, size: f64, opacity: f64) -> Vec<Action> {
        let stroke = CompletedStroke::Freehand(FreehandStroke {
            id: Uuid::new_v4(),
            points,
            color: color.to_owned(),
            size,
            opacity,
            tool,
        });
        self.append(stroke)
    }

    /// Append a text label anchored at `(x, y)`.
    pub fn add_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, color: &str) -> Vec<Action> {
        self.append(TextStroke::new(Uuid::new_v4(), text, x, y, font_size, color).into())
    }

    fn append(&mut self, stroke: CompletedStroke) -> Vec<Action> {
        let id = stroke.id();
        if !self.history.push(stroke.clone()) {
            return Vec::new();
        }
        tracing::debug!(%id, text = stroke.is_text(), "stroke committed");
        vec![Action::StrokeCommitted(stroke), Action::RenderNeeded]
    }

    // --- Selection / tool ---

    /// Topmost stroke under canvas point `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<StrokeId> {
        hit::hit_test(&self.history, self.area, x, y)
    }

    /// Select `id`, or clear the selection with `None`. Unknown ids deselect.
    pub fn select(&mut self, id: Option<StrokeId>) -> Vec<Action> {
        let id = id.filter(|id| self.history.get(*id).is_some());
        self.set_selection(id)
    }

    pub fn deselect(&mut self) -> Vec<Action> {
        self.set_selection(None)
    }

    fn set_selection(&mut self, id: Option<StrokeId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id), Action::HaloNeeded]
    }

    /// Switch tools. Clears the selection and abandons any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        let had_buffer = self.abort_gesture();
        let mut actions = self.set_selection(None);
        if had_buffer {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// The currently selected stroke id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<StrokeId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn selected_stroke(&self) -> Option<&CompletedStroke> {
        self.ui.selected_id.and_then(|id| self.history.get(id))
    }

    /// The in-progress stroke with the current pen settings, if one is being drawn.
    #[must_use]
    pub fn live_stroke(&self) -> Option<FreehandStroke> {
        let tool = self.ui.tool.stroke_tool()?;
        if self.buffer.is_empty() {
            return None;
        }
        Some(FreehandStroke {
            id: Uuid::nil(),
            points: self.buffer.clone(),
            color: self.ui.color.clone(),
            size: self.ui.stroke_width,
            opacity: self.ui.opacity,
            tool,
        })
    }

    /// Drop the gesture and buffer. Returns whether a live stroke was discarded.
    fn abort_gesture(&mut self) -> bool {
        self.input = InputState::Idle;
        let had_buffer = !self.buffer.is_empty();
        self.buffer.clear();
        self.live_dirty = false;
        had_buffer
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, pointer: Pointer) -> Vec<Action> {
        let pos = self.camera.screen_to_canvas(pointer.position());

        if let Some(id) = self.ui.selected_id {
            if hit::is_point_on_stroke(&self.history, self.area, id, pos.x, pos.y) {
                self.input = InputState::Dragging { id, last: pos };
                return Vec::new();
            }
        }

        self.input = InputState::Pressing { down: pos, down_ms: pointer.time_ms, max_distance: 0.0 };
        self.buffer.clear();
        if self.ui.tool.stroke_tool().is_some() {
            self.buffer.push(SamplePoint::new(pos.x, pos.y, pointer.pressure));
            self.live_dirty = true;
        }
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, pointer: Pointer) -> Vec<Action> {
        let pos = self.camera.screen_to_canvas(pointer.position());
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Dragging { id, last } => {
                let (id, dx, dy) = (*id, pos.x - last.x, pos.y - last.y);
                *last = pos;
                self.move_stroke(id, dx, dy)
            }
            InputState::Pressing { down, max_distance, .. } => {
                *max_distance = max_distance.max(down.distance(pos));
                if self.ui.tool.stroke_tool().is_some() {
                    self.buffer.push(SamplePoint::new(pos.x, pos.y, pointer.pressure));
                    self.live_dirty = true;
                }
                Vec::new()
            }
        }
    }

    pub fn on_pointer_up(&mut self, pointer: Pointer) -> Vec<Action> {
        let pos = self.camera.screen_to_canvas(pointer.position());
        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Dragging { .. } => Vec::new(),
            InputState::Pressing { down, down_ms, max_distance } => {
                let max_distance = max_distance.max(down.distance(pos));
                let kind = classify(max_distance, pointer.time_ms - down_ms);
                let points = std::mem::take(&mut self.buffer);
                self.live_dirty = false;
                match kind {
                    GestureKind::Tap => self.on_tap(down, !points.is_empty()),
                    GestureKind::Commit => match self.ui.tool.stroke_tool() {
                        Some(tool) => {
                            let color = self.ui.color.clone();
                            self.commit(points, tool, &color, self.ui.stroke_width, self.ui.opacity)
                        }
                        None => Vec::new(),
                    },
                }
            }
        }
    }

    /// Abandon the gesture without committing anything.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        if self.abort_gesture() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    fn on_tap(&mut self, at: Point, discarded_buffer: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        if discarded_buffer {
            actions.push(Action::RenderNeeded);
        }
        if self.ui.tool == Tool::Text {
            actions.push(Action::TextRequested { x: at.x, y: at.y, font_size: stroke_width_to_font_size(self.ui.stroke_width) });
            return actions;
        }
        let hit = self.hit_test(at.x, at.y);
        actions.extend(self.set_selection(hit));
        actions
    }

    // --- Keyboard / wheel ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let name = key.0.as_str();
        if modifiers.command() {
            return if name.eq_ignore_ascii_case("z") { self.undo() } else { Vec::new() };
        }
        match name {
            "Delete" | "Backspace" => self.delete_selected(),
            "Escape" => self.deselect(),
            _ => match Tool::from_shortcut(name) {
                Some(tool) if !modifiers.alt => self.set_tool(tool),
                _ => Vec::new(),
            },
        }
    }

    /// Ctrl/Meta + wheel zooms; a plain wheel pans.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            self.camera.zoom_by(if delta.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN });
        } else {
            self.camera.pan_by(-delta.dx, -delta.dy);
        }
        vec![Action::ViewChanged]
    }

    /// Restore the identity camera.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera = Camera::default();
        vec![Action::ViewChanged]
    }
}

/// The full drawing engine: [`EngineCore`] plus the content and halo surfaces.
///
/// Every method forwards to the core and then services the render actions it
/// returned, so the surfaces always reflect the history when control returns.
pub struct Engine {
    pub core: EngineCore,
    content: Surface,
    halo: Surface,
}

impl Engine {
    /// Create an engine with `width` x `height` surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidSize`] for a zero or oversized dimension.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let content = Surface::new(width, height)?;
        let halo = Surface::new(width, height)?;
        Ok(Self { core: EngineCore::new(HitArea::of(&content)), content, halo })
    }

    fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if actions.contains(&Action::RenderNeeded) {
            self.render();
        }
        if actions.contains(&Action::HaloNeeded) {
            self.render_halo();
        }
        actions
    }

    // --- Delegated data inputs ---

    pub fn load(&mut self, strokes: Vec<CompletedStroke>) -> Vec<Action> {
        let actions = self.core.load(strokes);
        self.apply(actions)
    }

    #[must_use]
    pub fn strokes(&self) -> &[CompletedStroke] {
        self.core.strokes()
    }

    /// PNG capture of the content surface.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Encode`] if PNG encoding fails.
    pub fn snapshot(&self) -> Result<Vec<u8>, SurfaceError> {
        self.content.encode_png()
    }

    #[must_use]
    pub fn content(&self) -> &Surface {
        &self.content
    }

    #[must_use]
    pub fn halo(&self) -> &Surface {
        &self.halo
    }

    // --- Delegated history controller ---

    pub fn undo(&mut self) -> Vec<Action> {
        let actions = self.core.undo();
        self.apply(actions)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        let actions = self.core.delete_selected();
        self.apply(actions)
    }

    pub fn move_stroke(&mut self, id: StrokeId, dx: f64, dy: f64) -> Vec<Action> {
        let actions = self.core.move_stroke(id, dx, dy);
        self.apply(actions)
    }

    pub fn clear(&mut self) -> Vec<Action> {
        let actions = self.core.clear();
        self.apply(actions)
    }

    pub fn commit(&mut self, points: Vec<SamplePoint>, tool: StrokeTool, color: &str, size: f64, opacity: f64) -> Vec<Action> {
        let actions = self.core.commit(points, tool, color, size, opacity);
        self.apply(actions)
    }

    pub fn add_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, color: &str) -> Vec<Action> {
        let actions = self.core.add_text(text, x, y, font_size, color);
        self.apply(actions)
    }

    // --- Delegated selection / tool ---

    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<StrokeId> {
        self.core.hit_test(x, y)
    }

    #[must_use]
    pub fn is_point_on_stroke(&self, id: StrokeId, x: f64, y: f64) -> bool {
        hit::is_point_on_stroke(&self.core.history, self.core.area, id, x, y)
    }

    pub fn select(&mut self, id: Option<StrokeId>) -> Vec<Action> {
        let actions = self.core.select(id);
        self.apply(actions)
    }

    pub fn deselect(&mut self) -> Vec<Action> {
        let actions = self.core.deselect();
        self.apply(actions)
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let actions = self.core.set_tool(tool);
        self.apply(actions)
    }

    #[must_use]
    pub fn selection(&self) -> Option<StrokeId> {
        self.core.selection()
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, pointer: Pointer) -> Vec<Action> {
        let actions = self.core.on_pointer_down(pointer);
        self.apply(actions)
    }

    pub fn on_pointer_move(&mut self, pointer: Pointer) -> Vec<Action> {
        let actions = self.core.on_pointer_move(pointer);
        self.apply(actions)
    }

    pub fn on_pointer_up(&mut self, pointer: Pointer) -> Vec<Action> {
        let actions = self.core.on_pointer_up(pointer);
        self.apply(actions)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_cancel();
        self.apply(actions)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_key_down(key, modifiers);
        self.apply(actions)
    }

    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(delta, modifiers)
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.core.reset_view()
    }

    /// Scheduling tick: replay with the live stroke overlaid if it changed.
    /// Returns whether the content surface was redrawn.
    pub fn on_frame(&mut self) -> bool {
        if !self.core.live_dirty {
            return false;
        }
        self.core.live_dirty = false;
        self.render();
        true
    }

    // --- Render ---

    /// Full replay of the history (plus the live stroke) onto the content surface.
    pub fn render(&mut self) {
        let live = self.core.live_stroke();
        render::render(&mut self.content, &self.core.history, live.as_ref());
    }

    /// Redraw the selection halo onto the overlay surface.
    pub fn render_halo(&mut self) {
        halo::render_halo(&mut self.halo, self.core.selected_stroke());
    }
}
