//! Hit-testing against rendered stroke shapes.
//!
//! Text is tested analytically against its measured line box. Freehand
//! strokes are tested by rasterizing the candidate alone onto a scratch
//! surface the size of the content surface and sampling alpha at the query
//! point, so the tapered outline is respected rather than a bounding box.
//! Eraser strokes painted after the candidate are replayed onto the scratch
//! surface too: a region that has been erased is not hittable, and becomes
//! hittable again once the eraser is undone or deleted.
//!
//! Rasterizing costs one scratch allocation per candidate whose bounds contain
//! the point. That is fine at pointer-event rates; callers must not hit-test
//! once per animation frame.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use tiny_skia::{FillRule, Paint, Rect, Transform};

use crate::doc::{CompletedStroke, History, StrokeId, StrokeTool, TextStroke};
use crate::render::{draw_freehand, freehand_path};
use crate::surface::Surface;
use crate::text::measure_text;

/// Anti-aliasing can light pixels just outside a path's exact bounds.
const BOUNDS_SLOP: f32 = 1.0;

/// Dimensions of the scratch surface used for rasterized tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitArea {
    pub width: u32,
    pub height: u32,
}

impl HitArea {
    #[must_use]
    pub fn of(surface: &Surface) -> Self {
        Self { width: surface.width(), height: surface.height() }
    }
}

/// Topmost non-eraser stroke covering `(x, y)`, if any.
#[must_use]
pub fn hit_test(history: &History, area: HitArea, x: f64, y: f64) -> Option<StrokeId> {
    let strokes = history.as_slice();
    (0..strokes.len()).rev().find(|&index| covers(strokes, index, area, x, y)).map(|index| strokes[index].id())
}

/// Whether the stroke `id` covers `(x, y)`. Used to confirm a drag grip on the
/// selected stroke without scanning the strokes above it.
#[must_use]
pub fn is_point_on_stroke(history: &History, area: HitArea, id: StrokeId, x: f64, y: f64) -> bool {
    history.position(id).is_some_and(|index| covers(history.as_slice(), index, area, x, y))
}

/// Line box of a text stroke: `(left, top, width, height)`.
#[must_use]
pub fn text_bounds(stroke: &TextStroke) -> (f64, f64, f64, f64) {
    (stroke.x, stroke.y, measure_text(&stroke.text, stroke.font_size), stroke.font_size)
}

fn covers(strokes: &[CompletedStroke], index: usize, area: HitArea, x: f64, y: f64) -> bool {
    match &strokes[index] {
        CompletedStroke::Text(t) => {
            let (left, top, width, height) = text_bounds(t);
            x >= left && x <= left + width && y >= top && y <= top + height
        }
        CompletedStroke::Freehand(f) if f.tool == StrokeTool::Eraser => false,
        CompletedStroke::Freehand(f) => {
            let Some(path) = freehand_path(f) else {
                return false;
            };
            if !near(path.bounds(), x, y) {
                return false;
            }
            let Ok(mut scratch) = Surface::new(area.width, area.height) else {
                return false;
            };
            let pixmap = scratch.pixmap_mut();
            pixmap.fill_path(&path, &opaque_paint(), FillRule::Winding, Transform::identity(), None);
            for later in &strokes[index + 1..] {
                if let CompletedStroke::Freehand(e) = later {
                    if e.tool == StrokeTool::Eraser {
                        draw_freehand(pixmap, e);
                    }
                }
            }
            scratch.alpha_at(x, y) > 0
        }
    }
}

/// The candidate's own color and opacity must not decide a hit.
fn opaque_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = true;
    paint
}

fn near(bounds: Rect, x: f64, y: f64) -> bool {
    let (x, y) = (x as f32, y as f32);
    x >= bounds.left() - BOUNDS_SLOP
        && x <= bounds.right() + BOUNDS_SLOP
        && y >= bounds.top() - BOUNDS_SLOP
        && y <= bounds.bottom() + BOUNDS_SLOP
}
