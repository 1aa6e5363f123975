//! Rendering: full replay of the stroke history onto a raster surface.
//!
//! There is no persistent bitmap. [`render`] clears the target and paints
//! every stroke in paint order, then overlays the live in-progress stroke if
//! one is given. Eraser strokes cut holes with destination-out compositing,
//! so their effect exists only for the pass that draws them: drop an eraser
//! from the history and the next replay brings back what it covered.
//!
//! This module only reads the model. It never mutates history or selection.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use tiny_skia::{BlendMode, FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

use crate::color::css_color;
use crate::consts::HIGHLIGHTER_OPACITY;
use crate::doc::{CompletedStroke, FreehandStroke, History, StrokeTool, TextStroke};
use crate::outline::{OutlineOptions, outline_path};
use crate::surface::Surface;
use crate::text;

/// Clear `surface` and replay `history`, then overlay `live` if present.
pub fn render(surface: &mut Surface, history: &History, live: Option<&FreehandStroke>) {
    surface.clear();
    let pixmap = surface.pixmap_mut();
    for stroke in history {
        draw_stroke(pixmap, stroke);
    }
    if let Some(live) = live {
        draw_freehand(pixmap, live);
    }
}

/// Paint one committed stroke with its tool's compositing.
pub fn draw_stroke(pixmap: &mut Pixmap, stroke: &CompletedStroke) {
    match stroke {
        CompletedStroke::Text(t) => draw_text_stroke(pixmap, t),
        CompletedStroke::Freehand(f) => draw_freehand(pixmap, f),
    }
}

/// Paint a freehand stroke: a dot for one point, a tapered outline otherwise.
pub fn draw_freehand(pixmap: &mut Pixmap, stroke: &FreehandStroke) {
    let Some(path) = freehand_path(stroke) else {
        return;
    };
    let paint = tool_paint(stroke);
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}

/// Fill shape of a freehand stroke, or `None` for an empty point list.
#[must_use]
pub fn freehand_path(stroke: &FreehandStroke) -> Option<Path> {
    match stroke.points.as_slice() {
        [] => None,
        [dot] => PathBuilder::from_circle(dot.x as f32, dot.y as f32, (stroke.size / 2.0) as f32),
        points => outline_path(points, &OutlineOptions::for_tool(stroke.tool, stroke.size)),
    }
}

fn draw_text_stroke(pixmap: &mut Pixmap, stroke: &TextStroke) {
    let mut paint = Paint::default();
    paint.set_color(css_color(&stroke.color).to_skia(1.0));
    paint.anti_alias = true;
    text::draw_text(pixmap, &stroke.text, stroke.x, stroke.y, stroke.font_size, &paint, Transform::identity());
}

/// Paint for a freehand stroke under its tool's compositing rule.
fn tool_paint(stroke: &FreehandStroke) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.anti_alias = true;
    match stroke.tool {
        StrokeTool::Pencil | StrokeTool::Brush => {
            paint.set_color(css_color(&stroke.color).to_skia(stroke.opacity.clamp(0.0, 1.0) as f32));
            paint.blend_mode = BlendMode::SourceOver;
        }
        StrokeTool::Highlighter => {
            paint.set_color(css_color(&stroke.color).to_skia(HIGHLIGHTER_OPACITY));
            paint.blend_mode = BlendMode::Multiply;
        }
        StrokeTool::Eraser => {
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.blend_mode = BlendMode::DestinationOut;
        }
    }
    paint
}
