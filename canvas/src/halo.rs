//! Selection halo on the transparent overlay surface.
//!
//! The halo lives on its own surface above the content so it can be redrawn
//! on every drag step without replaying the history. Glow is approximated by
//! stroking the halo shape a few times with wider, fainter pens underneath
//! the crisp pass.

#[cfg(test)]
#[path = "halo_test.rs"]
mod halo_test;

use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform};

use crate::color::Rgba;
use crate::consts::{HALO_RING_GAP, HALO_SIZE_EXTRA, TEXT_HALO_PADDING};
use crate::doc::{CompletedStroke, FreehandStroke, TextStroke};
use crate::hit::text_bounds;
use crate::outline::{OutlineOptions, outline_path};
use crate::surface::Surface;

const HALO_ORANGE: Rgba = Rgba { r: 255, g: 140, b: 0, a: 0.8 };
const HALO_FILL_ALPHA: f32 = 0.18;
const RING_WIDTH: f32 = 2.5;
const TEXT_OUTLINE_WIDTH: f32 = 2.0;
const TEXT_DASH: [f32; 2] = [6.0, 4.0];

/// Extra pen width and opacity of each glow pass, widest first.
const GLOW_PASSES: [(f32, f32); 3] = [(14.0, 0.08), (9.0, 0.14), (5.0, 0.22)];

/// Clear `overlay` and draw the halo for `selected`, if any.
pub fn render_halo(overlay: &mut Surface, selected: Option<&CompletedStroke>) {
    overlay.clear();
    let Some(stroke) = selected else {
        return;
    };
    let pixmap = overlay.pixmap_mut();
    match stroke {
        CompletedStroke::Text(t) => text_halo(pixmap, t),
        CompletedStroke::Freehand(f) => freehand_halo(pixmap, f),
    }
}

fn freehand_halo(pixmap: &mut Pixmap, stroke: &FreehandStroke) {
    match stroke.points.as_slice() {
        [] => {}
        [dot] => {
            let radius = stroke.size / 2.0 + HALO_RING_GAP;
            if let Some(ring) = PathBuilder::from_circle(dot.x as f32, dot.y as f32, radius as f32) {
                glow(pixmap, &ring, RING_WIDTH);
                stroke_path(pixmap, &ring, HALO_ORANGE.to_skia(1.0), RING_WIDTH, None);
            }
        }
        points => {
            let opts = OutlineOptions::for_tool(stroke.tool, stroke.size + HALO_SIZE_EXTRA);
            if let Some(path) = outline_path(points, &opts) {
                glow(pixmap, &path, 0.0);
                let mut paint = Paint::default();
                paint.anti_alias = true;
                paint.set_color(Rgba { a: HALO_FILL_ALPHA, ..HALO_ORANGE }.to_skia(1.0));
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }
}

fn text_halo(pixmap: &mut Pixmap, stroke: &TextStroke) {
    let (left, top, width, height) = text_bounds(stroke);
    let pad = TEXT_HALO_PADDING;
    let Some(rect) = Rect::from_xywh(
        (left - pad) as f32,
        (top - pad) as f32,
        (width + 2.0 * pad) as f32,
        (height + 2.0 * pad) as f32,
    ) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    glow(pixmap, &path, TEXT_OUTLINE_WIDTH);
    stroke_path(pixmap, &path, HALO_ORANGE.to_skia(1.0), TEXT_OUTLINE_WIDTH, StrokeDash::new(TEXT_DASH.to_vec(), 0.0));
}

fn glow(pixmap: &mut Pixmap, path: &Path, base_width: f32) {
    for (extra, alpha) in GLOW_PASSES {
        stroke_path(pixmap, path, HALO_ORANGE.to_skia(alpha), base_width + extra, None);
    }
}

fn stroke_path(pixmap: &mut Pixmap, path: &Path, color: tiny_skia::Color, width: f32, dash: Option<StrokeDash>) {
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color(color);
    let stroke = Stroke { width, dash, ..Stroke::default() };
    pixmap.stroke_path(path, &paint, &stroke, Transform::identity(), None);
}
