//! Human-readable stroke summary sent alongside a generation request.

#[cfg(test)]
#[path = "summary_test.rs"]
mod summary_test;

use crate::doc::CompletedStroke;

/// Describe `strokes` one line each, in paint order.
#[must_use]
pub fn summarize(strokes: &[CompletedStroke]) -> String {
    if strokes.is_empty() {
        return "Canvas is empty.".to_owned();
    }
    let mut out = format!("Canvas elements ({} total):", strokes.len());
    for (i, stroke) in strokes.iter().enumerate() {
        out.push('\n');
        out.push_str(&describe(i, stroke));
    }
    out
}

fn describe(i: usize, stroke: &CompletedStroke) -> String {
    match stroke {
        CompletedStroke::Text(t) => {
            format!("[{i}] Text \"{}\" at ({},{}) fontSize:{}px color:{}", t.text, t.x, t.y, t.font_size, t.color)
        }
        CompletedStroke::Freehand(f) if f.points.is_empty() => format!("[{i}] Empty stroke"),
        CompletedStroke::Freehand(f) => {
            let (mut x1, mut y1, mut x2, mut y2) = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
            for p in &f.points {
                x1 = x1.min(p.x);
                y1 = y1.min(p.y);
                x2 = x2.max(p.x);
                y2 = y2.max(p.y);
            }
            format!(
                "[{i}] {} stroke bbox:({},{})-({},{}) center:({},{}) color:{}",
                f.tool.as_str(),
                round_half_up(x1),
                round_half_up(y1),
                round_half_up(x2),
                round_half_up(y2),
                round_half_up((x1 + x2) / 2.0),
                round_half_up((y1 + y2) / 2.0),
                f.color,
            )
        }
    }
}

/// Round to the nearest integer with halves going up, so `-2.5` becomes `-2`.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}
