//! Drawing context handed to routines as their first argument.
//!
//! A Canvas-2D-like subset over a tiny-skia pixmap: fill and stroke styles,
//! a save/restore stack, an affine transform, path building, rectangles and
//! bitmap-font text. Path points are mapped through the transform current
//! at the time they are added, as in Canvas 2D.
//!
//! The context is a cheap handle (`Rc<RefCell<_>>`): the script engine
//! clones it into the call and the player takes the surface back afterwards
//! with [`DrawContext::finish`].

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::cell::RefCell;
use std::f64::consts::{PI, TAU};
use std::rc::Rc;

use canvas::color::{Rgba, parse_color};
use canvas::surface::Surface;
use canvas::text::draw_text;
use rhai::{Dynamic, Engine, EvalAltResult, ImmutableString};
use tiny_skia::{BlendMode, FillRule, Paint, Path, PathBuilder, Stroke, Transform};

/// Arc segments per full turn.
const ARC_SEGMENTS_PER_TURN: f64 = 64.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContextError {
    #[error("{method}: argument is not a number")]
    NotANumber { method: &'static str },

    #[error("{method}: non-finite argument")]
    NonFinite { method: &'static str },

    #[error("arc: negative radius {0}")]
    NegativeRadius(f64),

    #[error("drawing context already finished")]
    Finished,

    #[error("drawing context is busy")]
    Busy,
}

#[derive(Debug, Clone)]
struct Style {
    fill_style: String,
    fill: Rgba,
    stroke_style: String,
    stroke: Rgba,
    line_width: f64,
    global_alpha: f64,
    font_size: f64,
    transform: Transform,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill_style: "#000000".to_owned(),
            fill: Rgba::BLACK,
            stroke_style: "#000000".to_owned(),
            stroke: Rgba::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
            font_size: 10.0,
            transform: Transform::identity(),
        }
    }
}

/// Path segment in device space.
#[derive(Debug, Clone, Copy)]
enum Segment {
    Move(f32, f32),
    Line(f32, f32),
    Quad(f32, f32, f32, f32),
    Cubic(f32, f32, f32, f32, f32, f32),
    Close,
}

struct CanvasState {
    surface: Option<Surface>,
    style: Style,
    saved: Vec<Style>,
    path: Vec<Segment>,
    current: Option<(f32, f32)>,
    subpath_start: (f32, f32),
}

impl CanvasState {
    fn map(&self, x: f64, y: f64) -> (f32, f32) {
        let t = self.style.transform;
        let (x, y) = (x as f32, y as f32);
        (t.sx * x + t.kx * y + t.tx, t.ky * x + t.sy * y + t.ty)
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.map(x, y);
        self.path.push(Segment::Move(p.0, p.1));
        self.current = Some(p);
        self.subpath_start = p;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(x, y);
            return;
        }
        let p = self.map(x, y);
        self.path.push(Segment::Line(p.0, p.1));
        self.current = Some(p);
    }

    fn ensure_subpath(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(x, y);
        }
    }

    /// Uniform scale of the current transform, for stroke widths.
    fn scale(&self) -> f32 {
        let t = self.style.transform;
        (t.sx * t.sy - t.kx * t.ky).abs().sqrt()
    }

    fn polygon(&self, corners: &[(f64, f64)]) -> Option<Path> {
        let mut pb = PathBuilder::new();
        for (i, &(x, y)) in corners.iter().enumerate() {
            let (px, py) = self.map(x, y);
            if i == 0 { pb.move_to(px, py) } else { pb.line_to(px, py) }
        }
        pb.close();
        pb.finish()
    }

    fn fill_paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(self.style.fill.to_skia(self.style.global_alpha as f32));
        paint
    }

    fn stroke_paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(self.style.stroke.to_skia(self.style.global_alpha as f32));
        paint
    }

    fn line_stroke(&self) -> Stroke {
        Stroke { width: self.style.line_width as f32 * self.scale(), ..Stroke::default() }
    }
}

fn build_path(segments: &[Segment]) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for segment in segments {
        match *segment {
            Segment::Move(x, y) => pb.move_to(x, y),
            Segment::Line(x, y) => pb.line_to(x, y),
            Segment::Quad(x1, y1, x, y) => pb.quad_to(x1, y1, x, y),
            Segment::Cubic(x1, y1, x2, y2, x, y) => pb.cubic_to(x1, y1, x2, y2, x, y),
            Segment::Close => pb.close(),
        }
    }
    pb.finish()
}

fn finite(method: &'static str, values: &[f64]) -> Result<(), ContextError> {
    if values.iter().all(|v| v.is_finite()) { Ok(()) } else { Err(ContextError::NonFinite { method }) }
}

/// Signed sweep of a Canvas 2D arc from `start` to `end`.
fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if anticlockwise {
        if start - end >= TAU { -TAU } else { -(start - end).rem_euclid(TAU) }
    } else if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}

/// Script-facing drawing context.
#[derive(Clone)]
pub struct DrawContext(Rc<RefCell<CanvasState>>);

impl DrawContext {
    /// Wrap `surface`; all drawing lands on it until [`DrawContext::finish`].
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self(Rc::new(RefCell::new(CanvasState {
            surface: Some(surface),
            style: Style::default(),
            saved: Vec::new(),
            path: Vec::new(),
            current: None,
            subpath_start: (0.0, 0.0),
        })))
    }

    /// Take the surface back. Later drawing calls fail with [`ContextError::Finished`].
    #[must_use]
    pub fn finish(&self) -> Option<Surface> {
        match self.0.try_borrow_mut() {
            Ok(mut state) => state.surface.take(),
            Err(_) => None,
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut CanvasState) -> T) -> Result<T, ContextError> {
        let mut state = self.0.try_borrow_mut().map_err(|_| ContextError::Busy)?;
        Ok(f(&mut *state))
    }

    /// Run `f` against the state and its surface.
    fn paint(&self, f: impl FnOnce(&CanvasState, &mut Surface)) -> Result<(), ContextError> {
        let mut state = self.0.try_borrow_mut().map_err(|_| ContextError::Busy)?;
        let mut surface = state.surface.take().ok_or(ContextError::Finished)?;
        f(&*state, &mut surface);
        state.surface = Some(surface);
        Ok(())
    }

    // --- Style properties ---

    #[must_use]
    pub fn fill_style(&self) -> String {
        self.with(|s| s.style.fill_style.clone()).unwrap_or_default()
    }

    /// Set the fill color. Strings that are not colors are ignored.
    pub fn set_fill_style(&self, raw: &str) -> Result<(), ContextError> {
        let Some(color) = parse_color(raw) else {
            return Ok(());
        };
        self.with(|s| {
            s.style.fill_style = raw.to_owned();
            s.style.fill = color;
        })
    }

    #[must_use]
    pub fn stroke_style(&self) -> String {
        self.with(|s| s.style.stroke_style.clone()).unwrap_or_default()
    }

    pub fn set_stroke_style(&self, raw: &str) -> Result<(), ContextError> {
        let Some(color) = parse_color(raw) else {
            return Ok(());
        };
        self.with(|s| {
            s.style.stroke_style = raw.to_owned();
            s.style.stroke = color;
        })
    }

    #[must_use]
    pub fn line_width(&self) -> f64 {
        self.with(|s| s.style.line_width).unwrap_or(0.0)
    }

    /// Zero, negative and non-finite widths are ignored.
    pub fn set_line_width(&self, width: f64) -> Result<(), ContextError> {
        if !(width.is_finite() && width > 0.0) {
            return Ok(());
        }
        self.with(|s| s.style.line_width = width)
    }

    #[must_use]
    pub fn global_alpha(&self) -> f64 {
        self.with(|s| s.style.global_alpha).unwrap_or(0.0)
    }

    /// Values outside `[0, 1]` are ignored.
    pub fn set_global_alpha(&self, alpha: f64) -> Result<(), ContextError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Ok(());
        }
        self.with(|s| s.style.global_alpha = alpha)
    }

    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.with(|s| s.style.font_size).unwrap_or(0.0)
    }

    pub fn set_font_size(&self, size: f64) -> Result<(), ContextError> {
        if !(size.is_finite() && size > 0.0) {
            return Ok(());
        }
        self.with(|s| s.style.font_size = size)
    }

    // --- State stack and transform ---

    pub fn save(&self) -> Result<(), ContextError> {
        self.with(|s| {
            let style = s.style.clone();
            s.saved.push(style);
        })
    }

    /// Pop the last saved style. No-op on an empty stack.
    pub fn restore(&self) -> Result<(), ContextError> {
        self.with(|s| {
            if let Some(style) = s.saved.pop() {
                s.style = style;
            }
        })
    }

    pub fn translate(&self, x: f64, y: f64) -> Result<(), ContextError> {
        finite("translate", &[x, y])?;
        self.with(|s| s.style.transform = s.style.transform.pre_translate(x as f32, y as f32))
    }

    /// Rotate by `angle` radians, clockwise on screen.
    pub fn rotate(&self, angle: f64) -> Result<(), ContextError> {
        finite("rotate", &[angle])?;
        self.with(|s| {
            s.style.transform = s.style.transform.pre_concat(Transform::from_rotate(angle.to_degrees() as f32));
        })
    }

    pub fn scale(&self, x: f64, y: f64) -> Result<(), ContextError> {
        finite("scale", &[x, y])?;
        self.with(|s| s.style.transform = s.style.transform.pre_scale(x as f32, y as f32))
    }

    pub fn reset_transform(&self) -> Result<(), ContextError> {
        self.with(|s| s.style.transform = Transform::identity())
    }

    // --- Path building ---

    pub fn begin_path(&self) -> Result<(), ContextError> {
        self.with(|s| {
            s.path.clear();
            s.current = None;
        })
    }

    pub fn close_path(&self) -> Result<(), ContextError> {
        self.with(|s| {
            if s.current.is_some() {
                s.path.push(Segment::Close);
                s.current = Some(s.subpath_start);
            }
        })
    }

    pub fn move_to(&self, x: f64, y: f64) -> Result<(), ContextError> {
        finite("move_to", &[x, y])?;
        self.with(|s| s.move_to(x, y))
    }

    pub fn line_to(&self, x: f64, y: f64) -> Result<(), ContextError> {
        finite("line_to", &[x, y])?;
        self.with(|s| s.line_to(x, y))
    }

    pub fn quadratic_curve_to(&self, cx: f64, cy: f64, x: f64, y: f64) -> Result<(), ContextError> {
        finite("quadratic_curve_to", &[cx, cy, x, y])?;
        self.with(|s| {
            s.ensure_subpath(cx, cy);
            let (c, p) = (s.map(cx, cy), s.map(x, y));
            s.path.push(Segment::Quad(c.0, c.1, p.0, p.1));
            s.current = Some(p);
        })
    }

    pub fn bezier_curve_to(&self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Result<(), ContextError> {
        finite("bezier_curve_to", &[c1x, c1y, c2x, c2y, x, y])?;
        self.with(|s| {
            s.ensure_subpath(c1x, c1y);
            let (c1, c2, p) = (s.map(c1x, c1y), s.map(c2x, c2y), s.map(x, y));
            s.path.push(Segment::Cubic(c1.0, c1.1, c2.0, c2.1, p.0, p.1));
            s.current = Some(p);
        })
    }

    /// Circular arc around `(x, y)`, joined to the current point by a line.
    pub fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) -> Result<(), ContextError> {
        finite("arc", &[x, y, radius, start, end])?;
        if radius < 0.0 {
            return Err(ContextError::NegativeRadius(radius));
        }
        let sweep = arc_sweep(start, end, anticlockwise);
        let steps = (sweep.abs() / TAU * ARC_SEGMENTS_PER_TURN).ceil().max(1.0) as u32;
        self.with(|s| {
            let (sx, sy) = (x + radius * start.cos(), y + radius * start.sin());
            if s.current.is_some() { s.line_to(sx, sy) } else { s.move_to(sx, sy) }
            for i in 1..=steps {
                let angle = start + sweep * f64::from(i) / f64::from(steps);
                s.line_to(x + radius * angle.cos(), y + radius * angle.sin());
            }
        })
    }

    /// Closed rectangle subpath; the current point becomes `(x, y)`.
    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> Result<(), ContextError> {
        finite("rect", &[x, y, w, h])?;
        self.with(|s| {
            s.move_to(x, y);
            s.line_to(x + w, y);
            s.line_to(x + w, y + h);
            s.line_to(x, y + h);
            s.path.push(Segment::Close);
            s.current = Some(s.subpath_start);
        })
    }

    // --- Painting ---

    /// Fill the current path (nonzero winding).
    pub fn fill(&self) -> Result<(), ContextError> {
        self.paint(|s, surface| {
            if let Some(path) = build_path(&s.path) {
                surface.pixmap_mut().fill_path(&path, &s.fill_paint(), FillRule::Winding, Transform::identity(), None);
            }
        })
    }

    pub fn stroke(&self) -> Result<(), ContextError> {
        self.paint(|s, surface| {
            if let Some(path) = build_path(&s.path) {
                surface.pixmap_mut().stroke_path(&path, &s.stroke_paint(), &s.line_stroke(), Transform::identity(), None);
            }
        })
    }

    pub fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) -> Result<(), ContextError> {
        finite("fill_rect", &[x, y, w, h])?;
        self.paint(|s, surface| {
            if let Some(path) = s.polygon(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)]) {
                surface.pixmap_mut().fill_path(&path, &s.fill_paint(), FillRule::Winding, Transform::identity(), None);
            }
        })
    }

    pub fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) -> Result<(), ContextError> {
        finite("stroke_rect", &[x, y, w, h])?;
        self.paint(|s, surface| {
            if let Some(path) = s.polygon(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)]) {
                surface.pixmap_mut().stroke_path(&path, &s.stroke_paint(), &s.line_stroke(), Transform::identity(), None);
            }
        })
    }

    /// Make the rectangle fully transparent.
    pub fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) -> Result<(), ContextError> {
        finite("clear_rect", &[x, y, w, h])?;
        self.paint(|s, surface| {
            if let Some(path) = s.polygon(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)]) {
                let mut paint = Paint::default();
                paint.blend_mode = BlendMode::Clear;
                surface.pixmap_mut().fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        })
    }

    /// Draw `text` with its top-left corner at `(x, y)` in the fill style.
    pub fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), ContextError> {
        finite("fill_text", &[x, y])?;
        self.paint(|s, surface| {
            let transform = s.style.transform;
            draw_text(surface.pixmap_mut(), text, x, y, s.style.font_size, &s.fill_paint(), transform);
        })
    }
}

// =============================================================================
// SCRIPT REGISTRATION
// =============================================================================

fn number(method: &'static str, value: &Dynamic) -> Result<f64, Box<EvalAltResult>> {
    if let Ok(f) = value.as_float() {
        return Ok(f);
    }
    match value.as_int() {
        Ok(i) => Ok(i as f64),
        Err(_) => Err(ContextError::NotANumber { method }.to_string().into()),
    }
}

fn numbers<const N: usize>(method: &'static str, values: [&Dynamic; N]) -> Result<[f64; N], Box<EvalAltResult>> {
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = number(method, value)?;
    }
    Ok(out)
}

fn script(result: Result<(), ContextError>) -> Result<(), Box<EvalAltResult>> {
    result.map_err(|e| e.to_string().into())
}

/// Ignore property assignments of the wrong type, as Canvas 2D does.
fn assign(value: &Dynamic, set: impl FnOnce(f64) -> Result<(), ContextError>) -> Result<(), Box<EvalAltResult>> {
    match number("property", value) {
        Ok(v) => script(set(v)),
        Err(_) => Ok(()),
    }
}

/// Register [`DrawContext`] and its properties and methods on `engine`.
#[allow(clippy::too_many_lines)]
pub fn register(engine: &mut Engine) {
    engine.register_type_with_name::<DrawContext>("DrawContext");

    engine
        .register_get("fill_style", |c: &mut DrawContext| ImmutableString::from(c.fill_style()))
        .register_set("fill_style", |c: &mut DrawContext, v: ImmutableString| script(c.set_fill_style(&v)))
        .register_get("stroke_style", |c: &mut DrawContext| ImmutableString::from(c.stroke_style()))
        .register_set("stroke_style", |c: &mut DrawContext, v: ImmutableString| script(c.set_stroke_style(&v)))
        .register_get("line_width", |c: &mut DrawContext| c.line_width())
        .register_set("line_width", |c: &mut DrawContext, v: Dynamic| assign(&v, |w| c.set_line_width(w)))
        .register_get("global_alpha", |c: &mut DrawContext| c.global_alpha())
        .register_set("global_alpha", |c: &mut DrawContext, v: Dynamic| assign(&v, |a| c.set_global_alpha(a)))
        .register_get("font_size", |c: &mut DrawContext| c.font_size())
        .register_set("font_size", |c: &mut DrawContext, v: Dynamic| assign(&v, |f| c.set_font_size(f)));

    engine
        .register_fn("save", |c: &mut DrawContext| script(c.save()))
        .register_fn("restore", |c: &mut DrawContext| script(c.restore()))
        .register_fn("begin_path", |c: &mut DrawContext| script(c.begin_path()))
        .register_fn("close_path", |c: &mut DrawContext| script(c.close_path()))
        .register_fn("fill", |c: &mut DrawContext| script(c.fill()))
        .register_fn("stroke", |c: &mut DrawContext| script(c.stroke()))
        .register_fn("reset_transform", |c: &mut DrawContext| script(c.reset_transform()));

    engine
        .register_fn("translate", |c: &mut DrawContext, x: Dynamic, y: Dynamic| {
            let [x, y] = numbers("translate", [&x, &y])?;
            script(c.translate(x, y))
        })
        .register_fn("rotate", |c: &mut DrawContext, a: Dynamic| {
            let [a] = numbers("rotate", [&a])?;
            script(c.rotate(a))
        })
        .register_fn("scale", |c: &mut DrawContext, x: Dynamic, y: Dynamic| {
            let [x, y] = numbers("scale", [&x, &y])?;
            script(c.scale(x, y))
        })
        .register_fn("move_to", |c: &mut DrawContext, x: Dynamic, y: Dynamic| {
            let [x, y] = numbers("move_to", [&x, &y])?;
            script(c.move_to(x, y))
        })
        .register_fn("line_to", |c: &mut DrawContext, x: Dynamic, y: Dynamic| {
            let [x, y] = numbers("line_to", [&x, &y])?;
            script(c.line_to(x, y))
        })
        .register_fn(
            "quadratic_curve_to",
            |c: &mut DrawContext, cx: Dynamic, cy: Dynamic, x: Dynamic, y: Dynamic| {
                let [cx, cy, x, y] = numbers("quadratic_curve_to", [&cx, &cy, &x, &y])?;
                script(c.quadratic_curve_to(cx, cy, x, y))
            },
        )
        .register_fn(
            "bezier_curve_to",
            |c: &mut DrawContext, c1x: Dynamic, c1y: Dynamic, c2x: Dynamic, c2y: Dynamic, x: Dynamic, y: Dynamic| {
                let [c1x, c1y, c2x, c2y, x, y] = numbers("bezier_curve_to", [&c1x, &c1y, &c2x, &c2y, &x, &y])?;
                script(c.bezier_curve_to(c1x, c1y, c2x, c2y, x, y))
            },
        )
        .register_fn(
            "arc",
            |c: &mut DrawContext, x: Dynamic, y: Dynamic, r: Dynamic, start: Dynamic, end: Dynamic| {
                let [x, y, r, start, end] = numbers("arc", [&x, &y, &r, &start, &end])?;
                script(c.arc(x, y, r, start, end, false))
            },
        )
        .register_fn(
            "arc",
            |c: &mut DrawContext, x: Dynamic, y: Dynamic, r: Dynamic, start: Dynamic, end: Dynamic, ccw: bool| {
                let [x, y, r, start, end] = numbers("arc", [&x, &y, &r, &start, &end])?;
                script(c.arc(x, y, r, start, end, ccw))
            },
        );

    engine
        .register_fn("rect", |c: &mut DrawContext, x: Dynamic, y: Dynamic, w: Dynamic, h: Dynamic| {
            let [x, y, w, h] = numbers("rect", [&x, &y, &w, &h])?;
            script(c.rect(x, y, w, h))
        })
        .register_fn("fill_rect", |c: &mut DrawContext, x: Dynamic, y: Dynamic, w: Dynamic, h: Dynamic| {
            let [x, y, w, h] = numbers("fill_rect", [&x, &y, &w, &h])?;
            script(c.fill_rect(x, y, w, h))
        })
        .register_fn("stroke_rect", |c: &mut DrawContext, x: Dynamic, y: Dynamic, w: Dynamic, h: Dynamic| {
            let [x, y, w, h] = numbers("stroke_rect", [&x, &y, &w, &h])?;
            script(c.stroke_rect(x, y, w, h))
        })
        .register_fn("clear_rect", |c: &mut DrawContext, x: Dynamic, y: Dynamic, w: Dynamic, h: Dynamic| {
            let [x, y, w, h] = numbers("clear_rect", [&x, &y, &w, &h])?;
            script(c.clear_rect(x, y, w, h))
        })
        .register_fn("fill_text", |c: &mut DrawContext, text: ImmutableString, x: Dynamic, y: Dynamic| {
            let [x, y] = numbers("fill_text", [&x, &y])?;
            script(c.fill_text(&text, x, y))
        });

    // Radian helpers routines tend to reach for.
    engine.register_fn("TAU", || TAU).register_fn("HALF_PI", || PI / 2.0);
}
