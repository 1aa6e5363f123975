//! Tapered outline: pressure-weighted sample points to a closed fill path.
//!
//! The pipeline is:
//!
//! 1. **Streamline** each point towards its predecessor to damp jitter.
//! 2. **Space** the streamlined points, dropping any closer than a tolerance
//!    derived from `smoothing`.
//! 3. **Simulate pressure** from pointer velocity: fast segments thin the nib,
//!    slow ones thicken it.
//! 4. **Offset** each point along its normal by a pressure-dependent radius,
//!    giving a left and a right edge.
//! 5. **Cap** both ends with round caps and join everything into one polygon.
//!
//! [`outline_path`] turns the polygon into a smooth closed path by running
//! quadratic curves through the midpoints of consecutive polygon vertices.
//! The renderer and the halo both use it; the halo simply asks for a larger
//! `size`.

#[cfg(test)]
#[path = "outline_test.rs"]
mod outline_test;

use std::f64::consts::PI;

use tiny_skia::{Path, PathBuilder};

use crate::camera::Point;
use crate::doc::{SamplePoint, StrokeTool};

/// Fraction of the distance to the velocity target that pressure moves per point.
const PRESSURE_EASING: f64 = 0.275;

/// Streamline is capped so the outline never stalls on the first point.
const MAX_STREAMLINE: f64 = 0.95;

/// Smallest radius an outline point may have.
const MIN_RADIUS: f64 = 0.5;

/// Segments in each half-circle end cap.
const CAP_SEGMENTS: u32 = 8;

/// Vertices in the circle emitted when a stroke collapses to one point.
const DOT_SEGMENTS: u32 = 16;

/// Parameters for one outline computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineOptions {
    /// Nib diameter at mid pressure.
    pub size: f64,
    pub thinning: f64,
    pub smoothing: f64,
    pub streamline: f64,
}

impl OutlineOptions {
    /// The tool's preset with an explicit nib size.
    #[must_use]
    pub fn for_tool(tool: StrokeTool, size: f64) -> Self {
        let preset = tool.preset();
        Self { size, thinning: preset.thinning, smoothing: preset.smoothing, streamline: preset.streamline }
    }

    fn radius(&self, pressure: f64) -> f64 {
        (self.size * (0.5 - self.thinning * (0.5 - pressure))).max(MIN_RADIUS)
    }
}

/// Compute the outline polygon of `points`.
///
/// Returns an empty vector for no input. A stroke whose points all collapse
/// onto one location yields a circle.
#[must_use]
pub fn outline_points(points: &[SamplePoint], opts: &OutlineOptions) -> Vec<Point> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let spaced = streamline_and_space(points, opts);
    let size = opts.size.max(f64::EPSILON);

    let mut pressure = first.pressure;
    let mut radii = Vec::with_capacity(spaced.len());
    radii.push(opts.radius(pressure));
    for pair in spaced.windows(2) {
        let target = 1.0 - (pair[0].distance(pair[1]) / size).min(1.0);
        pressure += (target - pressure) * PRESSURE_EASING;
        radii.push(opts.radius(pressure));
    }

    if spaced.len() < 2 {
        return circle(spaced[0], radii[0]);
    }

    let last = spaced.len() - 1;
    let mut left = Vec::with_capacity(spaced.len());
    let mut right = Vec::with_capacity(spaced.len());
    let mut normals = Vec::with_capacity(spaced.len());
    for (i, &p) in spaced.iter().enumerate() {
        let prev = spaced[i.saturating_sub(1)];
        let next = spaced[(i + 1).min(last)];
        let normal = unit_normal(prev, next);
        let r = radii[i];
        left.push(Point::new(p.x + normal.x * r, p.y + normal.y * r));
        right.push(Point::new(p.x - normal.x * r, p.y - normal.y * r));
        normals.push(normal);
    }

    let mut polygon = Vec::with_capacity(left.len() + right.len() + 2 * CAP_SEGMENTS as usize);
    polygon.extend_from_slice(&left);

    // End cap sweeps from the left edge, around the tip, to the right edge.
    let end_angle = normals[last].y.atan2(normals[last].x);
    polygon.extend(arc(spaced[last], radii[last], end_angle, -1.0));

    polygon.extend(right.iter().rev());

    // Start cap sweeps from the right edge, around the tail, back to the left.
    let start_angle = normals[0].y.atan2(normals[0].x) + PI;
    polygon.extend(arc(spaced[0], radii[0], start_angle, -1.0));

    polygon
}

/// Build the closed fill path for `points`, or `None` when there is nothing to fill.
#[must_use]
pub fn outline_path(points: &[SamplePoint], opts: &OutlineOptions) -> Option<Path> {
    polygon_path(&outline_points(points, opts))
}

/// Smooth closed path through a polygon: quadratic curves with the vertices as
/// control points and the midpoints between them as on-curve points.
#[must_use]
pub fn polygon_path(polygon: &[Point]) -> Option<Path> {
    let first = polygon.first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for (i, p) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let mid = p.midpoint(next);
        pb.quad_to(p.x as f32, p.y as f32, mid.x as f32, mid.y as f32);
    }
    pb.close();
    pb.finish()
}

fn streamline_and_space(points: &[SamplePoint], opts: &OutlineOptions) -> Vec<Point> {
    let t = 1.0 - opts.streamline.clamp(0.0, MAX_STREAMLINE);
    let tolerance = opts.size * opts.smoothing.clamp(0.0, 1.0) * 0.1;

    let mut prev = Point::new(points[0].x, points[0].y);
    let mut kept = vec![prev];
    for sample in &points[1..] {
        prev = prev.lerp(Point::new(sample.x, sample.y), t);
        if let Some(&last) = kept.last() {
            if last.distance(prev) > tolerance {
                kept.push(prev);
            }
        }
    }
    let tail = points.last().map_or(prev, |p| Point::new(p.x, p.y));

    // The stroke ends where the pointer did, even inside the tolerance.
    let end = kept.len() - 1;
    if kept[end].distance(tail) > 0.0 {
        if end > 0 {
            kept[end] = tail;
        } else {
            kept.push(tail);
        }
    }
    kept
}

fn unit_normal(from: Point, to: Point) -> Point {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = dx.hypot(dy);
    if len <= f64::EPSILON {
        return Point::new(0.0, 1.0);
    }
    Point::new(-dy / len, dx / len)
}

/// Intermediate points of a half circle around `center`, starting just after
/// `start` radians and stepping in `direction` (±1).
fn arc(center: Point, radius: f64, start: f64, direction: f64) -> impl Iterator<Item = Point> {
    let step = PI / f64::from(CAP_SEGMENTS);
    (1..CAP_SEGMENTS).map(move |k| {
        let angle = start + direction * f64::from(k) * step;
        Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    })
}

fn circle(center: Point, radius: f64) -> Vec<Point> {
    let step = 2.0 * PI / f64::from(DOT_SEGMENTS);
    (0..DOT_SEGMENTS)
        .map(|k| {
            let angle = f64::from(k) * step;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}
