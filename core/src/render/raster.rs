//! Translation of vector shapes into discrete pixels on the screen.
//!
//! Rasterization turns a screen-space primitive, a line segment or a
//! triangle, into a sequence of *fragments* that represent potentially
//! drawn pixels. Each fragment carries its pixel position, its depth, and
//! the *varyings* of the primitive interpolated at that pixel.
//!
//! The fragments are then passed on to be shaded and depth tested. Any
//! fragment outside the given bounding rectangle is never emitted.
//!
//! Screen-space vertex positions are [`Vec3`]s whose x and y components
//! are pixel coordinates and whose z component is the camera-space depth
//! of the vertex.

use core::fmt::{self, Debug, Formatter};
use core::mem::swap;
use core::ops::Range;

use crate::geom::{Edge, Tri, Vertex};
use crate::math::{float::f32 as fp, vary::Vary, vec::Vec3};
use crate::util::rect::Rect;

/// A fragment, or a single "pixel" in a rasterized primitive.
#[derive(Clone, Debug)]
pub struct Frag<V> {
    pub pos: ScreenPt,
    pub var: V,
}

/// Point in screen space.
///
/// `x` and `y` are pixel coordinates, `z` is camera-space depth.
#[derive(Copy, Clone, PartialEq)]
pub struct ScreenPt {
    pub x: usize,
    pub y: usize,
    pub z: f32,
}

/// The eight octants a line direction can fall into.
///
/// Lines are drawn in the first octant, where the slope is between zero
/// and one inclusive, and mapped back to their actual octant on output.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Octant {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

/// Linear interpolation keyed on an integer range of steps.
#[derive(Copy, Clone, Debug)]
struct IntLerp {
    start: i32,
    steps: i32,
    from: f32,
    slope: f32,
}

impl Octant {
    /// Returns the octant of the direction (`dx`, `dy`).
    pub fn of(dx: i32, dy: i32) -> Self {
        use Octant::*;
        match (dx >= 0, dy >= 0, dx.abs() >= dy.abs()) {
            (true, true, true) => First,
            (true, true, false) => Second,
            (false, true, false) => Third,
            (false, true, true) => Fourth,
            (false, false, true) => Fifth,
            (false, false, false) => Sixth,
            (true, false, false) => Seventh,
            (true, false, true) => Eighth,
        }
    }

    /// Maps a point in `self` to the first octant.
    pub fn to_first(self, (x, y): (i32, i32)) -> (i32, i32) {
        use Octant::*;
        match self {
            First => (x, y),
            Second => (y, x),
            Third => (y, -x),
            Fourth => (-x, y),
            Fifth => (-x, -y),
            Sixth => (-y, -x),
            Seventh => (-y, x),
            Eighth => (x, -y),
        }
    }

    /// Maps a point in the first octant back to `self`.
    ///
    /// The inverse of [`to_first`][Self::to_first].
    pub fn from_first(self, (u, v): (i32, i32)) -> (i32, i32) {
        use Octant::*;
        match self {
            First => (u, v),
            Second => (v, u),
            Third => (-v, u),
            Fourth => (-u, v),
            Fifth => (-u, -v),
            Sixth => (-v, -u),
            Seventh => (v, -u),
            Eighth => (u, -v),
        }
    }
}

impl IntLerp {
    fn new(Range { start, end }: Range<i32>, from: f32, to: f32) -> Self {
        let steps = end - start;
        // Guard the degenerate case
        let slope = if steps == 0 {
            0.0
        } else {
            (to - from) / steps as f32
        };
        Self { start, steps, from, slope }
    }

    fn at(&self, i: i32) -> (i32, f32) {
        (self.start + i, self.from + i as f32 * self.slope)
    }
}

/// Rasterizes a line segment using parametric (DDA) stepping.
///
/// Steps one pixel at a time along the major axis, interpolating the minor
/// coordinate, the depth, and the varyings linearly. A zero-length line
/// yields a single fragment.
pub fn line<V, F>(
    Edge([v0, v1]): Edge<Vertex<Vec3, V>>,
    bounds: &Rect,
    mut frag_fn: F,
) where
    V: Vary,
    F: FnMut(Frag<V>),
{
    let (p0, p1) = (round_xy(&v0.pos), round_xy(&v1.pos));
    let oct = Octant::of(p1.0 - p0.0, p1.1 - p0.1);
    let ((x0, y0), (x1, y1)) = (oct.to_first(p0), oct.to_first(p1));

    let ys = IntLerp::new(x0..x1, y0 as f32, y1 as f32);
    let n = ys.steps as u32;
    let vars = (v0.pos.z(), v0.attrib).vary_to(&(v1.pos.z(), v1.attrib), n);

    for (i, (z, var)) in (0..).zip(vars) {
        let (u, v) = ys.at(i);
        let (x, y) = oct.from_first((u, round(v)));
        if let Some((x, y)) = pixel(x, y, bounds) {
            frag_fn(Frag { pos: ScreenPt { x, y, z }, var });
        }
    }
}

/// Rasterizes a line segment using Bresenham's integer algorithm.
///
/// Produces the same pixels as [`line`], but tracks the minor coordinate
/// with an integer error accumulator instead of a fractional slope.
pub fn line_bresenham<V, F>(
    Edge([v0, v1]): Edge<Vertex<Vec3, V>>,
    bounds: &Rect,
    mut frag_fn: F,
) where
    V: Vary,
    F: FnMut(Frag<V>),
{
    let (p0, p1) = (round_xy(&v0.pos), round_xy(&v1.pos));
    let oct = Octant::of(p1.0 - p0.0, p1.1 - p0.1);
    let ((x0, y0), (x1, y1)) = (oct.to_first(p0), oct.to_first(p1));

    let (dx, dy) = (x1 - x0, y1 - y0);
    let (a0, a1) = ((v0.pos.z(), v0.attrib), (v1.pos.z(), v1.attrib));
    let vars = a0.vary_to(&a1, dx as u32);

    let mut err = 2 * dy - dx;
    let mut v = y0;
    for (u, (z, var)) in (x0..=x1).zip(vars) {
        let (x, y) = oct.from_first((u, v));
        if let Some((x, y)) = pixel(x, y, bounds) {
            frag_fn(Frag { pos: ScreenPt { x, y, z }, var });
        }
        if err >= 0 {
            v += 1;
            err -= 2 * dx;
        }
        err += 2 * dy;
    }
}

/// Rasterizes an anti-aliased line segment using Xiaolin Wu's algorithm.
///
/// Each step along the major axis covers two pixels on the minor axis;
/// `frag_fn` receives every fragment together with its coverage, a value
/// in (0, 1] to be used as the opacity of the fragment. Fragments with no
/// coverage are not emitted.
pub fn line_smooth<V, F>(
    Edge([v0, v1]): Edge<Vertex<Vec3, V>>,
    bounds: &Rect,
    mut frag_fn: F,
) where
    V: Vary,
    F: FnMut(Frag<V>, f32),
{
    let [mut x0, mut y0, z0] = v0.pos.0;
    let [mut x1, mut y1, z1] = v1.pos.0;
    let (mut a0, mut a1) = ((z0, v0.attrib), (z1, v1.attrib));

    let steep = fp::abs(y1 - y0) > fp::abs(x1 - x0);
    if steep {
        swap(&mut x0, &mut y0);
        swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        swap(&mut x0, &mut x1);
        swap(&mut y0, &mut y1);
        swap(&mut a0, &mut a1);
    }
    let dx = x1 - x0;
    let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

    let mut plot = |u: i32, v: i32, cov: f32, t: f32| {
        let (x, y) = if steep { (v, u) } else { (u, v) };
        if cov <= 0.0 {
            return;
        }
        if let Some((x, y)) = pixel(x, y, bounds) {
            let (z, var) = a0.lerp(&a1, t);
            frag_fn(Frag { pos: ScreenPt { x, y, z }, var }, cov);
        }
    };

    // First endpoint
    let xend = fp::floor(x0 + 0.5);
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let (u0, v) = (xend as i32, fp::floor(yend) as i32);
    plot(u0, v, rfpart(yend) * xgap, 0.0);
    plot(u0, v + 1, fpart(yend) * xgap, 0.0);
    let mut intery = yend + gradient;

    // Second endpoint
    let xend = fp::floor(x1 + 0.5);
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let (u1, v) = (xend as i32, fp::floor(yend) as i32);
    plot(u1, v, rfpart(yend) * xgap, 1.0);
    plot(u1, v + 1, fpart(yend) * xgap, 1.0);

    let n = (u1 - u0) as f32;
    for u in u0 + 1..u1 {
        let t = (u - u0) as f32 / n;
        let v = fp::floor(intery) as i32;
        plot(u, v, rfpart(intery), t);
        plot(u, v + 1, fpart(intery), t);
        intery += gradient;
    }
}

/// Rasterizes a filled triangle.
///
/// Every pixel center within the bounding box of the triangle is tested
/// against the three edge functions of the triangle, and a fragment is
/// emitted for each pixel on the inside or on an edge. Both windings are
/// accepted. Zero-area triangles produce no fragments.
///
/// Depth is interpolated perspective-correctly, as the reciprocal of the
/// interpolated reciprocal depths. The varyings are interpolated with the
/// plain barycentric weights, without perspective correction.
pub fn tri_fill<V, F>(
    Tri([v0, v1, v2]): Tri<Vertex<Vec3, V>>,
    bounds: &Rect,
    mut frag_fn: F,
) where
    V: Vary,
    F: FnMut(Frag<V>),
{
    let [p0, p1, p2] = [&v0.pos, &v1.pos, &v2.pos];

    let area = edge(p0, p1, p2.x(), p2.y());
    if area == 0.0 {
        return;
    }
    let (min_x, max_x) = min_max([p0.x(), p1.x(), p2.x()]);
    let (min_y, max_y) = min_max([p0.y(), p1.y(), p2.y()]);
    let xs = span(min_x, max_x, bounds.xs());
    let ys = span(min_y, max_y, bounds.ys());

    let attribs = [&v0.attrib, &v1.attrib, &v2.attrib];
    for y in ys {
        for x in xs.clone() {
            let (px, py) = (x as f32, y as f32);
            let ws = [
                edge(p1, p2, px, py) / area,
                edge(p2, p0, px, py) / area,
                edge(p0, p1, px, py) / area,
            ];
            if ws.iter().any(|&w| w < 0.0) {
                continue;
            }
            let z = 1.0 / (ws[0] / p0.z() + ws[1] / p1.z() + ws[2] / p2.z());
            let var = V::weighted(attribs, ws);
            frag_fn(Frag { pos: ScreenPt { x, y, z }, var });
        }
    }
}

/// Sorts the vertices of a polygon by their polar angle around the
/// centroid of their screen-space positions.
///
/// The result is a consistent boundary loop for any convex polygon,
/// whatever the order in which its vertices were given.
pub fn sort_polar<V>(verts: &mut [Vertex<Vec3, V>]) {
    if verts.is_empty() {
        return;
    }
    let n = verts.len() as f32;
    let (cx, cy) = verts
        .iter()
        .fold((0.0, 0.0), |(x, y), v| (x + v.pos.x(), y + v.pos.y()));
    let (cx, cy) = (cx / n, cy / n);

    let angle =
        |v: &Vertex<Vec3, V>| fp::atan2(v.pos.y() - cy, v.pos.x() - cx);
    verts.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
}

/// Returns the triangle fan of a polygon: `(v0, vi, vi+1)` for each i
/// in 1..n-1. Yields nothing if there are fewer than three vertices.
pub fn fan<V: Clone>(verts: &[V]) -> impl Iterator<Item = Tri<V>> + '_ {
    verts
        .windows(2)
        .skip(1)
        .map(|w| Tri([verts[0].clone(), w[0].clone(), w[1].clone()]))
}

/// Returns the boundary edges of a closed polygon loop.
///
/// Two vertices make a single edge; fewer make none.
pub fn edges<V: Clone>(verts: &[V]) -> impl Iterator<Item = Edge<V>> + '_ {
    let n = verts.len();
    let count = if n > 2 { n } else { n.saturating_sub(1) };
    (0..count)
        .map(move |i| Edge([verts[i].clone(), verts[(i + 1) % n].clone()]))
}

fn edge(a: &Vec3, b: &Vec3, px: f32, py: f32) -> f32 {
    (px - a.x()) * (b.y() - a.y()) - (py - a.y()) * (b.x() - a.x())
}

fn min_max([a, b, c]: [f32; 3]) -> (f32, f32) {
    (a.min(b).min(c), a.max(b).max(c))
}

/// Returns the pixels from `floor(min)` to `ceil(max)` inclusive, clamped
/// to `bounds`.
fn span(min: f32, max: f32, bounds: Range<usize>) -> Range<usize> {
    let lo = fp::floor(min).max(bounds.start as f32);
    let hi = (fp::ceil(max) + 1.0).min(bounds.end as f32);
    if hi > lo { lo as usize..hi as usize } else { 0..0 }
}

fn pixel(x: i32, y: i32, bounds: &Rect) -> Option<(usize, usize)> {
    let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
    bounds.contains(x, y).then_some((x, y))
}

fn round(x: f32) -> i32 {
    fp::floor(x + 0.5) as i32
}

fn round_xy(p: &Vec3) -> (i32, i32) {
    (round(p.x()), round(p.y()))
}

fn fpart(x: f32) -> f32 {
    x - fp::floor(x)
}

fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

impl Debug for ScreenPt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ScreenPt({}, {}, z={:?})", self.x, self.y, self.z)
    }
}
