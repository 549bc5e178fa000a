//! Straight-edged shapes. Every closed outline is emitted as one continuous
//! loop (corners once), so the outer ring is simply `0..n`.

use std::f64::consts::PI;

use super::{check_at_least, check_finite, check_positive, connect_edges, segment_points};
use crate::calc::{Point, Rotate};
use crate::error::{GeomError, Result};
use crate::gem::{Rings, Shape};

/// Closed polygon through the given vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Shape for Polygon {
    fn kind(&self) -> &'static str {
        "Polygon"
    }
    fn validate(&self) -> Result<()> {
        check_at_least("Polygon", "vertices", self.vertices.len(), 3)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        Ok(self.vertices.clone())
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("num_vertex", self.vertices.len() as f64)]
    }
}

/// How a [`Segment`] is specified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentSpec {
    /// Centred at the origin, `length` long, at `slope` radians.
    LengthSlope { length: f64, slope: f64 },
    /// Between two end points.
    EndPoints(Point, Point),
}

/// Bounded straight line sampled with `num_dot` points (open, non-planar).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub num_dot: usize,
    pub spec: SegmentSpec,
}

impl Segment {
    pub fn with_slope(num_dot: usize, length: f64, slope: f64) -> Self {
        Self {
            num_dot,
            spec: SegmentSpec::LengthSlope { length, slope },
        }
    }

    pub fn between(num_dot: usize, p1: Point, p2: Point) -> Self {
        Self {
            num_dot,
            spec: SegmentSpec::EndPoints(p1, p2),
        }
    }
}

impl Shape for Segment {
    fn kind(&self) -> &'static str {
        "Segment"
    }
    fn validate(&self) -> Result<()> {
        check_at_least("Segment", "num_dot", self.num_dot, 2)?;
        match self.spec {
            SegmentSpec::LengthSlope { length, slope } => {
                check_positive("Segment", "length", length)?;
                check_finite("Segment", "slope", slope)
            }
            SegmentSpec::EndPoints(p1, p2) => {
                if p1 == p2 {
                    return Err(GeomError::constraint(
                        "Segment",
                        "p2",
                        "must differ from p1",
                    ));
                }
                Ok(())
            }
        }
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        Ok(match self.spec {
            SegmentSpec::LengthSlope { length, slope } => {
                let half = Point::new(slope.cos(), slope.sin()) * (length / 2.0);
                segment_points(-half, half, self.num_dot)
            }
            SegmentSpec::EndPoints(p1, p2) => segment_points(p1, p2, self.num_dot),
        })
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        let mut out = vec![("num_dot", self.num_dot as f64)];
        match self.spec {
            SegmentSpec::LengthSlope { length, slope } => {
                out.extend([("length", length), ("slope", slope)])
            }
            SegmentSpec::EndPoints(p1, p2) => {
                out.extend([("x1", p1.x), ("y1", p1.y), ("x2", p2.x), ("y2", p2.y)])
            }
        }
        out
    }
}

/// Equal sides of length `size`, `num_dot` dots per side (corners shared),
/// bottom side horizontal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegularPolygon {
    pub size: f64,
    pub num_dot: usize,
    pub num_vertex: usize,
}

impl Shape for RegularPolygon {
    fn kind(&self) -> &'static str {
        "RegularPolygon"
    }
    fn validate(&self) -> Result<()> {
        check_positive("RegularPolygon", "size", self.size)?;
        check_at_least("RegularPolygon", "num_vertex", self.num_vertex, 3)?;
        check_at_least("RegularPolygon", "num_dot", self.num_dot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let n = self.num_vertex as f64;
        let apothem = self.size / (2.0 * (PI / n).tan());
        let bottom = segment_points(
            Point::new(-self.size / 2.0, -apothem),
            Point::new(self.size / 2.0, -apothem),
            self.num_dot,
        );
        let edge = &bottom[..bottom.len() - 1];
        Ok((0..self.num_vertex)
            .flat_map(|v| edge.rotated(2.0 * PI * v as f64 / n))
            .collect())
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("size", self.size),
            ("num_dot", self.num_dot as f64),
            ("num_vertex", self.num_vertex as f64),
        ]
    }
}

/// Axis-aligned rectangle centred at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub height: f64,
    pub width: f64,
    /// Dots per horizontal side.
    pub num_xdot: usize,
    /// Dots per vertical side.
    pub num_ydot: usize,
}

impl Rectangle {
    pub fn new(height: f64, width: f64, num_dot: usize) -> Self {
        Self {
            height,
            width,
            num_xdot: num_dot,
            num_ydot: num_dot,
        }
    }
}

impl Shape for Rectangle {
    fn kind(&self) -> &'static str {
        "Rectangle"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Rectangle", "height", self.height)?;
        check_positive("Rectangle", "width", self.width)?;
        check_at_least("Rectangle", "num_xdot", self.num_xdot, 2)?;
        check_at_least("Rectangle", "num_ydot", self.num_ydot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let (w, h) = (self.width / 2.0, self.height / 2.0);
        let (tl, tr) = (Point::new(-w, h), Point::new(w, h));
        let (br, bl) = (Point::new(w, -h), Point::new(-w, -h));
        Ok(connect_edges(&[
            segment_points(tl, tr, self.num_xdot),
            segment_points(tr, br, self.num_ydot),
            segment_points(br, bl, self.num_xdot),
            segment_points(bl, tl, self.num_ydot),
        ]))
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("height", self.height),
            ("width", self.width),
            ("num_xdot", self.num_xdot as f64),
            ("num_ydot", self.num_ydot as f64),
        ]
    }
}

/// Rhombus with axis-aligned diagonals of length `height` and `width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rhombus {
    pub height: f64,
    pub width: f64,
    pub num_dot: usize,
}

impl Shape for Rhombus {
    fn kind(&self) -> &'static str {
        "Rhombus"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Rhombus", "height", self.height)?;
        check_positive("Rhombus", "width", self.width)?;
        check_at_least("Rhombus", "num_dot", self.num_dot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let (w, h) = (self.width / 2.0, self.height / 2.0);
        let (t, r) = (Point::new(0.0, h), Point::new(w, 0.0));
        let (b, l) = (Point::new(0.0, -h), Point::new(-w, 0.0));
        let n = self.num_dot;
        Ok(connect_edges(&[
            segment_points(t, r, n),
            segment_points(r, b, n),
            segment_points(b, l, n),
            segment_points(l, t, n),
        ]))
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("height", self.height),
            ("width", self.width),
            ("num_dot", self.num_dot as f64),
        ]
    }
}

/// Horizontal sides of length `width`, slanted sides of length `height` at
/// interior `angle` (radians), centred at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallelogram {
    pub height: f64,
    pub width: f64,
    pub num_xdot: usize,
    pub num_ydot: usize,
    pub angle: f64,
}

impl Shape for Parallelogram {
    fn kind(&self) -> &'static str {
        "Parallelogram"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Parallelogram", "height", self.height)?;
        check_positive("Parallelogram", "width", self.width)?;
        check_at_least("Parallelogram", "num_xdot", self.num_xdot, 2)?;
        check_at_least("Parallelogram", "num_ydot", self.num_ydot, 2)?;
        if !(self.angle > 0.0 && self.angle < PI) {
            return Err(GeomError::constraint(
                "Parallelogram",
                "angle",
                format!("must lie in (0, pi), got {}", self.angle),
            ));
        }
        Ok(())
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let (s, c) = self.angle.sin_cos();
        let (hx, hy) = (self.height * c / 2.0, self.height * s / 2.0);
        let w = self.width / 2.0;
        let tl = Point::new(-w + hx, hy);
        let tr = Point::new(w + hx, hy);
        let br = Point::new(w - hx, -hy);
        let bl = Point::new(-w - hx, -hy);
        Ok(connect_edges(&[
            segment_points(tl, tr, self.num_xdot),
            segment_points(tr, br, self.num_ydot),
            segment_points(br, bl, self.num_xdot),
            segment_points(bl, tl, self.num_ydot),
        ]))
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("height", self.height),
            ("width", self.width),
            ("num_xdot", self.num_xdot as f64),
            ("num_ydot", self.num_ydot as f64),
            ("angle", self.angle),
        ]
    }
}

/// Horizontal top and bottom sides; the top side is shifted right by `offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoid {
    pub height: f64,
    pub width_top: f64,
    pub width_bottom: f64,
    /// Dots on the top side, the bottom side and each slanted side.
    pub num_dot: (usize, usize, usize),
    pub offset: f64,
}

impl Trapezoid {
    pub fn new(height: f64, width_top: f64, width_bottom: f64, num_dot: usize) -> Self {
        Self {
            height,
            width_top,
            width_bottom,
            num_dot: (num_dot, num_dot, num_dot),
            offset: 0.0,
        }
    }

    /// Right trapezoid: the left side is vertical.
    pub fn right(height: f64, width_top: f64, width_bottom: f64, num_dot: usize) -> Self {
        Self {
            offset: (width_top - width_bottom) / 2.0,
            ..Self::new(height, width_top, width_bottom, num_dot)
        }
    }
}

impl Shape for Trapezoid {
    fn kind(&self) -> &'static str {
        "Trapezoid"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Trapezoid", "height", self.height)?;
        check_positive("Trapezoid", "width_top", self.width_top)?;
        check_positive("Trapezoid", "width_bottom", self.width_bottom)?;
        check_finite("Trapezoid", "offset", self.offset)?;
        let (t, b, s) = self.num_dot;
        check_at_least("Trapezoid", "num_dot", t.min(b).min(s), 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let h = self.height / 2.0;
        let (wt, wb) = (self.width_top / 2.0, self.width_bottom / 2.0);
        let tl = Point::new(-wt + self.offset, h);
        let tr = Point::new(wt + self.offset, h);
        let br = Point::new(wb, -h);
        let bl = Point::new(-wb, -h);
        let (nt, nb, ns) = self.num_dot;
        Ok(connect_edges(&[
            segment_points(tl, tr, nt),
            segment_points(tr, br, ns),
            segment_points(br, bl, nb),
            segment_points(bl, tl, ns),
        ]))
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("height", self.height),
            ("width_top", self.width_top),
            ("width_bottom", self.width_bottom),
            ("num_tdot", self.num_dot.0 as f64),
            ("num_bdot", self.num_dot.1 as f64),
            ("num_sdot", self.num_dot.2 as f64),
            ("offset", self.offset),
        ]
    }
}

/// Quadrilateral symmetric about the vertical diagonal, with side lengths `a`
/// (upper pair) and `b` (lower pair) meeting at right angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kite {
    pub a: f64,
    pub b: f64,
    pub num_dot: usize,
}

impl Shape for Kite {
    fn kind(&self) -> &'static str {
        "Kite"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Kite", "a", self.a)?;
        check_positive("Kite", "b", self.b)?;
        check_at_least("Kite", "num_dot", self.num_dot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let hyp = self.a.hypot(self.b);
        let (ua, ub) = (self.a / hyp, self.b / hyp);
        let t = Point::new(0.0, self.a * ua);
        let r = Point::new(self.a * ub, 0.0);
        let b = Point::new(0.0, -self.b * ub);
        let l = Point::new(-self.a * ub, 0.0);
        let n = self.num_dot;
        Ok(connect_edges(&[
            segment_points(t, r, n),
            segment_points(r, b, n),
            segment_points(b, l, n),
            segment_points(l, t, n),
        ]))
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("a", self.a), ("b", self.b), ("num_dot", self.num_dot as f64)]
    }
}

/// Star polygon without self-intersections; `size` is the centre-to-tip distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConcaveStar {
    pub size: f64,
    pub num_dot: usize,
    pub num_vertex: usize,
}

impl Shape for ConcaveStar {
    fn kind(&self) -> &'static str {
        "ConcaveStar"
    }
    fn validate(&self) -> Result<()> {
        check_positive("ConcaveStar", "size", self.size)?;
        check_at_least("ConcaveStar", "num_vertex", self.num_vertex, 3)?;
        check_at_least("ConcaveStar", "num_dot", self.num_dot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let n = self.num_vertex as f64;
        let ang = PI / n;
        let leg = self.size * ang.sin()
            / ((2.0 * ang).cos() * ang.cos() + (2.0 * ang).sin() * ang.sin());
        let (s2, c2) = (2.0 * ang).sin_cos();
        let last = (self.num_dot - 1) as f64;
        let at = |e: usize, sign: f64| {
            let t = e as f64 / last;
            Point::new(self.size - leg * s2 * t, sign * leg * c2 * t)
        };
        // one tip: in along the lower leg, out along the upper leg
        let tip: Vec<Point> = (0..self.num_dot - 1)
            .rev()
            .map(|e| at(e, -1.0))
            .chain((1..self.num_dot).map(|e| at(e, 1.0)))
            .collect();
        Ok((0..self.num_vertex)
            .flat_map(|v| tip.rotated(2.0 * PI * v as f64 / n))
            .collect())
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("size", self.size),
            ("num_dot", self.num_dot as f64),
            ("num_vertex", self.num_vertex as f64),
        ]
    }
}
