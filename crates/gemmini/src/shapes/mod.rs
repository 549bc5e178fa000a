//! Shape catalog: flat producers of point sets for [`Geometry`](crate::gem::Geometry).
//!
//! Each shape validates its parameters, generates its points once and, when it
//! encloses an area, reports one outer ring over them. Composite outlines are
//! built from the shared edge sampler ([`segment_points`] + [`connect_edges`])
//! rather than from other shapes.

pub mod line;
pub mod point;
pub mod polar;
pub mod polygon;

pub use line::Line;
pub use point::{Dot, Grid, PointCloud, RandomCloud};
pub use polar::{
    Arc, Circle, Cycloid, Ellipse, Epicycloid, Hypocycloid, Lissajous, Spiral, SpiralKind,
};
pub use polygon::{
    ConcaveStar, Kite, Parallelogram, Polygon, Rectangle, RegularPolygon, Rhombus, Segment,
    SegmentSpec, Trapezoid,
};

use crate::calc::Point;
use crate::error::{GeomError, Result};

/// `n` evenly spaced points from `p1` to `p2`, both ends included.
pub fn segment_points(p1: Point, p2: Point, n: usize) -> Vec<Point> {
    if n < 2 {
        return vec![p1; n];
    }
    let last = (n - 1) as f64;
    (0..n)
        .map(|d| {
            let d = d as f64;
            (p2 * d + p1 * (last - d)) / last
        })
        .collect()
}

/// Concatenate closed-loop edges, dropping each edge's last point (it is the
/// next edge's first).
pub fn connect_edges(edges: &[Vec<Point>]) -> Vec<Point> {
    edges
        .iter()
        .flat_map(|e| e.iter().take(e.len().saturating_sub(1)).copied())
        .collect()
}

pub(crate) fn check_positive(kind: &'static str, param: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(GeomError::constraint(kind, param, format!("must be positive, got {v}")))
    }
}

pub(crate) fn check_finite(kind: &'static str, param: &'static str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(GeomError::constraint(kind, param, format!("must be finite, got {v}")))
    }
}

pub(crate) fn check_at_least(
    kind: &'static str,
    param: &'static str,
    v: usize,
    min: usize,
) -> Result<()> {
    if v >= min {
        Ok(())
    } else {
        Err(GeomError::constraint(kind, param, format!("must be at least {min}, got {v}")))
    }
}
