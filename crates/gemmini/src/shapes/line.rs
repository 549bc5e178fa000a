//! Infinite straight lines. Not a `Shape`: a line has no finite point set.

use tracing::warn;

use super::check_finite;
use crate::calc::{outer_product, BoundingBox, Point};
use crate::error::{GeomError, Result};

/// Line through `origin` along `direction` (unit length).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    origin: Point,
    direction: Point,
}

impl Line {
    /// Line through two distinct points.
    pub fn through(p1: Point, p2: Point) -> Result<Self> {
        let d = p2 - p1;
        let len = d.norm();
        if !(len > 0.0 && len.is_finite()) {
            return Err(GeomError::constraint("Line", "p2", "must differ from p1"));
        }
        Ok(Self {
            origin: p1,
            direction: d / len,
        })
    }

    /// Line through `p` with slope `dy/dx`.
    pub fn with_slope(p: Point, slope: f64) -> Result<Self> {
        check_finite("Line", "slope", slope)?;
        Self::through(p, p + Point::new(1.0, slope))
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Point {
        self.direction
    }

    /// `dy/dx`; `None` for a vertical line.
    pub fn slope(&self) -> Option<f64> {
        (self.direction.x != 0.0).then(|| self.direction.y / self.direction.x)
    }

    /// Distance from `p` to the line.
    pub fn distance_to(&self, p: Point) -> f64 {
        outer_product(self.direction, p - self.origin, None).abs()
    }

    /// Intersection point, or `None` (with a warning) for parallel lines.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        let denom = outer_product(self.direction, other.direction, None);
        if denom.abs() < 1e-12 {
            warn!("intersection of parallel lines requested");
            return None;
        }
        let t = outer_product(other.origin - self.origin, other.direction, None) / denom;
        Some(self.origin + self.direction * t)
    }

    /// The part of the line inside `bbox` as its two end points, if it crosses it.
    pub fn clip(&self, bbox: &BoundingBox) -> Option<(Point, Point)> {
        // Liang-Barsky against the four box sides
        let (mut t0, mut t1) = (f64::NEG_INFINITY, f64::INFINITY);
        let checks = [
            (-self.direction.x, self.origin.x - bbox.x_min),
            (self.direction.x, bbox.x_max - self.origin.x),
            (-self.direction.y, self.origin.y - bbox.y_min),
            (self.direction.y, bbox.y_max - self.origin.y),
        ];
        for (p, q) in checks {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
        (t0 <= t1).then(|| {
            (
                self.origin + self.direction * t0,
                self.origin + self.direction * t1,
            )
        })
    }
}
