//! Curves generated from an angle parameter: circles, arcs, spirals, roulettes.
//!
//! Curves report their generating radius, which `Geometry::rad()` returns
//! instead of the bounding-box estimate.

use std::f64::consts::TAU;

use super::{check_at_least, check_finite, check_positive};
use crate::calc::{linspace, polar, polar_pixels, Point, Radius};
use crate::error::Result;
use crate::gem::{Rings, Shape};

/// `n` angles on `[0, stop)` (the endpoint is dropped, closed curves).
fn closed_angles(stop: f64, n: usize) -> Vec<f64> {
    let mut t = linspace(0.0, stop, n + 1);
    t.pop();
    t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub num_dot: usize,
}

impl Shape for Circle {
    fn kind(&self) -> &'static str {
        "Circle"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Circle", "radius", self.radius)?;
        check_at_least("Circle", "num_dot", self.num_dot, 3)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        polar_pixels(Radius::Uniform(self.radius), &closed_angles(TAU, self.num_dot))
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        Some(Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("radius", self.radius), ("num_dot", self.num_dot as f64)]
    }
    fn generating_radius(&self) -> Option<f64> {
        Some(self.radius)
    }
}

/// Circular arc from angle 0 through `angle` degrees (capped at 360), open.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub radius: f64,
    pub num_dot: usize,
    /// Degrees.
    pub angle: f64,
}

impl Shape for Arc {
    fn kind(&self) -> &'static str {
        "Arc"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Arc", "radius", self.radius)?;
        check_positive("Arc", "angle", self.angle)?;
        check_at_least("Arc", "num_dot", self.num_dot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let stop = self.angle.min(360.0).to_radians();
        polar_pixels(Radius::Uniform(self.radius), &linspace(0.0, stop, self.num_dot))
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("radius", self.radius),
            ("num_dot", self.num_dot as f64),
            ("angle", self.angle),
        ]
    }
    fn generating_radius(&self) -> Option<f64> {
        Some(self.radius)
    }
}

/// Axis-aligned ellipse with full axes `width` and `height`, traced clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub height: f64,
    pub width: f64,
    pub num_dot: usize,
}

impl Shape for Ellipse {
    fn kind(&self) -> &'static str {
        "Ellipse"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Ellipse", "height", self.height)?;
        check_positive("Ellipse", "width", self.width)?;
        check_at_least("Ellipse", "num_dot", self.num_dot, 3)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        Ok(closed_angles(TAU, self.num_dot)
            .into_iter()
            .map(|t| Point::new(self.width * t.cos(), -self.height * t.sin()) / 2.0)
            .collect())
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

/// Radial law of a [`Spiral`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpiralKind {
    /// `r` grows linearly with the angle.
    Archimedean,
    /// `r ∝ 1/θ`.
    Hyperbolic,
    /// `r ∝ √θ`, traced through both branches (Fermat's spiral).
    Parabolic,
    /// `r ∝ √(θ/θ₀)`.
    Lituus,
    /// `r ∝ e^θ`.
    Logarithmic,
}

impl SpiralKind {
    pub fn name(self) -> &'static str {
        match self {
            SpiralKind::Archimedean => "Spiral",
            SpiralKind::Hyperbolic => "HyperbolicSpiral",
            SpiralKind::Parabolic => "ParabolicSpiral",
            SpiralKind::Lituus => "LituusSpiral",
            SpiralKind::Logarithmic => "LogarithmicSpiral",
        }
    }
}

/// Spiral sampled at `num_dot` angles on `(0, angle]` radians, scaled so that
/// `radius` is reached at the outer end (open curve).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spiral {
    pub radius: f64,
    pub num_dot: usize,
    /// Radians.
    pub angle: f64,
    pub law: SpiralKind,
}

impl Shape for Spiral {
    fn kind(&self) -> &'static str {
        self.law.name()
    }
    fn validate(&self) -> Result<()> {
        let kind = self.law.name();
        check_positive(kind, "radius", self.radius)?;
        check_positive(kind, "angle", self.angle)?;
        check_at_least(kind, "num_dot", self.num_dot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let theta: Vec<f64> = linspace(0.0, self.angle, self.num_dot + 1)
            .into_iter()
            .skip(1)
            .collect();
        let (Some(&first), Some(&last)) = (theta.first(), theta.last()) else {
            return Ok(Vec::new());
        };
        let r = self.radius;
        let radii: Vec<f64> = match self.law {
            SpiralKind::Archimedean => theta.iter().map(|t| r * t / self.angle).collect(),
            SpiralKind::Hyperbolic => theta.iter().map(|t| r * first / t).collect(),
            SpiralKind::Lituus => theta.iter().map(|t| r * (t / first).sqrt()).collect(),
            SpiralKind::Logarithmic => theta.iter().map(|t| r * (t - last).exp()).collect(),
            SpiralKind::Parabolic => {
                let norm = last.sqrt();
                let rad: Vec<f64> = theta.iter().map(|t| r * t.sqrt() / norm).collect();
                // positive branch inwards, then the negative branch outwards
                let pos_start = if theta.len() % 2 == 0 { 0 } else { 1 };
                let pos = (pos_start..theta.len()).step_by(2).rev();
                let neg = (0..theta.len()).step_by(2);
                return Ok(pos
                    .map(|i| polar(rad[i], theta[i]))
                    .chain(neg.map(|i| polar(-rad[i], theta[i])))
                    .collect());
            }
        };
        polar_pixels(Radius::PerPoint(&radii), &theta)
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("radius", self.radius),
            ("num_dot", self.num_dot as f64),
            ("angle", self.angle),
        ]
    }
    fn generating_radius(&self) -> Option<f64> {
        Some(self.radius)
    }
}

/// Trace of a rim point of a rolling circle over `angle` radians, normalized
/// by `angle` and shifted left by `radius / 2` (open curve).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cycloid {
    pub radius: f64,
    pub num_dot: usize,
    pub angle: f64,
}

impl Shape for Cycloid {
    fn kind(&self) -> &'static str {
        "Cycloid"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Cycloid", "radius", self.radius)?;
        check_positive("Cycloid", "angle", self.angle)?;
        check_at_least("Cycloid", "num_dot", self.num_dot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let r = self.radius;
        Ok(linspace(0.0, self.angle, self.num_dot)
            .into_iter()
            .map(|t| {
                let p = Point::new(r * (t - t.sin()), r * (1.0 - t.cos())) / self.angle;
                Point::new(p.x - r / 2.0, p.y)
            })
            .collect())
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("radius", self.radius),
            ("num_dot", self.num_dot as f64),
            ("angle", self.angle),
        ]
    }
    fn generating_radius(&self) -> Option<f64> {
        Some(self.radius)
    }
}

fn check_ratio(kind: &'static str, p: u32, q: u32) -> Result<()> {
    check_at_least(kind, "p", p as usize, 1)?;
    check_at_least(kind, "q", q as usize, 1)
}

/// Roulette of a circle rolling outside a fixed circle; `p/q` cusps.
/// Only `q = 1` gives a simple closed outline, so only then is it planar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Epicycloid {
    pub p: u32,
    pub q: u32,
    pub radius: f64,
    pub num_dot: usize,
}

impl Shape for Epicycloid {
    fn kind(&self) -> &'static str {
        "Epicycloid"
    }
    fn validate(&self) -> Result<()> {
        check_ratio("Epicycloid", self.p, self.q)?;
        check_positive("Epicycloid", "radius", self.radius)?;
        check_at_least("Epicycloid", "num_dot", self.num_dot, 3)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let k = f64::from(self.p) / f64::from(self.q);
        let r = self.radius;
        Ok(closed_angles(f64::from(self.q) * TAU, self.num_dot)
            .into_iter()
            .map(|t| {
                Point::new(
                    r * ((k + 1.0) * t.cos() - ((k + 1.0) * t).cos()),
                    r * ((k + 1.0) * t.sin() - ((k + 1.0) * t).sin()),
                )
            })
            .collect())
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        (self.q == 1).then(|| Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("p", f64::from(self.p)),
            ("q", f64::from(self.q)),
            ("radius", self.radius),
            ("num_dot", self.num_dot as f64),
        ]
    }
    fn generating_radius(&self) -> Option<f64> {
        Some(self.radius)
    }
}

/// Roulette of a circle rolling inside a fixed circle; `p/q` cusps.
/// Planar for `q = 1` and at least three cusps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hypocycloid {
    pub p: u32,
    pub q: u32,
    pub radius: f64,
    pub num_dot: usize,
}

impl Hypocycloid {
    /// Curved polygon with `num_vertex` cusps: `Hypocycloid(num_vertex, 1)`.
    pub fn curved_polygon(size: f64, num_dot: usize, num_vertex: u32) -> Self {
        Self {
            p: num_vertex,
            q: 1,
            radius: size,
            num_dot,
        }
    }
}

impl Shape for Hypocycloid {
    fn kind(&self) -> &'static str {
        "Hypocycloid"
    }
    fn validate(&self) -> Result<()> {
        check_ratio("Hypocycloid", self.p, self.q)?;
        check_positive("Hypocycloid", "radius", self.radius)?;
        check_at_least("Hypocycloid", "num_dot", self.num_dot, 3)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let k = f64::from(self.p) / f64::from(self.q);
        let r = self.radius;
        Ok(closed_angles(f64::from(self.q) * TAU, self.num_dot)
            .into_iter()
            .map(|t| {
                Point::new(
                    r * ((k - 1.0) * t.cos() + ((k - 1.0) * t).cos()),
                    r * ((k - 1.0) * t.sin() - ((k - 1.0) * t).sin()),
                )
            })
            .collect())
    }
    fn rings(&self, n: usize) -> Option<Rings> {
        (self.q == 1 && self.p >= 3).then(|| Rings::closed(n))
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("p", f64::from(self.p)),
            ("q", f64::from(self.q)),
            ("radius", self.radius),
            ("num_dot", self.num_dot as f64),
        ]
    }
    fn generating_radius(&self) -> Option<f64> {
        Some(self.radius)
    }
}

/// `(r cos(a t), r sin(b t))` over one period (self-intersecting, non-planar).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lissajous {
    pub a: f64,
    pub b: f64,
    pub radius: f64,
    pub num_dot: usize,
}

impl Shape for Lissajous {
    fn kind(&self) -> &'static str {
        "Lissajous"
    }
    fn validate(&self) -> Result<()> {
        check_finite("Lissajous", "a", self.a)?;
        check_finite("Lissajous", "b", self.b)?;
        check_positive("Lissajous", "radius", self.radius)?;
        check_at_least("Lissajous", "num_dot", self.num_dot, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let r = self.radius;
        Ok(closed_angles(TAU, self.num_dot)
            .into_iter()
            .map(|t| Point::new(r * (self.a * t).cos(), r * (self.b * t).sin()))
            .collect())
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("a", self.a),
            ("b", self.b),
            ("radius", self.radius),
            ("num_dot", self.num_dot as f64),
        ]
    }
    fn generating_radius(&self) -> Option<f64> {
        Some(self.radius)
    }
}
