//! The geometry entity: a generated point set plus its ring structure,
//! measurements and in-place transforms.
//!
//! Purpose
//! - One type (`Geometry`) carries every shape of the catalog. Shapes only
//!   supply a formula (`Shape::base_coords`) and, when they enclose an area, the
//!   ring structure over those points (`Shape::rings`).
//! - Measurements (bbox, center, area, fill, hull) read `points`; transforms
//!   replace `points` wholesale and re-salt the identity.
//!
//! Model
//! - Rings are open index loops (the closing edge back to the first index is
//!   implied). Outer rings add area, inner rings (holes) subtract it.
//! - A geometry is planar iff its shape returned rings at construction. Reflect
//!   steps change the number of points, so they drop the rings; the geometry
//!   stays planar and area falls back to the concave hull.
//! - `identity_hash()` mixes kind, parameters, points and a salt drawn from a
//!   `ReplayToken` stream. Every mutation draws a new salt; `copy()` forks a new
//!   stream keyed by a process-wide fork counter, so copies taken from clones
//!   never collide. `clone()` is a snapshot and keeps the identity.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::Matrix2;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::warn;

use crate::calc::{self, BoundingBox, Hull, Point};
use crate::cfg::GeomCfg;
use crate::error::{GeomError, Result};
use crate::rand::ReplayToken;
use crate::transform::{self as tf, DistortMethod, Transform};

/// Boundary (outer) and hole (inner) rings as index loops into a point set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rings {
    pub outer: Vec<Vec<usize>>,
    pub inner: Vec<Vec<usize>>,
}

impl Rings {
    /// A single outer ring visiting `0..n` in order.
    pub fn closed(n: usize) -> Self {
        Self {
            outer: vec![(0..n).collect()],
            inner: Vec::new(),
        }
    }

    pub fn with_holes(outer: Vec<Vec<usize>>, inner: Vec<Vec<usize>>) -> Self {
        Self { outer, inner }
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty() && self.inner.is_empty()
    }

    fn check(&self, kind: &'static str, len: usize) -> Result<()> {
        for &index in self.outer.iter().chain(&self.inner).flatten() {
            if index >= len {
                return Err(GeomError::RingIndex { kind, index, len });
            }
        }
        Ok(())
    }
}

/// A shape of the catalog, as seen by [`Geometry::new`].
///
/// `Geometry::new` calls `validate`, `base_coords` and `rings` exactly once.
pub trait Shape: fmt::Debug {
    /// Stable kind tag (e.g. `"Rectangle"`).
    fn kind(&self) -> &'static str;

    /// Parameter checks; errors name the kind and the offending parameter.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// The generated (N,2) point set.
    fn base_coords(&self) -> Result<Vec<Point>>;

    /// Ring structure over `n` generated points; `None` marks a non-planar shape.
    fn rings(&self, n: usize) -> Option<Rings>;

    /// Scalar construction parameters (feeds `identity_hash`, reports).
    fn params(&self) -> Vec<(&'static str, f64)>;

    /// Radius of the generating circle for curves; `rad()` prefers it.
    fn generating_radius(&self) -> Option<f64> {
        None
    }
}

static NEXT_FORK: AtomicU64 = AtomicU64::new(1);

/// A generated, measurable, transformable point set.
#[derive(Clone, Debug)]
pub struct Geometry {
    kind: &'static str,
    params: Vec<(&'static str, f64)>,
    points: Vec<Point>,
    rings: Rings,
    planar: bool,
    generating_radius: Option<f64>,
    cfg: GeomCfg,
    salts: StdRng,
    salt: u64,
    revision: u64,
}

impl Geometry {
    /// Build from a shape with the default replay token.
    pub fn new<S: Shape + ?Sized>(shape: &S) -> Result<Self> {
        Self::with_token(shape, ReplayToken::default())
    }

    /// Build from a shape, drawing identity salts from `token`.
    pub fn with_token<S: Shape + ?Sized>(shape: &S, token: ReplayToken) -> Result<Self> {
        let kind = shape.kind();
        shape.validate()?;
        let points = shape.base_coords()?;
        if points.is_empty() {
            return Err(GeomError::EmptyPointSet);
        }
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(GeomError::NonFinite { kind });
        }
        let (planar, rings) = match shape.rings(points.len()) {
            Some(rings) => {
                rings.check(kind, points.len())?;
                (true, rings)
            }
            None => (false, Rings::default()),
        };
        let mut salts = token.to_std_rng();
        let salt = salts.gen();
        Ok(Self {
            kind,
            params: shape.params(),
            points,
            rings,
            planar,
            generating_radius: shape.generating_radius(),
            cfg: GeomCfg::default(),
            salts,
            salt,
            revision: 0,
        })
    }

    /// Replace the numeric configuration (hull alpha, fill density and cap, eps).
    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn cfg(&self) -> &GeomCfg {
        &self.cfg
    }

    // ---- queries ----

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[inline]
    pub fn is_planar(&self) -> bool {
        self.planar
    }

    #[inline]
    pub fn params(&self) -> &[(&'static str, f64)] {
        &self.params
    }

    #[inline]
    pub fn coords(&self) -> &[Point] {
        &self.points
    }

    /// Coordinates split per axis.
    pub fn coords_xy(&self) -> (Vec<f64>, Vec<f64>) {
        self.points.iter().map(|p| (p.x, p.y)).unzip()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of transforms applied since construction.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn bounding_box(&self) -> BoundingBox {
        calc::bounding_box(&self.points).unwrap_or_default()
    }

    /// Vertex mean.
    pub fn center(&self) -> Point {
        calc::centroid(&self.points).unwrap_or_else(|_| Point::zeros())
    }

    /// `(width, height)` of the bounding box.
    pub fn dim(&self) -> (f64, f64) {
        self.bounding_box().dim()
    }

    /// Generating radius for curves that still have one, otherwise half the
    /// bounding-box diagonal.
    pub fn rad(&self) -> f64 {
        self.generating_radius
            .unwrap_or_else(|| self.bounding_box().half_diagonal())
    }

    /// Outer rings; empty for non-planar geometries and after reflect steps.
    pub fn outer_rings(&self) -> &[Vec<usize>] {
        &self.rings.outer
    }

    pub fn inner_rings(&self) -> &[Vec<usize>] {
        &self.rings.inner
    }

    /// Points of the outer rings in ring order, or every point when there are none.
    pub fn boundary_points(&self) -> Vec<Point> {
        if self.rings.outer.is_empty() {
            return self.points.clone();
        }
        self.rings
            .outer
            .iter()
            .flatten()
            .map(|&i| self.points[i])
            .collect()
    }

    /// Enclosed area. 0 (with a warning) for non-planar geometries.
    pub fn area(&self) -> f64 {
        if !self.planar {
            warn!(kind = self.kind, "area is not defined for a non-planar geometry");
            return 0.0;
        }
        if !self.rings.outer.is_empty() {
            return match calc::polygon_area(&self.rings.outer, &self.rings.inner, &self.points) {
                Ok(a) => a,
                Err(e) => {
                    warn!(kind = self.kind, error = %e, "ring area failed");
                    0.0
                }
            };
        }
        match self.hull(None) {
            Ok(h) => calc::signed_ring_area(&h.vertices, &self.points).abs(),
            Err(e) => {
                warn!(kind = self.kind, error = %e, "concave hull fallback failed; area is 0");
                0.0
            }
        }
    }

    /// Points plus interior grid samples (`density` defaults to the config).
    /// Non-planar geometries return their points unchanged, with a warning.
    pub fn interior(&self, density: Option<usize>) -> Result<Vec<Point>> {
        let density = density.unwrap_or(self.cfg.fill_density);
        if !self.planar {
            warn!(kind = self.kind, "interior fill is not defined for a non-planar geometry");
            return Ok(self.points.clone());
        }
        if !self.rings.outer.is_empty() {
            return calc::interior_pixels_rings(
                &self.points,
                &self.rings.outer,
                &self.rings.inner,
                density,
                self.cfg.max_fill_points,
            );
        }
        let hull = self.hull(None)?;
        calc::interior_pixels_rings(
            &self.points,
            &[hull.vertices],
            &[],
            density,
            self.cfg.max_fill_points,
        )
    }

    /// Concave hull of the current points (`alpha` defaults to the config).
    pub fn hull(&self, alpha: Option<f64>) -> Result<Hull> {
        calc::concave_hull_eps(
            &self.points,
            alpha.unwrap_or(self.cfg.hull_alpha),
            self.cfg.eps_area,
        )
    }

    /// Opaque identity: stable across reads, different after every mutation
    /// and between a geometry and its `copy()`.
    pub fn identity_hash(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.kind.hash(&mut h);
        for (name, v) in &self.params {
            name.hash(&mut h);
            v.to_bits().hash(&mut h);
        }
        self.salt.hash(&mut h);
        for p in &self.points {
            p.x.to_bits().hash(&mut h);
            p.y.to_bits().hash(&mut h);
        }
        h.finish()
    }

    /// Deep copy with an independent identity lineage.
    pub fn copy(&self) -> Self {
        let fork = NEXT_FORK.fetch_add(1, Ordering::Relaxed);
        let mut salts = ReplayToken::new(self.salt, fork).to_std_rng();
        let salt = salts.gen();
        Self {
            salts,
            salt,
            ..self.clone()
        }
    }

    // ---- transforms ----

    fn commit(&mut self, step: Transform, points: Vec<Point>) -> &mut Self {
        if step.merges_points() {
            self.rings = Rings::default();
        }
        self.generating_radius = match step.radius_factor() {
            Some(f) => self.generating_radius.map(|r| r * f),
            None => None,
        };
        self.points = points;
        self.revision += 1;
        self.salt = self.salts.gen();
        self
    }

    /// Apply one pipeline step.
    pub fn apply(&mut self, step: Transform) -> Result<&mut Self> {
        let points = step.apply(&self.points)?;
        Ok(self.commit(step, points))
    }

    pub fn scale(&mut self, sx: f64, sy: Option<f64>) -> &mut Self {
        let p = tf::scale(&self.points, sx, sy);
        self.commit(Transform::Scale { sx, sy }, p)
    }

    pub fn scale_x(&mut self, s: f64) -> &mut Self {
        let p = tf::scale_x(&self.points, s);
        self.commit(Transform::ScaleX(s), p)
    }

    pub fn scale_y(&mut self, s: f64) -> &mut Self {
        let p = tf::scale_y(&self.points, s);
        self.commit(Transform::ScaleY(s), p)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        let p = tf::translate(&self.points, dx, dy);
        self.commit(Transform::Translate { dx, dy }, p)
    }

    pub fn translate_x(&mut self, dx: f64) -> &mut Self {
        let p = tf::translate_x(&self.points, dx);
        self.commit(Transform::TranslateX(dx), p)
    }

    pub fn translate_y(&mut self, dy: f64) -> &mut Self {
        let p = tf::translate_y(&self.points, dy);
        self.commit(Transform::TranslateY(dy), p)
    }

    /// Rotate about the current center by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let p = tf::rotate_about(&self.points, self.center(), angle);
        self.commit(Transform::RotateAboutCenter(angle), p)
    }

    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        let p = tf::rotate_x(&self.points, angle);
        self.commit(Transform::RotateX(angle), p)
    }

    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        let p = tf::rotate_y(&self.points, angle);
        self.commit(Transform::RotateY(angle), p)
    }

    /// Rotate about the origin.
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        let p = tf::rotate_z(&self.points, angle);
        self.commit(Transform::RotateZ(angle), p)
    }

    pub fn rotate_3d(&mut self, yaw: f64, pitch: f64, roll: f64) -> &mut Self {
        let p = tf::rotate_3d(&self.points, yaw, pitch, roll);
        self.commit(Transform::Rotate3d { yaw, pitch, roll }, p)
    }

    pub fn skew(&mut self, ax: Option<f64>, ay: Option<f64>) -> Result<&mut Self> {
        self.apply(Transform::Skew { ax, ay })
    }

    pub fn skew_x(&mut self, angle: f64) -> &mut Self {
        let p = tf::skew_x(&self.points, angle);
        self.commit(Transform::SkewX(angle), p)
    }

    pub fn skew_y(&mut self, angle: f64) -> &mut Self {
        let p = tf::skew_y(&self.points, angle);
        self.commit(Transform::SkewY(angle), p)
    }

    pub fn reflect(&mut self, pivot: Point) -> &mut Self {
        let p = tf::reflect(&self.points, pivot);
        self.commit(Transform::Reflect(pivot), p)
    }

    pub fn reflect_x(&mut self) -> &mut Self {
        let p = tf::reflect_x(&self.points);
        self.commit(Transform::ReflectX, p)
    }

    pub fn reflect_y(&mut self) -> &mut Self {
        let p = tf::reflect_y(&self.points);
        self.commit(Transform::ReflectY, p)
    }

    pub fn reflect_xy(&mut self) -> &mut Self {
        let p = tf::reflect_xy(&self.points);
        self.commit(Transform::ReflectXY, p)
    }

    pub fn reflect_diagonal(&mut self) -> &mut Self {
        let p = tf::reflect_diagonal(&self.points);
        self.commit(Transform::ReflectDiagonal, p)
    }

    pub fn flip(&mut self, pivot: Point) -> &mut Self {
        let p = tf::flip(&self.points, pivot);
        self.commit(Transform::Flip(pivot), p)
    }

    pub fn flip_x(&mut self) -> &mut Self {
        let p = tf::flip_x(&self.points);
        self.commit(Transform::FlipX, p)
    }

    pub fn flip_y(&mut self) -> &mut Self {
        let p = tf::flip_y(&self.points);
        self.commit(Transform::FlipY, p)
    }

    pub fn flip_xy(&mut self) -> &mut Self {
        let p = tf::flip_xy(&self.points);
        self.commit(Transform::FlipXY, p)
    }

    pub fn flip_diagonal(&mut self) -> &mut Self {
        let p = tf::flip_diagonal(&self.points);
        self.commit(Transform::FlipDiagonal, p)
    }

    /// Row-vector product `[x y]·m` for every point.
    pub fn dot(&mut self, m: &Matrix2<f64>) -> &mut Self {
        let p = tf::dot(&self.points, m);
        self.commit(Transform::Dot(*m), p)
    }

    pub fn distort(&mut self, method: DistortMethod, rate: f64) -> Result<&mut Self> {
        self.apply(Transform::Distort { method, rate })
    }

    pub fn focus(&mut self, pivot: Point, rate: f64) -> Result<&mut Self> {
        self.apply(Transform::Focus { pivot, rate })
    }

    pub fn shatter(&mut self, pivot: Point, rate: f64) -> Result<&mut Self> {
        self.apply(Transform::Shatter { pivot, rate })
    }
}

/// Same kind and identical boundary points; fill samples and history are ignored.
impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.boundary_points() == other.boundary_points()
    }
}
