//! Coordinate utilities: validation of raw input, distances, polar sampling,
//! bounding boxes and the dual-mode rotation helper.
//!
//! Raw (untyped) coordinates are plain `f64` slices so that 2D and 3D points can
//! be checked the same way; everything downstream of `to_point_array` works on
//! `Point = Vector2<f64>`.

use nalgebra::{DMatrix, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{GeomError, Result};

/// A 2D point (row of a point set).
pub type Point = Vector2<f64>;

/// Untyped coordinates as they arrive from callers (JSON, CLI, tests).
///
/// A bare list of numbers is read as a single point and must have exactly two
/// entries; a list of lists is a point set whose first row decides validity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoords {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

/// True iff `p` has 2 or 3 coordinates (and exactly `dim`, when given).
pub fn is_point(p: &[f64], dim: Option<usize>) -> bool {
    if p.len() < 2 || p.len() > 3 {
        return false;
    }
    dim.map_or(true, |d| p.len() == d)
}

/// True iff `p` is a non-empty sequence of points sharing one dimension.
pub fn is_point_set<P: AsRef<[f64]>>(p: &[P], dim: Option<usize>) -> bool {
    match point_set_dim(p) {
        Ok(d) => dim.map_or(true, |want| want == d),
        Err(_) => false,
    }
}

/// Dimension shared by all rows of `p`.
fn point_set_dim<P: AsRef<[f64]>>(p: &[P]) -> Result<usize> {
    let first = p.first().ok_or(GeomError::EmptyPointSet)?.as_ref();
    if !is_point(first, None) {
        return Err(GeomError::PointArity { got: first.len() });
    }
    let expected = first.len();
    for (row, q) in p.iter().enumerate().skip(1) {
        let got = q.as_ref().len();
        if got != expected {
            return Err(GeomError::RaggedPointSet { row, expected, got });
        }
    }
    Ok(expected)
}

/// Normalize a single point or a list of points into an (N,2) array.
pub fn to_point_array(input: &RawCoords) -> Result<Vec<Point>> {
    match input {
        RawCoords::Flat(v) => {
            if v.len() != 2 {
                return Err(GeomError::PointArity { got: v.len() });
            }
            Ok(vec![Point::new(v[0], v[1])])
        }
        RawCoords::Rows(rows) => {
            let first = rows.first().ok_or(GeomError::EmptyPointSet)?;
            if !is_point(first, None) {
                return Err(GeomError::PointArity { got: first.len() });
            }
            if first.len() != 2 {
                return Err(GeomError::DimensionMismatch {
                    left: 2,
                    right: first.len(),
                });
            }
            rows.iter()
                .enumerate()
                .map(|(row, r)| match r.as_slice() {
                    [x, y] => Ok(Point::new(*x, *y)),
                    _ => Err(GeomError::RaggedPointSet {
                        row,
                        expected: 2,
                        got: r.len(),
                    }),
                })
                .collect()
        }
    }
}

/// Euclidean distance between two raw points of equal dimension (2D or 3D).
pub fn distance(p: &[f64], q: &[f64]) -> Result<f64> {
    for v in [p, q] {
        if !is_point(v, None) {
            return Err(GeomError::PointArity { got: v.len() });
        }
    }
    if p.len() != q.len() {
        return Err(GeomError::DimensionMismatch {
            left: p.len(),
            right: q.len(),
        });
    }
    Ok(p.iter()
        .zip(q)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt())
}

/// Distance matrix: entry `(i, j)` is `distance(a[i], b[j])`.
pub fn pairwise_distance<P: AsRef<[f64]>>(a: &[P], b: &[P]) -> Result<DMatrix<f64>> {
    let da = point_set_dim(a)?;
    let db = point_set_dim(b)?;
    if da != db {
        return Err(GeomError::DimensionMismatch {
            left: da,
            right: db,
        });
    }
    let mut out = DMatrix::zeros(a.len(), b.len());
    for (i, p) in a.iter().enumerate() {
        for (j, q) in b.iter().enumerate() {
            out[(i, j)] = distance(p.as_ref(), q.as_ref())?;
        }
    }
    Ok(out)
}

/// 2D cross product `p × q`, or `(q − p) × (r − p)` when `r` is given.
///
/// Twice the signed area of the triangle `(p, q, r)`; positive for CCW.
#[inline]
pub fn outer_product(p: Point, q: Point, r: Option<Point>) -> f64 {
    match r {
        None => p.x * q.y - q.x * p.y,
        Some(r) => {
            let a = q - p;
            let b = r - p;
            a.x * b.y - b.x * a.y
        }
    }
}

/// Polar → cartesian for one sample.
#[inline]
pub fn polar(r: f64, theta: f64) -> Point {
    Point::new(r * theta.cos(), r * theta.sin())
}

/// Radii for [`polar_pixels`]: one shared value or one per angle.
#[derive(Clone, Copy, Debug)]
pub enum Radius<'a> {
    Uniform(f64),
    PerPoint(&'a [f64]),
}

/// Polar → cartesian for a sequence of angles.
pub fn polar_pixels(r: Radius<'_>, theta: &[f64]) -> Result<Vec<Point>> {
    match r {
        Radius::Uniform(r) => Ok(theta.iter().map(|&t| polar(r, t)).collect()),
        Radius::PerPoint(rs) => {
            if rs.len() != theta.len() {
                return Err(GeomError::LengthMismatch {
                    radii: rs.len(),
                    angles: theta.len(),
                });
            }
            Ok(rs.iter().zip(theta).map(|(&r, &t)| polar(r, t)).collect())
        }
    }
}

/// Axis-aligned bounding box `(x_min, y_min, x_max, y_max)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    #[inline]
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }
    /// `(width, height)`.
    #[inline]
    pub fn dim(&self) -> (f64, f64) {
        (self.x_max - self.x_min, self.y_max - self.y_min)
    }
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
    /// Half the length of the box diagonal.
    #[inline]
    pub fn half_diagonal(&self) -> f64 {
        let (w, h) = self.dim();
        (w * w + h * h).sqrt() / 2.0
    }
    /// Smallest box containing both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

pub fn bounding_box(points: &[Point]) -> Result<BoundingBox> {
    let first = points.first().ok_or(GeomError::EmptyPointSet)?;
    let init = BoundingBox {
        x_min: first.x,
        y_min: first.y,
        x_max: first.x,
        y_max: first.y,
    };
    Ok(points.iter().skip(1).fold(init, |b, p| BoundingBox {
        x_min: b.x_min.min(p.x),
        y_min: b.y_min.min(p.y),
        x_max: b.x_max.max(p.x),
        y_max: b.y_max.max(p.y),
    }))
}

/// Vertex centroid (mean of x's, mean of y's). Not the area centroid.
pub fn centroid(points: &[Point]) -> Result<Point> {
    if points.is_empty() {
        return Err(GeomError::EmptyPointSet);
    }
    let sum = points.iter().fold(Point::zeros(), |acc, p| acc + p);
    Ok(sum / points.len() as f64)
}

/// Rotation about the origin, for a single point or a whole point set.
pub trait Rotate {
    type Output;
    fn rotated(&self, angle: f64) -> Self::Output;
}

impl Rotate for Point {
    type Output = Point;
    #[inline]
    fn rotated(&self, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        Point::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

impl Rotate for [Point] {
    type Output = Vec<Point>;
    fn rotated(&self, angle: f64) -> Vec<Point> {
        self.iter().map(|p| p.rotated(angle)).collect()
    }
}

/// Rotate a point (→ point) or a point set (→ point set) by `angle` radians.
#[inline]
pub fn rotate_points<T: Rotate + ?Sized>(p: &T, angle: f64) -> T::Output {
    p.rotated(angle)
}

/// Element-wise comparison of two point sets within `tol`.
pub fn approx_eq_points(a: &[Point], b: &[Point], tol: f64) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(p, q)| (p.x - q.x).abs() <= tol && (p.y - q.y).abs() <= tol)
}

/// `n` evenly spaced samples on `[start, stop]` (inclusive, like numpy's linspace).
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};

    #[test]
    fn point_predicates() {
        assert!(is_point(&[3.0, 4.0], None));
        assert!(is_point(&[3.0, 4.0, 5.0], None));
        assert!(!is_point(&[4.0], None));
        assert!(!is_point(&[3.0, 4.0, 5.0, 6.0], None));
        assert!(!is_point(&[3.0, 4.0, 5.0], Some(2)));

        assert!(is_point_set(&[[3.0, 4.0]], None));
        assert!(!is_point_set(&[vec![3.0]], None));
        assert!(!is_point_set(&[[3.0, 4.0]], Some(3)));
        assert!(!is_point_set(&[vec![1.0, 2.0], vec![1.0, 2.0, 3.0]], None));
        let empty: [[f64; 2]; 0] = [];
        assert!(!is_point_set(&empty, None));
    }

    #[test]
    fn to_point_array_resolves_single_point_vs_list() {
        let one = to_point_array(&RawCoords::Flat(vec![0.0, 2.0])).unwrap();
        assert_eq!(one, vec![Point::new(0.0, 2.0)]);

        assert_eq!(
            to_point_array(&RawCoords::Flat(vec![0.0, 2.0, 3.0])),
            Err(GeomError::PointArity { got: 3 })
        );

        let two = to_point_array(&RawCoords::Rows(vec![vec![0.0, 2.0], vec![3.0, 4.0]])).unwrap();
        assert_eq!(two.len(), 2);

        assert!(to_point_array(&RawCoords::Rows(vec![
            vec![0.0, 2.0, 3.0],
            vec![3.0, 4.0, 5.0]
        ]))
        .is_err());
        assert!(matches!(
            to_point_array(&RawCoords::Rows(vec![vec![0.0, 2.0], vec![3.0]])),
            Err(GeomError::RaggedPointSet { row: 1, .. })
        ));
    }

    #[test]
    fn raw_coords_parse_from_json() {
        let single: RawCoords = serde_json::from_str("[1.5, 2]").unwrap();
        assert_eq!(single, RawCoords::Flat(vec![1.5, 2.0]));
        let many: RawCoords = serde_json::from_str("[[0,0],[1,2]]").unwrap();
        assert_eq!(to_point_array(&many).unwrap().len(), 2);
    }

    #[test]
    fn distances() {
        assert_eq!(distance(&[0.0, 0.0], &[3.0, 0.0]).unwrap(), 3.0);
        assert_eq!(distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
        assert_eq!(distance(&[0.0, 1.0, 2.0], &[1.0, 3.0, 4.0]).unwrap(), 3.0);
        assert!(matches!(
            distance(&[0.0, 0.0], &[1.0, 1.0, 1.0]),
            Err(GeomError::DimensionMismatch { .. })
        ));
        assert!(distance(&[0.0], &[1.0, 1.0]).is_err());
    }

    #[test]
    fn pairwise_distance_matrix() {
        let a = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let b = [[1.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]];
        let m = pairwise_distance(&a, &b).unwrap();
        let s3 = 3f64.sqrt();
        let expected = [[1.0, s3, 1.0], [1.0, 1.0, s3], [s3, 1.0, 1.0]];
        assert_eq!(m.shape(), (3, 3));
        for i in 0..3 {
            for j in 0..3 {
                assert!((m[(i, j)] - expected[i][j]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn outer_products() {
        assert_eq!(
            outer_product(Point::new(3.0, 6.0), Point::new(9.0, 10.0), None),
            -24.0
        );
        assert_eq!(
            outer_product(
                Point::new(1.0, 2.0),
                Point::new(3.0, 7.0),
                Some(Point::new(-1.0, 4.0))
            ),
            14.0
        );
    }

    #[test]
    fn polar_sampling() {
        let p = polar(2.0, FRAC_PI_4);
        assert_eq!(p.x, 2.0 * FRAC_PI_4.cos());
        assert_eq!(p.y, 2.0 * FRAC_PI_4.sin());

        let theta = linspace(0.0, FRAC_PI_2, 4);
        let ps = polar_pixels(Radius::Uniform(10.0), &theta).unwrap();
        assert!((ps[1].x - 10.0 * FRAC_PI_6.cos()).abs() < 1e-12);
        assert!((ps[2].y - 10.0 * FRAC_PI_3.sin()).abs() < 1e-12);

        assert!(matches!(
            polar_pixels(Radius::PerPoint(&[1.0, 2.0]), &theta),
            Err(GeomError::LengthMismatch { radii: 2, angles: 4 })
        ));
    }

    #[test]
    fn rotate_is_dual_mode() {
        let p = rotate_points(&Point::new(2.0, 0.0), FRAC_PI_2);
        assert!(p.x.abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);

        let q = rotate_points(&Point::new(2.0, 1.0), PI);
        assert!((q.x + 2.0).abs() < 1e-12 && (q.y + 1.0).abs() < 1e-12);

        let set = [Point::new(1.0, 1.0), Point::new(3.0, 0.0)];
        let out: Vec<Point> = rotate_points(&set[..], FRAC_PI_3);
        assert_eq!(out.len(), 2);
        assert!((out[1].x - 3.0 * FRAC_PI_3.cos()).abs() < 1e-12);
        assert!((out[1].y - 3.0 * FRAC_PI_3.sin()).abs() < 1e-12);
    }

    #[test]
    fn bbox_and_centroid() {
        assert_eq!(bounding_box(&[]), Err(GeomError::EmptyPointSet));
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(2.0, 1.5),
        ];
        let b = bounding_box(&pts).unwrap();
        assert_eq!(b.as_tuple(), (0.0, 0.0, 3.0, 3.0));
        assert_eq!(b.dim(), (3.0, 3.0));
        let c = centroid(&pts).unwrap();
        // vertex mean, not the area centroid
        assert!((c.x - 2.0).abs() < 1e-12 && (c.y - 1.125).abs() < 1e-12);
    }

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(-1.0, 1.0, 3), vec![-1.0, 0.0, 1.0]);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
