//! Pure transforms on point sets.
//!
//! Each function maps `&[Point]` to a fresh `Vec<Point>`; inputs are never
//! touched. Composition is plain sequential application: `t2(&t1(p))`.
//!
//! - `flip*` replaces the set by its mirror image (same length).
//! - `reflect*` unions the set with its mirror image (sorted, exact duplicates
//!   removed), so it keeps at least every distinct input point.
//! - `rotate_x`/`rotate_y` are axis foreshortenings kept for the 3D-flavoured
//!   curves, not true 3D rotations.

use std::str::FromStr;

use nalgebra::{DMatrix, Matrix2};

use crate::calc::coords::{centroid, Point, Rotate};
use crate::error::{GeomError, Result};

pub fn scale(points: &[Point], sx: f64, sy: Option<f64>) -> Vec<Point> {
    let sy = sy.unwrap_or(sx);
    points.iter().map(|p| Point::new(p.x * sx, p.y * sy)).collect()
}

pub fn scale_x(points: &[Point], s: f64) -> Vec<Point> {
    scale(points, s, Some(1.0))
}

pub fn scale_y(points: &[Point], s: f64) -> Vec<Point> {
    scale(points, 1.0, Some(s))
}

pub fn translate(points: &[Point], dx: f64, dy: f64) -> Vec<Point> {
    let d = Point::new(dx, dy);
    points.iter().map(|p| p + d).collect()
}

pub fn translate_x(points: &[Point], dx: f64) -> Vec<Point> {
    translate(points, dx, 0.0)
}

pub fn translate_y(points: &[Point], dy: f64) -> Vec<Point> {
    translate(points, 0.0, dy)
}

/// Rotation about the origin (alias of [`rotate_z`]).
pub fn rotate(points: &[Point], angle: f64) -> Vec<Point> {
    rotate_z(points, angle)
}

/// `[[cos, -sin], [sin, cos]]` applied to every point.
pub fn rotate_z(points: &[Point], angle: f64) -> Vec<Point> {
    points.rotated(angle)
}

/// Rotation by `angle` about `center`.
pub fn rotate_about(points: &[Point], center: Point, angle: f64) -> Vec<Point> {
    translate(&rotate_z(&translate(points, -center.x, -center.y), angle), center.x, center.y)
}

/// Foreshortening along y: `(x, y·cos a)`.
pub fn rotate_x(points: &[Point], angle: f64) -> Vec<Point> {
    let c = angle.cos();
    points.iter().map(|p| Point::new(p.x, p.y * c)).collect()
}

/// Foreshortening along x: `(x·cos a, y)`.
pub fn rotate_y(points: &[Point], angle: f64) -> Vec<Point> {
    let c = angle.cos();
    points.iter().map(|p| Point::new(p.x * c, p.y)).collect()
}

/// Yaw/pitch/roll composed and projected back onto the xy-plane.
pub fn rotate_3d(points: &[Point], yaw: f64, pitch: f64, roll: f64) -> Vec<Point> {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let (sr, cr) = roll.sin_cos();
    points
        .iter()
        .map(|p| {
            let rx = p.x * cy * cp + p.y * (cy * sp * sr - sy * cr);
            let ry = p.x * sy * cp + p.y * (sy * sp * sr + cy * cr);
            Point::new(rx, ry)
        })
        .collect()
}

/// Shear. Both angles → simultaneous `(x + y·tan ax, x·tan ay + y)`;
/// a single angle delegates to the one-axis variant.
pub fn skew(points: &[Point], ax: Option<f64>, ay: Option<f64>) -> Result<Vec<Point>> {
    match (ax, ay) {
        (Some(ax), Some(ay)) => {
            let (tx, ty) = (ax.tan(), ay.tan());
            Ok(points
                .iter()
                .map(|p| Point::new(p.x + p.y * tx, p.x * ty + p.y))
                .collect())
        }
        (Some(ax), None) => Ok(skew_x(points, ax)),
        (None, Some(ay)) => Ok(skew_y(points, ay)),
        (None, None) => Err(GeomError::MissingArgument {
            op: "skew",
            arg: "angle",
        }),
    }
}

pub fn skew_x(points: &[Point], angle: f64) -> Vec<Point> {
    let t = angle.tan();
    points.iter().map(|p| Point::new(p.x + p.y * t, p.y)).collect()
}

pub fn skew_y(points: &[Point], angle: f64) -> Vec<Point> {
    let t = angle.tan();
    points.iter().map(|p| Point::new(p.x, p.x * t + p.y)).collect()
}

/// Point reflection through `pivot`.
pub fn flip(points: &[Point], pivot: Point) -> Vec<Point> {
    points.iter().map(|p| pivot * 2.0 - p).collect()
}

/// Mirror about the x-axis.
pub fn flip_x(points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| Point::new(p.x, -p.y)).collect()
}

/// Mirror about the y-axis.
pub fn flip_y(points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| Point::new(-p.x, p.y)).collect()
}

/// Point reflection through the origin.
pub fn flip_xy(points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| Point::new(-p.x, -p.y)).collect()
}

/// Mirror about the line `y = x`.
pub fn flip_diagonal(points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| Point::new(p.y, p.x)).collect()
}

/// Concatenate, sort lexicographically and drop exact duplicates.
fn merge_unique(original: &[Point], mirrored: Vec<Point>) -> Vec<Point> {
    let mut out = Vec::with_capacity(original.len() + mirrored.len());
    out.extend_from_slice(original);
    out.extend(mirrored);
    out.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    out.dedup();
    out
}

pub fn reflect(points: &[Point], pivot: Point) -> Vec<Point> {
    merge_unique(points, flip(points, pivot))
}

pub fn reflect_x(points: &[Point]) -> Vec<Point> {
    merge_unique(points, flip_x(points))
}

pub fn reflect_y(points: &[Point]) -> Vec<Point> {
    merge_unique(points, flip_y(points))
}

pub fn reflect_xy(points: &[Point]) -> Vec<Point> {
    merge_unique(points, flip_xy(points))
}

pub fn reflect_diagonal(points: &[Point]) -> Vec<Point> {
    merge_unique(points, flip_diagonal(points))
}

/// Row-vector product `[x y] · m` for every point.
pub fn dot(points: &[Point], m: &Matrix2<f64>) -> Vec<Point> {
    points
        .iter()
        .map(|p| {
            Point::new(
                p.x * m[(0, 0)] + p.y * m[(1, 0)],
                p.x * m[(0, 1)] + p.y * m[(1, 1)],
            )
        })
        .collect()
}

/// [`dot`] for a dynamically sized matrix; anything but 2x2 is rejected.
pub fn dot_dyn(points: &[Point], m: &DMatrix<f64>) -> Result<Vec<Point>> {
    if m.shape() != (2, 2) {
        return Err(GeomError::MatrixShape {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    let m2 = Matrix2::new(m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
    Ok(dot(points, &m2))
}

/// Lens distortion model for [`distort`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistortMethod {
    /// Magnification decreases away from the centre.
    Barrel,
    /// Magnification increases away from the centre.
    Pincushion,
}

impl FromStr for DistortMethod {
    type Err = GeomError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "barrel" => Ok(DistortMethod::Barrel),
            "pincushion" => Ok(DistortMethod::Pincushion),
            _ => Err(GeomError::constraint(
                "distort",
                "method",
                format!("must be `barrel` or `pincushion`, got `{s}`"),
            )),
        }
    }
}

/// Radial distortion about the vertex centroid.
pub fn distort(points: &[Point], method: DistortMethod, rate: f64) -> Result<Vec<Point>> {
    let rate = match method {
        DistortMethod::Barrel => rate,
        DistortMethod::Pincushion => {
            if !(rate < 1.0) {
                return Err(GeomError::InvalidRate {
                    method: "pincushion",
                    rate,
                });
            }
            -rate
        }
    };
    let c = centroid(points)?;
    radial_warp(points, c, rate, false, "distort")
}

/// Pull points towards `pivot`.
pub fn focus(points: &[Point], pivot: Point, rate: f64) -> Result<Vec<Point>> {
    radial_warp(points, pivot, rate, false, "focus")
}

/// Push points away from `pivot` (radius inverted to `(R − r)/R`).
/// The warp is centred on `pivot` itself, the same centre `focus` uses.
pub fn shatter(points: &[Point], pivot: Point, rate: f64) -> Result<Vec<Point>> {
    radial_warp(points, pivot, rate, true, "shatter")
}

/// Shared model: `p' = pivot + (p − pivot) / sqrt(1 + rate·r²)` with `r`
/// normalized by the largest radius.
fn radial_warp(
    points: &[Point],
    pivot: Point,
    rate: f64,
    invert: bool,
    method: &'static str,
) -> Result<Vec<Point>> {
    // r ∈ [0, 1], so 1 + rate·r² stays positive iff rate > -1.
    if !rate.is_finite() || rate <= -1.0 {
        return Err(GeomError::InvalidRate { method, rate });
    }
    let radii: Vec<f64> = points.iter().map(|p| (p - pivot).norm()).collect();
    let r_max = radii.iter().copied().fold(0.0, f64::max);
    if r_max == 0.0 {
        return Ok(points.to_vec());
    }
    Ok(points
        .iter()
        .zip(&radii)
        .map(|(p, &r)| {
            let r = if invert { (r_max - r) / r_max } else { r / r_max };
            let d = (1.0 + rate * r * r).sqrt();
            pivot + (p - pivot) / d
        })
        .collect())
}

/// One step of a transform pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    Scale { sx: f64, sy: Option<f64> },
    ScaleX(f64),
    ScaleY(f64),
    Translate { dx: f64, dy: f64 },
    TranslateX(f64),
    TranslateY(f64),
    /// Rotation about the vertex centroid of the points it is applied to.
    RotateAboutCenter(f64),
    RotateX(f64),
    RotateY(f64),
    /// Rotation about the origin.
    RotateZ(f64),
    Rotate3d { yaw: f64, pitch: f64, roll: f64 },
    Skew { ax: Option<f64>, ay: Option<f64> },
    SkewX(f64),
    SkewY(f64),
    Reflect(Point),
    ReflectX,
    ReflectY,
    ReflectXY,
    ReflectDiagonal,
    Flip(Point),
    FlipX,
    FlipY,
    FlipXY,
    FlipDiagonal,
    Dot(Matrix2<f64>),
    Distort { method: DistortMethod, rate: f64 },
    Focus { pivot: Point, rate: f64 },
    Shatter { pivot: Point, rate: f64 },
}

impl Transform {
    /// True for steps that may change the number of points.
    pub fn merges_points(&self) -> bool {
        matches!(
            self,
            Transform::Reflect(_)
                | Transform::ReflectX
                | Transform::ReflectY
                | Transform::ReflectXY
                | Transform::ReflectDiagonal
        )
    }

    /// Factor by which a generating radius survives this step, if it does.
    ///
    /// Rigid motions keep it, uniform scaling multiplies it, anything that
    /// bends or merges the point set invalidates it.
    pub fn radius_factor(&self) -> Option<f64> {
        use Transform::*;
        match *self {
            Translate { .. } | TranslateX(_) | TranslateY(_) => Some(1.0),
            RotateAboutCenter(_) | RotateZ(_) => Some(1.0),
            Flip(_) | FlipX | FlipY | FlipXY | FlipDiagonal => Some(1.0),
            Scale { sx, sy: None } => Some(sx.abs()),
            Scale { sx, sy: Some(sy) } if sx.abs() == sy.abs() => Some(sx.abs()),
            _ => None,
        }
    }

    pub fn apply(&self, points: &[Point]) -> Result<Vec<Point>> {
        use Transform::*;
        Ok(match *self {
            Scale { sx, sy } => scale(points, sx, sy),
            ScaleX(s) => scale_x(points, s),
            ScaleY(s) => scale_y(points, s),
            Translate { dx, dy } => translate(points, dx, dy),
            TranslateX(dx) => translate_x(points, dx),
            TranslateY(dy) => translate_y(points, dy),
            RotateAboutCenter(a) => rotate_about(points, centroid(points)?, a),
            RotateX(a) => rotate_x(points, a),
            RotateY(a) => rotate_y(points, a),
            RotateZ(a) => rotate_z(points, a),
            Rotate3d { yaw, pitch, roll } => rotate_3d(points, yaw, pitch, roll),
            Skew { ax, ay } => skew(points, ax, ay)?,
            SkewX(a) => skew_x(points, a),
            SkewY(a) => skew_y(points, a),
            Reflect(p) => reflect(points, p),
            ReflectX => reflect_x(points),
            ReflectY => reflect_y(points),
            ReflectXY => reflect_xy(points),
            ReflectDiagonal => reflect_diagonal(points),
            Flip(p) => flip(points, p),
            FlipX => flip_x(points),
            FlipY => flip_y(points),
            FlipXY => flip_xy(points),
            FlipDiagonal => flip_diagonal(points),
            Dot(m) => dot(points, &m),
            Distort { method, rate } => distort(points, method, rate)?,
            Focus { pivot, rate } => focus(points, pivot, rate)?,
            Shatter { pivot, rate } => shatter(points, pivot, rate)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::coords::approx_eq_points;
    use nalgebra::{dmatrix, matrix};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

    fn square() -> Vec<Point> {
        vec![
            Point::new(1.0, 1.0),
            Point::new(-1.0, 1.0),
            Point::new(-1.0, -1.0),
            Point::new(1.0, -1.0),
        ]
    }

    fn tri() -> Vec<Point> {
        vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 0.5),
            Point::new(-2.0, 4.0),
        ]
    }

    #[test]
    fn scale_and_translate() {
        let p = tri();
        let s = scale(&p, 2.0, None);
        assert_eq!(s[0], Point::new(2.0, 4.0));
        let s = scale(&p, 2.0, Some(3.0));
        assert_eq!(s[1], Point::new(6.0, 1.5));
        assert_eq!(scale_x(&p, 3.0)[2], Point::new(-6.0, 4.0));
        assert_eq!(scale_y(&p, 0.5)[2], Point::new(-2.0, 2.0));
        assert_eq!(translate(&p, 5.0, -25.0)[0], Point::new(6.0, -23.0));
        assert_eq!(translate_x(&p, 5.0)[0], Point::new(6.0, 2.0));
        assert_eq!(translate_y(&p, 25.0)[0], Point::new(1.0, 27.0));
        // input untouched
        assert_eq!(p, tri());
    }

    #[test]
    fn rotations() {
        let p = vec![Point::new(2.0, 0.0)];
        let r = rotate(&p, FRAC_PI_2);
        assert!(r[0].x.abs() < 1e-12 && (r[0].y - 2.0).abs() < 1e-12);
        assert_eq!(rotate(&p, 0.3), rotate_z(&p, 0.3));

        let q = vec![Point::new(3.0, 4.0)];
        let rx = rotate_x(&q, FRAC_PI_3);
        assert_eq!(rx[0].x, 3.0);
        assert!((rx[0].y - 2.0).abs() < 1e-12);
        let ry = rotate_y(&q, FRAC_PI_3);
        assert!((ry[0].x - 1.5).abs() < 1e-12);
        assert_eq!(ry[0].y, 4.0);
    }

    #[test]
    fn rotate_3d_matches_projection_formula() {
        let p = vec![Point::new(1.5, -2.0)];
        let (yaw, pitch, roll) = (FRAC_PI_6, FRAC_PI_3, -FRAC_PI_4);
        let out = rotate_3d(&p, yaw, pitch, roll);
        let (x, y) = (1.5f64, -2.0f64);
        let rx = x * yaw.cos() * pitch.cos()
            + y * (yaw.cos() * pitch.sin() * roll.sin() - yaw.sin() * roll.cos());
        let ry = x * yaw.sin() * pitch.cos()
            + y * (yaw.sin() * pitch.sin() * roll.sin() + yaw.cos() * roll.cos());
        assert_eq!(out[0], Point::new(rx, ry));
        // pitch = roll = 0 reduces to a plain rotation
        let plain = rotate_3d(&p, yaw, 0.0, 0.0);
        assert!(approx_eq_points(&plain, &rotate_z(&p, yaw), 1e-12));
    }

    #[test]
    fn skew_variants() {
        let p = vec![Point::new(1.0, 2.0)];
        let both = skew(&p, Some(FRAC_PI_4), Some(FRAC_PI_4)).unwrap();
        assert!((both[0].x - 3.0).abs() < 1e-12 && (both[0].y - 3.0).abs() < 1e-12);
        assert_eq!(skew(&p, Some(0.4), None).unwrap(), skew_x(&p, 0.4));
        assert_eq!(skew(&p, None, Some(0.4)).unwrap(), skew_y(&p, 0.4));
        assert_eq!(
            skew(&p, None, None),
            Err(GeomError::MissingArgument {
                op: "skew",
                arg: "angle"
            })
        );
    }

    #[test]
    fn flips() {
        let p = vec![Point::new(20.0, -30.0)];
        assert_eq!(flip(&p, Point::new(-15.0, 10.0))[0], Point::new(-50.0, 50.0));
        assert_eq!(flip_x(&p)[0], Point::new(20.0, 30.0));
        assert_eq!(flip_y(&p)[0], Point::new(-20.0, -30.0));
        assert_eq!(flip_xy(&p)[0], Point::new(-20.0, 30.0));
        assert_eq!(flip_diagonal(&p)[0], Point::new(-30.0, 20.0));
    }

    #[test]
    fn reflect_merges_flip_replaces() {
        let p = tri();
        let r = reflect_x(&p);
        assert!(r.len() >= p.len());
        assert_eq!(r.len(), 6);
        assert_eq!(flip_x(&p).len(), p.len());
        // a symmetric set gains nothing
        assert_eq!(reflect_x(&square()).len(), 4);
        assert_eq!(reflect_y(&square()).len(), 4);
        assert_eq!(reflect_xy(&square()).len(), 4);
        // sorted lexicographically like a unique() over rows
        let d = reflect_diagonal(&[Point::new(1.0, 0.0)]);
        assert_eq!(d, vec![Point::new(0.0, 1.0), Point::new(1.0, 0.0)]);
        let about = reflect(&[Point::new(1.0, 1.0)], Point::new(0.0, 0.0));
        assert_eq!(about, vec![Point::new(-1.0, -1.0), Point::new(1.0, 1.0)]);
    }

    #[test]
    fn dot_row_vector_convention() {
        let p = vec![Point::new(1.0, 1.0)];
        let m = matrix![1.0, 0.5; -0.5, -2.0];
        assert_eq!(dot(&p, &m)[0], Point::new(0.5, -1.5));
        let md = dmatrix![1.0, 0.5; -0.5, -2.0];
        assert_eq!(dot_dyn(&p, &md).unwrap(), dot(&p, &m));
        assert_eq!(
            dot_dyn(&p, &dmatrix![1.0, 0.0, 0.0; 0.0, 1.0, 0.0]),
            Err(GeomError::MatrixShape { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn distort_barrel_and_pincushion() {
        let sq = square();
        let barrel = distort(&sq, DistortMethod::Barrel, 0.5).unwrap();
        // all corners share r = R, so every point moves by 1/sqrt(1.5)
        let k = 1.0 / 1.5f64.sqrt();
        assert!((barrel[0] - Point::new(k, k)).norm() < 1e-12);

        let pin = distort(&sq, DistortMethod::Pincushion, 0.5).unwrap();
        let k = 1.0 / 0.5f64.sqrt();
        assert!((pin[0] - Point::new(k, k)).norm() < 1e-12);

        assert!(matches!(
            distort(&sq, DistortMethod::Pincushion, 1.0),
            Err(GeomError::InvalidRate { .. })
        ));
        assert!(distort(&sq, DistortMethod::Barrel, -1.0).is_err());
        assert_eq!("barrel".parse::<DistortMethod>(), Ok(DistortMethod::Barrel));
        assert!("fisheye".parse::<DistortMethod>().is_err());
    }

    #[test]
    fn focus_and_shatter() {
        let pivot = Point::new(0.0, 0.0);
        let p = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        let f = focus(&p, pivot, 3.0).unwrap();
        assert_eq!(f[0], Point::new(0.0, 0.0));
        // r = 1/2 → d = sqrt(1 + 3/4)
        assert!((f[1].x - 1.0 / 1.75f64.sqrt()).abs() < 1e-12);
        assert!((f[2].x - 1.0).abs() < 1e-12);

        let s = shatter(&p, pivot, 3.0).unwrap();
        // farthest point has inverted radius 0 and stays put
        assert!((s[2].x - 2.0).abs() < 1e-12);
        assert!((s[1].x - 1.0 / 1.75f64.sqrt()).abs() < 1e-12);

        // centred on the pivot as given: a point on it does not move
        let s = shatter(&p, Point::new(2.0, 0.0), 3.0).unwrap();
        assert_eq!(s[2], Point::new(2.0, 0.0));
        assert!((s[1].x - (2.0 - 1.0 / 1.75f64.sqrt())).abs() < 1e-12);

        // all points on the pivot: nothing to normalize by
        let same = vec![Point::new(1.0, 1.0); 3];
        assert_eq!(focus(&same, Point::new(1.0, 1.0), 0.5).unwrap(), same);
        assert!(focus(&p, pivot, f64::NAN).is_err());
    }

    #[test]
    fn pipeline_steps_match_functions() {
        let p = tri();
        assert_eq!(
            Transform::Translate { dx: 1.0, dy: 2.0 }.apply(&p).unwrap(),
            translate(&p, 1.0, 2.0)
        );
        let c = centroid(&p).unwrap();
        let spun = Transform::RotateAboutCenter(1.1).apply(&p).unwrap();
        assert!((centroid(&spun).unwrap() - c).norm() < 1e-12);
        assert!(Transform::ReflectX.merges_points());
        assert!(!Transform::FlipX.merges_points());
        assert!(Transform::Skew { ax: None, ay: None }.apply(&p).is_err());
    }

    fn point_set() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..40)
            .prop_map(|v| v.into_iter().map(|(x, y)| Point::new(x, y)).collect())
    }

    proptest! {
        #[test]
        fn flips_are_involutions(p in point_set()) {
            prop_assert_eq!(flip_x(&flip_x(&p)), p.clone());
            prop_assert_eq!(flip_y(&flip_y(&p)), p.clone());
            prop_assert_eq!(flip_xy(&flip_xy(&p)), p.clone());
            prop_assert_eq!(flip_diagonal(&flip_diagonal(&p)), p);
        }

        #[test]
        fn rotate_round_trip(p in point_set(), a in -6.3f64..6.3) {
            let back = rotate(&rotate(&p, a), -a);
            prop_assert!(approx_eq_points(&back, &p, 1e-9));
        }

        #[test]
        fn reflect_never_shrinks(p in point_set()) {
            let mut unique = p.clone();
            unique.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
            unique.dedup();
            prop_assert!(reflect_x(&p).len() >= unique.len());
            prop_assert_eq!(flip_x(&p).len(), p.len());
        }
    }
}
