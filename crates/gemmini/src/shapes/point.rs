//! Discrete point sets: clouds, single dots and regular grids. None of them is planar.

use super::{check_at_least, check_finite, check_positive};
use crate::calc::{linspace, Point};
use crate::error::{GeomError, Result};
use crate::gem::{Rings, Shape};
use crate::rand::{uniform_points, ReplayToken};

/// An arbitrary set of points.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    pub points: Vec<Point>,
}

impl Shape for PointCloud {
    fn kind(&self) -> &'static str {
        "PointCloud"
    }
    fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(GeomError::EmptyPointSet);
        }
        Ok(())
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        Ok(self.points.clone())
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("count", self.points.len() as f64)]
    }
}

/// A single pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
}

impl Shape for Dot {
    fn kind(&self) -> &'static str {
        "Dot"
    }
    fn validate(&self) -> Result<()> {
        check_finite("Dot", "x", self.x)?;
        check_finite("Dot", "y", self.y)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        Ok(vec![Point::new(self.x, self.y)])
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("x", self.x), ("y", self.y)]
    }
}

/// `rows x cols` lattice spanning `width x height`, centred at the origin.
/// Points are emitted row by row, bottom row first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub height: f64,
    pub width: f64,
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    /// Square lattice: `num_dot` rows and columns.
    pub fn square(height: f64, width: f64, num_dot: usize) -> Self {
        Self {
            height,
            width,
            rows: num_dot,
            cols: num_dot,
        }
    }
}

impl Shape for Grid {
    fn kind(&self) -> &'static str {
        "Grid"
    }
    fn validate(&self) -> Result<()> {
        check_positive("Grid", "height", self.height)?;
        check_positive("Grid", "width", self.width)?;
        check_at_least("Grid", "rows", self.rows, 2)?;
        check_at_least("Grid", "cols", self.cols, 2)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let xs = linspace(-self.width / 2.0, self.width / 2.0, self.cols);
        let ys = linspace(-self.height / 2.0, self.height / 2.0, self.rows);
        Ok(ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| Point::new(x, y)))
            .collect())
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("height", self.height),
            ("width", self.width),
            ("rows", self.rows as f64),
            ("cols", self.cols as f64),
        ]
    }
}

/// `count` uniformly scattered points in a `width x height` box centred at the
/// origin; the draw is replayed from `token`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomCloud {
    pub count: usize,
    pub width: f64,
    pub height: f64,
    pub token: ReplayToken,
}

impl Shape for RandomCloud {
    fn kind(&self) -> &'static str {
        "RandomCloud"
    }
    fn validate(&self) -> Result<()> {
        check_at_least("RandomCloud", "count", self.count, 1)?;
        check_positive("RandomCloud", "width", self.width)?;
        check_positive("RandomCloud", "height", self.height)
    }
    fn base_coords(&self) -> Result<Vec<Point>> {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        Ok(uniform_points(self.count, self.width, self.height, self.token)
            .into_iter()
            .map(|p| Point::new(p.x - hw, p.y - hh))
            .collect())
    }
    fn rings(&self, _n: usize) -> Option<Rings> {
        None
    }
    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("count", self.count as f64),
            ("width", self.width),
            ("height", self.height),
            ("seed", self.token.seed as f64),
            ("index", self.token.index as f64),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gem::Geometry;

    #[test]
    fn grid_layout() {
        let g = Geometry::new(&Grid {
            height: 2.0,
            width: 4.0,
            rows: 2,
            cols: 3,
        })
        .unwrap();
        assert_eq!(g.len(), 6);
        assert_eq!(g.coords()[0], Point::new(-2.0, -1.0));
        assert_eq!(g.coords()[2], Point::new(2.0, -1.0));
        assert_eq!(g.coords()[5], Point::new(2.0, 1.0));
        assert!(!g.is_planar());
        assert!(g.outer_rings().is_empty());
    }

    #[test]
    fn grid_needs_two_dots_per_axis() {
        let err = Geometry::new(&Grid::square(1.0, 1.0, 1)).unwrap_err();
        assert!(matches!(
            err,
            GeomError::Constraint {
                kind: "Grid",
                param: "rows",
                ..
            }
        ));
        assert!(Geometry::new(&Grid::square(0.0, 1.0, 3)).is_err());
    }

    #[test]
    fn random_cloud_is_replayable() {
        let shape = RandomCloud {
            count: 50,
            width: 10.0,
            height: 4.0,
            token: ReplayToken::new(9, 0),
        };
        let a = Geometry::new(&shape).unwrap();
        let b = Geometry::new(&shape).unwrap();
        assert_eq!(a.coords(), b.coords());
        let bb = a.bounding_box();
        assert!(bb.x_min >= -5.0 && bb.x_max < 5.0);
        assert!(bb.y_min >= -2.0 && bb.y_max < 2.0);

        let other = RandomCloud {
            token: ReplayToken::new(9, 1),
            ..shape
        };
        assert_ne!(Geometry::new(&other).unwrap().coords(), a.coords());
    }

    #[test]
    fn clouds_and_dots() {
        assert_eq!(
            Geometry::new(&PointCloud { points: vec![] }).unwrap_err(),
            GeomError::EmptyPointSet
        );
        let d = Geometry::new(&Dot { x: 3.0, y: -1.0 }).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.center(), Point::new(3.0, -1.0));
        assert_eq!(d.rad(), 0.0);
        assert!(Geometry::new(&Dot { x: f64::INFINITY, y: 0.0 }).is_err());
    }
}
