//! Parametric 2D geometry: shapes as generated point sets, a shared transform
//! pipeline and measurements computed from the raw points.
//!
//! Layout
//! - `calc`: stateless numerics (coordinates, hulls, interior fill, area).
//! - `transform`: pure point-set transforms and the `Transform` step enum.
//! - `gem`: the `Geometry` entity and the `Shape` trait producers implement.
//! - `shapes`: the shape catalog.
//! - `draw`: draw list consumed by a canvas.

pub mod calc;
pub mod cfg;
pub mod draw;
pub mod error;
pub mod gem;
pub mod rand;
pub mod shapes;
pub mod transform;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use calc::{BoundingBox, Point};
pub use cfg::GeomCfg;
pub use error::{GeomError, Result};
pub use gem::{Geometry, Rings, Shape};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::calc::{BoundingBox, Hull, Point, RawCoords};
    pub use crate::cfg::GeomCfg;
    pub use crate::draw::DrawList;
    pub use crate::error::{GeomError, Result};
    pub use crate::gem::{Geometry, Rings, Shape};
    pub use crate::rand::ReplayToken;
    pub use crate::shapes::{
        Arc, Circle, ConcaveStar, Cycloid, Dot, Ellipse, Epicycloid, Grid, Hypocycloid, Kite,
        Line, Lissajous, Parallelogram, PointCloud, Polygon, RandomCloud, Rectangle,
        RegularPolygon, Rhombus, Segment, SegmentSpec, Spiral, SpiralKind, Trapezoid,
    };
    pub use crate::transform::{DistortMethod, Transform};
    pub use nalgebra::Matrix2 as Mat2;
}
