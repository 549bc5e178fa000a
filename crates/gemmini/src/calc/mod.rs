//! Stateless numeric building blocks: coordinates, hulls, interior fill and area.

pub mod area;
pub mod coords;
pub mod fill;
pub mod hull;

pub use area::{polygon_area, signed_ring_area};
pub use coords::{
    approx_eq_points, bounding_box, centroid, distance, is_point, is_point_set, linspace,
    outer_product, pairwise_distance, polar, polar_pixels, rotate_points, to_point_array,
    BoundingBox, Point, Radius, RawCoords, Rotate,
};
pub use fill::{contains_point, interior_pixels, interior_pixels_rings};
pub use hull::{concave_hull, concave_hull_eps, convex_hull, Hull};
