//! Interior sampling for planar shapes.
//!
//! A regular grid is laid over the bounding box with `axis_len * density /
//! shorter_axis_len` samples per axis, so the shorter axis always gets
//! `density` samples. Grid points are kept by an even-odd point-in-polygon test.
//! Thin boxes blow the long axis up, so the grid size is checked against a cap
//! before anything is allocated.

use tracing::warn;

use super::coords::{bounding_box, linspace, BoundingBox, Point};
use crate::cfg::GeomCfg;
use crate::error::{GeomError, Result};

/// Even-odd (ray casting) test of `p` against the closed ring `ring`.
pub fn contains_point(ring: &[Point], p: Point) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn sample_grid(
    bbox: &BoundingBox,
    density: usize,
    max_points: usize,
) -> Result<Option<Vec<Point>>> {
    let (w, h) = bbox.dim();
    let shorter = w.min(h);
    if !(shorter > 0.0) {
        warn!(width = w, height = h, "degenerate fill box; returning boundary only");
        return Ok(None);
    }
    let steps = |len: f64| (len * density as f64 / shorter).round().max(2.0);
    let (nx, ny) = (steps(w), steps(h));
    if nx * ny > max_points as f64 {
        return Err(GeomError::constraint(
            "fill",
            "density",
            format!("a {nx}x{ny} grid exceeds the cap of {max_points} points"),
        ));
    }
    let xs = linspace(bbox.x_min, bbox.x_max, nx as usize);
    let ys = linspace(bbox.y_min, bbox.y_max, ny as usize);
    Ok(Some(
        ys.iter()
            .flat_map(|&y| xs.iter().map(move |&x| Point::new(x, y)))
            .collect(),
    ))
}

fn check_density(density: usize) -> Result<()> {
    if density == 0 {
        return Err(GeomError::constraint("fill", "density", "must be at least 1"));
    }
    Ok(())
}

/// Boundary points followed by the grid points inside the boundary ring.
/// The grid is capped at the default [`GeomCfg::max_fill_points`].
pub fn interior_pixels(boundary: &[Point], density: usize) -> Result<Vec<Point>> {
    check_density(density)?;
    let bbox = bounding_box(boundary)?;
    let mut out = boundary.to_vec();
    if let Some(grid) = sample_grid(&bbox, density, GeomCfg::default().max_fill_points)? {
        out.extend(grid.into_iter().filter(|&p| contains_point(boundary, p)));
    }
    Ok(out)
}

/// Like [`interior_pixels`] for ring-structured point sets: a grid point is
/// kept when it lies inside some outer ring and outside every inner ring.
/// Grids larger than `max_points` are refused.
pub fn interior_pixels_rings(
    points: &[Point],
    outer: &[Vec<usize>],
    inner: &[Vec<usize>],
    density: usize,
    max_points: usize,
) -> Result<Vec<Point>> {
    check_density(density)?;
    let resolve = |rings: &[Vec<usize>]| -> Result<Vec<Vec<Point>>> {
        rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(|&index| {
                        points.get(index).copied().ok_or(GeomError::RingIndex {
                            kind: "fill",
                            index,
                            len: points.len(),
                        })
                    })
                    .collect()
            })
            .collect()
    };
    let outer = resolve(outer)?;
    let inner = resolve(inner)?;
    let mut out = points.to_vec();
    let rim: Vec<Point> = outer.iter().flatten().copied().collect();
    if rim.is_empty() {
        return Ok(out);
    }
    if let Some(grid) = sample_grid(&bounding_box(&rim)?, density, max_points)? {
        out.extend(grid.into_iter().filter(|&p| {
            outer.iter().any(|r| contains_point(r, p)) && !inner.iter().any(|r| contains_point(r, p))
        }));
    }
    Ok(out)
}
