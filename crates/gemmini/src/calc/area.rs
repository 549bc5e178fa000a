//! Ring-based polygon area.

use super::coords::{outer_product, Point};
use crate::error::{GeomError, Result};

/// Signed area of one ring by fan triangulation from its first vertex
/// (positive for counter-clockwise rings). Indices must be valid.
pub fn signed_ring_area(ring: &[usize], points: &[Point]) -> f64 {
    let Some(&first) = ring.first() else {
        return 0.0;
    };
    let o = points[first];
    ring.windows(2)
        .skip(1)
        .map(|w| outer_product(o, points[w[0]], Some(points[w[1]])))
        .sum::<f64>()
        / 2.0
}

fn check_rings(rings: &[Vec<usize>], len: usize) -> Result<()> {
    for &index in rings.iter().flatten() {
        if index >= len {
            return Err(GeomError::RingIndex {
                kind: "polygon_area",
                index,
                len,
            });
        }
    }
    Ok(())
}

/// Area enclosed by the outer rings minus the area of the inner rings (holes).
/// Ring orientation does not matter.
pub fn polygon_area(outer: &[Vec<usize>], inner: &[Vec<usize>], points: &[Point]) -> Result<f64> {
    check_rings(outer, points.len())?;
    check_rings(inner, points.len())?;
    let sum = |rings: &[Vec<usize>]| -> f64 {
        rings
            .iter()
            .map(|r| signed_ring_area(r, points).abs())
            .sum()
    };
    Ok((sum(outer) - sum(inner)).abs())
}
