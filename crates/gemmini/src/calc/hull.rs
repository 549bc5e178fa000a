//! Hull extraction: alpha-shape concave hull over a Delaunay triangulation and
//! Andrew's monotone chain convex hull.
//!
//! Model (concave)
//! - Triangulate, drop triangles whose circumradius is at least `scale/alpha`
//!   (`scale` = half the bounding-box diagonal).
//! - Map each edge to the opposite vertices of its surviving triangles; edges
//!   with exactly one opposite vertex are boundary candidates.
//! - Erode candidates inward with a worklist. A candidate is kept when the
//!   opposite vertex already touches a boundary edge, so erosion never
//!   disconnects the shape.
//! - Walk the surviving boundary edges into an ordered vertex ring.
//!
//! Hull results refer to the input by index so callers can turn them into
//! rings of an existing point set.

use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};

use spade::{DelaunayTriangulation, Point2, Triangulation};
use tracing::{trace, warn};

use super::coords::{bounding_box, outer_product, Point};
use crate::error::{GeomError, Result};

/// Ordered boundary of a point set, as indices into that set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hull {
    /// Boundary vertices in walking order.
    pub vertices: Vec<usize>,
    /// Boundary edges, in walking order.
    pub edges: Vec<(usize, usize)>,
}

impl Hull {
    /// Ring `0, 1, …, n-1` closed back to `0`.
    fn passthrough(n: usize) -> Self {
        Self {
            vertices: (0..n).collect(),
            edges: (0..n).map(|i| (i, (i + 1) % n)).collect(),
        }
    }

    /// Boundary coordinates taken from `src`.
    pub fn points(&self, src: &[Point]) -> Vec<Point> {
        self.vertices.iter().map(|&i| src[i]).collect()
    }
}

/// Concave hull with the default degeneracy threshold (exactly-zero area).
pub fn concave_hull(points: &[Point], alpha: f64) -> Result<Hull> {
    concave_hull_eps(points, alpha, 0.0)
}

/// Concave hull; triangles with Heron area `<= eps_area` are ignored.
pub fn concave_hull_eps(points: &[Point], alpha: f64, eps_area: f64) -> Result<Hull> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(GeomError::constraint(
            "concave_hull",
            "alpha",
            format!("must be a positive number, got {alpha}"),
        ));
    }
    let n = points.len();
    if n < 4 {
        // a triangle or less has no interior to carve
        return Ok(Hull::passthrough(n));
    }
    let radius_limit = bounding_box(points)?.half_diagonal() / alpha;

    let mut opp: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for mut tri in delaunay(points)? {
        tri.sort_unstable();
        let [i, j, k] = tri;
        let a = (points[i] - points[j]).norm();
        let b = (points[j] - points[k]).norm();
        let c = (points[i] - points[k]).norm();
        let s = (a + b + c) / 2.0;
        let area = (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt();
        if area <= eps_area {
            trace!(i, j, k, "skipping degenerate triangle");
            continue;
        }
        let circumradius = a * b * c / (4.0 * area);
        if circumradius < radius_limit {
            link(&mut opp, &mut neighbors, (i, j), k);
            link(&mut opp, &mut neighbors, (j, k), i);
            link(&mut opp, &mut neighbors, (i, k), j);
        }
    }

    let mut queue: Vec<(usize, usize)> = opp
        .iter()
        .filter(|(_, v)| v.len() == 1)
        .map(|(e, _)| *e)
        .collect();
    let mut erased: BTreeSet<(usize, usize)> = BTreeSet::new();
    while let Some((i, j)) = queue.pop() {
        if erased.contains(&(i, j)) {
            continue;
        }
        let k = match opp.get(&(i, j)) {
            Some(v) if v.len() == 1 => v[0],
            _ => continue,
        };
        let erasable = neighbors[k]
            .iter()
            .all(|&nb| opp.get(&key(nb, k)).map_or(true, |v| v.len() != 1));
        if !erasable {
            continue;
        }
        erased.insert((i, j));
        for (edge, gone) in [(key(i, k), j), (key(j, k), i)] {
            if let Some(v) = opp.get_mut(&edge) {
                if let Some(pos) = v.iter().position(|&x| x == gone) {
                    v.remove(pos);
                }
            }
            queue.push(edge);
        }
    }

    let remaining: Vec<(usize, usize)> = opp
        .iter()
        .filter(|(e, v)| v.len() == 1 && !erased.contains(*e))
        .map(|(e, _)| *e)
        .collect();
    if remaining.len() < 3 {
        return Err(GeomError::HullCollapsed {
            edges: remaining.len(),
        });
    }
    Ok(walk(remaining))
}

#[inline]
fn key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

fn link(
    opp: &mut BTreeMap<(usize, usize), Vec<usize>>,
    neighbors: &mut [Vec<usize>],
    (i, j): (usize, usize),
    k: usize,
) {
    match opp.entry((i, j)) {
        Entry::Occupied(mut e) => e.get_mut().push(k),
        Entry::Vacant(e) => {
            e.insert(vec![k]);
            neighbors[i].push(j);
            neighbors[j].push(i);
        }
    }
}

/// Depth-first walk along the boundary edge set, starting from its first edge.
fn walk(mut edges: Vec<(usize, usize)>) -> Hull {
    let mut vertices = Vec::with_capacity(edges.len());
    let mut walked = Vec::with_capacity(edges.len());
    let mut q = edges[0].1;
    while !edges.is_empty() {
        match edges.iter().position(|&(a, b)| a == q || b == q) {
            Some(pos) => {
                let e = edges.remove(pos);
                vertices.push(q);
                walked.push(e);
                q = if e.0 == q { e.1 } else { e.0 };
            }
            None => {
                warn!(
                    detached = edges.len(),
                    "concave hull boundary is not a single ring; keeping the first"
                );
                break;
            }
        }
    }
    Hull {
        vertices,
        edges: walked,
    }
}

/// Delaunay triangles as triples of input indices (duplicates map to their first occurrence).
fn delaunay(points: &[Point]) -> Result<Vec<[usize; 3]>> {
    let mut tri: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    let mut to_input: Vec<Option<usize>> = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        let h = tri
            .insert(Point2::new(p.x, p.y))
            .map_err(|e| GeomError::Triangulation(format!("point {i}: {e:?}")))?;
        let slot = h.index();
        if slot >= to_input.len() {
            to_input.resize(slot + 1, None);
        }
        to_input[slot].get_or_insert(i);
    }
    let lookup = |h: usize| {
        to_input
            .get(h)
            .copied()
            .flatten()
            .ok_or_else(|| GeomError::Triangulation(format!("unknown vertex handle {h}")))
    };
    tri.inner_faces()
        .map(|face| {
            let [a, b, c] = face.vertices();
            Ok([
                lookup(a.fix().index())?,
                lookup(b.fix().index())?,
                lookup(c.fix().index())?,
            ])
        })
        .collect()
}

/// Andrew's monotone chain (CCW hull as input indices). `None` for fewer than
/// three distinct points or collinear input.
pub fn convex_hull(points: &[Point]) -> Option<Hull> {
    let mut idx: Vec<usize> = (0..points.len()).collect();
    idx.sort_by(|&a, &b| {
        points[a]
            .x
            .total_cmp(&points[b].x)
            .then(points[a].y.total_cmp(&points[b].y))
    });
    idx.dedup_by(|a, b| (points[*a] - points[*b]).norm() < 1e-12);
    if idx.len() < 3 {
        return None;
    }
    let turn = |o: usize, a: usize, b: usize| outer_product(points[o], points[a], Some(points[b]));
    let mut lower: Vec<usize> = Vec::with_capacity(idx.len());
    for &p in &idx {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<usize> = Vec::with_capacity(idx.len());
    for &p in idx.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    let mut vertices = lower;
    vertices.extend(upper);
    if vertices.len() < 3 {
        return None;
    }
    let n = vertices.len();
    let edges = (0..n).map(|i| (vertices[i], vertices[(i + 1) % n])).collect();
    Some(Hull { vertices, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn unit_square_with_center() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.5, 0.5),
        ]
    }

    #[test]
    fn fewer_than_four_points_pass_through() {
        let tri = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 3.0),
        ];
        let h = concave_hull(&tri, 0.9).unwrap();
        assert_eq!(h.vertices, vec![0, 1, 2]);
        assert_eq!(h.edges, vec![(0, 1), (1, 2), (2, 0)]);
        assert_eq!(h.points(&tri), tri);

        let two = &tri[..2];
        assert_eq!(concave_hull(two, 0.9).unwrap().vertices, vec![0, 1]);
    }

    #[test]
    fn square_with_center_is_carved_once() {
        let pts = unit_square_with_center();
        let h = concave_hull(&pts, 0.9).unwrap();
        // one side erodes to the center, the other three corners are pinned
        assert_eq!(h.vertices.len(), 5);
        assert_eq!(h.edges.len(), 5);
        assert!(h.vertices.contains(&4));
        for w in h.edges.windows(2) {
            let shared = [w[0].0, w[0].1]
                .iter()
                .any(|v| *v == w[1].0 || *v == w[1].1);
            assert!(shared, "walk must follow connected edges");
        }
    }

    #[test]
    fn collinear_points_collapse() {
        let line: Vec<Point> = (0..6).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
        assert!(matches!(
            concave_hull(&line, 0.9),
            Err(GeomError::HullCollapsed { edges: 0 })
        ));
    }

    #[test]
    fn alpha_must_be_positive() {
        let pts = unit_square_with_center();
        assert!(matches!(
            concave_hull(&pts, 0.0),
            Err(GeomError::Constraint { param: "alpha", .. })
        ));
    }

    #[test]
    fn random_cloud_yields_a_ring() {
        let mut rng = StdRng::seed_from_u64(7);
        let pts: Vec<Point> = (0..25)
            .map(|_| Point::new(rng.gen::<f64>(), rng.gen::<f64>()))
            .collect();
        let h = concave_hull(&pts, 0.9).unwrap();
        assert!(h.vertices.len() >= 3);
        assert_eq!(h.vertices.len(), h.edges.len());
        assert!(h.vertices.iter().all(|&i| i < pts.len()));
    }

    #[test]
    fn duplicates_are_tolerated() {
        let mut pts = unit_square_with_center();
        pts.push(Point::new(1.0, 1.0));
        let h = concave_hull(&pts, 0.9).unwrap();
        // the duplicate never appears; its first occurrence stands in for it
        assert!(!h.vertices.contains(&5));
    }

    #[test]
    fn convex_hull_ccw_indices() {
        let pts = unit_square_with_center();
        let h = convex_hull(&pts).unwrap();
        assert_eq!(h.vertices.len(), 4);
        assert!(!h.vertices.contains(&4));
        assert_eq!(h.edges.len(), 4);
        let ring = h.points(&pts);
        let twice_area: f64 = (0..ring.len())
            .map(|i| outer_product(ring[i], ring[(i + 1) % ring.len()], None))
            .sum();
        assert!((twice_area - 2.0).abs() < 1e-12);

        assert!(convex_hull(&pts[..2]).is_none());
        let line: Vec<Point> = (0..4).map(|i| Point::new(i as f64, 0.0)).collect();
        assert!(convex_hull(&line).is_none());
    }
}
