//! Numeric defaults shared by the measurement API.
//!
//! - `GeomCfg`: hull tightness, fill density and its grid cap, and the
//!   degeneracy threshold for Delaunay triangles. Every `Geometry` carries one;
//!   callers override it with `Geometry::with_cfg`.

/// Geometry configuration (defaults and tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Alpha used by the concave hull (`area()` fallback and `hull()` default).
    pub hull_alpha: f64,
    /// Grid density used by `interior()` when none is given.
    pub fill_density: usize,
    /// Largest fill grid `interior()` will lay out before refusing.
    pub max_fill_points: usize,
    /// Triangles with a Heron area at or below this are skipped by the hull.
    pub eps_area: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            hull_alpha: 0.9,
            fill_density: 16,
            max_fill_points: 1_000_000,
            eps_area: 0.0,
        }
    }
}
