//! JSON report of a geometry's measurements.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gemmini::prelude::{BoundingBox, Geometry, Point};
use serde::Serialize;

/// Measurements of one geometry, as printed by `gemmini shape` and `gemmini points`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub kind: &'static str,
    pub params: Vec<(&'static str, f64)>,
    pub planar: bool,
    pub len: usize,
    pub revision: u64,
    pub bounding_box: BoundingBox,
    pub center: [f64; 2],
    pub dim: [f64; 2],
    pub rad: f64,
    pub area: f64,
    pub coords: Vec<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hull: Option<Vec<[f64; 2]>>,
}

/// What to compute beyond the basic measurements.
#[derive(Clone, Copy, Debug, Default)]
pub struct Extras {
    pub fill: bool,
    pub hull: bool,
}

fn xy(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

impl Report {
    pub fn of(g: &Geometry, extras: Extras) -> Result<Self> {
        let interior = if extras.fill {
            Some(xy(&g.interior(None).context("filling the interior")?))
        } else {
            None
        };
        let hull = if extras.hull {
            let h = g.hull(None).context("computing the concave hull")?;
            Some(xy(&h.points(g.coords())))
        } else {
            None
        };
        let (w, h) = g.dim();
        let c = g.center();
        Ok(Self {
            kind: g.kind(),
            params: g.params().to_vec(),
            planar: g.is_planar(),
            len: g.len(),
            revision: g.revision(),
            bounding_box: g.bounding_box(),
            center: [c.x, c.y],
            dim: [w, h],
            rad: g.rad(),
            area: g.area(),
            coords: xy(g.coords()),
            interior,
            hull,
        })
    }

    /// Print to stdout, or write to `out` (parent directories created).
    pub fn emit(&self, out: Option<&Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        let Some(path) = out else {
            println!("{text}");
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating report dir {}", parent.display()))?;
            }
        }
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
        Ok(())
    }
}
