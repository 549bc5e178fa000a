//! Shape catalog as seen from the command line: a kind name plus `k=v` params.
//!
//! Every kind has defaults for all of its parameters, so `gemmini shape circle`
//! alone is valid. Unknown parameter names are rejected rather than ignored.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use gemmini::prelude::*;

/// Kind names accepted by [`build`], with their parameters.
pub const KINDS: &[(&str, &str)] = &[
    ("dot", "x y"),
    ("grid", "height width rows cols"),
    ("random-cloud", "count width height"),
    ("segment", "num_dot length slope"),
    ("regular-polygon", "size num_dot num_vertex"),
    ("rectangle", "height width num_xdot num_ydot"),
    ("rhombus", "height width num_dot"),
    ("parallelogram", "height width num_xdot num_ydot angle"),
    ("trapezoid", "height width_top width_bottom num_dot offset"),
    ("right-trapezoid", "height width_top width_bottom num_dot"),
    ("kite", "a b num_dot"),
    ("concave-star", "size num_dot num_vertex"),
    ("circle", "radius num_dot"),
    ("arc", "radius num_dot angle"),
    ("ellipse", "height width num_dot"),
    ("spiral", "radius num_dot angle"),
    ("hyperbolic-spiral", "radius num_dot angle"),
    ("parabolic-spiral", "radius num_dot angle"),
    ("lituus-spiral", "radius num_dot angle"),
    ("logarithmic-spiral", "radius num_dot angle"),
    ("cycloid", "radius num_dot angle"),
    ("epicycloid", "p q radius num_dot"),
    ("hypocycloid", "p q radius num_dot"),
    ("curved-polygon", "size num_dot num_vertex"),
    ("lissajous", "a b radius num_dot"),
];

/// `k=v` parameters, consumed by name while building a shape.
#[derive(Debug, Default)]
pub struct Params {
    values: BTreeMap<String, f64>,
}

impl Params {
    /// Parse `k=v` pairs; a repeated key keeps the last value.
    pub fn parse<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut values = BTreeMap::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (k, v) = pair
                .split_once('=')
                .with_context(|| format!("expected `key=value`, got `{pair}`"))?;
            let v: f64 = v
                .trim()
                .parse()
                .with_context(|| format!("value of `{k}` is not a number"))?;
            values.insert(k.trim().to_string(), v);
        }
        Ok(Self { values })
    }

    fn num(&mut self, key: &str, default: f64) -> f64 {
        self.values.remove(key).unwrap_or(default)
    }

    fn count(&mut self, key: &str, default: usize) -> Result<usize> {
        match self.values.remove(key) {
            None => Ok(default),
            Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as usize),
            Some(v) => bail!("`{key}` must be a non-negative integer, got {v}"),
        }
    }

    fn finish(self, kind: &str) -> Result<()> {
        if let Some(key) = self.values.keys().next() {
            bail!("`{kind}` has no parameter `{key}`");
        }
        Ok(())
    }
}

/// Build the catalog shape `kind` from `params`. `token` seeds random kinds.
pub fn build(kind: &str, mut params: Params, token: ReplayToken) -> Result<Box<dyn Shape>> {
    let p = &mut params;
    let shape: Box<dyn Shape> = match kind {
        "dot" => Box::new(Dot {
            x: p.num("x", 0.0),
            y: p.num("y", 0.0),
        }),
        "grid" => Box::new(Grid {
            height: p.num("height", 10.0),
            width: p.num("width", 10.0),
            rows: p.count("rows", 5)?,
            cols: p.count("cols", 5)?,
        }),
        "random-cloud" => Box::new(RandomCloud {
            count: p.count("count", 100)?,
            width: p.num("width", 10.0),
            height: p.num("height", 10.0),
            token,
        }),
        "segment" => {
            let num_dot = p.count("num_dot", 10)?;
            Box::new(Segment::with_slope(
                num_dot,
                p.num("length", 10.0),
                p.num("slope", 0.0),
            ))
        }
        "regular-polygon" => Box::new(RegularPolygon {
            size: p.num("size", 5.0),
            num_dot: p.count("num_dot", 10)?,
            num_vertex: p.count("num_vertex", 6)?,
        }),
        "rectangle" => {
            let (height, width) = (p.num("height", 5.0), p.num("width", 10.0));
            let num_xdot = p.count("num_xdot", 10)?;
            Box::new(Rectangle {
                height,
                width,
                num_xdot,
                num_ydot: p.count("num_ydot", num_xdot)?,
            })
        }
        "rhombus" => Box::new(Rhombus {
            height: p.num("height", 5.0),
            width: p.num("width", 8.0),
            num_dot: p.count("num_dot", 10)?,
        }),
        "parallelogram" => {
            let (height, width) = (p.num("height", 5.0), p.num("width", 10.0));
            let num_xdot = p.count("num_xdot", 10)?;
            Box::new(Parallelogram {
                height,
                width,
                num_xdot,
                num_ydot: p.count("num_ydot", num_xdot)?,
                angle: p.num("angle", std::f64::consts::FRAC_PI_3),
            })
        }
        "trapezoid" | "right-trapezoid" => {
            let height = p.num("height", 5.0);
            let width_top = p.num("width_top", 6.0);
            let width_bottom = p.num("width_bottom", 10.0);
            let num_dot = p.count("num_dot", 10)?;
            if kind == "right-trapezoid" {
                Box::new(Trapezoid::right(height, width_top, width_bottom, num_dot))
            } else {
                Box::new(Trapezoid {
                    offset: p.num("offset", 0.0),
                    ..Trapezoid::new(height, width_top, width_bottom, num_dot)
                })
            }
        }
        "kite" => Box::new(Kite {
            a: p.num("a", 3.0),
            b: p.num("b", 6.0),
            num_dot: p.count("num_dot", 10)?,
        }),
        "concave-star" => Box::new(ConcaveStar {
            size: p.num("size", 5.0),
            num_dot: p.count("num_dot", 10)?,
            num_vertex: p.count("num_vertex", 5)?,
        }),
        "circle" => Box::new(Circle {
            radius: p.num("radius", 5.0),
            num_dot: p.count("num_dot", 64)?,
        }),
        "arc" => Box::new(Arc {
            radius: p.num("radius", 5.0),
            num_dot: p.count("num_dot", 32)?,
            angle: p.num("angle", 90.0),
        }),
        "ellipse" => Box::new(Ellipse {
            height: p.num("height", 5.0),
            width: p.num("width", 10.0),
            num_dot: p.count("num_dot", 64)?,
        }),
        "spiral" | "hyperbolic-spiral" | "parabolic-spiral" | "lituus-spiral"
        | "logarithmic-spiral" => {
            let law = match kind {
                "spiral" => SpiralKind::Archimedean,
                "hyperbolic-spiral" => SpiralKind::Hyperbolic,
                "parabolic-spiral" => SpiralKind::Parabolic,
                "lituus-spiral" => SpiralKind::Lituus,
                _ => SpiralKind::Logarithmic,
            };
            Box::new(Spiral {
                radius: p.num("radius", 5.0),
                num_dot: p.count("num_dot", 100)?,
                angle: p.num("angle", 4.0 * std::f64::consts::PI),
                law,
            })
        }
        "cycloid" => Box::new(Cycloid {
            radius: p.num("radius", 1.0),
            num_dot: p.count("num_dot", 100)?,
            angle: p.num("angle", 4.0 * std::f64::consts::PI),
        }),
        "epicycloid" | "hypocycloid" => {
            let pp = p.count("p", 3)? as u32;
            let q = p.count("q", 1)? as u32;
            let radius = p.num("radius", 5.0);
            let num_dot = p.count("num_dot", 100)?;
            if kind == "epicycloid" {
                Box::new(Epicycloid {
                    p: pp,
                    q,
                    radius,
                    num_dot,
                })
            } else {
                Box::new(Hypocycloid {
                    p: pp,
                    q,
                    radius,
                    num_dot,
                })
            }
        }
        "curved-polygon" => {
            let size = p.num("size", 5.0);
            let num_dot = p.count("num_dot", 100)?;
            Box::new(Hypocycloid::curved_polygon(
                size,
                num_dot,
                p.count("num_vertex", 4)? as u32,
            ))
        }
        "lissajous" => Box::new(Lissajous {
            a: p.num("a", 3.0),
            b: p.num("b", 2.0),
            radius: p.num("radius", 5.0),
            num_dot: p.count("num_dot", 200)?,
        }),
        other => bail!("unknown shape kind `{other}` (see `gemmini kinds`)"),
    };
    params.finish(kind)?;
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[&str]) -> Params {
        Params::parse(pairs).unwrap()
    }

    #[test]
    fn every_listed_kind_builds_with_defaults() {
        for (kind, _) in KINDS {
            let shape = build(kind, Params::default(), ReplayToken::default()).unwrap();
            assert!(Geometry::new(shape.as_ref()).is_ok(), "{kind}");
        }
    }

    #[test]
    fn params_override_defaults() {
        let shape = build(
            "circle",
            params(&["radius=2", "num_dot=8"]),
            ReplayToken::default(),
        )
        .unwrap();
        let g = Geometry::new(shape.as_ref()).unwrap();
        assert_eq!(g.len(), 8);
        assert_eq!(g.rad(), 2.0);
        assert_eq!(g.kind(), "Circle");
    }

    #[test]
    fn bad_params_are_reported() {
        let tok = ReplayToken::default();
        assert!(Params::parse(&["radius"]).is_err());
        assert!(Params::parse(&["radius=big"]).is_err());
        let err = build("circle", params(&["sides=4"]), tok).unwrap_err();
        assert!(err.to_string().contains("sides"), "{err}");
        assert!(build("circle", params(&["num_dot=2.5"]), tok).is_err());
        assert!(build("blob", Params::default(), tok).is_err());
    }

    #[test]
    fn shape_constraints_surface_at_construction() {
        let shape = build(
            "regular-polygon",
            params(&["num_vertex=2"]),
            ReplayToken::default(),
        )
        .unwrap();
        assert!(Geometry::new(shape.as_ref()).is_err());
    }
}
