use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gemmini::calc::{to_point_array, RawCoords};
use gemmini::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod catalog;
mod report;
mod steps;

use report::{Extras, Report};

#[derive(Parser)]
#[command(name = "gemmini", version = gemmini::VERSION)]
#[command(about = "Build parametric 2D shapes, transform them and print measurements")]
struct Cmd {
    /// Seed for identity salts and random shapes
    #[arg(long, global = true, default_value_t = 0)]
    seed: u64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build a catalog shape (see `kinds`)
    Shape {
        kind: String,
        /// Shape parameter as `key=value` (repeatable)
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Use raw coordinates given as JSON, e.g. `[[0,0],[3,0],[3,3]]`
    Points {
        #[arg(long)]
        coords: String,
        /// Treat the points as the vertices of a polygon
        #[arg(long)]
        polygon: bool,
        #[command(flatten)]
        run: RunArgs,
    },
    /// List the catalog kinds and their parameters
    Kinds,
}

#[derive(Args)]
struct RunArgs {
    /// Transform step `name:arg,...`, applied in order (repeatable)
    #[arg(long = "transform", short = 't')]
    steps: Vec<String>,
    /// Include interior fill points
    #[arg(long)]
    fill: bool,
    /// Include the concave hull
    #[arg(long)]
    hull: bool,
    /// Concave hull alpha
    #[arg(long)]
    alpha: Option<f64>,
    /// Interior fill density
    #[arg(long)]
    density: Option<usize>,
    /// Write the report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let cmd = Cmd::parse();
    let token = ReplayToken::new(cmd.seed, 0);
    match cmd.action {
        Action::Shape { kind, params, run } => {
            let params = catalog::Params::parse(&params)?;
            let shape = catalog::build(&kind, params, token.nth(1))?;
            execute(shape.as_ref(), token, &run)
        }
        Action::Points {
            coords,
            polygon,
            run,
        } => {
            let raw: RawCoords = serde_json::from_str(&coords).context("parsing --coords")?;
            let points = to_point_array(&raw).context("reading --coords")?;
            if polygon {
                execute(&Polygon { vertices: points }, token, &run)
            } else {
                execute(&PointCloud { points }, token, &run)
            }
        }
        Action::Kinds => {
            for (kind, params) in catalog::KINDS {
                println!("{kind:<20} {params}");
            }
            Ok(())
        }
    }
}

fn execute<S: Shape + ?Sized>(shape: &S, token: ReplayToken, run: &RunArgs) -> Result<()> {
    let g = build(shape, token, run)?;
    let report = Report::of(
        &g,
        Extras {
            fill: run.fill,
            hull: run.hull,
        },
    )?;
    report.emit(run.out.as_deref())
}

fn build<S: Shape + ?Sized>(shape: &S, token: ReplayToken, run: &RunArgs) -> Result<Geometry> {
    let defaults = GeomCfg::default();
    let cfg = GeomCfg {
        hull_alpha: run.alpha.unwrap_or(defaults.hull_alpha),
        fill_density: run.density.unwrap_or(defaults.fill_density),
        ..defaults
    };
    let mut g = Geometry::with_token(shape, token)
        .with_context(|| format!("building {}", shape.kind()))?
        .with_cfg(cfg);
    for raw in &run.steps {
        let step = steps::parse_step(raw).with_context(|| format!("parsing step `{raw}`"))?;
        g.apply(step)
            .with_context(|| format!("applying step `{raw}`"))?;
        tracing::debug!(step = raw.as_str(), len = g.len(), "applied");
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(steps: &[&str]) -> RunArgs {
        RunArgs {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            fill: false,
            hull: false,
            alpha: None,
            density: Some(4),
            out: None,
        }
    }

    #[test]
    fn steps_apply_in_order() {
        let shape = Grid::square(10.0, 6.0, 5);
        let g = build(&shape, ReplayToken::default(), &run_args(&["translate:3,-7"])).unwrap();
        assert_eq!(g.bounding_box().as_tuple(), (0.0, -12.0, 6.0, -2.0));
        assert_eq!(g.cfg().fill_density, 4);

        let shape = Rectangle::new(2.0, 2.0, 3);
        let g = build(
            &shape,
            ReplayToken::default(),
            &run_args(&["reflect_y", "flip_x"]),
        )
        .unwrap();
        assert_eq!(g.revision(), 2);
        assert!(g.outer_rings().is_empty());
    }

    #[test]
    fn failing_step_names_itself() {
        let shape = Rectangle::new(2.0, 2.0, 3);
        let err = build(
            &shape,
            ReplayToken::default(),
            &run_args(&["distort:pincushion,2"]),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("distort:pincushion,2"), "{err:#}");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
        let cmd = Cmd::try_parse_from([
            "gemmini", "shape", "circle", "-p", "radius=2", "-t", "rotate:1", "--fill",
        ])
        .unwrap();
        assert!(matches!(cmd.action, Action::Shape { .. }));
    }
}
