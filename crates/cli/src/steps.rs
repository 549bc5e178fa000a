//! Transform steps given on the command line as `name:arg,arg,...`.
//!
//! Names follow the `Geometry` methods (`translate:3,-7`, `rotate:0.5`,
//! `distort:pincushion,0.3`). `rotate` turns about the shape centre; use
//! `rotate_z` for a rotation about the origin. In `skew`, `-` leaves an angle out.

use anyhow::{bail, Context, Result};
use gemmini::prelude::{DistortMethod, Mat2, Point, Transform};

/// Parse one step.
pub fn parse_step(raw: &str) -> Result<Transform> {
    let (name, rest) = raw.split_once(':').unwrap_or((raw, ""));
    let args: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };
    let name = name.trim();
    let step = match name {
        "scale" => match args.len() {
            1 => Transform::Scale {
                sx: num(name, &args, 0)?,
                sy: None,
            },
            _ => {
                arity(name, &args, 2)?;
                Transform::Scale {
                    sx: num(name, &args, 0)?,
                    sy: Some(num(name, &args, 1)?),
                }
            }
        },
        "scale_x" => Transform::ScaleX(one(name, &args)?),
        "scale_y" => Transform::ScaleY(one(name, &args)?),
        "translate" => {
            arity(name, &args, 2)?;
            Transform::Translate {
                dx: num(name, &args, 0)?,
                dy: num(name, &args, 1)?,
            }
        }
        "translate_x" => Transform::TranslateX(one(name, &args)?),
        "translate_y" => Transform::TranslateY(one(name, &args)?),
        "rotate" => Transform::RotateAboutCenter(one(name, &args)?),
        "rotate_x" => Transform::RotateX(one(name, &args)?),
        "rotate_y" => Transform::RotateY(one(name, &args)?),
        "rotate_z" => Transform::RotateZ(one(name, &args)?),
        "rotate_3d" => {
            arity(name, &args, 3)?;
            Transform::Rotate3d {
                yaw: num(name, &args, 0)?,
                pitch: num(name, &args, 1)?,
                roll: num(name, &args, 2)?,
            }
        }
        "skew" => {
            arity(name, &args, 2)?;
            Transform::Skew {
                ax: maybe_num(name, &args, 0)?,
                ay: maybe_num(name, &args, 1)?,
            }
        }
        "skew_x" => Transform::SkewX(one(name, &args)?),
        "skew_y" => Transform::SkewY(one(name, &args)?),
        "reflect" => Transform::Reflect(point(name, &args)?),
        "reflect_x" => bare(name, &args, Transform::ReflectX)?,
        "reflect_y" => bare(name, &args, Transform::ReflectY)?,
        "reflect_xy" => bare(name, &args, Transform::ReflectXY)?,
        "reflect_diagonal" => bare(name, &args, Transform::ReflectDiagonal)?,
        "flip" => Transform::Flip(point(name, &args)?),
        "flip_x" => bare(name, &args, Transform::FlipX)?,
        "flip_y" => bare(name, &args, Transform::FlipY)?,
        "flip_xy" => bare(name, &args, Transform::FlipXY)?,
        "flip_diagonal" => bare(name, &args, Transform::FlipDiagonal)?,
        "dot" => {
            arity(name, &args, 4)?;
            Transform::Dot(Mat2::new(
                num(name, &args, 0)?,
                num(name, &args, 1)?,
                num(name, &args, 2)?,
                num(name, &args, 3)?,
            ))
        }
        "distort" => {
            arity(name, &args, 2)?;
            let method: DistortMethod = args[0].parse()?;
            Transform::Distort {
                method,
                rate: num(name, &args, 1)?,
            }
        }
        "focus" | "shatter" => {
            arity(name, &args, 3)?;
            let pivot = Point::new(num(name, &args, 0)?, num(name, &args, 1)?);
            let rate = num(name, &args, 2)?;
            if name == "focus" {
                Transform::Focus { pivot, rate }
            } else {
                Transform::Shatter { pivot, rate }
            }
        }
        other => bail!("unknown transform `{other}`"),
    };
    Ok(step)
}

fn arity(name: &str, args: &[&str], want: usize) -> Result<()> {
    if args.len() != want {
        bail!("`{name}` takes {want} argument(s), got {}", args.len());
    }
    Ok(())
}

fn num(name: &str, args: &[&str], i: usize) -> Result<f64> {
    args[i]
        .parse()
        .with_context(|| format!("`{name}` argument {} is not a number: `{}`", i + 1, args[i]))
}

fn maybe_num(name: &str, args: &[&str], i: usize) -> Result<Option<f64>> {
    if args[i] == "-" {
        return Ok(None);
    }
    num(name, args, i).map(Some)
}

fn one(name: &str, args: &[&str]) -> Result<f64> {
    arity(name, args, 1)?;
    num(name, args, 0)
}

fn point(name: &str, args: &[&str]) -> Result<Point> {
    arity(name, args, 2)?;
    Ok(Point::new(num(name, args, 0)?, num(name, args, 1)?))
}

fn bare(name: &str, args: &[&str], step: Transform) -> Result<Transform> {
    arity(name, args, 0)?;
    Ok(step)
}
