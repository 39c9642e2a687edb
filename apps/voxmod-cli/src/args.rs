//! Command-line parsing.

use std::path::PathBuf;

use anyhow::{bail, Context};
use glam::Vec3;
use voxmod_core::{Rgb, Rgba};
use voxmod_mesh::MesherConfig;
use voxmod_model::ModelConfig;

/// A parsed invocation.
#[derive(Debug, PartialEq)]
pub enum Command {
    New {
        path: PathBuf,
        config: ModelConfig,
    },
    Info {
        path: PathBuf,
    },
    Resize {
        path: PathBuf,
        size: usize,
        output: Option<PathBuf>,
    },
    Paint {
        path: PathBuf,
        origin: Vec3,
        direction: Vec3,
        color: Rgba,
        output: Option<PathBuf>,
    },
    Mesh {
        path: PathBuf,
        mesher: MesherConfig,
    },
    Help,
}

/// Parse from a slice of arguments, the first being the program name.
pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    if args.iter().skip(1).any(|arg| arg == "-h" || arg == "--help") {
        return Ok(Command::Help);
    }
    let Some(command) = args.get(1) else {
        return Ok(Command::Help);
    };
    let path = PathBuf::from(
        args.get(2)
            .with_context(|| format!("`{command}` needs a model path"))?,
    );
    let rest = &args[3..];

    match command.as_str() {
        "new" => parse_new(path, rest),
        "info" => {
            if let Some(extra) = rest.first() {
                bail!("unexpected argument `{extra}`");
            }
            Ok(Command::Info { path })
        }
        "resize" => parse_resize(path, rest),
        "paint" => parse_paint(path, rest),
        "mesh" => parse_mesh(path, rest),
        other => bail!("unknown command `{other}`"),
    }
}

fn parse_new(path: PathBuf, rest: &[String]) -> anyhow::Result<Command> {
    let mut config = ModelConfig::default();
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "-s" | "--size" => config.size = parse_number(value(rest, i)?, "size")?,
            "--scale" => config.scale = parse_number(value(rest, i)?, "scale")?,
            "--root" => config.root = Some(parse_vec3(value(rest, i)?)?),
            "-c" | "--color" => {
                config.seed_color = parse_color(value(rest, i)?)?.rgb();
            }
            other => bail!("unexpected argument `{other}`"),
        }
        i += 2;
    }
    Ok(Command::New { path, config })
}

fn parse_resize(path: PathBuf, rest: &[String]) -> anyhow::Result<Command> {
    let size = parse_number(
        rest.first().context("`resize` needs a new size")?,
        "size",
    )?;
    let mut output = None;
    let mut i = 1;
    while i < rest.len() {
        match rest[i].as_str() {
            "-o" | "--output" => output = Some(PathBuf::from(value(rest, i)?)),
            other => bail!("unexpected argument `{other}`"),
        }
        i += 2;
    }
    Ok(Command::Resize { path, size, output })
}

fn parse_paint(path: PathBuf, rest: &[String]) -> anyhow::Result<Command> {
    let mut origin = None;
    let mut direction = None;
    let mut color = Rgb::WHITE.with_alpha(1.0);
    let mut output = None;

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--erase" => {
                color = Rgba::TRANSPARENT;
                i += 1;
                continue;
            }
            "--origin" => origin = Some(parse_vec3(value(rest, i)?)?),
            "-d" | "--dir" => direction = Some(parse_vec3(value(rest, i)?)?),
            "-c" | "--color" => color = parse_color(value(rest, i)?)?,
            "-o" | "--output" => output = Some(PathBuf::from(value(rest, i)?)),
            other => bail!("unexpected argument `{other}`"),
        }
        i += 2;
    }

    let origin = origin.context("`paint` needs --origin")?;
    let direction = direction.context("`paint` needs --dir")?;
    if direction == Vec3::ZERO {
        bail!("ray direction must be non-zero");
    }
    Ok(Command::Paint {
        path,
        origin,
        direction,
        color,
        output,
    })
}

fn parse_mesh(path: PathBuf, rest: &[String]) -> anyhow::Result<Command> {
    let mut mesher = MesherConfig::default();
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--no-flip" => {
                mesher.flip_quads = false;
                i += 1;
                continue;
            }
            "--ao-radius" => mesher.ao_radius = parse_number(value(rest, i)?, "AO radius")?,
            other => bail!("unexpected argument `{other}`"),
        }
        i += 2;
    }
    Ok(Command::Mesh { path, mesher })
}

/// The value following the flag at `i`.
fn value(rest: &[String], i: usize) -> anyhow::Result<&str> {
    rest.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("`{}` needs a value", rest[i]))
}

fn parse_number<T: std::str::FromStr>(s: &str, what: &str) -> anyhow::Result<T> {
    s.parse()
        .ok()
        .with_context(|| format!("invalid {what} `{s}`"))
}

fn parse_floats(s: &str) -> anyhow::Result<Vec<f32>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .with_context(|| format!("invalid number `{part}` in `{s}`"))
        })
        .collect()
}

/// Parse `x,y,z`.
pub fn parse_vec3(s: &str) -> anyhow::Result<Vec3> {
    match parse_floats(s)?.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => bail!("expected x,y,z but got `{s}`"),
    }
}

/// Parse `r,g,b` (opaque) or `r,g,b,a`.
pub fn parse_color(s: &str) -> anyhow::Result<Rgba> {
    match parse_floats(s)?.as_slice() {
        &[r, g, b] => Ok(Rgba::new(r, g, b, 1.0)),
        &[r, g, b, a] => Ok(Rgba::new(r, g, b, a)),
        _ => bail!("expected r,g,b or r,g,b,a but got `{s}`"),
    }
}
