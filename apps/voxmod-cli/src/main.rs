//! voxmod command-line tool
//!
//! Creates, inspects and edits `.voxel` models without a window.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p voxmod-cli -- <COMMAND> <FILE> [OPTIONS]
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Fresh 16³ model with a white seed voxel
//! cargo run -p voxmod-cli -- new model.voxel --size 16
//!
//! # Place a red voxel on the +X face of the seed
//! cargo run -p voxmod-cli -- paint model.voxel --origin 50,0.5,0.5 --dir -1,0,0 -c 1,0,0
//!
//! # Mesh statistics without AO
//! cargo run -p voxmod-cli -- mesh model.voxel --ao-radius 0
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod args;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use voxmod_core::Ray;
use voxmod_model::{Edit, ModelConfig, VoxelModel};
use voxmod_voxel::{VoxelGrid, FILE_EXTENSION};

use crate::args::{parse_args, Command};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match parse_args(&args)? {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::New { path, config } => create(&path, &config),
        Command::Info { path } => {
            print_info(&load_model(&path)?);
            Ok(())
        }
        Command::Resize { path, size, output } => {
            let mut model = load_model(&path)?;
            let old = model.size();
            let new = model.resize(size);
            info!(old, new, "Resized model");
            save_model(&model, output.as_deref().unwrap_or(&path))
        }
        Command::Paint {
            path,
            origin,
            direction,
            color,
            output,
        } => {
            let mut model = load_model(&path)?;
            let edit = model.modify(&Ray::new(origin, direction), color)?;
            match edit {
                Edit::Added { cell, index } => {
                    info!(x = cell.x, y = cell.y, z = cell.z, index, "Added voxel");
                }
                Edit::Removed { cell } => {
                    info!(x = cell.x, y = cell.y, z = cell.z, "Removed voxel");
                }
                Edit::Skipped(reason) => info!(?reason, "Nothing changed"),
            }
            // The palette may grow even when no voxel was placed.
            save_model(&model, output.as_deref().unwrap_or(&path))
        }
        Command::Mesh { path, mesher } => {
            let mut model = load_model(&path)?;
            model.set_mesher_config(mesher);
            print_mesh_stats(&model);
            Ok(())
        }
    }
}

fn create(path: &Path, config: &ModelConfig) -> anyhow::Result<()> {
    if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
        tracing::warn!(
            path = %path.display(),
            "Model files conventionally use the .{FILE_EXTENSION} extension"
        );
    }
    let model = VoxelModel::from_config(config);
    save_model(&model, path)
}

fn load_model(path: &Path) -> anyhow::Result<VoxelModel> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    VoxelModel::decode(&data).map_err(|err| {
        error!(path = %path.display(), %err, "Rejected model file");
        anyhow::Error::new(err).context(format!("Failed to load {}", path.display()))
    })
}

fn save_model(model: &VoxelModel, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    model
        .encode_into(&mut BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), size = model.size(), colors = model.palette().len(), "Saved model");
    Ok(())
}

fn print_info(model: &VoxelModel) {
    let grid: &VoxelGrid = model.grid();
    let root = grid.root();
    println!("size:    {}", grid.size());
    println!("scale:   {}", grid.scale());
    println!("root:    ({}, {}, {})", root.x, root.y, root.z);
    println!("filled:  {} of {}", grid.filled_count(), grid.cells().len());
    println!("palette: {} colors", grid.palette().len());

    let usage = grid.color_usage();
    for (index, color) in grid.palette().iter() {
        println!(
            "  {index:>3}  ({:.3}, {:.3}, {:.3})  {} cells",
            color.r,
            color.g,
            color.b,
            usage.get(&index).copied().unwrap_or(0)
        );
    }
    println!("quads:   {}", model.mesh_view().quad_count());
}

fn print_mesh_stats(model: &VoxelModel) {
    let view = model.mesh_view();
    let mesh = model.mesh();
    println!("quads:    {}", view.quad_count());
    println!("vertices: {} ({} bytes)", view.vertices.len(), mesh.vertex_bytes().len());
    println!("indices:  {} ({} bytes)", view.indices.len(), mesh.index_bytes().len());

    if view.vertices.is_empty() {
        return;
    }
    // Brightest channel of each vertex color
    let shade = |v: &voxmod_mesh::MeshVertex| v.color.iter().copied().fold(0.0f32, f32::max);
    let min = view.vertices.iter().map(shade).fold(f32::INFINITY, f32::min);
    let max = view.vertices.iter().map(shade).fold(0.0f32, f32::max);
    println!("shade:    {min:.3} ..= {max:.3}");
    for attr in voxmod_mesh::VERTEX_LAYOUT {
        println!("  {:<10} {} x f32 @ {}", attr.name, attr.components, attr.offset);
    }
}

fn print_help() {
    eprintln!(
        "voxmod - create, inspect and edit .voxel models

USAGE:
    voxmod <COMMAND> <FILE> [OPTIONS]

COMMANDS:
    new <FILE>              Write a fresh model with one seed voxel
        -s, --size <N>          Grid edge length, 1..=256 (default: 16)
        --scale <N>             Model scale, 1..=256 (default: 1)
        --root <X,Y,Z>          Root position (default: centered)
        -c, --color <R,G,B>     Seed color (default: 1,1,1)

    info <FILE>             Print size, root, palette usage and quad count

    resize <FILE> <N>       Change the grid size, keeping content centered
        -o, --output <FILE>     Write to another file

    paint <FILE>            Add or remove a voxel where a ray hits the model
        --origin <X,Y,Z>        Ray origin (world space)
        -d, --dir <X,Y,Z>       Ray direction
        -c, --color <R,G,B[,A]> Voxel color; alpha 0 erases (default: 1,1,1)
        --erase                 Remove the hit voxel
        -o, --output <FILE>     Write to another file

    mesh <FILE>             Print mesh statistics
        --ao-radius <N>         AO sampling radius, 0 disables (default: 3)
        --no-flip               Keep the fixed quad diagonal

OTHER:
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
