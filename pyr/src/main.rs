// main.rs      pyr program
//
// Copyright (c) 2022-2024  Douglas Lau
//
mod def;
mod material;
mod mesh;
mod view;

use crate::def::SceneDef;
use anyhow::{Context, Result};
use argh::FromArgs;
use pyramid::{Scene, SceneCfg};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Subdivided sphere animated along a Chaikin curve
#[derive(FromArgs, PartialEq, Debug)]
struct Args {
    /// export initial frame to a glTF file (.glb) instead of viewing
    #[argh(option, short = 'x')]
    export: Option<PathBuf>,

    /// scene file name (MuON)
    #[argh(positional)]
    scene_file: Option<PathBuf>,
}

/// Main function
fn main() -> Result<()> {
    let args: Args = argh::from_env();
    match &args.export {
        Some(out) => {
            env_logger::init();
            let scene = args.build_scene()?;
            export_glb(&scene, out)
        }
        None => {
            let scene = args.build_scene()?;
            view::view_scene(scene);
            Ok(())
        }
    }
}

impl Args {
    /// Build scene from the scene file (or defaults)
    fn build_scene(&self) -> Result<Scene> {
        let cfg = match &self.scene_file {
            Some(path) => read_scene_cfg(path)?,
            None => SceneCfg::default(),
        };
        Scene::new(cfg).context("Invalid scene")
    }
}

/// Read scene configuration from a file
fn read_scene_cfg(path: &Path) -> Result<SceneCfg> {
    let file = File::open(path)
        .with_context(|| format!("{} not found", path.display()))?;
    let def: SceneDef = muon_rs::from_reader(file)
        .with_context(|| format!("Invalid scene file {}", path.display()))?;
    SceneCfg::try_from(&def).context("Invalid scene")
}

/// Export the current frame as glTF
fn export_glb(scene: &Scene, out: &Path) -> Result<()> {
    let frame = scene.frame(&scene.camera(1.0));
    let writer = File::create(out)
        .with_context(|| format!("Cannot create {}", out.display()))?;
    pyramid::gltf::export(writer, &frame).context("Writing glTF")?;
    log::info!(
        "exported {} triangles, {} curve points to {}",
        frame.triangles,
        frame.line_count(),
        out.display()
    );
    Ok(())
}
