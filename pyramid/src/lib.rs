// lib.rs      pyramid crate.
//
// Copyright (c) 2022-2024  Douglas Lau
//
//! Subdivided sphere mesh animated along a Chaikin-smoothed curve.
//!
//! ```rust
//! # use pyramid::{Command, Scene, SceneCfg};
//! let mut scene = Scene::new(SceneCfg::default()).unwrap();
//! scene.handle(Command::ToggleAnimation).unwrap();
//! scene.tick();
//! assert_eq!(scene.cursor(), 1);
//! ```
mod camera;
mod chaikin;
mod error;
mod frame;
pub mod gltf;
mod mesh;
mod path;
mod scene;
mod sphere;
mod translate;

pub use camera::{Camera, Lighting, Products};
pub use chaikin::{chaikin, MAX_ROUNDS, SEED_HEXAGON};
pub use error::{Error, Result};
pub use frame::{DrawCall, Frame, Shading, Topology, Uniforms};
pub use mesh::{Mesh, MeshBuilder, Tri};
pub use path::{resample, Path, DEFAULT_WAYPOINTS};
pub use scene::{
    Command, Mode, Refresh, Scene, SceneCfg, DEPTH_LIMITS, ROUNDS_LIMITS,
};
pub use sphere::{build_sphere, Tetrahedron, MAX_DEPTH};
pub use translate::Translator;
