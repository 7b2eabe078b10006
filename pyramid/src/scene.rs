// scene.rs     Scene module
//
// Copyright (c) 2024  Douglas Lau
//
use crate::camera::{Camera, Lighting};
use crate::chaikin::{chaikin, SEED_HEXAGON};
use crate::error::Result;
use crate::frame::{draw_calls, Frame, Shading, Uniforms};
use crate::mesh::Mesh;
use crate::path::{resample, Path, DEFAULT_WAYPOINTS};
use crate::sphere::{build_sphere, Tetrahedron};
use crate::translate::Translator;
use glam::Vec4;
use std::ops::RangeInclusive;

/// Sphere subdivision depth limits for interactive control
pub const DEPTH_LIMITS: RangeInclusive<u32> = 1..=8;

/// Chaikin round limits for interactive control
pub const ROUNDS_LIMITS: RangeInclusive<u32> = 0..=8;

/// Scene configuration
///
/// ```rust
/// # use pyramid::{Scene, SceneCfg, Shading};
/// let cfg = SceneCfg::default()
///     .depth(3)
///     .rounds(2)
///     .waypoints(100)
///     .shading(Shading::Phong);
/// let scene = Scene::new(cfg).unwrap();
/// assert_eq!(scene.path().len(), 100);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SceneCfg {
    /// Seed tetrahedron for the sphere
    seed: Tetrahedron,

    /// Seed polygon for the curve
    polygon: Vec<Vec4>,

    /// Waypoints in one animation loop
    waypoints: usize,

    /// Initial sphere subdivision depth
    depth: u32,

    /// Initial Chaikin rounds
    rounds: u32,

    /// Initial lighting model
    shading: Shading,

    /// Initial wireframe setting
    wireframe: bool,

    /// Field of view (degrees)
    fov: f32,

    /// Light and material colors
    lighting: Lighting,
}

/// Animation state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Animation paused
    #[default]
    Idle,

    /// Advancing one waypoint per frame
    Animating,
}

/// Interactive command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Switch between shaded and wireframe rendering
    ToggleWireframe,

    /// Subdivide the sphere one level less
    DecreaseDepth,

    /// Subdivide the sphere one level more
    IncreaseDepth,

    /// One less round of Chaikin smoothing
    DecreaseRounds,

    /// One more round of Chaikin smoothing
    IncreaseRounds,

    /// Start or stop the animation
    ToggleAnimation,

    /// Switch between Gouraud and Phong lighting
    ToggleShading,
}

/// What a renderer should do after a command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// Nothing changed
    Unchanged,

    /// Redraw immediately (animation paused)
    Now,

    /// Change appears on the next animation frame
    NextFrame,
}

/// Animated scene state
///
/// Owns the sphere mesh, the smoothed curve, the animation path and the
/// render flags.  All changes go through [Scene::handle] and [Scene::tick].
pub struct Scene {
    /// Configuration
    cfg: SceneCfg,

    /// Current sphere subdivision depth
    depth: u32,

    /// Current Chaikin rounds
    rounds: u32,

    /// Lighting model
    shading: Shading,

    /// Wireframe rendering
    wireframe: bool,

    /// Animation state
    mode: Mode,

    /// Sphere mesh
    mesh: Mesh,

    /// Smoothed curve
    curve: Vec<Vec4>,

    /// Animation path
    path: Path,

    /// Mesh translator
    translator: Translator,
}

impl Default for SceneCfg {
    fn default() -> Self {
        SceneCfg {
            seed: Tetrahedron::default(),
            polygon: SEED_HEXAGON.to_vec(),
            waypoints: DEFAULT_WAYPOINTS,
            depth: 4,
            rounds: 0,
            shading: Shading::Gouraud,
            wireframe: false,
            fov: 30.0,
            lighting: Lighting::default(),
        }
    }
}

impl SceneCfg {
    /// Set the seed tetrahedron
    pub fn seed(mut self, seed: Tetrahedron) -> Self {
        self.seed = seed;
        self
    }

    /// Set the seed polygon of the curve
    pub fn polygon(mut self, polygon: Vec<Vec4>) -> Self {
        self.polygon = polygon;
        self
    }

    /// Set the number of waypoints in one animation loop
    pub fn waypoints(mut self, waypoints: usize) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Set initial sphere subdivision depth
    ///
    /// Clamped to [DEPTH_LIMITS].
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = clamp_logged("depth", depth, &DEPTH_LIMITS);
        self
    }

    /// Set initial Chaikin rounds
    ///
    /// Clamped to [ROUNDS_LIMITS].
    pub fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = clamp_logged("rounds", rounds, &ROUNDS_LIMITS);
        self
    }

    /// Set initial lighting model
    pub fn shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    /// Set initial wireframe rendering
    pub fn wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    /// Set field of view (degrees)
    pub fn fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Set light and material colors
    pub fn lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }
}

/// Clamp a value to limits, logging when it was out of range
fn clamp_logged(name: &str, val: u32, limits: &RangeInclusive<u32>) -> u32 {
    let clamped = val.clamp(*limits.start(), *limits.end());
    if clamped != val {
        log::warn!("{name} {val} clamped to {clamped}");
    }
    clamped
}

impl Scene {
    /// Create a new scene
    pub fn new(cfg: SceneCfg) -> Result<Self> {
        let curve = chaikin(&cfg.polygon, cfg.rounds)?;
        let path = resample(&curve, cfg.waypoints)?;
        let mut scene = Scene {
            depth: cfg.depth,
            rounds: cfg.rounds,
            shading: cfg.shading,
            wireframe: cfg.wireframe,
            mode: Mode::Idle,
            mesh: Mesh::default(),
            curve,
            path,
            translator: Translator::new(),
            cfg,
        };
        scene.rebuild_mesh()?;
        Ok(scene)
    }

    /// Get current sphere subdivision depth
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Get current Chaikin rounds
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Get lighting model
    pub fn shading(&self) -> Shading {
        self.shading
    }

    /// Check if rendering wireframe
    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Get animation state
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the sphere mesh
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Get the smoothed curve
    pub fn curve(&self) -> &[Vec4] {
        &self.curve
    }

    /// Get the animation path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the animation cursor
    pub fn cursor(&self) -> usize {
        self.translator.cursor()
    }

    /// Rebuild the sphere and move it to the current waypoint
    fn rebuild_mesh(&mut self) -> Result<()> {
        self.mesh = build_sphere(&self.cfg.seed, self.depth)?;
        self.translator.reset();
        self.translator.apply(&mut self.mesh, &self.path);
        Ok(())
    }

    /// Rebuild the curve and the animation path
    fn rebuild_curve(&mut self) -> Result<()> {
        self.curve = chaikin(&self.cfg.polygon, self.rounds)?;
        self.path = resample(&self.curve, self.cfg.waypoints)?;
        if self.mode == Mode::Idle {
            self.translator.apply(&mut self.mesh, &self.path);
        }
        Ok(())
    }

    /// Get refresh for a change
    fn refresh(&self) -> Refresh {
        match self.mode {
            Mode::Idle => Refresh::Now,
            Mode::Animating => Refresh::NextFrame,
        }
    }

    /// Handle one command
    pub fn handle(&mut self, cmd: Command) -> Result<Refresh> {
        log::debug!("command {cmd:?}");
        match cmd {
            Command::ToggleWireframe => {
                self.wireframe = !self.wireframe;
            }
            Command::DecreaseDepth | Command::IncreaseDepth => {
                let depth = match cmd {
                    Command::DecreaseDepth => self.depth.saturating_sub(1),
                    _ => self.depth + 1,
                };
                if depth == self.depth || !DEPTH_LIMITS.contains(&depth) {
                    return Ok(Refresh::Unchanged);
                }
                self.depth = depth;
                self.rebuild_mesh()?;
            }
            Command::DecreaseRounds | Command::IncreaseRounds => {
                let rounds = match cmd {
                    Command::DecreaseRounds => self.rounds.checked_sub(1),
                    _ => Some(self.rounds + 1),
                };
                match rounds {
                    Some(r) if ROUNDS_LIMITS.contains(&r) => {
                        self.rounds = r;
                        self.rebuild_curve()?;
                    }
                    _ => return Ok(Refresh::Unchanged),
                }
            }
            Command::ToggleAnimation => {
                self.mode = match self.mode {
                    Mode::Idle => Mode::Animating,
                    Mode::Animating => Mode::Idle,
                };
                return Ok(Refresh::Now);
            }
            Command::ToggleShading => {
                self.shading = self.shading.toggle();
            }
        }
        Ok(self.refresh())
    }

    /// Render-and-advance for one display frame
    ///
    /// Moves the sphere to the next waypoint while animating.  Returns `true`
    /// if the sphere moved.
    pub fn tick(&mut self) -> bool {
        match self.mode {
            Mode::Animating => {
                self.translator.advance(&mut self.mesh, &self.path);
                true
            }
            Mode::Idle => false,
        }
    }

    /// Make a camera for a viewport aspect ratio
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::new(self.cfg.fov, aspect)
    }

    /// Get uniforms for the sphere or curve
    fn uniforms(&self, lit: bool, camera: &Camera) -> Uniforms {
        Uniforms {
            lit,
            shading: self.shading,
            wireframe: self.wireframe,
            light: camera.light_position(),
            products: self.cfg.lighting.products(),
        }
    }

    /// Get the current frame for rendering
    pub fn frame(&self, camera: &Camera) -> Frame<'_> {
        let triangles = self.mesh.triangle_count();
        Frame {
            positions: self.mesh.positions(),
            normals: self.mesh.normals(),
            triangles,
            draws: draw_calls(triangles, self.wireframe),
            sphere: self.uniforms(true, camera),
            curve: &self.curve,
            line: self.uniforms(false, camera),
            camera: *camera,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frame::Topology;
    use glam::Vec2;

    fn scene() -> Scene {
        Scene::new(SceneCfg::default()).unwrap()
    }

    /// Get the XY center of the sphere
    fn center(scene: &Scene) -> Vec2 {
        let min = scene.mesh().pos_min();
        let max = scene.mesh().pos_max();
        let center = (min + max) / 2.0;
        Vec2::new(center.x, center.y)
    }

    /// Check that the sphere is centered on a waypoint
    fn assert_at_waypoint(scene: &Scene) {
        let wp = scene.path().waypoint(scene.cursor());
        let expected = Vec2::new(wp.x, wp.y);
        assert!((center(scene) - expected).length() < 0.1);
    }

    #[test]
    fn defaults() {
        let scene = scene();
        assert_eq!(scene.depth(), 4);
        assert_eq!(scene.rounds(), 0);
        assert_eq!(scene.mode(), Mode::Idle);
        assert_eq!(scene.shading(), Shading::Gouraud);
        assert!(!scene.is_wireframe());
        assert_eq!(scene.mesh().triangle_count(), 1024);
        assert_eq!(scene.curve().len(), 7);
        assert_eq!(scene.curve()[0], scene.curve()[6]);
        assert_eq!(scene.path().len(), 150);
        assert_eq!(scene.cursor(), 0);
        assert_at_waypoint(&scene);
    }

    #[test]
    fn depth_limits() {
        let mut scene = Scene::new(SceneCfg::default().depth(2)).unwrap();
        assert_eq!(scene.handle(Command::DecreaseDepth).unwrap(), Refresh::Now);
        assert_eq!(scene.depth(), 1);
        assert_eq!(scene.mesh().triangle_count(), 16);
        let res = scene.handle(Command::DecreaseDepth).unwrap();
        assert_eq!(res, Refresh::Unchanged);
        assert_eq!(scene.depth(), 1);
        let mut scene = Scene::new(SceneCfg::default().depth(8)).unwrap();
        let res = scene.handle(Command::IncreaseDepth).unwrap();
        assert_eq!(res, Refresh::Unchanged);
        assert_eq!(scene.depth(), 8);
    }

    #[test]
    fn rounds_limits() {
        let mut scene = scene();
        let res = scene.handle(Command::DecreaseRounds).unwrap();
        assert_eq!(res, Refresh::Unchanged);
        let res = scene.handle(Command::IncreaseRounds).unwrap();
        assert_eq!(res, Refresh::Now);
        assert_eq!(scene.curve().len(), 12);
        assert_eq!(scene.path().len(), 150);
        for _ in 0..10 {
            scene.handle(Command::IncreaseRounds).unwrap();
        }
        assert_eq!(scene.rounds(), 8);
        assert_eq!(scene.curve().len(), 6 * 256);
        assert_eq!(scene.path().len(), 150);
    }

    #[test]
    fn config_clamped() {
        let cfg = SceneCfg::default().depth(0).rounds(20);
        let scene = Scene::new(cfg).unwrap();
        assert_eq!(scene.depth(), 1);
        assert_eq!(scene.rounds(), 8);
    }

    #[test]
    fn animation() {
        let mut scene = scene();
        assert!(!scene.tick());
        assert_eq!(scene.cursor(), 0);
        let res = scene.handle(Command::ToggleAnimation).unwrap();
        assert_eq!(res, Refresh::Now);
        assert_eq!(scene.mode(), Mode::Animating);
        for _ in 0..10 {
            assert!(scene.tick());
        }
        assert_eq!(scene.cursor(), 10);
        assert_at_waypoint(&scene);
        let res = scene.handle(Command::ToggleShading).unwrap();
        assert_eq!(res, Refresh::NextFrame);
        assert_eq!(scene.shading(), Shading::Phong);
        for _ in 0..140 {
            scene.tick();
        }
        assert_eq!(scene.cursor(), 0);
        assert_at_waypoint(&scene);
        scene.handle(Command::ToggleAnimation).unwrap();
        assert!(!scene.tick());
    }

    #[test]
    fn rebuild_keeps_position() {
        let mut scene = scene();
        scene.handle(Command::ToggleAnimation).unwrap();
        for _ in 0..37 {
            scene.tick();
        }
        scene.handle(Command::IncreaseDepth).unwrap();
        assert_eq!(scene.cursor(), 37);
        assert_at_waypoint(&scene);
        scene.handle(Command::ToggleAnimation).unwrap();
        scene.handle(Command::IncreaseRounds).unwrap();
        assert_at_waypoint(&scene);
    }

    #[test]
    fn rebuild_while_animating() {
        let mut scene = scene();
        scene.handle(Command::ToggleAnimation).unwrap();
        for _ in 0..20 {
            scene.tick();
        }
        let res = scene.handle(Command::IncreaseDepth).unwrap();
        assert_eq!(res, Refresh::NextFrame);
        assert_eq!(scene.mesh().triangle_count(), 4096);
        assert_eq!(scene.cursor(), 20);
        assert_at_waypoint(&scene);
        let wp = scene.path().waypoint(20);
        let before = Vec2::new(wp.x, wp.y);
        let res = scene.handle(Command::IncreaseRounds).unwrap();
        assert_eq!(res, Refresh::NextFrame);
        assert_eq!(scene.curve().len(), 12);
        assert_eq!(scene.cursor(), 20);
        // sphere waits for the next frame to move onto the new path
        assert!((center(&scene) - before).length() < 0.1);
        assert!(scene.tick());
        assert_eq!(scene.cursor(), 21);
        assert_at_waypoint(&scene);
    }

    #[test]
    fn frame_buffers() {
        let mut scene = Scene::new(SceneCfg::default().depth(2)).unwrap();
        let camera = scene.camera(1.5);
        let frame = scene.frame(&camera);
        assert_eq!(frame.triangles, 64);
        assert_eq!(frame.positions.len(), 192);
        assert_eq!(frame.normals.len(), 192);
        assert_eq!(frame.draws.len(), 1);
        assert_eq!(frame.line_count(), 7);
        assert!(frame.sphere.lit);
        assert!(!frame.line.lit);
        assert_eq!(frame.sphere.shading_flag(), 0);
        assert!(frame.line_segments().is_empty());
        scene.handle(Command::ToggleWireframe).unwrap();
        scene.handle(Command::ToggleShading).unwrap();
        let frame = scene.frame(&camera);
        assert!(frame.sphere.wireframe);
        assert_eq!(frame.sphere.shading_flag(), 1);
        assert_eq!(frame.draws.len(), 64);
        assert!(frame.draws.iter().all(|d| d.topology == Topology::LineStrip));
        assert_eq!(frame.line_segments().len(), 128);
    }
}
