// def.rs       Scene definitions
//
// Copyright (c) 2022-2024  Douglas Lau
//
use anyhow::{anyhow, bail, Error};
use glam::Vec4;
use pyramid::{Lighting, SceneCfg, Shading, Tetrahedron};
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, Error>;

/// Definition of a scene
///
/// All values are optional; missing ones keep the defaults.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SceneDef {
    /// Sphere subdivision depth
    depth: Option<u32>,

    /// Chaikin smoothing rounds
    rounds: Option<u32>,

    /// Waypoints in one animation loop
    waypoints: Option<usize>,

    /// Lighting model (gouraud / phong)
    shading: Option<String>,

    /// Field of view (degrees)
    fov: Option<f32>,

    /// Material shininess
    shininess: Option<f32>,

    /// Tetrahedron vertices (4 × X Y Z)
    #[serde(default)]
    tetrahedron: Vec<f32>,

    /// Curve polygon points (X Y pairs)
    #[serde(default)]
    polygon: Vec<f32>,
}

impl SceneDef {
    /// Parse tetrahedron vertices
    fn tetrahedron(&self) -> Result<Option<Tetrahedron>> {
        match self.tetrahedron.len() {
            0 => Ok(None),
            12 => {
                let mut vtx = [Vec4::W; 4];
                let coords = self.tetrahedron.chunks(3);
                for (v, xyz) in vtx.iter_mut().zip(coords) {
                    *v = Vec4::new(xyz[0], xyz[1], xyz[2], 1.0);
                }
                Ok(Some(Tetrahedron::new(vtx)))
            }
            n => bail!("Invalid tetrahedron: {n} values (need 12)"),
        }
    }

    /// Parse curve polygon
    fn polygon(&self) -> Result<Option<Vec<Vec4>>> {
        let len = self.polygon.len();
        if len == 0 {
            return Ok(None);
        }
        if len % 2 != 0 || len < 6 {
            bail!("Invalid polygon: {len} values (need 3+ X Y pairs)");
        }
        Ok(Some(
            self.polygon
                .chunks(2)
                .map(|xy| Vec4::new(xy[0], xy[1], 0.0, 1.0))
                .collect(),
        ))
    }

    /// Parse lighting model
    fn shading(&self) -> Result<Option<Shading>> {
        match &self.shading {
            Some(code) => {
                let shading = code
                    .parse()
                    .map_err(|_| anyhow!("Invalid shading: {code}"))?;
                Ok(Some(shading))
            }
            None => Ok(None),
        }
    }
}

impl TryFrom<&SceneDef> for SceneCfg {
    type Error = Error;

    fn try_from(def: &SceneDef) -> Result<Self> {
        let mut cfg = SceneCfg::default();
        if let Some(depth) = def.depth {
            cfg = cfg.depth(depth);
        }
        if let Some(rounds) = def.rounds {
            cfg = cfg.rounds(rounds);
        }
        if let Some(waypoints) = def.waypoints {
            if waypoints == 0 {
                bail!("Invalid waypoints: {waypoints}");
            }
            cfg = cfg.waypoints(waypoints);
        }
        if let Some(shading) = def.shading()? {
            cfg = cfg.shading(shading);
        }
        if let Some(fov) = def.fov {
            if !(fov > 0.0 && fov < 180.0) {
                bail!("Invalid fov: {fov}");
            }
            cfg = cfg.fov(fov);
        }
        if let Some(shininess) = def.shininess {
            if !(shininess.is_finite() && shininess >= 0.0) {
                bail!("Invalid shininess: {shininess}");
            }
            cfg = cfg.lighting(Lighting {
                shininess,
                ..Lighting::default()
            });
        }
        if let Some(seed) = def.tetrahedron()? {
            cfg = cfg.seed(seed);
        }
        if let Some(polygon) = def.polygon()? {
            cfg = cfg.polygon(polygon);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pyramid::Scene;

    const SCENE: &str = "\
depth: 3
rounds: 2
waypoints: 100
shading: phong
fov: 45.0
shininess: 20.0
polygon: 0 0 10 0 10 10 0 10
";

    #[test]
    fn empty_def() {
        let def = SceneDef::default();
        let cfg = SceneCfg::try_from(&def).unwrap();
        assert_eq!(cfg, SceneCfg::default());
    }

    #[test]
    fn parse_scene() {
        let def: SceneDef = muon_rs::from_str(SCENE).unwrap();
        let cfg = SceneCfg::try_from(&def).unwrap();
        let scene = Scene::new(cfg).unwrap();
        assert_eq!(scene.depth(), 3);
        assert_eq!(scene.rounds(), 2);
        assert_eq!(scene.shading(), Shading::Phong);
        assert_eq!(scene.curve().len(), 16);
        assert_eq!(scene.path().len(), 100);
    }

    #[test]
    fn tetrahedron_values() {
        let def = SceneDef {
            tetrahedron: vec![
                0.0, 0.0, -1.0, 0.0, 0.942809, 0.333333, -0.816497, -0.471405,
                0.333333, 0.816497, -0.471405, 0.333333,
            ],
            ..SceneDef::default()
        };
        let seed = def.tetrahedron().unwrap().unwrap();
        assert_eq!(seed, Tetrahedron::default());
        let def = SceneDef {
            tetrahedron: vec![0.0; 9],
            ..SceneDef::default()
        };
        assert!(def.tetrahedron().is_err());
    }

    #[test]
    fn invalid_values() {
        let def = SceneDef {
            polygon: vec![0.0, 0.0, 1.0, 1.0],
            ..SceneDef::default()
        };
        assert!(SceneCfg::try_from(&def).is_err());
        let def = SceneDef {
            polygon: vec![0.0, 0.0, 1.0, 1.0, 2.0],
            ..SceneDef::default()
        };
        assert!(SceneCfg::try_from(&def).is_err());
        let def = SceneDef {
            waypoints: Some(0),
            ..SceneDef::default()
        };
        assert!(SceneCfg::try_from(&def).is_err());
        let def = SceneDef {
            shading: Some("flat".into()),
            ..SceneDef::default()
        };
        assert!(SceneCfg::try_from(&def).is_err());
        let def = SceneDef {
            fov: Some(180.0),
            ..SceneDef::default()
        };
        assert!(SceneCfg::try_from(&def).is_err());
    }
}
