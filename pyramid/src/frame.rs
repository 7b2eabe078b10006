// frame.rs     Render frame module
//
// Copyright (c) 2024  Douglas Lau
//
use crate::camera::{Camera, Products};
use glam::Vec4;
use serde_derive::Serialize;
use std::str::FromStr;

/// Lighting model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shading {
    /// Per-vertex lighting
    #[default]
    Gouraud,

    /// Per-fragment lighting
    Phong,
}

/// Primitive topology of a draw call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Independent triangles
    Triangles,

    /// Connected line segments
    LineStrip,
}

/// One draw call over a range of vertices
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub topology: Topology,
    pub first: usize,
    pub count: usize,
}

/// Shader uniforms for one object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniforms {
    /// Lighting enabled (sphere) or flat color (curve)
    pub lit: bool,

    /// Lighting model
    pub shading: Shading,

    /// Wireframe rendering
    pub wireframe: bool,

    /// Light position (world space)
    pub light: Vec4,

    /// Light / material products
    pub products: Products,
}

/// Everything a renderer needs for one frame
///
/// Buffers are borrowed from the scene; they are only valid until the next
/// command or tick.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    /// Sphere vertex positions
    pub positions: &'a [Vec4],

    /// Sphere vertex normals
    pub normals: &'a [Vec4],

    /// Count of sphere triangles
    pub triangles: usize,

    /// Draw calls for the sphere
    pub draws: Vec<DrawCall>,

    /// Sphere uniforms
    pub sphere: Uniforms,

    /// Curve line strip points
    pub curve: &'a [Vec4],

    /// Curve uniforms
    pub line: Uniforms,

    /// Camera the frame was made for
    pub camera: Camera,
}

impl FromStr for Shading {
    type Err = &'static str;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.to_ascii_lowercase().as_str() {
            "gouraud" => Ok(Shading::Gouraud),
            "phong" => Ok(Shading::Phong),
            _ => Err("Invalid shading"),
        }
    }
}

impl Shading {
    /// Get the other lighting model
    pub fn toggle(self) -> Self {
        match self {
            Shading::Gouraud => Shading::Phong,
            Shading::Phong => Shading::Gouraud,
        }
    }
}

impl Uniforms {
    /// Get shading as a shader flag
    pub fn shading_flag(&self) -> u32 {
        match self.shading {
            Shading::Gouraud => 0,
            Shading::Phong => 1,
        }
    }
}

/// Make draw calls for a triangle list
///
/// Wireframe draws each triangle as a 3-point line strip.
pub fn draw_calls(triangles: usize, wireframe: bool) -> Vec<DrawCall> {
    if wireframe {
        (0..triangles)
            .map(|t| DrawCall {
                topology: Topology::LineStrip,
                first: t * 3,
                count: 3,
            })
            .collect()
    } else {
        vec![DrawCall {
            topology: Topology::Triangles,
            first: 0,
            count: triangles * 3,
        }]
    }
}

impl Frame<'_> {
    /// Get count of curve line strip points
    pub fn line_count(&self) -> usize {
        self.curve.len()
    }

    /// Get sphere vertex ranges as pairs of line segments
    ///
    /// Each line strip draw call `a b c` becomes segments `a-b` and `b-c`.
    pub fn line_segments(&self) -> Vec<[usize; 2]> {
        let mut segs = Vec::new();
        for draw in &self.draws {
            if draw.topology == Topology::LineStrip {
                let end = draw.first + draw.count;
                for i in draw.first + 1..end {
                    segs.push([i - 1, i]);
                }
            }
        }
        segs
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shaded_draws() {
        let draws = draw_calls(16, false);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].topology, Topology::Triangles);
        assert_eq!(draws[0].count, 48);
    }

    #[test]
    fn wireframe_draws() {
        let draws = draw_calls(4, true);
        assert_eq!(draws.len(), 4);
        assert_eq!(
            draws[2],
            DrawCall {
                topology: Topology::LineStrip,
                first: 6,
                count: 3
            }
        );
    }

    #[test]
    fn shading_parse() {
        assert_eq!("phong".parse::<Shading>().unwrap(), Shading::Phong);
        assert_eq!("Gouraud".parse::<Shading>().unwrap(), Shading::Gouraud);
        assert!("flat".parse::<Shading>().is_err());
        let code = serde_json::to_value(Shading::Phong).unwrap();
        assert_eq!(code, "phong");
    }
}
