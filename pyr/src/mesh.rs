// mesh.rs      Bevy mesh module
//
// Copyright (c) 2022-2024  Douglas Lau
//
use bevy::render::mesh::{Indices, Mesh};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;
use glam::Vec4;
use pyramid::Frame;

/// Builder for bevy Mesh from homogeneous points
#[derive(Default)]
struct MeshBuilder {
    pos: Vec<[f32; 3]>,
    norm: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    /// Create a new mesh builder
    fn new() -> Self {
        MeshBuilder::default()
    }

    /// Push one vertex
    fn push_vtx(&mut self, pos: Vec4, norm: Vec4) {
        self.pos.push(pos.truncate().to_array());
        self.norm.push(norm.truncate().to_array());
    }

    /// Push one line segment
    fn push_segment(&mut self, seg: [usize; 2]) {
        for i in seg {
            self.indices.push(i as u32);
        }
    }

    /// Build the mesh
    fn build(self, topology: PrimitiveTopology) -> Mesh {
        let mut mesh = Mesh::new(topology, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.pos);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.norm);
        if !self.indices.is_empty() {
            mesh.insert_indices(Indices::U32(self.indices));
        }
        mesh
    }
}

/// Build the sphere mesh for a frame
///
/// Wireframe frames become an indexed line list.
pub fn build_sphere(frame: &Frame) -> Mesh {
    let mut builder = MeshBuilder::new();
    for (pos, norm) in frame.positions.iter().zip(frame.normals) {
        builder.push_vtx(*pos, *norm);
    }
    let segments = frame.line_segments();
    if segments.is_empty() {
        builder.build(PrimitiveTopology::TriangleList)
    } else {
        for seg in segments {
            builder.push_segment(seg);
        }
        builder.build(PrimitiveTopology::LineList)
    }
}

/// Build the curve line strip mesh for a frame
pub fn build_curve(frame: &Frame) -> Mesh {
    let mut builder = MeshBuilder::new();
    for pos in frame.curve {
        builder.push_vtx(*pos, Vec4::Z);
    }
    builder.build(PrimitiveTopology::LineStrip)
}
