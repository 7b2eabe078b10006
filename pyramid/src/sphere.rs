// sphere.rs    Sphere module
//
// Copyright (c) 2024  Douglas Lau
//
use crate::error::{Error, Result};
use crate::mesh::{Mesh, MeshBuilder, Tri};
use glam::Vec4;

/// Maximum subdivision depth
pub const MAX_DEPTH: u32 = 10;

/// Tetrahedron inscribed in the unit sphere
///
/// Seed shape for a subdivided sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tetrahedron {
    /// Vertex positions (`w` = 1)
    vtx: [Vec4; 4],
}

impl Default for Tetrahedron {
    fn default() -> Self {
        Tetrahedron::new([
            Vec4::new(0.0, 0.0, -1.0, 1.0),
            Vec4::new(0.0, 0.942809, 0.333333, 1.0),
            Vec4::new(-0.816497, -0.471405, 0.333333, 1.0),
            Vec4::new(0.816497, -0.471405, 0.333333, 1.0),
        ])
    }
}

impl Tetrahedron {
    /// Create a new tetrahedron
    ///
    /// The vertices must be arranged like the default: `a` on the negative
    /// Z axis, then `b`, `c` and `d` counter-clockwise when seen from `-Z`.
    pub fn new(vtx: [Vec4; 4]) -> Self {
        Tetrahedron { vtx }
    }

    /// Get vertex positions
    pub fn vertices(&self) -> [Vec4; 4] {
        self.vtx
    }

    /// Get the four faces, wound counter-clockwise from outside
    pub fn faces(&self) -> [[Vec4; 3]; 4] {
        let [a, b, c, d] = self.vtx;
        [[a, c, b], [d, b, c], [a, b, d], [a, d, c]]
    }
}

/// Project a point onto the unit sphere
fn project(p: Vec4) -> Vec4 {
    p.truncate().normalize_or_zero().extend(1.0)
}

/// Recursively subdivide one triangle
///
/// ```text
///          a
///          /\
///         /  \
///     ab /____\ ac
///       /\    /\
///      /  \  /  \
///     /____\/____\
///    b     bc     c
/// ```
fn divide(builder: &mut MeshBuilder, tri: [Vec4; 3], depth: u32) {
    let [a, b, c] = tri;
    if depth == 0 {
        builder.push_tri(Tri::spherical(a, b, c));
        return;
    }
    let ab = project(a.lerp(b, 0.5));
    let ac = project(a.lerp(c, 0.5));
    let bc = project(b.lerp(c, 0.5));
    divide(builder, [a, ab, ac], depth - 1);
    divide(builder, [ab, b, bc], depth - 1);
    divide(builder, [bc, c, ac], depth - 1);
    divide(builder, [ab, bc, ac], depth - 1);
}

/// Count triangles for a subdivision depth
pub fn triangle_count(depth: u32) -> usize {
    4 << (2 * depth)
}

/// Build a sphere by subdividing a tetrahedron
///
/// Each of the four faces is split into `4^depth` triangles, with new vertices
/// projected onto the unit sphere.
///
/// ```rust
/// # use pyramid::{build_sphere, Tetrahedron};
/// let mesh = build_sphere(&Tetrahedron::default(), 2).unwrap();
/// assert_eq!(mesh.triangle_count(), 64);
/// ```
pub fn build_sphere(seed: &Tetrahedron, depth: u32) -> Result<Mesh> {
    if depth > MAX_DEPTH {
        return Err(Error::DepthOutOfRange(depth));
    }
    let mut builder = Mesh::builder(triangle_count(depth));
    for face in seed.faces() {
        divide(&mut builder, face, depth);
    }
    let mesh = builder.build();
    log::debug!(
        "sphere depth {depth}: {} triangles",
        mesh.triangle_count()
    );
    Ok(mesh)
}
