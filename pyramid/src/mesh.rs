// mesh.rs      Mesh module
//
// Copyright (c) 2022-2024  Douglas Lau
//
use glam::{Vec2, Vec3, Vec4};

/// Triangle face
///
/// Vertices are wound counter-clockwise when seen from the front.
///
/// ```text
///       a
///       /\
///      /  \
///     /____\
///    b      c
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tri {
    /// Vertex positions (`w` = 1)
    pos: [Vec4; 3],

    /// Vertex normals (`w` = 0)
    norm: [Vec4; 3],
}

/// Builder for a flat triangle list
#[derive(Default)]
pub struct MeshBuilder {
    /// Vertex positions
    pos: Vec<Vec4>,

    /// Vertex normals
    norm: Vec<Vec4>,
}

/// Triangle list mesh
///
/// Every three consecutive vertices make one triangle; positions and normals
/// are parallel sequences.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pos: Vec<Vec4>,

    /// Vertex normals
    norm: Vec<Vec4>,
}

impl Tri {
    /// Create a triangle on a sphere centered at the origin
    ///
    /// Each vertex normal is the direction of its position.
    pub fn spherical(a: Vec4, b: Vec4, c: Vec4) -> Self {
        let pos = [a, b, c];
        let norm = pos.map(|p| p.truncate().extend(0.0));
        Tri { pos, norm }
    }

    /// Get vertex positions
    pub fn positions(&self) -> [Vec4; 3] {
        self.pos
    }

    /// Get vertex normals
    pub fn normals(&self) -> [Vec4; 3] {
        self.norm
    }

    /// Calculate face normal from winding order
    pub fn face_normal(&self) -> Vec3 {
        let [a, b, c] = self.pos.map(Vec4::truncate);
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Calculate centroid
    pub fn centroid(&self) -> Vec3 {
        let [a, b, c] = self.pos.map(Vec4::truncate);
        (a + b + c) / 3.0
    }
}

impl MeshBuilder {
    /// Create a mesh builder with capacity for N triangles
    fn with_capacity(n_tris: usize) -> Self {
        let pos = Vec::with_capacity(n_tris * 3);
        let norm = Vec::with_capacity(n_tris * 3);
        MeshBuilder { pos, norm }
    }

    /// Push one vertex
    fn push_vtx(&mut self, pos: Vec4, norm: Vec4) {
        self.pos.push(pos);
        self.norm.push(norm);
    }

    /// Push one triangle face
    pub fn push_tri(&mut self, tri: Tri) {
        for (pos, norm) in tri.pos.into_iter().zip(tri.norm) {
            self.push_vtx(pos, norm);
        }
    }

    /// Build the mesh
    pub fn build(self) -> Mesh {
        let MeshBuilder { pos, norm } = self;
        Mesh { pos, norm }
    }
}

impl Mesh {
    /// Create a new mesh builder with capacity for N triangles
    pub fn builder(n_tris: usize) -> MeshBuilder {
        MeshBuilder::with_capacity(n_tris)
    }

    /// Get slice of all vertex positions
    pub fn positions(&self) -> &[Vec4] {
        &self.pos[..]
    }

    /// Get slice of all vertex normals
    pub fn normals(&self) -> &[Vec4] {
        &self.norm[..]
    }

    /// Get count of vertices
    pub fn vertex_count(&self) -> usize {
        self.pos.len()
    }

    /// Get count of triangles
    pub fn triangle_count(&self) -> usize {
        self.pos.len() / 3
    }

    /// Get an iterator of triangle faces
    pub fn triangles(&self) -> impl Iterator<Item = Tri> + '_ {
        self.pos
            .chunks_exact(3)
            .zip(self.norm.chunks_exact(3))
            .map(|(pos, norm)| Tri {
                pos: [pos[0], pos[1], pos[2]],
                norm: [norm[0], norm[1], norm[2]],
            })
    }

    /// Get minimum position
    pub fn pos_min(&self) -> Vec3 {
        self.pos
            .iter()
            .map(|p| p.truncate())
            .reduce(|min, v| v.min(min))
            .unwrap_or_default()
    }

    /// Get maximum position
    pub fn pos_max(&self) -> Vec3 {
        self.pos
            .iter()
            .map(|p| p.truncate())
            .reduce(|max, v| v.max(max))
            .unwrap_or_default()
    }

    /// Translate all positions in the XY plane
    ///
    /// Z and normals are unchanged.
    pub fn translate_xy(&mut self, offset: Vec2) {
        for pos in &mut self.pos {
            pos.x += offset.x;
            pos.y += offset.y;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tri() -> Tri {
        Tri::spherical(
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
        )
    }

    #[test]
    fn spherical_normals() {
        let t = tri();
        assert_eq!(t.normals()[0], Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(t.normals()[2], Vec4::new(0.0, 0.0, 1.0, 0.0));
        assert!(t.face_normal().dot(t.centroid()) > 0.0);
    }

    #[test]
    fn build_and_translate() {
        let mut builder = Mesh::builder(2);
        builder.push_tri(tri());
        builder.push_tri(tri());
        let mut mesh = builder.build();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.pos_max(), Vec3::new(1.0, 1.0, 1.0));
        mesh.translate_xy(Vec2::new(2.0, -1.0));
        assert_eq!(mesh.positions()[0], Vec4::new(3.0, -1.0, 0.0, 1.0));
        assert_eq!(mesh.normals()[0], Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(mesh.pos_min(), Vec3::new(2.0, -1.0, 0.0));
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[test]
    fn empty_bounds() {
        let mesh = Mesh::default();
        assert_eq!(mesh.pos_min(), Vec3::ZERO);
        assert_eq!(mesh.triangle_count(), 0);
    }
}
