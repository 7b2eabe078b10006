// translate.rs Translator module
//
// Copyright (c) 2024  Douglas Lau
//
use crate::mesh::Mesh;
use crate::path::Path;
use glam::Vec2;

/// Mesh translator along an animation path
///
/// Keeps the animation cursor and the translation currently applied to the
/// mesh, so each step can undo the previous one before applying the next.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translator {
    /// Index of current waypoint
    cursor: usize,

    /// Translation applied to the mesh
    applied: Option<Vec2>,
}

impl Translator {
    /// Create a new translator at the start of the path
    pub fn new() -> Self {
        Translator::default()
    }

    /// Get the animation cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the translation currently applied
    pub fn applied(&self) -> Option<Vec2> {
        self.applied
    }

    /// Forget the applied translation
    ///
    /// Must be called after the mesh is rebuilt, since a new mesh starts at
    /// the origin.
    pub fn reset(&mut self) {
        self.applied = None;
    }

    /// Move the mesh to the waypoint at the cursor
    ///
    /// A cursor past the end of a (shortened) path wraps around.
    pub fn apply(&mut self, mesh: &mut Mesh, path: &Path) {
        self.cursor %= path.len();
        let target = path.waypoint(self.cursor).truncate().truncate();
        if let Some(prev) = self.applied.take() {
            mesh.translate_xy(-prev);
        }
        mesh.translate_xy(target);
        self.applied = Some(target);
    }

    /// Advance the cursor by one waypoint and move the mesh there
    ///
    /// The cursor wraps to zero at the end of the path.
    pub fn advance(&mut self, mesh: &mut Mesh, path: &Path) {
        self.cursor = (self.cursor + 1) % path.len();
        self.apply(mesh, path);
        log::trace!("waypoint {} of {}", self.cursor, path.len());
    }
}
