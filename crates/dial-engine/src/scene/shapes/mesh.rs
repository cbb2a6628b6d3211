use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Solid-color triangle list in logical pixels.
///
/// `vertices.len()` is a multiple of three; every consecutive triple is one triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshCmd {
    pub vertices: Vec<Vec2>,
    pub color: Color,
}

impl DrawList {
    /// Records a triangle list. Trailing vertices that do not form a full
    /// triangle are dropped; an empty list records nothing.
    pub fn push_mesh(&mut self, z: ZIndex, mut vertices: Vec<Vec2>, color: Color) {
        vertices.truncate(vertices.len() - vertices.len() % 3);
        if vertices.is_empty() {
            return;
        }
        self.push(z, DrawCmd::Mesh(MeshCmd { vertices, color }));
    }
}
