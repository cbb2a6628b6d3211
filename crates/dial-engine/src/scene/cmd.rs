use crate::scene::shapes::{CircleCmd, MeshCmd, TextCmd};

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and in [`DrawKind`]
/// - implement push helpers inside that shape module
/// - add a matching renderer under `render::shapes::*` and a batch arm in `render::scene`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle(CircleCmd),
    Mesh(MeshCmd),
    Text(TextCmd),
}

/// Discriminant of a [`DrawCmd`], used to batch consecutive commands per renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawKind {
    Circle,
    Mesh,
    Text,
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawCmd::Circle(_) => DrawKind::Circle,
            DrawCmd::Mesh(_) => DrawKind::Mesh,
            DrawCmd::Text(_) => DrawKind::Text,
        }
    }
}
