//! Shape renderers.
//!
//! Each renderer works in two phases driven by [`SceneRenderer`](super::SceneRenderer):
//! `prepare` uploads every command of its kind for the frame and returns one
//! GPU range per command (paint order); `draw` records a contiguous span of
//! those ranges into an already-open render pass.

mod common;

pub mod circle;
pub mod mesh;
pub mod text;

pub(crate) use common::span;
