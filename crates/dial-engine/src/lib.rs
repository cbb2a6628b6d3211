//! Dial engine crate.
//!
//! Platform + GPU runtime pieces for a 2D canvas application: a `winit`
//! window loop with a redraw ticker, a `wgpu` device, a z-ordered draw list,
//! shape renderers, and [`canvas::SceneCanvas`], an immediate-mode 2D drawing
//! surface that records into the draw list.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod canvas;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
