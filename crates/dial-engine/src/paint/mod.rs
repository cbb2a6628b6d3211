//! Paint model shared between the canvas and renderers.
//!
//! Only solid fills exist: every shape the canvas emits carries one
//! premultiplied linear color. Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
