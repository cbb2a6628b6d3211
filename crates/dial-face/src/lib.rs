//! Analog clock face.
//!
//! [`ClockRenderer`] draws a dial, tick dots, hour numerals, three hands and a
//! center cap onto any [`Canvas2d`](dial_engine::canvas::Canvas2d). Geometry
//! lives in [`geometry`] as pure functions of the layout and the time of day,
//! so it can be tested without a surface.

pub mod geometry;
mod renderer;
mod style;
mod time;

pub use geometry::DialLayout;
pub use renderer::ClockRenderer;
pub use style::ClockStyle;
pub use time::{FixedClock, LocalClock, TimeSource, Timestamp};
