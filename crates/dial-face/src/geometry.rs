//! Dial geometry.
//!
//! Two angle conventions meet here:
//! - the dial frame: origin at the surface center, angle 0 along +x and
//!   increasing clockwise (y points down), used for dots and numerals;
//! - hand rotations: a hand is drawn pointing up (−y) and then rotated, so
//!   rotation 0 is 12 o'clock. A hand at rotation `θ` points at dial angle
//!   `θ − π/2` (see [`to_dial_frame`]).

use std::f32::consts::{FRAC_PI_2, TAU};

use dial_engine::coords::{Vec2, Viewport};

/// Hour labels in dial-frame order: index 0 sits at 3 o'clock.
pub const NUMERALS: [&str; 12] = ["3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "1", "2"];

pub const DOT_COUNT: usize = 60;

/// Surface size and derived dial dimensions, fixed at construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DialLayout {
    pub width: f32,
    pub height: f32,
    /// `(min(width, height) - 100) / 2`. Negative on surfaces under 100 px.
    pub radius: f32,
    pub center: Vec2,
}

impl DialLayout {
    pub fn new(viewport: Viewport) -> Self {
        let Viewport { width, height } = viewport;
        Self {
            width,
            height,
            radius: (width.min(height) - 100.0) / 2.0,
            center: viewport.center(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

/// Rotation of the hour hand. Advances continuously with the minutes.
pub fn hour_angle(hour: u32, minute: u32) -> f32 {
    hour as f32 * TAU / 12.0 + minute as f32 * TAU / 720.0
}

pub fn minute_angle(minute: u32) -> f32 {
    minute as f32 * TAU / 60.0
}

pub fn second_angle(second: u32) -> f32 {
    second as f32 * TAU / 60.0
}

/// Dial-frame angle of tick dot `i`.
pub fn dot_angle(i: usize) -> f32 {
    i as f32 * TAU / DOT_COUNT as f32
}

/// Every fifth dot marks an hour.
pub fn is_major_dot(i: usize) -> bool {
    i % 5 == 0
}

/// Dial-frame angle of `NUMERALS[i]`.
pub fn numeral_angle(i: usize) -> f32 {
    i as f32 * TAU / NUMERALS.len() as f32
}

/// 3, 6, 9 and 12.
pub fn is_major_numeral(i: usize) -> bool {
    i % 3 == 0
}

/// Dial-frame angle a hand at `rotation` points at.
pub fn to_dial_frame(rotation: f32) -> f32 {
    rotation - FRAC_PI_2
}

/// Unit vector a hand at `rotation` points along, in surface coordinates.
pub fn hand_direction(rotation: f32) -> Vec2 {
    Vec2::from_angle(to_dial_frame(rotation))
}

/// Point at dial-frame `angle` and distance `r` from the origin.
pub fn polar(angle: f32, r: f32) -> Vec2 {
    Vec2::from_angle(angle) * r
}
