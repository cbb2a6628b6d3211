//! Immediate-mode 2D canvas.
//!
//! [`Canvas2d`] is the drawing-surface contract consumed by higher layers:
//! a state stack (transform + styles), path construction, fill/stroke, text
//! and clearing. [`SceneCanvas`] implements it by recording into a
//! [`DrawList`](crate::scene::DrawList) that the GPU renderers consume.
//! Paths are built with `kurbo` and turned into triangles by
//! `lyon_tessellation`.
//!
//! Conventions follow the engine's coordinate space: logical pixels, origin
//! top-left, +Y down. Positive rotations therefore turn clockwise on screen.

mod path;
mod scene_canvas;
mod tessellate;

use std::ops::{Deref, DerefMut};

use crate::coords::Rect;
use crate::paint::Color;

pub use scene_canvas::{text_origin, SceneCanvas};

/// Shape drawn at the open ends of stroked lines.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Horizontal anchoring of text relative to the `x` passed to `fill_text`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical anchoring of text relative to the `y` passed to `fill_text`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// 2D drawing surface.
///
/// All coordinates are in the current user space: the active transform is
/// applied when a point is added to the path (or when text is placed), not
/// when the path is filled.
pub trait Canvas2d {
    /// Pushes the current transform and style onto the state stack.
    fn save(&mut self);
    /// Pops the state stack. A restore without a matching save is ignored.
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);
    /// Rotates user space by `radians` (clockwise on screen).
    fn rotate(&mut self, radians: f32);
    fn reset_transform(&mut self);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Adds a circular arc turning clockwise from `start` to `end` (radians).
    ///
    /// An `end` below `start` wraps around, so `arc(.., 0.0, -PI / 2.0)`
    /// covers three quarters of the circle. Negative radii add nothing.
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);

    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    /// Erases `rect` (in user space) back to the surface background.
    fn clear_rect(&mut self, rect: Rect);

    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_font_size(&mut self, px: f32);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Saves the drawing state and returns a guard that restores it on drop.
    fn save_scope(&mut self) -> StateGuard<'_, Self>
    where
        Self: Sized,
    {
        self.save();
        StateGuard { canvas: self }
    }

    /// Runs `draw` inside a saved drawing state.
    ///
    /// The state is restored however `draw` exits, unwinding included, so
    /// transforms and styles set inside never reach the caller.
    fn scoped<R>(&mut self, draw: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let mut guard = self.save_scope();
        draw(&mut *guard)
    }
}

/// Restores the canvas state it was created from when dropped.
pub struct StateGuard<'a, C: Canvas2d> {
    canvas: &'a mut C,
}

impl<C: Canvas2d> Deref for StateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas2d> DerefMut for StateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas2d> Drop for StateGuard<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}
