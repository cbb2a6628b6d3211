use kurbo::{Affine, Point};

use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Color;
use crate::scene::{DrawList, ZIndex};
use crate::text::{FontId, FontSystem, LineMetrics};

use super::path::{uniform_scale, Path, Polyline};
use super::tessellate::{fill_triangles, stroke_triangles};
use super::{Canvas2d, LineCap, TextAlign, TextBaseline};

/// Transform and style snapshot saved by [`Canvas2d::save`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawState {
    transform: Affine,
    fill: Color,
    stroke: Color,
    line_width: f32,
    line_cap: LineCap,
    font_size: f32,
    text_align: TextAlign,
    text_baseline: TextBaseline,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill: Color::black(),
            stroke: Color::black(),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            font_size: 10.0,
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

/// [`Canvas2d`] that records into a [`DrawList`].
///
/// Mapping:
/// - a path made of one full `arc` becomes a circle command (fill) or ring (stroke)
/// - other subpaths are flattened and tessellated into one mesh per call,
///   filled with the non-zero rule or stroked with mitered joins and the
///   current line cap
/// - text is anchored with font metrics; glyphs are never rotated, only the
///   anchor point follows the transform
///
/// Every recorded shape gets its own z-layer in call order, so later calls
/// paint over earlier ones regardless of shape kind.
pub struct SceneCanvas {
    viewport: Viewport,
    background: Color,
    draw_list: DrawList,

    fonts: FontSystem,
    font: Option<FontId>,
    text_scale: f32,

    state: DrawState,
    stack: Vec<DrawState>,
    path: Path,

    z: ZIndex,
    warned_missing_font: bool,
}

impl SceneCanvas {
    pub fn new(viewport: Viewport, fonts: FontSystem) -> Self {
        Self {
            viewport,
            background: Color::transparent(),
            draw_list: DrawList::new(),
            fonts,
            font: None,
            text_scale: 1.0,
            state: DrawState::default(),
            stack: Vec::new(),
            path: Path::default(),
            z: ZIndex::default(),
            warned_missing_font: false,
        }
    }

    /// Font used by `fill_text`. Without one, text calls record nothing.
    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = Some(font);
        self
    }

    /// Color that `clear_rect` paints when it cannot simply drop the whole list.
    ///
    /// Should match the clear color the frame is presented with.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Raster scale the text renderer will use (`scale_factor` of the frame).
    pub fn set_text_scale(&mut self, scale: f32) {
        self.text_scale = scale.max(0.01);
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Draw list plus the font system it references, as the renderers need them.
    pub fn parts_mut(&mut self) -> (&mut DrawList, &FontSystem) {
        (&mut self.draw_list, &self.fonts)
    }

    pub fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    /// Number of saved states currently on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = self.z;
        self.z = self.z.above();
        z
    }

    fn push_mesh(&mut self, triangles: Vec<Vec2>, color: Color) {
        if triangles.is_empty() {
            return;
        }
        let z = self.next_z();
        self.draw_list.push_mesh(z, triangles, color);
    }

    /// Maps a user-space point through the current transform.
    fn user_point(&self, x: f32, y: f32) -> Point {
        self.state.transform * Point::new(x as f64, y as f64)
    }
}

/// Top-left origin of a text block of `width` anchored at `anchor`.
pub fn text_origin(
    anchor: Vec2,
    width: f32,
    metrics: LineMetrics,
    align: TextAlign,
    baseline: TextBaseline,
) -> Vec2 {
    let x = match align {
        TextAlign::Start => anchor.x,
        TextAlign::Center => anchor.x - width / 2.0,
        TextAlign::End => anchor.x - width,
    };
    let y = match baseline {
        TextBaseline::Top => anchor.y,
        TextBaseline::Middle => anchor.y - metrics.height() / 2.0,
        TextBaseline::Alphabetic => anchor.y - metrics.ascent,
        TextBaseline::Bottom => anchor.y - metrics.height(),
    };
    Vec2::new(x, y)
}

impl Canvas2d for SceneCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform * Affine::translate((x as f64, y as f64));
    }

    fn rotate(&mut self, radians: f32) {
        self.state.transform = self.state.transform * Affine::rotate(radians as f64);
    }

    fn reset_transform(&mut self) {
        self.state.transform = Affine::IDENTITY;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.user_point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.user_point(x, y);
        self.path.line_to(p);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        let center = Point::new(x as f64, y as f64);
        self.path.arc(self.state.transform, center, radius as f64, start as f64, end as f64);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn fill(&mut self) {
        let color = self.state.fill;
        let (circles, contours) = self.path.flattened();

        self.push_mesh(fill_triangles(&contours), color);
        for (center, radius) in circles {
            let z = self.next_z();
            self.draw_list.push_solid_circle(z, center, radius, color);
        }
    }

    fn stroke(&mut self) {
        let DrawState { transform, stroke, line_width, line_cap, .. } = self.state;
        let width = line_width * uniform_scale(transform) as f32;
        if !(width > 0.0) {
            return;
        }
        let (circles, contours) = self.path.flattened();

        self.push_mesh(stroke_triangles(&contours, width, line_cap), stroke);
        for (center, radius) in circles {
            // Canvas strokes straddle the path; the ring renders inward from its radius.
            let z = self.next_z();
            self.draw_list.push_ring(z, center, radius + width / 2.0, width, stroke);
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let Some(font) = self.font else {
            if !self.warned_missing_font {
                log::warn!("SceneCanvas: no font loaded; text will not be drawn");
                self.warned_missing_font = true;
            }
            return;
        };
        if text.is_empty() {
            return;
        }

        let DrawState { transform, fill, font_size, text_align, text_baseline, .. } = self.state;
        let anchor = Vec2::from(transform * Point::new(x as f64, y as f64));
        let width = self.fonts.measure_text_scaled(text, font, font_size, self.text_scale).x;
        let metrics = self.fonts.line_metrics(font, font_size);
        let origin = text_origin(anchor, width, metrics, text_align, text_baseline);

        let z = self.next_z();
        self.draw_list.push_text(z, text, font, font_size, fill, origin);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let r = rect.normalized();
        let (min, max) = (r.min(), r.max());
        let corners = [
            self.user_point(min.x, min.y),
            self.user_point(max.x, min.y),
            self.user_point(max.x, max.y),
            self.user_point(min.x, max.y),
        ]
        .map(Vec2::from);

        let covers_surface = Rect::bounding(corners)
            .is_some_and(|b| b.covers(self.viewport.bounds()));
        let [_, b, c, ..] = self.state.transform.as_coeffs();
        let axis_aligned = b.abs() < 1e-9 && c.abs() < 1e-9;

        if covers_surface && axis_aligned {
            self.draw_list.clear();
            self.z = ZIndex::default();
            return;
        }

        let quad = Polyline { points: corners.to_vec(), closed: true };
        self.push_mesh(fill_triangles(&[quad]), self.background);
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        // Canvas ignores non-positive and non-finite widths.
        if width > 0.0 && width.is_finite() {
            self.state.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_font_size(&mut self, px: f32) {
        if px > 0.0 && px.is_finite() {
            self.state.font_size = px;
        }
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }
}
