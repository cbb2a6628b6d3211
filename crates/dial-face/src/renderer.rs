use std::f32::consts::TAU;

use dial_engine::canvas::{Canvas2d, LineCap, TextAlign, TextBaseline};
use dial_engine::coords::Viewport;

use crate::geometry::{self, DialLayout, DOT_COUNT, NUMERALS};
use crate::style::ClockStyle;
use crate::time::Timestamp;

/// Draws the clock face onto a canvas.
///
/// The layout is computed once from the viewport passed to [`new`](Self::new)
/// and never changes afterwards. Without a canvas the renderer is
/// unsupported and [`render`](Self::render) does nothing.
pub struct ClockRenderer<C> {
    layout: DialLayout,
    canvas: Option<C>,
    style: ClockStyle,
}

impl<C: Canvas2d> ClockRenderer<C> {
    pub fn new(viewport: Viewport, canvas: Option<C>) -> Self {
        let layout = DialLayout::new(viewport);
        log::debug!("clock layout {}x{}, radius {}", layout.width, layout.height, layout.radius);
        Self { layout, canvas, style: ClockStyle::default() }
    }

    pub fn with_style(mut self, style: ClockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn layout(&self) -> &DialLayout {
        &self.layout
    }

    pub fn style(&self) -> &ClockStyle {
        &self.style
    }

    /// Whether a drawing surface is available.
    pub fn is_supported(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        self.canvas.as_mut()
    }

    /// Repaints the whole face for `now`.
    ///
    /// Every step runs in its own saved canvas state, so transforms and styles
    /// never carry over from one step to the next.
    pub fn render(&mut self, now: Timestamp) {
        let Some(canvas) = self.canvas.as_mut() else { return };
        let (l, s) = (&self.layout, &self.style);

        canvas.scoped(|c| clear(c, l));
        canvas.scoped(|c| draw_dial(c, l, s));
        canvas.scoped(|c| draw_brand(c, l, s));
        canvas.scoped(|c| draw_dots(c, l, s));
        canvas.scoped(|c| draw_numerals(c, l, s));
        canvas.scoped(|c| {
            let rotation = geometry::hour_angle(now.hour(), now.minute());
            draw_stick_hand(c, l, s, rotation, l.radius / 2.0, s.hour_width);
        });
        canvas.scoped(|c| {
            let rotation = geometry::minute_angle(now.minute());
            draw_stick_hand(c, l, s, rotation, l.radius * 3.0 / 4.0, s.minute_width);
        });
        canvas.scoped(|c| draw_second_hand(c, l, s, geometry::second_angle(now.second())));
        canvas.scoped(|c| draw_cap(c, l, s));
    }
}

fn clear<C: Canvas2d>(c: &mut C, l: &DialLayout) {
    c.reset_transform();
    c.clear_rect(l.viewport().bounds());
}

fn draw_dial<C: Canvas2d>(c: &mut C, l: &DialLayout, s: &ClockStyle) {
    c.translate(l.center.x, l.center.y);
    c.begin_path();
    c.set_line_width(s.dial_width);
    c.set_stroke_style(s.ink);
    c.arc(0.0, 0.0, l.radius, 0.0, TAU);
    c.stroke();
}

fn draw_brand<C: Canvas2d>(c: &mut C, l: &DialLayout, s: &ClockStyle) {
    c.translate(l.center.x, l.center.y);
    c.set_text_align(TextAlign::Center);
    c.set_text_baseline(TextBaseline::Middle);
    c.set_fill_style(s.ink);

    c.set_font_size(l.radius / 10.0);
    c.fill_text(s.title, 0.0, -(l.radius / 2.0));

    c.set_font_size(l.radius / 15.0);
    c.fill_text(s.tagline, 0.0, -(l.radius / 3.0));
}

fn draw_dots<C: Canvas2d>(c: &mut C, l: &DialLayout, s: &ClockStyle) {
    c.translate(l.center.x, l.center.y);
    let ring = l.radius - s.dot_inset;

    for i in 0..DOT_COUNT {
        let p = geometry::polar(geometry::dot_angle(i), ring);
        c.begin_path();
        c.arc(p.x, p.y, s.dot_radius, 0.0, TAU);
        c.set_fill_style(s.marker(geometry::is_major_dot(i)));
        c.fill();
    }
}

fn draw_numerals<C: Canvas2d>(c: &mut C, l: &DialLayout, s: &ClockStyle) {
    c.translate(l.center.x, l.center.y);
    c.set_font_size(s.numeral_size);
    c.set_text_align(TextAlign::Center);
    c.set_text_baseline(TextBaseline::Middle);
    let ring = l.radius - s.numeral_inset;

    for (i, label) in NUMERALS.iter().enumerate() {
        let p = geometry::polar(geometry::numeral_angle(i), ring);
        c.set_fill_style(s.marker(geometry::is_major_numeral(i)));
        c.fill_text(label, p.x, p.y);
    }
}

/// Hour and minute hands: a round-capped line from just behind the center to `length`.
fn draw_stick_hand<C: Canvas2d>(
    c: &mut C,
    l: &DialLayout,
    s: &ClockStyle,
    rotation: f32,
    length: f32,
    width: f32,
) {
    c.translate(l.center.x, l.center.y);
    c.rotate(rotation);
    c.begin_path();
    c.set_line_cap(LineCap::Round);
    c.set_line_width(width);
    c.set_stroke_style(s.ink);
    c.move_to(0.0, s.hand_tail);
    c.line_to(0.0, -length);
    c.stroke();
}

/// Second hand: a filled kite reaching to the numeral ring.
fn draw_second_hand<C: Canvas2d>(c: &mut C, l: &DialLayout, s: &ClockStyle, rotation: f32) {
    let w = s.second_half_width;
    c.translate(l.center.x, l.center.y);
    c.rotate(rotation);
    c.begin_path();
    c.set_fill_style(s.second_color);
    c.move_to(0.0, s.second_tail);
    c.line_to(-w, 0.0);
    c.line_to(0.0, -(l.radius - s.second_inset));
    c.line_to(w, 0.0);
    c.line_to(0.0, s.second_tail);
    c.fill();
}

fn draw_cap<C: Canvas2d>(c: &mut C, l: &DialLayout, s: &ClockStyle) {
    c.translate(l.center.x, l.center.y);
    c.begin_path();
    c.arc(0.0, 0.0, s.cap_radius, 0.0, TAU);
    c.set_fill_style(s.cap_color);
    c.fill();
}

#[cfg(test)]
mod tests {
    use super::*;
    use dial_engine::coords::{Rect, Vec2};
    use dial_engine::paint::Color;
    use dial_engine::scene::{DrawCmd, DrawItem, MeshCmd};
    use dial_engine::canvas::SceneCanvas;
    use dial_engine::text::FontSystem;
    use std::f32::consts::PI;

    // ── recording canvas ──────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Save,
        Restore,
        Translate(f32, f32),
        Rotate(f32),
        ResetTransform,
        BeginPath,
        MoveTo(f32, f32),
        LineTo(f32, f32),
        Arc(f32, f32, f32),
        ClosePath,
        Fill,
        Stroke,
        FillText(String, f32, f32),
        ClearRect(Rect),
        FillStyle(Color),
        StrokeStyle(Color),
        LineWidth(f32),
        LineCap(LineCap),
        FontSize(f32),
        TextAlign(TextAlign),
        TextBaseline(TextBaseline),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas2d for Recorder {
        fn save(&mut self) { self.ops.push(Op::Save) }
        fn restore(&mut self) { self.ops.push(Op::Restore) }
        fn translate(&mut self, x: f32, y: f32) { self.ops.push(Op::Translate(x, y)) }
        fn rotate(&mut self, r: f32) { self.ops.push(Op::Rotate(r)) }
        fn reset_transform(&mut self) { self.ops.push(Op::ResetTransform) }
        fn begin_path(&mut self) { self.ops.push(Op::BeginPath) }
        fn move_to(&mut self, x: f32, y: f32) { self.ops.push(Op::MoveTo(x, y)) }
        fn line_to(&mut self, x: f32, y: f32) { self.ops.push(Op::LineTo(x, y)) }
        fn arc(&mut self, x: f32, y: f32, r: f32, _start: f32, _end: f32) {
            self.ops.push(Op::Arc(x, y, r))
        }
        fn close_path(&mut self) { self.ops.push(Op::ClosePath) }
        fn fill(&mut self) { self.ops.push(Op::Fill) }
        fn stroke(&mut self) { self.ops.push(Op::Stroke) }
        fn fill_text(&mut self, text: &str, x: f32, y: f32) {
            self.ops.push(Op::FillText(text.to_string(), x, y))
        }
        fn clear_rect(&mut self, rect: Rect) { self.ops.push(Op::ClearRect(rect)) }
        fn set_fill_style(&mut self, c: Color) { self.ops.push(Op::FillStyle(c)) }
        fn set_stroke_style(&mut self, c: Color) { self.ops.push(Op::StrokeStyle(c)) }
        fn set_line_width(&mut self, w: f32) { self.ops.push(Op::LineWidth(w)) }
        fn set_line_cap(&mut self, cap: LineCap) { self.ops.push(Op::LineCap(cap)) }
        fn set_font_size(&mut self, px: f32) { self.ops.push(Op::FontSize(px)) }
        fn set_text_align(&mut self, a: TextAlign) { self.ops.push(Op::TextAlign(a)) }
        fn set_text_baseline(&mut self, b: TextBaseline) { self.ops.push(Op::TextBaseline(b)) }
    }

    fn recorded(w: f32, h: f32, now: Timestamp) -> Vec<Op> {
        let mut r = ClockRenderer::new(Viewport::new(w, h), Some(Recorder::default()));
        r.render(now);
        r.canvas_mut().map(|c| std::mem::take(&mut c.ops)).unwrap()
    }

    /// Splits ops into the groups enclosed by top-level save/restore pairs.
    fn steps(ops: &[Op]) -> Vec<Vec<Op>> {
        let mut out = Vec::new();
        let mut depth = 0usize;
        for op in ops {
            match op {
                Op::Save => {
                    if depth == 0 {
                        out.push(Vec::new());
                    }
                    depth += 1;
                }
                Op::Restore => {
                    depth = depth.checked_sub(1).expect("restore without save");
                }
                other => {
                    assert!(depth > 0, "drawing outside a saved state: {other:?}");
                    out.last_mut().unwrap().push(other.clone());
                }
            }
        }
        assert_eq!(depth, 0, "unbalanced save/restore");
        out
    }

    fn ts(h: u32, m: u32, s: u32) -> Timestamp {
        Timestamp::new(h, m, s).unwrap()
    }

    fn count(ops: &[Op], pred: impl Fn(&Op) -> bool) -> usize {
        ops.iter().filter(|o| pred(o)).count()
    }

    // ── orchestration ─────────────────────────────────────────────────────

    #[test]
    fn nine_balanced_steps_in_order() {
        let s = steps(&recorded(800.0, 600.0, ts(10, 10, 30)));
        assert_eq!(s.len(), 9);

        // clear
        assert_eq!(s[0], vec![Op::ResetTransform, Op::ClearRect(Rect::new(0.0, 0.0, 800.0, 600.0))]);
        // dial
        assert!(s[1].contains(&Op::Arc(0.0, 0.0, 250.0)));
        assert!(s[1].contains(&Op::LineWidth(10.0)));
        assert_eq!(s[1].last(), Some(&Op::Stroke));
        // brand
        assert_eq!(count(&s[2], |o| matches!(o, Op::FillText(..))), 2);
        // dots
        assert_eq!(count(&s[3], |o| *o == Op::Fill), 60);
        // numerals
        assert_eq!(count(&s[4], |o| matches!(o, Op::FillText(..))), 12);
        // hour, minute
        assert!(s[5].contains(&Op::LineWidth(10.0)) && s[5].last() == Some(&Op::Stroke));
        assert!(s[6].contains(&Op::LineWidth(8.0)) && s[6].last() == Some(&Op::Stroke));
        // second
        assert_eq!(s[7].last(), Some(&Op::Fill));
        // cap
        assert!(s[8].contains(&Op::Arc(0.0, 0.0, 6.0)));
        assert_eq!(s[8].last(), Some(&Op::Fill));
    }

    #[test]
    fn every_drawing_step_translates_to_center_first() {
        let s = steps(&recorded(800.0, 600.0, ts(1, 2, 3)));
        for step in &s[1..] {
            assert_eq!(step[0], Op::Translate(400.0, 300.0));
        }
    }

    #[test]
    fn brand_text_sits_above_center() {
        let s = steps(&recorded(800.0, 600.0, ts(0, 0, 0)));
        let brand = &s[2];
        assert!(brand.contains(&Op::FontSize(25.0)));
        assert!(brand.contains(&Op::FillText("Simple-Clock".into(), 0.0, -125.0)));
        assert!(brand.contains(&Op::FontSize(250.0 / 15.0)));
        assert!(brand.contains(&Op::FillText("Time is life...".into(), 0.0, -250.0 / 3.0)));
        assert!(brand.contains(&Op::TextAlign(TextAlign::Center)));
        assert!(brand.contains(&Op::TextBaseline(TextBaseline::Middle)));
    }

    #[test]
    fn numeral_twelve_is_drawn_at_top_in_ink() {
        let s = steps(&recorded(800.0, 600.0, ts(0, 0, 0)));
        let numerals = &s[4];
        let at = numerals
            .iter()
            .position(|o| matches!(o, Op::FillText(t, ..) if t == "12"))
            .unwrap();
        let Op::FillText(_, x, y) = &numerals[at] else { unreachable!() };
        assert!(x.abs() < 1e-3);
        assert!((y + 200.0).abs() < 1e-3);
        assert_eq!(numerals[at - 1], Op::FillStyle(Color::black()));
    }

    #[test]
    fn hand_rotations_follow_the_time() {
        let s = steps(&recorded(800.0, 600.0, ts(0, 30, 15)));
        let rotation = |step: &[Op]| {
            step.iter()
                .find_map(|o| match o {
                    Op::Rotate(r) => Some(*r),
                    _ => None,
                })
                .unwrap()
        };
        assert!((rotation(&s[5]) - PI / 12.0).abs() < 1e-6);
        assert!((rotation(&s[6]) - PI).abs() < 1e-6);
        assert!((rotation(&s[7]) - PI / 2.0).abs() < 1e-6);
        assert!(s[5].contains(&Op::LineTo(0.0, -125.0)));
        assert!(s[6].contains(&Op::LineTo(0.0, -187.5)));
        assert!(s[7].contains(&Op::LineTo(0.0, -200.0)));
    }

    #[test]
    fn rendering_is_idempotent() {
        assert_eq!(recorded(640.0, 480.0, ts(8, 9, 10)), recorded(640.0, 480.0, ts(8, 9, 10)));
    }

    #[test]
    fn missing_canvas_is_unsupported_and_render_is_a_no_op() {
        let mut r: ClockRenderer<Recorder> = ClockRenderer::new(Viewport::new(800.0, 600.0), None);
        assert!(!r.is_supported());
        r.render(ts(12, 0, 0));
        assert!(r.canvas().is_none());
    }

    #[test]
    fn layout_is_fixed_at_construction() {
        let mut r = ClockRenderer::new(Viewport::new(800.0, 600.0), Some(Recorder::default()));
        r.render(ts(0, 0, 0));
        r.render(ts(6, 30, 0));
        assert_eq!(r.layout().radius, 250.0);

        let ops = &r.canvas().unwrap().ops;
        let clears = ops.iter().filter(|o| matches!(o, Op::ClearRect(_))).collect::<Vec<_>>();
        assert_eq!(clears, vec![&Op::ClearRect(Rect::new(0.0, 0.0, 800.0, 600.0)); 2]);
    }

    // ── scene output ──────────────────────────────────────────────────────

    fn scene(now: Timestamp) -> Vec<DrawItem> {
        let vp = Viewport::new(800.0, 600.0);
        let mut r = ClockRenderer::new(vp, Some(SceneCanvas::new(vp, FontSystem::new())));
        r.render(now);
        let dl = r.canvas_mut().unwrap().parts_mut().0;
        dl.iter_in_paint_order().cloned().collect()
    }

    /// Meshes drawn in ink, in paint order: the hour hand, then the minute hand.
    fn ink_meshes(items: &[DrawItem]) -> Vec<&MeshCmd> {
        items
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Mesh(m) if m.color == Color::black() => Some(m),
                _ => None,
            })
            .collect()
    }

    fn bounds(mesh: &MeshCmd) -> Rect {
        Rect::bounding(mesh.vertices.iter().copied()).unwrap()
    }

    fn near(a: Vec2, b: Vec2, tol: f32) -> bool {
        (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
    }

    /// Vertex of `mesh` farthest from the dial center.
    fn farthest(mesh: &MeshCmd, center: Vec2) -> Vec2 {
        mesh.vertices
            .iter()
            .copied()
            .max_by(|a, b| (*a - center).length().total_cmp(&(*b - center).length()))
            .unwrap()
    }

    #[test]
    fn three_oclock_hands_in_scene() {
        let items = scene(ts(3, 0, 0));
        let hands = ink_meshes(&items);
        assert_eq!(hands.len(), 2);

        // Hour hand toward 3 o'clock, round caps past both ends.
        let hour = bounds(hands[0]);
        assert!(near(hour.min(), Vec2::new(380.0, 295.0), 0.2));
        assert!(near(hour.max(), Vec2::new(530.0, 305.0), 0.2));
        // Minute hand toward 12 o'clock.
        let minute = bounds(hands[1]);
        assert!(near(minute.min(), Vec2::new(396.0, 108.5), 0.2));
        assert!(near(minute.max(), Vec2::new(404.0, 319.0), 0.2));

        // Second hand kite reaches straight up.
        let kite = items.iter().find_map(|i| match &i.cmd {
            DrawCmd::Mesh(m) if m.color == Color::from_hex("#f00").unwrap() => Some(m),
            _ => None,
        });
        let kite = kite.expect("second hand mesh");
        assert!(kite.vertices.iter().any(|v| (*v - Vec2::new(400.0, 100.0)).length() < 1e-3));
    }

    #[test]
    fn half_past_midnight_hour_hand_in_scene() {
        let items = scene(ts(0, 30, 0));
        let hands = ink_meshes(&items);
        let center = Vec2::new(400.0, 300.0);

        // Hour hand half way between 12 and 1, reaching length plus cap radius.
        let tip = farthest(hands[0], center);
        assert!(((tip - center).length() - 130.0).abs() < 0.2);
        let along = geometry::hand_direction(PI / 12.0);
        let dir = (tip - center) * (1.0 / (tip - center).length());
        assert!((dir - along).length() < 0.05);

        // Minute hand straight down.
        let tip = farthest(hands[1], center);
        assert!(((tip - center).length() - 191.5).abs() < 0.2);
        assert!((tip.x - 400.0).abs() < 1.0 && tip.y > center.y);
    }

    #[test]
    fn scene_has_every_shape_and_cap_on_top() {
        let items = scene(ts(3, 0, 0));
        // ring + 60 dots + hour and minute meshes + kite + cap; no font, no text
        assert_eq!(items.len(), 65);

        let Some(DrawItem { cmd: DrawCmd::Circle(cap), .. }) = items.last() else {
            panic!("last item should be the center cap");
        };
        assert_eq!(cap.center, Vec2::new(400.0, 300.0));
        assert_eq!(cap.radius, 6.0);
    }

    #[test]
    fn scene_render_is_idempotent() {
        let vp = Viewport::new(800.0, 600.0);
        let mut r = ClockRenderer::new(vp, Some(SceneCanvas::new(vp, FontSystem::new())));
        r.render(ts(9, 41, 7));
        let first = r.canvas().unwrap().draw_list().items().to_vec();
        r.render(ts(9, 41, 7));
        assert_eq!(r.canvas().unwrap().draw_list().items(), first.as_slice());
    }
}
