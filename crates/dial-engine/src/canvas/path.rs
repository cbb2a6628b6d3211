use std::f64::consts::TAU;

use kurbo::{Affine, Arc, BezPath, PathEl, Point};

use crate::coords::Vec2;

/// Maximum deviation (device px) allowed when curves are flattened.
pub(super) const TOLERANCE: f64 = 0.1;

/// One subpath, already mapped to device space.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum SubPath {
    /// A single contour: one `MoveTo` followed by segments, optionally closed.
    Outline(BezPath),
    /// A full circle added by a single `arc` with nothing to connect to. Kept
    /// exact so renderers can draw it as an SDF instead of a polygon.
    Circle { center: Vec2, radius: f32 },
}

/// A flattened contour.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Polyline {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

/// Current path of a canvas.
#[derive(Debug, Default)]
pub(super) struct Path {
    subpaths: Vec<SubPath>,
}

impl Path {
    pub(super) fn clear(&mut self) {
        self.subpaths.clear();
    }

    pub(super) fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    pub(super) fn move_to(&mut self, p: Point) {
        let mut contour = BezPath::new();
        contour.move_to(p);
        self.subpaths.push(SubPath::Outline(contour));
    }

    /// Extends the open contour, or starts one at `p` when there is none.
    pub(super) fn line_to(&mut self, p: Point) {
        match self.open_contour() {
            Some(contour) => contour.line_to(p),
            None => self.move_to(p),
        }
    }

    /// Closes the open contour. The next segment starts from its first point.
    pub(super) fn close(&mut self) {
        let Some(contour) = self.open_contour() else { return };
        let Some(&PathEl::MoveTo(start)) = contour.elements().first() else { return };
        if contour.elements().len() < 2 {
            return;
        }
        contour.close_path();
        self.move_to(start);
    }

    /// Adds a clockwise arc from `start` to `end` (user space) mapped through `t`.
    ///
    /// A negative `end - start` wraps around the circle; a difference of a
    /// full turn or more covers the whole circle. A line joins the current
    /// point to the arc's first point.
    pub(super) fn arc(&mut self, t: Affine, center: Point, radius: f64, start: f64, end: f64) {
        if !(radius >= 0.0) || ![radius, start, end].iter().all(|v| v.is_finite()) {
            return;
        }

        let sweep = clockwise_sweep(start, end);
        let on_circle = |angle: f64| center + kurbo::Vec2::from_angle(angle) * radius;
        let first = t * on_circle(start);

        if sweep >= TAU && self.joins_without_segment(first) {
            if matches!(self.subpaths.last(), Some(SubPath::Outline(_))) {
                self.subpaths.pop();
            }
            self.subpaths.push(SubPath::Circle {
                center: (t * center).into(),
                radius: (radius * uniform_scale(t)) as f32,
            });
            // The current point sits at the arc's end, like a canvas would leave it.
            self.move_to(t * on_circle(end));
            return;
        }

        if self.current_point() != Some(first) {
            self.line_to(first);
        }
        if radius == 0.0 || sweep == 0.0 {
            return;
        }

        let arc = Arc {
            center,
            radii: kurbo::Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        if let Some(contour) = self.open_contour() {
            for el in arc.append_iter(TOLERANCE) {
                contour.push(t * el);
            }
        }
    }

    /// Exact circles and flattened contours of the path.
    ///
    /// Contours with fewer than two points carry no geometry and are dropped.
    pub(super) fn flattened(&self) -> (Vec<(Vec2, f32)>, Vec<Polyline>) {
        let mut circles = Vec::new();
        let mut contours = Vec::new();
        for sub in &self.subpaths {
            match sub {
                SubPath::Circle { center, radius } => circles.push((*center, *radius)),
                SubPath::Outline(contour) => {
                    let line = flatten(contour);
                    if line.points.len() > 1 {
                        contours.push(line);
                    }
                }
            }
        }
        (circles, contours)
    }

    fn open_contour(&mut self) -> Option<&mut BezPath> {
        match self.subpaths.last_mut() {
            Some(SubPath::Outline(contour)) if !is_closed(contour) => Some(contour),
            _ => None,
        }
    }

    fn current_point(&self) -> Option<Point> {
        match self.subpaths.last() {
            Some(SubPath::Outline(contour)) => contour.elements().last().and_then(end_point),
            _ => None,
        }
    }

    /// True when starting an arc at `first` would not draw a connecting segment.
    fn joins_without_segment(&self, first: Point) -> bool {
        match self.subpaths.last() {
            None | Some(SubPath::Circle { .. }) => true,
            Some(SubPath::Outline(contour)) => {
                contour.elements().len() == 1
                    && end_point(&contour.elements()[0]).is_some_and(|p| p.distance(first) < 1e-6)
            }
        }
    }
}

/// Uniform scale implied by the linear part of `t` (1.0 for translate/rotate).
pub(super) fn uniform_scale(t: Affine) -> f64 {
    t.determinant().abs().sqrt()
}

/// Clockwise sweep from `start` to `end`, in `[0, TAU]`.
fn clockwise_sweep(start: f64, end: f64) -> f64 {
    let sweep = end - start;
    if sweep >= TAU { TAU } else { sweep.rem_euclid(TAU) }
}

fn is_closed(contour: &BezPath) -> bool {
    matches!(contour.elements().last(), Some(PathEl::ClosePath))
}

fn end_point(el: &PathEl) -> Option<Point> {
    match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
            Some(p)
        }
        PathEl::ClosePath => None,
    }
}

fn flatten(contour: &BezPath) -> Polyline {
    let mut points = Vec::new();
    let mut closed = false;
    contour.flatten(TOLERANCE, |el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(Vec2::from(p)),
        PathEl::ClosePath => closed = true,
        _ => {}
    });
    Polyline { points, closed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn only_contour(p: &Path) -> Polyline {
        let (circles, contours) = p.flattened();
        assert!(circles.is_empty());
        assert_eq!(contours.len(), 1);
        contours.into_iter().next().unwrap()
    }

    #[test]
    fn line_to_without_move_starts_subpath() {
        let mut p = Path::default();
        p.line_to(pt(1.0, 2.0));
        p.line_to(pt(3.0, 4.0));
        let line = only_contour(&p);
        assert_eq!(line.points, vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
        assert!(!line.closed);
    }

    #[test]
    fn full_arc_on_empty_path_is_exact_circle() {
        let mut p = Path::default();
        let t = Affine::translate((400.0, 300.0));
        p.arc(t, Point::ORIGIN, 250.0, 0.0, 2.0 * PI);
        assert_eq!(p.subpaths()[0], SubPath::Circle { center: Vec2::new(400.0, 300.0), radius: 250.0 });
        assert!(p.flattened().1.is_empty());
    }

    #[test]
    fn rotated_full_arc_stays_a_circle() {
        let mut p = Path::default();
        let t = Affine::translate((400.0, 300.0)) * Affine::rotate(1.1);
        p.arc(t, pt(0.0, -234.0), 4.0, 0.0, 2.0 * PI);
        let SubPath::Circle { center, radius } = p.subpaths()[0] else { panic!("expected circle") };
        assert!((radius - 4.0).abs() < 1e-4);
        assert!(((center - Vec2::new(400.0, 300.0)).length() - 234.0).abs() < 1e-3);
    }

    #[test]
    fn partial_arc_is_flattened_within_tolerance() {
        let mut p = Path::default();
        p.arc(Affine::IDENTITY, Point::ORIGIN, 10.0, 0.0, PI);
        let line = only_contour(&p);
        assert!(line.points.len() > 4);
        assert!((line.points[0] - Vec2::new(10.0, 0.0)).length() < 1e-4);
        assert!((line.points[line.points.len() - 1] - Vec2::new(-10.0, 0.0)).length() < 1e-4);
        assert!(line.points.iter().all(|q| (q.length() - 10.0).abs() <= 2.0 * TOLERANCE as f32));
        // Clockwise on a y-down surface passes through +Y.
        assert!(line.points.iter().any(|q| q.y > 9.5));
    }

    #[test]
    fn arc_with_end_before_start_still_turns_clockwise() {
        let mut p = Path::default();
        p.arc(Affine::IDENTITY, Point::ORIGIN, 10.0, 0.0, -FRAC_PI_2);
        let line = only_contour(&p);

        let last = line.points[line.points.len() - 1];
        assert!((last - Vec2::new(0.0, -10.0)).length() < 1e-4);
        // Three quarters of a turn: down, left, then up.
        assert!(line.points.iter().any(|q| q.y > 9.5));
        assert!(line.points.iter().any(|q| q.x < -9.5));
        // The short way would cross the upper-right quadrant.
        assert!(line.points.iter().all(|q| !(q.x > 1.0 && q.y < -1.0)));
    }

    #[test]
    fn sweep_wraps_into_one_turn() {
        assert!((clockwise_sweep(0.0, -FRAC_PI_2) - 1.5 * PI).abs() < 1e-12);
        assert_eq!(clockwise_sweep(1.0, 1.0), 0.0);
        assert_eq!(clockwise_sweep(0.0, 5.0 * PI), TAU);
    }

    #[test]
    fn arc_after_a_point_elsewhere_is_joined_by_a_line() {
        let mut p = Path::default();
        p.move_to(pt(0.0, 0.0));
        p.arc(Affine::IDENTITY, pt(20.0, 0.0), 5.0, 0.0, 2.0 * PI);
        let line = only_contour(&p);
        assert_eq!(line.points[0], Vec2::new(0.0, 0.0));
        assert!((line.points[1] - Vec2::new(25.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn negative_radius_adds_nothing() {
        let mut p = Path::default();
        p.arc(Affine::IDENTITY, Point::ORIGIN, -5.0, 0.0, 2.0 * PI);
        assert!(p.subpaths().is_empty());
    }

    #[test]
    fn close_marks_contour_closed_and_reopens_at_start() {
        let mut p = Path::default();
        p.move_to(pt(0.0, 0.0));
        p.line_to(pt(1.0, 0.0));
        p.line_to(pt(1.0, 1.0));
        p.close();
        p.line_to(pt(5.0, 5.0));

        let (_, contours) = p.flattened();
        assert_eq!(contours.len(), 2);
        assert!(contours[0].closed);
        assert_eq!(contours[1].points, vec![Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0)]);
    }

    #[test]
    fn transform_is_applied_when_points_are_added() {
        let mut p = Path::default();
        let t = Affine::translate((400.0, 300.0)) * Affine::rotate(FRAC_PI_2);
        p.move_to(t * pt(0.0, 0.0));
        p.line_to(t * pt(0.0, -100.0));
        let line = only_contour(&p);
        assert!((line.points[1] - Vec2::new(500.0, 300.0)).length() < 1e-4);
    }
}
