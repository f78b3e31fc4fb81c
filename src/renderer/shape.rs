//! Geometry on top of `kurbo`, and the hand-off to `tiny-skia`.
//!
//! Shapes are built as `BezPath`s in local coordinates and positioned with
//! an `Affine`. Composing `view * translate * rotate` reads like a canvas
//! context: the last factor applies first.

use kurbo::{Affine, BezPath, Circle, Ellipse, PathEl, Shape};

use crate::types::Point;

/// Curve approximation accuracy for ellipses and circles, in local units.
const TOLERANCE: f64 = 0.1;

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

/// Closed shapes appended to a `BezPath` as their own subpaths.
pub trait PathExt {
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, rotation: f64);
    fn circle(&mut self, center: Point, r: f64);
    fn polygon(&mut self, points: &[Point]);
}

impl PathExt for BezPath {
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, rotation: f64) {
        let ellipse = Ellipse::new(center, (rx, ry), rotation);
        self.extend(ellipse.path_elements(TOLERANCE));
    }

    fn circle(&mut self, center: Point, r: f64) {
        self.extend(Circle::new(center, r).path_elements(TOLERANCE));
    }

    fn polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        self.close_path();
    }
}

/// Local frame at `at`, tilted by `rotation`, inside `view`.
pub fn local_frame(view: &Affine, at: Point, rotation: f64) -> Affine {
    *view * Affine::translate((at.x, at.y)) * Affine::rotate(rotation)
}

/// Average linear scale, used to size strokes.
pub fn scale_factor(transform: &Affine) -> f64 {
    transform.determinant().abs().sqrt()
}

pub fn apply(transform: &Affine, p: Point) -> Point {
    let q = *transform * kurbo::Point::from(p);
    Point::new(q.x, q.y)
}

pub(crate) fn to_skia_transform(transform: &Affine) -> tiny_skia::Transform {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    tiny_skia::Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// `None` for an empty path.
pub(crate) fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn frames_compose_like_a_canvas_context() {
        let t = local_frame(
            &Affine::IDENTITY,
            Point::new(10.0, 20.0),
            std::f64::consts::FRAC_PI_2,
        );
        // Rotate first, then translate.
        assert!(close_to(apply(&t, Point::new(1.0, 0.0)), Point::new(10.0, 21.0)));
        assert!((scale_factor(&(Affine::scale(0.5) * t)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn skia_transform_maps_points_the_same_way() {
        let t = local_frame(&Affine::scale(0.25), Point::new(3.0, -4.0), 0.7);
        let want = apply(&t, Point::new(12.5, -7.25));
        let mut got = [tiny_skia::Point::from_xy(12.5, -7.25)];
        to_skia_transform(&t).map_points(&mut got);
        assert!((f64::from(got[0].x) - want.x).abs() < 1e-4);
        assert!((f64::from(got[0].y) - want.y).abs() < 1e-4);
    }

    #[test]
    fn each_shape_is_its_own_subpath() {
        let mut path = BezPath::new();
        path.polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
        path.ellipse(Point::new(5.0, 5.0), 2.0, 1.0, 0.3);
        path.circle(Point::new(9.0, 9.0), 1.0);
        let starts = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(starts, 3);

        let mut ellipse = BezPath::new();
        ellipse.ellipse(Point::new(5.0, 5.0), 2.0, 1.0, 0.3);
        assert!((ellipse.area().abs() - std::f64::consts::PI * 2.0).abs() < 0.1);
    }

    #[test]
    fn empty_paths_have_no_skia_counterpart() {
        assert!(to_skia_path(&BezPath::new()).is_none());
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.quad_to(Point::new(5.0, 5.0), Point::new(10.0, 0.0));
        path.close_path();
        let skia = to_skia_path(&path).unwrap();
        assert!(skia.bounds().right() >= 10.0);
    }
}
