//! One frame of the garden, back to front.
//!
//! The scene reads the garden and never changes it. Layers are drawn in a
//! fixed order: background, stems, back wrapping, heads, front wrapping.
//! Filler heads go down before core heads, so roses and tulips sit on top.

use kurbo::Affine;

use crate::engine::flower::Flower;
use crate::engine::garden::Garden;
use crate::types::{Point, Rgb};

use super::canvas::Canvas;
use super::heads;
use super::wrap;

const BACKGROUND: Rgb = Rgb::hex(0x0d0204);
const BACKGROUND_FLOOR: Rgb = Rgb::hex(0x020001);
/// Stem width in world units.
const STEM_WIDTH: f64 = 2.2;
/// Stems never get thinner than this many device pixels.
const MIN_STEM_PIXELS: f64 = 1.0;

/// Draw the garden. `view` maps world units to canvas pixels.
pub fn draw(garden: &Garden, canvas: &mut Canvas, view: &Affine) {
    let viewport = garden.viewport();
    let bouquet = garden.is_bouquet();
    let center = viewport.center();

    canvas.vertical_gradient(BACKGROUND, BACKGROUND_FLOOR, 0.55, 1.0);

    let anchor = |f: &Flower| {
        if bouquet { viewport.gathering_point() } else { f.origin() }
    };
    for flower in garden.flowers() {
        let points = stem_points(flower, anchor(flower), bouquet);
        canvas.stroke(
            &points,
            view,
            STEM_WIDTH,
            MIN_STEM_PIXELS,
            flower.palette().stem.into(),
        );
    }

    if bouquet {
        wrap::draw_back(canvas, view, center);
    }

    for flower in head_order(garden.flowers()) {
        heads::draw_head(canvas, view, flower, head_point(flower, bouquet));
    }

    if bouquet {
        wrap::draw_front(canvas, view, center);
    }
}

/// Filler first, then core; planting order holds within each class.
fn head_order(flowers: &[Flower]) -> Vec<&Flower> {
    let mut order: Vec<&Flower> = flowers.iter().collect();
    order.sort_by_key(|f| f.palette().is_core());
    order
}

/// Where the head is drawn: its live position while the bouquet forms,
/// otherwise where it was planted.
fn head_point(flower: &Flower, bouquet: bool) -> Point {
    if bouquet { flower.position() } else { flower.planted() }
}

/// Visible part of the stem, starting at `anchor`. Each path point is pulled
/// along with the head in proportion to how far up the stem it sits.
pub fn stem_points(flower: &Flower, anchor: Point, bouquet: bool) -> Vec<Point> {
    let stem = flower.stem();
    let drift = head_point(flower, bouquet) - flower.planted();
    let len = stem.len() as f64;
    let visible = flower.visible_stem_points().min(stem.len());
    std::iter::once(anchor)
        .chain(
            stem[..visible]
                .iter()
                .enumerate()
                .map(|(i, p)| *p + drift * (i as f64 / len)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::palette::PALETTES;
    use crate::engine::path::{Waviness, generate_path_with};
    use crate::types::Viewport;

    const WAVE: Waviness = Waviness {
        frequency: 1.3,
        phase: 0.4,
    };

    fn garden_with(growth: f64, with_stem: bool) -> Garden {
        let vp = Viewport::new(400.0, 400.0);
        let mut garden = Garden::new(vp);
        let planted = Point::new(200.0, 150.0);
        let stem = if with_stem {
            generate_path_with(vp.spawn_point(), planted, WAVE)
        } else {
            Vec::new()
        };
        let mut f = Flower::new("f1", vp.spawn_point(), planted, &PALETTES[2], 20.0, 0.0, stem);
        f.growth = growth;
        garden.insert(f);
        garden
    }

    fn render(garden: &Garden) -> Canvas {
        let mut canvas = Canvas::new(100, 100).unwrap();
        draw(garden, &mut canvas, &Affine::scale(0.25));
        canvas
    }

    #[test]
    fn heads_stay_hidden_until_bloom() {
        let empty = render(&Garden::new(Viewport::new(400.0, 400.0)));
        assert_eq!(render(&garden_with(0.5, false)), empty);
        assert_eq!(render(&garden_with(0.8, false)), empty);
        assert_ne!(render(&garden_with(0.85, false)), empty);
    }

    #[test]
    fn stem_grows_from_anchor() {
        let garden = garden_with(0.25, true);
        let f = &garden.flowers()[0];
        let points = stem_points(f, f.origin(), false);
        assert_eq!(points[0], f.origin());
        assert_eq!(points.len(), 1 + f.visible_stem_points());
        assert!(points.len() < f.stem().len());
    }

    #[test]
    fn stem_rides_along_with_moving_head() {
        let mut garden = garden_with(1.0, true);
        let anchor = garden.viewport().gathering_point();
        let moved = {
            let f = &garden.flowers()[0];
            f.planted() + Point::new(52.0, -26.0)
        };
        garden.flowers_mut()[0].position = moved;
        let f = &garden.flowers()[0];
        let points = stem_points(f, anchor, true);
        assert_eq!(points[0], anchor);
        // The first stem point does not move; later points move further.
        assert_eq!(points[1], f.stem()[0]);
        let last = points.last().unwrap();
        let raw = f.stem()[f.stem().len() - 1];
        let shift = *last - raw;
        assert!((shift.x - 52.0 * 25.0 / 26.0).abs() < 1e-9);
        assert!((shift.y + 26.0 * 25.0 / 26.0).abs() < 1e-9);
    }

    #[test]
    fn bouquet_adds_wrapping() {
        let mut garden = garden_with(1.0, true);
        let plain = render(&garden);
        garden.dismiss_welcome();
        garden.begin_bouquet();
        assert_ne!(render(&garden), plain);
    }

    fn bloomed(id: &str, palette_index: usize, at: Point) -> Flower {
        let mut f = Flower::new(id, at, at, &PALETTES[palette_index], 20.0, 0.0, Vec::new());
        f.growth = 1.0;
        f
    }

    #[test]
    fn core_heads_draw_over_filler() {
        let mut garden = Garden::new(Viewport::new(400.0, 400.0));
        let at = Point::new(200.0, 200.0);
        garden.insert(bloomed("rose", 0, at));
        garden.insert(bloomed("sunflower", 4, at));

        let order: Vec<_> = head_order(garden.flowers()).iter().map(|f| f.id()).collect();
        assert_eq!(order, ["sunflower", "rose"]);

        let px = render(&garden).pixel(50, 50);
        assert_ne!(px, PALETTES[4].center);
        // Every rose petal is a saturated red; the sunflower disc is dark.
        assert!(px.r > 150, "{px:?}");
    }

    #[test]
    fn head_order_is_stable_within_a_class() {
        let at = Point::new(0.0, 0.0);
        let flowers = [
            bloomed("a", 1, at),
            bloomed("b", 2, at),
            bloomed("c", 0, at),
            bloomed("d", 3, at),
        ];
        let order: Vec<_> = head_order(&flowers).iter().map(|f| f.id()).collect();
        assert_eq!(order, ["b", "d", "a", "c"]);
    }
}
