//! Bouquet wrapping: the paper behind the flowers and the skirt, flaps and
//! bow in front of them. All coordinates are offsets from the dome centre.

use std::f64::consts::PI;

use kurbo::{Affine, BezPath};

use crate::types::{Point, Rgb};

use super::canvas::{Canvas, Paint, translucent};
use super::shape::PathExt;

const SPIKE_PAPER: Rgb = Rgb::hex(0x880e4f);
const PAPER_LIGHT: Rgb = Rgb::hex(0xfce4ec);
const PAPER_PINK: Rgb = Rgb::hex(0xf8bbd0);
const RIBBON: Rgb = Rgb::hex(0xad1457);

const SPIKES: usize = 12;
const SPIKE_OUTER: f64 = 280.0;
const SPIKE_INNER: f64 = 240.0;
const SPIKE_FLATTEN: f64 = 0.8;

/// Closed star polygon behind the bouquet, starting from the top spike.
pub fn spiky_paper_outline(center: Point) -> Vec<Point> {
    let cy = center.y + 100.0;
    (0..SPIKES * 2)
        .map(|i| {
            let r = if i % 2 == 0 { SPIKE_OUTER } else { SPIKE_INNER };
            let a = PI * i as f64 / SPIKES as f64 - PI / 2.0;
            Point::new(center.x + a.cos() * r, cy + a.sin() * r * SPIKE_FLATTEN)
        })
        .collect()
}

/// Layers drawn between the stems and the flower heads.
pub fn draw_back(canvas: &mut Canvas, view: &Affine, center: Point) {
    let mut spikes = BezPath::new();
    spikes.polygon(&spiky_paper_outline(center));
    canvas.fill(&spikes, view, &SPIKE_PAPER.into());

    let at = |dx: f64, dy: f64| Point::new(center.x + dx, center.y + dy);
    let mut back = BezPath::new();
    back.move_to(at(-80.0, 180.0));
    back.line_to(at(-220.0, -100.0));
    back.quad_to(at(0.0, 60.0), at(220.0, -100.0));
    back.line_to(at(80.0, 180.0));
    back.close_path();
    canvas.fill(&back, view, &PAPER_LIGHT.into());
}

/// Layers drawn over the flower heads.
pub fn draw_front(canvas: &mut Canvas, view: &Affine, center: Point) {
    let at = |dx: f64, dy: f64| Point::new(center.x + dx, center.y + dy);

    // Skirt
    let mut skirt = BezPath::new();
    skirt.move_to(at(-85.0, 170.0));
    skirt.curve_to(at(-130.0, 250.0), at(-200.0, 300.0), at(-180.0, 580.0));
    skirt.line_to(at(180.0, 580.0));
    skirt.curve_to(at(200.0, 300.0), at(130.0, 250.0), at(85.0, 170.0));
    skirt.close_path();
    let skirt_paint = Paint::Linear {
        from: at(0.0, 170.0),
        to: at(0.0, 550.0),
        start: PAPER_LIGHT.into(),
        end: PAPER_PINK.into(),
    };
    canvas.fill(&skirt, view, &skirt_paint);

    // Folds
    let fold = translucent(Rgb::hex(0x000000), 0.08);
    for i in (-150..=150).step_by(75) {
        let i = f64::from(i);
        canvas.stroke(&[at(i / 3.0, 175.0), at(i, 580.0)], view, 2.0, 1.0, fold);
    }

    // Front flaps
    let mut flaps = BezPath::new();
    flaps.move_to(at(-90.0, 175.0));
    flaps.curve_to(at(-170.0, 140.0), at(-140.0, 40.0), at(0.0, 110.0));
    flaps.curve_to(at(140.0, 40.0), at(170.0, 140.0), at(90.0, 175.0));
    flaps.close_path();
    canvas.fill(&flaps, view, &PAPER_PINK.into());

    draw_bow(canvas, view, at(0.0, 165.0));
}

/// Two loops, two ribbon tails and a knot, centred on `knot`.
fn draw_bow(canvas: &mut Canvas, view: &Affine, knot: Point) {
    let at = |dx: f64, dy: f64| Point::new(knot.x + dx, knot.y + dy);
    let ribbon: Paint = RIBBON.into();

    let mut loops = BezPath::new();
    loops.ellipse(at(-40.0, 0.0), 48.0, 28.0, PI / 4.0);
    loops.ellipse(at(40.0, 0.0), 48.0, 28.0, -PI / 4.0);
    canvas.fill(&loops, view, &ribbon);

    let mut tails = BezPath::new();
    tails.polygon(&[at(-10.0, 5.0), at(-70.0, 185.0), at(-25.0, 165.0)]);
    tails.polygon(&[at(10.0, 5.0), at(70.0, 185.0), at(25.0, 165.0)]);
    canvas.fill(&tails, view, &ribbon);

    let mut centre = BezPath::new();
    centre.circle(knot, 16.0);
    canvas.fill(&centre, view, &ribbon);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_alternates_radii_and_starts_on_top() {
        let center = Point::new(0.0, 0.0);
        let star = spiky_paper_outline(center);
        assert_eq!(star.len(), 24);
        let top = star[0];
        assert!(top.x.abs() < 1e-9);
        assert!((top.y - (100.0 - SPIKE_OUTER * SPIKE_FLATTEN)).abs() < 1e-9);
        let hub = Point::new(0.0, 100.0);
        for (i, p) in star.iter().enumerate() {
            let unflattened = Point::new(p.x, hub.y + (p.y - hub.y) / SPIKE_FLATTEN);
            let r = unflattened.distance(hub);
            let want = if i % 2 == 0 { SPIKE_OUTER } else { SPIKE_INNER };
            assert!((r - want).abs() < 1e-9);
        }
    }

    #[test]
    fn bow_sits_on_the_knot() {
        let mut canvas = Canvas::new(400, 400).unwrap();
        let center = Point::new(200.0, 0.0);
        draw_front(&mut canvas, &Affine::IDENTITY, center);
        assert_eq!(canvas.pixel(200, 165), RIBBON);
    }
}
