//! Flower heads, one procedural shape per variety.
//!
//! Every routine draws around the local origin with the head's tilt already
//! applied; `size` is the bloom-scaled head radius.

use std::f64::consts::PI;

use kurbo::{Affine, BezPath};

use crate::engine::flower::Flower;
use crate::engine::palette::{Palette, ShapeKind};
use crate::types::Point;

use super::canvas::{Canvas, Paint};
use super::shape::{self, PathExt};

const ORIGIN: Point = Point::new(0.0, 0.0);

/// Draw `flower`'s head at `at`. Buds (no bloom yet) draw nothing.
pub fn draw_head(canvas: &mut Canvas, view: &Affine, flower: &Flower, at: Point) {
    let Some(bloom) = flower.bloom() else {
        return;
    };
    let size = flower.size() * bloom;
    let local = shape::local_frame(view, at, flower.rotation());
    let palette = flower.palette();
    match palette.shape {
        ShapeKind::Rose => rose(canvas, &local, palette, size),
        ShapeKind::Tulip => tulip(canvas, &local, palette, size),
        ShapeKind::Daisy => daisy(canvas, &local, palette, size),
        ShapeKind::Lily => lily(canvas, &local, palette, size),
        ShapeKind::Sunflower => sunflower(canvas, &local, palette, size),
    }
}

/// Eighteen shrinking, overlapping layers spiralling inward.
fn rose(canvas: &mut Canvas, t: &Affine, palette: &Palette, size: f64) {
    let mut layer = *t;
    for i in 0..18 {
        layer = layer * Affine::rotate(PI / 4.5);
        let r = size * (1.0 - i as f64 / 25.0);
        let mut path = BezPath::new();
        path.ellipse(Point::new(i as f64 * 0.4, 0.0), r, r * 0.7, 0.0);
        canvas.fill(&path, &layer, &palette.petals[i % palette.petals.len()].into());
    }
}

/// Three tall cups fanned slightly apart, shaded top to bottom.
fn tulip(canvas: &mut Canvas, t: &Affine, palette: &Palette, size: f64) {
    let paint = Paint::Linear {
        from: Point::new(0.0, -size),
        to: ORIGIN,
        start: palette.petals[0].into(),
        end: palette.petals[palette.petals.len() - 1].into(),
    };
    for i in -1..=1 {
        let petal = *t * Affine::rotate(f64::from(i) * 0.18);
        let mut path = BezPath::new();
        path.ellipse(
            Point::new(f64::from(i) * size * 0.28, -size * 0.45),
            size * 0.55,
            size * 0.95,
            0.0,
        );
        canvas.fill(&path, &petal, &paint);
    }
}

/// A ring of `count` thin ray petals, all one colour.
fn rays(canvas: &mut Canvas, t: &Affine, count: usize, offset: f64, rx: f64, ry: f64, paint: Paint) {
    let mut path = BezPath::new();
    for i in 1..=count {
        let a = 2.0 * PI * i as f64 / count as f64;
        let (s, c) = a.sin_cos();
        path.ellipse(Point::new(offset * c, offset * s), rx, ry, a);
    }
    canvas.fill(&path, t, &paint);
}

fn disc(canvas: &mut Canvas, t: &Affine, r: f64, paint: Paint) {
    let mut path = BezPath::new();
    path.circle(ORIGIN, r);
    canvas.fill(&path, t, &paint);
}

fn daisy(canvas: &mut Canvas, t: &Affine, palette: &Palette, size: f64) {
    rays(canvas, t, 20, size * 0.95, size * 1.05, size * 0.18, palette.petals[0].into());
    disc(canvas, t, size * 0.45, palette.center.into());
}

/// Six pointed petals glowing from the centre colour outward.
fn lily(canvas: &mut Canvas, t: &Affine, palette: &Palette, size: f64) {
    let paint = Paint::Radial {
        center: ORIGIN,
        radius: size * 2.2,
        inner: palette.center.into(),
        outer: palette.petals[0].into(),
    };
    let mut petal = *t;
    for _ in 0..6 {
        petal = petal * Affine::rotate(PI / 3.0);
        let mut path = BezPath::new();
        path.move_to(ORIGIN);
        path.quad_to(Point::new(size * 1.4, -size * 0.7), Point::new(size * 2.6, 0.0));
        path.quad_to(Point::new(size * 1.4, size * 0.7), ORIGIN);
        path.close_path();
        canvas.fill(&path, &petal, &paint);
    }
}

fn sunflower(canvas: &mut Canvas, t: &Affine, palette: &Palette, size: f64) {
    rays(canvas, t, 28, size * 1.1, size * 0.95, size * 0.14, palette.petals[0].into());
    disc(canvas, t, size * 0.78, palette.center.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::palette::PALETTES;
    use crate::types::Rgb;

    fn bloomed(palette: &'static Palette) -> Flower {
        let mut f = Flower::new("x", ORIGIN, ORIGIN, palette, 20.0, 0.0, Vec::new());
        f.growth = 1.0;
        f
    }

    fn draw(palette: &'static Palette) -> Canvas {
        let mut canvas = Canvas::new(100, 100).unwrap();
        draw_head(&mut canvas, &Affine::IDENTITY, &bloomed(palette), Point::new(50.0, 50.0));
        canvas
    }

    fn painted(canvas: &Canvas) -> usize {
        let black = Rgb::hex(0);
        (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != black)
            .count()
    }

    #[test]
    fn every_variety_draws_something_distinct() {
        let canvases: Vec<Canvas> = PALETTES.iter().map(draw).collect();
        for c in &canvases {
            assert!(painted(c) > 100);
        }
        for i in 0..canvases.len() {
            for j in i + 1..canvases.len() {
                assert_ne!(canvases[i], canvases[j]);
            }
        }
    }

    #[test]
    fn bud_draws_nothing() {
        let mut f = bloomed(&PALETTES[0]);
        f.growth = 0.8;
        let mut canvas = Canvas::new(60, 60).unwrap();
        draw_head(&mut canvas, &Affine::IDENTITY, &f, Point::new(30.0, 30.0));
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn sunflower_has_dark_centre() {
        let canvas = draw(&PALETTES[4]);
        assert_eq!(canvas.pixel(50, 50), PALETTES[4].center);
    }
}
