//! Raster canvas backed by a `tiny_skia::Pixmap`.
//!
//! Paths are filled with the non-zero rule and antialiased. The canvas is
//! cleared to opaque black, so every pixel read back is opaque.

use kurbo::{Affine, BezPath};
use tiny_skia::{
    Color, FillRule, FilterQuality, GradientStop, LineCap, LineJoin, LinearGradient, PathBuilder,
    Pixmap, PixmapPaint, RadialGradient, Rect, Shader, SpreadMode, Stroke, Transform,
};

use crate::types::{Point, Rgb};

use super::shape;

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::from_rgba8(c.r, c.g, c.b, 255)
    }
}

/// `c` at `alpha` opacity.
pub fn translucent(c: Rgb, alpha: f32) -> Color {
    let mut color = Color::from(c);
    color.set_alpha(alpha);
    color
}

fn skia_point(p: Point) -> tiny_skia::Point {
    tiny_skia::Point::from_xy(p.x as f32, p.y as f32)
}

/// How a filled area is coloured. Gradient geometry is in the local
/// coordinates of the path being filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        from: Point,
        to: Point,
        start: Color,
        end: Color,
    },
    Radial {
        center: Point,
        radius: f64,
        inner: Color,
        outer: Color,
    },
}

impl Paint {
    fn shader(&self) -> Shader<'static> {
        match *self {
            Paint::Solid(c) => Shader::SolidColor(c),
            Paint::Linear {
                from,
                to,
                start,
                end,
            } => LinearGradient::new(
                skia_point(from),
                skia_point(to),
                vec![GradientStop::new(0.0, start), GradientStop::new(1.0, end)],
                SpreadMode::Pad,
                Transform::identity(),
            )
            .unwrap_or(Shader::SolidColor(start)),
            Paint::Radial {
                center,
                radius,
                inner,
                outer,
            } => RadialGradient::new(
                skia_point(center),
                skia_point(center),
                radius as f32,
                vec![GradientStop::new(0.0, inner), GradientStop::new(1.0, outer)],
                SpreadMode::Pad,
                Transform::identity(),
            )
            .unwrap_or(Shader::SolidColor(outer)),
        }
    }
}

impl From<Rgb> for Paint {
    fn from(c: Rgb) -> Self {
        Paint::Solid(c.into())
    }
}

fn skia_paint(shader: Shader<'static>) -> tiny_skia::Paint<'static> {
    tiny_skia::Paint {
        shader,
        anti_alias: true,
        ..tiny_skia::Paint::default()
    }
}

#[derive(Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// `None` when either side is zero or too large for a pixmap.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        let mut pixmap = Pixmap::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?)?;
        pixmap.fill(Color::BLACK);
        Some(Canvas { pixmap })
    }

    pub fn width(&self) -> usize {
        self.pixmap.width() as usize
    }

    pub fn height(&self) -> usize {
        self.pixmap.height() as usize
    }

    /// Black outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return Rgb::hex(0);
        };
        match self.pixmap.pixel(x, y) {
            Some(px) => {
                let c = px.demultiply();
                Rgb {
                    r: c.red(),
                    g: c.green(),
                    b: c.blue(),
                }
            }
            None => Rgb::hex(0),
        }
    }

    /// Paint the whole canvas with a colour running from `top` to `bottom`
    /// between the given fractions of the height.
    pub fn vertical_gradient(&mut self, top: Rgb, bottom: Rgb, from: f64, to: f64) {
        let h = self.height() as f64;
        let shader = LinearGradient::new(
            skia_point(Point::new(0.0, from * h)),
            skia_point(Point::new(0.0, to * h)),
            vec![
                GradientStop::new(0.0, top.into()),
                GradientStop::new(1.0, bottom.into()),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        )
        .unwrap_or(Shader::SolidColor(top.into()));
        let (w, h) = (self.pixmap.width() as f32, self.pixmap.height() as f32);
        let Some(rect) = Rect::from_xywh(0.0, 0.0, w, h) else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &skia_paint(shader), Transform::identity(), None);
    }

    /// Fill `path` (in local coordinates) mapped to the device by
    /// `transform`, using the non-zero winding rule.
    pub fn fill(&mut self, path: &BezPath, transform: &Affine, paint: &Paint) {
        let Some(path) = shape::to_skia_path(path) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &skia_paint(paint.shader()),
            FillRule::Winding,
            shape::to_skia_transform(transform),
            None,
        );
    }

    /// Stroke an open polyline with round joins and caps. `width` is in
    /// local units; the device width never drops below `min_device_width`.
    pub fn stroke(
        &mut self,
        points: &[Point],
        transform: &Affine,
        width: f64,
        min_device_width: f64,
        color: Color,
    ) {
        let mut pb = PathBuilder::new();
        for (i, p) in points.iter().enumerate() {
            let d = shape::apply(transform, *p);
            if i == 0 {
                pb.move_to(d.x as f32, d.y as f32);
            } else {
                pb.line_to(d.x as f32, d.y as f32);
            }
        }
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width: (width * shape::scale_factor(transform)).max(min_device_width) as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &skia_paint(Shader::SolidColor(color)),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    /// Shrink by `factor` with a bilinear resample. For a factor of two this
    /// averages each 2×2 block.
    pub fn downsample(&self, factor: usize) -> Option<Canvas> {
        if factor <= 1 {
            return Some(self.clone());
        }
        let mut out = Canvas::new(self.width() / factor, self.height() / factor)?;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        let s = 1.0 / factor as f32;
        out.pixmap.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &paint,
            Transform::from_scale(s, s),
            None,
        );
        Some(out)
    }

    /// Row-major 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue()]
            })
            .collect()
    }
}

impl PartialEq for Canvas {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.pixmap.data() == other.pixmap.data()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
