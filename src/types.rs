//! Shared boundary types for the bouquet garden.
//!
//! This module defines the two key data contracts:
//! - Engine → Renderer (in-memory): world-space `Point`s and the `Viewport`
//!   the garden is laid out in
//! - Renderer → Player (terminal): `Cell` grids and `Frame`s of cell changes

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// World geometry
// ---------------------------------------------------------------------------

/// A 2D coordinate in world units (one unit is one pixel of an exported image).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation that returns `self` at `t = 0` and `other` at
    /// `t = 1` exactly.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x * (1.0 - t) + other.x * t,
            y: self.y * (1.0 - t) + other.y * t,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// The drawable area in world units.
///
/// All bouquet anchors are derived from the viewport so that a resize moves
/// every target on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// Centre of the bouquet dome: horizontally centred, 35% from the top.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height * 0.35)
    }

    /// Where every stem sprouts from: just below the bottom edge.
    pub fn spawn_point(&self) -> Point {
        Point::new(self.width / 2.0, self.height + 80.0)
    }

    /// Where the stems are tied together by the bow in bouquet mode.
    pub fn gathering_point(&self) -> Point {
        let c = self.center();
        Point::new(c.x, c.y + 175.0)
    }
}

/// 24-bit colour used by palettes and the raster layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build a colour from a `0xRRGGBB` literal.
    pub const fn hex(v: u32) -> Self {
        Rgb {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub fn is_default(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold && !self.dim
    }
}

// ---------------------------------------------------------------------------
// Overlay → Renderer boundary
// ---------------------------------------------------------------------------

/// One character of UI chrome placed over the canvas.
#[derive(Debug, Clone)]
pub struct DrawOp {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub style: Style,
    pub z_order: i32,
}

// ---------------------------------------------------------------------------
// Renderer → Player boundary
// ---------------------------------------------------------------------------

/// Size of the terminal area the canvas is drawn into, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

#[derive(Debug, Clone)]
pub enum Frame {
    Full { cells: Vec<Vec<Cell>> },
    Diff { changes: Vec<CellChange> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_ends_exactly() {
        let a = Point::new(640.1, 980.3);
        let b = Point::new(500.7, 123.9);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn viewport_anchors() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!(vp.center(), Point::new(500.0, 280.0));
        assert_eq!(vp.spawn_point(), Point::new(500.0, 880.0));
        assert_eq!(vp.gathering_point(), Point::new(500.0, 455.0));
    }

    #[test]
    fn hex_colour_channels() {
        assert_eq!(Rgb::hex(0xff4d6d), Rgb { r: 0xff, g: 0x4d, b: 0x6d });
    }
}
