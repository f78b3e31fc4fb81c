//! Renderer: turns garden state into pixels and terminal cells.
//!
//! `scene` paints a frame onto a `Canvas` (kurbo paths rasterized by
//! tiny-skia); this module maps the canvas onto
//! the terminal (two vertical pixels per cell using `▀`), lays UI chrome over
//! it and diffs successive grids so the player only writes what changed.
//!
//! The renderer is pure with respect to the garden: it reads, never writes.

pub mod canvas;
pub mod export;
pub mod heads;
pub mod overlay;
pub mod scene;
pub mod shape;
pub mod wrap;

use kurbo::Affine;

use crate::engine::garden::Garden;
use crate::types::{Cell, CellChange, Color, DrawOp, Frame, GridSize, Point, Style, Viewport};

use canvas::Canvas;

/// Pixels stacked in one terminal cell.
const PIXELS_PER_CELL: u16 = 2;
/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// Mapping between terminal cells, canvas pixels and world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub grid: GridSize,
    /// World units covered by one canvas pixel.
    pub world_per_pixel: f64,
}

impl Projection {
    /// Fit `world_height` world units onto the grid's pixel rows.
    pub fn fit(grid: GridSize, world_height: f64) -> Self {
        let rows = f64::from(grid.height.max(1) * PIXELS_PER_CELL);
        Projection {
            grid,
            world_per_pixel: world_height / rows,
        }
    }

    pub fn pixel_width(&self) -> usize {
        usize::from(self.grid.width)
    }

    pub fn pixel_height(&self) -> usize {
        usize::from(self.grid.height) * usize::from(PIXELS_PER_CELL)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.pixel_width() as f64 * self.world_per_pixel,
            self.pixel_height() as f64 * self.world_per_pixel,
        )
    }

    /// World point at the centre of a canvas cell.
    pub fn cell_to_world(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.world_per_pixel,
            (f64::from(row) + 0.5) * f64::from(PIXELS_PER_CELL) * self.world_per_pixel,
        )
    }
}

pub struct Renderer;

impl Renderer {
    /// Paint the garden at `supersample` times the projection's resolution
    /// and average it back down. `None` for an empty grid.
    pub fn paint(garden: &Garden, projection: &Projection, supersample: usize) -> Option<Canvas> {
        let ss = supersample.max(1);
        let mut canvas = Canvas::new(projection.pixel_width() * ss, projection.pixel_height() * ss)?;
        let view = Affine::scale(ss as f64 / projection.world_per_pixel);
        scene::draw(garden, &mut canvas, &view);
        canvas.downsample(ss)
    }

    /// Fold pixel pairs into half-block cells.
    pub fn cells(canvas: &Canvas) -> Vec<Vec<Cell>> {
        let w = canvas.width();
        let rows = canvas.height() / usize::from(PIXELS_PER_CELL);
        (0..rows)
            .map(|row| {
                (0..w)
                    .map(|x| Cell {
                        ch: HALF_BLOCK,
                        style: Style {
                            fg: Some(Color::from(canvas.pixel(x, row * 2))),
                            bg: Some(Color::from(canvas.pixel(x, row * 2 + 1))),
                            bold: false,
                            dim: false,
                        },
                    })
                    .collect()
            })
            .collect()
    }

    /// Lay overlay ops onto a grid.
    ///
    /// Ops are sorted by z-order so that higher z values paint over lower
    /// ones. An op without a background keeps the background already in the
    /// cell, so text floats over the garden.
    pub fn composite(grid: &mut [Vec<Cell>], ops: &[DrawOp]) {
        let mut ops: Vec<_> = ops.iter().collect();
        ops.sort_by_key(|op| op.z_order);

        for op in ops {
            let x = op.x as usize;
            let y = op.y as usize;
            let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) else {
                continue;
            };
            let bg = match (&op.style.bg, &cell.style.bg) {
                (Some(bg), _) => Some(bg.clone()),
                (None, below) => below.clone(),
            };
            *cell = Cell {
                ch: op.ch,
                style: Style {
                    bg,
                    ..op.style.clone()
                },
            };
        }
    }

    /// Full frame when there is no previous grid or its size changed,
    /// otherwise the cell changes since `prev`.
    pub fn frame(prev: Option<&[Vec<Cell>]>, next: &[Vec<Cell>]) -> Frame {
        match prev {
            Some(prev) if Self::same_shape(prev, next) => Frame::Diff {
                changes: Self::diff(prev, next),
            },
            _ => Frame::Full {
                cells: next.to_vec(),
            },
        }
    }

    fn same_shape(a: &[Vec<Cell>], b: &[Vec<Cell>]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.len() == y.len())
    }

    /// Compute a cell-level diff between two grids.
    fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }
}
