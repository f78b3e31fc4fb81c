//! Tiny 5-pixel-tall bitmap font drawn with half blocks.
//!
//! Each glyph row is a bitmask, most significant of the `width` bits first.
//! Two pixel rows share one terminal cell, so a glyph occupies three rows.

use crate::types::{DrawOp, Style};

pub const GLYPH_ROWS: usize = 5;
/// Terminal rows a line of glyphs occupies.
pub const CELL_ROWS: u16 = GLYPH_ROWS.div_ceil(2) as u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub width: u8,
    pub rows: [u8; GLYPH_ROWS],
}

impl Glyph {
    const fn new(width: u8, rows: [u8; GLYPH_ROWS]) -> Self {
        Glyph { width, rows }
    }

    pub fn lit(&self, col: u8, row: usize) -> bool {
        row < GLYPH_ROWS && col < self.width && self.rows[row] & (1 << (self.width - 1 - col)) != 0
    }
}

/// Case-insensitive lookup.
pub fn glyph(ch: char) -> Option<Glyph> {
    let g = match ch.to_ascii_uppercase() {
        'A' => Glyph::new(3, [0b010, 0b101, 0b111, 0b101, 0b101]),
        'B' => Glyph::new(3, [0b110, 0b101, 0b110, 0b101, 0b110]),
        'C' => Glyph::new(3, [0b011, 0b100, 0b100, 0b100, 0b011]),
        'D' => Glyph::new(3, [0b110, 0b101, 0b101, 0b101, 0b110]),
        'E' => Glyph::new(3, [0b111, 0b100, 0b110, 0b100, 0b111]),
        'F' => Glyph::new(3, [0b111, 0b100, 0b110, 0b100, 0b100]),
        'G' => Glyph::new(3, [0b011, 0b100, 0b101, 0b101, 0b011]),
        'H' => Glyph::new(3, [0b101, 0b101, 0b111, 0b101, 0b101]),
        'I' => Glyph::new(3, [0b111, 0b010, 0b010, 0b010, 0b111]),
        'J' => Glyph::new(3, [0b001, 0b001, 0b001, 0b101, 0b010]),
        'K' => Glyph::new(3, [0b101, 0b101, 0b110, 0b101, 0b101]),
        'L' => Glyph::new(3, [0b100, 0b100, 0b100, 0b100, 0b111]),
        'M' => Glyph::new(5, [0b10001, 0b11011, 0b10101, 0b10001, 0b10001]),
        'N' => Glyph::new(4, [0b1001, 0b1101, 0b1011, 0b1001, 0b1001]),
        'O' => Glyph::new(3, [0b010, 0b101, 0b101, 0b101, 0b010]),
        'P' => Glyph::new(3, [0b110, 0b101, 0b110, 0b100, 0b100]),
        'Q' => Glyph::new(4, [0b0110, 0b1001, 0b1001, 0b1010, 0b0101]),
        'R' => Glyph::new(3, [0b110, 0b101, 0b110, 0b101, 0b101]),
        'S' => Glyph::new(3, [0b011, 0b100, 0b010, 0b001, 0b110]),
        'T' => Glyph::new(3, [0b111, 0b010, 0b010, 0b010, 0b010]),
        'U' => Glyph::new(3, [0b101, 0b101, 0b101, 0b101, 0b111]),
        'V' => Glyph::new(3, [0b101, 0b101, 0b101, 0b101, 0b010]),
        'W' => Glyph::new(5, [0b10001, 0b10001, 0b10101, 0b11011, 0b10001]),
        'X' => Glyph::new(3, [0b101, 0b101, 0b010, 0b101, 0b101]),
        'Y' => Glyph::new(3, [0b101, 0b101, 0b010, 0b010, 0b010]),
        'Z' => Glyph::new(3, [0b111, 0b001, 0b010, 0b100, 0b111]),
        '0' => Glyph::new(3, [0b111, 0b101, 0b101, 0b101, 0b111]),
        '1' => Glyph::new(3, [0b010, 0b110, 0b010, 0b010, 0b111]),
        '2' => Glyph::new(3, [0b110, 0b001, 0b010, 0b100, 0b111]),
        '3' => Glyph::new(3, [0b110, 0b001, 0b010, 0b001, 0b110]),
        '4' => Glyph::new(3, [0b101, 0b101, 0b111, 0b001, 0b001]),
        '5' => Glyph::new(3, [0b111, 0b100, 0b110, 0b001, 0b110]),
        '6' => Glyph::new(3, [0b011, 0b100, 0b111, 0b101, 0b111]),
        '7' => Glyph::new(3, [0b111, 0b001, 0b010, 0b010, 0b010]),
        '8' => Glyph::new(3, [0b111, 0b101, 0b111, 0b101, 0b111]),
        '9' => Glyph::new(3, [0b111, 0b101, 0b111, 0b001, 0b110]),
        '!' => Glyph::new(1, [1, 1, 1, 0, 1]),
        ' ' => Glyph::new(2, [0; GLYPH_ROWS]),
        _ => return None,
    };
    Some(g)
}

/// Columns `text` needs, one blank column between glyphs. Unknown
/// characters are skipped.
pub fn text_width(text: &str) -> u16 {
    let widths: Vec<u16> = text.chars().filter_map(glyph).map(|g| u16::from(g.width)).collect();
    let gaps = widths.len().saturating_sub(1) as u16;
    widths.iter().sum::<u16>() + gaps
}

/// Emit `text` with its top-left corner at `(x, y)`.
pub fn draw(ops: &mut Vec<DrawOp>, text: &str, x: u16, y: u16, style: &Style, z_order: i32) {
    let mut cursor = x;
    for g in text.chars().filter_map(glyph) {
        for col in 0..g.width {
            for cell_row in 0..CELL_ROWS {
                let top = g.lit(col, usize::from(cell_row) * 2);
                let bottom = g.lit(col, usize::from(cell_row) * 2 + 1);
                let ch = match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => continue,
                };
                ops.push(DrawOp {
                    x: cursor + u16::from(col),
                    y: y + cell_row,
                    ch,
                    style: style.clone(),
                    z_order,
                });
            }
        }
        cursor += u16::from(g.width) + 1;
    }
}
