//! UI chrome laid over the canvas as `DrawOp`s.
//!
//! Every widget resolves to ops in canvas-grid coordinates; the renderer
//! composites them by z-order. What is shown depends only on the garden's
//! mode and the frame counter, which drives the pulse and the spinner.

pub mod font;
pub mod text;

use crate::engine::garden::Garden;
use crate::engine::palette::PALETTES;
use crate::types::{Color, DrawOp, GridSize, NamedColor, Rgb, Style};

const Z_HUD: i32 = 10;
const Z_CARD: i32 = 30;
const Z_WELCOME: i32 = 40;

const CARD_BG: Rgb = Rgb::hex(0x1c0a12);
const CARD_FG: Rgb = Rgb::hex(0xfce4ec);
const ACCENT: Rgb = Rgb::hex(0xf06292);

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
/// Frames per spinner step.
const SPINNER_RATE: u64 = 8;
/// Frames per half pulse of the planting header.
const PULSE_RATE: u64 = 45;

/// Resolve into concrete ops.
pub trait Resolve {
    fn resolve(&self, ops: &mut Vec<DrawOp>);
}

/// Plain text rows starting at `(x, y)`.
pub struct Text {
    pub x: u16,
    pub y: u16,
    pub rows: Vec<String>,
    pub style: Style,
    pub z_order: i32,
}

impl Resolve for Text {
    fn resolve(&self, ops: &mut Vec<DrawOp>) {
        for (r, row) in self.rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                ops.push(DrawOp {
                    x: self.x + c as u16,
                    y: self.y + r as u16,
                    ch,
                    style: self.style.clone(),
                    z_order: self.z_order,
                });
            }
        }
    }
}

/// A filled box with a rounded border and an optional title on the top edge.
pub struct Card {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub title: Option<String>,
    pub style: Style,
    pub z_order: i32,
}

impl Resolve for Card {
    fn resolve(&self, ops: &mut Vec<DrawOp>) {
        let (w, h) = (self.width, self.height);
        if w < 2 || h < 2 {
            return;
        }
        let z = self.z_order;
        let mut put = |x: u16, y: u16, ch: char| {
            ops.push(DrawOp {
                x: self.x + x,
                y: self.y + y,
                ch,
                style: self.style.clone(),
                z_order: z,
            });
        };
        for y in 0..h {
            for x in 0..w {
                let ch = match (x, y) {
                    (0, 0) => '╭',
                    (x, 0) if x == w - 1 => '╮',
                    (0, y) if y == h - 1 => '╰',
                    (x, y) if x == w - 1 && y == h - 1 => '╯',
                    (_, 0) => '─',
                    (_, y) if y == h - 1 => '─',
                    (0, _) => '│',
                    (x, _) if x == w - 1 => '│',
                    _ => ' ',
                };
                put(x, y, ch);
            }
        }
        if let Some(title) = &self.title {
            let label = format!(" {title} ");
            for (i, ch) in label.chars().enumerate() {
                let x = 2 + i as u16;
                if x + 1 < w {
                    ops.push(DrawOp {
                        x: self.x + x,
                        y: self.y,
                        ch,
                        style: Style {
                            bold: true,
                            ..self.style.clone()
                        },
                        z_order: z + 1,
                    });
                }
            }
        }
    }
}

/// Large block-font text.
pub struct Banner {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub style: Style,
    pub z_order: i32,
}

impl Resolve for Banner {
    fn resolve(&self, ops: &mut Vec<DrawOp>) {
        font::draw(ops, &self.text, self.x, self.y, &self.style, self.z_order);
    }
}

/// Key names shown in the chrome.
#[derive(Debug, Clone, Copy)]
pub struct Hints<'a> {
    pub start: &'a str,
    pub wrap: &'a str,
}

/// All chrome for the current state, in canvas-grid coordinates.
pub fn build(garden: &Garden, grid: GridSize, frame: u64, hints: Hints<'_>) -> Vec<DrawOp> {
    let mut widgets: Vec<Box<dyn Resolve>> = Vec::new();

    if garden.is_welcome() {
        welcome(&mut widgets, grid, hints);
    } else if garden.is_bouquet() {
        if garden.awaiting_message() {
            widgets.push(Box::new(spinner(grid, frame)));
        }
        if let Some(message) = garden.message() {
            message_card(&mut widgets, grid, &message.text, &message.meaning);
        }
    } else {
        widgets.push(planting_header(garden, grid, frame));
        widgets.extend(variety_picker(garden, grid, hints));
    }

    let mut ops = Vec::new();
    for w in &widgets {
        w.resolve(&mut ops);
    }
    ops.retain(|op| op.x < grid.width && op.y < grid.height);
    ops
}

fn card_style() -> Style {
    Style {
        fg: Some(CARD_FG.into()),
        bg: Some(CARD_BG.into()),
        bold: false,
        dim: false,
    }
}

fn welcome(widgets: &mut Vec<Box<dyn Resolve>>, grid: GridSize, hints: Hints<'_>) {
    const TITLE: &str = "BOUQUET";
    let lines = [
        "Click anywhere to plant a flower.".to_string(),
        "Choose a variety with 1-5 or Tab.".to_string(),
        format!("Press {} to wrap them into a bouquet.", hints.wrap),
        String::new(),
        format!("Press {} to start", hints.start),
    ];
    let text_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let inner = text_w.max(font::text_width(TITLE));
    let width = (inner + 6).min(grid.width);
    let rows: Vec<String> = lines
        .iter()
        .flat_map(|l| text::wrap(l, usize::from(width.saturating_sub(6))))
        .collect();
    let height = (font::CELL_ROWS + rows.len() as u16 + 4).min(grid.height);
    let x = text::centered(grid.width, usize::from(width));
    let y = text::centered(grid.height, usize::from(height));

    widgets.push(Box::new(Card {
        x,
        y,
        width,
        height,
        title: None,
        style: card_style(),
        z_order: Z_WELCOME,
    }));
    widgets.push(Box::new(Banner {
        x: x + text::centered(width, usize::from(font::text_width(TITLE))),
        y: y + 1,
        text: TITLE.to_string(),
        style: Style {
            fg: Some(ACCENT.into()),
            ..card_style()
        },
        z_order: Z_WELCOME + 1,
    }));
    widgets.push(Box::new(Text {
        x: x + 3,
        y: y + font::CELL_ROWS + 2,
        rows,
        style: card_style(),
        z_order: Z_WELCOME + 1,
    }));
}

/// "TAP TO PLANT" before the first flower, then the flower count, pulsing
/// between bold and dim. Falls back to plain text on narrow grids.
fn planting_header(garden: &Garden, grid: GridSize, frame: u64) -> Box<dyn Resolve> {
    let count = garden.flowers().len();
    let label = match count {
        0 => "TAP TO PLANT".to_string(),
        1 => "1 FLOWER".to_string(),
        n => format!("{n} FLOWERS"),
    };
    let bright = (frame / PULSE_RATE) % 2 == 0;
    let style = Style {
        fg: Some(Color::Named(NamedColor::White)),
        bg: None,
        bold: bright,
        dim: !bright,
    };
    let big = font::text_width(&label);
    if big + 4 <= grid.width && grid.height >= 16 {
        Box::new(Banner {
            x: text::centered(grid.width, usize::from(big)),
            y: 1,
            text: label,
            style,
            z_order: Z_HUD,
        })
    } else {
        Box::new(Text {
            x: text::centered(grid.width, label.len()),
            y: 0,
            rows: vec![label],
            style,
            z_order: Z_HUD,
        })
    }
}

fn variety_picker(garden: &Garden, grid: GridSize, hints: Hints<'_>) -> Vec<Box<dyn Resolve>> {
    let mut widgets: Vec<Box<dyn Resolve>> = Vec::new();
    let top = grid.height.saturating_sub(PALETTES.len() as u16 + 2);
    for (i, palette) in PALETTES.iter().enumerate() {
        let selected = i == garden.selected_index();
        let marker = if selected { '▸' } else { ' ' };
        widgets.push(Box::new(Text {
            x: 2,
            y: top + i as u16,
            rows: vec![format!("{marker} {} {}", i + 1, palette.name)],
            style: Style {
                fg: Some(palette.petals[0].into()),
                bg: None,
                bold: selected,
                dim: !selected,
            },
            z_order: Z_HUD,
        }));
    }
    if !garden.flowers().is_empty() {
        let hint = format!("{} wrap bouquet", hints.wrap);
        widgets.push(Box::new(Text {
            x: 2,
            y: top + PALETTES.len() as u16 + 1,
            rows: vec![hint],
            style: Style {
                fg: Some(ACCENT.into()),
                bg: None,
                bold: false,
                dim: false,
            },
            z_order: Z_HUD,
        }));
    }
    widgets
}

fn spinner(grid: GridSize, frame: u64) -> Text {
    let glyph = SPINNER[((frame / SPINNER_RATE) % SPINNER.len() as u64) as usize];
    let label = format!("{glyph} wrapping your gift");
    Text {
        x: text::centered(grid.width, label.chars().count()),
        y: grid.height.saturating_sub(3),
        rows: vec![label],
        style: Style {
            fg: Some(CARD_FG.into()),
            bg: None,
            bold: true,
            dim: false,
        },
        z_order: Z_CARD,
    }
}

/// The message and its meaning in a titled card along the bottom edge.
fn message_card(widgets: &mut Vec<Box<dyn Resolve>>, grid: GridSize, message: &str, meaning: &str) {
    let width = grid.width.saturating_sub(4).min(56);
    if width < 12 {
        return;
    }
    let inner = usize::from(width - 4);
    let text_rows = text::wrap(message, inner);
    let meaning_rows = text::wrap(meaning, inner);
    let height = (text_rows.len() + meaning_rows.len() + 3) as u16;
    let x = text::centered(grid.width, usize::from(width));
    let y = grid.height.saturating_sub(height + 1);

    widgets.push(Box::new(Card {
        x,
        y,
        width,
        height,
        title: Some("For you".to_string()),
        style: card_style(),
        z_order: Z_CARD,
    }));
    let body_y = y + 1;
    let meaning_y = body_y + text_rows.len() as u16 + 1;
    widgets.push(Box::new(Text {
        x: x + 2,
        y: body_y,
        rows: text_rows,
        style: Style {
            bold: true,
            ..card_style()
        },
        z_order: Z_CARD + 1,
    }));
    widgets.push(Box::new(Text {
        x: x + 2,
        y: meaning_y,
        rows: meaning_rows,
        style: Style {
            dim: true,
            ..card_style()
        },
        z_order: Z_CARD + 1,
    }));
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::engine::message::Message;
    use crate::renderer::Renderer;
    use crate::types::{Cell, Point, Viewport};

    const GRID: GridSize = GridSize {
        width: 100,
        height: 36,
    };
    const HINTS: Hints<'static> = Hints {
        start: "Enter",
        wrap: "w",
    };

    /// Composite onto a blank grid and read it back row by row.
    fn text_of(ops: &[DrawOp]) -> String {
        let mut grid = vec![vec![Cell::default(); usize::from(GRID.width)]; usize::from(GRID.height)];
        Renderer::composite(&mut grid, ops);
        grid.iter()
            .map(|row| row.iter().map(|c| c.ch).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn planted_garden(n: usize) -> Garden {
        let mut rng = StdRng::seed_from_u64(9);
        let mut g = Garden::new(Viewport::new(1200.0, 900.0));
        g.dismiss_welcome();
        for i in 0..n {
            g.plant(Point::new(100.0 + i as f64 * 50.0, 300.0), &mut rng);
        }
        g
    }

    #[test]
    fn welcome_card_names_the_start_key() {
        let g = Garden::new(Viewport::new(1200.0, 900.0));
        let ops = build(&g, GRID, 0, HINTS);
        assert!(text_of(&ops).contains("Press Enter to start"));
        assert!(ops.iter().all(|op| op.z_order >= Z_WELCOME));
    }

    #[test]
    fn header_counts_flowers_and_pulses() {
        let g = planted_garden(0);
        let a = build(&g, GridSize { width: 30, height: 10 }, 0, HINTS);
        assert!(text_of(&a).contains("TAP TO PLANT"));

        let g = planted_garden(3);
        let small = GridSize { width: 30, height: 10 };
        let bright = build(&g, small, 0, HINTS);
        assert!(text_of(&bright).contains("3 FLOWERS"));
        let dim = build(&g, small, PULSE_RATE, HINTS);
        let header = |ops: &[DrawOp]| ops.iter().find(|op| op.y == 0).map(|op| op.style.bold);
        assert_eq!(header(&bright), Some(true));
        assert_eq!(header(&dim), Some(false));
    }

    #[test]
    fn picker_marks_selection() {
        let mut g = planted_garden(1);
        g.select_palette(2);
        let ops = build(&g, GRID, 0, HINTS);
        let text = text_of(&ops);
        assert!(text.contains("▸ 3 Pink Daisies"));
        assert!(text.contains("w wrap bouquet"));
    }

    #[test]
    fn spinner_then_message_card() {
        let mut g = planted_garden(2);
        let q = g.begin_bouquet().unwrap();
        let waiting = build(&g, GRID, 0, HINTS);
        assert!(text_of(&waiting).contains("wrapping your gift"));
        assert!(!text_of(&waiting).contains("Pink"));

        g.receive_message(
            q.epoch,
            Message {
                text: "Roses for the road ahead".into(),
                meaning: "Love".into(),
            },
        );
        let done = text_of(&build(&g, GRID, 0, HINTS));
        assert!(done.contains("For you"));
        assert!(done.contains("Roses for the road ahead"));
        assert!(!done.contains("wrapping"));
    }

    #[test]
    fn ops_stay_inside_the_grid() {
        let tiny = GridSize { width: 12, height: 5 };
        let g = Garden::new(Viewport::new(100.0, 100.0));
        for op in build(&g, tiny, 0, HINTS) {
            assert!(op.x < tiny.width && op.y < tiny.height);
        }
    }
}
