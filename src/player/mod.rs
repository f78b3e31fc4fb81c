//! Player: the interactive terminal session.
//!
//! Owns the garden, feeds it mouse and keyboard input, ticks it at the
//! configured frame rate and writes each composited frame as a diff against
//! the previous one. All drawing decisions belong to the renderer.

pub mod clock;

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::{cursor, execute, queue, style, terminal};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GardenConfig, display_binding, matches_binding};
use crate::engine::garden::Garden;
use crate::engine::message::{MessageProvider, MessageRequest};
use crate::engine::palette::PALETTES;
use crate::menubar::{self, print_menu_item};
use crate::renderer::overlay::{self, Hints};
use crate::renderer::{Projection, Renderer, export};
use crate::types::{Cell, Color, Frame, GridSize, NamedColor, Style};

use clock::FrameClock;

/// Rows reserved above the canvas for the menu bar.
const CANVAS_OFFSET: u16 = 1;
/// Menu bar plus status line.
const CHROME_ROWS: u16 = 2;
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 12;
/// How long a status notice stays up.
const NOTICE_FRAMES: u64 = 180;
/// Longest the loop blocks on input when the clock is stopped.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// What the loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    ToggleFullscreen,
    Quit,
}

pub struct Player {
    garden: Garden,
    config: GardenConfig,
    provider: Arc<dyn MessageProvider>,
    request: Option<MessageRequest>,
    rng: StdRng,
    clock: FrameClock,
    projection: Projection,
    /// Rasterized garden, reused while nothing moves.
    canvas: Vec<Vec<Cell>>,
    /// What is currently on screen below the menu bar.
    screen: Option<Vec<Vec<Cell>>>,
    notice: Option<(String, u64)>,
    /// Garden changed since the canvas was last painted.
    dirty: bool,
    /// Menu bar and status line need redrawing.
    chrome_dirty: bool,
    fullscreen: bool,
}

impl Player {
    pub fn new(config: GardenConfig, provider: Arc<dyn MessageProvider>, grid: GridSize) -> Self {
        let projection = Projection::fit(grid, config.world_height);
        Player {
            garden: Garden::new(projection.viewport()),
            clock: FrameClock::new(config.fps),
            config,
            provider,
            request: None,
            rng: StdRng::from_entropy(),
            projection,
            canvas: Vec::new(),
            screen: None,
            notice: None,
            dirty: true,
            chrome_dirty: true,
            fullscreen: false,
        }
    }

    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    /// Canvas grid for a terminal of `cols × rows`.
    pub fn canvas_grid(cols: u16, rows: u16) -> GridSize {
        GridSize {
            width: cols,
            height: rows.saturating_sub(CHROME_ROWS),
        }
    }

    /// Run the session in the terminal.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        if term_w < MIN_WIDTH || term_h < MIN_HEIGHT {
            bail!("Terminal too small: need {MIN_WIDTH}x{MIN_HEIGHT}, have {term_w}x{term_h}");
        }
        self.resize(term_w, term_h);

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        log::info!("session started on a {term_w}x{term_h} terminal");

        let result = self.run_loop(&mut stdout);
        self.clock.cancel();

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.clock.start(Instant::now());
        self.step(stdout)?;

        loop {
            let timeout = self.clock.until_next(Instant::now()).unwrap_or(IDLE_POLL);
            if event::poll(timeout)? {
                let flow = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        Flow::Continue
                    }
                    Event::Resize(w, h) => {
                        self.resize(w, h);
                        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                        Flow::Continue
                    }
                    _ => Flow::Continue,
                };
                match flow {
                    Flow::Quit => break,
                    Flow::ToggleFullscreen => {
                        self.fullscreen = !self.fullscreen;
                        if self.fullscreen {
                            stdout.write_all(b"\x1b[10;1t")?;
                        } else {
                            stdout.write_all(b"\x1b[10;0t")?;
                        }
                        stdout.flush()?;
                    }
                    Flow::Continue => {}
                }
            }
            if self.clock.due(Instant::now()) {
                self.step(stdout)?;
            }
        }

        Ok(())
    }

    /// One frame: advance the garden, then draw.
    fn step(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.update();
        self.draw(stdout)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let keys = &self.config.key_bindings;
        if matches_binding(&keys.quit, &key) || key.code == KeyCode::Esc {
            return Flow::Quit;
        }
        if matches_binding(&keys.fullscreen, &key) {
            return Flow::ToggleFullscreen;
        }
        self.chrome_dirty = true;

        if let KeyCode::Char(c @ '1'..='9') = key.code {
            let index = c as usize - '1' as usize;
            if index < PALETTES.len() {
                self.garden.select_palette(index);
            }
        } else if matches_binding(&keys.start, &key) {
            self.garden.dismiss_welcome();
        } else if matches_binding(&keys.next_variety, &key) {
            self.garden.cycle_palette(true);
        } else if matches_binding(&keys.prev_variety, &key) {
            self.garden.cycle_palette(false);
        } else if matches_binding(&keys.wrap, &key) {
            self.wrap();
        } else if matches_binding(&keys.reset, &key) {
            self.reset();
        } else if matches_binding(&keys.export, &key) {
            self.export();
        }
        Flow::Continue
    }

    /// Left clicks on the canvas plant the selected variety. Clicks on the
    /// menu bar or status line, and any click while the welcome card shows,
    /// are ignored.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(row) = mouse.row.checked_sub(CANVAS_OFFSET) else {
            return;
        };
        if row >= self.projection.grid.height || mouse.column >= self.projection.grid.width {
            return;
        }
        let at = self.projection.cell_to_world(mouse.column, row);
        if self.garden.plant(at, &mut self.rng).is_some() {
            self.dirty = true;
            self.chrome_dirty = true;
        }
    }

    fn wrap(&mut self) {
        match self.garden.begin_bouquet() {
            Some(query) => {
                self.request = Some(MessageRequest::spawn(Arc::clone(&self.provider), query));
                self.dirty = true;
            }
            None if self.garden.flowers().is_empty() => {
                self.set_notice("Plant a flower first");
            }
            None => {}
        }
    }

    fn reset(&mut self) {
        self.garden.reset();
        self.request = None;
        self.dirty = true;
    }

    fn export(&mut self) {
        match export::export_png(&self.garden, &self.config.export_dir, self.config.supersample) {
            Ok(path) => self.set_notice(&format!("Saved {}", path.display())),
            Err(e) => {
                log::warn!("export failed: {e}");
                self.set_notice(&format!("Export failed: {e}"));
            }
        }
    }

    fn set_notice(&mut self, text: &str) {
        self.notice = Some((text.to_string(), self.clock.frame() + NOTICE_FRAMES));
        self.chrome_dirty = true;
    }

    /// Adopt a new terminal size.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let grid = Self::canvas_grid(cols, rows);
        if grid == self.projection.grid {
            return;
        }
        self.projection = Projection::fit(grid, self.config.world_height);
        self.garden.resize(self.projection.viewport());
        self.screen = None;
        self.dirty = true;
        self.chrome_dirty = true;
    }

    // -----------------------------------------------------------------------
    // Frame update
    // -----------------------------------------------------------------------

    /// Advance animation and collect a finished message.
    pub fn update(&mut self) {
        if !self.garden.tick().is_idle() {
            self.dirty = true;
        }
        let arrived = self
            .request
            .as_ref()
            .and_then(|req| req.poll().map(|message| (req.epoch(), message)));
        if let Some((epoch, message)) = arrived {
            self.request = None;
            if self.garden.receive_message(epoch, message) {
                log::info!("bouquet message arrived");
            }
            self.chrome_dirty = true;
        }
        let expired = matches!(&self.notice, Some((_, until)) if *until <= self.clock.frame());
        if expired {
            self.notice = None;
            self.chrome_dirty = true;
        }
    }

    /// Canvas cells with the chrome composited on top.
    ///
    /// The garden raster is cached and only repainted after something
    /// marked it dirty: a tick that grew or moved a flower, planting,
    /// wrapping, reset or resize. The overlay is rebuilt on every call.
    pub fn compose(&mut self) -> Vec<Vec<Cell>> {
        if self.dirty || self.canvas.is_empty() {
            self.canvas = Renderer::paint(&self.garden, &self.projection, self.config.supersample)
                .map(|canvas| Renderer::cells(&canvas))
                .unwrap_or_default();
            self.dirty = false;
        }
        let keys = &self.config.key_bindings;
        let start = display_binding(&keys.start);
        let wrap = display_binding(&keys.wrap);
        let ops = overlay::build(
            &self.garden,
            self.projection.grid,
            self.clock.frame(),
            Hints {
                start: &start,
                wrap: &wrap,
            },
        );
        let mut grid = self.canvas.clone();
        Renderer::composite(&mut grid, &ops);
        grid
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn draw(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let grid = self.compose();
        let frame = Renderer::frame(self.screen.as_deref(), &grid);
        write_frame(stdout, &frame)?;
        self.screen = Some(grid);
        if self.chrome_dirty {
            self.render_menubar(stdout)?;
            self.render_status(stdout)?;
            self.chrome_dirty = false;
        }
        stdout.flush()?;
        Ok(())
    }

    fn render_menubar(&self, stdout: &mut io::Stdout) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(" "),
        )?;
        for (i, item) in menubar::items(&self.garden, &self.config.key_bindings).iter().enumerate() {
            if i > 0 {
                queue!(stdout, style::Print("  "))?;
            }
            print_menu_item(stdout, item)?;
        }
        Ok(())
    }

    fn render_status(&self, stdout: &mut io::Stdout) -> Result<()> {
        let status_y = self.projection.grid.height + CANVAS_OFFSET;
        let status = match &self.notice {
            Some((text, _)) => format!(" {text} "),
            None => {
                let count = self.garden.flowers().len();
                let noun = if count == 1 { "flower" } else { "flowers" };
                format!(
                    " {} | {count} {noun} | {} ",
                    self.garden.selected_palette().name,
                    if self.garden.is_bouquet() { "bouquet" } else { "garden" },
                )
            }
        };

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            stdout,
            cursor::MoveTo(0, status_y),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        Ok(())
    }
}

fn write_frame(out: &mut impl Write, frame: &Frame) -> Result<()> {
    match frame {
        Frame::Full { cells } => {
            for (y, row) in cells.iter().enumerate() {
                queue!(out, cursor::MoveTo(0, y as u16 + CANVAS_OFFSET))?;
                for cell in row {
                    let cs = to_content_style(&cell.style);
                    queue!(out, style::PrintStyledContent(style::StyledContent::new(cs, cell.ch)))?;
                }
            }
        }
        Frame::Diff { changes } => {
            for change in changes {
                let cs = to_content_style(&change.cell.style);
                queue!(
                    out,
                    cursor::MoveTo(change.x, change.y + CANVAS_OFFSET),
                    style::PrintStyledContent(style::StyledContent::new(cs, change.cell.ch)),
                )?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}
