//! The flower registry and the session state around it.

use rand::Rng;

use crate::types::{Point, Viewport};

use super::animate::{self, TickReport};
use super::flower::{self, Flower};
use super::message::{Message, MessageQuery};
use super::palette::{PALETTES, Palette};

/// Everything one session knows: the planted flowers in planting order, the
/// current mode and the bouquet message.
#[derive(Debug, Clone)]
pub struct Garden {
    viewport: Viewport,
    flowers: Vec<Flower>,
    bouquet: bool,
    welcome: bool,
    selected: usize,
    message: Option<Message>,
    awaiting_message: bool,
    /// Bumped by every reset so late messages can be recognised.
    epoch: u64,
}

impl Garden {
    /// A fresh garden showing the welcome overlay.
    pub fn new(viewport: Viewport) -> Self {
        Garden {
            viewport,
            flowers: Vec::new(),
            bouquet: false,
            welcome: true,
            selected: 0,
            message: None,
            awaiting_message: false,
            epoch: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn is_bouquet(&self) -> bool {
        self.bouquet
    }

    pub fn is_welcome(&self) -> bool {
        self.welcome
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn awaiting_message(&self) -> bool {
        self.awaiting_message
    }

    pub fn selected_palette(&self) -> &'static Palette {
        &PALETTES[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn dismiss_welcome(&mut self) {
        self.welcome = false;
    }

    pub fn select_palette(&mut self, index: usize) {
        if index < PALETTES.len() {
            self.selected = index;
        }
    }

    /// Step the selected variety forward or backward, wrapping around.
    pub fn cycle_palette(&mut self, forward: bool) {
        let n = PALETTES.len();
        self.selected = if forward {
            (self.selected + 1) % n
        } else {
            (self.selected + n - 1) % n
        };
    }

    /// Whether a click would plant right now.
    pub fn accepts_planting(&self) -> bool {
        !self.welcome && !self.bouquet
    }

    /// Plant the selected variety at `at`. Ignored (returns `None`) while the
    /// welcome overlay is up or the bouquet is being assembled.
    pub fn plant<R: Rng + ?Sized>(&mut self, at: Point, rng: &mut R) -> Option<&Flower> {
        if !self.accepts_planting() {
            return None;
        }
        let mut flower = Flower::plant(self.viewport.spawn_point(), at, self.selected_palette(), rng);
        while self.flowers.iter().any(|f| f.id() == flower.id()) {
            flower = Flower::new(
                flower::random_id(rng),
                flower.origin(),
                flower.planted(),
                flower.palette(),
                flower.size(),
                flower.rotation(),
                flower.stem().to_vec(),
            );
        }
        log::debug!(
            "planted {} ({}) at ({:.0}, {:.0})",
            flower.id(),
            flower.palette().name,
            at.x,
            at.y
        );
        self.flowers.push(flower);
        self.flowers.last()
    }

    #[cfg(test)]
    pub(crate) fn flowers_mut(&mut self) -> &mut [Flower] {
        &mut self.flowers
    }

    /// Add an already-built flower. Used by scripted gardens and tests.
    pub fn insert(&mut self, flower: Flower) {
        self.flowers.push(flower);
    }

    /// Switch to bouquet mode. Returns the message request to hand to a
    /// provider, or `None` if there is nothing to wrap or the bouquet is
    /// already assembled.
    pub fn begin_bouquet(&mut self) -> Option<MessageQuery> {
        if self.flowers.is_empty() || self.bouquet {
            return None;
        }
        self.bouquet = true;
        self.welcome = false;
        self.awaiting_message = true;
        log::info!("assembling bouquet of {} flowers", self.flowers.len());
        Some(MessageQuery {
            flower_count: self.flowers.len(),
            varieties: self.variety_names(),
            epoch: self.epoch,
        })
    }

    /// Store the message for the query issued in `epoch`. Messages for an
    /// earlier epoch (issued before a reset) are dropped.
    pub fn receive_message(&mut self, epoch: u64, message: Message) -> bool {
        if epoch != self.epoch || !self.bouquet || self.message.is_some() {
            return false;
        }
        self.message = Some(message);
        self.awaiting_message = false;
        true
    }

    /// Clear every flower, leave bouquet mode and drop the message.
    pub fn reset(&mut self) {
        log::info!("reset garden ({} flowers cleared)", self.flowers.len());
        self.flowers.clear();
        self.bouquet = false;
        self.message = None;
        self.awaiting_message = false;
        self.welcome = true;
        self.epoch += 1;
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Adopt a new viewport. Targets follow the new centre on the next tick.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::info!("viewport resized to {:.0}x{:.0}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
    }

    pub fn tick(&mut self) -> TickReport {
        animate::tick(&mut self.flowers, self.bouquet, self.viewport.center())
    }

    /// Distinct variety names in planting order, comma separated.
    pub fn variety_names(&self) -> String {
        let mut names: Vec<&str> = Vec::new();
        for f in &self.flowers {
            if !names.contains(&f.palette().name) {
                names.push(f.palette().name);
            }
        }
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn open_garden() -> Garden {
        let mut g = Garden::new(Viewport::new(1280.0, 900.0));
        g.dismiss_welcome();
        g
    }

    #[test]
    fn welcome_overlay_blocks_planting() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut g = Garden::new(Viewport::new(1280.0, 900.0));
        assert!(g.plant(Point::new(10.0, 10.0), &mut rng).is_none());
        g.dismiss_welcome();
        assert!(g.plant(Point::new(10.0, 10.0), &mut rng).is_some());
    }

    #[test]
    fn bouquet_mode_blocks_planting() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut g = open_garden();
        g.plant(Point::new(300.0, 300.0), &mut rng);
        assert!(g.begin_bouquet().is_some());
        assert!(g.plant(Point::new(400.0, 300.0), &mut rng).is_none());
        assert_eq!(g.flowers().len(), 1);
    }

    #[test]
    fn empty_garden_cannot_be_wrapped() {
        let mut g = open_garden();
        assert!(g.begin_bouquet().is_none());
        assert!(!g.is_bouquet());
        assert!(!g.awaiting_message());
    }

    #[test]
    fn query_lists_distinct_varieties_in_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = open_garden();
        g.select_palette(4);
        g.plant(Point::new(100.0, 100.0), &mut rng);
        g.select_palette(0);
        g.plant(Point::new(200.0, 100.0), &mut rng);
        g.select_palette(4);
        g.plant(Point::new(300.0, 100.0), &mut rng);
        let q = g.begin_bouquet().unwrap();
        assert_eq!(q.flower_count, 3);
        assert_eq!(q.varieties, "Sunflowers, Red Roses");
    }

    #[test]
    fn stale_message_is_dropped_after_reset() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = open_garden();
        g.plant(Point::new(100.0, 100.0), &mut rng);
        let q = g.begin_bouquet().unwrap();
        g.reset();
        assert!(!g.receive_message(q.epoch, Message::fallback(1, "Red Roses")));
        assert!(g.message().is_none());
    }

    #[test]
    fn message_arrives_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut g = open_garden();
        g.plant(Point::new(100.0, 100.0), &mut rng);
        let q = g.begin_bouquet().unwrap();
        assert!(g.awaiting_message());
        assert!(g.receive_message(q.epoch, Message::fallback(1, "Red Roses")));
        assert!(!g.awaiting_message());
        assert!(!g.receive_message(q.epoch, Message::fallback(2, "Sunflowers")));
        assert_eq!(g.message().map(|m| m.meaning.contains("1 flower")), Some(true));
    }

    #[test]
    fn palette_cycle_wraps() {
        let mut g = open_garden();
        g.cycle_palette(false);
        assert_eq!(g.selected_index(), PALETTES.len() - 1);
        g.cycle_palette(true);
        assert_eq!(g.selected_index(), 0);
        g.select_palette(99);
        assert_eq!(g.selected_index(), 0);
    }

    #[test]
    fn spawn_tracks_viewport() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut g = open_garden();
        g.resize(Viewport::new(800.0, 600.0));
        let f = g.plant(Point::new(10.0, 10.0), &mut rng).unwrap();
        assert_eq!(f.origin(), Point::new(400.0, 680.0));
    }
}
