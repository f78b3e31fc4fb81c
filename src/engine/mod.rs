//! Engine: the garden's layout and animation core.
//!
//! Owns the flower registry and advances it one tick at a time: stems are
//! generated when a flower is planted, growth advances every tick, and in
//! bouquet mode heads ease toward their packed bouquet slots.
//!
//! The engine never deals with terminals, colours on screen, or pixels.

pub mod animate;
pub mod flower;
pub mod garden;
pub mod layout;
pub mod message;
pub mod palette;
pub mod path;
pub mod source;

use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::types::{Point, Viewport};
use garden::Garden;
use source::GardenScript;

pub struct Engine;

impl Engine {
    /// Replay a script against a fresh garden and return the final state.
    pub fn simulate(script: &GardenScript) -> Result<Garden> {
        if !(script.width > 0.0 && script.height > 0.0) {
            bail!(
                "garden must have a positive size, got {}x{}",
                script.width,
                script.height
            );
        }
        let mut rng = match script.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let viewport = Viewport::new(script.width, script.height);
        let mut garden = Garden::new(viewport);
        garden.dismiss_welcome();

        for planting in &script.plantings {
            let Some(index) = palette::position(&planting.variety) else {
                bail!("unknown variety {:?}", planting.variety);
            };
            garden.select_palette(index);
            let at = Point::new(
                planting.x.evaluate(viewport.width),
                planting.y.evaluate(viewport.height),
            );
            garden.plant(at, &mut rng);
        }

        if script.bouquet {
            if let Some(query) = garden.begin_bouquet() {
                let message = script
                    .message
                    .clone()
                    .unwrap_or_else(|| message::Message::fallback(query.flower_count, &query.varieties));
                garden.receive_message(query.epoch, message);
            }
        }

        for _ in 0..script.ticks {
            if garden.tick().is_idle() {
                break;
            }
        }
        Ok(garden)
    }
}

#[cfg(test)]
mod tests {
    use super::source::{Coordinate, Planting};
    use super::*;

    fn script(bouquet: bool) -> GardenScript {
        GardenScript {
            width: 1280.0,
            height: 900.0,
            seed: Some(42),
            plantings: vec![
                Planting {
                    x: Coordinate::Fixed(300.0),
                    y: Coordinate::Fixed(400.0),
                    variety: "rose".into(),
                },
                Planting {
                    x: Coordinate::Percent(75.0),
                    y: Coordinate::Percent(50.0),
                    variety: "Sunflowers".into(),
                },
            ],
            bouquet,
            ticks: 500,
            message: None,
        }
    }

    #[test]
    fn seeded_scripts_are_reproducible() {
        let a = Engine::simulate(&script(true)).unwrap();
        let b = Engine::simulate(&script(true)).unwrap();
        let ids = |g: &Garden| g.flowers().iter().map(|f| f.id().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.flowers()[1].position(), b.flowers()[1].position());
    }

    #[test]
    fn simulation_grows_and_wraps() {
        let g = Engine::simulate(&script(true)).unwrap();
        assert!(g.is_bouquet());
        assert!(g.message().is_some());
        assert!(g.flowers().iter().all(|f| f.growth() == 1.0));
        assert_eq!(g.flowers()[1].planted(), Point::new(960.0, 450.0));
        assert_eq!(g.flowers()[1].palette().name, "Sunflowers");
    }

    #[test]
    fn unknown_variety_is_an_error() {
        let mut s = script(false);
        s.plantings[0].variety = "orchid".into();
        assert!(Engine::simulate(&s).is_err());
    }
}
