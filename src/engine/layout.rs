//! Bouquet packing.
//!
//! Flowers are split into a core class and a filler class. Each class is laid
//! out on its own golden-angle spiral inside an ellipse above the bouquet
//! centre; the core ellipse is the tighter of the two. Order within a class
//! comes from sorting ids, so a flower's slot depends only on which flowers
//! exist, never on when they were planted.

use crate::types::Point;

use super::flower::Flower;

/// Phyllotaxis divergence angle (≈137.5°) in radians.
pub const GOLDEN_ANGLE: f64 = 2.39996;
/// Radians of jitter per unit of `hash mod 10`.
pub const JITTER_STEP: f64 = 0.05;
/// How far above the dome centre the spiral is centred.
const LIFT: f64 = 80.0;
/// Vertical squash for the upper and lower halves of the ellipse.
const UPPER_SQUASH: f64 = 0.4;
const LOWER_SQUASH: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub width: f64,
    pub height: f64,
}

pub const CORE_ELLIPSE: Ellipse = Ellipse {
    width: 90.0,
    height: 55.0,
};
pub const FILLER_ELLIPSE: Ellipse = Ellipse {
    width: 200.0,
    height: 95.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Core,
    Filler,
}

impl Class {
    pub fn of(flower: &Flower) -> Self {
        if flower.is_core() { Class::Core } else { Class::Filler }
    }

    pub fn ellipse(self) -> Ellipse {
        match self {
            Class::Core => CORE_ELLIPSE,
            Class::Filler => FILLER_ELLIPSE,
        }
    }
}

/// Where one flower sits on its class spiral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub class: Class,
    pub index: usize,
    pub total: usize,
    /// Spiral angle including jitter.
    pub angle: f64,
    /// Radius as a fraction of the ellipse, in `(0, 1)`.
    pub spread: f64,
}

impl Placement {
    /// World position of this slot for a bouquet centred at `center`.
    pub fn target(&self, center: Point) -> Point {
        let ellipse = self.class.ellipse();
        let vertical = self.angle.sin();
        let squash = if vertical > 0.0 { UPPER_SQUASH } else { LOWER_SQUASH };
        Point::new(
            center.x + self.angle.cos() * self.spread * ellipse.width,
            (center.y - LIFT) + vertical * self.spread * ellipse.height * squash,
        )
    }
}

/// The id-sorted partition of a population. Build it once per tick and query
/// it for every flower.
#[derive(Debug, Clone)]
pub struct BouquetLayout<'a> {
    core: Vec<&'a str>,
    filler: Vec<&'a str>,
}

impl<'a> BouquetLayout<'a> {
    pub fn new(flowers: &'a [Flower]) -> Self {
        let mut core = Vec::new();
        let mut filler = Vec::new();
        for flower in flowers {
            match Class::of(flower) {
                Class::Core => core.push(flower.id()),
                Class::Filler => filler.push(flower.id()),
            }
        }
        core.sort_unstable();
        filler.sort_unstable();
        BouquetLayout { core, filler }
    }

    fn members(&self, class: Class) -> &[&'a str] {
        match class {
            Class::Core => &self.core,
            Class::Filler => &self.filler,
        }
    }

    /// Slot of `flower`, or `None` if it is not part of the population.
    pub fn placement(&self, flower: &Flower) -> Option<Placement> {
        let class = Class::of(flower);
        let members = self.members(class);
        let index = members
            .binary_search_by(|id| (*id).cmp(flower.id()))
            .ok()?;
        let total = members.len();
        let jitter = f64::from(flower.id_hash() % 10) * JITTER_STEP;
        Some(Placement {
            class,
            index,
            total,
            angle: index as f64 * GOLDEN_ANGLE + jitter,
            spread: ((index + 1) as f64 / (total + 1) as f64).sqrt(),
        })
    }

    pub fn target(&self, flower: &Flower, center: Point) -> Option<Point> {
        self.placement(flower).map(|p| p.target(center))
    }
}

/// One-shot target for a single flower. Prefer `BouquetLayout` when placing a
/// whole population.
pub fn compute_target(flower: &Flower, all: &[Flower], center: Point) -> Option<Point> {
    BouquetLayout::new(all).target(flower, center)
}
