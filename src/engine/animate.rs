//! Per-tick flower updates.
//!
//! Each tick advances growth linearly and, in bouquet mode, eases every head
//! a fixed fraction of the way toward its bouquet slot. Flowers never read
//! or write each other's state.

use crate::types::Point;

use super::flower::Flower;
use super::layout::BouquetLayout;

/// Growth added per tick; a flower is fully grown after 40 ticks.
pub const GROWTH_STEP: f64 = 0.025;
const GROWTH_SNAP: f64 = 1e-9;
/// Fraction of the remaining distance covered per tick.
pub const EASE_FACTOR: f64 = 0.12;
/// A flower within this distance of its target on both axes has arrived.
pub const ARRIVAL_EPSILON: f64 = 0.1;

/// What one tick changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Flowers whose growth advanced.
    pub grown: usize,
    /// Flowers that moved toward their bouquet slot.
    pub moved: usize,
}

impl TickReport {
    /// True when the tick left every flower untouched.
    pub fn is_idle(&self) -> bool {
        self.grown == 0 && self.moved == 0
    }
}

/// Advance growth by one step, clamped at 1. Returns whether it changed.
pub fn advance_growth(flower: &mut Flower) -> bool {
    if flower.growth < 1.0 {
        let next = flower.growth + GROWTH_STEP;
        // Forty accumulated steps can land a rounding error short of 1.
        flower.growth = if next > 1.0 - GROWTH_SNAP { 1.0 } else { next };
        true
    } else {
        false
    }
}

/// Move one step toward `target`. Returns false once the flower has arrived.
pub fn ease_toward(flower: &mut Flower, target: Point) -> bool {
    let delta = target - flower.position;
    if delta.x.abs() > ARRIVAL_EPSILON || delta.y.abs() > ARRIVAL_EPSILON {
        flower.position = flower.position + delta * EASE_FACTOR;
        true
    } else {
        false
    }
}

/// Run one tick over the whole population.
pub fn tick(flowers: &mut [Flower], bouquet: bool, center: Point) -> TickReport {
    // Slots depend only on ids, which never change, so they can be computed
    // before any flower is touched.
    let targets: Vec<Option<Point>> = if bouquet {
        let layout = BouquetLayout::new(flowers);
        flowers.iter().map(|f| layout.target(f, center)).collect()
    } else {
        Vec::new()
    };

    let mut report = TickReport::default();
    for (i, flower) in flowers.iter_mut().enumerate() {
        if advance_growth(flower) {
            report.grown += 1;
        }
        if let Some(target) = targets.get(i).copied().flatten() {
            if ease_toward(flower, target) {
                report.moved += 1;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::super::layout::compute_target;
    use super::super::palette::PALETTES;
    use super::*;

    const CENTER: Point = Point::new(640.0, 315.0);

    fn flower(id: &str, at: Point) -> Flower {
        Flower::new(id, Point::new(640.0, 980.0), at, &PALETTES[4], 20.0, 0.0, Vec::new())
    }

    #[test]
    fn growth_is_monotonic_and_clamps_at_one() {
        let mut flowers = vec![flower("a", Point::new(10.0, 10.0))];
        let mut last = 0.0;
        for n in 1..=60 {
            let report = tick(&mut flowers, false, CENTER);
            let g = flowers[0].growth();
            assert!(g >= last);
            assert!(g <= 1.0);
            if n >= 40 {
                assert_eq!(g, 1.0);
            }
            if n > 40 {
                assert!(report.is_idle());
            }
            last = g;
        }
    }

    #[test]
    fn easing_converges_without_overshoot() {
        let mut f = flower("a", Point::new(0.0, 900.0));
        let target = Point::new(640.0, 200.0);
        let mut last = f.position().distance(target);
        let mut steps = 0;
        while ease_toward(&mut f, target) {
            let now = f.position().distance(target);
            assert!(now < last);
            // Never passes the target on either axis.
            assert!(f.position().x <= target.x);
            assert!(f.position().y >= target.y);
            last = now;
            steps += 1;
            assert!(steps < 500);
        }
        let rest = target - f.position();
        assert!(rest.x.abs() <= ARRIVAL_EPSILON && rest.y.abs() <= ARRIVAL_EPSILON);
        assert!(!ease_toward(&mut f, target));
    }

    #[test]
    fn bouquet_tick_moves_toward_layout_target() {
        let mut flowers = vec![
            flower("q1", Point::new(100.0, 100.0)),
            flower("q2", Point::new(900.0, 600.0)),
        ];
        let before: Vec<f64> = flowers
            .iter()
            .map(|f| f.position().distance(compute_target(f, &flowers, CENTER).unwrap()))
            .collect();
        let report = tick(&mut flowers, true, CENTER);
        assert_eq!(report.moved, 2);
        for (i, f) in flowers.iter().enumerate() {
            let target = compute_target(f, &flowers, CENTER).unwrap();
            assert!(f.position().distance(target) < before[i]);
        }
    }

    #[test]
    fn free_planting_never_moves_heads() {
        let mut flowers = vec![flower("a", Point::new(100.0, 100.0))];
        for _ in 0..10 {
            tick(&mut flowers, false, CENTER);
        }
        assert_eq!(flowers[0].position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn settled_bouquet_is_idle() {
        let mut flowers = vec![flower("a", Point::new(100.0, 100.0))];
        let mut ticks = 0;
        loop {
            let report = tick(&mut flowers, true, CENTER);
            if report.is_idle() {
                break;
            }
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(ticks >= 40);
    }
}
