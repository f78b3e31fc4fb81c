//! Organic stem paths.
//!
//! A stem is the straight segment from the spawn point to the planted point,
//! bent sideways by a sine wave whose amplitude fades to zero at both ends.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use crate::types::Point;

/// Number of equal steps along the stem; paths have one more point than this.
pub const STEM_SEGMENTS: usize = 25;

/// Amplitude cap in world units.
const MAX_AMPLITUDE: f64 = 20.0;
/// Amplitude as a fraction of the stem length, before the cap.
const AMPLITUDE_RATIO: f64 = 0.05;

/// The random draws that shape one stem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waviness {
    /// Half-waves along the stem, in `[1, 2)`.
    pub frequency: f64,
    /// Phase offset in `[0, 2π)`.
    pub phase: f64,
}

impl Waviness {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Waviness {
            frequency: rng.gen_range(1.0..2.0),
            phase: rng.gen_range(0.0..TAU),
        }
    }
}

/// Generate a wavy stem from `start` to `end` with fresh random waviness.
pub fn generate_path<R: Rng + ?Sized>(start: Point, end: Point, rng: &mut R) -> Vec<Point> {
    generate_path_with(start, end, Waviness::random(rng))
}

/// Generate a stem with explicit waviness. Always returns
/// `STEM_SEGMENTS + 1` points, the first equal to `start` and the last equal
/// to `end`.
pub fn generate_path_with(start: Point, end: Point, wave: Waviness) -> Vec<Point> {
    let amplitude = MAX_AMPLITUDE.min(start.distance(end) * AMPLITUDE_RATIO);
    let heading = (end.y - start.y).atan2(end.x - start.x);
    let normal = Point::new((heading + PI / 2.0).cos(), (heading + PI / 2.0).sin());

    (0..=STEM_SEGMENTS)
        .map(|i| {
            let t = i as f64 / STEM_SEGMENTS as f64;
            // sin(π) is not exactly zero in floating point.
            let envelope = if i == 0 || i == STEM_SEGMENTS {
                0.0
            } else {
                (t * PI).sin()
            };
            let curve = (t * PI * wave.frequency + wave.phase).sin() * envelope * amplitude;
            start.lerp(end, t) + normal * curve
        })
        .collect()
}
