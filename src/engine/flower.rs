use rand::Rng;

use crate::types::Point;

use super::palette::Palette;
use super::path;

/// Length of generated flower ids.
const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Growth at which the head starts to open.
pub const BLOOM_THRESHOLD: f64 = 0.8;

/// A planted flower.
///
/// Everything except `growth` and `position` is fixed at planting time.
#[derive(Debug, Clone)]
pub struct Flower {
    id: String,
    origin: Point,
    planted: Point,
    pub(crate) position: Point,
    palette: &'static Palette,
    size: f64,
    pub(crate) growth: f64,
    rotation: f64,
    stem: Vec<Point>,
}

impl Flower {
    /// Plant a flower with a fresh id, random size, tilt and stem.
    pub fn plant<R: Rng + ?Sized>(
        origin: Point,
        planted: Point,
        palette: &'static Palette,
        rng: &mut R,
    ) -> Self {
        let id = random_id(rng);
        let size = rng.gen_range(14.0..24.0);
        let rotation = rng.gen_range(-0.4..0.4);
        let stem = path::generate_path(origin, planted, rng);
        Flower::new(id, origin, planted, palette, size, rotation, stem)
    }

    /// Assemble a flower from explicit parts. Growth starts at zero and the
    /// head sits on the planted point.
    pub fn new(
        id: impl Into<String>,
        origin: Point,
        planted: Point,
        palette: &'static Palette,
        size: f64,
        rotation: f64,
        stem: Vec<Point>,
    ) -> Self {
        Flower {
            id: id.into(),
            origin,
            planted,
            position: planted,
            palette,
            size,
            growth: 0.0,
            rotation,
            stem,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn planted(&self) -> Point {
        self.planted
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn palette(&self) -> &'static Palette {
        self.palette
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn growth(&self) -> f64 {
        self.growth
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn stem(&self) -> &[Point] {
        &self.stem
    }

    pub fn is_core(&self) -> bool {
        self.palette.is_core()
    }

    /// Additive hash of the id's UTF-16 code units. Only good for jitter.
    pub fn id_hash(&self) -> u32 {
        self.id.encode_utf16().map(u32::from).sum()
    }

    /// How many stem points are revealed at the current growth. The stem
    /// finishes a little before the head starts to open.
    pub fn visible_stem_points(&self) -> usize {
        let reveal = (self.growth * 1.2).min(1.0);
        (self.stem.len() as f64 * reveal).floor() as usize
    }

    /// Head scale in `(0, 1]`, or `None` while the flower is still a bud.
    pub fn bloom(&self) -> Option<f64> {
        if self.growth > BLOOM_THRESHOLD {
            Some(((self.growth - BLOOM_THRESHOLD) / (1.0 - BLOOM_THRESHOLD)).min(1.0))
        } else {
            None
        }
    }
}

/// A short random base-36 identifier.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
