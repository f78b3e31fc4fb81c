//! Flower varieties.
//!
//! The variety table is fixed at startup. Flowers borrow a `&'static Palette`
//! so every instance of a variety shares the same colours.

use serde::{Deserialize, Serialize};

use crate::types::Rgb;

/// Which head-drawing routine a variety uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rose,
    Tulip,
    Daisy,
    Lily,
    Sunflower,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rose => "rose",
            ShapeKind::Tulip => "tulip",
            ShapeKind::Daisy => "daisy",
            ShapeKind::Lily => "lily",
            ShapeKind::Sunflower => "sunflower",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub shape: ShapeKind,
    pub petals: [Rgb; 4],
    pub stem: Rgb,
    pub center: Rgb,
}

/// Varieties packed into the tight inner ellipse of the bouquet.
pub const CORE_VARIETIES: [&str; 2] = ["Red Roses", "Blue Tulips"];

pub static PALETTES: [Palette; 5] = [
    Palette {
        name: "Red Roses",
        shape: ShapeKind::Rose,
        petals: [
            Rgb::hex(0xff4d6d),
            Rgb::hex(0xc9184a),
            Rgb::hex(0xa4133c),
            Rgb::hex(0xff758f),
        ],
        stem: Rgb::hex(0x1b4332),
        center: Rgb::hex(0x590d22),
    },
    Palette {
        name: "Blue Tulips",
        shape: ShapeKind::Tulip,
        petals: [
            Rgb::hex(0x48cae4),
            Rgb::hex(0x0096c7),
            Rgb::hex(0x023e8a),
            Rgb::hex(0x90e0ef),
        ],
        stem: Rgb::hex(0x2d6a4f),
        center: Rgb::hex(0xcaf0f8),
    },
    Palette {
        name: "Pink Daisies",
        shape: ShapeKind::Daisy,
        petals: [
            Rgb::hex(0xffc2d1),
            Rgb::hex(0xffb3c1),
            Rgb::hex(0xff8fab),
            Rgb::hex(0xfb6f92),
        ],
        stem: Rgb::hex(0x40916c),
        center: Rgb::hex(0xffea00),
    },
    Palette {
        name: "White Lilies",
        shape: ShapeKind::Lily,
        petals: [
            Rgb::hex(0xffffff),
            Rgb::hex(0xf8f9fa),
            Rgb::hex(0xe9ecef),
            Rgb::hex(0xdee2e6),
        ],
        stem: Rgb::hex(0x52b788),
        center: Rgb::hex(0xfb8500),
    },
    Palette {
        name: "Sunflowers",
        shape: ShapeKind::Sunflower,
        petals: [
            Rgb::hex(0xffb703),
            Rgb::hex(0xfb8500),
            Rgb::hex(0xff9f1c),
            Rgb::hex(0xffbf69),
        ],
        stem: Rgb::hex(0x2d6a4f),
        center: Rgb::hex(0x3c0919),
    },
];

impl Palette {
    /// Core varieties are identified by name, not by a stored flag.
    pub fn is_core(&self) -> bool {
        CORE_VARIETIES.contains(&self.name)
    }
}

/// Index of the variety whose display name or shape keyword matches `key`,
/// ignoring case.
pub fn position(key: &str) -> Option<usize> {
    let key = key.trim();
    PALETTES
        .iter()
        .position(|p| p.name.eq_ignore_ascii_case(key) || p.shape.as_str().eq_ignore_ascii_case(key))
}

pub fn find(key: &str) -> Option<&'static Palette> {
    position(key).map(|i| &PALETTES[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_two_core_varieties() {
        let core: Vec<_> = PALETTES.iter().filter(|p| p.is_core()).map(|p| p.name).collect();
        assert_eq!(core, vec!["Red Roses", "Blue Tulips"]);
    }

    #[test]
    fn every_shape_is_used_once() {
        let mut shapes: Vec<_> = PALETTES.iter().map(|p| p.shape.as_str()).collect();
        shapes.sort();
        shapes.dedup();
        assert_eq!(shapes.len(), PALETTES.len());
    }

    #[test]
    fn find_by_name_or_shape() {
        assert_eq!(find("sunflower").map(|p| p.name), Some("Sunflowers"));
        assert_eq!(find("pink daisies").map(|p| p.shape), Some(ShapeKind::Daisy));
        assert!(find("orchid").is_none());
    }
}
