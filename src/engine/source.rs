//! Garden scripts: a JSON description of a garden for headless rendering.
//!
//! A script says *what gets planted where* and *how long to let it grow*.
//! The engine replays it against a fresh `Garden`.

use serde::{Deserialize, Serialize};

use super::message::Message;

fn default_ticks() -> usize {
    120
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenScript {
    pub width: f64,
    pub height: f64,
    /// Seed for stems, sizes and ids; omitted means a random garden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub plantings: Vec<Planting>,
    /// Assemble the bouquet after planting.
    #[serde(default)]
    pub bouquet: bool,
    /// Animation ticks to run after planting.
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    /// Message to attach when the bouquet is assembled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planting {
    #[serde(deserialize_with = "deserialize_coord_compat")]
    pub x: Coordinate,
    #[serde(deserialize_with = "deserialize_coord_compat")]
    pub y: Coordinate,
    /// Variety name or shape keyword (`"Red Roses"`, `"tulip"`, …).
    pub variety: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coordinate {
    /// Absolute world units.
    Fixed(f64),
    /// Percentage of the viewport extent along this axis.
    Percent(f64),
}

impl Coordinate {
    pub fn evaluate(&self, extent: f64) -> f64 {
        match self {
            Coordinate::Fixed(v) => *v,
            Coordinate::Percent(p) => extent * p / 100.0,
        }
    }
}

/// Serde deserializer that accepts a plain number (`420`), a percentage
/// string (`"35%"`) or a full `Coordinate` object (`{"fixed":420}`).
pub fn deserialize_coord_compat<'de, D>(d: D) -> Result<Coordinate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, MapAccess, Visitor};
    use std::fmt;

    struct CoordVisitor;

    impl<'de> Visitor<'de> for CoordVisitor {
        type Value = Coordinate;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a percentage string or a coordinate object")
        }

        fn visit_u64<E: Error>(self, v: u64) -> Result<Coordinate, E> {
            Ok(Coordinate::Fixed(v as f64))
        }

        fn visit_i64<E: Error>(self, v: i64) -> Result<Coordinate, E> {
            Ok(Coordinate::Fixed(v as f64))
        }

        fn visit_f64<E: Error>(self, v: f64) -> Result<Coordinate, E> {
            Ok(Coordinate::Fixed(v))
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Coordinate, E> {
            let number = v
                .trim()
                .strip_suffix('%')
                .ok_or_else(|| E::custom(format!("expected a percentage like \"50%\", got {v:?}")))?;
            number
                .trim()
                .parse::<f64>()
                .map(Coordinate::Percent)
                .map_err(|e| E::custom(format!("bad percentage {v:?}: {e}")))
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Coordinate, A::Error> {
            Coordinate::deserialize(serde::de::value::MapAccessDeserializer::new(map))
        }
    }

    d.deserialize_any(CoordVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_accept_numbers_percentages_and_objects() {
        let json = r#"{
            "width": 1000, "height": 800,
            "plantings": [
                { "x": 250, "y": "50%", "variety": "rose" },
                { "x": { "percent": 10 }, "y": { "fixed": 12.5 }, "variety": "lily" }
            ]
        }"#;
        let script: GardenScript = serde_json::from_str(json).unwrap();
        assert_eq!(script.ticks, 120);
        assert!(!script.bouquet);
        let a = &script.plantings[0];
        assert_eq!(a.x.evaluate(1000.0), 250.0);
        assert_eq!(a.y.evaluate(800.0), 400.0);
        let b = &script.plantings[1];
        assert_eq!(b.x.evaluate(1000.0), 100.0);
        assert_eq!(b.y.evaluate(800.0), 12.5);
    }

    #[test]
    fn malformed_percentage_is_rejected() {
        let json = r#"{ "width": 10, "height": 10,
            "plantings": [{ "x": "half", "y": 1, "variety": "rose" }] }"#;
        assert!(serde_json::from_str::<GardenScript>(json).is_err());
    }
}
