//! Brazilian biomes and their map palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FireError;
use crate::risk::Rgb;

/// One of Brazil's six major biomes.
///
/// Ordering follows the alphabetical order of the Portuguese names, which is
/// the order the trained schema and the dashboard option lists use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Biome {
    Amazonia,
    Caatinga,
    Cerrado,
    MataAtlantica,
    Pampa,
    Pantanal,
}

impl Biome {
    pub const ALL: [Biome; 6] = [
        Biome::Amazonia,
        Biome::Caatinga,
        Biome::Cerrado,
        Biome::MataAtlantica,
        Biome::Pampa,
        Biome::Pantanal,
    ];

    /// Order of the map legend.
    pub const PALETTE_ORDER: [Biome; 6] = [
        Biome::Amazonia,
        Biome::Cerrado,
        Biome::MataAtlantica,
        Biome::Caatinga,
        Biome::Pantanal,
        Biome::Pampa,
    ];

    /// Name as it appears in the source tables and in model column names.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Amazonia      => "Amazônia",
            Biome::Caatinga      => "Caatinga",
            Biome::Cerrado       => "Cerrado",
            Biome::MataAtlantica => "Mata Atlântica",
            Biome::Pampa         => "Pampa",
            Biome::Pantanal      => "Pantanal",
        }
    }

    /// Fill color for map markers and legends.
    pub fn color(self) -> Rgb {
        match self {
            Biome::Amazonia      => Rgb::new(34, 139, 34),
            Biome::Cerrado       => Rgb::new(255, 165, 0),
            Biome::MataAtlantica => Rgb::new(0, 100, 0),
            Biome::Caatinga      => Rgb::new(218, 165, 32),
            Biome::Pantanal      => Rgb::new(0, 191, 255),
            Biome::Pampa         => Rgb::new(189, 183, 107),
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = FireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Biome::ALL
            .into_iter()
            .find(|b| b.name() == trimmed)
            .ok_or_else(|| FireError::EncodingMismatch {
                family: "bioma".into(),
                value: trimmed.to_owned(),
            })
    }
}

impl Serialize for Biome {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Biome {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Legend entry pairing a biome with its hex color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub biome: Biome,
    pub hex: String,
}

/// Legend for the biomes actually present in a dataset, in palette order.
pub fn legend(present: &[Biome]) -> Vec<LegendEntry> {
    Biome::PALETTE_ORDER
        .into_iter()
        .filter(|b| present.contains(b))
        .map(|biome| LegendEntry { biome, hex: biome.color().hex() })
        .collect()
}
