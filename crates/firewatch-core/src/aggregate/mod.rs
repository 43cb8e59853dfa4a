//! Temporal and spatial aggregation over the source tables.
//!
//! Every function here is pure: it reads borrowed records and returns a freshly
//! computed summary. Nothing is cached between calls.

pub mod spatial;
pub mod trends;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::biome::Biome;
use crate::error::FireError;

pub use spatial::{
    available_biomes, available_years, biome_counts, compare_years, default_comparison, default_year,
    map_markers, spatial_filter, MapMarker, MapSelection, SelectionWarning, YearComparison,
};
pub use trends::{biome_totals, monthly_intensity, seasonal_pattern, yearly_totals};

/// Biome restriction for the trend views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiomeFilter {
    #[default]
    All,
    Only(Biome),
}

impl BiomeFilter {
    pub fn matches(self, biome: Biome) -> bool {
        match self {
            BiomeFilter::All => true,
            BiomeFilter::Only(b) => b == biome,
        }
    }
}

impl fmt::Display for BiomeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiomeFilter::All => f.write_str("Todos"),
            BiomeFilter::Only(b) => b.fmt(f),
        }
    }
}

impl FromStr for BiomeFilter {
    type Err = FireError;

    /// `Todos` or `all` selects every biome; anything else must name one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("todos") || s.eq_ignore_ascii_case("all") {
            Ok(BiomeFilter::All)
        } else {
            s.parse().map(BiomeFilter::Only)
        }
    }
}

// ── Summary rows ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub fire_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BiomeTotal {
    pub biome: Biome,
    pub fire_count: u64,
}

/// One heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCell {
    pub year: i32,
    pub month: u32,
    pub fire_count: u64,
}

/// One point of a per-biome annual cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonalPoint {
    pub biome: Biome,
    pub month: u32,
    pub fire_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_all_aliases() {
        assert_eq!("Todos".parse::<BiomeFilter>().unwrap(), BiomeFilter::All);
        assert_eq!("all".parse::<BiomeFilter>().unwrap(), BiomeFilter::All);
        assert_eq!(
            "Cerrado".parse::<BiomeFilter>().unwrap(),
            BiomeFilter::Only(Biome::Cerrado)
        );
        assert!("Savana".parse::<BiomeFilter>().is_err());
    }

    #[test]
    fn filter_matches() {
        assert!(BiomeFilter::All.matches(Biome::Pampa));
        assert!(BiomeFilter::Only(Biome::Pampa).matches(Biome::Pampa));
        assert!(!BiomeFilter::Only(Biome::Pampa).matches(Biome::Pantanal));
        assert_eq!(BiomeFilter::All.to_string(), "Todos");
    }
}
