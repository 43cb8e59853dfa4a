//! Map views: year/biome point filtering, side-by-side comparison and marker
//! styling.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::aggregate::BiomeTotal;
use crate::biome::Biome;
use crate::records::FirePoint;
use crate::risk::Rgb;

#[cfg(feature = "threading")]
use rayon::prelude::*;

/// Non-fatal conditions attached to an otherwise valid result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionWarning {
    /// No biome was selected, so nothing can be shown.
    EmptySelection,
}

impl SelectionWarning {
    pub fn message(self) -> &'static str {
        match self {
            SelectionWarning::EmptySelection => "select at least one biome",
        }
    }
}

/// Points of one year restricted to a biome set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSelection<'a> {
    pub year: i32,
    pub points: Vec<&'a FirePoint>,
    pub warning: Option<SelectionWarning>,
}

impl MapSelection<'_> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Keep points with `year` whose biome is in `biomes`.
///
/// An empty biome set is not read as "all biomes": the result is empty and
/// carries `SelectionWarning::EmptySelection`.
pub fn spatial_filter<'a>(points: &'a [FirePoint], year: i32, biomes: &BTreeSet<Biome>) -> MapSelection<'a> {
    if biomes.is_empty() {
        log::warn!("map filter for {year} has no biome selected");
        return MapSelection { year, points: Vec::new(), warning: Some(SelectionWarning::EmptySelection) };
    }

    let keep = |p: &&'a FirePoint| p.year == year && biomes.contains(&p.biome);

    #[cfg(feature = "threading")]
    let selected: Vec<&FirePoint> = points.par_iter().filter(keep).collect();
    #[cfg(not(feature = "threading"))]
    let selected: Vec<&FirePoint> = points.iter().filter(keep).collect();

    MapSelection { year, points: selected, warning: None }
}

/// Two years filtered with the same biome set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearComparison<'a> {
    pub left: MapSelection<'a>,
    pub right: MapSelection<'a>,
}

pub fn compare_years<'a>(
    points: &'a [FirePoint],
    year_a: i32,
    year_b: i32,
    biomes: &BTreeSet<Biome>,
) -> YearComparison<'a> {
    YearComparison {
        left: spatial_filter(points, year_a, biomes),
        right: spatial_filter(points, year_b, biomes),
    }
}

/// Detections per biome in a selection, largest first.
pub fn biome_counts(selection: &MapSelection<'_>) -> Vec<BiomeTotal> {
    let mut counts: BTreeMap<Biome, u64> = BTreeMap::new();
    for p in &selection.points {
        *counts.entry(p.biome).or_default() += 1;
    }
    let mut out: Vec<BiomeTotal> = counts
        .into_iter()
        .map(|(biome, fire_count)| BiomeTotal { biome, fire_count })
        .collect();
    out.sort_by(|a, b| b.fire_count.cmp(&a.fire_count).then(a.biome.cmp(&b.biome)));
    out
}

/// Distinct years in the point table, ascending.
pub fn available_years(points: &[FirePoint]) -> Vec<i32> {
    points.iter().map(|p| p.year).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Distinct biomes in the point table, in name order.
pub fn available_biomes(points: &[FirePoint]) -> Vec<Biome> {
    points.iter().map(|p| p.biome).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Initial slider position: the most recent year.
pub fn default_year(years: &[i32]) -> Option<i32> {
    years.iter().copied().max()
}

/// Initial comparison pair: (second most recent, most recent).
/// With a single year both sides show it.
pub fn default_comparison(years: &[i32]) -> Option<(i32, i32)> {
    let mut desc: Vec<i32> = years.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    desc.reverse();
    match desc.as_slice() {
        [] => None,
        [only] => Some((*only, *only)),
        [latest, previous, ..] => Some((*previous, *latest)),
    }
}

/// One scatter-plot marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub biome: Biome,
    pub color: Rgb,
}

/// Position and biome color for every selected point.
pub fn map_markers(selection: &MapSelection<'_>) -> Vec<MapMarker> {
    selection
        .points
        .iter()
        .map(|p| MapMarker {
            latitude: p.latitude,
            longitude: p.longitude,
            biome: p.biome,
            color: p.biome.color(),
        })
        .collect()
}
