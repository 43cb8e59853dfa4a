//! Historical trend tables: yearly totals, biome ranking, monthly heatmap and
//! per-biome seasonal cycle.

use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::{BiomeFilter, BiomeTotal, MonthCell, SeasonalPoint, YearTotal};
use crate::biome::Biome;
use crate::records::FireCount;

/// Records with a calendar month. Others are logged and left out of every view
/// so the tables stay consistent with each other.
fn counted(records: &[FireCount]) -> impl Iterator<Item = &FireCount> {
    records.iter().filter(|r| {
        let ok = (1..=12).contains(&r.month);
        if !ok {
            log::warn!("skipping record with month {} in {}", r.month, r.year);
        }
        ok
    })
}

fn filtered(records: &[FireCount], filter: BiomeFilter) -> impl Iterator<Item = &FireCount> {
    counted(records).filter(move |r| filter.matches(r.biome))
}

/// Total fire count per year, year ascending.
pub fn yearly_totals(records: &[FireCount], filter: BiomeFilter) -> Vec<YearTotal> {
    let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
    for r in filtered(records, filter) {
        *by_year.entry(r.year).or_default() += r.fire_count;
    }
    by_year
        .into_iter()
        .map(|(year, fire_count)| YearTotal { year, fire_count })
        .collect()
}

/// Total fire count per biome over the whole table, largest first.
/// Ties keep biome order.
pub fn biome_totals(records: &[FireCount]) -> Vec<BiomeTotal> {
    let mut by_biome: BTreeMap<Biome, u64> = BTreeMap::new();
    for r in counted(records) {
        *by_biome.entry(r.biome).or_default() += r.fire_count;
    }
    let mut out: Vec<BiomeTotal> = by_biome
        .into_iter()
        .map(|(biome, fire_count)| BiomeTotal { biome, fire_count })
        .collect();
    out.sort_by(|a, b| b.fire_count.cmp(&a.fire_count).then(a.biome.cmp(&b.biome)));
    out
}

/// Dense year × month grid of fire counts.
///
/// Years are those present after filtering; every year gets all 12 months,
/// zero where the table has no record. Ordered by (year, month).
pub fn monthly_intensity(records: &[FireCount], filter: BiomeFilter) -> Vec<MonthCell> {
    let mut years: BTreeSet<i32> = BTreeSet::new();
    let mut sums: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for r in filtered(records, filter) {
        years.insert(r.year);
        *sums.entry((r.year, r.month)).or_default() += r.fire_count;
    }

    years
        .into_iter()
        .flat_map(|year| (1..=12).map(move |month| (year, month)))
        .map(|(year, month)| MonthCell {
            year,
            month,
            fire_count: sums.get(&(year, month)).copied().unwrap_or(0),
        })
        .collect()
}

/// Fire count per (biome, month), ordered by biome then month.
///
/// The biome dimension is kept even when the filter selects a single biome.
pub fn seasonal_pattern(records: &[FireCount], filter: BiomeFilter) -> Vec<SeasonalPoint> {
    let mut sums: BTreeMap<(Biome, u32), u64> = BTreeMap::new();
    for r in filtered(records, filter) {
        *sums.entry((r.biome, r.month)).or_default() += r.fire_count;
    }
    sums.into_iter()
        .map(|((biome, month), fire_count)| SeasonalPoint { biome, month, fire_count })
        .collect()
}
