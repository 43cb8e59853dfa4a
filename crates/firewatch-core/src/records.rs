//! Source table rows and their conversion from raw tabular data.
//!
//! Raw rows keep the column names of the published CSV exports (`ano`, `mes`,
//! `bioma`, `contagem_focos`, ...). Conversion validates every row once, so the
//! aggregators downstream work on well-formed, immutable records.

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::error::{FireError, FireResult};

// ── Raw rows ─────────────────────────────────────────────────────────────────

/// Row of the monthly per-biome fire count table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawFireCount {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "bioma")]
    pub biome: String,
    #[serde(rename = "contagem_focos")]
    pub fire_count: u64,
}

/// Row of the point detection table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawFirePoint {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "bioma")]
    pub biome: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "satelite", default)]
    pub satellite: Option<String>,
}

// ── Typed records ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FireCount {
    pub year: i32,
    /// 1–12.
    pub month: u32,
    pub biome: Biome,
    pub fire_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirePoint {
    pub year: i32,
    pub biome: Biome,
    pub latitude: f64,
    pub longitude: f64,
    pub satellite: Option<String>,
}

fn parse_biome(raw: &str, row: usize) -> FireResult<Biome> {
    raw.parse().map_err(|e| {
        log::warn!("row {row}: unmapped biome {raw:?}");
        e
    })
}

impl FireCount {
    pub fn from_raw(raw: RawFireCount, row: usize) -> FireResult<Self> {
        if !(1..=12).contains(&raw.month) {
            return Err(FireError::InvalidRecord { row, reason: format!("month {} outside 1-12", raw.month) });
        }
        Ok(Self {
            year: raw.year,
            month: raw.month,
            biome: parse_biome(&raw.biome, row)?,
            fire_count: raw.fire_count,
        })
    }
}

impl FirePoint {
    pub fn from_raw(raw: RawFirePoint, row: usize) -> FireResult<Self> {
        if !raw.latitude.is_finite() || !raw.longitude.is_finite() {
            return Err(FireError::InvalidRecord { row, reason: "non-finite coordinates".into() });
        }
        Ok(Self {
            year: raw.year,
            biome: parse_biome(&raw.biome, row)?,
            latitude: raw.latitude,
            longitude: raw.longitude,
            satellite: raw.satellite.filter(|s| !s.is_empty()),
        })
    }
}

// ── Table conversion ─────────────────────────────────────────────────────────

/// Convert a full table, failing on the first bad row. An empty table is
/// `DataUnavailable`: nothing downstream can be computed from it.
fn convert_table<R, T>(
    name: &str,
    rows: Vec<R>,
    convert: impl Fn(R, usize) -> FireResult<T>,
) -> FireResult<Vec<T>> {
    if rows.is_empty() {
        return Err(FireError::DataUnavailable(format!("{name} table has no rows")));
    }
    rows.into_iter().enumerate().map(|(i, r)| convert(r, i + 1)).collect()
}

pub fn fire_counts_from_raw(rows: Vec<RawFireCount>) -> FireResult<Vec<FireCount>> {
    convert_table("fire count", rows, FireCount::from_raw)
}

pub fn fire_points_from_raw(rows: Vec<RawFirePoint>) -> FireResult<Vec<FirePoint>> {
    convert_table("fire point", rows, FirePoint::from_raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_count(month: u32, biome: &str) -> RawFireCount {
        RawFireCount { year: 2024, month, biome: biome.into(), fire_count: 10 }
    }

    #[test]
    fn converts_valid_rows() {
        let out = fire_counts_from_raw(vec![raw_count(1, "Cerrado"), raw_count(12, "Mata Atlântica")]).unwrap();
        assert_eq!(out[1].biome, Biome::MataAtlantica);
        assert_eq!(out[1].month, 12);
    }

    #[test]
    fn empty_table_is_unavailable() {
        assert!(matches!(fire_counts_from_raw(Vec::new()), Err(FireError::DataUnavailable(_))));
        assert!(matches!(fire_points_from_raw(Vec::new()), Err(FireError::DataUnavailable(_))));
    }

    #[test]
    fn bad_month_reports_one_based_row() {
        let err = fire_counts_from_raw(vec![raw_count(3, "Pampa"), raw_count(13, "Pampa")]).unwrap_err();
        assert!(matches!(err, FireError::InvalidRecord { row: 2, .. }));
    }

    #[test]
    fn unmapped_biome_is_encoding_mismatch() {
        let raw = RawFirePoint {
            year: 2024,
            biome: "Savana".into(),
            latitude: -10.0,
            longitude: -50.0,
            satellite: None,
        };
        assert!(matches!(
            fire_points_from_raw(vec![raw]),
            Err(FireError::EncodingMismatch { .. })
        ));
    }

    #[test]
    fn raw_rows_deserialize_from_portuguese_columns() {
        let raw: RawFireCount = serde_json::from_str(
            r#"{ "ano": 2020, "mes": 9, "bioma": "Pantanal", "contagem_focos": 1234 }"#,
        )
        .unwrap();
        assert_eq!(raw, RawFireCount { year: 2020, month: 9, biome: "Pantanal".into(), fire_count: 1234 });
    }

    #[test]
    fn blank_satellite_becomes_none() {
        let raw = RawFirePoint {
            year: 2023,
            biome: "Caatinga".into(),
            latitude: -8.0,
            longitude: -40.0,
            satellite: Some(String::new()),
        };
        assert_eq!(FirePoint::from_raw(raw, 1).unwrap().satellite, None);
    }
}
