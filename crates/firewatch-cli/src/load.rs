//! Load-once collaborators: CSV tables, model file and configuration.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use firewatch_core::config::DashboardConfig;
use firewatch_core::model::LinearRiskModel;
use firewatch_core::records::{fire_counts_from_raw, fire_points_from_raw, FireCount, FirePoint};
use firewatch_core::FireError;

/// Deserialize every row of a headed CSV stream.
pub fn read_csv<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for (i, rec) in rdr.deserialize().enumerate() {
        rows.push(rec.with_context(|| format!("parsing CSV row {}", i + 1))?);
    }
    Ok(rows)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        FireError::DataUnavailable(format!("{}: {e}", path.display())).into()
    })
}

pub fn fire_counts<R: Read>(reader: R) -> Result<Vec<FireCount>> {
    Ok(fire_counts_from_raw(read_csv(reader)?)?)
}

pub fn fire_points<R: Read>(reader: R) -> Result<Vec<FirePoint>> {
    Ok(fire_points_from_raw(read_csv(reader)?)?)
}

pub fn load_fire_counts(path: &Path) -> Result<Vec<FireCount>> {
    let rows = fire_counts(open(path)?).with_context(|| format!("loading {}", path.display()))?;
    log::info!("loaded {} fire count rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn load_fire_points(path: &Path) -> Result<Vec<FirePoint>> {
    let rows = fire_points(open(path)?).with_context(|| format!("loading {}", path.display()))?;
    log::info!("loaded {} fire points from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse a model file; a model without its own column list takes the
/// configured one.
pub fn parse_model(json: &str, config: &DashboardConfig) -> Result<LinearRiskModel> {
    let mut model: LinearRiskModel = serde_json::from_str(json)
        .map_err(|e| FireError::ModelUnavailable(format!("cannot parse model: {e}")))?;
    if model.columns.is_empty() {
        log::debug!("model has no column list, using the configured schema");
        model.columns = config.model_columns.clone();
    }
    model.validate()?;
    Ok(model)
}

pub fn load_model(path: &Path, config: &DashboardConfig) -> Result<LinearRiskModel> {
    let json = fs::read_to_string(path)
        .map_err(|e| FireError::ModelUnavailable(format!("{}: {e}", path.display())))?;
    parse_model(&json, config).with_context(|| format!("loading model {}", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        None => Ok(DashboardConfig::default()),
        Some(p) => {
            let json = fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            Ok(DashboardConfig::from_json_str(&json)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firewatch_core::Biome;

    const COUNTS: &str = "\
ano,mes,bioma,contagem_focos
2023,8,Cerrado,120
2023,9,Mata Atlântica,45
2024,9,Amazônia,900
";

    const POINTS: &str = "\
ano,bioma,latitude,longitude,satelite
2024,Cerrado,-12.5,-47.1,AQUA_M-T
2024,Pantanal,-18.0,-56.9,
";

    #[test]
    fn reads_count_table() {
        let rows = fire_counts(COUNTS.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].biome, Biome::MataAtlantica);
        assert_eq!(rows[2].fire_count, 900);
    }

    #[test]
    fn reads_point_table_with_blank_satellite() {
        let rows = fire_points(POINTS.as_bytes()).unwrap();
        assert_eq!(rows[0].satellite.as_deref(), Some("AQUA_M-T"));
        assert_eq!(rows[1].satellite, None);
    }

    #[test]
    fn header_only_table_is_data_unavailable() {
        let err = fire_counts("ano,mes,bioma,contagem_focos\n".as_bytes()).unwrap_err();
        assert!(matches!(err.downcast_ref::<FireError>(), Some(FireError::DataUnavailable(_))));
    }

    #[test]
    fn unknown_biome_surfaces_as_mismatch() {
        let err = fire_counts("ano,mes,bioma,contagem_focos\n2024,1,Savana,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err.downcast_ref::<FireError>(), Some(FireError::EncodingMismatch { .. })));
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = load_fire_points(Path::new("/nonexistent/dados_para_mapa.csv")).unwrap_err();
        assert!(matches!(err.downcast_ref::<FireError>(), Some(FireError::DataUnavailable(_))));
    }

    #[test]
    fn model_without_columns_uses_config() {
        let cfg = DashboardConfig::default();
        let coefficients = vec![0.0; cfg.model_columns.len()];
        let json = serde_json::json!({ "coefficients": coefficients, "intercept": 0.2 }).to_string();
        let model = parse_model(&json, &cfg).unwrap();
        assert_eq!(model.columns, cfg.model_columns);
    }

    #[test]
    fn model_with_wrong_arity_is_unavailable() {
        let err = parse_model(r#"{ "coefficients": [1.0] }"#, &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<FireError>(), Some(FireError::ModelUnavailable(_))));
    }
}
