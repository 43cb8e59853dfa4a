//! Feature vector builder: form inputs → one row in the model's column order.

use serde::{Deserialize, Serialize};

use crate::config::{Bounds, InputBounds};
use crate::encoding::CategorySelection;
use crate::error::{FireError, FireResult};
use crate::features::schema::{
    ModelSchema, DAYS_WITHOUT_RAIN, LATITUDE, LONGITUDE, MONTH, PRECIPITATION,
};

/// Everything the prediction form collects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireInputs {
    pub days_without_rain: u32,
    pub precipitation_mm: f64,
    pub month: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub selection: CategorySelection,
}

impl FireInputs {
    /// Check every continuous input against `bounds`.
    pub fn validate(&self, bounds: &InputBounds) -> FireResult<()> {
        check("days_without_rain", self.days_without_rain as f64, bounds.days_without_rain)?;
        check("precipitation_mm", self.precipitation_mm, bounds.precipitation_mm)?;
        check("month", self.month as f64, bounds.month)?;
        check("latitude", self.latitude, bounds.latitude)?;
        check("longitude", self.longitude, bounds.longitude)?;
        Ok(())
    }
}

fn check(field: &'static str, value: f64, bounds: Bounds) -> FireResult<()> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(FireError::InvalidInput { field, value, min: bounds.min, max: bounds.max })
    }
}

/// A single feature row. `names` and `values` are parallel and follow the schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    /// All-zero row over `schema`.
    pub fn zeros(schema: &ModelSchema) -> Self {
        Self {
            names: schema.columns().to_vec(),
            values: vec![0.0; schema.len()],
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.names.iter().position(|c| c == column).map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }

    fn set(&mut self, column: &str, value: f64) -> FireResult<()> {
        let idx = self
            .names
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| FireError::SchemaMismatch(format!("column {column:?} not in schema")))?;
        self.values[idx] = value;
        Ok(())
    }
}

/// Build the model input row for `inputs`.
///
/// Every column starts at 0; continuous inputs are copied in and the biome
/// and satellite indicators are set by the schema's encoder. A resolved
/// `ModelSchema` is never empty and no column belongs to two feature groups,
/// so indicators cannot overwrite a continuous value.
pub fn build_feature_vector(
    inputs: &FireInputs,
    schema: &ModelSchema,
    bounds: &InputBounds,
) -> FireResult<FeatureRow> {
    inputs.validate(bounds)?;

    let indicators = schema.encoder().encode_categories(&inputs.selection)?;

    let mut row = FeatureRow::zeros(schema);
    row.set(DAYS_WITHOUT_RAIN, inputs.days_without_rain as f64)?;
    row.set(PRECIPITATION, inputs.precipitation_mm)?;
    row.set(MONTH, inputs.month as f64)?;
    row.set(LATITUDE, inputs.latitude)?;
    row.set(LONGITUDE, inputs.longitude)?;
    for (column, v) in indicators.iter() {
        row.set(column, v as f64)?;
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DashboardConfig, EncodingConfig};
    use approx::assert_abs_diff_eq;

    fn schema() -> ModelSchema {
        let cfg = DashboardConfig::default();
        ModelSchema::resolve(cfg.model_columns, &cfg.encoding).unwrap()
    }

    fn inputs(biome: &str, satellite: &str) -> FireInputs {
        FireInputs {
            days_without_rain: 15,
            precipitation_mm: 0.0,
            month: 8,
            latitude: -10.0,
            longitude: -55.0,
            selection: CategorySelection::new(biome, satellite),
        }
    }

    #[test]
    fn cerrado_aqua_mt_scenario() {
        let schema = schema();
        let row = build_feature_vector(&inputs("Cerrado", "AQUA_M-T"), &schema, &InputBounds::default()).unwrap();

        assert_eq!(row.names(), schema.columns());
        assert_eq!(row.get("bioma_Cerrado"), Some(1.0));
        for c in ["bioma_Caatinga", "bioma_Mata Atlântica", "bioma_Pampa", "bioma_Pantanal"] {
            assert_eq!(row.get(c), Some(0.0), "{c}");
        }
        assert_eq!(row.get("satelite_AQUA_M-T"), Some(1.0));
        for c in schema.encoder().satellite.columns().iter().filter(|c| *c != "satelite_AQUA_M-T") {
            assert_eq!(row.get(c), Some(0.0), "{c}");
        }
        assert_abs_diff_eq!(row.get("dias_sem_chuva").unwrap(), 15.0);
        assert_abs_diff_eq!(row.get("precipitacao").unwrap(), 0.0);
        assert_abs_diff_eq!(row.get("mes").unwrap(), 8.0);
        assert_abs_diff_eq!(row.get("latitude").unwrap(), -10.0);
        assert_abs_diff_eq!(row.get("longitude").unwrap(), -55.0);
    }

    #[test]
    fn column_order_matches_schema_for_all_options() {
        let schema = schema();
        let enc = schema.encoder();
        for b in enc.biome.options() {
            for s in enc.satellite.options() {
                let row = build_feature_vector(&inputs(b, s), &schema, &InputBounds::default()).unwrap();
                assert_eq!(row.names(), schema.columns());
                assert_eq!(row.values().len(), schema.len());
                assert_eq!(row.get(DAYS_WITHOUT_RAIN), Some(15.0));
                assert_eq!(row.get(MONTH), Some(8.0));
                assert_eq!(row.get(LATITUDE), Some(-10.0));
                assert_eq!(row.get(LONGITUDE), Some(-55.0));
            }
        }
    }

    #[test]
    fn prefix_shadowing_month_never_reaches_the_builder() {
        let encoding = EncodingConfig {
            biome: crate::config::FamilySpec::new("m", "Amazônia"),
            ..EncodingConfig::default()
        };
        let err = ModelSchema::resolve(DashboardConfig::default().model_columns, &encoding).unwrap_err();
        assert!(matches!(err, FireError::InvalidConfig(_)));
    }

    #[test]
    fn reference_categories_leave_all_indicators_zero() {
        let schema = schema();
        let row = build_feature_vector(&inputs("Amazônia", "AQUA_M"), &schema, &InputBounds::default()).unwrap();
        let indicator_sum: f64 = row.values()[5..].iter().sum();
        assert_abs_diff_eq!(indicator_sum, 0.0);
    }

    #[test]
    fn out_of_bounds_input_is_rejected() {
        let schema = schema();
        let mut bad = inputs("Cerrado", "AQUA_M-T");
        bad.month = 13;
        let err = build_feature_vector(&bad, &schema, &InputBounds::default()).unwrap_err();
        assert!(matches!(err, FireError::InvalidInput { field: "month", .. }));

        let mut bad = inputs("Cerrado", "AQUA_M-T");
        bad.longitude = -20.0;
        assert!(build_feature_vector(&bad, &schema, &InputBounds::default()).is_err());
    }

    #[test]
    fn unknown_biome_is_mismatch() {
        let err = build_feature_vector(&inputs("Tundra", "AQUA_M"), &schema(), &InputBounds::default())
            .unwrap_err();
        assert!(matches!(err, FireError::EncodingMismatch { .. }));
    }

    #[test]
    fn extra_columns_are_zero_filled() {
        let mut cols = DashboardConfig::default().model_columns;
        cols.push("umidade".into());
        let schema = ModelSchema::resolve(cols, &EncodingConfig::default()).unwrap();
        let row = build_feature_vector(&inputs("Pampa", "GOES-16"), &schema, &InputBounds::default()).unwrap();
        assert_eq!(row.get("umidade"), Some(0.0));
        assert_eq!(row.names().last().map(String::as_str), Some("umidade"));
    }
}
