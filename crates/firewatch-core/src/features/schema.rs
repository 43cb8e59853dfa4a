//! Model column schema: the ordered list of feature names a model was trained on.

use crate::config::EncodingConfig;
use crate::encoding::CategoryEncoder;
use crate::error::{FireError, FireResult};

// ── Continuous feature names ─────────────────────────────────────────────────

pub const DAYS_WITHOUT_RAIN: &str = "dias_sem_chuva";
pub const PRECIPITATION: &str = "precipitacao";
pub const MONTH: &str = "mes";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

pub const CONTINUOUS_COLUMNS: [&str; 5] = [DAYS_WITHOUT_RAIN, PRECIPITATION, MONTH, LATITUDE, LONGITUDE];

/// A model's column list together with the category families resolved from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    columns: Vec<String>,
    encoder: CategoryEncoder,
}

impl ModelSchema {
    /// Validate `columns` and resolve both category families against it.
    ///
    /// An empty column list means no usable model is loaded.
    pub fn resolve(columns: Vec<String>, encoding: &EncodingConfig) -> FireResult<Self> {
        if columns.is_empty() {
            return Err(FireError::ModelUnavailable("model column schema is empty".into()));
        }

        for (i, c) in columns.iter().enumerate() {
            if columns[..i].contains(c) {
                return Err(FireError::SchemaMismatch(format!("duplicate column {c:?}")));
            }
        }

        for c in CONTINUOUS_COLUMNS {
            if !columns.iter().any(|col| col == c) {
                return Err(FireError::SchemaMismatch(format!("missing continuous column {c:?}")));
            }
        }

        let encoder = CategoryEncoder::resolve(encoding, &columns)?;

        let mut unclaimed = 0;
        for c in &columns {
            let owners = [
                CONTINUOUS_COLUMNS.contains(&c.as_str()),
                encoder.biome.columns().contains(c),
                encoder.satellite.columns().contains(c),
            ];
            match owners.iter().filter(|&&o| o).count() {
                0 => unclaimed += 1,
                1 => {}
                _ => {
                    return Err(FireError::InvalidConfig(format!(
                        "column {c:?} is claimed by more than one feature group"
                    )))
                }
            }
        }
        if unclaimed > 0 {
            log::warn!("{unclaimed} model columns are neither continuous nor indicator columns; they will be fed 0");
        }

        Ok(Self { columns, encoder })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn encoder(&self) -> &CategoryEncoder {
        &self.encoder
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FamilySpec, DEFAULT_MODEL_COLUMNS};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_schema_resolves() {
        let schema = ModelSchema::resolve(cols(DEFAULT_MODEL_COLUMNS), &EncodingConfig::default()).unwrap();
        assert_eq!(schema.len(), 17);
        assert_eq!(schema.index_of(MONTH), Some(2));
        assert_eq!(schema.index_of("bioma_Cerrado"), Some(6));
        assert_eq!(schema.encoder().biome.columns().len(), 5);
    }

    #[test]
    fn empty_schema_is_model_unavailable() {
        let err = ModelSchema::resolve(Vec::new(), &EncodingConfig::default()).unwrap_err();
        assert!(matches!(err, FireError::ModelUnavailable(_)));
    }

    #[test]
    fn missing_continuous_column_is_rejected() {
        let err = ModelSchema::resolve(
            cols(&["dias_sem_chuva", "precipitacao", "mes", "latitude"]),
            &EncodingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FireError::SchemaMismatch(_)));
    }

    #[test]
    fn family_prefix_matching_continuous_column_is_rejected() {
        let encoding = EncodingConfig {
            biome: FamilySpec::new("m", "Amazônia"),
            ..EncodingConfig::default()
        };
        let err = ModelSchema::resolve(cols(DEFAULT_MODEL_COLUMNS), &encoding).unwrap_err();
        assert!(matches!(err, FireError::InvalidConfig(_)));
    }

    #[test]
    fn overlapping_family_prefixes_are_rejected() {
        let encoding = EncodingConfig {
            biome: FamilySpec::new("l", "Amazônia"),
            satellite: FamilySpec::new("la", "AQUA_M"),
        };
        let err = ModelSchema::resolve(cols(&CONTINUOUS_COLUMNS), &encoding).unwrap_err();
        assert!(matches!(err, FireError::InvalidConfig(_)));
    }

    #[test]
    fn extra_columns_are_tolerated() {
        let mut names = cols(DEFAULT_MODEL_COLUMNS);
        names.push("altitude".into());
        let schema = ModelSchema::resolve(names, &EncodingConfig::default()).unwrap();
        assert_eq!(schema.len(), 18);
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let mut names = cols(DEFAULT_MODEL_COLUMNS);
        names.push("mes".into());
        assert!(matches!(
            ModelSchema::resolve(names, &EncodingConfig::default()),
            Err(FireError::SchemaMismatch(_))
        ));
    }
}
