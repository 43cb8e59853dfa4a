//! Dashboard configuration: category families, input bounds, model schema.
//! Defaults reproduce the deployed model (drop-first one-hot, 17 columns).

use serde::{Deserialize, Serialize};

use crate::error::{FireError, FireResult};

/// Column order the deployed model was trained on.
pub const DEFAULT_MODEL_COLUMNS: &[&str] = &[
    "dias_sem_chuva",
    "precipitacao",
    "mes",
    "latitude",
    "longitude",
    "bioma_Caatinga",
    "bioma_Cerrado",
    "bioma_Mata Atlântica",
    "bioma_Pampa",
    "bioma_Pantanal",
    "satelite_AQUA_M-T",
    "satelite_GOES-16",
    "satelite_NOAA-20",
    "satelite_NPP-375",
    "satelite_NPP-375D",
    "satelite_TERRA_M-M",
    "satelite_TERRA_M-T",
];

/// One one-hot encoded family: column prefix plus the category dropped in training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySpec {
    pub prefix: String,
    pub reference: String,
}

impl FamilySpec {
    pub fn new(prefix: &str, reference: &str) -> Self {
        Self { prefix: prefix.to_owned(), reference: reference.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub biome: FamilySpec,
    pub satellite: FamilySpec,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            biome: FamilySpec::new("bioma_", "Amazônia"),
            satellite: FamilySpec::new("satelite_", "AQUA_M"),
        }
    }
}

/// Closed interval accepted for one continuous input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Accepted ranges for the prediction form inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub days_without_rain: Bounds,
    pub precipitation_mm: Bounds,
    pub month: Bounds,
    pub latitude: Bounds,
    pub longitude: Bounds,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            days_without_rain: Bounds::new(0.0, 100.0),
            precipitation_mm:  Bounds::new(0.0, 200.0),
            month:             Bounds::new(1.0, 12.0),
            latitude:          Bounds::new(-34.0, 5.0),
            longitude:         Bounds::new(-74.0, -34.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub encoding: EncodingConfig,
    pub bounds: InputBounds,
    /// Used when the model file does not carry its own column list.
    pub model_columns: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            encoding: EncodingConfig::default(),
            bounds: InputBounds::default(),
            model_columns: DEFAULT_MODEL_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> FireResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| FireError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> FireResult<()> {
        for (name, spec) in [("biome", &self.encoding.biome), ("satellite", &self.encoding.satellite)] {
            if spec.prefix.is_empty() {
                return Err(FireError::InvalidConfig(format!("{name} prefix is empty")));
            }
            if spec.reference.is_empty() {
                return Err(FireError::InvalidConfig(format!("{name} reference category is empty")));
            }
        }
        let (bp, sp) = (&self.encoding.biome.prefix, &self.encoding.satellite.prefix);
        if bp.starts_with(sp.as_str()) || sp.starts_with(bp.as_str()) {
            return Err(FireError::InvalidConfig(format!(
                "biome prefix {bp:?} and satellite prefix {sp:?} overlap"
            )));
        }

        let b = &self.bounds;
        for (name, bounds) in [
            ("days_without_rain", b.days_without_rain),
            ("precipitation_mm", b.precipitation_mm),
            ("month", b.month),
            ("latitude", b.latitude),
            ("longitude", b.longitude),
        ] {
            if !(bounds.min <= bounds.max) {
                return Err(FireError::InvalidConfig(format!(
                    "{name} bounds [{}, {}] are empty",
                    bounds.min, bounds.max
                )));
            }
        }
        Ok(())
    }
}
