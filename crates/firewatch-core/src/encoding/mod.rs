//! Categorical encoder: biome and satellite selections → one-hot indicator columns.
//!
//! Families are resolved once against the model's column list. A selection equal
//! to a family's reference category (the one dropped by drop-first encoding at
//! training time) encodes as all zeros; any other value without a column is an
//! `EncodingMismatch`.

pub mod family;

use serde::{Deserialize, Serialize};

use crate::config::EncodingConfig;
use crate::error::FireResult;

pub use family::{CategoryFamily, Indicators};

/// The discrete choices made in the prediction form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    pub biome: String,
    pub satellite: String,
}

impl CategorySelection {
    pub fn new(biome: impl Into<String>, satellite: impl Into<String>) -> Self {
        Self { biome: biome.into(), satellite: satellite.into() }
    }
}

/// Both encoded families of the trained model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEncoder {
    pub biome: CategoryFamily,
    pub satellite: CategoryFamily,
}

impl CategoryEncoder {
    pub fn resolve(config: &EncodingConfig, columns: &[String]) -> FireResult<Self> {
        Ok(Self {
            biome: CategoryFamily::resolve(&config.biome, columns)?,
            satellite: CategoryFamily::resolve(&config.satellite, columns)?,
        })
    }

    /// Biome indicators followed by satellite indicators.
    pub fn encode_categories(&self, selection: &CategorySelection) -> FireResult<Indicators> {
        let mut out = self.biome.encode(&selection.biome)?;
        out.extend(self.satellite.encode(&selection.satellite)?);
        Ok(out)
    }
}
