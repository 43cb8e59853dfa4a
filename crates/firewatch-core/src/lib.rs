//! Wildfire risk inference and fire-occurrence aggregation for the Brazilian
//! fire dashboard.
//!
//! Two independent pipelines share the loaded tables and model:
//!   - risk: `encoding` → `features` → `model` → `risk`
//!   - trends and maps: `records` → `aggregate`
//!
//! Nothing here performs I/O. Callers load the tables and model once and pass
//! them in by reference.

pub mod aggregate;
pub mod biome;
pub mod config;
pub mod encoding;
pub mod error;
pub mod features;
pub mod model;
pub mod records;
pub mod risk;

pub use biome::Biome;
pub use config::DashboardConfig;
pub use error::{FireError, FireResult};
pub use risk::{classify_risk, RiskAssessment, RiskTier, Rgb};
