//! Risk model seam and the prediction pipeline built on it.

use serde::{Deserialize, Serialize};

use crate::config::{EncodingConfig, InputBounds};
use crate::error::{FireError, FireResult};
use crate::features::{build_feature_vector, FeatureRow, FireInputs, ModelSchema};
use crate::risk::{assess_score, RiskAssessment};

/// A trained regression model: a fixed column list and a point prediction.
pub trait RiskModel {
    /// Input columns in training order.
    fn columns(&self) -> &[String];

    /// Predicted risk for a row laid out in `columns()` order.
    fn predict(&self, row: &FeatureRow) -> f64;
}

/// Linear model exported as JSON: `risk = intercept + Σ coefficient·feature`.
///
/// The output is not clamped, so a badly fitted model surfaces as
/// `OutOfRangeScore` downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRiskModel {
    #[serde(default)]
    pub columns: Vec<String>,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearRiskModel {
    pub fn from_json_str(json: &str) -> FireResult<Self> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| FireError::ModelUnavailable(format!("cannot parse model: {e}")))?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> FireResult<()> {
        if self.columns.is_empty() {
            return Err(FireError::ModelUnavailable("model declares no columns".into()));
        }
        if self.columns.len() != self.coefficients.len() {
            return Err(FireError::ModelUnavailable(format!(
                "{} columns but {} coefficients",
                self.columns.len(),
                self.coefficients.len()
            )));
        }
        Ok(())
    }
}

impl RiskModel for LinearRiskModel {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn predict(&self, row: &FeatureRow) -> f64 {
        self.intercept
            + row
                .values()
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>()
    }
}

/// Resolve the schema a model was trained on.
pub fn schema_for(model: &dyn RiskModel, encoding: &EncodingConfig) -> FireResult<ModelSchema> {
    ModelSchema::resolve(model.columns().to_vec(), encoding)
}

/// Build the feature row, run the model and classify the score.
pub fn assess_risk(
    model: &dyn RiskModel,
    schema: &ModelSchema,
    bounds: &InputBounds,
    inputs: &FireInputs,
) -> FireResult<RiskAssessment> {
    if model.columns() != schema.columns() {
        return Err(FireError::SchemaMismatch(
            "model columns differ from the resolved schema".into(),
        ));
    }
    let row = build_feature_vector(inputs, schema, bounds)?;
    let score = model.predict(&row);
    log::debug!("predicted risk {score:.4} for {:?}", inputs.selection);
    assess_score(score)
}
