//! Error taxonomy shared by every stage of the pipeline.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FireError {
    /// A source table is missing or has no rows.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// The model is missing or exposes an empty column schema.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// A category value has no indicator column and is not the reference category.
    #[error("encoding mismatch: {family} value {value:?} is not part of the trained schema")]
    EncodingMismatch { family: String, value: String },

    /// The model returned a score outside [0, 1].
    #[error("risk score {0} is outside [0, 1]")]
    OutOfRangeScore(f64),

    #[error("input {field} = {value} is outside [{min}, {max}]")]
    InvalidInput {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type FireResult<T> = Result<T, FireError>;
