//! Feature vector assembly for the risk model.
//!
//! `schema` owns the trained column order; `vector` fills one row of it from
//! the prediction form.

pub mod schema;
pub mod vector;

pub use schema::{ModelSchema, CONTINUOUS_COLUMNS};
pub use vector::{build_feature_vector, FeatureRow, FireInputs};
