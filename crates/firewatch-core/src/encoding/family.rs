//! A single one-hot encoded category family (biome or satellite).

use serde::Serialize;

use crate::config::FamilySpec;
use crate::error::{FireError, FireResult};

/// Indicator columns for one or more families, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Indicators {
    entries: Vec<(String, u8)>,
}

impl Indicators {
    pub fn get(&self, column: &str) -> Option<u8> {
        self.entries.iter().find(|(c, _)| c == column).map(|&(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of columns set to 1.
    pub fn hot_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| *v == 1).count()
    }

    pub fn extend(&mut self, other: Indicators) {
        self.entries.extend(other.entries);
    }
}

/// A category family resolved against a model schema.
///
/// `columns` keeps the indicator columns in schema order; `members` is the
/// sorted option list including the reference category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFamily {
    prefix: String,
    reference: String,
    columns: Vec<String>,
    members: Vec<String>,
}

impl CategoryFamily {
    /// Collect the family's indicator columns from `schema` and re-add the
    /// reference category dropped during training.
    pub fn resolve(spec: &FamilySpec, schema: &[String]) -> FireResult<Self> {
        let columns: Vec<String> = schema
            .iter()
            .filter(|c| c.starts_with(&spec.prefix))
            .cloned()
            .collect();

        let mut members: Vec<String> = columns
            .iter()
            .map(|c| c[spec.prefix.len()..].to_owned())
            .collect();

        if members.contains(&spec.reference) {
            return Err(FireError::InvalidConfig(format!(
                "reference category {:?} has its own column {}{}",
                spec.reference, spec.prefix, spec.reference
            )));
        }
        members.push(spec.reference.clone());
        members.sort();

        log::debug!(
            "resolved family {} with {} indicator columns (reference {:?})",
            spec.prefix,
            columns.len(),
            spec.reference
        );

        Ok(Self {
            prefix: spec.prefix.clone(),
            reference: spec.reference.clone(),
            columns,
            members,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Sorted selectable values, reference included.
    pub fn options(&self) -> &[String] {
        &self.members
    }

    /// Family name used in error messages: the prefix without its separator.
    fn family_name(&self) -> &str {
        self.prefix.trim_end_matches('_')
    }

    /// One-hot encode `value`. The reference category encodes as all zeros.
    pub fn encode(&self, value: &str) -> FireResult<Indicators> {
        let is_reference = value == self.reference;
        let target = format!("{}{}", self.prefix, value);

        if !is_reference && !self.columns.contains(&target) {
            return Err(FireError::EncodingMismatch {
                family: self.family_name().to_owned(),
                value: value.to_owned(),
            });
        }

        let entries = self
            .columns
            .iter()
            .map(|c| (c.clone(), u8::from(!is_reference && *c == target)))
            .collect();
        Ok(Indicators { entries })
    }
}
