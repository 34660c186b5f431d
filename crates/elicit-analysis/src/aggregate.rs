//! Reduction of per-gesture-pair scores to a single subject-pair value.

use elicit_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// How to reduce multiple gesture-pair scores between two subjects (a
/// subject may have several recordings per category) into one scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    Min,
    Max,
    Average,
}

impl Aggregation {
    /// Reduce a non-empty score list. An empty list is an error: a subject
    /// pair with no comparable gesture pairs must be represented by the
    /// matrix's no-data cell instead.
    pub fn apply(&self, values: &[f64]) -> Result<f64> {
        if values.is_empty() {
            return Err(Error::EmptyAggregation);
        }
        Ok(match self {
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Average => values.iter().sum::<f64>() / values.len() as f64,
        })
    }
}
