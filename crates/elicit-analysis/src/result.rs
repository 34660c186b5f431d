//! The immutable outcome of one comparison: matrix plus consensus curve.

use elicit_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::consensus::{round2, ConsensusCurve};
use crate::matrix::DissimilarityMatrix;

/// One dissimilarity matrix bundled with its consensus curve for a single
/// (category, hand side) comparison. Never mutated after creation; the
/// orchestrator caches and shares it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub matrix: DissimilarityMatrix,
    pub curve: ConsensusCurve,
}

impl ComparisonResult {
    /// Upper-triangle subject pairs with their dissimilarity rounded to two
    /// decimals. Pairs without comparable data are omitted.
    pub fn pairs(&self) -> Vec<(usize, usize, f64)> {
        self.matrix
            .upper_triangle()
            .filter_map(|(i, j, cell)| cell.value().map(|v| (i, j, round2(v))))
            .collect()
    }

    /// Consensus at the curve point nearest to `tolerance`.
    pub fn consensus_at(&self, tolerance: f64) -> Result<f64> {
        self.curve.nearest(tolerance).ok_or(Error::NoComparablePairs)
    }

    /// The curve's final entry: the tolerance guaranteeing 100% consensus.
    pub fn highest_tolerance_pair(&self) -> Result<(f64, f64)> {
        self.curve.highest_pair().ok_or(Error::NoComparablePairs)
    }
}
