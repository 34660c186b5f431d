//! Tolerance/consensus computation over a dissimilarity matrix.

use elicit_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::matrix::DissimilarityMatrix;

/// The anchor tolerance is placed just beyond the matrix maximum so that
/// the final curve point always classifies every comparable pair as within
/// tolerance (a guaranteed 100%-consensus entry).
const ANCHOR_FACTOR: f64 = 1.01;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// How to sample the tolerance axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToleranceMode {
    /// One point at the 100%-consensus anchor (1.01 × matrix maximum).
    Default,
    /// `points` samples from zero up to the matrix maximum, plus the
    /// anchor: the resulting curve always has `points + 1` entries.
    /// `points <= 1` degrades to [`ToleranceMode::Default`].
    Sweep { points: usize },
    /// A single caller-supplied tolerance, validated to lie in (0, 1].
    /// Exactly 1.0 maps to the anchor.
    Single { tolerance: f64 },
}

/// One (tolerance, consensus-percentage) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusPoint {
    pub tolerance: f64,
    pub consensus: f64,
}

/// Ordered tolerance/consensus samples over one matrix, non-decreasing in
/// tolerance (and therefore in consensus).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusCurve {
    pub points: Vec<ConsensusPoint>,
}

impl ConsensusCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consensus of the curve point whose tolerance is closest to `t`,
    /// rounded to two decimals. Ties go to the earlier point in ascending
    /// tolerance order.
    pub fn nearest(&self, tolerance: f64) -> Option<f64> {
        let mut best: Option<(f64, f64)> = None;
        for point in &self.points {
            let distance = (tolerance - point.tolerance).abs();
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, point.consensus));
            }
        }
        best.map(|(_, consensus)| round2(consensus))
    }

    /// The last (highest-tolerance, consensus) entry. By construction this
    /// is the 100%-consensus anchor.
    pub fn highest_pair(&self) -> Option<(f64, f64)> {
        self.points.last().map(|p| (p.tolerance, p.consensus))
    }
}

/// Percentage of comparable subject pairs whose dissimilarity is within
/// tolerance `t`. Fails with [`Error::NoComparablePairs`] when the matrix
/// has zero comparable pairs (never a silent division by zero).
pub fn consensus(matrix: &DissimilarityMatrix, t: f64) -> Result<f64> {
    let mut within = 0usize;
    let mut count = 0usize;
    for (_, _, cell) in matrix.upper_triangle() {
        if let Some(value) = cell.value() {
            if value <= t {
                within += 1;
            }
            count += 1;
        }
    }
    if count == 0 {
        return Err(Error::NoComparablePairs);
    }
    Ok(within as f64 / count as f64 * 100.0)
}

/// Build the tolerance/consensus curve for a matrix.
pub fn tolerance_consensus_curve(
    matrix: &DissimilarityMatrix,
    mode: ToleranceMode,
) -> Result<ConsensusCurve> {
    let max = matrix.max_value().ok_or(Error::NoComparablePairs)?;
    let anchor = max * ANCHOR_FACTOR;

    let points = match mode {
        ToleranceMode::Single { tolerance } => {
            if !(tolerance > 0.0 && tolerance <= 1.0) {
                return Err(Error::ToleranceOutOfRange(tolerance));
            }
            let t = if tolerance == 1.0 { anchor } else { tolerance };
            vec![ConsensusPoint {
                tolerance: t,
                consensus: consensus(matrix, t)?,
            }]
        }
        ToleranceMode::Default | ToleranceMode::Sweep { points: 0 | 1 } => {
            vec![ConsensusPoint {
                tolerance: anchor,
                consensus: consensus(matrix, anchor)?,
            }]
        }
        ToleranceMode::Sweep { points: samples } => {
            let step = max / (samples as f64 - 1.0);
            let mut curve = Vec::with_capacity(samples + 1);
            for i in 0..samples {
                let t = step * i as f64;
                curve.push(ConsensusPoint {
                    tolerance: t,
                    consensus: consensus(matrix, t)?,
                });
            }
            curve.push(ConsensusPoint {
                tolerance: anchor,
                consensus: consensus(matrix, anchor)?,
            });
            curve
        }
    };

    Ok(ConsensusCurve { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixCell;

    /// Matrix over 4 subjects with pair values 1, 2, 3, 4, 5, 6.
    fn sample_matrix() -> DissimilarityMatrix {
        let mut matrix = DissimilarityMatrix::new(4);
        let mut value = 0.0;
        for i in 0..4 {
            for j in (i + 1)..4 {
                value += 1.0;
                matrix.set_symmetric(i, j, MatrixCell::Value(value));
            }
        }
        matrix
    }

    #[test]
    fn test_consensus_counts_pairs() {
        let matrix = sample_matrix();
        assert!((consensus(&matrix, 3.0).unwrap() - 50.0).abs() < 1e-9);
        assert!((consensus(&matrix, 6.0).unwrap() - 100.0).abs() < 1e-9);
        assert!((consensus(&matrix, 0.5).unwrap() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_consensus_skips_no_data() {
        let mut matrix = sample_matrix();
        matrix.set_symmetric(0, 1, MatrixCell::NoData); // drops the value 1.0
        assert!((consensus(&matrix, 3.0).unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_consensus_no_pairs_is_error() {
        let mut matrix = DissimilarityMatrix::new(2);
        matrix.set_symmetric(0, 1, MatrixCell::NoData);
        assert!(matches!(
            consensus(&matrix, 1.0),
            Err(Error::NoComparablePairs)
        ));
    }

    #[test]
    fn test_sweep_has_k_plus_one_points() {
        let matrix = sample_matrix();
        for k in [2usize, 5, 10, 50] {
            let curve =
                tolerance_consensus_curve(&matrix, ToleranceMode::Sweep { points: k }).unwrap();
            assert_eq!(curve.len(), k + 1);
            let (_, last) = curve.highest_pair().unwrap();
            assert_eq!(last, 100.0);
        }
    }

    #[test]
    fn test_sweep_monotonic() {
        let matrix = sample_matrix();
        let curve =
            tolerance_consensus_curve(&matrix, ToleranceMode::Sweep { points: 20 }).unwrap();
        for w in curve.points.windows(2) {
            assert!(w[1].tolerance >= w[0].tolerance);
            assert!(w[1].consensus >= w[0].consensus);
        }
    }

    #[test]
    fn test_sweep_degenerate_k() {
        let matrix = sample_matrix();
        for mode in [
            ToleranceMode::Sweep { points: 0 },
            ToleranceMode::Sweep { points: 1 },
            ToleranceMode::Default,
        ] {
            let curve = tolerance_consensus_curve(&matrix, mode).unwrap();
            assert_eq!(curve.len(), 1);
            assert_eq!(curve.points[0].consensus, 100.0);
            assert!((curve.points[0].tolerance - 6.06).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_tolerance_validation() {
        let matrix = sample_matrix();
        for bad in [0.0, -0.5, 1.5] {
            assert!(matches!(
                tolerance_consensus_curve(&matrix, ToleranceMode::Single { tolerance: bad }),
                Err(Error::ToleranceOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_single_tolerance_one_maps_to_anchor() {
        let matrix = sample_matrix();
        let curve =
            tolerance_consensus_curve(&matrix, ToleranceMode::Single { tolerance: 1.0 }).unwrap();
        assert_eq!(curve.len(), 1);
        assert!((curve.points[0].tolerance - 6.06).abs() < 1e-9);
        assert_eq!(curve.points[0].consensus, 100.0);
    }

    #[test]
    fn test_nearest_lookup() {
        let matrix = sample_matrix();
        let curve =
            tolerance_consensus_curve(&matrix, ToleranceMode::Sweep { points: 100 }).unwrap();

        // A rounded tolerance resolves to the same point as the raw value
        // when the curve resolution exceeds two decimals.
        let raw = 2.4391;
        let rounded = round2(raw);
        assert_eq!(curve.nearest(raw), curve.nearest(rounded));
    }

    #[test]
    fn test_nearest_ties_prefer_earlier_point() {
        let curve = ConsensusCurve {
            points: vec![
                ConsensusPoint {
                    tolerance: 1.0,
                    consensus: 25.0,
                },
                ConsensusPoint {
                    tolerance: 3.0,
                    consensus: 75.0,
                },
            ],
        };
        // 2.0 is equidistant from both; the earlier point wins.
        assert_eq!(curve.nearest(2.0).unwrap(), 25.0);
    }
}
