//! Symmetric subject-pair dissimilarity matrix and its builder.

use elicit_core::{Error, GestureCategory, HandSide, Result, Subject};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::dissimilarity::DissimilarityMeasure;

/// One matrix cell. `NoData` marks subject pairs where one or both sides
/// have no recording for the requested category and hand, replacing the
/// out-of-band numeric sentinel a plain matrix would need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatrixCell {
    Value(f64),
    NoData,
}

impl MatrixCell {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Symmetric N×N table of aggregated dissimilarities between all subject
/// pairs for one (category, hand side) combination. The diagonal is never
/// set (it stays a neutral zero) and is excluded from consensus counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DissimilarityMatrix {
    cells: Vec<MatrixCell>,
    size: usize,
}

impl DissimilarityMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![MatrixCell::Value(0.0); size * size],
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> MatrixCell {
        self.cells[i * self.size + j]
    }

    pub fn set_symmetric(&mut self, i: usize, j: usize, cell: MatrixCell) {
        self.cells[i * self.size + j] = cell;
        self.cells[j * self.size + i] = cell;
    }

    /// Iterate cells (i, j) with i < j.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, MatrixCell)> + '_ {
        (0..self.size).flat_map(move |i| {
            ((i + 1)..self.size).map(move |j| (i, j, self.get(i, j)))
        })
    }

    /// Largest dissimilarity among comparable pairs, `None` when every pair
    /// is `NoData` (or the matrix has fewer than two subjects).
    pub fn max_value(&self) -> Option<f64> {
        self.upper_triangle()
            .filter_map(|(_, _, cell)| cell.value())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }

    /// Number of comparable (non-`NoData`) pairs.
    pub fn comparable_pairs(&self) -> usize {
        self.upper_triangle()
            .filter(|(_, _, cell)| !cell.is_no_data())
            .count()
    }
}

/// Build the dissimilarity matrix for one gesture category and hand side.
///
/// For every unordered subject pair, every combination of one recording
/// from each side (matching the requested hand) is scored with `measure`,
/// divided by `divisor`, and reduced with `aggregation`. Pairs where either
/// subject has no matching recording become `NoData`.
pub fn build_matrix(
    subjects: &[Subject],
    category: GestureCategory,
    hand: HandSide,
    measure: DissimilarityMeasure,
    joint_weights: Option<&[f64]>,
    divisor: f64,
    aggregation: Aggregation,
) -> Result<DissimilarityMatrix> {
    if divisor == 0.0 {
        return Err(Error::DegenerateGeometry(
            "normalization divisor must be non-zero".to_string(),
        ));
    }

    let mut matrix = DissimilarityMatrix::new(subjects.len());
    for i in 0..subjects.len() {
        let recordings_i = subjects[i].recordings(category, hand);
        for j in (i + 1)..subjects.len() {
            let recordings_j = subjects[j].recordings(category, hand);

            if recordings_i.is_empty() || recordings_j.is_empty() {
                matrix.set_symmetric(i, j, MatrixCell::NoData);
                continue;
            }

            let mut scores = Vec::with_capacity(recordings_i.len() * recordings_j.len());
            for a in &recordings_i {
                for b in &recordings_j {
                    scores.push(measure.evaluate(a, b, joint_weights)? / divisor);
                }
            }
            matrix.set_symmetric(i, j, MatrixCell::Value(aggregation.apply(&scores)?));
        }
    }

    tracing::debug!(
        "built {}x{} dissimilarity matrix for {} ({}), {} comparable pairs",
        matrix.size(),
        matrix.size(),
        category,
        hand,
        matrix.comparable_pairs()
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use elicit_core::{Gesture, Joint, Pose};

    fn gesture(category: GestureCategory, hand: HandSide, offset: f64) -> Gesture {
        let poses = (0..3)
            .map(|i| {
                let joints = (0..4)
                    .map(|k| Joint::new(offset + i as f64, k as f64, 0.0))
                    .collect();
                Pose::new(joints, i as f64 * 40.0).unwrap()
            })
            .collect();
        Gesture::new(category, hand, poses).unwrap()
    }

    fn subject(name: &str, offsets: &[f64]) -> Subject {
        let mut s = Subject::new(name);
        for &offset in offsets {
            s.add_gesture(gesture(GestureCategory::Pan, HandSide::Left, offset));
        }
        s
    }

    #[test]
    fn test_matrix_symmetry() {
        let subjects = vec![
            subject("a", &[0.0]),
            subject("b", &[1.0, 2.0]),
            subject("c", &[3.0]),
        ];
        let matrix = build_matrix(
            &subjects,
            GestureCategory::Pan,
            HandSide::Left,
            DissimilarityMeasure::Dtw,
            None,
            4.0,
            Aggregation::Average,
        )
        .unwrap();

        for i in 0..matrix.size() {
            for j in 0..matrix.size() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn test_missing_subject_yields_no_data() {
        let subjects = vec![
            subject("a", &[0.0]),
            subject("b", &[1.0]),
            subject("c", &[]), // no recordings at all
        ];
        let matrix = build_matrix(
            &subjects,
            GestureCategory::Pan,
            HandSide::Left,
            DissimilarityMeasure::Euclidean,
            None,
            4.0,
            Aggregation::Average,
        )
        .unwrap();

        assert!(matrix.get(0, 2).is_no_data());
        assert!(matrix.get(1, 2).is_no_data());
        assert!(!matrix.get(0, 1).is_no_data());
        assert_eq!(matrix.comparable_pairs(), 1);
    }

    #[test]
    fn test_hand_side_filtering() {
        let mut a = subject("a", &[0.0]);
        a.add_gesture(gesture(GestureCategory::Pan, HandSide::Right, 5.0));

        // b has Pan data, but none of it for the left hand.
        let mut b = Subject::new("b");
        b.add_gesture(gesture(GestureCategory::Pan, HandSide::Right, 1.0));
        b.add_gesture(gesture(GestureCategory::Zoom, HandSide::Left, 0.0));

        let matrix = build_matrix(
            &[a, b],
            GestureCategory::Pan,
            HandSide::Left,
            DissimilarityMeasure::Dtw,
            None,
            4.0,
            Aggregation::Min,
        )
        .unwrap();
        assert!(matrix.get(0, 1).is_no_data());
    }

    #[test]
    fn test_identical_gestures_zero_dissimilarity() {
        let subjects = vec![subject("a", &[0.0]), subject("b", &[0.0])];
        let matrix = build_matrix(
            &subjects,
            GestureCategory::Pan,
            HandSide::Left,
            DissimilarityMeasure::Euclidean,
            None,
            4.0,
            Aggregation::Average,
        )
        .unwrap();
        assert_eq!(matrix.get(0, 1).value().unwrap(), 0.0);
    }

    #[test]
    fn test_aggregation_over_multiple_recordings() {
        let subjects = vec![subject("a", &[0.0, 2.0]), subject("b", &[0.0])];
        let min = build_matrix(
            &subjects,
            GestureCategory::Pan,
            HandSide::Left,
            DissimilarityMeasure::Euclidean,
            None,
            1.0,
            Aggregation::Min,
        )
        .unwrap();
        let max = build_matrix(
            &subjects,
            GestureCategory::Pan,
            HandSide::Left,
            DissimilarityMeasure::Euclidean,
            None,
            1.0,
            Aggregation::Max,
        )
        .unwrap();

        assert_eq!(min.get(0, 1).value().unwrap(), 0.0);
        assert!(max.get(0, 1).value().unwrap() > 0.0);
    }

    #[test]
    fn test_zero_divisor_is_error() {
        let subjects = vec![subject("a", &[0.0]), subject("b", &[1.0])];
        assert!(matches!(
            build_matrix(
                &subjects,
                GestureCategory::Pan,
                HandSide::Left,
                DissimilarityMeasure::Dtw,
                None,
                0.0,
                Aggregation::Average,
            ),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_max_value() {
        let subjects = vec![subject("a", &[0.0]), subject("b", &[3.0])];
        let matrix = build_matrix(
            &subjects,
            GestureCategory::Pan,
            HandSide::Left,
            DissimilarityMeasure::Euclidean,
            None,
            1.0,
            Aggregation::Average,
        )
        .unwrap();
        assert!(matrix.max_value().unwrap() > 0.0);

        let empty = DissimilarityMatrix::new(1);
        assert!(empty.max_value().is_none());
    }
}
