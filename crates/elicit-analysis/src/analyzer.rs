//! Cross-subject and intra-subject consensus analysis.

use std::collections::{BTreeMap, BTreeSet};

use elicit_core::{GestureCategory, HandSide, Result, Subject};

use crate::aggregate::Aggregation;
use crate::consensus::{tolerance_consensus_curve, ToleranceMode};
use crate::dissimilarity::DissimilarityMeasure;
use crate::matrix::build_matrix;
use crate::result::ComparisonResult;

/// Everything a comparison needs besides the dataset and category.
#[derive(Debug, Clone)]
pub struct ComparisonParams {
    pub measure: DissimilarityMeasure,
    pub aggregation: Aggregation,
    pub hand: HandSide,
    /// Per-joint weights; `None` means all ones.
    pub joint_weights: Option<Vec<f64>>,
    /// Post-hoc divisor applied to every raw score (typically the joint
    /// count, keeping the measures scale-convention agnostic).
    pub divisor: f64,
    pub mode: ToleranceMode,
}

/// Compare subjects pairwise for one category, or for every category
/// present in the dataset when `category` is `None`. One result per
/// (category, hand side) key.
pub fn consensus_between_subjects(
    subjects: &[Subject],
    category: Option<GestureCategory>,
    params: &ComparisonParams,
) -> Result<BTreeMap<(GestureCategory, HandSide), ComparisonResult>> {
    let categories: Vec<GestureCategory> = match category {
        Some(c) => vec![c],
        None => subjects
            .iter()
            .flat_map(|s| s.categories())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    let mut results = BTreeMap::new();
    for c in categories {
        tracing::debug!(
            "comparing {} subjects for {} ({:?}, {:?})",
            subjects.len(),
            c,
            params.measure,
            params.aggregation
        );
        let matrix = build_matrix(
            subjects,
            c,
            params.hand,
            params.measure,
            params.joint_weights.as_deref(),
            params.divisor,
            params.aggregation,
        )?;
        let curve = tolerance_consensus_curve(&matrix, params.mode)?;
        results.insert((c, params.hand), ComparisonResult { matrix, curve });
    }
    Ok(results)
}

/// Consensus among one subject's repeated performances: each recording
/// becomes a pseudo-subject with exactly one gesture, then the
/// cross-subject algorithm runs unchanged.
pub fn consensus_within_subject(
    subject: &Subject,
    category: Option<GestureCategory>,
    params: &ComparisonParams,
) -> Result<BTreeMap<(GestureCategory, HandSide), ComparisonResult>> {
    let mut counter = 0usize;
    let mut pseudo_subjects = Vec::with_capacity(subject.recording_count());
    for c in subject.categories() {
        for gesture in subject.gestures_in(c).unwrap_or_default() {
            let mut pseudo = Subject::new(format!("{}_{}", subject.name, counter));
            pseudo.add_gesture(gesture.clone());
            pseudo_subjects.push(pseudo);
            counter += 1;
        }
    }

    consensus_between_subjects(&pseudo_subjects, category, params)
}
