//! Orchestrator between the ingestion layer and the analysis functions,
//! with a per-category result cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use elicit_core::{AnalysisConfig, Error, GestureCategory, HandSide, Result, Subject};

use crate::aggregate::Aggregation;
use crate::analyzer::{consensus_between_subjects, consensus_within_subject, ComparisonParams};
use crate::consensus::{round2, ToleranceMode};
use crate::dissimilarity::DissimilarityMeasure;
use crate::result::ComparisonResult;

/// One consensus request from a consumer (visualization layer, tooling).
#[derive(Debug, Clone, Copy)]
pub struct ConsensusRequest {
    pub measure: DissimilarityMeasure,
    pub aggregation: Aggregation,
    pub category: GestureCategory,
    pub hand: HandSide,
    /// Single-tolerance query; rounded to two decimals before use.
    pub tolerance: Option<f64>,
    /// Sweep resolution; the resulting curve has one extra anchor point.
    pub sample_points: Option<usize>,
}

type CacheSlot = Arc<Mutex<Option<Arc<ComparisonResult>>>>;

/// Orchestrates comparisons over a dataset and memoizes results.
///
/// Explicitly constructed and owned by the caller (no global singleton).
/// The cache key is the gesture category alone: a later request for the
/// same category with a different measure or aggregation serves the cached
/// result until [`GestureProcessor::reset`] is called. The per-category
/// slot mutex guarantees at most one computation per category even under
/// concurrent first access.
pub struct GestureProcessor {
    config: AnalysisConfig,
    /// Canonical dataset as produced by ingestion; never mutated here.
    subjects: Vec<Subject>,
    /// Working copy used for analysis, so optional preprocessing never
    /// touches the canonical data the visualization layer reads.
    analysis_set: Vec<Subject>,
    cache: Mutex<HashMap<GestureCategory, CacheSlot>>,
}

impl GestureProcessor {
    pub fn new(subjects: Vec<Subject>, config: AnalysisConfig) -> Self {
        let analysis_set = subjects.clone();
        Self {
            config,
            subjects,
            analysis_set,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The canonical dataset (for consumers that render raw recordings).
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Total number of recordings across all subjects and categories.
    pub fn total_gestures(&self) -> usize {
        self.subjects.iter().map(Subject::recording_count).sum()
    }

    /// Optional preprocessing of the analysis working copy: resample each
    /// recording to the configured frame rate, normalize its height, and
    /// translate it to the origin. The canonical dataset is untouched.
    pub fn normalize_for_analysis(&mut self) -> Result<()> {
        let frame_rate = self.config.frame_rate;
        for subject in &mut self.analysis_set {
            for gestures in subject.gestures.values_mut() {
                for gesture in gestures {
                    let samples = (gesture.duration_ms() / 1000.0 * frame_rate as f64) as usize;
                    gesture.resample(samples);
                    gesture.normalize_height()?;
                    gesture.translate_to_origin();
                }
            }
        }
        Ok(())
    }

    /// Consensus between all subjects for the requested category, computed
    /// once and served from the cache thereafter.
    pub fn consensus_between_subjects(
        &self,
        request: &ConsensusRequest,
    ) -> Result<Arc<ComparisonResult>> {
        let mode = match (request.tolerance, request.sample_points) {
            (Some(t), _) => ToleranceMode::Single {
                tolerance: round2(t),
            },
            (None, Some(points)) => ToleranceMode::Sweep { points },
            (None, None) => ToleranceMode::Default,
        };

        self.cached(request.category, || {
            let params = self.params(request, mode);
            let mut results =
                consensus_between_subjects(&self.analysis_set, Some(request.category), &params)?;
            results
                .remove(&(request.category, request.hand))
                .ok_or(Error::NoComparablePairs)
        })
    }

    /// Consensus among one subject's repeated recordings. The subject is
    /// looked up by name, case-insensitively.
    pub fn consensus_within_subject(
        &self,
        subject_name: &str,
        request: &ConsensusRequest,
    ) -> Result<Arc<ComparisonResult>> {
        let needle = subject_name.trim().to_lowercase();
        let subject = self
            .subjects
            .iter()
            .find(|s| s.name.trim().to_lowercase() == needle)
            .ok_or_else(|| Error::UnknownSubject(subject_name.to_string()))?;

        let mode = match request.tolerance {
            Some(t) => ToleranceMode::Single {
                tolerance: round2(t),
            },
            None => ToleranceMode::Sweep {
                points: request
                    .sample_points
                    .unwrap_or(self.config.default_sample_points),
            },
        };

        self.cached(request.category, || {
            let params = self.params(request, mode);
            let mut results =
                consensus_within_subject(subject, Some(request.category), &params)?;
            results
                .remove(&(request.category, request.hand))
                .ok_or(Error::NoComparablePairs)
        })
    }

    /// Drop all cached results; the next request per category recomputes.
    pub fn reset(&self) {
        self.cache.lock().clear();
        tracing::debug!("comparison result cache cleared");
    }

    fn params(&self, request: &ConsensusRequest, mode: ToleranceMode) -> ComparisonParams {
        ComparisonParams {
            measure: request.measure,
            aggregation: request.aggregation,
            hand: request.hand,
            joint_weights: None,
            divisor: self.config.joint_count as f64,
            mode,
        }
    }

    fn cached<F>(&self, category: GestureCategory, compute: F) -> Result<Arc<ComparisonResult>>
    where
        F: FnOnce() -> Result<ComparisonResult>,
    {
        let slot = {
            let mut cache = self.cache.lock();
            cache.entry(category).or_default().clone()
        };

        // Holding the slot lock across the computation means concurrent
        // first requests for one category run the computation exactly once;
        // other categories proceed independently.
        let mut entry = slot.lock();
        if let Some(result) = entry.as_ref() {
            return Ok(Arc::clone(result));
        }

        tracing::info!("computing consensus for {}", category);
        let result = Arc::new(compute()?);
        *entry = Some(Arc::clone(&result));
        Ok(result)
    }
}
