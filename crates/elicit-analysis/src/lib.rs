//! # Elicit-Analysis
//!
//! Gesture dissimilarity and consensus analysis for elicitation studies.
//!
//! Given recorded multi-joint hand gestures from multiple subjects, this
//! crate scores pairwise gesture dissimilarity (Euclidean, DTW, normalized
//! DTW, Modified Hausdorff), aggregates the scores into a symmetric
//! subject-pair matrix per gesture category, and derives a tolerance/
//! consensus curve: the fraction of subject pairs that agree within a
//! given dissimilarity threshold.
//!
//! The [`processor::GestureProcessor`] is the entry point for consumers;
//! the lower-level building blocks are usable on their own.

pub mod aggregate;
pub mod analyzer;
pub mod consensus;
pub mod dissimilarity;
pub mod matrix;
pub mod processor;
pub mod result;

pub use aggregate::Aggregation;
pub use analyzer::{consensus_between_subjects, consensus_within_subject, ComparisonParams};
pub use consensus::{consensus, tolerance_consensus_curve, ConsensusCurve, ConsensusPoint, ToleranceMode};
pub use dissimilarity::{
    dtw, euclidean, modified_hausdorff, normalized_dtw, pose_distance, unit_weights,
    DissimilarityMeasure,
};
pub use matrix::{build_matrix, DissimilarityMatrix, MatrixCell};
pub use processor::{ConsensusRequest, GestureProcessor};
pub use result::ComparisonResult;

pub use elicit_core::{Error, Result};
