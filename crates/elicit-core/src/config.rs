//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Static configuration for an analysis session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of hand joints per pose. Constant across all gestures and
    /// hand sides; also used as the score normalization divisor.
    pub joint_count: usize,

    /// Frame rate used when resampling gestures for analysis.
    pub frame_rate: u32,

    /// Sample-point count for tolerance sweeps when the caller does not
    /// request a specific resolution.
    pub default_sample_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            joint_count: 21,
            frame_rate: 25,
            default_sample_points: 50,
        }
    }
}
