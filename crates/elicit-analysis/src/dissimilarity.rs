//! Dissimilarity measures between two gesture recordings.
//!
//! Each measure takes two gestures of the same hand side and an optional
//! per-joint weight vector (defaults to all ones) and returns a single
//! non-negative scalar. Normalization by a scale divisor is applied by the
//! caller (the matrix builder), never inside the measure itself.

use elicit_core::{Error, Gesture, Pose, Result};
use serde::{Deserialize, Serialize};

/// Closed set of available dissimilarity measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DissimilarityMeasure {
    Euclidean,
    Dtw,
    NormalizedDtw,
    ModifiedHausdorff,
}

impl DissimilarityMeasure {
    /// Evaluate this measure on a gesture pair. Strategy dispatch is an
    /// explicit parameter everywhere; there is no shared mutable function
    /// slot, so concurrent callers with different measures cannot interfere.
    pub fn evaluate(
        &self,
        a: &Gesture,
        b: &Gesture,
        joint_weights: Option<&[f64]>,
    ) -> Result<f64> {
        match self {
            Self::Euclidean => euclidean(a, b, joint_weights),
            Self::Dtw => dtw(a, b, joint_weights),
            Self::NormalizedDtw => normalized_dtw(a, b, joint_weights),
            Self::ModifiedHausdorff => modified_hausdorff(a, b, joint_weights),
        }
    }
}

/// An all-ones weight vector of length `n`.
pub fn unit_weights(n: usize) -> Vec<f64> {
    vec![1.0; n]
}

/// Weighted distance between two poses: the sum over joints of the weighted
/// per-joint Euclidean distance. The shared primitive of every measure.
pub fn pose_distance(a: &Pose, b: &Pose, joint_weights: &[f64]) -> Result<f64> {
    if a.joint_count() != b.joint_count() {
        return Err(Error::JointCountMismatch {
            expected: a.joint_count(),
            actual: b.joint_count(),
        });
    }
    if joint_weights.len() != a.joint_count() {
        return Err(Error::JointCountMismatch {
            expected: a.joint_count(),
            actual: joint_weights.len(),
        });
    }

    let mut d = 0.0;
    for ((ja, jb), w) in a.joints.iter().zip(&b.joints).zip(joint_weights) {
        d += w * ja.distance_to(jb);
    }
    Ok(d)
}

fn resolve_weights<'a>(
    joint_weights: Option<&'a [f64]>,
    joint_count: usize,
    storage: &'a mut Vec<f64>,
) -> &'a [f64] {
    match joint_weights {
        Some(w) => w,
        None => {
            *storage = unit_weights(joint_count);
            storage
        }
    }
}

/// Euclidean gesture distance: the sum of pose distances over corresponding
/// pose pairs. Requires equal pose counts; zero if either gesture is empty.
pub fn euclidean(a: &Gesture, b: &Gesture, joint_weights: Option<&[f64]>) -> Result<f64> {
    let n = a.pose_count();
    let m = b.pose_count();
    if n == 0 || m == 0 {
        return Ok(0.0);
    }
    if n != m {
        return Err(Error::PoseCountMismatch { left: n, right: m });
    }

    let mut storage = Vec::new();
    let weights = resolve_weights(joint_weights, a.poses[0].joint_count(), &mut storage);

    let mut d = 0.0;
    for (pa, pb) in a.poses.iter().zip(&b.poses) {
        d += pose_distance(pa, pb, weights)?;
    }
    Ok(d)
}

/// Dynamic time warping distance with pose distance as the local cost.
/// Zero if either sequence is empty (no alignment cost is defined).
pub fn dtw(a: &Gesture, b: &Gesture, joint_weights: Option<&[f64]>) -> Result<f64> {
    let n = a.pose_count();
    let m = b.pose_count();
    if n == 0 || m == 0 {
        return Ok(0.0);
    }

    let mut storage = Vec::new();
    let weights = resolve_weights(joint_weights, a.poses[0].joint_count(), &mut storage);

    let mut cost = vec![vec![0.0_f64; m]; n];

    cost[0][0] = pose_distance(&a.poses[0], &b.poses[0], weights)?;
    for j in 1..m {
        cost[0][j] = cost[0][j - 1] + pose_distance(&a.poses[0], &b.poses[j], weights)?;
    }
    for i in 1..n {
        cost[i][0] = cost[i - 1][0] + pose_distance(&a.poses[i], &b.poses[0], weights)?;
    }

    for i in 1..n {
        for j in 1..m {
            let min = cost[i - 1][j - 1].min(cost[i - 1][j]).min(cost[i][j - 1]);
            cost[i][j] = min + pose_distance(&a.poses[i], &b.poses[j], weights)?;
        }
    }
    Ok(cost[n - 1][m - 1])
}

/// DTW normalized by warping-path length.
///
/// Tracks the path length of the chosen predecessor per cell. On exact cost
/// ties the diagonal predecessor wins, then the vertical, then the
/// horizontal; this ordering decides which path length is attributed and is
/// kept stable for reproducible results.
pub fn normalized_dtw(a: &Gesture, b: &Gesture, joint_weights: Option<&[f64]>) -> Result<f64> {
    let n = a.pose_count();
    let m = b.pose_count();
    if n == 0 || m == 0 {
        return Ok(0.0);
    }

    let mut storage = Vec::new();
    let weights = resolve_weights(joint_weights, a.poses[0].joint_count(), &mut storage);

    let mut cost = vec![vec![0.0_f64; m]; n];
    let mut length = vec![vec![0_u32; m]; n];

    cost[0][0] = pose_distance(&a.poses[0], &b.poses[0], weights)?;
    length[0][0] = 1;
    for j in 1..m {
        cost[0][j] = cost[0][j - 1] + pose_distance(&a.poses[0], &b.poses[j], weights)?;
        length[0][j] = length[0][j - 1] + 1;
    }
    for i in 1..n {
        cost[i][0] = cost[i - 1][0] + pose_distance(&a.poses[i], &b.poses[0], weights)?;
        length[i][0] = length[i - 1][0] + 1;
    }

    for i in 1..n {
        for j in 1..m {
            let mut min = cost[i - 1][j - 1];
            let mut len = length[i - 1][j - 1];

            if cost[i - 1][j] < min {
                min = cost[i - 1][j];
                len = length[i - 1][j];
            }
            if cost[i][j - 1] < min {
                min = cost[i][j - 1];
                len = length[i][j - 1];
            }

            cost[i][j] = min + pose_distance(&a.poses[i], &b.poses[j], weights)?;
            length[i][j] = len + 1;
        }
    }
    Ok(cost[n - 1][m - 1] / f64::from(length[n - 1][m - 1]))
}

/// Modified Hausdorff distance: the max of the two directed average
/// nearest-neighbour pose distances. Zero if either sequence is empty.
pub fn modified_hausdorff(
    a: &Gesture,
    b: &Gesture,
    joint_weights: Option<&[f64]>,
) -> Result<f64> {
    let forward = directed_hausdorff(a, b, joint_weights)?;
    let backward = directed_hausdorff(b, a, joint_weights)?;
    Ok(forward.max(backward))
}

fn directed_hausdorff(a: &Gesture, b: &Gesture, joint_weights: Option<&[f64]>) -> Result<f64> {
    let n = a.pose_count();
    let m = b.pose_count();
    if n == 0 || m == 0 {
        return Ok(0.0);
    }

    let mut storage = Vec::new();
    let weights = resolve_weights(joint_weights, a.poses[0].joint_count(), &mut storage);

    let mut avg = 0.0;
    for pa in &a.poses {
        let mut min = f64::MAX;
        for pb in &b.poses {
            min = min.min(pose_distance(pa, pb, weights)?);
        }
        avg += min;
    }
    Ok(avg / n as f64)
}
