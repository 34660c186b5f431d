//! Hand poses and recorded gestures, with the preprocessing steps used
//! before analysis (resampling, height normalization, origin translation).

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{centroid, Cuboid, Joint};
use crate::types::{GestureCategory, HandSide};

/// One timestamped snapshot of all hand joints.
///
/// The joint count is fixed across every pose in the system (configured,
/// 21 for the MediaPipe hand model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub joints: Vec<Joint>,
    /// Capture time in milliseconds.
    pub timestamp: f64,
}

impl Pose {
    pub fn new(joints: Vec<Joint>, timestamp: f64) -> Result<Self> {
        if joints.is_empty() {
            return Err(Error::EmptyPose);
        }
        Ok(Self { joints, timestamp })
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn bounding_cuboid(&self) -> Option<Cuboid> {
        Cuboid::from_points(&self.joints)
    }

    pub fn centroid(&self) -> Option<Joint> {
        centroid(&self.joints)
    }
}

/// One full recording of a gesture: a time-ordered pose sequence for one
/// hand, tagged with its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    pub category: GestureCategory,
    pub hand: HandSide,
    pub poses: Vec<Pose>,
}

impl Gesture {
    /// Poses must be ordered by non-decreasing timestamp; the ingestion
    /// layer validates ordering before the core is invoked.
    pub fn new(category: GestureCategory, hand: HandSide, poses: Vec<Pose>) -> Result<Self> {
        if poses.is_empty() {
            return Err(Error::EmptyGesture);
        }
        Ok(Self {
            category,
            hand,
            poses,
        })
    }

    pub fn pose_count(&self) -> usize {
        self.poses.len()
    }

    /// Production time of the recording in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        match (self.poses.first(), self.poses.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0.0,
        }
    }

    pub fn bounding_cuboid(&self) -> Option<Cuboid> {
        Cuboid::from_points(self.poses.iter().flat_map(|p| p.joints.iter()))
    }

    /// Per-joint arithmetic mean pose over the whole recording.
    pub fn centroid_pose(&self) -> Option<Pose> {
        let first = self.poses.first()?;
        let n = self.poses.len() as f64;

        let mut joints = vec![Joint::origin(); first.joint_count()];
        let mut timestamp = 0.0;
        for pose in &self.poses {
            for (acc, j) in joints.iter_mut().zip(&pose.joints) {
                acc.x += j.x;
                acc.y += j.y;
                acc.z += j.z;
            }
            timestamp += pose.timestamp;
        }
        for j in &mut joints {
            j.x /= n;
            j.y /= n;
            j.z /= n;
        }

        Some(Pose {
            joints,
            timestamp: timestamp / n,
        })
    }

    pub fn centroid_point(&self) -> Option<Joint> {
        self.centroid_pose().and_then(|p| p.centroid())
    }

    /// Resamples the recording into `n` poses uniformly spaced in time,
    /// linearly interpolating between captured poses. A no-op for `n < 2`
    /// or a recording whose poses share a single timestamp.
    pub fn resample(&mut self, n: usize) {
        if self.poses.is_empty() || n < 2 {
            return;
        }
        let interval = self.duration_ms() / (n as f64 - 1.0);
        if interval <= 0.0 {
            return;
        }

        let mut set: Vec<Pose> = vec![self.poses[0].clone()];
        for i in 1..self.poses.len() {
            let next = &self.poses[i];
            let mut time_diff = next.timestamp - set[set.len() - 1].timestamp;
            while time_diff >= interval {
                let t = interval / time_diff;
                let prev = &set[set.len() - 1];
                let joints = prev
                    .joints
                    .iter()
                    .zip(&next.joints)
                    .map(|(a, b)| {
                        Joint::new(
                            (1.0 - t) * a.x + t * b.x,
                            (1.0 - t) * a.y + t * b.y,
                            (1.0 - t) * a.z + t * b.z,
                        )
                    })
                    .collect();
                let timestamp = (1.0 - t) * prev.timestamp + t * next.timestamp;
                set.push(Pose { joints, timestamp });
                time_diff -= interval;
            }
        }
        if set.len() == n - 1 {
            set.push(self.poses[self.poses.len() - 1].clone());
        }

        self.poses = set;
    }

    /// Translates the recording so that its centroid becomes the origin.
    pub fn translate_to_origin(&mut self) {
        let Some(c) = self.centroid_point() else {
            return;
        };
        let offset = Vector3::new(-c.x, -c.y, -c.z);
        for pose in &mut self.poses {
            for joint in &mut pose.joints {
                *joint = joint.translated(&offset);
            }
        }
    }

    /// Rescales the recording so the first pose's bounding-cuboid height is
    /// 1.0, using that pose as the reference. Each pose is scaled about its
    /// own cuboid minimum corner.
    pub fn normalize_height(&mut self) -> Result<()> {
        let reference = self
            .poses
            .first()
            .and_then(Pose::bounding_cuboid)
            .ok_or_else(|| Error::DegenerateGeometry("gesture has no poses".to_string()))?;
        let height = reference.height();
        if height == 0.0 {
            return Err(Error::DegenerateGeometry(
                "reference pose has zero height".to_string(),
            ));
        }
        let scale = 1.0 / height;

        for pose in &mut self.poses {
            let Some(cuboid) = pose.bounding_cuboid() else {
                continue;
            };
            for joint in &mut pose.joints {
                joint.x = (joint.x - cuboid.min.x) * scale + cuboid.min.x;
                joint.y = (joint.y - cuboid.min.y) * scale + cuboid.min.y;
                joint.z = (joint.z - cuboid.min.z) * scale + cuboid.min.z;
            }
        }
        Ok(())
    }
}
