//! Geometry primitives shared by normalization and dissimilarity functions.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A single hand joint: a 3-D coordinate in the capture space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Joint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn squared_distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        self.squared_distance_to(other).sqrt()
    }

    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.z + offset.z)
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// Axis-aligned bounding cuboid of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    pub min: Joint,
    pub max: Joint,
}

impl Cuboid {
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Joint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut min = *first;
        let mut max = *first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Extent along the x axis. May be zero for degenerate point sets;
    /// callers dividing by an extent must treat zero as an error.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    pub fn center(&self) -> Joint {
        Joint::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

/// Arithmetic mean of a point set. Returns `None` on empty input.
pub fn centroid(points: &[Joint]) -> Option<Joint> {
    if points.is_empty() {
        return None;
    }

    let mut sum = Vector3::zeros();
    for p in points {
        sum += Vector3::new(p.x, p.y, p.z);
    }
    sum /= points.len() as f64;

    Some(Joint::new(sum.x, sum.y, sum.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_distance() {
        let a = Joint::origin();
        let b = Joint::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((a.squared_distance_to(&b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_cuboid_from_points() {
        let points = [
            Joint::new(1.0, -2.0, 0.5),
            Joint::new(-1.0, 3.0, 0.0),
            Joint::new(0.0, 0.0, 2.0),
        ];
        let cuboid = Cuboid::from_points(&points).unwrap();

        assert!((cuboid.width() - 2.0).abs() < 1e-12);
        assert!((cuboid.height() - 5.0).abs() < 1e-12);
        assert!((cuboid.depth() - 2.0).abs() < 1e-12);
        assert!((cuboid.center().y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cuboid_empty() {
        assert!(Cuboid::from_points(&[]).is_none());
    }

    #[test]
    fn test_cuboid_zero_volume() {
        let p = Joint::new(1.0, 1.0, 1.0);
        let cuboid = Cuboid::from_points(&[p, p]).unwrap();
        assert_eq!(cuboid.width(), 0.0);
        assert_eq!(cuboid.height(), 0.0);
    }

    #[test]
    fn test_centroid() {
        let points = [Joint::new(0.0, 0.0, 0.0), Joint::new(2.0, 4.0, 6.0)];
        let c = centroid(&points).unwrap();
        assert!((c.x - 1.0).abs() < 1e-12);
        assert!((c.y - 2.0).abs() < 1e-12);
        assert!((c.z - 3.0).abs() < 1e-12);

        assert!(centroid(&[]).is_none());
    }
}
