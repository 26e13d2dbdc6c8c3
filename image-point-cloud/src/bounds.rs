/// Point cloud coordinate bounds and height statistics
use crate::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloudBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl PointCloudBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    /// Bounds of a point slice, `None` when it is empty
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut bounds = Self::new();
        for p in points {
            bounds.update(p.x as f64, p.y as f64, p.z as f64);
        }
        Some(bounds)
    }

    /// Update bounds with a new point
    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn dimensions(&self) -> (f64, f64, f64) {
        (
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }
}

impl Default for PointCloudBounds {
    fn default() -> Self {
        Self::new()
    }
}

/// Height distribution of a point set, reported by the status timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZStatistics {
    pub count: usize,
    pub min_z: f32,
    pub max_z: f32,
    pub mean_z: f32,
}

impl ZStatistics {
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_z, mut max_z) = (first.z, first.z);
        let mut sum = 0.0f64;

        for p in points {
            min_z = min_z.min(p.z);
            max_z = max_z.max(p.z);
            sum += p.z as f64;
        }

        Some(Self {
            count: points.len(),
            min_z,
            max_z,
            mean_z: (sum / points.len() as f64) as f32,
        })
    }
}

impl fmt::Display for ZStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Points: {} | Z range: [{:.3}, {:.3}] | Avg Z: {:.3}",
            self.count, self.min_z, self.max_z, self.mean_z
        )
    }
}
