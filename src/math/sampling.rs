//! Uniform sampling helpers over closed real intervals

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interval `[-half_width, half_width]`
    pub const fn symmetric(half_width: f32) -> Self {
        Self::new(-half_width, half_width)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Draw one value uniformly from the interval
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.min == self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    /// Draw a vector with every component independently from the interval
    pub fn sample_vec3<R: Rng>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(self.sample(rng), self.sample(rng), self.sample(rng))
    }
}
