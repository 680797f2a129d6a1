//! Meatball mesh generation: tessellate a sphere, jitter every vertex,
//! then bake the smoothing passes.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MeatballError, Result};
use crate::mesh::{uv_sphere, Displace, Mesh, MeshApply, Subdivide};

// === Constants ===

pub const DEFAULT_SEGMENTS: u32 = 32;
pub const DEFAULT_RINGS: u32 = 32;
pub const DEFAULT_DISTORTION: f32 = 0.1;
pub const DEFAULT_SMOOTHING_ITERATIONS: u32 = 2;

/// Each smoothing pass roughly quadruples the face count
pub const MAX_SMOOTHING_ITERATIONS: u32 = 6;
pub const MAX_SEGMENTS: u32 = 1024;
pub const MAX_RINGS: u32 = 1024;

/// Parameters of a single meatball. Built per request and not mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeatballSpec {
    pub radius: f32,
    pub center: Vec3,
    pub distortion_factor: f32,
    pub smoothing_iterations: u32,
    pub segments: u32,
    pub rings: u32,
}

impl MeatballSpec {
    /// Spec with the stock distortion, smoothing and tessellation
    pub fn new(radius: f32, center: Vec3) -> Self {
        Self {
            radius,
            center,
            distortion_factor: DEFAULT_DISTORTION,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            segments: DEFAULT_SEGMENTS,
            rings: DEFAULT_RINGS,
        }
    }

    pub fn with_distortion(mut self, distortion_factor: f32) -> Self {
        self.distortion_factor = distortion_factor;
        self
    }

    pub fn with_smoothing(mut self, smoothing_iterations: u32) -> Self {
        self.smoothing_iterations = smoothing_iterations;
        self
    }

    pub fn with_resolution(mut self, segments: u32, rings: u32) -> Self {
        self.segments = segments;
        self.rings = rings;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(MeatballError::InvalidSpec(format!(
                "radius must be finite and > 0, got {}",
                self.radius
            )));
        }
        if !self.center.is_finite() {
            return Err(MeatballError::InvalidSpec(format!(
                "center must be finite, got {}",
                self.center
            )));
        }
        if !(self.distortion_factor.is_finite() && self.distortion_factor >= 0.0) {
            return Err(MeatballError::InvalidSpec(format!(
                "distortion factor must be finite and >= 0, got {}",
                self.distortion_factor
            )));
        }
        if self.segments < 3 || self.rings < 2 {
            return Err(MeatballError::InvalidSpec(format!(
                "tessellation needs at least 3 segments and 2 rings, got {}x{}",
                self.segments, self.rings
            )));
        }
        if self.segments > MAX_SEGMENTS || self.rings > MAX_RINGS {
            return Err(MeatballError::InvalidSpec(format!(
                "tessellation is capped at {}x{}, got {}x{}",
                MAX_SEGMENTS, MAX_RINGS, self.segments, self.rings
            )));
        }
        if self.smoothing_iterations > MAX_SMOOTHING_ITERATIONS {
            return Err(MeatballError::InvalidSpec(format!(
                "smoothing is capped at {} passes, got {}",
                MAX_SMOOTHING_ITERATIONS, self.smoothing_iterations
            )));
        }
        Ok(())
    }
}

/// Builds the sphere and applies the random distortion, without smoothing.
///
/// Positions are in object space: the sphere is centered on the origin and
/// `spec.center` is carried by the scene object that owns the mesh.
pub fn distort<R: Rng>(spec: &MeatballSpec, rng: &mut R) -> Result<Mesh> {
    spec.validate()?;
    let mut mesh = uv_sphere(spec.radius, spec.segments, spec.rings);
    mesh.apply(Displace::new(spec.distortion_factor, rng))?;
    Ok(mesh)
}

/// Generates the final meatball mesh: distorted sphere, then
/// `smoothing_iterations` baked subdivision passes.
pub fn generate<R: Rng>(spec: &MeatballSpec, rng: &mut R) -> Result<Mesh> {
    let mut mesh = distort(spec, rng)?;
    mesh.apply(Subdivide {
        iterations: spec.smoothing_iterations,
    })?;
    log::debug!(
        "Generated meatball mesh: radius {:.3}, {} vertices, {} faces",
        spec.radius,
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}
