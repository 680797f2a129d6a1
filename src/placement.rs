//! Placement controller: replaces the previous meatball with a new one at a
//! rejection-sampled, non-colliding location.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ClearPolicy, PlacementConfig};
use crate::error::{MeatballError, Result};
use crate::generator::{generate, MeatballSpec};
use crate::mesh::Mesh;
use crate::scene::{ObjectHandle, SceneObject};
use crate::traits::SceneGraph;

/// A generated meatball that is live in the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeatballInstance {
    pub handle: ObjectHandle,
    pub center: Vec3,
    pub radius: f32,
}

/// True when `candidate` is closer to some instance than that instance's
/// radius plus `clearance`. The candidate's own radius is not part of the
/// threshold.
pub fn collides(candidate: Vec3, instances: &[MeatballInstance], clearance: f32) -> bool {
    instances
        .iter()
        .any(|m| m.center.distance(candidate) < m.radius + clearance)
}

/// Owns the list of meatballs it has generated and keeps it in step with
/// the scene.
#[derive(Debug, Default)]
pub struct PlacementController {
    config: PlacementConfig,
    instances: Vec<MeatballInstance>,
}

impl PlacementController {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            instances: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Meatballs currently tracked as live
    pub fn instances(&self) -> &[MeatballInstance] {
        &self.instances
    }

    /// Removes every tracked meatball from the scene.
    ///
    /// An object already missing from the scene is dropped from the list.
    /// Any other removal failure leaves that instance tracked and is
    /// reported after the remaining instances have been attempted.
    pub fn clear<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) -> Result<usize> {
        let mut removed = 0;
        let mut first_error = None;
        let mut retained = Vec::new();

        for instance in self.instances.drain(..) {
            match scene.remove(instance.handle) {
                Ok(_) => removed += 1,
                Err(MeatballError::UnknownObject(handle)) => {
                    log::warn!("Meatball {} was already gone from the scene", handle);
                }
                Err(err) => {
                    log::warn!("Failed to remove meatball {}: {}", instance.handle, err);
                    first_error.get_or_insert(err);
                    retained.push(instance);
                }
            }
        }
        self.instances = retained;

        match first_error {
            None => Ok(removed),
            Some(source) => Err(MeatballError::Removal {
                failed: self.instances.iter().map(|m| m.handle).collect(),
                source: Box::new(source),
            }),
        }
    }

    /// Draws centers until one is clear of every instance in `blocking`.
    ///
    /// Returns the accepted center and how many samples it took.
    pub fn sample_center<R: Rng>(
        &self,
        rng: &mut R,
        blocking: &[MeatballInstance],
    ) -> Result<(Vec3, u32)> {
        self.config.check()?;
        for attempt in 1..=self.config.max_attempts {
            let candidate = self.config.position.sample_vec3(rng);
            if !collides(candidate, blocking, self.config.clearance) {
                return Ok((candidate, attempt));
            }
            log::debug!("Rejected candidate {} (attempt {})", candidate, attempt);
        }
        Err(MeatballError::NoValidPlacement {
            attempts: self.config.max_attempts,
        })
    }

    fn spec(&self, radius: f32, center: Vec3) -> MeatballSpec {
        MeatballSpec::new(radius, center)
            .with_distortion(self.config.distortion_factor)
            .with_smoothing(self.config.smoothing_iterations)
            .with_resolution(self.config.segments, self.config.rings)
    }

    /// Replaces the previous meatball(s) with a freshly generated one.
    ///
    /// With [`ClearPolicy::ClearFirst`] old meatballs are removed before
    /// sampling, so nothing can block the new center. With
    /// [`ClearPolicy::DeferredClear`] the new center must clear the old
    /// meatballs, which are removed only once the new mesh has been built.
    ///
    /// A config that fails [`PlacementConfig::check`] is rejected before
    /// the scene is touched.
    pub fn trigger<S: SceneGraph + ?Sized, R: Rng>(
        &mut self,
        scene: &mut S,
        rng: &mut R,
    ) -> Result<MeatballInstance> {
        self.config.check()?;
        if self.config.policy == ClearPolicy::ClearFirst {
            self.clear(scene)?;
        }

        let radius = self.config.radius.sample(rng);
        let (center, attempts) = self.sample_center(rng, &self.instances)?;
        let mesh = generate(&self.spec(radius, center), rng)?;

        if self.config.policy == ClearPolicy::DeferredClear {
            self.clear(scene)?;
        }

        let instance = self.link(scene, center, radius, mesh)?;
        log::info!(
            "Generated meatball {} at ({:.2}, {:.2}, {:.2}), radius {:.2}, {} placement attempt(s)",
            instance.handle,
            center.x,
            center.y,
            center.z,
            radius,
            attempts
        );
        Ok(instance)
    }

    fn link<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        center: Vec3,
        radius: f32,
        mesh: Mesh,
    ) -> Result<MeatballInstance> {
        let object = SceneObject::new(self.config.object_name.clone(), center, mesh);
        let handle = scene.link(object)?;
        let instance = MeatballInstance {
            handle,
            center,
            radius,
        };
        self.instances.push(instance);
        Ok(instance)
    }
}
