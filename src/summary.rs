//! JSON snapshot of a scene after a run

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use glam::Vec3;
use serde::Serialize;
use std::path::Path;

use crate::addon::{AddonInfo, ADDON_INFO};
use crate::math::AABB;
use crate::scene::{InMemoryScene, ObjectHandle};

#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    pub handle: ObjectHandle,
    pub name: String,
    pub location: Vec3,
    pub vertices: usize,
    pub faces: usize,
    pub bounds: Option<AABB>,
}

/// Snapshot of a scene after a run, written as JSON
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub addon: &'static AddonInfo,
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub presses: u32,
    pub objects: Vec<ObjectSummary>,
}

impl SceneSummary {
    pub fn capture(scene: &InMemoryScene, seed: u64, presses: u32) -> Self {
        let objects = scene
            .objects()
            .map(|(handle, object)| ObjectSummary {
                handle,
                name: object.name.clone(),
                location: object.location,
                vertices: object.mesh.vertex_count(),
                faces: object.mesh.face_count(),
                bounds: object.bounds(),
            })
            .collect();
        Self {
            addon: &ADDON_INFO,
            generated_at: Utc::now(),
            seed,
            presses,
            objects,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize summary")?;
        std::fs::write(path, json).context(format!("Failed to write summary: {:?}", path))?;
        log::info!("Wrote summary to {:?}", path);
        Ok(())
    }
}
