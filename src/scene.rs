//! Scene objects and an in-memory scene graph

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{MeatballError, Result};
use crate::math::AABB;
use crate::mesh::Mesh;
use crate::traits::SceneGraph;

/// Opaque identifier of an object linked into a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub u64);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named mesh placed at a location. The mesh is in object space.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub location: Vec3,
    pub mesh: Mesh,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, location: Vec3, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            location,
            mesh,
        }
    }

    /// World-space bounds of the mesh
    pub fn bounds(&self) -> Option<AABB> {
        self.mesh.bounds().map(|b| b.translate(self.location))
    }
}

/// Scene that keeps its objects in memory, ordered by handle
#[derive(Debug, Default)]
pub struct InMemoryScene {
    objects: BTreeMap<ObjectHandle, SceneObject>,
    next_id: u64,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.objects.iter().map(|(&h, o)| (h, o))
    }
}

impl SceneGraph for InMemoryScene {
    fn link(&mut self, object: SceneObject) -> Result<ObjectHandle> {
        self.next_id += 1;
        let handle = ObjectHandle(self.next_id);
        log::trace!("Linking '{}' as {}", object.name, handle);
        self.objects.insert(handle, object);
        Ok(handle)
    }

    fn remove(&mut self, handle: ObjectHandle) -> Result<SceneObject> {
        self.objects
            .remove(&handle)
            .ok_or(MeatballError::UnknownObject(handle))
    }

    fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    fn handles(&self) -> Vec<ObjectHandle> {
        self.objects.keys().copied().collect()
    }

    fn len(&self) -> usize {
        self.objects.len()
    }

    fn name(&self) -> &str {
        "InMemoryScene"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::uv_sphere;

    #[test]
    fn test_link_assigns_unique_handles() {
        let mut scene = InMemoryScene::new();
        let a = scene.link(SceneObject::new("A", Vec3::ZERO, Mesh::default())).unwrap();
        let b = scene.link(SceneObject::new("B", Vec3::ZERO, Mesh::default())).unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.handles(), vec![a, b]);
    }

    #[test]
    fn test_remove_returns_object() {
        let mut scene = InMemoryScene::new();
        let h = scene.link(SceneObject::new("A", Vec3::X, Mesh::default())).unwrap();
        let removed = scene.remove(h).unwrap();
        assert_eq!(removed.name, "A");
        assert!(scene.is_empty());
        assert!(!scene.contains(h));
    }

    #[test]
    fn test_remove_unknown_fails() {
        let mut scene = InMemoryScene::new();
        let h = scene.link(SceneObject::new("A", Vec3::ZERO, Mesh::default())).unwrap();
        scene.remove(h).unwrap();
        assert!(matches!(scene.remove(h), Err(MeatballError::UnknownObject(x)) if x == h));
    }

    #[test]
    fn test_handles_not_reused() {
        let mut scene = InMemoryScene::new();
        let a = scene.link(SceneObject::new("A", Vec3::ZERO, Mesh::default())).unwrap();
        scene.remove(a).unwrap();
        let b = scene.link(SceneObject::new("B", Vec3::ZERO, Mesh::default())).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_world_bounds() {
        let object = SceneObject::new("S", Vec3::new(3.0, 0.0, 0.0), uv_sphere(1.0, 8, 4));
        let bounds = object.bounds().unwrap();
        assert!((bounds.center() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(ObjectHandle(7).to_string(), "#7");
    }
}
