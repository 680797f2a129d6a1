//! Scene boundary: how placement adds and removes objects

use crate::error::Result;
use crate::scene::{ObjectHandle, SceneObject};

/// Object graph of the host scene: the only way the generator touches it
pub trait SceneGraph {
    /// Link a new object into the scene and return its handle
    fn link(&mut self, object: SceneObject) -> Result<ObjectHandle>;

    /// Unlink and delete an object, returning what was stored
    fn remove(&mut self, handle: ObjectHandle) -> Result<SceneObject>;

    fn get(&self, handle: ObjectHandle) -> Option<&SceneObject>;

    /// Handles of every object currently in the scene
    fn handles(&self) -> Vec<ObjectHandle>;

    fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    fn len(&self) -> usize {
        self.handles().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get scene name for debugging
    fn name(&self) -> &str {
        "Scene"
    }
}
