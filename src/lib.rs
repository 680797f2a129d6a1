pub mod addon;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod math;
pub mod mesh;
pub mod placement;
pub mod scene;
pub mod summary;
pub mod traits;

pub use addon::{MeatballAddon, Registry};
pub use config::{ClearPolicy, PlacementConfig};
pub use error::{MeatballError, Result};
pub use generator::{generate, MeatballSpec};
pub use placement::{MeatballInstance, PlacementController};
pub use scene::{InMemoryScene, ObjectHandle, SceneObject};
