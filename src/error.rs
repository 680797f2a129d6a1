//! Error type shared by generation, placement and registration

use thiserror::Error;

use crate::scene::ObjectHandle;

pub type Result<T> = std::result::Result<T, MeatballError>;

/// Errors raised while generating, placing or registering meatballs
#[derive(Debug, Error)]
pub enum MeatballError {
    #[error("invalid meatball spec: {0}")]
    InvalidSpec(String),

    #[error("geometry error: {0}")]
    Geometry(String),

    /// Some tracked objects could not be removed; they remain tracked
    #[error("failed to remove {} tracked object(s): {source}", .failed.len())]
    Removal {
        failed: Vec<ObjectHandle>,
        #[source]
        source: Box<MeatballError>,
    },

    #[error("no valid placement found after {attempts} attempts")]
    NoValidPlacement { attempts: u32 },

    #[error("object {0} is not in the scene")]
    UnknownObject(ObjectHandle),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("unknown panel '{0}'")]
    UnknownPanel(String),

    #[error("panel '{panel}' has no button at index {index}")]
    UnknownButton { panel: String, index: usize },

    #[error("'{0}' is already registered")]
    DuplicateRegistration(String),

    #[error("'{0}' is not registered")]
    NotRegistered(String),
}
