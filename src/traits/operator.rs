//! Host commands and the context they run in

use rand::RngCore;

use crate::error::Result;
use crate::traits::SceneGraph;

/// Outcome of a successful operator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorStatus {
    Finished,
}

/// What an operator runs against: the scene and the random source
pub struct Context<'a> {
    pub scene: &'a mut dyn SceneGraph,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> Context<'a> {
    pub fn new(scene: &'a mut dyn SceneGraph, rng: &'a mut dyn RngCore) -> Self {
        Self { scene, rng }
    }
}

/// A named command the host can invoke
pub trait Operator: Send {
    /// Unique identifier, e.g. `mesh.generate_random_meatball`
    fn id(&self) -> &str;

    /// Human readable label
    fn label(&self) -> &str;

    fn execute(&mut self, ctx: &mut Context<'_>) -> Result<OperatorStatus>;
}
