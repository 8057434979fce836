//! Orchestration entry point.
//!
//! The bootstrap guard loads an [`Orchestrator`] through an [`EngineLoader`]
//! and, once the environment is known to be usable, hands it the console.

mod echo;

pub use echo::EchoOrchestrator;

use async_trait::async_trait;

use crate::startup::LoadError;
use crate::ui::Frontend;

#[async_trait]
pub trait Orchestrator: Send {
    /// Drive the session to completion and return the process exit code.
    async fn run(&mut self, ui: &mut dyn Frontend) -> i32;
}

#[async_trait]
pub trait EngineLoader: Send + Sync {
    async fn load(&self) -> Result<Box<dyn Orchestrator>, LoadError>;
}
