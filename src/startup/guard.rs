//! Bootstrap guard.
//!
//! Runs once before the interactive phase. Either yields the loaded engine or
//! a reason the environment is not ready, which is reported in the active
//! output mode and ends the process with [`ENVIRONMENT_NOT_READY_EXIT_CODE`].
//! There is no retry.

use thiserror::Error;
use tracing::{debug, error};

use super::environment::Environment;
use super::loader::LoadError;
use crate::engine::{EngineLoader, Orchestrator};
use crate::output::{Renderer, Sink};

/// Exit code meaning "environment not ready", distinct from engine results.
pub const ENVIRONMENT_NOT_READY_EXIT_CODE: i32 = 255;

#[derive(Debug, Error)]
pub enum EnvironmentNotReady {
    #[error("module `{name}` is missing")]
    MissingDependency { name: String, contained: bool },
    #[error("runtime environment could not be inspected: {0}")]
    Unavailable(String),
}

pub enum BootstrapVerdict {
    Ready(Box<dyn Orchestrator>),
    NotReady(EnvironmentNotReady),
}

pub struct BootstrapGuard<'a> {
    environment: &'a Environment,
    renderer: &'a dyn Renderer,
}

impl<'a> BootstrapGuard<'a> {
    pub fn new(environment: &'a Environment, renderer: &'a dyn Renderer) -> Self {
        Self {
            environment,
            renderer,
        }
    }

    pub async fn check(&self, loader: &dyn EngineLoader) -> BootstrapVerdict {
        debug!("Checking runtime environment in {:?}", self.environment.root());
        match loader.load().await {
            Ok(engine) => {
                debug!("Runtime environment ready");
                BootstrapVerdict::Ready(engine)
            }
            Err(LoadError::MissingDependency { name }) => {
                BootstrapVerdict::NotReady(EnvironmentNotReady::MissingDependency {
                    name,
                    contained: self.environment.is_contained(),
                })
            }
            Err(LoadError::Probe(e)) => {
                BootstrapVerdict::NotReady(EnvironmentNotReady::Unavailable(e.to_string()))
            }
        }
    }

    /// Diagnostic lines; the first one is the summary.
    pub fn diagnostic(&self, reason: &EnvironmentNotReady) -> Vec<String> {
        let env = self.environment;
        let manifest = env.manifest_path();
        match reason {
            EnvironmentNotReady::MissingDependency {
                name,
                contained: false,
            } => vec![
                format!(
                    "Runtime environment for pilot is not set up: module `{}` is missing.",
                    name
                ),
                format!(
                    "Please create a virtual environment: {} -m venv {}",
                    env.interpreter().display(),
                    env.venv_dir().display()
                ),
                format!(
                    "Then install dependencies with: {} -m pip install -r {}",
                    env.venv_interpreter().display(),
                    manifest.display()
                ),
            ],
            EnvironmentNotReady::MissingDependency {
                name,
                contained: true,
            } => vec![
                format!(
                    "Runtime environment for pilot is not completely set up: module `{}` is missing",
                    name
                ),
                format!(
                    "Please run `{} -m pip install -r {}` to finish setup.",
                    env.interpreter().display(),
                    manifest.display()
                ),
            ],
            EnvironmentNotReady::Unavailable(detail) => vec![
                format!(
                    "Runtime environment for pilot could not be inspected: {}",
                    detail
                ),
                format!(
                    "Please check that `{}` runs and try again.",
                    env.interpreter().display()
                ),
            ],
        }
    }

    /// Write the diagnostic and return the exit code to terminate with.
    pub fn report(&self, reason: &EnvironmentNotReady, sink: &mut Sink) -> i32 {
        let emission = self.renderer.diagnostic(&self.diagnostic(reason));
        if let Err(e) = sink.emit(&emission) {
            error!("Failed to write bootstrap diagnostic: {}", e);
        }
        ENVIRONMENT_NOT_READY_EXIT_CODE
    }
}
