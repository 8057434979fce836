use std::io;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::environment::Environment;
use super::manifest::read_manifest;
use super::probe::RuntimeProbe;
use crate::engine::{EngineLoader, Orchestrator};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("module `{name}` is missing")]
    MissingDependency { name: String },
    #[error("failed to inspect runtime environment: {0}")]
    Probe(#[from] io::Error),
}

/// Loads the engine once every package in the environment's manifest is
/// installed.
pub struct ManifestLoader<'a, P, F> {
    environment: &'a Environment,
    probe: P,
    engine: F,
}

impl<'a, P, F> ManifestLoader<'a, P, F>
where
    P: RuntimeProbe,
    F: Fn() -> Box<dyn Orchestrator>,
{
    pub fn new(environment: &'a Environment, probe: P, engine: F) -> Self {
        Self {
            environment,
            probe,
            engine,
        }
    }
}

#[async_trait]
impl<P, F> EngineLoader for ManifestLoader<'_, P, F>
where
    P: RuntimeProbe,
    F: Fn() -> Box<dyn Orchestrator> + Send + Sync,
{
    async fn load(&self) -> Result<Box<dyn Orchestrator>, LoadError> {
        let manifest = self.environment.manifest_path();
        let names = read_manifest(&manifest).await?;
        debug!("{} packages declared in {:?}", names.len(), manifest);

        match self.probe.first_missing(&names).await {
            Ok(None) => Ok((self.engine)()),
            Ok(Some(name)) => Err(LoadError::MissingDependency { name }),
            // The interpreter itself is the missing component.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LoadError::MissingDependency {
                name: self.environment.interpreter_name(),
            }),
            Err(e) => Err(LoadError::Probe(e)),
        }
    }
}
