//! Description of the host runtime environment.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::probe::{Prefixes, RuntimeProbe};

/// Where the runtime components are expected and which interpreter runs them.
#[derive(Debug, Clone)]
pub struct Environment {
    root: PathBuf,
    interpreter: PathBuf,
    /// `None` when the interpreter could not be queried.
    prefixes: Option<Prefixes>,
}

impl Environment {
    pub fn new(root: PathBuf, interpreter: PathBuf, prefixes: Option<Prefixes>) -> Self {
        Self {
            root,
            interpreter,
            prefixes,
        }
    }

    /// Query the interpreter's prefixes once.
    pub async fn detect(root: PathBuf, interpreter: PathBuf, probe: &dyn RuntimeProbe) -> Self {
        let prefixes = match probe.prefixes().await {
            Ok(prefixes) => {
                debug!(
                    "Interpreter prefix {:?}, base prefix {:?}",
                    prefixes.prefix, prefixes.base_prefix
                );
                Some(prefixes)
            }
            Err(e) => {
                debug!("Could not query interpreter prefixes: {}", e);
                None
            }
        };
        Self::new(root, interpreter, prefixes)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Running inside an isolated environment rather than the system-wide one.
    pub fn is_contained(&self) -> bool {
        self.prefixes.as_ref().is_some_and(Prefixes::is_contained)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("requirements.txt")
    }

    /// Conventional location of the isolated environment.
    pub fn venv_dir(&self) -> PathBuf {
        self.root.join("venv")
    }

    pub fn venv_interpreter(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_dir().join("Scripts").join("python.exe")
        } else {
            self.venv_dir().join("bin").join("python")
        }
    }

    /// Short name of the interpreter, for reporting it as missing.
    pub fn interpreter_name(&self) -> String {
        self.interpreter
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.interpreter.display().to_string())
    }
}
