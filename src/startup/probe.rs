//! Runtime probing.
//!
//! The orchestration engine's components live in an interpreter environment.
//! A probe asks that interpreter where it is installed and which declared
//! packages it can load.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

const PREFIXES_SCRIPT: &str = "import sys; print(sys.prefix); print(sys.base_prefix)";

/// Prints the first argument that has no installed distribution.
const FIRST_MISSING_SCRIPT: &str = "\
import sys
from importlib.metadata import distribution, PackageNotFoundError
for name in sys.argv[1:]:
    try:
        distribution(name)
    except PackageNotFoundError:
        print(name)
        break
";

/// Active and base installation prefixes of the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixes {
    pub prefix: PathBuf,
    pub base_prefix: PathBuf,
}

impl Prefixes {
    /// An isolated environment reports a prefix different from its base.
    pub fn is_contained(&self) -> bool {
        self.prefix != self.base_prefix
    }
}

#[async_trait]
pub trait RuntimeProbe: Send + Sync {
    async fn prefixes(&self) -> io::Result<Prefixes>;

    /// First of `names` that cannot be loaded, in manifest order.
    async fn first_missing(&self, names: &[String]) -> io::Result<Option<String>>;
}

/// Probe that runs the interpreter as a subprocess.
pub struct InterpreterProbe {
    interpreter: PathBuf,
}

impl InterpreterProbe {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    async fn run_script(&self, script: &str, args: &[String]) -> io::Result<String> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(script)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::other(format!(
                "{} exited with {}: {}",
                self.interpreter.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl RuntimeProbe for InterpreterProbe {
    async fn prefixes(&self) -> io::Result<Prefixes> {
        let stdout = self.run_script(PREFIXES_SCRIPT, &[]).await?;
        parse_prefixes(&stdout)
            .ok_or_else(|| io::Error::other(format!("Unexpected prefix output: {:?}", stdout)))
    }

    async fn first_missing(&self, names: &[String]) -> io::Result<Option<String>> {
        if names.is_empty() {
            return Ok(None);
        }
        let stdout = self.run_script(FIRST_MISSING_SCRIPT, names).await?;
        let missing = stdout.trim();
        debug!("Probed {} packages, missing: {:?}", names.len(), missing);
        Ok((!missing.is_empty()).then(|| missing.to_string()))
    }
}

fn parse_prefixes(stdout: &str) -> Option<Prefixes> {
    let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());
    let prefix = lines.next()?;
    let base_prefix = lines.next()?;
    Some(Prefixes {
        prefix: PathBuf::from(prefix),
        base_prefix: PathBuf::from(base_prefix),
    })
}
