//! Startup bootstrap.
//!
//! Before any interactive work the guard checks that the runtime environment
//! can load the orchestration engine:
//! - the interpreter is queried for its prefixes (contained vs bare)
//! - every package declared in `requirements.txt` must be installed
//!
//! Any failure is fatal: a diagnostic with remediation commands is written in
//! the active output mode and the process exits with code 255.

mod environment;
mod guard;
mod loader;
mod manifest;
mod probe;

pub use environment::Environment;
pub use guard::{BootstrapGuard, BootstrapVerdict};
pub use loader::{LoadError, ManifestLoader};
pub use probe::InterpreterProbe;
