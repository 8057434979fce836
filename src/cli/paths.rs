use anyhow::{Context, Result};
use std::path::PathBuf;

#[cfg(windows)]
pub const DEFAULT_INTERPRETER: &str = "python";
#[cfg(not(windows))]
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Directory containing the running executable.
pub fn executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(|p| p.to_path_buf())
}

/// Resolve the install root.
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = root {
        path.canonicalize()
            .with_context(|| format!("Failed to canonicalize provided root: {}", path.display()))
    } else {
        match executable_dir() {
            Some(dir) => Ok(dir),
            None => std::env::current_dir().context("Failed to get current directory"),
        }
    }
}
