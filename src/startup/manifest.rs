//! Dependency manifest (`requirements.txt`) reading.

use std::io;
use std::path::Path;

/// Characters that end a requirement's name: version specifiers, extras,
/// environment markers, direct references and whitespace.
const NAME_TERMINATORS: &[char] = &['<', '>', '=', '!', '~', '[', ';', '@', ' ', '\t'];

/// Declared package names, in file order. A missing manifest declares nothing.
pub async fn read_manifest(path: &Path) -> io::Result<Vec<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(parse_requirements(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

pub fn parse_requirements(content: &str) -> Vec<String> {
    content.lines().filter_map(requirement_name).collect()
}

fn requirement_name(line: &str) -> Option<String> {
    let line = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let line = line.trim();
    // Blank lines and pip options (`-r other.txt`, `--index-url ...`).
    if line.is_empty() || line.starts_with('-') {
        return None;
    }
    let name = line.split(NAME_TERMINATORS).next()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}
