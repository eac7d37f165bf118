//! Filesystem source loader.
//!
//! # Responsibility
//! - Read Markdown files from one directory into in-memory `Source` values.
//!
//! # Invariants
//! - Only regular `*.md` files directly inside the directory are read.
//! - Sources are returned sorted by file name so ingestion order is stable.
//! - Core parsing never depends on this module.

use crate::model::source::Source;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const MARKDOWN_EXTENSION: &str = "md";

/// I/O failure while reading sources, tagged with the offending path.
#[derive(Debug)]
pub struct SourceError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to read `{}`: {}", self.path.display(), self.source)
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Reads every `*.md` file in `dir` (non-recursive) as a `Source`.
///
/// # Errors
/// - Returns `SourceError` when the directory or a file cannot be read.
/// - A non-UTF-8 file surfaces as an `InvalidData` I/O error.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<Source>, SourceError> {
    let dir = dir.as_ref();
    let with_path = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| SourceError { path, source }
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(with_path(dir))? {
        let entry = entry.map_err(with_path(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(with_path(&path))?;
        if file_type.is_file() && has_markdown_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path).map_err(with_path(&path))?;
        sources.push(Source::new(path.display().to_string(), text));
    }

    info!(
        "event=sources_loaded module=loader status=ok count={}",
        sources.len()
    );
    Ok(sources)
}

fn has_markdown_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::has_markdown_extension;
    use std::path::Path;

    #[test]
    fn markdown_extension_is_case_insensitive() {
        assert!(has_markdown_extension(Path::new("post.md")));
        assert!(has_markdown_extension(Path::new("POST.MD")));
        assert!(!has_markdown_extension(Path::new("post.markdown.txt")));
        assert!(!has_markdown_extension(Path::new("README")));
    }
}
