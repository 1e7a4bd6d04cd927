//! Locate statement exports in a directory.

use glob::{Pattern, glob};
use std::path::{Path, PathBuf};

use crate::error::{IngestError, IngestResult};

/// Return every file in `dir` whose name matches `pattern`, sorted by path.
///
/// Sorting makes the report order independent of the platform's directory
/// listing order. An empty result is reported as [`IngestError::NoInputFiles`].
pub fn discover_statements(dir: &Path, pattern: &str) -> IngestResult<Vec<PathBuf>> {
    // Only the file-name part is a pattern; the directory is taken literally.
    let base = Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&base).join(pattern);

    let mut files = Vec::new();
    for entry in glob(&full.to_string_lossy())? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(IngestError::io(path, std::io::Error::from(e)));
            }
        };
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(IngestError::NoInputFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    files.sort();
    log::info!("found {} statement(s) in {}", files.len(), dir.display());
    Ok(files)
}
