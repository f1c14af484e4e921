use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::app::VersionDocuments;

/// Error writing generated documents.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File name of the test document for a version.
pub fn test_file_name(stem: &str, version: usize) -> String {
    format!("{}_v{}.html", stem, version)
}

/// File name of the answer key for a version.
pub fn key_file_name(stem: &str, version: usize) -> String {
    format!("{}_v{}_key.html", stem, version)
}

/// Writes the test and answer key of every version into `dir`, creating it
/// if needed. Returns the written paths in version order, test first.
pub fn write_versions<P: AsRef<Path>>(
    dir: P,
    stem: &str,
    versions: &[VersionDocuments],
) -> Result<Vec<PathBuf>, WriteError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(versions.len() * 2);
    for version in versions {
        let files = [
            (test_file_name(stem, version.number), &version.test),
            (key_file_name(stem, version.number), &version.answer_key),
        ];
        for (name, contents) in files {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|source| WriteError::Write {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), bytes = contents.len(), "wrote document");
            written.push(path);
        }
    }

    info!(dir = %dir.display(), files = written.len(), "documents written");
    Ok(written)
}
