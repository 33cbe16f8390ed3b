//! File-backed storage for Syllable Drill: the score table and the catalog.

pub mod catalog;
pub mod scores;

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;

pub use catalog::load_catalog;
pub use scores::ScoreStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Replace `path` with `bytes` through a temporary file in the same
/// directory, so readers never observe a partially written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| StoreError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| StoreError::io(path, e))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        writer
            .write_all(bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| StoreError::io(path, e))?;
    }

    temp_file
        .persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}
