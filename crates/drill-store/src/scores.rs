use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use drill_core::ScoreTable;

use crate::{StoreError, write_atomic};

/// JSON file holding the score table as a flat `{ "id": score }` object.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the score table. A missing file is a first run and yields an
    /// empty table.
    pub fn load(&self) -> Result<ScoreTable, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No score file found, starting fresh");
                return Ok(ScoreTable::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let table: ScoreTable =
            serde_json::from_str(&contents).map_err(|e| StoreError::json(&self.path, e))?;
        tracing::info!(path = %self.path.display(), entries = table.len(), "Loaded scores");
        Ok(table)
    }

    pub fn save(&self, table: &ScoreTable) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(table).map_err(|e| StoreError::json(&self.path, e))?;
        write_atomic(&self.path, &bytes)?;
        tracing::debug!(path = %self.path.display(), entries = table.len(), "Saved scores");
        Ok(())
    }
}
