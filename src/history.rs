use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::HistoryState;
use crate::utils::error::AppError;

/// Whole-file JSON persistence for the tracked price universe.
///
/// Saves write a sibling temp file and rename it into place, so a crash
/// mid-save never corrupts the previous snapshot. A single run at a time is
/// assumed; overlapping runs degrade to last-writer-wins, never to a torn
/// file.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HistoryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the last snapshot. A missing state file is a first run, not an
    /// error; an unreadable or malformed one is fatal.
    pub fn load(&self) -> Result<HistoryState, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no prior state, starting with empty history");
            return Ok(HistoryState::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, state: &HistoryState) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let raw = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), products = state.len(), "saved history");
        Ok(())
    }
}
