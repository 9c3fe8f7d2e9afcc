//! Snapshot persistence - JSON blobs for resume-after-quit.

use std::fs;
use std::path::Path;

use blockfall_core::{GameSnapshot, RestoreError};
use thiserror::Error;

use crate::session::Session;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot cannot be restored: {0}")]
    Restore(#[from] RestoreError),
}

pub fn to_json(snapshot: &GameSnapshot) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(json: &str) -> Result<GameSnapshot, PersistError> {
    Ok(serde_json::from_str(json)?)
}

pub fn save_to_path(snapshot: &GameSnapshot, path: impl AsRef<Path>) -> Result<(), PersistError> {
    fs::write(path, to_json(snapshot)?)?;
    Ok(())
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<GameSnapshot, PersistError> {
    let json = fs::read_to_string(path)?;
    from_json(&json)
}

impl Session {
    /// Snapshot the session and write it to `path`
    pub fn save_to_path(&mut self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let snapshot = self.save();
        save_to_path(&snapshot, path)
    }

    /// Load a snapshot from `path` and resume from it
    ///
    /// On any error the session is left as it was, so the caller can fall back to a
    /// fresh game.
    pub fn resume_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let snapshot = load_from_path(path)?;
        self.resume(&snapshot)?;
        Ok(())
    }
}
