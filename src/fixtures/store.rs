use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::env;
use crate::error::QaResult;
use crate::models::PretestIds;

/// On-disk hand-off of the seeded entity chain between runs.
///
/// There is no locking: parallel writers race, last write wins. `nqa seed`
/// exists to run the seed once before any parallel run.
#[derive(Debug, Clone)]
pub struct PretestStore {
    path: PathBuf,
}

impl PretestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PretestStore { path: path.into() }
    }

    /// Store at `PRETEST_IDS_PATH`, or the default test-data location.
    pub fn from_env() -> Self {
        Self::new(env::pretest_ids_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored record, if the file exists and holds all four ids.
    ///
    /// Never fails: an unreadable or incomplete file is the same as no file.
    pub fn read(&self) -> Option<PretestIds> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no pretest record");
                return None;
            }
        };
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "pretest record is not valid JSON");
                return None;
            }
        };
        let ids = PretestIds::from_json(&value);
        if ids.is_none() {
            debug!(path = %self.path.display(), "pretest record is incomplete");
        }
        ids
    }

    /// Overwrite the record, creating parent directories as needed.
    pub fn write(&self, ids: &PretestIds) -> QaResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(ids)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "pretest record written");
        Ok(())
    }

    /// Remove the record. Returns `false` if there was nothing to remove.
    pub fn clear(&self) -> QaResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
