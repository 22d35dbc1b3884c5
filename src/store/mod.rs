//! On-disk persistence for the scrum list.
//!
//! The whole list is stored as one JSON document and rewritten in full
//! on every save; there is no partial update. A missing file simply
//! loads as an empty list so first runs need no setup.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::global;
use crate::scrum::DailyScrum;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to determine data directory")]
    DataDirUnavailable,
    #[error("failed to read scrums from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode scrum data: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode scrum data: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to save scrums to {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads and saves the scrum list as a JSON document.
pub struct ScrumStore {
    path: PathBuf,
}

impl ScrumStore {
    /// Store at the platform data directory (`scrums.json`).
    pub fn open_default() -> Result<Self, StoreError> {
        let path = global::scrums_file().map_err(|_| StoreError::DataDirUnavailable)?;
        Ok(Self::at(path))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<DailyScrum>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No scrum data at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let scrums: Vec<DailyScrum> =
            serde_json::from_str(&content).map_err(StoreError::Decode)?;
        debug!("Loaded {} scrum(s) from {:?}", scrums.len(), self.path);
        Ok(scrums)
    }

    pub fn save(&self, scrums: &[DailyScrum]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Save {
                path: self.path.clone(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(scrums).map_err(StoreError::Encode)?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::Save {
            path: self.path.clone(),
            source: e,
        })?;

        info!("Saved {} scrum(s) to {:?}", scrums.len(), self.path);
        Ok(())
    }
}
