use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{GameError, GameResult};
use crate::snapshot::SaveSnapshot;

/// JSON save file at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, snapshot: &SaveSnapshot) -> GameResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.unavailable(source))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json).map_err(|source| self.unavailable(source))?;
        info!(path = %self.path.display(), "game saved");
        Ok(())
    }

    pub fn load(&self) -> GameResult<SaveSnapshot> {
        let text = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                GameError::NoSnapshot {
                    path: self.path.clone(),
                }
            } else {
                self.unavailable(source)
            }
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    fn unavailable(&self, source: io::Error) -> GameError {
        GameError::PersistenceUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}
