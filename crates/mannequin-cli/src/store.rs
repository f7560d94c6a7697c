//! JSON-file avatar store.

use mannequin_spec::{AvatarRecord, AvatarStore, PersistenceResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores one avatar record as a pretty-printed JSON file.
///
/// A missing file means nothing has been saved yet.
#[derive(Debug, Clone)]
pub struct FileAvatarStore {
    path: PathBuf,
}

impl FileAvatarStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AvatarStore for FileAvatarStore {
    fn save(&mut self, record: &AvatarRecord) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        tracing::info!(path = %self.path.display(), "saved avatar record");
        Ok(())
    }

    fn load(&self) -> PersistenceResult<Option<AvatarRecord>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn delete(&mut self) -> PersistenceResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "deleted avatar record");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
