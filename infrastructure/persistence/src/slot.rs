use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use business::domain::errors::StorageError;

/// One durable slot on the local filesystem holding a JSON document.
///
/// Writes go through a sibling temp file and a rename, so a reader never
/// observes a half-written document and the previous content survives a
/// crash mid-write. Loading a never-written slot yields `None`; content
/// that does not parse is reported as `Malformed` and left to the caller's
/// recovery policy.
pub struct JsonSlot {
    path: PathBuf,
}

impl JsonSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(_) => return Err(StorageError::Read),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|_| StorageError::Malformed)
    }

    pub fn save<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|_| StorageError::Write)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|_| StorageError::Write)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|_| StorageError::Write)?;
        fs::rename(&tmp, &self.path).map_err(|_| StorageError::Write)
    }
}
