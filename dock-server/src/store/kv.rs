//! A small on-disk key-value file.
//!
//! The file is a single JSON object; each top-level key is a named slot.
//! Writes replace the whole file via a temporary file and a rename.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use super::error::StoreError;

/// JSON object file with named slots.
#[derive(Debug, Clone)]
pub struct KvFile {
    path: PathBuf,
}

impl KvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a slot. Returns `None` if the file or the slot does not exist.
    pub fn get<T: DeserializeOwned>(&self, slot: &str) -> Result<Option<T>, StoreError> {
        let Some(mut slots) = self.read_slots()? else {
            return Ok(None);
        };

        let Some(value) = slots.remove(slot) else {
            return Ok(None);
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path: self.path.clone(),
                message: format!("slot {slot:?}: {e}"),
            })
    }

    /// Overwrite a slot with `value`, keeping other slots.
    ///
    /// Creates parent directories if they don't exist. An existing file
    /// that cannot be decoded is replaced.
    pub fn set<T: Serialize>(&self, slot: &str, value: &T) -> Result<(), StoreError> {
        let mut slots = match self.read_slots() {
            Ok(slots) => slots.unwrap_or_default(),
            Err(StoreError::Corrupt { message, .. }) => {
                warn!(path = ?self.path, %message, "replacing unreadable store file");
                Map::new()
            }
            Err(e) => return Err(e),
        };

        slots.insert(slot.to_string(), serde_json::to_value(value)?);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(slots))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;

        Ok(())
    }

    fn read_slots(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                message: "top level is not an object".to_string(),
            }),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
