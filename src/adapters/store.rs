//! Configuration storage adapters.
//!
//! Both implement [`ConfigPort`] with one JSON document per actuator id.
//!
//! - [`FileConfigStore`] keeps `<dir>/<id>.json` through `std::fs`.  On the
//!   device `dir` is the SPIFFS VFS mount point, so the same code writes
//!   flash there and a temp directory in host tests.
//! - [`MemoryStore`] keeps raw bytes in a map.  Tests can plant arbitrary
//!   bytes to exercise the corrupted-document path.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{debug, error};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ConfigDocument;

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

pub struct FileConfigStore {
    dir: PathBuf,
}

impl FileConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the document for `id`.
    pub fn path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl ConfigPort for FileConfigStore {
    fn load(&self, id: &str) -> Result<ConfigDocument, ConfigError> {
        let path = self.path(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ConfigError::NotFound),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                return Err(ConfigError::IoError);
            }
        };
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        ConfigDocument::from_slice(&bytes)
    }

    fn save(&self, id: &str, doc: &ConfigDocument) -> Result<(), ConfigError> {
        let path = self.path(id);
        let bytes = doc.to_vec()?;
        fs::write(&path, &bytes).map_err(|e| {
            error!("Failed to write {}: {}", path.display(), e);
            ConfigError::IoError
        })?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    docs: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant raw bytes for `id`, bypassing serialization.
    pub fn insert_raw(&self, id: &str, bytes: &[u8]) {
        self.docs.borrow_mut().insert(id.to_owned(), bytes.to_vec());
    }

    /// Raw bytes currently stored for `id`.
    pub fn raw(&self, id: &str) -> Option<Vec<u8>> {
        self.docs.borrow().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.docs.borrow().contains_key(id)
    }
}

impl ConfigPort for MemoryStore {
    fn load(&self, id: &str) -> Result<ConfigDocument, ConfigError> {
        let docs = self.docs.borrow();
        let bytes = docs.get(id).ok_or(ConfigError::NotFound)?;
        ConfigDocument::from_slice(bytes)
    }

    fn save(&self, id: &str, doc: &ConfigDocument) -> Result<(), ConfigError> {
        let bytes = doc.to_vec()?;
        self.docs.borrow_mut().insert(id.to_owned(), bytes);
        Ok(())
    }
}
