// aidla_cart/src/store/storage.rs

//! The raw persisted cart entry and its owners.
//!
//! The cart is a client cache keyed by [`CART_STORAGE_KEY`]; nothing outside
//! this module touches the underlying file or buffer directly. The backend
//! stays authoritative for real stock and pricing, so every failure here is
//! recoverable: a bad read is an empty cart, a bad write is best-effort.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StorageError;

/// Version-tagged key of the persisted cart entry. Bump the suffix when the
/// serialized line-item shape changes incompatibly.
pub const CART_STORAGE_KEY: &str = "aidla_cart_v1";

/// Owner of the serialized cart payload.
///
/// Implementations are synchronous: payloads are a few hundred bytes and the
/// store persists on every mutation from non-async call sites.
pub trait CartStorage: Send + Sync {
  /// Returns the raw payload, or `None` when no cart has been persisted yet.
  fn read(&self) -> Result<Option<String>, StorageError>;

  fn write(&self, payload: &str) -> Result<(), StorageError>;

  /// Removes the persisted entry. Absent entries are not an error.
  fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON file named after [`CART_STORAGE_KEY`] in the
/// configured directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
  path: PathBuf,
}

impl JsonFileStorage {
  pub fn new(dir: impl AsRef<Path>) -> Self {
    JsonFileStorage {
      path: dir.as_ref().join(format!("{}.json", CART_STORAGE_KEY)),
    }
  }

  /// Storage at an explicit file path; used by tests that need isolated files.
  pub fn at_path(path: impl Into<PathBuf>) -> Self {
    JsonFileStorage { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl CartStorage for JsonFileStorage {
  fn read(&self) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(&self.path) {
      Ok(payload) => Ok(Some(payload)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn write(&self, payload: &str) -> Result<(), StorageError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&self.path, payload)?;
    Ok(())
  }

  fn clear(&self) -> Result<(), StorageError> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}

/// In-memory storage for tests and the runnable example. Clones share the
/// same buffer, so a cart reloaded from a cloned handle observes what the
/// previous store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  buffer: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Pre-seeded storage, for exercising the load/normalize path.
  pub fn with_payload(payload: impl Into<String>) -> Self {
    MemoryStorage {
      buffer: Arc::new(Mutex::new(Some(payload.into()))),
    }
  }

  /// Current raw payload, if any. Test observability helper.
  pub fn snapshot(&self) -> Option<String> {
    self.buffer.lock().clone()
  }
}

impl CartStorage for MemoryStorage {
  fn read(&self) -> Result<Option<String>, StorageError> {
    Ok(self.buffer.lock().clone())
  }

  fn write(&self, payload: &str) -> Result<(), StorageError> {
    *self.buffer.lock() = Some(payload.to_string());
    Ok(())
  }

  fn clear(&self) -> Result<(), StorageError> {
    *self.buffer.lock() = None;
    Ok(())
  }
}
