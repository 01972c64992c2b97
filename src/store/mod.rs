//! Key-value persistence with failure containment.
//!
//! `KeyValue` is the raw storage contract; `Storage` layers JSON encoding
//! on top and guarantees that storage failures never escape to callers:
//! failed reads report absence, failed writes become no-ops, and both are
//! logged. The data living here is cache and session state, not a system
//! of record, so losing it is acceptable and crashing over it is not.

mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use color_eyre::{eyre::eyre, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

/// Raw string key-value storage contract.
pub trait KeyValue: Send + Sync {
  fn get_raw(&self, key: &str) -> Result<Option<String>>;
  fn set_raw(&self, key: &str, value: &str) -> Result<()>;
  fn remove_raw(&self, key: &str) -> Result<()>;
  fn clear_raw(&self) -> Result<()>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValue for MemoryStore {
  fn get_raw(&self, key: &str) -> Result<Option<String>> {
    let entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    Ok(entries.get(key).cloned())
  }

  fn set_raw(&self, key: &str, value: &str) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove_raw(&self, key: &str) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    entries.remove(key);
    Ok(())
  }

  fn clear_raw(&self) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    entries.clear();
    Ok(())
  }
}

/// JSON-typed storage adapter over a [`KeyValue`] backend.
///
/// Every operation contains backend failures instead of propagating them.
pub struct Storage<S: KeyValue> {
  backend: Arc<S>,
}

impl<S: KeyValue> Storage<S> {
  pub fn new(backend: S) -> Self {
    Self {
      backend: Arc::new(backend),
    }
  }

  /// Read and decode a value. Access and decode failures are logged and
  /// reported as absence; a read can never crash the caller.
  pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    let raw = match self.backend.get_raw(key) {
      Ok(raw) => raw?,
      Err(e) => {
        warn!(key, error = %e, "storage read failed");
        return None;
      }
    };
    match serde_json::from_str(&raw) {
      Ok(value) => Some(value),
      Err(e) => {
        warn!(key, error = %e, "stored value failed to decode");
        None
      }
    }
  }

  /// Encode and write a value. Failures are logged and swallowed.
  pub fn set<T: Serialize>(&self, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
      Ok(raw) => raw,
      Err(e) => {
        warn!(key, error = %e, "value failed to encode");
        return;
      }
    };
    if let Err(e) = self.backend.set_raw(key, &raw) {
      warn!(key, error = %e, "storage write failed");
    }
  }

  /// Best-effort removal.
  pub fn remove(&self, key: &str) {
    if let Err(e) = self.backend.remove_raw(key) {
      warn!(key, error = %e, "storage remove failed");
    }
  }

  /// Best-effort wipe of every key.
  pub fn clear(&self) {
    if let Err(e) = self.backend.clear_raw() {
      warn!(error = %e, "storage clear failed");
    }
  }
}

impl<S: KeyValue> Clone for Storage<S> {
  fn clone(&self) -> Self {
    Self {
      backend: Arc::clone(&self.backend),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::AuthUser;

  /// Backend where every operation fails, for containment tests.
  struct BrokenStore;

  impl KeyValue for BrokenStore {
    fn get_raw(&self, _key: &str) -> Result<Option<String>> {
      Err(eyre!("disk on fire"))
    }

    fn set_raw(&self, _key: &str, _value: &str) -> Result<()> {
      Err(eyre!("disk on fire"))
    }

    fn remove_raw(&self, _key: &str) -> Result<()> {
      Err(eyre!("disk on fire"))
    }

    fn clear_raw(&self) -> Result<()> {
      Err(eyre!("disk on fire"))
    }
  }

  fn auth_user() -> AuthUser {
    AuthUser {
      id: "1".to_string(),
      email: "admin@lendsqr.com".to_string(),
      name: "Admin User".to_string(),
      avatar: String::new(),
    }
  }

  #[test]
  fn set_then_get_round_trips() {
    let storage = Storage::new(MemoryStore::new());
    storage.set("user", &auth_user());
    assert_eq!(storage.get::<AuthUser>("user"), Some(auth_user()));

    storage.set("count", &42u32);
    assert_eq!(storage.get::<u32>("count"), Some(42));
  }

  #[test]
  fn unset_key_is_absent_not_a_failure() {
    let storage = Storage::new(MemoryStore::new());
    assert_eq!(storage.get::<AuthUser>("nothing here"), None);
  }

  #[test]
  fn corrupt_value_reads_as_absent() {
    let storage = Storage::new(MemoryStore::new());
    storage.backend.set_raw("user", "{not json").unwrap();
    assert_eq!(storage.get::<AuthUser>("user"), None);
  }

  #[test]
  fn backend_failures_never_escape() {
    let storage = Storage::new(BrokenStore);
    assert_eq!(storage.get::<u32>("k"), None);
    storage.set("k", &1u32);
    storage.remove("k");
    storage.clear();
  }

  #[test]
  fn remove_and_clear() {
    let storage = Storage::new(MemoryStore::new());
    storage.set("a", &1u32);
    storage.set("b", &2u32);

    storage.remove("a");
    assert_eq!(storage.get::<u32>("a"), None);
    assert_eq!(storage.get::<u32>("b"), Some(2));

    storage.clear();
    assert_eq!(storage.get::<u32>("b"), None);
  }
}
