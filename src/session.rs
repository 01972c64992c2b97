//! Operator session for the running process.
//!
//! There is exactly one signed-in identity at a time. It is restored from
//! storage at startup without re-validating credentials and stays valid
//! until an explicit logout or an external storage wipe; there is no
//! expiry and no token refresh.

use tracing::info;

use crate::store::{KeyValue, Storage};
use crate::types::AuthUser;

/// Fixed storage key for the persisted identity.
const SESSION_KEY: &str = "user";

/// Holder for the authenticated identity, persisted across restarts.
pub struct Session<S: KeyValue> {
  storage: Storage<S>,
  current: Option<AuthUser>,
}

impl<S: KeyValue> Session<S> {
  /// Create the holder and restore any persisted identity.
  pub fn restore(storage: Storage<S>) -> Self {
    let current = storage.get::<AuthUser>(SESSION_KEY);
    if let Some(user) = &current {
      info!(email = %user.email, "restored session");
    }
    Self { storage, current }
  }

  /// Record a successful login and persist it.
  pub fn login(&mut self, user: AuthUser) {
    self.storage.set(SESSION_KEY, &user);
    self.current = Some(user);
  }

  /// Drop the identity and remove it from storage.
  pub fn logout(&mut self) {
    self.current = None;
    self.storage.remove(SESSION_KEY);
  }

  pub fn current(&self) -> Option<&AuthUser> {
    self.current.as_ref()
  }

  pub fn is_logged_in(&self) -> bool {
    self.current.is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;

  fn operator() -> AuthUser {
    AuthUser {
      id: "1".to_string(),
      email: "admin@lendsqr.com".to_string(),
      name: "Admin User".to_string(),
      avatar: String::new(),
    }
  }

  #[test]
  fn starts_logged_out_on_empty_storage() {
    let session = Session::restore(Storage::new(MemoryStore::new()));
    assert!(!session.is_logged_in());
    assert!(session.current().is_none());
  }

  #[test]
  fn login_persists_across_a_restart() {
    let storage = Storage::new(MemoryStore::new());

    let mut session = Session::restore(storage.clone());
    session.login(operator());
    assert!(session.is_logged_in());

    // A new holder over the same storage sees the identity without any
    // credential check.
    let restored = Session::restore(storage);
    assert_eq!(restored.current(), Some(&operator()));
  }

  #[test]
  fn logout_clears_memory_and_storage() {
    let storage = Storage::new(MemoryStore::new());

    let mut session = Session::restore(storage.clone());
    session.login(operator());
    session.logout();
    assert!(!session.is_logged_in());

    let restored = Session::restore(storage);
    assert!(!restored.is_logged_in());
  }
}
