//! Read-through cache for single user records.
//!
//! Consulted before every detail fetch: a hit skips the backend entirely,
//! a miss fetches, writes back, and returns. Entries are keyed
//! `user_<id>`, never expire, and are never re-validated: the upstream
//! dataset is immutable for the life of the process, so a cached record
//! cannot go stale in scope.

use std::future::Future;

use tracing::debug;

use crate::error::ApiError;
use crate::store::{KeyValue, Storage};
use crate::types::User;

/// Per-record read-through cache over the JSON storage adapter.
pub struct UserDetailCache<S: KeyValue> {
  storage: Storage<S>,
}

impl<S: KeyValue> UserDetailCache<S> {
  pub fn new(storage: Storage<S>) -> Self {
    Self { storage }
  }

  /// Fetch a user's detail record through the local store.
  ///
  /// `NotFound` (and any other fetch failure) propagates unchanged and is
  /// never cached.
  pub async fn get_detail<F, Fut>(&self, id: &str, fetcher: F) -> Result<User, ApiError>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<User, ApiError>>,
  {
    let key = user_key(id);

    if let Some(user) = self.storage.get::<User>(&key) {
      debug!(id, "user detail served from cache");
      return Ok(user);
    }

    let user = fetcher().await?;
    self.storage.set(&key, &user);
    Ok(user)
  }
}

impl<S: KeyValue> Clone for UserDetailCache<S> {
  fn clone(&self) -> Self {
    Self {
      storage: self.storage.clone(),
    }
  }
}

/// Storage key for a cached user record.
fn user_key(id: &str) -> String {
  format!("user_{}", id)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::seed;
  use crate::store::MemoryStore;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  fn counting_fetcher(
    calls: &Arc<AtomicUsize>,
    result: Result<User, ApiError>,
  ) -> impl Future<Output = Result<User, ApiError>> {
    let calls = Arc::clone(calls);
    async move {
      calls.fetch_add(1, Ordering::SeqCst);
      result
    }
  }

  #[tokio::test]
  async fn first_call_fetches_later_calls_do_not() {
    let cache = UserDetailCache::new(Storage::new(MemoryStore::new()));
    let user = seed::demo_users(1).remove(0);
    let calls = Arc::new(AtomicUsize::new(0));

    let first = cache
      .get_detail("user_1", || counting_fetcher(&calls, Ok(user.clone())))
      .await
      .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let second = cache
      .get_detail("user_1", || counting_fetcher(&calls, Ok(user.clone())))
      .await
      .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1, "hit must not reach the backend");
    assert_eq!(first, second);
  }

  #[tokio::test]
  async fn distinct_ids_are_cached_independently() {
    let cache = UserDetailCache::new(Storage::new(MemoryStore::new()));
    let users = seed::demo_users(2);
    let calls = Arc::new(AtomicUsize::new(0));

    cache
      .get_detail("user_1", || counting_fetcher(&calls, Ok(users[0].clone())))
      .await
      .unwrap();
    cache
      .get_detail("user_2", || counting_fetcher(&calls, Ok(users[1].clone())))
      .await
      .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn failures_propagate_and_are_not_cached() {
    let cache = UserDetailCache::new(Storage::new(MemoryStore::new()));
    let user = seed::demo_users(1).remove(0);
    let calls = Arc::new(AtomicUsize::new(0));

    let miss = cache
      .get_detail("user_1", || counting_fetcher(&calls, Err(ApiError::NotFound)))
      .await;
    assert_eq!(miss, Err(ApiError::NotFound));

    // The failure must not have been written back; the next call fetches.
    let hit = cache
      .get_detail("user_1", || counting_fetcher(&calls, Ok(user.clone())))
      .await;
    assert_eq!(hit, Ok(user));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn entries_survive_a_new_cache_over_the_same_store() {
    let storage = Storage::new(MemoryStore::new());
    let user = seed::demo_users(1).remove(0);
    let calls = Arc::new(AtomicUsize::new(0));

    let cache = UserDetailCache::new(storage.clone());
    cache
      .get_detail("user_1", || counting_fetcher(&calls, Ok(user.clone())))
      .await
      .unwrap();

    // A fresh cache over the same storage sees the persisted entry.
    let reopened = UserDetailCache::new(storage);
    reopened
      .get_detail("user_1", || counting_fetcher(&calls, Ok(user)))
      .await
      .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }
}
