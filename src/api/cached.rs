//! Cached user backend wrapping [`UserApi`] with the detail cache.
//!
//! Same surface as the plain backend; single-record lookups are served
//! through the persistent read-through cache. Listing and statistics are
//! not cached: filters and paging make their result space unbounded, and
//! both are cheap against the in-memory dataset.

use crate::api::UserApi;
use crate::cache::UserDetailCache;
use crate::error::ApiError;
use crate::store::{KeyValue, Storage};
use crate::types::{AuthUser, Page, User, UserFilters, UserStats};

pub struct CachedUserApi<S: KeyValue> {
  inner: UserApi,
  cache: UserDetailCache<S>,
}

impl<S: KeyValue> CachedUserApi<S> {
  pub fn new(inner: UserApi, storage: Storage<S>) -> Self {
    Self {
      inner,
      cache: UserDetailCache::new(storage),
    }
  }

  pub async fn list_users(
    &self,
    page: usize,
    limit: usize,
    filters: &UserFilters,
  ) -> Result<Page<User>, ApiError> {
    self.inner.list_users(page, limit, filters).await
  }

  /// Look up a user, preferring the local cache over the backend.
  pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
    let inner = self.inner.clone();
    let owned_id = id.to_string();
    self
      .cache
      .get_detail(id, || async move { inner.get_user(&owned_id).await })
      .await
  }

  pub async fn stats(&self) -> UserStats {
    self.inner.stats().await
  }

  pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
    self.inner.login(email, password).await
  }
}

impl<S: KeyValue> Clone for CachedUserApi<S> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
      cache: self.cache.clone(),
    }
  }
}
