//! In-memory user directory backend.
//!
//! Answers the three read queries the console needs (paginated listing,
//! lookup by id, aggregate statistics) plus the single operator
//! credential check. The dataset is fixed at construction and never
//! mutated, so concurrent reads need no synchronization beyond the `Arc`.
//!
//! These operations are the entire contract the listing controller and
//! detail cache require from a backend; a paginated remote service with
//! the same three shapes is a drop-in replacement.

mod cached;
pub mod seed;

pub use cached::CachedUserApi;

use std::sync::Arc;

use crate::error::ApiError;
use crate::types::{AuthUser, Page, User, UserFilters, UserStats, UserStatus};

// Loan/savings counts are fixed-ratio placeholders carried over from the
// product mock; there is no loan or savings data in this dataset.
const LOAN_RATIO: f64 = 0.7;
const SAVINGS_RATIO: f64 = 0.4;

const ADMIN_EMAIL: &str = "admin@lendsqr.com";
const ADMIN_PASSWORD: &str = "password";

/// Read-only query service over a user dataset fixed at construction.
#[derive(Clone)]
pub struct UserApi {
  users: Arc<Vec<User>>,
}

impl UserApi {
  pub fn new(users: Vec<User>) -> Self {
    Self {
      users: Arc::new(users),
    }
  }

  /// Backend seeded with the deterministic demo dataset.
  pub fn with_demo_data(count: usize) -> Self {
    Self::new(seed::demo_users(count))
  }

  /// List users matching `filters`, sliced to the requested page.
  ///
  /// Pages are 1-based. A page past the end yields an empty item list,
  /// never an error; only a zero page or limit is rejected.
  pub async fn list_users(
    &self,
    page: usize,
    limit: usize,
    filters: &UserFilters,
  ) -> Result<Page<User>, ApiError> {
    if page == 0 {
      return Err(ApiError::InvalidRequest("page must be >= 1".to_string()));
    }
    if limit == 0 {
      return Err(ApiError::InvalidRequest("limit must be >= 1".to_string()));
    }

    let matching: Vec<&User> = self.users.iter().filter(|u| filters.matches(u)).collect();
    let total = matching.len();
    let items: Vec<User> = matching
      .into_iter()
      .skip((page - 1) * limit)
      .take(limit)
      .cloned()
      .collect();

    Ok(Page {
      items,
      total,
      page,
      limit,
      total_pages: total.div_ceil(limit),
    })
  }

  /// Look up a single user by id.
  pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
    self
      .users
      .iter()
      .find(|u| u.id == id)
      .cloned()
      .ok_or(ApiError::NotFound)
  }

  /// Aggregate statistics over the full dataset, recomputed per call.
  pub async fn stats(&self) -> UserStats {
    let total = self.users.len();
    UserStats {
      total_users: total,
      active_users: self
        .users
        .iter()
        .filter(|u| u.status == UserStatus::Active)
        .count(),
      users_with_loans: (total as f64 * LOAN_RATIO).floor() as usize,
      users_with_savings: (total as f64 * SAVINGS_RATIO).floor() as usize,
    }
  }

  /// Check the operator credential pair and return the signed-in identity.
  pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
    if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
      Ok(AuthUser {
        id: "1".to_string(),
        email: ADMIN_EMAIL.to_string(),
        name: "Admin User".to_string(),
        avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=admin".to_string(),
      })
    } else {
      Err(ApiError::InvalidCredentials)
    }
  }
}
