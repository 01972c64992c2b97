//! Domain errors surfaced by the directory backend.

use thiserror::Error;

/// Errors a backend operation can report to the presentation layer.
///
/// Storage failures never appear here: they are contained (logged and
/// treated as absence) at the storage adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
  /// The requested record does not exist
  #[error("user not found")]
  NotFound,

  /// Malformed page/limit request; reported to the caller, never retried
  #[error("invalid request: {0}")]
  InvalidRequest(String),

  /// Login rejected
  #[error("invalid credentials")]
  InvalidCredentials,
}
