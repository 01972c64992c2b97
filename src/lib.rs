//! Client-side data core for a lending-platform admin console.
//!
//! This crate covers the state layer behind the console's user directory:
//! an in-memory query backend ([`api::UserApi`]), a debounced list
//! controller with ordered response application
//! ([`listing::UserListController`]), a read-through detail cache
//! ([`cache::UserDetailCache`]), JSON key-value persistence ([`store`]),
//! and the operator session ([`session::Session`]). Presentation,
//! routing, and widgets live in the embedding application.
//!
//! Everything runs on a single logical thread: fetches are spawned tasks
//! reporting over channels, resolved by non-blocking `poll()` calls from
//! the embedder's tick loop.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod session;
pub mod store;
pub mod types;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a global tracing subscriber honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
  TRACING.call_once(|| {
    tracing_subscriber::fmt()
      .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
      .init();
  });
}
