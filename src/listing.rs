//! List-view controller for the user directory.
//!
//! Mediates between filter/page edits and the backend. Filter keystrokes
//! are recorded immediately (the input reflects them with zero latency)
//! but only the latest filter snapshot per quiet period is ever queried.
//! Every fetch carries a monotonically increasing sequence number and a
//! response is applied only if no newer response already was, so visible
//! state always follows request-issuance order regardless of completion
//! order.
//!
//! Drive the controller with `poll()` from the embedder's tick loop, the
//! same way a render loop pumps an async query.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::pagination::PaginationInfo;
use crate::types::{Page, User, UserFilters};

/// Default quiet period between the last filter keystroke and the fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

const DEFAULT_LIMIT: usize = 10;

/// Filter field addressed by a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
  Organization,
  Username,
  Email,
  PhoneNumber,
  Status,
  Date,
}

/// Where the controller is in its edit-to-fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
  /// Nothing pending
  Idle,
  /// A filter edit is waiting out the quiet period
  PendingDebounce,
  /// At least one request is in flight
  Fetching,
}

/// A single listing request handed to the backend fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
  pub page: usize,
  pub limit: usize,
  pub filters: UserFilters,
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type Fetcher = Box<dyn Fn(ListRequest) -> BoxFuture<Result<Page<User>, ApiError>> + Send + Sync>;

struct Response {
  seq: u64,
  result: Result<Page<User>, ApiError>,
}

/// Controller state for the paginated, filtered user list.
pub struct UserListController {
  filters: UserFilters,
  page: usize,
  limit: usize,
  phase: FetchPhase,
  debounce: Duration,
  deadline: Option<Instant>,
  issued_seq: u64,
  applied_seq: u64,
  current: Option<Page<User>>,
  error: Option<String>,
  fetcher: Fetcher,
  tx: mpsc::UnboundedSender<Response>,
  rx: mpsc::UnboundedReceiver<Response>,
}

impl UserListController {
  /// Create a controller over a backend fetcher.
  ///
  /// The fetcher is the entire backend contract: anything that answers a
  /// [`ListRequest`] with a [`Page`] plugs in here.
  pub fn new<F, Fut>(fetcher: F) -> Self
  where
    F: Fn(ListRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Page<User>, ApiError>> + Send + 'static,
  {
    let (tx, rx) = mpsc::unbounded_channel();

    Self {
      filters: UserFilters::default(),
      page: 1,
      limit: DEFAULT_LIMIT,
      phase: FetchPhase::Idle,
      debounce: DEFAULT_DEBOUNCE,
      deadline: None,
      issued_seq: 0,
      applied_seq: 0,
      current: None,
      error: None,
      fetcher: Box::new(move |request| Box::pin(fetcher(request))),
      tx,
      rx,
    }
  }

  /// Set the debounce window.
  pub fn with_debounce(mut self, window: Duration) -> Self {
    self.debounce = window;
    self
  }

  /// Set the initial page size.
  pub fn with_page_size(mut self, limit: usize) -> Self {
    if limit > 0 {
      self.limit = limit;
    }
    self
  }

  /// Record a filter keystroke.
  ///
  /// The value shows up in `filters()` at once; the fetch waits out the
  /// quiet period, and any further edit restarts the window, including
  /// edits made while a fetch is already in flight.
  pub fn edit_filter(&mut self, field: FilterField, value: &str) {
    let value = value.trim();
    match field {
      FilterField::Organization => self.filters.organization = non_empty(value),
      FilterField::Username => self.filters.username = non_empty(value),
      FilterField::Email => self.filters.email = non_empty(value),
      FilterField::PhoneNumber => self.filters.phone_number = non_empty(value),
      FilterField::Status => self.filters.status = value.parse().ok(),
      FilterField::Date => {
        self.filters.date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
      }
    }
    self.deadline = Some(Instant::now() + self.debounce);
    self.phase = FetchPhase::PendingDebounce;
  }

  /// Apply the current filters now, bypassing the quiet period.
  pub fn apply(&mut self) {
    self.deadline = None;
    self.page = 1;
    self.start_fetch();
  }

  /// Clear all filters and refetch from the first page.
  pub fn reset(&mut self) {
    self.filters = UserFilters::default();
    self.deadline = None;
    self.page = 1;
    self.start_fetch();
  }

  /// Jump to a page, keeping filters. Fetches immediately.
  pub fn set_page(&mut self, page: usize) {
    self.page = page.max(1);
    self.deadline = None;
    self.start_fetch();
  }

  /// Change the page size and restart from the first page.
  pub fn set_limit(&mut self, limit: usize) {
    if limit > 0 {
      self.limit = limit;
    }
    self.page = 1;
    self.deadline = None;
    self.start_fetch();
  }

  /// Kick off the initial load (or an explicit refresh).
  pub fn refresh(&mut self) {
    self.deadline = None;
    self.start_fetch();
  }

  /// Pump the controller: fire a debounced fetch whose quiet period has
  /// elapsed and drain completed responses. Non-blocking; call it on
  /// every tick. Returns `true` when visible state changed.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;

    if let Some(deadline) = self.deadline {
      if Instant::now() >= deadline {
        self.deadline = None;
        // A debounced filter change restarts from the first page.
        self.page = 1;
        self.start_fetch();
        changed = true;
      }
    }

    while let Ok(response) = self.rx.try_recv() {
      if response.seq <= self.applied_seq {
        debug!(
          seq = response.seq,
          applied = self.applied_seq,
          "discarding stale list response"
        );
        continue;
      }
      self.applied_seq = response.seq;
      match response.result {
        Ok(page) => {
          self.error = None;
          self.current = Some(page);
        }
        Err(e) => {
          // Previous listing state stays visible; no retry.
          warn!(seq = response.seq, error = %e, "user list fetch failed");
          self.error = Some(e.to_string());
        }
      }
      changed = true;
    }

    if self.phase == FetchPhase::Fetching && self.applied_seq == self.issued_seq {
      self.phase = FetchPhase::Idle;
      changed = true;
    }

    changed
  }

  fn start_fetch(&mut self) {
    self.issued_seq += 1;
    let seq = self.issued_seq;
    self.phase = FetchPhase::Fetching;

    let request = ListRequest {
      page: self.page,
      limit: self.limit,
      filters: self.filters.clone(),
    };
    debug!(seq, page = request.page, limit = request.limit, "issuing user list fetch");

    let future = (self.fetcher)(request);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = future.await;
      // Ignore send errors - the controller may have been dropped
      let _ = tx.send(Response { seq, result });
    });
  }

  // Accessors for the presentation boundary

  pub fn items(&self) -> &[User] {
    self.current.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
  }

  pub fn is_loading(&self) -> bool {
    self.phase == FetchPhase::Fetching
  }

  pub fn phase(&self) -> FetchPhase {
    self.phase
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn filters(&self) -> &UserFilters {
    &self.filters
  }

  pub fn page(&self) -> usize {
    self.page
  }

  pub fn limit(&self) -> usize {
    self.limit
  }

  pub fn total(&self) -> usize {
    self.current.as_ref().map(|p| p.total).unwrap_or(0)
  }

  /// Pagination metadata block for the current listing.
  pub fn page_info(&self) -> PaginationInfo {
    PaginationInfo::new(self.page, self.total(), self.limit)
  }
}

fn non_empty(value: &str) -> Option<String> {
  if value.is_empty() {
    None
  } else {
    Some(value.to_string())
  }
}
