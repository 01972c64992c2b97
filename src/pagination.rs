//! Pagination arithmetic shared by the listing controller and its
//! consumers.

/// Derived metadata for a "showing X-Y of Z" readout.
///
/// `start_item`/`end_item` are 1-based; both are zero when the result set
/// is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
  pub total_pages: usize,
  pub start_item: usize,
  pub end_item: usize,
  pub has_next: bool,
  pub has_prev: bool,
}

impl PaginationInfo {
  /// Compute the readout for a 1-based `current` page over `total` items.
  pub fn new(current: usize, total: usize, limit: usize) -> Self {
    let limit = limit.max(1);
    let total_pages = total.div_ceil(limit);
    let start_item = if total == 0 {
      0
    } else {
      current.saturating_sub(1) * limit + 1
    };
    let end_item = (current * limit).min(total);

    Self {
      total_pages,
      start_item,
      end_item,
      has_next: current < total_pages,
      has_prev: current > 1,
    }
  }
}

/// One slot in a windowed page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
  Num(usize),
  Ellipsis,
}

/// Pages shown either side of the current one in the strip.
const WINDOW: usize = 2;

/// Windowed page-number strip: first and last page always present, a
/// window around the current page, ellipses standing in for the gaps.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<PageToken> {
  if total_pages == 0 {
    return Vec::new();
  }
  if total_pages == 1 {
    return vec![PageToken::Num(1)];
  }

  let mut tokens = vec![PageToken::Num(1)];

  if current > WINDOW + 2 {
    tokens.push(PageToken::Ellipsis);
  }

  let lo = current.saturating_sub(WINDOW).max(2);
  let hi = (current + WINDOW).min(total_pages - 1);
  for page in lo..=hi {
    tokens.push(PageToken::Num(page));
  }

  if current + WINDOW < total_pages - 1 {
    tokens.push(PageToken::Ellipsis);
  }

  tokens.push(PageToken::Num(total_pages));
  tokens
}
