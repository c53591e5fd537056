//! Pagination strategies
//!
//! The API pages its collections three different ways. Each helper here
//! drives one of them to completion, calling `fetch` one page at a time
//! (each call wrapped in the retry policy) and concatenating pages in the
//! order the server delivered them.

use std::future::Future;

use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::types::{CURSOR_START, CountWindow, CursorPage, HasId};

/// Items shown when a command is not given `--number`
pub const DEFAULT_NUM_RESULTS: usize = 20;

/// Per-call maximum of the timeline, favorites and direct message endpoints
pub const MAX_NUM_RESULTS: usize = 200;

/// Per-call maximum of the search endpoint
pub const MAX_SEARCH_RESULTS: usize = 100;

/// Fetch up to `count` items from an endpoint that takes `count`/`max_id`
///
/// Requests are sized `min(remaining, per_call_max)`; each following request
/// is bounded by the last id of the previous page minus one. Collection stops
/// once `count` items are in hand or a page comes back short.
pub async fn collect_with_count<T, F, Fut>(
    count: usize,
    per_call_max: usize,
    policy: &RetryPolicy,
    mut fetch: F,
) -> Result<Vec<T>>
where
    T: HasId,
    F: FnMut(CountWindow) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut collected = Vec::new();
    if count == 0 {
        return Ok(collected);
    }

    let per_call_max = per_call_max.max(1);
    let mut max_id = None;

    loop {
        let remaining = count - collected.len();
        let window = CountWindow::new(remaining.min(per_call_max)).with_max_id(max_id);
        tracing::debug!(count = window.count, max_id = ?window.max_id, "Fetching count window");

        let page = policy.run(|| fetch(window)).await?;
        let received = page.len();
        let last_id = page.last().map(HasId::id);
        collected.extend(page);

        if received < window.count || collected.len() >= count {
            break;
        }
        match last_id {
            Some(id) if id > 0 => max_id = Some(id - 1),
            _ => break,
        }
    }

    collected.truncate(count);
    Ok(collected)
}

/// Drain a cursor-paginated collection
///
/// Starts at the "first page" cursor and follows `next_cursor` until the
/// server returns the end sentinel.
pub async fn collect_with_cursor<T, F, Fut>(policy: &RetryPolicy, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>>>,
{
    let mut collected = Vec::new();
    let mut cursor = CURSOR_START;

    loop {
        tracing::debug!(cursor, "Fetching cursor page");
        let page = policy.run(|| fetch(cursor)).await?;
        let last = page.is_last();
        let next_cursor = page.next_cursor;
        collected.extend(page.items);

        if last {
            break;
        }
        cursor = next_cursor;
    }

    Ok(collected)
}

/// Drain an endpoint that only pages backwards by `max_id`
///
/// Every call asks for `per_page` items below the smallest id seen so far;
/// the first empty page ends the walk.
pub async fn collect_with_max_id<T, F, Fut>(
    per_page: usize,
    policy: &RetryPolicy,
    mut fetch: F,
) -> Result<Vec<T>>
where
    T: HasId,
    F: FnMut(CountWindow) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut collected = Vec::new();
    let mut max_id = None;

    loop {
        let window = CountWindow::new(per_page).with_max_id(max_id);
        tracing::debug!(max_id = ?window.max_id, "Fetching max_id page");

        let page = policy.run(|| fetch(window)).await?;
        let Some(min_id) = page.iter().map(HasId::id).min() else {
            break;
        };
        collected.extend(page);

        if min_id == 0 {
            break;
        }
        max_id = Some(min_id - 1);
    }

    Ok(collected)
}
