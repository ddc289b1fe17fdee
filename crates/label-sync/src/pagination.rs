//! Cursor-based pagination walker.

use std::future::Future;

use tracing::warn;

use crate::error::SyncError;
use crate::models::Page;
use crate::retry::{with_retry, RetryPolicy};

/// Materialize a full collection from a cursor-paginated API.
///
/// Starts at cursor `None`, appends each page's nodes, and continues
/// while the page reports `has_next_page`. Every page fetch is wrapped
/// in the retry policy; retry exhaustion aborts the whole walk.
///
/// # Errors
/// Returns the error of the last failed page fetch once retries are
/// exhausted.
pub async fn fetch_all<T, F, Fut>(
    mut fetch_page: F,
    policy: RetryPolicy,
) -> Result<Vec<T>, SyncError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, SyncError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = with_retry(|| fetch_page(cursor.clone()), policy).await?;
        items.extend(page.nodes);

        if !page.page_info.has_next_page {
            break;
        }
        if page.page_info.end_cursor.is_none() {
            // A page claiming more data without a cursor cannot be
            // followed; stop rather than refetch the same page forever.
            warn!("Page reported hasNextPage without an endCursor, stopping");
            break;
        }
        cursor = page.page_info.end_cursor;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageInfo;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn page<T>(nodes: Vec<T>, next: Option<&str>) -> Page<T> {
        Page {
            nodes,
            page_info: PageInfo {
                has_next_page: next.is_some(),
                end_cursor: next.map(String::from),
            },
        }
    }

    #[tokio::test]
    async fn test_three_pages_concatenate_in_order() {
        let calls = AtomicU32::new(0);

        let result = fetch_all(
            |cursor| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    Ok(match cursor.as_deref() {
                        None => page(vec![1, 2], Some("c1")),
                        Some("c1") => page(vec![3, 4], Some("c2")),
                        Some("c2") => page(vec![5], None),
                        other => panic!("unexpected cursor {other:?}"),
                    })
                }
            },
            RetryPolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(result, vec![1, 2, 3, 4, 5]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_single_page() {
        let result = fetch_all(
            |_| async { Ok(page(vec!["a", "b"], None)) },
            RetryPolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(result, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_fetch_is_retried() {
        let calls = AtomicU32::new(0);

        let result = fetch_all(
            |_| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(SyncError::MissingData)
                    } else {
                        Ok(page(vec![42], None))
                    }
                }
            },
            RetryPolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(result, vec![42]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_abort_walk() {
        let calls = AtomicU32::new(0);

        let result: Result<Vec<u32>, _> = fetch_all(
            |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(SyncError::MissingData) }
            },
            RetryPolicy::default(),
        )
        .await;

        assert!(matches!(result, Err(SyncError::MissingData)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_missing_cursor_with_next_page_stops() {
        let calls = AtomicU32::new(0);

        let result = fetch_all(
            |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Ok(Page {
                        nodes: vec![1],
                        page_info: PageInfo {
                            has_next_page: true,
                            end_cursor: None,
                        },
                    })
                }
            },
            RetryPolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(result, vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
