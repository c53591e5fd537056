//! Retry on transient server errors
//!
//! Every remote call made by the pagination and fan-out helpers goes through
//! [`RetryPolicy::run`]. The policy is attempt-bounded with no delay between
//! attempts: a CLI issues few requests and a 5xx is usually gone on the next
//! try.

use std::future::Future;

use crate::error::{Error, Result};

/// Total attempts (first call included) made for a retryable failure
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Attempt-bounded retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Run `operation`, retrying while it fails with a retryable error
    ///
    /// Non-retryable errors are returned unchanged on first occurrence. When
    /// every attempt fails with a retryable error the last one is returned as
    /// [`Error::ServiceUnavailable`].
    ///
    /// # Example
    /// ```ignore
    /// let users = RetryPolicy::default()
    ///     .run(|| client.users(&batch))
    ///     .await?;
    /// ```
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if !is_retryable_error(&e) => return Err(e),
                Err(e) if attempt >= self.max_attempts => {
                    tracing::warn!(attempts = attempt, error = %e, "Giving up after server errors");
                    return Err(Error::ServiceUnavailable(e.to_string()));
                }
                Err(e) => {
                    tracing::debug!(
                        attempt = attempt,
                        error = %e,
                        "Retrying after transient server error"
                    );
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Run `operation` under the default policy
pub async fn retry<T, F, Fut>(operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    RetryPolicy::default().run(operation).await
}

/// Check if an error is a transient server-side failure
///
/// Client errors (bad credentials, missing resources, rate limits) never
/// succeed on an immediate retry.
pub fn is_retryable_error(error: &Error) -> bool {
    matches!(error, Error::Server(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_is_retryable_error() {
        assert!(is_retryable_error(&Error::Server(
            "503 Service Unavailable".to_string()
        )));
        assert!(is_retryable_error(&Error::Server("502 Bad Gateway".to_string())));

        assert!(!is_retryable_error(&Error::Auth("401".to_string())));
        assert!(!is_retryable_error(&Error::NotFound("404".to_string())));
        assert!(!is_retryable_error(&Error::RateLimited("429".to_string())));
        assert!(!is_retryable_error(&Error::Network("timeout".to_string())));
        assert!(!is_retryable_error(&Error::ServiceUnavailable(
            "exhausted".to_string()
        )));
    }

    #[test]
    fn test_policy_defaults() {
        assert_eq!(RetryPolicy::default().max_attempts, 3);
        assert_eq!(RetryPolicy::new(0).max_attempts, 1);
    }

    #[tokio::test]
    async fn test_retry_success_first_attempt() {
        let mut calls = 0;

        let result = retry(|| {
            calls += 1;
            async { Ok::<_, Error>(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_retry_success_on_third_attempt() {
        let call_count = Arc::new(AtomicU32::new(0));
        let call_count_clone = call_count.clone();

        let result = retry(|| {
            let cc = call_count_clone.clone();
            async move {
                let count = cc.fetch_add(1, Ordering::SeqCst);
                if count < 2 {
                    Err(Error::Server("503 Service Unavailable".to_string()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_exhausted() {
        let mut calls = 0;

        let result: Result<()> = retry(|| {
            calls += 1;
            async { Err(Error::Server("502 Bad Gateway".to_string())) }
        })
        .await;

        match result {
            Err(Error::ServiceUnavailable(msg)) => assert!(msg.contains("502 Bad Gateway")),
            other => panic!("expected service unavailable, got {other:?}"),
        }
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_retry_non_retryable() {
        let mut calls = 0;

        let result: Result<()> = retry(|| {
            calls += 1;
            async { Err(Error::NotFound("not found".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_custom_attempt_budget() {
        let mut calls = 0;

        let result: Result<()> = RetryPolicy::new(5)
            .run(|| {
                calls += 1;
                async { Err(Error::Server("500".to_string())) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls, 5);
    }
}
