//! Concurrent fan-out
//!
//! Two shapes of bounded concurrency are supported: a fixed two-way fan-out
//! whose results are combined with a set operation, and a batch fan-out that
//! splits a materialized input into API-sized groups and runs one bulk call
//! per group. Both await every launched future before reporting, and neither
//! returns partial results.

use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;

use futures::future::{join, join_all};

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

/// Largest id list accepted by the bulk user and list-membership endpoints
pub const MAX_USERS_PER_REQUEST: usize = 100;

/// Run two independent fetches concurrently
///
/// Both futures are driven to completion even when one fails; the first
/// error in argument order is returned.
pub async fn fan_out<A, B, FA, FB>(left: FA, right: FB) -> Result<(A, B)>
where
    FA: Future<Output = Result<A>>,
    FB: Future<Output = Result<B>>,
{
    let (left, right) = join(left, right).await;
    Ok((left?, right?))
}

/// Set operation applied to the results of a two-way fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperation {
    Union,
    Intersection,
    /// Items of the left operand absent from the right
    Difference,
}

impl SetOperation {
    /// Combine two collections, keeping left-operand order without duplicates
    pub fn apply<T>(self, left: Vec<T>, right: Vec<T>) -> Vec<T>
    where
        T: Eq + Hash + Clone,
    {
        let mut seen = HashSet::new();
        match self {
            SetOperation::Union => left
                .into_iter()
                .chain(right)
                .filter(|item| seen.insert(item.clone()))
                .collect(),
            SetOperation::Intersection => {
                let right: HashSet<T> = right.into_iter().collect();
                left.into_iter()
                    .filter(|item| right.contains(item) && seen.insert(item.clone()))
                    .collect()
            }
            SetOperation::Difference => {
                let right: HashSet<T> = right.into_iter().collect();
                left.into_iter()
                    .filter(|item| !right.contains(item) && seen.insert(item.clone()))
                    .collect()
            }
        }
    }
}

/// Fetch two collections concurrently and combine them
pub async fn fetch_and_combine<T, FA, FB>(left: FA, right: FB, op: SetOperation) -> Result<Vec<T>>
where
    T: Eq + Hash + Clone,
    FA: Future<Output = Result<Vec<T>>>,
    FB: Future<Output = Result<Vec<T>>>,
{
    let (left, right) = fan_out(left, right).await?;
    tracing::debug!(left = left.len(), right = right.len(), ?op, "Combining fan-out results");
    Ok(op.apply(left, right))
}

/// One group of inputs submitted to a single bulk call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob<T> {
    /// Position of the batch in the partition
    pub index: usize,
    pub items: Vec<T>,
}

/// Split `items` into consecutive batches of at most `batch_size`
///
/// The first `batch_size` items form batch 0 and so on; the same input always
/// yields the same partition.
pub fn partition<T: Clone>(items: &[T], batch_size: usize) -> Result<Vec<BatchJob<T>>> {
    if batch_size == 0 {
        return Err(Error::InvalidArgument(
            "Batch size must be greater than zero".to_string(),
        ));
    }

    Ok(items
        .chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| BatchJob {
            index,
            items: chunk.to_vec(),
        })
        .collect())
}

/// Run `op` once per batch, all batches concurrently
///
/// Each batch is retried independently under `policy`. Results come back in
/// batch order regardless of completion order. If any batch fails, the error
/// of the first failing batch (in batch order) is returned and the results of
/// the other batches are dropped.
pub async fn run_batches<T, R, F, Fut>(
    items: &[T],
    batch_size: usize,
    policy: &RetryPolicy,
    op: F,
) -> Result<Vec<R>>
where
    T: Clone,
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    let jobs = partition(items, batch_size)?;
    tracing::debug!(batches = jobs.len(), batch_size, "Dispatching batches");

    let op = &op;
    let tasks = jobs.into_iter().map(|job| async move {
        let result = policy.run(|| op(job.items.clone())).await;
        (job.index, result)
    });

    let mut results = Vec::new();
    for (index, result) in join_all(tasks).await {
        match result {
            Ok(value) => results.push(value),
            Err(e) => {
                tracing::warn!(batch = index, error = %e, "Batch failed");
                return Err(e);
            }
        }
    }

    Ok(results)
}

/// Batch fan-out whose per-batch results are concatenated
pub async fn batch_fan_out<T, U, F, Fut>(
    items: &[T],
    batch_size: usize,
    policy: &RetryPolicy,
    op: F,
) -> Result<Vec<U>>
where
    T: Clone,
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<U>>>,
{
    let batches = run_batches(items, batch_size, policy, op).await?;
    Ok(batches.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_partition_sizes() {
        let ids: Vec<u64> = (1..=250).collect();
        let jobs = partition(&ids, MAX_USERS_PER_REQUEST).unwrap();

        let sizes: Vec<usize> = jobs.iter().map(|j| j.items.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(jobs[0].items[0], 1);
        assert_eq!(jobs[1].items[0], 101);
        assert_eq!(jobs[2].items[49], 250);
        assert_eq!(partition(&ids, MAX_USERS_PER_REQUEST).unwrap(), jobs);
    }

    #[test]
    fn test_partition_edge_cases() {
        let empty: Vec<u64> = Vec::new();
        assert!(partition(&empty, 100).unwrap().is_empty());
        assert!(matches!(
            partition(&[1u64], 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_set_operations_keep_left_order() {
        let left = vec![5u64, 1, 3, 1, 9];
        let right = vec![9u64, 3, 7];

        assert_eq!(
            SetOperation::Intersection.apply(left.clone(), right.clone()),
            vec![3, 9]
        );
        assert_eq!(
            SetOperation::Difference.apply(left.clone(), right.clone()),
            vec![5, 1]
        );
        assert_eq!(
            SetOperation::Union.apply(left, right),
            vec![5, 1, 3, 9, 7]
        );
    }

    #[tokio::test]
    async fn test_fan_out_returns_both() {
        let (a, b) = fan_out(async { Ok(vec![1u64, 2]) }, async { Ok("done") })
            .await
            .unwrap();
        assert_eq!(a, vec![1, 2]);
        assert_eq!(b, "done");
    }

    #[tokio::test]
    async fn test_fan_out_waits_for_sibling_on_failure() {
        let finished = Arc::new(AtomicUsize::new(0));
        let sibling = finished.clone();

        let result: Result<(Vec<u64>, Vec<u64>)> = fan_out(
            async { Err(Error::Auth("bad token".to_string())) },
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                sibling.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1])
            },
        )
        .await;

        assert!(matches!(result, Err(Error::Auth(_))));
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_and_combine() {
        let following = async { Ok(vec![1u64, 2, 3, 4]) };
        let followers = async { Ok(vec![3u64, 4, 5]) };

        let friends = fetch_and_combine(following, followers, SetOperation::Intersection)
            .await
            .unwrap();
        assert_eq!(friends, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_batches_run_concurrently_in_batch_order() {
        let ids: Vec<u64> = (1..=250).collect();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = run_batches(&ids, MAX_USERS_PER_REQUEST, &RetryPolicy::default(), |batch| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                // Earlier batches finish last
                let delay = 40 - (batch[0] / 10);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(batch.len())
            }
        })
        .await
        .unwrap();

        assert_eq!(results, vec![100, 100, 50]);
        assert_eq!(peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_batch_fan_out_concatenates() {
        let ids: Vec<u64> = (1..=7).collect();

        let doubled = batch_fan_out(&ids, 3, &RetryPolicy::default(), |batch| async move {
            Ok(batch.into_iter().map(|id| id * 2).collect::<Vec<_>>())
        })
        .await
        .unwrap();

        assert_eq!(doubled, vec![2, 4, 6, 8, 10, 12, 14]);
    }

    #[tokio::test]
    async fn test_batch_retries_then_succeeds() {
        let ids: Vec<u64> = (1..=150).collect();
        let attempts = Arc::new(AtomicUsize::new(0));

        let users = batch_fan_out(&ids, MAX_USERS_PER_REQUEST, &RetryPolicy::default(), |batch| {
            let attempts = attempts.clone();
            async move {
                // The second batch fails twice before succeeding
                if batch[0] == 101 && attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    return Err(Error::Server("503 Service Unavailable".to_string()));
                }
                Ok(batch)
            }
        })
        .await
        .unwrap();

        assert_eq!(users, ids);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_batch_fails_whole_aggregation() {
        let ids: Vec<u64> = (1..=250).collect();
        let calls = Arc::new(AtomicUsize::new(0));
        let completed = Arc::new(AtomicUsize::new(0));

        let result = batch_fan_out(&ids, MAX_USERS_PER_REQUEST, &RetryPolicy::default(), |batch| {
            let calls = calls.clone();
            let completed = completed.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if batch[0] == 101 {
                    return Err(Error::Server("502 Bad Gateway".to_string()));
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
                completed.fetch_add(1, Ordering::SeqCst);
                Ok(batch)
            }
        })
        .await;

        assert!(matches!(result, Err(Error::ServiceUnavailable(_))));
        // Two healthy batches once each, the failing batch three times
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(completed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_error_not_retried_in_batch() {
        let ids: Vec<u64> = (1..=10).collect();
        let calls = Arc::new(AtomicUsize::new(0));

        let result: Result<Vec<u64>> = batch_fan_out(&ids, 5, &RetryPolicy::default(), |_| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::NotFound("No user matches for specified terms.".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
