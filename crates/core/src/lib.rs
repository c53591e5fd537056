//! tw-core: Core library for the t Twitter CLI client
//!
//! This crate provides the parts of the CLI that hold real invariants:
//! - Profile storage and username resolution
//! - Pagination over count, cursor and max_id style endpoints
//! - Concurrent fan-out with batch partitioning
//! - Retry on transient server errors
//! - The `TwitterClient` trait the HTTP adapter implements
//!
//! This crate is independent of any HTTP stack, so every helper can be
//! exercised against a mock client.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod graph;
pub mod paginate;
pub mod profile;
pub mod retry;
pub mod traits;
pub mod types;

pub use aggregate::{
    BatchJob, MAX_USERS_PER_REQUEST, SetOperation, batch_fan_out, fan_out, fetch_and_combine,
    partition, run_batches,
};
pub use config::{ApiConfig, DEFAULT_HOST};
pub use error::{Error, Result};
pub use graph::Relationship;
pub use paginate::{
    DEFAULT_NUM_RESULTS, MAX_NUM_RESULTS, MAX_SEARCH_RESULTS, collect_with_count,
    collect_with_cursor, collect_with_max_id,
};
pub use profile::{Profile, ProfilePatch, ProfileStore};
pub use retry::{RetryPolicy, is_retryable_error, retry};
pub use traits::TwitterClient;
pub use types::{
    CountWindow, CursorPage, DirectMessage, HasId, List, ListRef, Tweet, User, UserRef,
};
