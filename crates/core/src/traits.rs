//! Remote client capability
//!
//! This module defines the `TwitterClient` trait that abstracts the REST API.
//! Commands and the fetch helpers only talk to this trait, so the HTTP
//! adapter can be swapped for a mock in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CountWindow, CursorPage, DirectMessage, List, ListRef, Tweet, User, UserRef};

/// Typed access to the remote endpoints used by the CLI
///
/// Every method returns one page of results. Implementations map transport
/// failures to [`crate::Error`] so that only 5xx responses surface as the
/// retryable [`crate::Error::Server`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TwitterClient: Send + Sync {
    /// Tweets from accounts the authenticated user follows
    async fn home_timeline(&self, window: CountWindow) -> Result<Vec<Tweet>>;

    /// Tweets mentioning the authenticated user
    async fn mentions(&self, window: CountWindow) -> Result<Vec<Tweet>>;

    /// Tweets posted by a user
    async fn user_timeline(&self, user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>>;

    /// Retweets posted by a user
    async fn retweeted_by(&self, user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>>;

    /// Tweets favorited by a user
    async fn favorites(&self, user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>>;

    /// Tweets posted to a list
    async fn list_timeline(&self, list: &ListRef, window: CountWindow) -> Result<Vec<Tweet>>;

    /// Direct messages received by the authenticated user
    async fn direct_messages(&self, window: CountWindow) -> Result<Vec<DirectMessage>>;

    /// Direct messages sent by the authenticated user
    async fn direct_messages_sent(&self, window: CountWindow) -> Result<Vec<DirectMessage>>;

    /// Recent tweets matching a query
    async fn search(&self, query: &str, window: CountWindow) -> Result<Vec<Tweet>>;

    /// Ids of accounts a user follows
    async fn friend_ids(&self, user: &UserRef, cursor: i64) -> Result<CursorPage<u64>>;

    /// Ids of accounts following a user
    async fn follower_ids(&self, user: &UserRef, cursor: i64) -> Result<CursorPage<u64>>;

    /// Lists owned by a user
    async fn lists(&self, user: &UserRef, cursor: i64) -> Result<CursorPage<List>>;

    /// Members of a list
    async fn list_members(&self, list: &ListRef, cursor: i64) -> Result<CursorPage<User>>;

    /// Full user objects for up to [`crate::MAX_USERS_PER_REQUEST`] accounts
    async fn users(&self, users: &[UserRef]) -> Result<Vec<User>>;

    /// Full user object for one account
    async fn user(&self, user: &UserRef) -> Result<User>;

    /// Start following up to [`crate::MAX_USERS_PER_REQUEST`] accounts
    ///
    /// Returns the accounts that were followed.
    async fn follow(&self, users: &[UserRef]) -> Result<Vec<User>>;

    /// Stop following up to [`crate::MAX_USERS_PER_REQUEST`] accounts
    ///
    /// Returns the accounts that were unfollowed.
    async fn unfollow(&self, users: &[UserRef]) -> Result<Vec<User>>;

    /// Whether `source` follows `target`
    async fn friendship(&self, source: &UserRef, target: &UserRef) -> Result<bool>;

    /// Details of one list
    async fn list(&self, list: &ListRef) -> Result<List>;

    /// Whether `user` is a member of `list`
    async fn list_member(&self, list: &ListRef, user: &UserRef) -> Result<bool>;

    /// Add up to [`crate::MAX_USERS_PER_REQUEST`] members to a list
    async fn list_add_members(&self, list: &ListRef, users: &[UserRef]) -> Result<()>;

    /// Remove up to [`crate::MAX_USERS_PER_REQUEST`] members from a list
    async fn list_remove_members(&self, list: &ListRef, users: &[UserRef]) -> Result<()>;
}
