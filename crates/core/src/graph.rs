//! Follow-graph queries built from the fetch helpers
//!
//! These compose the client capability with cursor pagination, the two-way
//! fan-out and the batch fan-out, so commands only decide what to print.

use crate::aggregate::{MAX_USERS_PER_REQUEST, SetOperation, batch_fan_out, fetch_and_combine};
use crate::error::Result;
use crate::paginate::collect_with_cursor;
use crate::retry::RetryPolicy;
use crate::traits::TwitterClient;
use crate::types::{ListRef, User, UserRef};

/// Relationship between the accounts a user follows and its followers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Follow each other
    Friends,
    /// Followed by the user but not following back
    Leaders,
    /// Following the user but not followed back
    Groupies,
}

/// Ids of every account `user` follows
pub async fn following_ids(
    client: &dyn TwitterClient,
    user: &UserRef,
    policy: &RetryPolicy,
) -> Result<Vec<u64>> {
    collect_with_cursor(policy, |cursor| client.friend_ids(user, cursor)).await
}

/// Ids of every account following `user`
pub async fn follower_ids(
    client: &dyn TwitterClient,
    user: &UserRef,
    policy: &RetryPolicy,
) -> Result<Vec<u64>> {
    collect_with_cursor(policy, |cursor| client.follower_ids(user, cursor)).await
}

/// Ids matching a relationship, fetching both sides of the graph concurrently
pub async fn relationship_ids(
    client: &dyn TwitterClient,
    user: &UserRef,
    relationship: Relationship,
    policy: &RetryPolicy,
) -> Result<Vec<u64>> {
    let following = following_ids(client, user, policy);
    let followers = follower_ids(client, user, policy);

    match relationship {
        Relationship::Friends => {
            fetch_and_combine(following, followers, SetOperation::Intersection).await
        }
        Relationship::Leaders => {
            fetch_and_combine(following, followers, SetOperation::Difference).await
        }
        Relationship::Groupies => {
            fetch_and_combine(followers, following, SetOperation::Difference).await
        }
    }
}

/// Full user objects for any number of accounts, looked up in batches
pub async fn lookup_users(
    client: &dyn TwitterClient,
    users: &[UserRef],
    policy: &RetryPolicy,
) -> Result<Vec<User>> {
    batch_fan_out(users, MAX_USERS_PER_REQUEST, policy, |batch| async move {
        client.users(&batch).await
    })
    .await
}

/// Full user objects for a list of ids
pub async fn lookup_user_ids(
    client: &dyn TwitterClient,
    ids: &[u64],
    policy: &RetryPolicy,
) -> Result<Vec<User>> {
    let refs: Vec<UserRef> = ids.iter().copied().map(UserRef::Id).collect();
    lookup_users(client, &refs, policy).await
}

/// Every member of a list
pub async fn list_members(
    client: &dyn TwitterClient,
    list: &ListRef,
    policy: &RetryPolicy,
) -> Result<Vec<User>> {
    collect_with_cursor(policy, |cursor| client.list_members(list, cursor)).await
}

/// Add members to a list in batches; returns the number of accounts sent
pub async fn add_list_members(
    client: &dyn TwitterClient,
    list: &ListRef,
    users: &[UserRef],
    policy: &RetryPolicy,
) -> Result<usize> {
    batch_fan_out(users, MAX_USERS_PER_REQUEST, policy, |batch| async move {
        client.list_add_members(list, &batch).await?;
        Ok(vec![batch.len()])
    })
    .await
    .map(|sizes| sizes.into_iter().sum())
}

/// Remove members from a list in batches; returns the number of accounts sent
pub async fn remove_list_members(
    client: &dyn TwitterClient,
    list: &ListRef,
    users: &[UserRef],
    policy: &RetryPolicy,
) -> Result<usize> {
    batch_fan_out(users, MAX_USERS_PER_REQUEST, policy, |batch| async move {
        client.list_remove_members(list, &batch).await?;
        Ok(vec![batch.len()])
    })
    .await
    .map(|sizes| sizes.into_iter().sum())
}

/// Follow any number of accounts in batches; returns the accounts followed
pub async fn follow_users(
    client: &dyn TwitterClient,
    users: &[UserRef],
    policy: &RetryPolicy,
) -> Result<Vec<User>> {
    batch_fan_out(users, MAX_USERS_PER_REQUEST, policy, |batch| async move {
        client.follow(&batch).await
    })
    .await
}

/// Unfollow any number of accounts in batches; returns the accounts unfollowed
pub async fn unfollow_users(
    client: &dyn TwitterClient,
    users: &[UserRef],
    policy: &RetryPolicy,
) -> Result<Vec<User>> {
    batch_fan_out(users, MAX_USERS_PER_REQUEST, policy, |batch| async move {
        client.unfollow(&batch).await
    })
    .await
}

/// Screen name of an account, looking it up when only the id is known
pub async fn screen_name_of(
    client: &dyn TwitterClient,
    user: &UserRef,
    policy: &RetryPolicy,
) -> Result<String> {
    match user {
        UserRef::ScreenName(name) => Ok(name.clone()),
        UserRef::Id(_) => Ok(policy.run(|| client.user(user)).await?.screen_name),
    }
}
