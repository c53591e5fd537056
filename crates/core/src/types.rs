//! Domain types shared by the client capability and the commands
//!
//! Field names follow the REST v1.1 JSON so the adapter can deserialize
//! responses straight into these types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Format of `created_at` in API payloads, e.g. `Wed Aug 27 13:08:45 +0000 2008`
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Anything with a numeric identifier usable as a `max_id` bound
pub trait HasId {
    fn id(&self) -> u64;
}

impl HasId for u64 {
    fn id(&self) -> u64 {
        *self
    }
}

/// Parse an API `created_at` string
pub fn parse_created_at(value: &str) -> Option<Timestamp> {
    Timestamp::strptime(CREATED_AT_FORMAT, value).ok()
}

/// A status update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, alias = "full_text")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<User>>,
}

impl Tweet {
    pub fn created_at(&self) -> Option<Timestamp> {
        parse_created_at(&self.created_at)
    }

    /// Screen name of the author, empty when the payload omitted the user
    pub fn screen_name(&self) -> &str {
        self.user
            .as_deref()
            .map(|u| u.screen_name.as_str())
            .unwrap_or_default()
    }
}

impl HasId for Tweet {
    fn id(&self) -> u64 {
        self.id
    }
}

/// An account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub statuses_count: u64,
    #[serde(default)]
    pub favourites_count: u64,
    #[serde(default)]
    pub listed_count: u64,
    #[serde(default)]
    pub friends_count: u64,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub protected: bool,
    /// Whether the authenticated account follows this one; absent when unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Most recent tweet, when the endpoint embeds it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Box<Tweet>>,
}

impl User {
    pub fn created_at(&self) -> Option<Timestamp> {
        parse_created_at(&self.created_at)
    }

    /// Time of the embedded most recent tweet
    pub fn last_tweeted_at(&self) -> Option<Timestamp> {
        self.status.as_deref().and_then(Tweet::created_at)
    }
}

impl HasId for User {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A curated list of accounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: u64,
    #[serde(default)]
    pub subscriber_count: u64,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub created_at: String,
    /// Whether the authenticated account subscribes to the list
    #[serde(default)]
    pub following: bool,
    /// Path of the list page, e.g. `/sferik/presidents`
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl List {
    pub fn created_at(&self) -> Option<Timestamp> {
        parse_created_at(&self.created_at)
    }

    pub fn owner_screen_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.screen_name.as_str())
            .unwrap_or_default()
    }
}

impl HasId for List {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A private message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMessage {
    pub id: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sender_screen_name: String,
    #[serde(default)]
    pub recipient_screen_name: String,
}

impl DirectMessage {
    pub fn created_at(&self) -> Option<Timestamp> {
        parse_created_at(&self.created_at)
    }
}

impl HasId for DirectMessage {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Cursor value requesting the first page
pub const CURSOR_START: i64 = -1;

/// Cursor value signalling that no pages remain
pub const CURSOR_END: i64 = 0;

/// One page of a cursor-paginated collection
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub next_cursor: i64,
}

impl<T> CursorPage<T> {
    pub fn new(items: Vec<T>, next_cursor: i64) -> Self {
        Self { items, next_cursor }
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor == CURSOR_END
    }
}

/// Parameters of one count-windowed request
///
/// `max_id` is an inclusive upper bound on returned ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountWindow {
    pub count: usize,
    pub max_id: Option<u64>,
}

impl CountWindow {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_id: None,
        }
    }

    pub fn with_max_id(mut self, max_id: Option<u64>) -> Self {
        self.max_id = max_id;
        self
    }
}

/// How a command refers to an account
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserRef {
    Id(u64),
    ScreenName(String),
}

impl UserRef {
    /// Interpret command input as a numeric id or a screen name
    ///
    /// Screen names may carry leading `@` characters, which are dropped.
    pub fn parse(input: &str, by_id: bool) -> Result<Self> {
        let input = input.trim();
        if by_id {
            input
                .parse::<u64>()
                .map(UserRef::Id)
                .map_err(|_| Error::InvalidArgument(format!("'{input}' is not a numeric user id")))
        } else {
            let name = input.trim_start_matches('@');
            if name.is_empty() {
                return Err(Error::InvalidArgument("Screen name cannot be empty".to_string()));
            }
            Ok(UserRef::ScreenName(name.to_string()))
        }
    }
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        UserRef::Id(id)
    }
}

impl std::fmt::Display for UserRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRef::Id(id) => write!(f, "{id}"),
            UserRef::ScreenName(name) => write!(f, "@{name}"),
        }
    }
}

/// A list identified by owner and slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRef {
    pub owner: UserRef,
    pub slug: String,
}

impl ListRef {
    /// Parse `[OWNER/]LIST`, using `default_owner` when no owner is given
    pub fn parse(input: &str, by_id: bool, default_owner: &str) -> Result<Self> {
        let (owner, slug) = match input.split_once('/') {
            Some((owner, slug)) => (UserRef::parse(owner, by_id)?, slug),
            None => (UserRef::ScreenName(default_owner.to_string()), input),
        };
        if slug.is_empty() {
            return Err(Error::InvalidArgument("List name cannot be empty".to_string()));
        }
        Ok(Self {
            owner,
            slug: slug.to_string(),
        })
    }
}

impl std::fmt::Display for ListRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ref_parse() {
        assert_eq!(
            UserRef::parse("@sferik", false).unwrap(),
            UserRef::ScreenName("sferik".to_string())
        );
        assert_eq!(
            UserRef::parse("sferik", false).unwrap(),
            UserRef::ScreenName("sferik".to_string())
        );
        assert_eq!(UserRef::parse("7505382", true).unwrap(), UserRef::Id(7505382));
        assert!(UserRef::parse("sferik", true).is_err());
        assert!(UserRef::parse("@", false).is_err());
    }

    #[test]
    fn test_list_ref_parse() {
        let list = ListRef::parse("presidents", false, "testcli").unwrap();
        assert_eq!(list.owner, UserRef::ScreenName("testcli".to_string()));
        assert_eq!(list.slug, "presidents");

        let list = ListRef::parse("@sferik/presidents", false, "testcli").unwrap();
        assert_eq!(list.owner, UserRef::ScreenName("sferik".to_string()));
        assert_eq!(list.to_string(), "@sferik/presidents");

        let list = ListRef::parse("7505382/presidents", true, "testcli").unwrap();
        assert_eq!(list.owner, UserRef::Id(7505382));

        assert!(ListRef::parse("sferik/", false, "testcli").is_err());
    }

    #[test]
    fn test_parse_created_at() {
        let ts = parse_created_at("Wed Aug 27 13:08:45 +0000 2008").unwrap();
        assert_eq!(ts.as_second(), 1_219_842_525);
        assert!(parse_created_at("yesterday").is_none());
    }

    #[test]
    fn test_tweet_accepts_full_text() {
        let tweet: Tweet = serde_json::from_str(
            r#"{"id": 1, "full_text": "hello", "created_at": "Wed Aug 27 13:08:45 +0000 2008",
                "user": {"id": 7505382, "screen_name": "sferik"}}"#,
        )
        .unwrap();
        assert_eq!(tweet.text, "hello");
        assert_eq!(tweet.screen_name(), "sferik");
        assert!(tweet.created_at().is_some());
    }

    #[test]
    fn test_cursor_page_is_last() {
        assert!(CursorPage::new(vec![1u64], CURSOR_END).is_last());
        assert!(!CursorPage::new(vec![1u64], 7).is_last());
    }
}
