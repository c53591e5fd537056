//! REST client implementation
//!
//! Wraps reqwest and implements the TwitterClient trait from tw-core. Every
//! request is signed with the profile's OAuth 1.0a credentials.

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use tw_core::{
    ApiConfig, CountWindow, CursorPage, DirectMessage, Error, List, ListRef, Profile, Result,
    Tweet, TwitterClient, User, UserRef,
};

use crate::oauth::OAuthSigner;

/// Version prefix of every endpoint path
const API_VERSION: &str = "1.1";

type Params = Vec<(String, String)>;

/// Twitter REST v1.1 client
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    signer: OAuthSigner,
}

impl RestClient {
    /// Create a client acting as `profile` against the configured host
    pub fn new(config: &ApiConfig, profile: &Profile) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("t/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url()?,
            signer: OAuthSigner::new(profile),
        })
    }

    /// Absolute URL of an endpoint, e.g. `statuses/home_timeline`
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{API_VERSION}/{path}.json"))
            .map_err(|e| Error::Config(format!("Invalid endpoint '{path}': {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        let body = self.send(Method::GET, path, params).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::General(format!("Unexpected response from {path}: {e}")))
    }

    async fn post(&self, path: &str, params: Params) -> Result<()> {
        self.send(Method::POST, path, params).await.map(|_| ())
    }

    async fn post_for<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        let body = self.send(Method::POST, path, params).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::General(format!("Unexpected response from {path}: {e}")))
    }

    /// One `friendships/*` call per account, all in flight at once
    async fn each_friendship(&self, path: &str, users: &[UserRef]) -> Result<Vec<User>> {
        try_join_all(users.iter().map(|user| self.post_for(path, vec![user_param(user)]))).await
    }

    async fn send(&self, method: Method, path: &str, params: Params) -> Result<String> {
        let url = self.endpoint(path)?;
        let authorization = self.signer.sign(method.as_str(), url.as_str(), &params)?;
        tracing::debug!(%method, %url, params = params.len(), "Sending request");

        let request = if method == Method::GET {
            self.http.get(url).query(&params)
        } else {
            self.http.request(method, url).form(&params)
        };

        let response = request
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        if status.is_success() {
            Ok(body)
        } else {
            Err(classify(status, &body))
        }
    }
}

fn network_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Network("Request timeout".to_string())
    } else {
        Error::Network(error.to_string())
    }
}

/// Map a non-success response to the error kind the retry layer understands
fn classify(status: StatusCode, body: &str) -> Error {
    let message = api_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    });

    match status.as_u16() {
        401 | 403 => Error::Auth(message),
        404 => Error::NotFound(message),
        // 420 is the v1 "Enhance Your Calm" rate limit
        420 | 429 => Error::RateLimited(message),
        500 | 502 | 503 | 504 => Error::Server(message),
        _ => Error::General(message),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// First error message carried in an API error body
fn api_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .errors
        .into_iter()
        .next()
        .map(|detail| detail.message)
        .or(parsed.error)
}

#[derive(Debug, Deserialize)]
struct IdsPage {
    ids: Vec<u64>,
    next_cursor: i64,
}

#[derive(Debug, Deserialize)]
struct UsersPage {
    users: Vec<User>,
    next_cursor: i64,
}

#[derive(Debug, Deserialize)]
struct ListsPage {
    lists: Vec<List>,
    next_cursor: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    statuses: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct FriendshipShow {
    relationship: FriendshipRelationship,
}

#[derive(Debug, Deserialize)]
struct FriendshipRelationship {
    source: FriendshipSource,
}

#[derive(Debug, Deserialize)]
struct FriendshipSource {
    #[serde(default)]
    following: bool,
}

fn window_params(window: CountWindow) -> Params {
    let mut params = vec![("count".to_string(), window.count.to_string())];
    if let Some(max_id) = window.max_id {
        params.push(("max_id".to_string(), max_id.to_string()));
    }
    params
}

fn user_param(user: &UserRef) -> (String, String) {
    match user {
        UserRef::Id(id) => ("user_id".to_string(), id.to_string()),
        UserRef::ScreenName(name) => ("screen_name".to_string(), name.clone()),
    }
}

/// Comma-joined `user_id` and `screen_name` parameters for bulk endpoints
fn users_params(users: &[UserRef]) -> Params {
    let mut ids = Vec::new();
    let mut names = Vec::new();
    for user in users {
        match user {
            UserRef::Id(id) => ids.push(id.to_string()),
            UserRef::ScreenName(name) => names.push(name.as_str()),
        }
    }

    let mut params = Vec::new();
    if !ids.is_empty() {
        params.push(("user_id".to_string(), ids.join(",")));
    }
    if !names.is_empty() {
        params.push(("screen_name".to_string(), names.join(",")));
    }
    params
}

/// `source_*` and `target_*` parameters of `friendships/show`
fn friendship_params(source: &UserRef, target: &UserRef) -> Params {
    [("source", source), ("target", target)]
        .into_iter()
        .map(|(side, user)| match user {
            UserRef::Id(id) => (format!("{side}_id"), id.to_string()),
            UserRef::ScreenName(name) => (format!("{side}_screen_name"), name.clone()),
        })
        .collect()
}

fn list_params(list: &ListRef) -> Params {
    let owner = match &list.owner {
        UserRef::Id(id) => ("owner_id".to_string(), id.to_string()),
        UserRef::ScreenName(name) => ("owner_screen_name".to_string(), name.clone()),
    };
    vec![owner, ("slug".to_string(), list.slug.clone())]
}

fn cursor_param(cursor: i64) -> (String, String) {
    ("cursor".to_string(), cursor.to_string())
}

#[async_trait]
impl TwitterClient for RestClient {
    async fn home_timeline(&self, window: CountWindow) -> Result<Vec<Tweet>> {
        self.get("statuses/home_timeline", window_params(window)).await
    }

    async fn mentions(&self, window: CountWindow) -> Result<Vec<Tweet>> {
        self.get("statuses/mentions_timeline", window_params(window))
            .await
    }

    async fn user_timeline(&self, user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>> {
        let mut params = window_params(window);
        params.push(user_param(user));
        self.get("statuses/user_timeline", params).await
    }

    async fn retweeted_by(&self, user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>> {
        let mut params = window_params(window);
        params.push(user_param(user));
        self.get("statuses/retweeted_by_user", params).await
    }

    async fn favorites(&self, user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>> {
        let mut params = window_params(window);
        params.push(user_param(user));
        self.get("favorites/list", params).await
    }

    async fn list_timeline(&self, list: &ListRef, window: CountWindow) -> Result<Vec<Tweet>> {
        let mut params = window_params(window);
        params.extend(list_params(list));
        self.get("lists/statuses", params).await
    }

    async fn direct_messages(&self, window: CountWindow) -> Result<Vec<DirectMessage>> {
        self.get("direct_messages", window_params(window)).await
    }

    async fn direct_messages_sent(&self, window: CountWindow) -> Result<Vec<DirectMessage>> {
        self.get("direct_messages/sent", window_params(window))
            .await
    }

    async fn search(&self, query: &str, window: CountWindow) -> Result<Vec<Tweet>> {
        let mut params = window_params(window);
        params.push(("q".to_string(), query.to_string()));
        params.push(("result_type".to_string(), "recent".to_string()));
        let results: SearchResults = self.get("search/tweets", params).await?;
        Ok(results.statuses)
    }

    async fn friend_ids(&self, user: &UserRef, cursor: i64) -> Result<CursorPage<u64>> {
        let page: IdsPage = self
            .get("friends/ids", vec![user_param(user), cursor_param(cursor)])
            .await?;
        Ok(CursorPage::new(page.ids, page.next_cursor))
    }

    async fn follower_ids(&self, user: &UserRef, cursor: i64) -> Result<CursorPage<u64>> {
        let page: IdsPage = self
            .get("followers/ids", vec![user_param(user), cursor_param(cursor)])
            .await?;
        Ok(CursorPage::new(page.ids, page.next_cursor))
    }

    async fn lists(&self, user: &UserRef, cursor: i64) -> Result<CursorPage<List>> {
        let page: ListsPage = self
            .get("lists/ownerships", vec![user_param(user), cursor_param(cursor)])
            .await?;
        Ok(CursorPage::new(page.lists, page.next_cursor))
    }

    async fn list_members(&self, list: &ListRef, cursor: i64) -> Result<CursorPage<User>> {
        let mut params = list_params(list);
        params.push(cursor_param(cursor));
        let page: UsersPage = self.get("lists/members", params).await?;
        Ok(CursorPage::new(page.users, page.next_cursor))
    }

    async fn users(&self, users: &[UserRef]) -> Result<Vec<User>> {
        if users.is_empty() {
            return Ok(Vec::new());
        }
        self.get("users/lookup", users_params(users)).await
    }

    async fn user(&self, user: &UserRef) -> Result<User> {
        self.get("users/show", vec![user_param(user)]).await
    }

    async fn follow(&self, users: &[UserRef]) -> Result<Vec<User>> {
        self.each_friendship("friendships/create", users).await
    }

    async fn unfollow(&self, users: &[UserRef]) -> Result<Vec<User>> {
        self.each_friendship("friendships/destroy", users).await
    }

    async fn friendship(&self, source: &UserRef, target: &UserRef) -> Result<bool> {
        let show: FriendshipShow = self
            .get("friendships/show", friendship_params(source, target))
            .await?;
        Ok(show.relationship.source.following)
    }

    async fn list(&self, list: &ListRef) -> Result<List> {
        self.get("lists/show", list_params(list)).await
    }

    async fn list_member(&self, list: &ListRef, user: &UserRef) -> Result<bool> {
        let mut params = list_params(list);
        params.push(user_param(user));
        match self.get::<User>("lists/members/show", params).await {
            Ok(_) => Ok(true),
            // Non-members come back as "not found"
            Err(Error::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_add_members(&self, list: &ListRef, users: &[UserRef]) -> Result<()> {
        let mut params = list_params(list);
        params.extend(users_params(users));
        self.post("lists/members/create_all", params).await
    }

    async fn list_remove_members(&self, list: &ListRef, users: &[UserRef]) -> Result<()> {
        let mut params = list_params(list);
        params.extend(users_params(users));
        self.post("lists/members/destroy_all", params).await
    }
}
