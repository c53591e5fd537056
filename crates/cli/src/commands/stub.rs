//! In-memory client for command tests

use std::sync::Mutex;

use async_trait::async_trait;

use tw_core::{
    CountWindow, CursorPage, DirectMessage, Error, HasId, List, ListRef, Result, Tweet,
    TwitterClient, User, UserRef,
};

/// Serves canned records; windows are honored the way the API does
#[derive(Default)]
pub struct StubClient {
    /// Newest first
    pub tweets: Vec<Tweet>,
    pub messages: Vec<DirectMessage>,
    pub friend_ids: Vec<u64>,
    pub follower_ids: Vec<u64>,
    pub lists: Vec<List>,
    pub members: Vec<User>,
    /// Accounts known to `users/lookup`
    pub users: Vec<User>,
    /// Answer of `friendships/show`
    pub follows: bool,
    /// Answer of `lists/members/show`
    pub contains: bool,
    /// Size of every membership or follow batch received, in call order
    pub membership_batches: Mutex<Vec<usize>>,
    /// Every window requested, in call order
    pub windows: Mutex<Vec<CountWindow>>,
}

impl StubClient {
    fn window<T: HasId + Clone>(&self, items: &[T], window: CountWindow) -> Vec<T> {
        if let Ok(mut windows) = self.windows.lock() {
            windows.push(window);
        }
        items
            .iter()
            .filter(|item| window.max_id.is_none_or(|max_id| item.id() <= max_id))
            .take(window.count)
            .cloned()
            .collect()
    }

    fn find_user(&self, wanted: &UserRef) -> Option<&User> {
        self.users.iter().find(|user| match wanted {
            UserRef::Id(id) => user.id == *id,
            UserRef::ScreenName(name) => user.screen_name.eq_ignore_ascii_case(name),
        })
    }

    /// Accounts acted on by a follow batch; unknown accounts are made up
    fn befriend(&self, users: &[UserRef]) -> Vec<User> {
        self.record_batch(users.len());
        users
            .iter()
            .map(|wanted| match (self.find_user(wanted), wanted) {
                (Some(found), _) => found.clone(),
                (None, UserRef::Id(id)) => user(*id, &format!("user{id}")),
                (None, UserRef::ScreenName(name)) => user(0, name),
            })
            .collect()
    }

    fn record_batch(&self, size: usize) {
        if let Ok(mut batches) = self.membership_batches.lock() {
            batches.push(size);
        }
    }
}

pub fn tweet(id: u64, screen_name: &str, text: &str) -> Tweet {
    Tweet {
        id,
        created_at: "Wed Aug 27 13:08:45 +0000 2008".to_string(),
        text: text.to_string(),
        user: Some(Box::new(user(id % 1000, screen_name))),
    }
}

pub fn user(id: u64, screen_name: &str) -> User {
    User {
        id,
        screen_name: screen_name.to_string(),
        ..Default::default()
    }
}

#[async_trait]
impl TwitterClient for StubClient {
    async fn home_timeline(&self, window: CountWindow) -> Result<Vec<Tweet>> {
        Ok(self.window(&self.tweets, window))
    }

    async fn mentions(&self, window: CountWindow) -> Result<Vec<Tweet>> {
        Ok(self.window(&self.tweets, window))
    }

    async fn user_timeline(&self, _user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>> {
        Ok(self.window(&self.tweets, window))
    }

    async fn retweeted_by(&self, _user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>> {
        Ok(self.window(&self.tweets, window))
    }

    async fn favorites(&self, _user: &UserRef, window: CountWindow) -> Result<Vec<Tweet>> {
        Ok(self.window(&self.tweets, window))
    }

    async fn list_timeline(&self, _list: &ListRef, window: CountWindow) -> Result<Vec<Tweet>> {
        Ok(self.window(&self.tweets, window))
    }

    async fn direct_messages(&self, window: CountWindow) -> Result<Vec<DirectMessage>> {
        Ok(self.window(&self.messages, window))
    }

    async fn direct_messages_sent(&self, window: CountWindow) -> Result<Vec<DirectMessage>> {
        Ok(self.window(&self.messages, window))
    }

    async fn search(&self, _query: &str, window: CountWindow) -> Result<Vec<Tweet>> {
        Ok(self.window(&self.tweets, window))
    }

    async fn friend_ids(&self, _user: &UserRef, _cursor: i64) -> Result<CursorPage<u64>> {
        Ok(CursorPage::new(self.friend_ids.clone(), 0))
    }

    async fn follower_ids(&self, _user: &UserRef, _cursor: i64) -> Result<CursorPage<u64>> {
        Ok(CursorPage::new(self.follower_ids.clone(), 0))
    }

    async fn lists(&self, _user: &UserRef, _cursor: i64) -> Result<CursorPage<List>> {
        Ok(CursorPage::new(self.lists.clone(), 0))
    }

    async fn list_members(&self, _list: &ListRef, _cursor: i64) -> Result<CursorPage<User>> {
        Ok(CursorPage::new(self.members.clone(), 0))
    }

    async fn users(&self, users: &[UserRef]) -> Result<Vec<User>> {
        Ok(users
            .iter()
            .filter_map(|wanted| self.find_user(wanted))
            .cloned()
            .collect())
    }

    async fn user(&self, user: &UserRef) -> Result<User> {
        self.find_user(user)
            .cloned()
            .ok_or_else(|| Error::NotFound("User not found.".to_string()))
    }

    async fn follow(&self, users: &[UserRef]) -> Result<Vec<User>> {
        Ok(self.befriend(users))
    }

    async fn unfollow(&self, users: &[UserRef]) -> Result<Vec<User>> {
        Ok(self.befriend(users))
    }

    async fn friendship(&self, _source: &UserRef, _target: &UserRef) -> Result<bool> {
        Ok(self.follows)
    }

    async fn list(&self, _list: &ListRef) -> Result<List> {
        self.lists
            .first()
            .cloned()
            .ok_or_else(|| Error::NotFound("Sorry, that page does not exist".to_string()))
    }

    async fn list_member(&self, _list: &ListRef, _user: &UserRef) -> Result<bool> {
        Ok(self.contains)
    }

    async fn list_add_members(&self, _list: &ListRef, users: &[UserRef]) -> Result<()> {
        self.record_batch(users.len());
        Ok(())
    }

    async fn list_remove_members(&self, _list: &ListRef, users: &[UserRef]) -> Result<()> {
        self.record_batch(users.len());
        Ok(())
    }
}
