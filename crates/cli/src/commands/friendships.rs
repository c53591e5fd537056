//! Following and unfollowing accounts
//!
//! `follow` and `unfollow` accept any number of accounts; they are sent in
//! batches of at most 100, all batches in flight at once. `does-follow`
//! answers through its exit status as well as the printed sentence.

use clap::Args;
use serde::Serialize;

use tw_core::graph::{follow_users, screen_name_of, unfollow_users};
use tw_core::{Result, User, UserRef, fan_out};

use super::{Globals, Session, connect, fail, pluralize};
use crate::exit_code::ExitCode;

/// Arguments for `follow` and `unfollow`
#[derive(Args, Debug)]
pub struct FollowArgs {
    /// Screen names (or ids with `--id`)
    #[arg(required = true)]
    pub users: Vec<String>,

    /// Specify users via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,
}

/// Arguments for `does-follow`
#[derive(Args, Debug)]
pub struct DoesFollowArgs {
    /// Screen name (or id with `--id`) of the follower
    pub user: String,

    /// Screen name (or id with `--id`) of the account followed; defaults to you
    pub target: Option<String>,

    /// Specify users via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,
}

/// Direction of a follow change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Follow {
    Start,
    Stop,
}

impl Follow {
    fn verb(self) -> &'static str {
        match self {
            Follow::Start => "followed",
            Follow::Stop => "unfollowed",
        }
    }

    fn summary(self, username: &str, count: usize) -> String {
        match self {
            Follow::Start => format!(
                "@{username} is now following {}.",
                pluralize(count, "more user")
            ),
            Follow::Stop => format!(
                "@{username} is no longer following {}.",
                pluralize(count, "user")
            ),
        }
    }

    fn undo_hint(self, users: &[User]) -> String {
        let names = users
            .iter()
            .map(|user| format!("@{}", user.screen_name))
            .collect::<Vec<_>>()
            .join(" ");
        match self {
            Follow::Start => format!("Run `t unfollow {names}` to stop."),
            Follow::Stop => format!("Run `t follow {names}` to follow again."),
        }
    }
}

#[derive(Debug, Serialize)]
struct FollowOutput {
    success: bool,
    action: &'static str,
    users: Vec<String>,
}

/// Answer of `does-follow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowCheck {
    pub source: String,
    pub target: String,
    pub follows: bool,
}

impl FollowCheck {
    fn sentence(&self) -> String {
        if self.follows {
            format!("Yes, @{} follows @{}.", self.source, self.target)
        } else {
            format!("No, @{} does not follow @{}.", self.source, self.target)
        }
    }
}

/// Apply a follow change; returns the accounts acted on
pub async fn change_following(session: &Session, users: &[UserRef], follow: Follow) -> Result<Vec<User>> {
    match follow {
        Follow::Start => follow_users(session.client(), users, &session.policy).await,
        Follow::Stop => unfollow_users(session.client(), users, &session.policy).await,
    }
}

/// Whether `source` follows `target`, with both screen names resolved
pub async fn check_follows(session: &Session, source: &UserRef, target: &UserRef) -> Result<FollowCheck> {
    let client = session.client();
    let (source_name, target_name) = fan_out(
        screen_name_of(client, source, &session.policy),
        screen_name_of(client, target, &session.policy),
    )
    .await?;
    let follows = session
        .policy
        .run(|| client.friendship(source, target))
        .await?;

    Ok(FollowCheck {
        source: source_name,
        target: target_name,
        follows,
    })
}

/// `follow USER...` and `unfollow USER...`
pub async fn execute_follow(args: FollowArgs, follow: Follow, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let refs = match session.subjects(&args.users, args.id) {
        Ok(refs) => refs,
        Err(e) => return fail(&formatter, "Invalid user", &e),
    };

    let users = match change_following(&session, &refs, follow).await {
        Ok(users) => users,
        Err(e) => return fail(&formatter, "Failed to update followings", &e),
    };

    if formatter.is_json() {
        formatter.json(&FollowOutput {
            success: true,
            action: follow.verb(),
            users: users.iter().map(|user| user.screen_name.clone()).collect(),
        });
        return ExitCode::Success;
    }

    formatter.println(&follow.summary(&session.username, users.len()));
    formatter.println("");
    formatter.println(&follow.undo_hint(&users));
    ExitCode::Success
}

/// `does-follow USER [USER]`
pub async fn execute_does_follow(args: DoesFollowArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let (source, target) = match UserRef::parse(&args.user, args.id)
        .and_then(|source| Ok((source, session.subject(args.target.as_deref(), args.id)?)))
    {
        Ok(pair) => pair,
        Err(e) => return fail(&formatter, "Invalid user", &e),
    };

    let check = match check_follows(&session, &source, &target).await {
        Ok(check) => check,
        Err(e) => return fail(&formatter, "Failed to look up friendship", &e),
    };

    if formatter.is_json() {
        formatter.json(&check);
    } else {
        formatter.println(&check.sentence());
    }

    if check.follows {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    }
}
