//! Timeline commands
//!
//! `timeline`, `mentions`, `favorites`, `retweets` and the two direct message
//! commands all page backwards through a count-windowed endpoint until `--number`
//! items are in hand.

use clap::Args;

use tw_core::{
    DEFAULT_NUM_RESULTS, DirectMessage, ListRef, MAX_NUM_RESULTS, Result, Tweet, UserRef,
    collect_with_count,
};

use super::{Globals, Session, connect, fail, result_count};
use crate::exit_code::ExitCode;
use crate::output::records::{Counterpart, print_direct_messages, print_tweets};
use crate::output::{Formatter, Layout};

/// Display options shared by commands printing tweets or messages
#[derive(Args, Debug, Clone)]
pub struct TweetListArgs {
    /// Output in CSV format
    #[arg(short, long)]
    pub csv: bool,

    /// Output in long format
    #[arg(short, long)]
    pub long: bool,

    /// Limit the number of results
    #[arg(short, long, default_value_t = DEFAULT_NUM_RESULTS as i64, allow_negative_numbers = true)]
    pub number: i64,

    /// Reverse the order of the results
    #[arg(short, long)]
    pub reverse: bool,
}

impl Default for TweetListArgs {
    fn default() -> Self {
        Self {
            csv: false,
            long: false,
            number: DEFAULT_NUM_RESULTS as i64,
            reverse: false,
        }
    }
}

impl TweetListArgs {
    pub fn layout(&self) -> Layout {
        Layout::from_flags(self.long, self.csv)
    }

    pub fn count(&self) -> usize {
        result_count(self.number)
    }
}

/// Arguments for `timeline`, `favorites` and `retweets`
#[derive(Args, Debug)]
pub struct UserTimelineArgs {
    /// Screen name (or id with `--id`); defaults to you
    pub user: Option<String>,

    /// Specify user via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    #[command(flatten)]
    pub display: TweetListArgs,
}

/// Source of a count-windowed tweet listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Home,
    Mentions,
    User(UserRef),
    Favorites(UserRef),
    Retweets(UserRef),
    List(ListRef),
}

/// The newest `count` tweets of a feed, newest first
pub async fn fetch_tweets(session: &Session, feed: &Feed, count: usize) -> Result<Vec<Tweet>> {
    let client = session.client();
    collect_with_count(count, MAX_NUM_RESULTS, &session.policy, |window| async move {
        match feed {
            Feed::Home => client.home_timeline(window).await,
            Feed::Mentions => client.mentions(window).await,
            Feed::User(user) => client.user_timeline(user, window).await,
            Feed::Favorites(user) => client.favorites(user, window).await,
            Feed::Retweets(user) => client.retweeted_by(user, window).await,
            Feed::List(list) => client.list_timeline(list, window).await,
        }
    })
    .await
}

/// The newest `count` direct messages received, or sent when `sent` is set
pub async fn fetch_direct_messages(
    session: &Session,
    sent: bool,
    count: usize,
) -> Result<Vec<DirectMessage>> {
    let client = session.client();
    collect_with_count(count, MAX_NUM_RESULTS, &session.policy, |window| async move {
        if sent {
            client.direct_messages_sent(window).await
        } else {
            client.direct_messages(window).await
        }
    })
    .await
}

/// Fetch a feed and print it
pub async fn show_feed(
    session: &Session,
    feed: Feed,
    display: &TweetListArgs,
    formatter: &Formatter,
) -> ExitCode {
    match fetch_tweets(session, &feed, display.count()).await {
        Ok(mut tweets) => {
            if display.reverse {
                tweets.reverse();
            }
            print_tweets(formatter, display.layout(), &tweets);
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Failed to fetch tweets", &e),
    }
}

/// `timeline [USER]`: your home timeline, or the tweets of USER
pub async fn execute_timeline(args: UserTimelineArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let feed = match args.user.as_deref() {
        None => Feed::Home,
        Some(user) => match UserRef::parse(user, args.id) {
            Ok(user) => Feed::User(user),
            Err(e) => return fail(&formatter, "Invalid user", &e),
        },
    };
    show_feed(&session, feed, &args.display, &formatter).await
}

/// `mentions`: tweets mentioning you
pub async fn execute_mentions(args: TweetListArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };
    show_feed(&session, Feed::Mentions, &args, &formatter).await
}

/// `favorites [USER]`: tweets favorited by you or USER
pub async fn execute_favorites(args: UserTimelineArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let user = match session.subject(args.user.as_deref(), args.id) {
        Ok(user) => user,
        Err(e) => return fail(&formatter, "Invalid user", &e),
    };
    show_feed(&session, Feed::Favorites(user), &args.display, &formatter).await
}

/// `retweets [USER]`: retweets posted by you or USER
pub async fn execute_retweets(args: UserTimelineArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let user = match session.subject(args.user.as_deref(), args.id) {
        Ok(user) => user,
        Err(e) => return fail(&formatter, "Invalid user", &e),
    };
    show_feed(&session, Feed::Retweets(user), &args.display, &formatter).await
}

/// `direct-messages` and `direct-messages-sent`
pub async fn execute_direct_messages(args: TweetListArgs, sent: bool, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    match fetch_direct_messages(&session, sent, args.count()).await {
        Ok(mut messages) => {
            if args.reverse {
                messages.reverse();
            }
            let counterpart = if sent {
                Counterpart::Recipient
            } else {
                Counterpart::Sender
            };
            print_direct_messages(&formatter, args.layout(), &messages, counterpart);
            ExitCode::Success
        }
        Err(e) => fail(&formatter, "Failed to fetch direct messages", &e),
    }
}
