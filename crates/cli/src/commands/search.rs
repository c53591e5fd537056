//! Search commands
//!
//! `search all` asks the search endpoint directly. The other subcommands
//! drain one of the tweet feeds backwards by `max_id` and keep the tweets
//! whose text matches QUERY as a case-insensitive regular expression.

use clap::{Args, Subcommand};
use regex::{Regex, RegexBuilder};

use tw_core::{
    Error, ListRef, MAX_NUM_RESULTS, MAX_SEARCH_RESULTS, Result, Tweet, UserRef,
    collect_with_count, collect_with_max_id,
};

use super::timeline::{Feed, TweetListArgs};
use super::{Globals, Session, connect, fail};
use crate::exit_code::ExitCode;
use crate::output::records::print_tweets;
use crate::output::{Formatter, Layout};

/// Search through tweets
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub command: SearchCommands,
}

#[derive(Subcommand, Debug)]
pub enum SearchCommands {
    /// Most recent tweets matching a query
    All(SearchAllArgs),

    /// Tweets you favorited that match a query
    Favorites(FilterArgs),

    /// Tweets mentioning you that match a query
    Mentions(FilterArgs),

    /// Tweets in your home timeline that match a query
    Timeline(FilterArgs),

    /// Tweets posted by a user that match a query
    User(UserFilterArgs),

    /// Tweets on a list that match a query
    List(ListFilterArgs),
}

#[derive(Args, Debug)]
pub struct SearchAllArgs {
    /// Search query
    pub query: String,

    #[command(flatten)]
    pub display: TweetListArgs,
}

/// Display flags of the filtering subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterDisplay {
    /// Output in CSV format
    #[arg(short, long)]
    pub csv: bool,

    /// Output in long format
    #[arg(short, long)]
    pub long: bool,
}

impl FilterDisplay {
    pub fn layout(&self) -> Layout {
        Layout::from_flags(self.long, self.csv)
    }
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Regular expression matched against tweet text, ignoring case
    pub query: String,

    #[command(flatten)]
    pub display: FilterDisplay,
}

#[derive(Args, Debug)]
pub struct UserFilterArgs {
    /// Screen name (or id with `--id`)
    pub user: String,

    /// Regular expression matched against tweet text, ignoring case
    pub query: String,

    /// Specify user via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    #[command(flatten)]
    pub display: FilterDisplay,
}

#[derive(Args, Debug)]
pub struct ListFilterArgs {
    /// List slug, optionally prefixed with `OWNER/`
    pub list: String,

    /// Regular expression matched against tweet text, ignoring case
    pub query: String,

    /// Specify the owner via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    #[command(flatten)]
    pub display: FilterDisplay,
}

/// Compile a search query into a case-insensitive pattern
pub fn query_pattern(query: &str) -> Result<Regex> {
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::InvalidArgument(format!("Invalid search query '{query}': {e}")))
}

/// The newest `count` tweets the search endpoint returns for `query`
pub async fn search_all(session: &Session, query: &str, count: usize) -> Result<Vec<Tweet>> {
    let client = session.client();
    collect_with_count(count, MAX_SEARCH_RESULTS, &session.policy, |window| async move {
        client.search(query, window).await
    })
    .await
}

/// Every tweet of `feed` the API still serves whose text matches `pattern`
pub async fn search_feed(session: &Session, feed: &Feed, pattern: &Regex) -> Result<Vec<Tweet>> {
    let client = session.client();
    let tweets = collect_with_max_id(MAX_NUM_RESULTS, &session.policy, |window| async move {
        match feed {
            Feed::Home => client.home_timeline(window).await,
            Feed::Mentions => client.mentions(window).await,
            Feed::User(user) => client.user_timeline(user, window).await,
            Feed::Favorites(user) => client.favorites(user, window).await,
            Feed::Retweets(user) => client.retweeted_by(user, window).await,
            Feed::List(list) => client.list_timeline(list, window).await,
        }
    })
    .await?;

    let scanned = tweets.len();
    let matched: Vec<Tweet> = tweets
        .into_iter()
        .filter(|tweet| pattern.is_match(&tweet.text))
        .collect();
    tracing::debug!(?feed, scanned, matched = matched.len(), "Filtered feed");
    Ok(matched)
}

pub async fn execute(args: SearchArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let (feed, query, display) = match args.command {
        SearchCommands::All(args) => {
            return match search_all(&session, &args.query, args.display.count()).await {
                Ok(mut tweets) => {
                    if args.display.reverse {
                        tweets.reverse();
                    }
                    print_tweets(&formatter, args.display.layout(), &tweets);
                    ExitCode::Success
                }
                Err(e) => fail(&formatter, "Search failed", &e),
            };
        }
        SearchCommands::Favorites(args) => (Feed::Favorites(session.me()), args.query, args.display),
        SearchCommands::Mentions(args) => (Feed::Mentions, args.query, args.display),
        SearchCommands::Timeline(args) => (Feed::Home, args.query, args.display),
        SearchCommands::User(args) => match UserRef::parse(&args.user, args.id) {
            Ok(user) => (Feed::User(user), args.query, args.display),
            Err(e) => return fail(&formatter, "Invalid user", &e),
        },
        SearchCommands::List(args) => match ListRef::parse(&args.list, args.id, &session.username) {
            Ok(list) => (Feed::List(list), args.query, args.display),
            Err(e) => return fail(&formatter, "Invalid list", &e),
        },
    };

    show_matches(&session, &feed, &query, &display, &formatter).await
}

async fn show_matches(
    session: &Session,
    feed: &Feed,
    query: &str,
    display: &FilterDisplay,
    formatter: &Formatter,
) -> ExitCode {
    let pattern = match query_pattern(query) {
        Ok(pattern) => pattern,
        Err(e) => return fail(formatter, "Search failed", &e),
    };

    match search_feed(session, feed, &pattern).await {
        Ok(tweets) => {
            print_tweets(formatter, display.layout(), &tweets);
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Search failed", &e),
    }
}
