//! Follow-graph and user lookup commands
//!
//! `followings` and `followers` drain one id collection; `friends`,
//! `leaders` and `groupies` fetch both sides of the graph concurrently and
//! combine them. Every command finishes with a batched user lookup. `whois`
//! shows every detail of a single account.

use clap::Args;

use tw_core::graph::{follower_ids, following_ids, lookup_user_ids, lookup_users, relationship_ids};
use tw_core::{Relationship, Result, User, UserRef};

use super::{Globals, Session, connect, fail};
use crate::exit_code::ExitCode;
use crate::output::records::{UserSortArgs, print_user_details, print_users};
use crate::output::{Formatter, Layout};

/// Display options shared by commands printing users
#[derive(Args, Debug, Clone, Default)]
pub struct UserListArgs {
    /// Output in CSV format
    #[arg(short, long)]
    pub csv: bool,

    /// Output in long format
    #[arg(short, long)]
    pub long: bool,

    #[command(flatten)]
    pub sort: UserSortArgs,
}

impl UserListArgs {
    pub fn layout(&self) -> Layout {
        Layout::from_flags(self.long, self.csv)
    }
}

/// Arguments for the follow-graph commands
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Screen name (or id with `--id`); defaults to you
    pub user: Option<String>,

    /// Specify user via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    #[command(flatten)]
    pub display: UserListArgs,
}

/// Arguments for `users`
#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Screen names (or ids with `--id`)
    #[arg(required = true)]
    pub users: Vec<String>,

    /// Specify users via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    #[command(flatten)]
    pub display: UserListArgs,
}

/// Arguments for `whois`
#[derive(Args, Debug)]
pub struct WhoisArgs {
    /// Screen name (or id with `--id`)
    pub user: String,

    /// Specify user via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    /// Output in CSV format
    #[arg(short, long)]
    pub csv: bool,
}

/// Which part of a user's follow graph to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Graph {
    /// Accounts the user follows
    Followings,
    /// Accounts following the user
    Followers,
    Related(Relationship),
}

/// Ids in the requested part of the graph
pub async fn fetch_graph_ids(session: &Session, graph: Graph, user: &UserRef) -> Result<Vec<u64>> {
    let client = session.client();
    match graph {
        Graph::Followings => following_ids(client, user, &session.policy).await,
        Graph::Followers => follower_ids(client, user, &session.policy).await,
        Graph::Related(relationship) => {
            relationship_ids(client, user, relationship, &session.policy).await
        }
    }
}

/// Full user objects for the requested part of the graph
pub async fn fetch_graph_users(session: &Session, graph: Graph, user: &UserRef) -> Result<Vec<User>> {
    let ids = fetch_graph_ids(session, graph, user).await?;
    tracing::debug!(?graph, ids = ids.len(), "Looking up graph members");
    lookup_user_ids(session.client(), &ids, &session.policy).await
}

fn show_users(formatter: &Formatter, display: &UserListArgs, mut users: Vec<User>) -> ExitCode {
    display.sort.apply(&mut users);
    print_users(formatter, display.layout(), &users);
    ExitCode::Success
}

/// `followings`, `followers`, `friends`, `leaders` and `groupies`
pub async fn execute_graph(args: GraphArgs, graph: Graph, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let user = match session.subject(args.user.as_deref(), args.id) {
        Ok(user) => user,
        Err(e) => return fail(&formatter, "Invalid user", &e),
    };

    match fetch_graph_users(&session, graph, &user).await {
        Ok(users) => show_users(&formatter, &args.display, users),
        Err(e) => fail(&formatter, "Failed to fetch users", &e),
    }
}

/// `users USER...`
pub async fn execute_users(args: UsersArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let refs = match session.subjects(&args.users, args.id) {
        Ok(refs) => refs,
        Err(e) => return fail(&formatter, "Invalid user", &e),
    };

    match lookup_users(session.client(), &refs, &session.policy).await {
        Ok(users) => show_users(&formatter, &args.display, users),
        Err(e) => fail(&formatter, "Failed to fetch users", &e),
    }
}

/// Full profile of one account
pub async fn fetch_user(session: &Session, user: &UserRef) -> Result<User> {
    let client = session.client();
    session.policy.run(|| client.user(user)).await
}

/// `whois USER`
pub async fn execute_whois(args: WhoisArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let user = match UserRef::parse(&args.user, args.id) {
        Ok(user) => user,
        Err(e) => return fail(&formatter, "Invalid user", &e),
    };

    match fetch_user(&session, &user).await {
        Ok(user) => {
            print_user_details(&formatter, args.csv, &user);
            ExitCode::Success
        }
        Err(e) => fail(&formatter, "Failed to fetch user", &e),
    }
}
