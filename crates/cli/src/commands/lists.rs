//! List commands
//!
//! `lists` shows the lists a user owns; `list` manages and reads one list and
//! `does-contain` checks a single membership. Membership changes are sent in
//! batches of at most 100 accounts, all batches in flight at once.

use clap::{Args, Subcommand};
use serde::Serialize;

use tw_core::graph::{add_list_members, list_members, remove_list_members, screen_name_of};
use tw_core::{List, ListRef, Result, UserRef, collect_with_cursor, fan_out};

use super::relationships::UserListArgs;
use super::timeline::{Feed, TweetListArgs, show_feed};
use super::{Globals, Session, connect, fail, pluralize};
use crate::exit_code::ExitCode;
use crate::output::records::{ListSortArgs, print_list_details, print_lists, print_users};
use crate::output::{Formatter, Layout};

/// Arguments for `lists`
#[derive(Args, Debug)]
pub struct ListsArgs {
    /// Screen name (or id with `--id`) of the owner; defaults to you
    pub user: Option<String>,

    /// Specify user via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    /// Output in CSV format
    #[arg(short, long)]
    pub csv: bool,

    /// Output in long format
    #[arg(short, long)]
    pub long: bool,

    #[command(flatten)]
    pub sort: ListSortArgs,
}

/// Manage and read a single list
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: ListCommands,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Add members to a list
    Add(MembershipArgs),

    /// Remove members from a list
    Remove(MembershipArgs),

    /// Show the members of a list
    Members(MembersArgs),

    /// Show the tweet timeline of a list
    Timeline(ListTimelineArgs),

    /// Show details of a list
    #[command(alias = "details")]
    Information(ListInfoArgs),
}

#[derive(Args, Debug)]
pub struct MembershipArgs {
    /// List slug, optionally prefixed with `OWNER/`
    pub list: String,

    /// Screen names (or ids with `--id`)
    #[arg(required = true)]
    pub users: Vec<String>,

    /// Specify users via ID instead of screen name (the list owner stays a screen name)
    #[arg(short, long)]
    pub id: bool,
}

#[derive(Args, Debug)]
pub struct MembersArgs {
    /// List slug, optionally prefixed with `OWNER/`
    pub list: String,

    /// Specify the owner via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    #[command(flatten)]
    pub display: UserListArgs,
}

#[derive(Args, Debug)]
pub struct ListTimelineArgs {
    /// List slug, optionally prefixed with `OWNER/`
    pub list: String,

    /// Specify the owner via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    #[command(flatten)]
    pub display: TweetListArgs,
}

#[derive(Args, Debug)]
pub struct ListInfoArgs {
    /// List slug, optionally prefixed with `OWNER/`
    pub list: String,

    /// Specify the owner via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,

    /// Output in CSV format
    #[arg(short, long)]
    pub csv: bool,
}

/// Arguments for `does-contain`
#[derive(Args, Debug)]
pub struct DoesContainArgs {
    /// List slug, optionally prefixed with `OWNER/`
    pub list: String,

    /// Screen name (or id with `--id`); defaults to you
    pub user: Option<String>,

    /// Specify the owner and user via ID instead of screen name
    #[arg(short, long)]
    pub id: bool,
}

/// Answer of `does-contain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainsCheck {
    pub owner: String,
    pub slug: String,
    pub user: String,
    pub member: bool,
}

impl ContainsCheck {
    fn sentence(&self) -> String {
        if self.member {
            format!("Yes, @{}/{} contains @{}.", self.owner, self.slug, self.user)
        } else {
            format!("No, @{}/{} does not contain @{}.", self.owner, self.slug, self.user)
        }
    }
}

#[derive(Debug, Serialize)]
struct MembershipOutput {
    success: bool,
    list: String,
    action: &'static str,
    count: usize,
}

/// Direction of a membership change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Add,
    Remove,
}

impl Membership {
    fn verb(self) -> &'static str {
        match self {
            Membership::Add => "added",
            Membership::Remove => "removed",
        }
    }

    fn preposition(self) -> &'static str {
        match self {
            Membership::Add => "to",
            Membership::Remove => "from",
        }
    }

    fn undo(self) -> &'static str {
        match self {
            Membership::Add => "remove",
            Membership::Remove => "add",
        }
    }
}

/// Every list owned by `user`
pub async fn fetch_lists(session: &Session, user: &UserRef) -> Result<Vec<List>> {
    let client = session.client();
    collect_with_cursor(&session.policy, |cursor| client.lists(user, cursor)).await
}

/// Details of one list
pub async fn fetch_list(session: &Session, list: &ListRef) -> Result<List> {
    let client = session.client();
    session.policy.run(|| client.list(list)).await
}

/// Whether `user` is a member of `list`, with owner and user names resolved
pub async fn check_contains(session: &Session, list: &ListRef, user: &UserRef) -> Result<ContainsCheck> {
    let client = session.client();
    let (owner, name) = fan_out(
        screen_name_of(client, &list.owner, &session.policy),
        screen_name_of(client, user, &session.policy),
    )
    .await?;
    let member = session
        .policy
        .run(|| client.list_member(list, user))
        .await?;

    Ok(ContainsCheck {
        owner,
        slug: list.slug.clone(),
        user: name,
        member,
    })
}

/// Apply a membership change; returns the number of accounts sent
pub async fn change_membership(
    session: &Session,
    list: &ListRef,
    users: &[UserRef],
    membership: Membership,
) -> Result<usize> {
    match membership {
        Membership::Add => add_list_members(session.client(), list, users, &session.policy).await,
        Membership::Remove => {
            remove_list_members(session.client(), list, users, &session.policy).await
        }
    }
}

/// `lists [USER]`
pub async fn execute_lists(args: ListsArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let user = match session.subject(args.user.as_deref(), args.id) {
        Ok(user) => user,
        Err(e) => return fail(&formatter, "Invalid user", &e),
    };

    match fetch_lists(&session, &user).await {
        Ok(mut lists) => {
            args.sort.apply(&mut lists);
            print_lists(&formatter, Layout::from_flags(args.long, args.csv), &lists);
            ExitCode::Success
        }
        Err(e) => fail(&formatter, "Failed to fetch lists", &e),
    }
}

/// `does-contain [OWNER/]LIST [USER]`
pub async fn execute_does_contain(args: DoesContainArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let (list, user) = match ListRef::parse(&args.list, args.id, &session.username)
        .and_then(|list| Ok((list, session.subject(args.user.as_deref(), args.id)?)))
    {
        Ok(pair) => pair,
        Err(e) => return fail(&formatter, "Invalid argument", &e),
    };

    let check = match check_contains(&session, &list, &user).await {
        Ok(check) => check,
        Err(e) => return fail(&formatter, "Failed to look up list membership", &e),
    };

    if formatter.is_json() {
        formatter.json(&check);
    } else {
        formatter.println(&check.sentence());
    }

    if check.member {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    }
}

/// `list add|remove|members|timeline|information`
pub async fn execute_list(args: ListArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let session = match connect(globals, &formatter) {
        Ok(session) => session,
        Err(code) => return code,
    };

    match args.command {
        ListCommands::Add(args) => {
            execute_membership(args, Membership::Add, &session, &formatter).await
        }
        ListCommands::Remove(args) => {
            execute_membership(args, Membership::Remove, &session, &formatter).await
        }
        ListCommands::Members(args) => execute_members(args, &session, &formatter).await,
        ListCommands::Timeline(args) => {
            let list = match ListRef::parse(&args.list, args.id, &session.username) {
                Ok(list) => list,
                Err(e) => return fail(&formatter, "Invalid list", &e),
            };
            show_feed(&session, Feed::List(list), &args.display, &formatter).await
        }
        ListCommands::Information(args) => execute_information(args, &session, &formatter).await,
    }
}

/// The list and accounts named by `list add|remove`
///
/// `--id` only changes how the accounts are read; the list owner is always a
/// screen name.
fn membership_targets(args: &MembershipArgs, session: &Session) -> Result<(ListRef, Vec<UserRef>)> {
    let list = ListRef::parse(&args.list, false, &session.username)?;
    let users = session.subjects(&args.users, args.id)?;
    Ok((list, users))
}

async fn execute_membership(
    args: MembershipArgs,
    membership: Membership,
    session: &Session,
    formatter: &Formatter,
) -> ExitCode {
    let (list, users) = match membership_targets(&args, session) {
        Ok(targets) => targets,
        Err(e) => return fail(formatter, "Invalid argument", &e),
    };

    let count = match change_membership(session, &list, &users, membership).await {
        Ok(count) => count,
        Err(e) => return fail(formatter, "Failed to update list members", &e),
    };

    if formatter.is_json() {
        formatter.json(&MembershipOutput {
            success: true,
            list: args.list,
            action: membership.verb(),
            count,
        });
        return ExitCode::Success;
    }

    formatter.println(&format!(
        "@{} {} {} {} the list \"{}\".",
        session.username,
        membership.verb(),
        pluralize(count, "member"),
        membership.preposition(),
        args.list
    ));
    formatter.println("");
    let undo_users = users
        .iter()
        .map(UserRef::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    let id_flag = if args.id { " --id" } else { "" };
    formatter.println(&format!(
        "Run `t list {}{id_flag} {} {undo_users}` to undo.",
        membership.undo(),
        args.list
    ));

    ExitCode::Success
}

async fn execute_information(args: ListInfoArgs, session: &Session, formatter: &Formatter) -> ExitCode {
    let list = match ListRef::parse(&args.list, args.id, &session.username) {
        Ok(list) => list,
        Err(e) => return fail(formatter, "Invalid list", &e),
    };

    match fetch_list(session, &list).await {
        Ok(list) => {
            print_list_details(formatter, args.csv, &list);
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Failed to fetch list", &e),
    }
}

async fn execute_members(args: MembersArgs, session: &Session, formatter: &Formatter) -> ExitCode {
    let list = match ListRef::parse(&args.list, args.id, &session.username) {
        Ok(list) => list,
        Err(e) => return fail(formatter, "Invalid list", &e),
    };

    match list_members(session.client(), &list, &session.policy).await {
        Ok(mut users) => {
            args.display.sort.apply(&mut users);
            print_users(formatter, args.display.layout(), &users);
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Failed to fetch list members", &e),
    }
}
