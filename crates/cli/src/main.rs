//! t: a command-line client for the Twitter REST API

mod commands;
mod exit_code;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Globals;
use commands::accounts::AccountsArgs;
use commands::friendships::{DoesFollowArgs, Follow, FollowArgs};
use commands::lists::{DoesContainArgs, ListArgs, ListsArgs};
use commands::relationships::{Graph, GraphArgs, UsersArgs, WhoisArgs};
use commands::search::SearchArgs;
use commands::set::SetArgs;
use commands::timeline::{TweetListArgs, UserTimelineArgs};
use exit_code::ExitCode;
use output::OutputConfig;
use tw_core::{ApiConfig, DEFAULT_HOST, Relationship};

#[derive(Parser, Debug)]
#[command(name = "t", version, about = "A command-line power tool for Twitter")]
struct Cli {
    /// Path to the profile file
    #[arg(short = 'P', long, env = "T_PROFILE", global = true)]
    profile: Option<PathBuf>,

    /// API host
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, global = true)]
    host: String,

    /// Talk to the API over plain HTTP
    #[arg(short = 'U', long, global = true)]
    no_ssl: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log every request to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List stored accounts, or add one
    Accounts(AccountsArgs),

    /// Change stored settings
    Set(SetArgs),

    /// Show the active account
    Whoami,

    /// Your home timeline, or the tweets of a user
    Timeline(UserTimelineArgs),

    /// Tweets mentioning you
    Mentions(TweetListArgs),

    /// Tweets favorited by you or a user
    Favorites(UserTimelineArgs),

    /// Retweets by you or a user
    #[command(alias = "rts")]
    Retweets(UserTimelineArgs),

    /// Direct messages sent to you
    DirectMessages(TweetListArgs),

    /// Direct messages you sent
    DirectMessagesSent(TweetListArgs),

    /// Accounts you or a user follows
    Followings(GraphArgs),

    /// Accounts following you or a user
    Followers(GraphArgs),

    /// Accounts you or a user follows that follow back
    Friends(GraphArgs),

    /// Accounts you or a user follows that do not follow back
    Leaders(GraphArgs),

    /// Followers of you or a user that are not followed back
    Groupies(GraphArgs),

    /// Start following accounts
    Follow(FollowArgs),

    /// Stop following accounts
    Unfollow(FollowArgs),

    /// Find out whether one account follows another
    #[command(alias = "df")]
    DoesFollow(DoesFollowArgs),

    /// Show details of the given accounts
    Users(UsersArgs),

    /// Show the full profile of one account
    #[command(alias = "user")]
    Whois(WhoisArgs),

    /// Lists owned by you or a user
    Lists(ListsArgs),

    /// Manage and read a list
    List(ListArgs),

    /// Find out whether a list contains an account
    #[command(alias = "dc")]
    DoesContain(DoesContainArgs),

    /// Search through tweets
    Search(SearchArgs),
}

impl Cli {
    fn globals(&self) -> Globals {
        Globals {
            output: OutputConfig {
                json: self.json,
                no_color: self.no_color,
                quiet: self.quiet,
            },
            profile: self.profile.clone(),
            api: ApiConfig::new(self.host.clone(), !self.no_ssl),
        }
    }
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let level = if debug { "debug" } else { "warn" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

async fn run(cli: Cli) -> ExitCode {
    let globals = cli.globals();

    match cli.command {
        Commands::Accounts(args) => commands::accounts::execute(args, &globals).await,
        Commands::Set(args) => commands::set::execute(args, &globals).await,
        Commands::Whoami => commands::whoami::execute(&globals).await,
        Commands::Timeline(args) => commands::timeline::execute_timeline(args, &globals).await,
        Commands::Mentions(args) => commands::timeline::execute_mentions(args, &globals).await,
        Commands::Favorites(args) => commands::timeline::execute_favorites(args, &globals).await,
        Commands::Retweets(args) => commands::timeline::execute_retweets(args, &globals).await,
        Commands::DirectMessages(args) => {
            commands::timeline::execute_direct_messages(args, false, &globals).await
        }
        Commands::DirectMessagesSent(args) => {
            commands::timeline::execute_direct_messages(args, true, &globals).await
        }
        Commands::Followings(args) => {
            commands::relationships::execute_graph(args, Graph::Followings, &globals).await
        }
        Commands::Followers(args) => {
            commands::relationships::execute_graph(args, Graph::Followers, &globals).await
        }
        Commands::Friends(args) => {
            let graph = Graph::Related(Relationship::Friends);
            commands::relationships::execute_graph(args, graph, &globals).await
        }
        Commands::Leaders(args) => {
            let graph = Graph::Related(Relationship::Leaders);
            commands::relationships::execute_graph(args, graph, &globals).await
        }
        Commands::Groupies(args) => {
            let graph = Graph::Related(Relationship::Groupies);
            commands::relationships::execute_graph(args, graph, &globals).await
        }
        Commands::Follow(args) => {
            commands::friendships::execute_follow(args, Follow::Start, &globals).await
        }
        Commands::Unfollow(args) => {
            commands::friendships::execute_follow(args, Follow::Stop, &globals).await
        }
        Commands::DoesFollow(args) => {
            commands::friendships::execute_does_follow(args, &globals).await
        }
        Commands::Users(args) => commands::relationships::execute_users(args, &globals).await,
        Commands::Whois(args) => commands::relationships::execute_whois(args, &globals).await,
        Commands::Lists(args) => commands::lists::execute_lists(args, &globals).await,
        Commands::List(args) => commands::lists::execute_list(args, &globals).await,
        Commands::DoesContain(args) => commands::lists::execute_does_contain(args, &globals).await,
        Commands::Search(args) => commands::search::execute(args, &globals).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;
    tracing::debug!(command = ?cli.command, "Starting");

    let code = run(cli).await;
    std::process::exit(code.as_i32());
}
