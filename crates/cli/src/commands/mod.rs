//! Command implementations
//!
//! Every command opens the profile store itself, and the ones that talk to
//! the API build a [`Session`] from the active profile. Fetching is kept
//! apart from printing so it can run against a stub client in tests.

pub mod accounts;
pub mod friendships;
pub mod lists;
pub mod relationships;
pub mod search;
pub mod set;
pub mod timeline;
pub mod whoami;

#[cfg(test)]
pub(crate) mod stub;

use std::path::PathBuf;
use std::sync::Arc;

use tw_api::RestClient;
use tw_core::{ApiConfig, Error, ProfileStore, Result, RetryPolicy, TwitterClient, UserRef};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Settings resolved from the global command-line options
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub output: OutputConfig,
    /// Profile file given with `--profile`; `~/.trc` otherwise
    pub profile: Option<PathBuf>,
    pub api: ApiConfig,
}

impl Globals {
    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.output.clone())
    }

    pub fn open_store(&self) -> Result<ProfileStore> {
        match &self.profile {
            Some(path) => ProfileStore::open(path.clone()),
            None => ProfileStore::open_default(),
        }
    }
}

/// An authenticated client and the account it acts as
pub struct Session {
    pub username: String,
    client: Arc<dyn TwitterClient>,
    pub policy: RetryPolicy,
}

impl Session {
    pub fn new(username: impl Into<String>, client: Arc<dyn TwitterClient>) -> Self {
        Self {
            username: username.into(),
            client,
            policy: RetryPolicy::default(),
        }
    }

    /// Session for the active profile of the store
    pub fn connect(globals: &Globals) -> Result<Self> {
        let store = globals.open_store()?;
        let profile = store.active_credentials().ok_or(Error::NoActiveProfile)?;
        let client = RestClient::new(&globals.api, profile)?;
        tracing::debug!(username = %profile.username, host = %globals.api.host, "Connected");
        Ok(Self::new(profile.username.clone(), Arc::new(client)))
    }

    pub fn client(&self) -> &dyn TwitterClient {
        self.client.as_ref()
    }

    /// The authenticated account
    pub fn me(&self) -> UserRef {
        UserRef::ScreenName(self.username.clone())
    }

    /// The account named on the command line, or the authenticated one
    pub fn subject(&self, user: Option<&str>, by_id: bool) -> Result<UserRef> {
        match user {
            Some(user) => UserRef::parse(user, by_id),
            None => Ok(self.me()),
        }
    }

    /// Accounts named on the command line
    pub fn subjects(&self, users: &[String], by_id: bool) -> Result<Vec<UserRef>> {
        users.iter().map(|user| UserRef::parse(user, by_id)).collect()
    }
}

/// Build a session or report why it could not be built
pub fn connect(globals: &Globals, formatter: &Formatter) -> std::result::Result<Session, ExitCode> {
    Session::connect(globals).map_err(|e| fail(formatter, "Failed to connect", &e))
}

/// Report a failed operation and pick the exit code
pub fn fail(formatter: &Formatter, context: &str, error: &Error) -> ExitCode {
    formatter.error(&format!("{context}: {error}"));
    ExitCode::from_error(error)
}

/// Number of results asked for with `--number`; negative means none
pub fn result_count(number: i64) -> usize {
    usize::try_from(number).unwrap_or(0)
}

/// `1 member`, `2 members`
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
