//! Account management commands
//!
//! Lists the profiles stored in the profile file and stores new ones from
//! credentials obtained elsewhere.

use clap::{Args, Subcommand};
use serde::Serialize;

use tw_core::{ProfilePatch, ProfileStore};

use super::{Globals, fail};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List or add stored accounts
#[derive(Args, Debug)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub command: Option<AccountsCommands>,
}

#[derive(Subcommand, Debug)]
pub enum AccountsCommands {
    /// Store credentials for an account
    Add(AddArgs),
}

/// Arguments for the `accounts add` command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Screen name of the account
    pub username: String,

    /// Consumer key of the application
    pub consumer_key: String,

    /// Consumer secret of the application
    pub consumer_secret: String,

    /// Access token issued to the account
    pub token: String,

    /// Access token secret
    pub secret: String,
}

/// JSON output for `accounts`
#[derive(Debug, Serialize)]
struct AccountsOutput {
    accounts: Vec<AccountInfo>,
}

/// One stored profile, without secrets
#[derive(Debug, Serialize)]
struct AccountInfo {
    username: String,
    consumer_key: String,
    active: bool,
}

/// JSON output for `accounts add`
#[derive(Debug, Serialize)]
struct AddOutput {
    success: bool,
    username: String,
    consumer_key: String,
    active: bool,
}

pub async fn execute(args: AccountsArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let store = match globals.open_store() {
        Ok(store) => store,
        Err(e) => return fail(&formatter, "Failed to load profiles", &e),
    };

    match args.command {
        None => execute_list(&store, &formatter),
        Some(AccountsCommands::Add(args)) => execute_add(args, store, &formatter),
    }
}

fn account_infos(store: &ProfileStore) -> Vec<AccountInfo> {
    let active = store.active_profile();
    store
        .profiles()
        .iter()
        .flat_map(|(username, keys)| {
            keys.keys().map(move |key| AccountInfo {
                username: username.clone(),
                consumer_key: key.clone(),
                active: active == Some((username.as_str(), key.as_str())),
            })
        })
        .collect()
}

fn execute_list(store: &ProfileStore, formatter: &Formatter) -> ExitCode {
    let accounts = account_infos(store);

    if formatter.is_json() {
        formatter.json(&AccountsOutput { accounts });
        return ExitCode::Success;
    }

    if accounts.is_empty() {
        formatter.println("No accounts stored. Run `t accounts add` to add one.");
        return ExitCode::Success;
    }

    let mut current: Option<&str> = None;
    for account in &accounts {
        if current != Some(account.username.as_str()) {
            formatter.println(&formatter.style_name(&account.username));
            current = Some(account.username.as_str());
        }
        let key = formatter.style_key(&account.consumer_key);
        if account.active {
            let marker = formatter.style_active("(active)");
            formatter.println(&format!("  {key} {marker}"));
        } else {
            formatter.println(&format!("  {key}"));
        }
    }

    ExitCode::Success
}

fn execute_add(args: AddArgs, mut store: ProfileStore, formatter: &Formatter) -> ExitCode {
    let username = args.username.trim_start_matches('@').to_string();
    if username.is_empty() || args.consumer_key.is_empty() {
        formatter.error("Username and consumer key cannot be empty");
        return ExitCode::UsageError;
    }

    if store.profile(&username, &args.consumer_key).is_some() {
        formatter.warning(&format!(
            "Replacing stored credentials for @{username} ({}).",
            args.consumer_key
        ));
    }

    let patch = ProfilePatch::credentials(args.consumer_secret, args.token, args.secret);
    if let Err(e) = store.set_profile(&username, &args.consumer_key, patch) {
        return fail(formatter, "Failed to store profile", &e);
    }

    // The first stored account becomes active
    let activate = store.active_credentials().is_none();
    if activate && let Err(e) = store.set_active(&username, &args.consumer_key) {
        return fail(formatter, "Failed to activate profile", &e);
    }

    if formatter.is_json() {
        formatter.json(&AddOutput {
            success: true,
            username,
            consumer_key: args.consumer_key,
            active: activate,
        });
    } else {
        let styled = formatter.style_name(&format!("@{username}"));
        formatter.success(&format!("Stored credentials for {styled}."));
        if !activate {
            formatter.println(&format!(
                "Run `t set active {username} {}` to use this account.",
                args.consumer_key
            ));
        }
    }

    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add_args(username: &str, key: &str) -> AddArgs {
        AddArgs {
            username: username.to_string(),
            consumer_key: key.to_string(),
            consumer_secret: "asdfasd223sd2".to_string(),
            token: "7505382-cebdct6bwobn".to_string(),
            secret: "epzrjvxtumoc".to_string(),
        }
    }

    fn globals(dir: &TempDir) -> Globals {
        Globals {
            profile: Some(dir.path().join(".trc")),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_account_becomes_active() {
        let dir = TempDir::new().unwrap();
        let globals = globals(&dir);

        let code = execute(
            AccountsArgs {
                command: Some(AccountsCommands::Add(add_args("@testcli", "abc123"))),
            },
            &globals,
        )
        .await;
        assert_eq!(code, ExitCode::Success);

        let code = execute(
            AccountsArgs {
                command: Some(AccountsCommands::Add(add_args("sferik", "def456"))),
            },
            &globals,
        )
        .await;
        assert_eq!(code, ExitCode::Success);

        let store = globals.open_store().unwrap();
        assert_eq!(store.active_profile(), Some(("testcli", "abc123")));

        let infos = account_infos(&store);
        let summary: Vec<(&str, &str, bool)> = infos
            .iter()
            .map(|a| (a.username.as_str(), a.consumer_key.as_str(), a.active))
            .collect();
        assert_eq!(
            summary,
            vec![("sferik", "def456", false), ("testcli", "abc123", true)]
        );
    }

    #[tokio::test]
    async fn test_add_rejects_empty_username() {
        let dir = TempDir::new().unwrap();
        let code = execute(
            AccountsArgs {
                command: Some(AccountsCommands::Add(add_args("@", "abc123"))),
            },
            &globals(&dir),
        )
        .await;
        assert_eq!(code, ExitCode::UsageError);
    }

    #[tokio::test]
    async fn test_malformed_profile_file_is_usage_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".trc"), "profiles = [[[").unwrap();

        let code = execute(AccountsArgs { command: None }, &globals(&dir)).await;
        assert_eq!(code, ExitCode::UsageError);
    }
}
