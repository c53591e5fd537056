//! set command - Change settings stored in the profile file

use clap::{Args, Subcommand};
use serde::Serialize;

use super::{Globals, fail};
use crate::exit_code::ExitCode;

/// Change stored settings
#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(subcommand)]
    pub command: SetCommands,
}

#[derive(Subcommand, Debug)]
pub enum SetCommands {
    /// Set the account used by other commands
    Active(ActiveArgs),
}

#[derive(Args, Debug)]
pub struct ActiveArgs {
    /// Stored username; case-insensitive, any unique prefix works
    pub username: String,

    /// Consumer key, when the account is stored under several applications
    pub consumer_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ActiveOutput {
    success: bool,
    username: String,
    consumer_key: String,
}

pub async fn execute(args: SetArgs, globals: &Globals) -> ExitCode {
    match args.command {
        SetCommands::Active(args) => execute_active(args, globals),
    }
}

fn execute_active(args: ActiveArgs, globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let mut store = match globals.open_store() {
        Ok(store) => store,
        Err(e) => return fail(&formatter, "Failed to load profiles", &e),
    };

    let username = args.username.trim_start_matches('@');
    let resolved = match &args.consumer_key {
        Some(key) => store.find_username(username).and_then(|canonical| {
            if store.profile(&canonical, key).is_some() {
                Ok((canonical, key.clone()))
            } else {
                Err(tw_core::Error::ProfileNotFound(format!("{canonical} ({key})")))
            }
        }),
        None => store.find(username),
    };
    let (username, consumer_key) = match resolved {
        Ok(pair) => pair,
        Err(e) => return fail(&formatter, "Failed to set active account", &e),
    };

    if let Err(e) = store.set_active(&username, &consumer_key) {
        return fail(&formatter, "Failed to set active account", &e);
    }

    if formatter.is_json() {
        formatter.json(&ActiveOutput {
            success: true,
            username,
            consumer_key,
        });
    } else {
        let styled = formatter.style_name(&format!("@{username}"));
        formatter.success(&format!("Active account has been updated to {styled}."));
    }

    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tw_core::{ProfilePatch, ProfileStore};

    fn seeded(dir: &TempDir) -> Globals {
        let path = dir.path().join(".trc");
        let mut store = ProfileStore::open(&path).unwrap();
        for (username, key) in [("testcli", "abc123"), ("testcli", "def456"), ("testuser", "abc123")] {
            store
                .set_profile(username, key, ProfilePatch::credentials("cs", "tok", "sec"))
                .unwrap();
        }
        Globals {
            profile: Some(path),
            ..Default::default()
        }
    }

    fn active(username: &str, consumer_key: Option<&str>) -> SetArgs {
        SetArgs {
            command: SetCommands::Active(ActiveArgs {
                username: username.to_string(),
                consumer_key: consumer_key.map(str::to_string),
            }),
        }
    }

    #[tokio::test]
    async fn test_set_active_resolves_case_and_first_key() {
        let dir = TempDir::new().unwrap();
        let globals = seeded(&dir);

        assert_eq!(execute(active("TESTCLI", None), &globals).await, ExitCode::Success);
        let store = globals.open_store().unwrap();
        assert_eq!(store.active_profile(), Some(("testcli", "abc123")));
    }

    #[tokio::test]
    async fn test_set_active_with_explicit_key() {
        let dir = TempDir::new().unwrap();
        let globals = seeded(&dir);

        assert_eq!(
            execute(active("@testc", Some("def456")), &globals).await,
            ExitCode::Success
        );
        let store = globals.open_store().unwrap();
        assert_eq!(store.active_profile(), Some(("testcli", "def456")));

        // Running it again leaves the same pointer
        assert_eq!(
            execute(active("testcli", Some("def456")), &globals).await,
            ExitCode::Success
        );
        let store = globals.open_store().unwrap();
        assert_eq!(store.active_profile(), Some(("testcli", "def456")));
    }

    #[tokio::test]
    async fn test_set_active_failures() {
        let dir = TempDir::new().unwrap();
        let globals = seeded(&dir);

        assert_eq!(execute(active("test", None), &globals).await, ExitCode::UsageError);
        assert_eq!(execute(active("nobody", None), &globals).await, ExitCode::UsageError);
        assert_eq!(
            execute(active("testuser", Some("zzz999")), &globals).await,
            ExitCode::UsageError
        );
        assert!(globals.open_store().unwrap().active_profile().is_none());
    }
}
