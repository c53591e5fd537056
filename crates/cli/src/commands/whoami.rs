//! whoami command - Show the active account

use serde::Serialize;

use super::{Globals, fail};
use crate::exit_code::ExitCode;

#[derive(Debug, Serialize)]
struct WhoamiOutput {
    username: String,
    consumer_key: String,
}

pub async fn execute(globals: &Globals) -> ExitCode {
    let formatter = globals.formatter();
    let store = match globals.open_store() {
        Ok(store) => store,
        Err(e) => return fail(&formatter, "Failed to load profiles", &e),
    };

    let Some(profile) = store.active_credentials() else {
        return fail(&formatter, "Failed to show account", &tw_core::Error::NoActiveProfile);
    };

    if formatter.is_json() {
        formatter.json(&WhoamiOutput {
            username: profile.username.clone(),
            consumer_key: profile.consumer_key.clone(),
        });
    } else {
        formatter.println(&format!(
            "{} {}",
            formatter.style_name(&format!("@{}", profile.username)),
            formatter.style_key(&profile.consumer_key)
        ));
    }

    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tw_core::{ProfilePatch, ProfileStore};

    #[tokio::test]
    async fn test_whoami_requires_active_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".trc");
        let globals = Globals {
            profile: Some(path.clone()),
            ..Default::default()
        };

        assert_eq!(execute(&globals).await, ExitCode::UsageError);

        let mut store = ProfileStore::open(&path).unwrap();
        store
            .set_profile("testcli", "abc123", ProfilePatch::credentials("cs", "tok", "sec"))
            .unwrap();
        store.set_active("testcli", "abc123").unwrap();

        assert_eq!(execute(&globals).await, ExitCode::Success);
    }
}
