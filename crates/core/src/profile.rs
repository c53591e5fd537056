//! Profile store
//!
//! Profiles are stored credentials for one account under one application
//! registration, keyed by `(username, consumer_key)`. The whole store lives in
//! a single YAML file (default `~/.trc`) that is rewritten on every mutation
//! and is only readable by its owner. The layout is two top-level mappings:
//!
//! ```yaml
//! configuration:
//!   default_profile:
//!   - sferik
//!   - abc123
//! profiles:
//!   sferik:
//!     abc123:
//!       username: sferik
//!       consumer_key: abc123
//!       consumer_secret: ...
//!       token: ...
//!       secret: ...
//! ```

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the profile store inside the home directory
pub const FILE_NAME: &str = ".trc";

/// Stored credentials for one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub secret: String,
}

impl Profile {
    /// Create a profile with every credential field set
    pub fn new(
        username: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            secret: secret.into(),
        }
    }
}

/// Fields merged into a stored profile by [`ProfileStore::set_profile`]
///
/// Unset fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub consumer_secret: Option<String>,
    pub token: Option<String>,
    pub secret: Option<String>,
}

impl ProfilePatch {
    /// Patch carrying a full set of secrets
    pub fn credentials(
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_secret: Some(consumer_secret.into()),
            token: Some(token.into()),
            secret: Some(secret.into()),
        }
    }

    fn apply(self, profile: &mut Profile) {
        if let Some(v) = self.consumer_secret {
            profile.consumer_secret = v;
        }
        if let Some(v) = self.token {
            profile.token = v;
        }
        if let Some(v) = self.secret {
            profile.secret = v;
        }
    }
}

/// The `configuration` mapping of the store file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Configuration {
    /// `[username, consumer_key]` of the active profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_profile: Option<Vec<String>>,

    /// Keys this version does not interpret are kept as written
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml_ng::Value>,
}

impl Configuration {
    fn is_empty(&self) -> bool {
        self.default_profile.is_none() && self.extra.is_empty()
    }
}

/// Profiles keyed by username, then by consumer key
pub type ProfileMap = BTreeMap<String, BTreeMap<String, Profile>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    configuration: Configuration,
    #[serde(default)]
    profiles: ProfileMap,
}

/// Credential store backed by a single file
///
/// The store is owned by one command invocation. Mutations take `&mut self`
/// and persist immediately, so there is never unsaved state except after a
/// failed write.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    data: StoreData,
}

impl ProfileStore {
    /// Open the store at `path`, starting empty when the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = load_file(&path)?;
        tracing::debug!(path = %path.display(), "Loaded profile store");
        Ok(Self { path, data })
    }

    /// Open the store at the default location (`~/.trc`)
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Default store location inside the user's home directory
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(FILE_NAME))
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the store at another file and load it
    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.data = load_file(&path)?;
        self.path = path;
        Ok(())
    }

    /// Discard in-memory state and reload from disk
    pub fn reload(&mut self) -> Result<()> {
        self.data = load_file(&self.path)?;
        Ok(())
    }

    /// True when both the configuration and the profile tables are empty
    pub fn is_empty(&self) -> bool {
        self.data.configuration.is_empty() && self.data.profiles.is_empty()
    }

    pub fn profiles(&self) -> &ProfileMap {
        &self.data.profiles
    }

    /// Look up a single stored profile by its exact key
    pub fn profile(&self, username: &str, consumer_key: &str) -> Option<&Profile> {
        self.data.profiles.get(username)?.get(consumer_key)
    }

    /// Resolve a possibly abbreviated, case-insensitive username to the
    /// stored spelling
    ///
    /// An exact case-insensitive match wins; otherwise the input must be a
    /// prefix of exactly one stored username.
    pub fn find_username(&self, username: &str) -> Result<String> {
        let needle = username.to_lowercase();
        let names = self.data.profiles.keys();

        if let Some(exact) = names.clone().find(|name| name.to_lowercase() == needle) {
            return Ok(exact.clone());
        }

        let mut candidates: Vec<String> = names
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .cloned()
            .collect();

        match candidates.len() {
            0 => Err(Error::ProfileNotFound(username.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(Error::AmbiguousUsername {
                username: username.to_string(),
                candidates,
            }),
        }
    }

    /// Resolve a username to `(canonical_username, consumer_key)`
    ///
    /// When the account is registered under several applications the active
    /// one is preferred, then the first consumer key in sort order.
    pub fn find(&self, username: &str) -> Result<(String, String)> {
        let canonical = self.find_username(username)?;

        if let Some((active_user, active_key)) = self.active_profile()
            && active_user == canonical
            && self.profile(active_user, active_key).is_some()
        {
            return Ok((canonical, active_key.to_string()));
        }

        let key = self
            .data
            .profiles
            .get(&canonical)
            .and_then(|keys| keys.keys().next())
            .cloned()
            .ok_or_else(|| Error::ProfileNotFound(username.to_string()))?;

        Ok((canonical, key))
    }

    /// Insert or merge credentials for `(username, consumer_key)` and persist
    pub fn set_profile(
        &mut self,
        username: &str,
        consumer_key: &str,
        patch: ProfilePatch,
    ) -> Result<()> {
        let profile = self
            .data
            .profiles
            .entry(username.to_string())
            .or_default()
            .entry(consumer_key.to_string())
            .or_insert_with(|| Profile {
                username: username.to_string(),
                consumer_key: consumer_key.to_string(),
                ..Default::default()
            });
        patch.apply(profile);

        self.write()
    }

    /// The raw active pointer, whether or not it still resolves
    pub fn active_profile(&self) -> Option<(&str, &str)> {
        match self.data.configuration.default_profile.as_deref() {
            Some([username, consumer_key]) => Some((username.as_str(), consumer_key.as_str())),
            _ => None,
        }
    }

    /// Overwrite the active pointer and persist
    pub fn set_active(&mut self, username: &str, consumer_key: &str) -> Result<()> {
        self.data.configuration.default_profile =
            Some(vec![username.to_string(), consumer_key.to_string()]);
        self.write()
    }

    /// Credentials of the active profile
    ///
    /// Returns `None` when no profile is active or the pointer no longer
    /// refers to a stored profile.
    pub fn active_credentials(&self) -> Option<&Profile> {
        let (username, consumer_key) = self.active_profile()?;
        self.profile(username, consumer_key)
    }

    /// Remove the backing file, if any
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self) -> Result<()> {
        let contents = serde_yaml_ng::to_string(&self.data)
            .map_err(|e| Error::General(format!("Failed to serialize profiles: {e}")))?;

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(contents.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "Wrote profile store");
        Ok(())
    }
}

fn load_file(path: &Path) -> Result<StoreData> {
    match fs::read_to_string(path) {
        // An empty file holds no document at all
        Ok(contents) if contents.trim().is_empty() => Ok(StoreData::default()),
        Ok(contents) => serde_yaml_ng::from_str(&contents)
            .map_err(|e| Error::Parse(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreData::default()),
        Err(e) => Err(e.into()),
    }
}
