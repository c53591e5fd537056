//! Error types for tw-core
//!
//! One error enum covers the profile store, the remote client capability and
//! the pagination/aggregation helpers so that every layer can use `?`.

use thiserror::Error;

/// Result type alias using tw-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the profile store, the remote client and the
/// fetch helpers built on top of it
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying file system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The profile file exists but could not be parsed
    #[error("Failed to parse profile file: {0}")]
    Parse(String),

    /// No stored username matches the lookup
    #[error("Username {0} is not found.")]
    ProfileNotFound(String),

    /// More than one stored username matches the lookup prefix
    #[error("Username {username} is ambiguous, matching {}", candidates.join(", "))]
    AmbiguousUsername {
        username: String,
        candidates: Vec<String>,
    },

    /// A command needs credentials but no usable profile is active
    #[error("No active profile. Run `t accounts add` to store credentials first.")]
    NoActiveProfile,

    /// Remote rejected the credentials (401/403)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Remote resource does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote rate limit hit (429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Transient server-side failure (5xx); the only retryable kind
    #[error("Server error: {0}")]
    Server(String),

    /// Server errors persisted through every retry attempt
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Transport-level failure before a response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Caller supplied something unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else the remote reported
    #[error("{0}")]
    General(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = Error::AmbiguousUsername {
            username: "te".to_string(),
            candidates: vec!["testcli".to_string(), "testuser".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Username te is ambiguous, matching testcli, testuser"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::ProfileNotFound("nobody".to_string());
        assert_eq!(err.to_string(), "Username nobody is not found.");
    }
}
