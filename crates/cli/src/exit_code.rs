//! Process exit codes
//!
//! Scripts can rely on these values; they do not change between releases.

use tw_core::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    /// Bad arguments or an unusable profile file
    UsageError = 2,
    /// Network failure or the service stayed unavailable through retries
    NetworkError = 3,
    AuthError = 4,
    NotFound = 5,
    RateLimited = 6,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Exit code reported for a failed operation
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::InvalidArgument(_)
            | Error::Parse(_)
            | Error::ProfileNotFound(_)
            | Error::AmbiguousUsername { .. }
            | Error::NoActiveProfile => Self::UsageError,
            Error::Network(_) | Error::Server(_) | Error::ServiceUnavailable(_) => {
                Self::NetworkError
            }
            Error::Auth(_) => Self::AuthError,
            Error::NotFound(_) => Self::NotFound,
            Error::RateLimited(_) => Self::RateLimited,
            Error::Io(_) | Error::Config(_) | Error::General(_) => Self::GeneralError,
        }
    }
}
