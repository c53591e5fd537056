//! tw-api: REST adapter for the t Twitter CLI client
//!
//! This crate implements the `TwitterClient` trait from tw-core over
//! HTTPS with OAuth 1.0a user-context signing.

pub mod client;
pub mod oauth;

pub use client::RestClient;
pub use oauth::OAuthSigner;
