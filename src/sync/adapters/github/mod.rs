//! GitHub adapter: REST client for comments and webhook payload parsing.

mod client;
mod payload;

pub use client::{DEFAULT_GITHUB_API_URL, GitHubClient, GitHubConfig};
pub use payload::{EventParseError, parse_event, parse_event_str};
