use crate::Result;
use std::time::Duration;

/// User agent sent with every upstream request
pub const USER_AGENT: &str = concat!("bubblebot/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by all data sources
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    tracing::debug!("Building HTTP client with {:?} timeout", timeout);

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;

    Ok(client)
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
