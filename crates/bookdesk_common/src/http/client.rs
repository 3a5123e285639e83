// --- File: crates/bookdesk_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Timeout used by [`HTTP_CLIENT`].
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sent on every request made by bookdesk clients.
pub const USER_AGENT: &str = concat!("bookdesk/", env!("CARGO_PKG_VERSION"));

/// Shared client with the default timeout. Falls back to a plain client if
/// the configured builder cannot be constructed.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    create_client(DEFAULT_TIMEOUT_SECS, true).unwrap_or_else(|_| Client::new())
});

/// Builds a JSON API client.
///
/// Every request carries `Accept: application/json` and the bookdesk user
/// agent. `timeout_secs` bounds the whole request, including reading the body.
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let redirects = if follow_redirects {
        reqwest::redirect::Policy::limited(5)
    } else {
        reqwest::redirect::Policy::none()
    };

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .redirect(redirects)
        .build()
}
