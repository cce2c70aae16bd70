use reqwest::Client;
use std::time::Duration;

/// Builds the shared reqwest client used for outbound API calls.
pub fn new_api_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(180))
        .build()
        // Builder only fails on TLS backend misconfiguration; fall back to
        // the default client rather than refusing to start.
        .unwrap_or_else(|_| Client::new())
}
