//! HTTP fetcher implementation
//!
//! One fetch per URL, no retries. Transport-level failures are folded into
//! the returned outcome rather than raised, so a dead page can never abort
//! the crawl loop.

use reqwest::Client;
use std::time::Duration;

/// Per-request timeout; a hung server blocks the sequential crawl for at
/// most this long
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a fetch operation
///
/// The engine branches on this type; no error from the HTTP layer escapes
/// `fetch_url`.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered with a non-error status
    Success {
        /// HTTP status code (< 400)
        status: u16,
        /// Final URL after redirects; relative links resolve against this
        final_url: String,
        /// Content-Type header value, if present
        content_type: Option<String>,
        /// Response body
        body: String,
    },

    /// The server answered with an error status (>= 400)
    HttpError { status: u16 },

    /// The request failed below the HTTP layer (timeout, connection
    /// refused, DNS failure)
    Transport { reason: String },
}

/// Builds the HTTP client used for the whole crawl
///
/// Redirects are followed by the client itself (up to reqwest's default of
/// 10 hops); the engine only ever sees the final response.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the result
///
/// | Condition                  | Outcome                       |
/// |----------------------------|-------------------------------|
/// | Status < 400               | Success with body             |
/// | Status >= 400              | HttpError                     |
/// | Timeout                    | Transport ("Request timeout") |
/// | Connection refused / DNS   | Transport                     |
/// | Body read failure          | Transport                     |
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let reason = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchOutcome::Transport { reason };
        }
    };

    let status = response.status().as_u16();
    if status >= 400 {
        return FetchOutcome::HttpError { status };
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    match response.text().await {
        Ok(body) => FetchOutcome::Success {
            status,
            final_url,
            content_type,
            body,
        },
        Err(e) => FetchOutcome::Transport {
            reason: format!("Failed to read body: {}", e),
        },
    }
}

/// Returns true for Content-Type values worth handing to the link extractor
pub fn is_html_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower.starts_with("text/html") || lower.starts_with("application/xhtml+xml")
}
