//! Crawler module: fetching, link extraction, and the traversal engine

mod engine;
mod fetcher;
mod parser;

pub use engine::{CancelToken, CrawlEngine};
pub use fetcher::{build_http_client, fetch_url, is_html_content_type, FetchOutcome};
pub use parser::extract_links;

use crate::config::CrawlConfig;
use crate::output::Report;
use crate::state::CrawlState;
use crate::CrawlError;
use std::time::Duration;

/// Runs a complete crawl from a validated configuration
///
/// Builds the HTTP client, seeds the state from the configured URL (fatal
/// if the seed does not normalize), and drives the engine to completion or
/// cancellation. The returned report is valid either way.
pub async fn crawl(config: &CrawlConfig, cancel: CancelToken) -> Result<Report, CrawlError> {
    let client = build_http_client()?;
    let mut state = CrawlState::start(
        &config.url,
        config.max_depth,
        Duration::from_secs_f64(config.delay),
    )?;

    let engine = CrawlEngine::new(client, cancel);
    Ok(engine.run(&mut state).await)
}
