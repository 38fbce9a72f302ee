//! The breadth-first crawl engine
//!
//! Drives the traversal to completion or interruption: dequeue the oldest
//! frontier entry, fetch it, classify and record the outcome, discover new
//! same-domain links, and pause between requests. The loop is strictly
//! sequential: one fetch in flight, one awaited sleep between fetches, and
//! `CrawlState` owned by the engine alone for the crawl's duration.

use crate::crawler::fetcher::{fetch_url, is_html_content_type, FetchOutcome};
use crate::crawler::parser::extract_links;
use crate::output::{compile, Report};
use crate::state::{CrawlState, FrontierEntry, PageStatus};
use crate::url::{in_domain, resolve_url, should_visit};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// Cooperative cancellation flag shared between the signal handler and the
/// crawl loop
///
/// The loop observes the token at two points only: before dequeuing the next
/// entry and immediately after a fetch completes. Cancellation therefore
/// never discards an already-recorded page.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The crawl engine: an HTTP client plus a cancellation token
pub struct CrawlEngine {
    client: Client,
    cancel: CancelToken,
}

impl CrawlEngine {
    pub fn new(client: Client, cancel: CancelToken) -> Self {
        Self { client, cancel }
    }

    /// Runs the traversal loop until the frontier is exhausted or the
    /// token is cancelled, then compiles the report
    ///
    /// Per iteration:
    /// 1. observe the cancellation token; on cancel, mark the state
    ///    interrupted and stop without losing collected records
    /// 2. dequeue the oldest entry; skip it if somehow already visited
    /// 3. mark the URL visited *before* fetching, so a slow or failing
    ///    fetch can never cause a re-enqueue
    /// 4. fetch, count the request, classify, and record the page
    /// 5. if depth allows and the page is HTML, discover links and enqueue
    ///    the unseen same-domain ones at depth + 1
    /// 6. observe the token again, then sleep the configured delay
    ///    (skipped after the last dequeue)
    ///
    /// A fetch failure never aborts the loop; it becomes an `Unknown`
    /// record and traversal continues.
    pub async fn run(&self, state: &mut CrawlState) -> Report {
        tracing::info!(
            "Starting crawl of {} (max depth {}, delay {:?})",
            state.base_url,
            state.max_depth,
            state.delay
        );

        let mut pages_crawled: u64 = 0;

        loop {
            if self.cancel.is_cancelled() {
                state.mark_interrupted();
                tracing::warn!(
                    "Crawl interrupted; {} entries left in frontier",
                    state.frontier_len()
                );
                break;
            }

            let entry = match state.dequeue() {
                Some(entry) => entry,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    break;
                }
            };

            // Enqueue-time dedup should make this impossible; guard anyway
            // so a duplicate could never produce a second record.
            if state.is_visited(&entry.url) {
                continue;
            }
            state.mark_visited(&entry.url);

            tracing::info!("Crawling {} (depth {})", entry.url, entry.depth);

            let outcome = fetch_url(&self.client, entry.url.as_str()).await;
            state.note_request();
            pages_crawled += 1;

            let status = PageStatus::from_outcome(&outcome);
            let error_detail = match &outcome {
                FetchOutcome::Transport { reason } => {
                    tracing::error!("Request failed for {}: {}", entry.url, reason);
                    Some(reason.clone())
                }
                FetchOutcome::HttpError { status } => {
                    tracing::warn!("HTTP {} for {}", status, entry.url);
                    None
                }
                FetchOutcome::Success { .. } => None,
            };

            state.record_page(entry.url.clone(), entry.depth, status, error_detail);

            if entry.depth < state.max_depth {
                self.discover_links(state, &entry, &outcome);
            }

            if pages_crawled % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier",
                    pages_crawled,
                    state.frontier_len()
                );
            }

            if self.cancel.is_cancelled() {
                state.mark_interrupted();
                tracing::warn!(
                    "Crawl interrupted; {} entries left in frontier",
                    state.frontier_len()
                );
                break;
            }

            if !state.frontier_is_empty() && !state.delay.is_zero() {
                tokio::time::sleep(state.delay).await;
            }
        }

        state.mark_finished();
        compile(state)
    }

    /// Turns a fetched page's links into frontier entries at depth + 1
    ///
    /// Only successful HTML responses are parsed. Each raw href is resolved
    /// against the response's final URL (the correct base after redirects),
    /// then gated: malformed or non-HTTP(S) links, off-domain hosts, and
    /// non-content targets are silently dropped; the rest enter the
    /// frontier unless already seen.
    fn discover_links(&self, state: &mut CrawlState, entry: &FrontierEntry, outcome: &FetchOutcome) {
        let FetchOutcome::Success {
            final_url,
            content_type,
            body,
            ..
        } = outcome
        else {
            return;
        };

        if let Some(content_type) = content_type {
            if !is_html_content_type(content_type) {
                tracing::debug!("Skipping link extraction for {}: {}", entry.url, content_type);
                return;
            }
        }

        let base = Url::parse(final_url).unwrap_or_else(|_| entry.url.clone());
        let mut discovered = 0;

        for href in extract_links(body) {
            let url = match resolve_url(&href, &base) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Dropping link '{}': {}", href, e);
                    continue;
                }
            };

            if !in_domain(&url, &state.domain) {
                tracing::debug!("Dropping off-domain link {}", url);
                continue;
            }

            if !should_visit(&url) {
                tracing::debug!("Dropping non-content link {}", url);
                continue;
            }

            if state.enqueue(url, entry.depth + 1) {
                discovered += 1;
            }
        }

        if discovered > 0 {
            tracing::debug!("Discovered {} new links on {}", discovered, entry.url);
        }
    }
}
