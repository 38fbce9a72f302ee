//! The crawl's working state: frontier queue, visited registry, and records
//!
//! `CrawlState` is owned exclusively by the engine while the crawl runs and
//! is read (never mutated) by the report aggregator afterwards. The frontier
//! is a strict FIFO queue, which is what makes the traversal breadth-first:
//! links are enqueued in discovery order and never reordered, so every entry
//! at depth d is dequeued before any entry at depth d+1.

use crate::state::PageStatus;
use crate::url::{extract_domain, normalize_url};
use crate::UrlError;
use chrono::{DateTime, Local};
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use url::Url;

/// A discovered URL waiting in the frontier, tagged with its discovery depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// The immutable record of one visited page
///
/// Created exactly once per unique URL, after its fetch has been classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: Url,
    pub depth: u32,
    pub status: PageStatus,
    /// Transport failure reason, present only for `Unknown` statuses
    pub error_detail: Option<String>,
}

/// Process-scoped state for a single crawl run
pub struct CrawlState {
    /// The normalized seed URL
    pub base_url: Url,

    /// Host the crawl is confined to
    pub domain: String,

    /// Maximum discovery depth; no entry beyond it is ever enqueued
    pub max_depth: u32,

    /// Pause between consecutive fetches
    pub delay: Duration,

    /// FIFO queue of discovered-but-unfetched URLs
    frontier: VecDeque<FrontierEntry>,

    /// URLs that are either queued or already visited; consulted at
    /// enqueue time so a URL enters the frontier at most once
    seen: HashSet<Url>,

    /// URLs for which a fetch has been (or is being) issued
    visited: HashSet<Url>,

    /// Page records in the order they were created
    records: Vec<PageRecord>,

    /// Fetch attempts actually issued, the seed's own fetch included
    total_requests: u64,

    /// Wall-clock start, for the report header
    pub started_at: DateTime<Local>,

    started_instant: Instant,
    finished_instant: Option<Instant>,

    /// Set when the run loop exited through the cancellation check
    interrupted: bool,
}

impl CrawlState {
    /// Validates the seed URL and builds the initial state
    ///
    /// The frontier starts with the seed at depth 0. A seed that fails
    /// normalization is fatal to the whole crawl.
    pub fn start(seed: &str, max_depth: u32, delay: Duration) -> Result<Self, UrlError> {
        let base_url = normalize_url(seed)?;
        let domain = extract_domain(&base_url).ok_or(UrlError::MissingHost)?;

        let mut state = Self {
            base_url: base_url.clone(),
            domain,
            max_depth,
            delay,
            frontier: VecDeque::new(),
            seen: HashSet::new(),
            visited: HashSet::new(),
            records: Vec::new(),
            total_requests: 0,
            started_at: Local::now(),
            started_instant: Instant::now(),
            finished_instant: None,
            interrupted: false,
        };

        state.enqueue(base_url, 0);
        Ok(state)
    }

    /// Adds a URL to the frontier unless it has been seen before
    ///
    /// Returns true if the URL was actually enqueued.
    pub fn enqueue(&mut self, url: Url, depth: u32) -> bool {
        if self.seen.contains(&url) {
            return false;
        }

        self.seen.insert(url.clone());
        self.frontier.push_back(FrontierEntry { url, depth });
        true
    }

    /// Removes and returns the oldest frontier entry
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        self.frontier.pop_front()
    }

    pub fn frontier_is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    /// Marks a URL visited; called before its fetch is issued so a slow or
    /// failing fetch can never cause a re-enqueue
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(url.clone());
        self.seen.insert(url.clone());
    }

    /// Counts a fetch attempt that was actually issued
    pub fn note_request(&mut self) {
        self.total_requests += 1;
    }

    /// Appends the record for a visited page
    pub fn record_page(
        &mut self,
        url: Url,
        depth: u32,
        status: PageStatus,
        error_detail: Option<String>,
    ) {
        self.records.push(PageRecord {
            url,
            depth,
            status,
            error_detail,
        });
    }

    /// Page records in the order they were created
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    /// Stamps the end of the run loop so report compilation is repeatable
    pub fn mark_finished(&mut self) {
        if self.finished_instant.is_none() {
            self.finished_instant = Some(Instant::now());
        }
    }

    /// Elapsed time from start to the finish stamp, or to now while the
    /// crawl is still running
    pub fn elapsed(&self) -> Duration {
        self.finished_instant
            .unwrap_or_else(Instant::now)
            .duration_since(self.started_instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CrawlState {
        CrawlState::start("https://example.com/", 3, Duration::ZERO).unwrap()
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_start_seeds_frontier_at_depth_zero() {
        let mut s = state();
        assert_eq!(s.domain, "example.com");
        assert_eq!(s.frontier_len(), 1);

        let entry = s.dequeue().unwrap();
        assert_eq!(entry.url.as_str(), "https://example.com/");
        assert_eq!(entry.depth, 0);
    }

    #[test]
    fn test_start_rejects_malformed_seed() {
        assert!(CrawlState::start("not a url", 3, Duration::ZERO).is_err());
        assert!(CrawlState::start("ftp://example.com/", 3, Duration::ZERO).is_err());
    }

    #[test]
    fn test_start_strips_seed_fragment() {
        let s = CrawlState::start("https://example.com/page#top", 1, Duration::ZERO).unwrap();
        assert_eq!(s.base_url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_enqueue_dedupes() {
        let mut s = state();
        assert!(s.enqueue(url("https://example.com/a"), 1));
        assert!(!s.enqueue(url("https://example.com/a"), 1));
        assert_eq!(s.frontier_len(), 2); // seed + /a
    }

    #[test]
    fn test_enqueue_rejects_seed_rediscovery() {
        let mut s = state();
        // The seed is already seen; a page linking back to it must not
        // re-enter the frontier.
        assert!(!s.enqueue(url("https://example.com/"), 1));
    }

    #[test]
    fn test_enqueue_rejects_visited_url() {
        let mut s = state();
        let entry = s.dequeue().unwrap();
        s.mark_visited(&entry.url);
        assert!(!s.enqueue(entry.url.clone(), 2));
    }

    #[test]
    fn test_fifo_order() {
        let mut s = state();
        s.dequeue();
        s.enqueue(url("https://example.com/a"), 1);
        s.enqueue(url("https://example.com/b"), 1);
        s.enqueue(url("https://example.com/c"), 2);

        assert_eq!(s.dequeue().unwrap().url.as_str(), "https://example.com/a");
        assert_eq!(s.dequeue().unwrap().url.as_str(), "https://example.com/b");
        assert_eq!(s.dequeue().unwrap().url.as_str(), "https://example.com/c");
        assert!(s.dequeue().is_none());
    }

    #[test]
    fn test_scheme_variants_are_distinct_entries() {
        let mut s = state();
        assert!(s.enqueue(url("http://example.com/page"), 1));
        assert!(s.enqueue(url("https://example.com/page"), 1));
    }

    #[test]
    fn test_mark_visited_and_record() {
        let mut s = state();
        let entry = s.dequeue().unwrap();

        assert!(!s.is_visited(&entry.url));
        s.mark_visited(&entry.url);
        assert!(s.is_visited(&entry.url));

        s.note_request();
        s.record_page(entry.url.clone(), entry.depth, PageStatus::Http(200), None);

        assert_eq!(s.visited_count(), 1);
        assert_eq!(s.total_requests(), 1);
        assert_eq!(s.records().len(), 1);
        assert_eq!(s.records()[0].status, PageStatus::Http(200));
    }

    #[test]
    fn test_elapsed_is_stable_after_finish() {
        let mut s = state();
        s.mark_finished();
        let a = s.elapsed();
        let b = s.elapsed();
        assert_eq!(a, b);
    }
}
