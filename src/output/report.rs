//! Report aggregation
//!
//! `compile` is a pure, read-only pass over the crawl state. It can run at
//! any point: mid-crawl for diagnostics, or after the run loop exits, where
//! the finish stamp makes repeated compilations of the same state identical.

use crate::state::{CrawlState, PageStatus};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::time::Duration;

/// One page in the depth-grouped listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub status: PageStatus,
    pub url: String,
}

/// One page in the error listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub url: String,
    /// Transport failure reason, present only for `Unknown` statuses
    pub detail: Option<String>,
}

/// Immutable snapshot of a crawl's results
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub base_url: String,
    pub domain: String,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    pub total_requests: u64,
    pub total_pages: u64,
    /// Deepest level at which a page was actually recorded (0 when the
    /// crawl never got past the seed)
    pub max_depth_reached: u32,
    /// One bucket per distinct status observed, Unknown included
    pub status_counts: BTreeMap<PageStatus, u64>,
    /// Error pages grouped by status, each group in first-visited order
    pub errors_by_status: BTreeMap<PageStatus, Vec<ErrorEntry>>,
    /// Pages grouped by depth, each group in recorded order
    pub pages_by_depth: BTreeMap<u32, Vec<PageEntry>>,
    /// True when the crawl was interrupted before the frontier drained
    pub partial: bool,
}

/// Compiles a report from the crawl state
///
/// The state is not mutated; every collection in the report is rebuilt from
/// the ordered page records.
pub fn compile(state: &CrawlState) -> Report {
    let mut status_counts: BTreeMap<PageStatus, u64> = BTreeMap::new();
    let mut errors_by_status: BTreeMap<PageStatus, Vec<ErrorEntry>> = BTreeMap::new();
    let mut pages_by_depth: BTreeMap<u32, Vec<PageEntry>> = BTreeMap::new();
    let mut max_depth_reached = 0;

    for record in state.records() {
        *status_counts.entry(record.status).or_insert(0) += 1;

        if record.status.is_error() {
            errors_by_status
                .entry(record.status)
                .or_default()
                .push(ErrorEntry {
                    url: record.url.to_string(),
                    detail: record.error_detail.clone(),
                });
        }

        pages_by_depth
            .entry(record.depth)
            .or_default()
            .push(PageEntry {
                status: record.status,
                url: record.url.to_string(),
            });

        max_depth_reached = max_depth_reached.max(record.depth);
    }

    Report {
        base_url: state.base_url.to_string(),
        domain: state.domain.clone(),
        started_at: state.started_at,
        duration: state.elapsed(),
        total_requests: state.total_requests(),
        total_pages: state.records().len() as u64,
        max_depth_reached,
        status_counts,
        errors_by_status,
        pages_by_depth,
        partial: state.interrupted(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn record(state: &mut CrawlState, url: &str, depth: u32, status: PageStatus) {
        let url = Url::parse(url).unwrap();
        state.mark_visited(&url);
        state.note_request();
        let detail = match status {
            PageStatus::Unknown => Some("Connection refused".to_string()),
            _ => None,
        };
        state.record_page(url, depth, status, detail);
    }

    fn populated_state() -> CrawlState {
        let mut state =
            CrawlState::start("https://example.com/", 2, Duration::ZERO).unwrap();
        record(&mut state, "https://example.com/", 0, PageStatus::Http(200));
        record(&mut state, "https://example.com/a", 1, PageStatus::Http(200));
        record(&mut state, "https://example.com/b", 1, PageStatus::Http(404));
        record(&mut state, "https://example.com/c", 1, PageStatus::Unknown);
        record(&mut state, "https://example.com/d", 2, PageStatus::Http(404));
        state.mark_finished();
        state
    }

    #[test]
    fn test_histogram_counts() {
        let report = compile(&populated_state());

        assert_eq!(report.status_counts[&PageStatus::Http(200)], 2);
        assert_eq!(report.status_counts[&PageStatus::Http(404)], 2);
        assert_eq!(report.status_counts[&PageStatus::Unknown], 1);
    }

    #[test]
    fn test_histogram_sums_to_total_pages() {
        let report = compile(&populated_state());
        let sum: u64 = report.status_counts.values().sum();
        assert_eq!(sum, report.total_pages);
        assert_eq!(report.total_pages, 5);
    }

    #[test]
    fn test_pages_by_depth_totals_match() {
        let report = compile(&populated_state());
        let sum: usize = report.pages_by_depth.values().map(|v| v.len()).sum();
        assert_eq!(sum as u64, report.total_pages);

        assert_eq!(report.pages_by_depth[&0].len(), 1);
        assert_eq!(report.pages_by_depth[&1].len(), 3);
        assert_eq!(report.pages_by_depth[&2].len(), 1);
    }

    #[test]
    fn test_pages_by_depth_preserves_recorded_order() {
        let report = compile(&populated_state());
        let depth1: Vec<&str> = report.pages_by_depth[&1]
            .iter()
            .map(|p| p.url.as_str())
            .collect();
        assert_eq!(
            depth1,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c"
            ]
        );
    }

    #[test]
    fn test_errors_grouped_in_first_visited_order() {
        let report = compile(&populated_state());

        let not_found: Vec<&str> = report.errors_by_status[&PageStatus::Http(404)]
            .iter()
            .map(|e| e.url.as_str())
            .collect();
        assert_eq!(not_found, vec!["https://example.com/b", "https://example.com/d"]);

        let failed = &report.errors_by_status[&PageStatus::Unknown];
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].detail.as_deref(), Some("Connection refused"));
    }

    #[test]
    fn test_successes_never_enter_error_list() {
        let report = compile(&populated_state());
        assert!(!report.errors_by_status.contains_key(&PageStatus::Http(200)));
    }

    #[test]
    fn test_max_depth_reached() {
        let report = compile(&populated_state());
        assert_eq!(report.max_depth_reached, 2);
    }

    #[test]
    fn test_empty_state_compiles() {
        let mut state =
            CrawlState::start("https://example.com/", 3, Duration::ZERO).unwrap();
        state.mark_finished();
        let report = compile(&state);

        assert_eq!(report.total_pages, 0);
        assert_eq!(report.max_depth_reached, 0);
        assert!(report.status_counts.is_empty());
        assert!(!report.partial);
    }

    #[test]
    fn test_partial_flag_follows_interruption() {
        let mut state = populated_state();
        assert!(!compile(&state).partial);

        state.mark_interrupted();
        assert!(compile(&state).partial);
    }

    #[test]
    fn test_compile_is_idempotent_after_finish() {
        let state = populated_state();
        assert_eq!(compile(&state), compile(&state));
    }

    #[test]
    fn test_compile_does_not_consume_state() {
        let state = populated_state();
        let _ = compile(&state);
        // State is still fully readable afterwards
        assert_eq!(state.records().len(), 5);
        assert_eq!(state.total_requests(), 5);
    }
}
