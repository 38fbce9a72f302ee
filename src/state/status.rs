//! Page status classification
//!
//! Every fetched page ends up with exactly one status: the HTTP code the
//! server answered with, or `Unknown` when the request failed below the HTTP
//! layer and no code exists.

use crate::crawler::FetchOutcome;
use std::fmt;

/// The recorded outcome of fetching a page
///
/// `Unknown` sorts before all HTTP codes so that failed requests lead the
/// status tables in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageStatus {
    /// The fetch failed before an HTTP status existed (timeout, connection
    /// refused, DNS failure)
    Unknown,

    /// The server answered with this HTTP status code
    Http(u16),
}

impl PageStatus {
    /// Classifies a fetch outcome into a page status
    pub fn from_outcome(outcome: &FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success { status, .. } => Self::Http(*status),
            FetchOutcome::HttpError { status } => Self::Http(*status),
            FetchOutcome::Transport { .. } => Self::Unknown,
        }
    }

    /// Returns true if this status belongs in the report's error section
    ///
    /// HTTP codes >= 400 and the Unknown sentinel are errors; 2xx and
    /// everything informational or redirect-shaped is not.
    pub fn is_error(&self) -> bool {
        match self {
            Self::Unknown => true,
            Self::Http(code) => *code >= 400,
        }
    }

    /// Short description bucket used in the status summary table
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Unknown => "FAILED",
            Self::Http(200) => "OK",
            Self::Http(code) if *code >= 400 => "ERROR",
            Self::Http(_) => "OTHER",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Http(code) => write!(f, "{}", code),
        }
    }
}
