use std::path::PathBuf;

/// A validated crawl configuration
///
/// Built from the command line in `main` and consumed by the engine. The
/// engine itself never touches argument parsing.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL the crawl starts from (scheme already coerced)
    pub url: String,

    /// Maximum depth to crawl from the seed
    pub max_depth: u32,

    /// Delay between consecutive requests, in seconds
    pub delay: f64,

    /// Report destination; stdout when absent
    pub output: Option<PathBuf>,
}
