//! Markdown report rendering
//!
//! Renders the compiled report into its fixed schema: header metrics, the
//! status-code summary table, the detailed error listing, and the
//! depth-ordered page listing. Interrupted crawls carry a visible partial
//! marker right under the title.

use crate::output::report::Report;
use crate::state::PageStatus;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formats a report as markdown
pub fn format_report(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Site Crawler Report: {}\n\n", report.base_url));

    if report.partial {
        md.push_str("⚠️ **PARTIAL REPORT** - Crawling was interrupted\n\n");
    }

    push_metrics_table(&mut md, report);
    push_status_summary(&mut md, report);
    push_error_report(&mut md, report);
    push_pages_by_depth(&mut md, report);

    md
}

/// Writes the report to a file, or to stdout when no path is given
pub fn write_report(report: &Report, output: Option<&Path>) -> std::io::Result<()> {
    let markdown = format_report(report);

    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(markdown.as_bytes())?;
            tracing::info!("Report saved to {}", path.display());
        }
        None => println!("{}", markdown),
    }

    Ok(())
}

/// Header metric table with the metric column padded to a uniform width
fn push_metrics_table(md: &mut String, report: &Report) {
    let metrics = [
        ("Base URL", report.base_url.clone()),
        ("Domain", report.domain.clone()),
        (
            "Start Time",
            report.started_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        (
            "Duration",
            format!("{:.2} seconds", report.duration.as_secs_f64()),
        ),
        ("Total Requests", report.total_requests.to_string()),
        ("Total Pages Visited", report.total_pages.to_string()),
        ("Max Depth Reached", report.max_depth_reached.to_string()),
    ];

    let width = metrics.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    md.push_str(&format!("| {:<width$} | Value |\n", "Metric", width = width));
    md.push_str(&format!("|{}-|-------|\n", "-".repeat(width + 1)));
    for (name, value) in &metrics {
        md.push_str(&format!("| {:<width$} | {} |\n", name, value, width = width));
    }
    md.push('\n');
}

fn push_status_summary(md: &mut String, report: &Report) {
    md.push_str("## HTTP STATUS CODE SUMMARY\n\n");
    md.push_str("| Status Code | Description | Count |\n");
    md.push_str("|-------------|-------------|-------|\n");

    for (status, count) in &report.status_counts {
        md.push_str(&format!("| {} | {} | {} |\n", status, status.describe(), count));
    }
    md.push('\n');
}

fn push_error_report(md: &mut String, report: &Report) {
    if report.errors_by_status.is_empty() {
        return;
    }

    md.push_str("## DETAILED ERROR REPORT\n\n");

    for (status, entries) in &report.errors_by_status {
        match status {
            PageStatus::Unknown => md.push_str("### FAILED REQUESTS\n\n"),
            PageStatus::Http(code) => md.push_str(&format!("#### HTTP {} ERRORS\n\n", code)),
        }

        for entry in entries {
            match &entry.detail {
                Some(detail) => md.push_str(&format!("- {} ({})\n", entry.url, detail)),
                None => md.push_str(&format!("- {}\n", entry.url)),
            }
        }
        md.push('\n');
    }
}

fn push_pages_by_depth(md: &mut String, report: &Report) {
    md.push_str("## ALL VISITED PAGES BY DEPTH\n\n");

    for (depth, pages) in &report.pages_by_depth {
        md.push_str(&format!("### Depth {} ({} pages)\n\n", depth, pages.len()));
        for page in pages {
            md.push_str(&format!("- [{}] {}\n", page.status, page.url));
        }
        md.push('\n');
    }
}
