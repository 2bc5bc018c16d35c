//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of crawl results,
//! including statistics, a page listing, and broken links.

use crate::output::summary::{CrawlSummary, OutputResult};
use crate::state::{Page, PageState};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary of a crawl
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `pages` - Every page of the crawl
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(
    summary: &CrawlSummary,
    pages: &[Page],
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary, pages)?;

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
///
/// Pages are listed sorted by URL.
pub fn format_markdown_summary(summary: &CrawlSummary, pages: &[Page]) -> OutputResult<String> {
    let stats = &summary.statistics;
    let mut md = String::new();

    writeln!(md, "# Crawl Summary\n")?;

    // Run metadata
    writeln!(md, "## Run Information\n")?;
    writeln!(md, "- **Seed**: {}", summary.seed)?;
    writeln!(md, "- **Started**: {}", summary.started_at.to_rfc3339())?;
    writeln!(md, "- **Finished**: {}", summary.finished_at.to_rfc3339())?;
    writeln!(md, "- **Duration**: {:.2} seconds", summary.duration_seconds())?;
    writeln!(md, "- **Outcome**: {}", summary.outcome)?;
    writeln!(md, "- **Fetchers**: {}\n", summary.fetchers)?;

    // Overall statistics
    writeln!(md, "## Overall Statistics\n")?;
    writeln!(md, "- **Total Pages**: {}", stats.total_pages)?;
    writeln!(md, "- **Ready**: {}", stats.ready_pages)?;
    writeln!(md, "- **Pending**: {}", stats.pending_pages)?;
    writeln!(md, "- **HTML Pages**: {}", stats.html_pages)?;
    writeln!(md, "- **Internal Links**: {}", stats.internal_links)?;
    writeln!(md, "- **External Links**: {}", stats.external_links)?;
    writeln!(md, "- **Failed Fetches**: {}", stats.failed_fetches)?;
    writeln!(md, "- **Success Rate**: {:.2}%", stats.success_rate())?;
    writeln!(md, "- **Pages/Second**: {:.2}\n", summary.pages_per_second())?;

    if !stats.pages_by_status.is_empty() {
        writeln!(md, "## Status Codes\n")?;
        writeln!(md, "| Status | Pages |")?;
        writeln!(md, "|--------|-------|")?;
        for (status, count) in &stats.pages_by_status {
            if *status == 0 {
                writeln!(md, "| no response | {} |", count)?;
            } else {
                writeln!(md, "| {} | {} |", status, count)?;
            }
        }
        writeln!(md)?;
    }

    if !stats.media_by_kind.is_empty() {
        writeln!(md, "## Media\n")?;
        writeln!(md, "| Kind | Sources |")?;
        writeln!(md, "|------|---------|")?;
        for (kind, count) in &stats.media_by_kind {
            writeln!(md, "| {} | {} |", kind, count)?;
        }
        writeln!(md)?;
    }

    let mut sorted: Vec<&Page> = pages.iter().collect();
    sorted.sort_by(|a, b| a.url().cmp(b.url()));

    let broken: Vec<&&Page> = sorted
        .iter()
        .filter(|p| p.state == PageState::Ready && (p.status_code == 0 || p.status_code >= 400))
        .collect();
    if !broken.is_empty() {
        writeln!(md, "## Broken Links\n")?;
        writeln!(md, "| URL | Status |")?;
        writeln!(md, "|-----|--------|")?;
        for page in broken {
            writeln!(md, "| {} | {} |", escape_cell(page.url()), page.status_code)?;
        }
        writeln!(md)?;
    }

    writeln!(md, "## Pages\n")?;
    writeln!(md, "| URL | State | Status | MIME | Title |")?;
    writeln!(md, "|-----|-------|--------|------|-------|")?;
    for page in sorted {
        writeln!(
            md,
            "| {} | {} | {} | {} | {} |",
            escape_cell(page.url()),
            page.state,
            page.status_code,
            escape_cell(page.mime_type.as_deref().unwrap_or("-")),
            escape_cell(page.title.as_deref().unwrap_or("-"))
        )?;
    }

    Ok(md)
}

/// Keeps a value from breaking out of its table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
