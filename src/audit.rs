//! The single batch audit pass over a site root.

use std::path::Path;

use crate::config::Config;
use crate::events;
use crate::report::{AuditReport, FileStatus};
use crate::resolver;
use crate::rules;
use crate::summary::{self, PageSummary};
use crate::types::{Finding, FindingKind};

/// Audit the site at `root` and return every finding.
///
/// Findings never abort the pass. Pages are read once each, in manifest order;
/// cross-page checks start after every readable page has been summarised.
pub fn run(root: &Path, config: &Config) -> AuditReport {
    let mut findings = Vec::new();

    tracing::info!("auditing file structure");
    let files: Vec<FileStatus> = config
        .manifest
        .entries()
        .iter()
        .map(|entry| {
            return FileStatus {
                exists: root.join(&entry.path).exists(),
                path: entry.path.clone(),
            };
        })
        .collect();
    for file in files.iter().filter(|f| return !f.exists) {
        findings.push(Finding::new(
            file.path.clone(),
            FindingKind::MissingFile,
            format!("Missing required file: {}", file.path),
        ));
    }

    tracing::info!("auditing HTML pages");
    let mut summaries: Vec<PageSummary> = Vec::new();
    for entry in config.manifest.pages() {
        let path = root.join(&entry.path);
        if !path.exists() {
            continue;
        }
        if let Some(summary) = audit_page(&path, &entry.path, &mut findings) {
            summaries.push(summary);
        }
    }

    if !summaries.is_empty() {
        tracing::info!("checking internal links");
        findings.extend(resolver::resolve_links(&summaries, |p| return root.join(p).exists()));
        tracing::info!("checking sidebar consistency");
        findings.extend(rules::check_sidebar_coverage(&summaries, config.sidebar_min_links));
    }

    return AuditReport { files, findings };
}

/// Read, summarise and rule-check one page.
///
/// An unreadable page yields one finding and no summary, which keeps it out of
/// link resolution as a source while it still exists as a link target.
fn audit_page(path: &Path, page: &str, findings: &mut Vec<Finding>) -> Option<PageSummary> {
    tracing::debug!(page, "summarising");
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(page, error = %e, "unreadable");
            findings.push(Finding::new(
                page,
                FindingKind::UnreadableFile,
                format!("Cannot read file - {e}"),
            ));
            return None;
        },
    };
    let summary = summary::summarize(page, events::parse(&content), findings);
    findings.extend(rules::check_page(&summary));
    return Some(summary);
}
