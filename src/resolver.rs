//! Cross-page link and anchor resolution over the page summaries.

use std::collections::HashMap;

use crate::summary::PageSummary;
use crate::types::{Finding, FindingKind};

/// How an outbound `href` is treated by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// `http://`, `https://` or `mailto:`. Never validated.
    External,
    /// A path relative to the linking page (or to the root, when it starts
    /// with `/`), with an optional fragment.
    Internal {
        /// The `#...` part without the `#`, if a `#` was present.
        fragment: Option<&'a str>,
        /// Everything before the `#`.
        path: &'a str,
    },
    /// `#id` on the linking page itself.
    SamePage(&'a str),
}

/// Classify a link string by its prefix.
pub fn classify(link: &str) -> LinkKind<'_> {
    if let Some(id) = link.strip_prefix('#') {
        return LinkKind::SamePage(id);
    }
    if ["http://", "https://", "mailto:"].iter().any(|scheme| return link.starts_with(scheme)) {
        return LinkKind::External;
    }
    return match link.split_once('#') {
        Some((path, fragment)) => LinkKind::Internal {
            fragment: Some(fragment),
            path,
        },
        None => LinkKind::Internal {
            fragment: None,
            path: link,
        },
    };
}

/// Resolve `target` textually against the directory of `page`.
///
/// `.` segments are dropped and `..` pops one segment. A leading `/` starts
/// from the site root. Returns `None` when the path climbs above the root.
pub fn normalize(page: &str, target: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    let relative = match target.strip_prefix('/') {
        Some(rooted) => rooted,
        None => {
            if let Some((dir, _)) = page.rsplit_once('/') {
                segments.extend(dir.split('/').filter(|s| return !s.is_empty()));
            }
            target
        },
    };
    for segment in relative.split('/') {
        if !push_normalized_segment(&mut segments, segment) {
            return None;
        }
    }
    return Some(segments.join("/"));
}

/// Apply one path segment. Returns `false` if `..` has nothing left to pop.
fn push_normalized_segment<'a>(segments: &mut Vec<&'a str>, segment: &'a str) -> bool {
    match segment {
        "" | "." => {},
        ".." => return segments.pop().is_some(),
        other => segments.push(other),
    }
    return true;
}

/// Validate every outbound link of every summarised page.
///
/// `exists` answers whether a normalized site-relative path is present on
/// disk. Fragments of cross-page links are only checked when the target page
/// was summarised in this run.
pub fn resolve_links(summaries: &[PageSummary], exists: impl Fn(&str) -> bool) -> Vec<Finding> {
    let by_page: HashMap<&str, &PageSummary> = summaries.iter().map(|s| return (s.page.as_str(), s)).collect();
    let mut findings = Vec::new();

    for summary in summaries {
        for link in &summary.outbound_links {
            if let Some(finding) = check_link(summary, link, &by_page, &exists) {
                findings.push(finding);
            }
        }
    }
    return findings;
}

/// Check a single link from `summary`. At most one finding per link.
fn check_link(
    summary: &PageSummary,
    link: &str,
    by_page: &HashMap<&str, &PageSummary>,
    exists: &impl Fn(&str) -> bool,
) -> Option<Finding> {
    let broken = |kind: FindingKind, message: String| return Some(Finding::new(summary.page.clone(), kind, message));

    match classify(link) {
        LinkKind::External => return None,
        LinkKind::SamePage(id) => {
            if summary.identifiers.contains(id) {
                return None;
            }
            return broken(FindingKind::BrokenAnchor, format!("Broken anchor #{id}"));
        },
        LinkKind::Internal { fragment, path } if path.is_empty() => {
            let id = fragment.unwrap_or_default();
            if id.is_empty() || summary.identifiers.contains(id) {
                return None;
            }
            return broken(FindingKind::BrokenAnchor, format!("Broken anchor {link}"));
        },
        LinkKind::Internal { fragment, path } => {
            let Some(resolved) = normalize(&summary.page, path).filter(|p| return exists(p)) else {
                return broken(FindingKind::BrokenLink, format!("Broken link to {link}"));
            };
            let Some(id) = fragment.filter(|id| return !id.is_empty()) else {
                return None;
            };
            let target = by_page.get(resolved.as_str())?;
            if target.identifiers.contains(id) {
                return None;
            }
            return broken(FindingKind::BrokenAnchor, format!("Broken anchor {link}"));
        },
    }
}
