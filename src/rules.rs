//! Fixed per-page rule set and the cross-page sidebar coverage heuristic.

use crate::summary::PageSummary;
use crate::types::{Category, ChapterSection, Finding, FindingKind};

/// Site-relative path of the shared script every page must load.
pub const APP_SCRIPT: &str = "assets/app.js";

/// Path prefixes a sidebar link points into.
const COURSE_SECTIONS: [&str; 3] = ["chapters/", "practice/", "reference/"];

/// Site-relative path of the shared stylesheet every page must load.
pub const STYLESHEET: &str = "assets/styles.css";

/// Evaluate every per-page rule against one summary.
///
/// All rules run; a failed structural check never hides a later one.
pub fn check_page(summary: &PageSummary) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut violation = |kind: FindingKind, message: String| {
        findings.push(Finding::new(summary.page.clone(), kind, message));
    };

    if !summary.has_doctype {
        violation(FindingKind::StructuralViolation, "Missing DOCTYPE html".to_string());
    }
    if !summary.has_lang_attribute {
        violation(FindingKind::StructuralViolation, "Missing <html lang> attribute".to_string());
    }
    if summary.heading_count != 1 {
        violation(
            FindingKind::StructuralViolation,
            format!("Expected 1 <h1>, found {}", summary.heading_count),
        );
    }

    let landmarks = [
        (summary.has_header, "Missing <header>"),
        (summary.has_sidebar_nav, "Missing <nav> with sidebar class"),
        (summary.has_main, "Missing <main>"),
        (summary.has_footer, "Missing <footer>"),
    ];
    for (present, message) in landmarks {
        if !present {
            violation(FindingKind::StructuralViolation, message.to_string());
        }
    }

    let css = expected_asset_path(summary.depth, STYLESHEET);
    if !summary.stylesheet_refs.contains(&css) {
        violation(
            FindingKind::AssetPathMismatch,
            format!("Missing or incorrect CSS link: expected {css}"),
        );
    }
    let js = expected_asset_path(summary.depth, APP_SCRIPT);
    if !summary.script_refs.contains(&js) {
        violation(
            FindingKind::AssetPathMismatch,
            format!("Missing or incorrect JS link: expected {js}"),
        );
    }

    if summary.category == Category::Chapter {
        let content = [
            (summary.code_block_count > 0, ChapterSection::CodeBlocks, "Chapter missing code blocks"),
            (summary.mentions_practice, ChapterSection::Practice, "Chapter missing Practice section"),
            (
                summary.mentions_common_errors,
                ChapterSection::CommonErrors,
                "Chapter missing Common Errors section",
            ),
        ];
        for (present, section, message) in content {
            if !present {
                violation(FindingKind::ChapterContentMissing(section), message.to_string());
            }
        }
    }

    return findings;
}

/// Warn about pages whose links cannot cover the full course sidebar.
///
/// Without a summary for `index.html` there is no canonical sidebar to compare
/// against, which is reported once as an error instead.
pub fn check_sidebar_coverage(summaries: &[PageSummary], min_links: usize) -> Vec<Finding> {
    if !summaries.iter().any(|s| return s.page == "index.html") {
        return vec![Finding::new(
            "index.html",
            FindingKind::CanonicalSidebarMissing,
            "Cannot find index.html for sidebar reference",
        )];
    }

    return summaries
        .iter()
        .filter(|s| return course_link_count(s) < min_links)
        .map(|s| return Finding::new(s.page.clone(), FindingKind::SidebarIncomplete, "Sidebar may be incomplete"))
        .collect();
}

/// Number of outbound links that point into a course section.
fn course_link_count(summary: &PageSummary) -> usize {
    return summary
        .outbound_links
        .iter()
        .filter(|link| return COURSE_SECTIONS.iter().any(|section| return link.contains(section)))
        .count();
}

/// `asset` as referenced from a page `depth` directories below the root.
pub fn expected_asset_path(depth: usize, asset: &str) -> String {
    return format!("{}{asset}", "../".repeat(depth));
}
