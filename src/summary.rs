//! Per-page structural summary accumulated from the event stream.

use std::collections::BTreeSet;

use crate::events::{Attributes, StructuralEvent};
use crate::types::{Category, Finding, FindingKind};

/// Everything the rule checker and link resolver need to know about one page.
#[allow(clippy::struct_excessive_bools, reason = "one presence flag per audited element")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// Derived from the path, not the content.
    pub category: Category,
    /// Number of `<code class="language-c">` elements.
    pub code_block_count: usize,
    /// Directory nesting below the site root.
    pub depth: usize,
    /// `<!DOCTYPE html>` seen.
    pub has_doctype: bool,
    /// `<footer>` seen.
    pub has_footer: bool,
    /// `<header>` seen.
    pub has_header: bool,
    /// `<html lang=...>` seen.
    pub has_lang_attribute: bool,
    /// `<main>` seen.
    pub has_main: bool,
    /// `<nav>` whose class contains `sidebar` seen.
    pub has_sidebar_nav: bool,
    /// Number of `<h1>` elements.
    pub heading_count: usize,
    /// Every distinct `id` value on the page.
    pub identifiers: BTreeSet<String>,
    /// An h2/h3 mentions "common errors".
    pub mentions_common_errors: bool,
    /// An h2/h3 mentions "practice".
    pub mentions_practice: bool,
    /// `href` values of anchors, in document order.
    pub outbound_links: Vec<String>,
    /// Site-relative path with `/` separators.
    pub page: String,
    /// `src` values of scripts, in document order.
    pub script_refs: Vec<String>,
    /// `href` values of stylesheet links, in document order.
    pub stylesheet_refs: Vec<String>,
}

impl PageSummary {
    /// Empty summary for `page`, with category and depth taken from the path.
    pub fn new(page: &str) -> Self {
        return Self {
            category: Category::from_path(page),
            code_block_count: 0,
            depth: page_depth(page),
            has_doctype: false,
            has_footer: false,
            has_header: false,
            has_lang_attribute: false,
            has_main: false,
            has_sidebar_nav: false,
            heading_count: 0,
            identifiers: BTreeSet::new(),
            mentions_common_errors: false,
            mentions_practice: false,
            outbound_links: Vec::new(),
            page: page.to_string(),
            script_refs: Vec::new(),
            stylesheet_refs: Vec::new(),
        };
    }
}

/// Accumulator state while one page's events stream past.
struct SummaryBuilder<'f> {
    /// Duplicate-id findings go here the moment they are detected.
    findings: &'f mut Vec<Finding>,
    /// The h2/h3 currently open, if any. Text is only inspected inside one.
    open_heading: Option<String>,
    /// The summary under construction.
    summary: PageSummary,
}

impl SummaryBuilder<'_> {
    /// Fold one event into the summary.
    fn observe(&mut self, event: &StructuralEvent<'_>) {
        match event {
            StructuralEvent::Close(name) => {
                if self.open_heading.as_deref() == Some(name.as_str()) {
                    self.open_heading = None;
                }
            },
            StructuralEvent::Declaration(content) => {
                let lowered = content.trim_start().to_ascii_lowercase();
                if lowered.starts_with("doctype html") {
                    self.summary.has_doctype = true;
                }
            },
            StructuralEvent::Open(name, attrs) => {
                self.observe_open(name, attrs);
                self.record_identifier(attrs);
            },
            StructuralEvent::Text(text) => {
                if self.open_heading.is_none() {
                    return;
                }
                let lowered = text.to_lowercase();
                if lowered.contains("practice") {
                    self.summary.mentions_practice = true;
                }
                if lowered.contains("common errors") {
                    self.summary.mentions_common_errors = true;
                }
            },
        }
    }

    /// Apply the per-tag accumulation rules.
    fn observe_open(&mut self, name: &str, attrs: &Attributes) {
        let summary = &mut self.summary;
        match name {
            "a" => push_non_empty(&mut summary.outbound_links, attrs.get("href")),
            "code" => {
                if attrs.get("class") == Some("language-c") {
                    summary.code_block_count = summary.code_block_count.saturating_add(1);
                }
            },
            "footer" => summary.has_footer = true,
            "h1" => summary.heading_count = summary.heading_count.saturating_add(1),
            "h2" | "h3" => self.open_heading = Some(name.to_string()),
            "header" => summary.has_header = true,
            "html" => {
                if attrs.contains("lang") {
                    summary.has_lang_attribute = true;
                }
            },
            "link" => {
                if attrs.get("rel") == Some("stylesheet") {
                    push_non_empty(&mut summary.stylesheet_refs, attrs.get("href"));
                }
            },
            "main" => summary.has_main = true,
            // Substring containment, not class-list membership: `sidebar-left` counts.
            "nav" => {
                if attrs.get("class").is_some_and(|c| return c.contains("sidebar")) {
                    summary.has_sidebar_nav = true;
                }
            },
            "script" => push_non_empty(&mut summary.script_refs, attrs.get("src")),
            _ => {},
        }
    }

    /// Track `id` values, reporting the second occurrence of any value.
    fn record_identifier(&mut self, attrs: &Attributes) {
        let Some(id) = attrs.get("id").filter(|id| return !id.is_empty()) else {
            return;
        };
        if self.summary.identifiers.contains(id) {
            self.findings.push(Finding::new(
                self.summary.page.clone(),
                FindingKind::DuplicateIdentifier,
                format!("Duplicate ID: {id}"),
            ));
            return;
        }
        self.summary.identifiers.insert(id.to_string());
    }
}

/// Number of directories between the site root and `page`.
pub fn page_depth(page: &str) -> usize {
    return page.matches('/').count();
}

/// Append `value` when it is present and non-empty.
fn push_non_empty(list: &mut Vec<String>, value: Option<&str>) {
    if let Some(v) = value.filter(|v| return !v.is_empty()) {
        list.push(v.to_string());
    }
}

/// Consume one page's events and return its summary.
///
/// Duplicate identifiers are appended to `findings` as they are encountered,
/// so their position in the run's finding order matches the document.
pub fn summarize<'e>(
    page: &str,
    events: impl IntoIterator<Item = StructuralEvent<'e>>,
    findings: &mut Vec<Finding>,
) -> PageSummary {
    let mut builder = SummaryBuilder {
        findings,
        open_heading: None,
        summary: PageSummary::new(page),
    };
    for event in events {
        builder.observe(&event);
    }
    return builder.summary;
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, reason = "test assertions on known finding positions")]
mod tests {
    use super::*;
    use crate::events;

    fn summarize_str(page: &str, html: &str) -> (PageSummary, Vec<Finding>) {
        let mut findings = Vec::new();
        let summary = summarize(page, events::parse(html), &mut findings);
        return (summary, findings);
    }

    #[test]
    fn records_landmarks_and_document_flags() {
        let html = r#"<!doctype HTML><html lang="en"><header></header>
            <nav class="sidebar" aria-label="Course"></nav><main><h1>T</h1></main><footer></footer></html>"#;
        let (s, findings) = summarize_str("index.html", html);
        assert!(s.has_doctype && s.has_lang_attribute);
        assert!(s.has_header && s.has_sidebar_nav && s.has_main && s.has_footer);
        assert_eq!(s.heading_count, 1);
        assert_eq!(s.depth, 0);
        assert_eq!(s.category, Category::Root);
        assert!(findings.is_empty());
    }

    #[test]
    fn sidebar_class_uses_substring_match() {
        let (s, _) = summarize_str("a.html", r#"<nav class="main-sidebar-left">"#);
        assert!(s.has_sidebar_nav);
        let (s, _) = summarize_str("a.html", r#"<nav class="topbar">"#);
        assert!(!s.has_sidebar_nav);
    }

    #[test]
    fn collects_refs_and_links_in_order() {
        let html = r##"<link rel="stylesheet" href="../assets/styles.css"><link rel="icon" href="f.svg">
            <link rel="stylesheet" href="../assets/quiz.css"><script src="../assets/app.js"></script>
            <script>inline()</script><a href="#x">x</a><a>no href</a><a href="../index.html">home</a>"##;
        let (s, _) = summarize_str("chapters/01-introduction.html", html);
        assert_eq!(s.stylesheet_refs, vec!["../assets/styles.css", "../assets/quiz.css"]);
        assert_eq!(s.script_refs, vec!["../assets/app.js"]);
        assert_eq!(s.outbound_links, vec!["#x", "../index.html"]);
        assert_eq!(s.depth, 1);
        assert_eq!(s.category, Category::Chapter);
    }

    #[test]
    fn code_class_must_match_exactly() {
        let html = r#"<code class="language-c">a</code><code class="language-c extra">b</code><code>c</code>"#;
        let (s, _) = summarize_str("chapters/02-basics.html", html);
        assert_eq!(s.code_block_count, 1);
    }

    #[test]
    fn duplicate_identifier_reported_once_at_second_occurrence() {
        let html = r#"<section id="intro"><h2 id="intro">Intro</h2></section><p id="other"></p>"#;
        let (s, findings) = summarize_str("practice/arrays.html", html);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::DuplicateIdentifier);
        assert_eq!(findings[0].message, "Duplicate ID: intro");
        assert_eq!(findings[0].page, "practice/arrays.html");
        assert_eq!(s.identifiers.iter().filter(|id| return id.as_str() == "intro").count(), 1);
        assert!(s.identifiers.contains("other"));
    }

    #[test]
    fn heading_text_scoped_to_open_h2_or_h3() {
        let html = "<h2>Practice <em>Problems</em></h2><p>common errors here do not count</p><h3>Common Errors</h3>";
        let (s, _) = summarize_str("chapters/03-control-flow.html", html);
        assert!(s.mentions_practice);
        assert!(s.mentions_common_errors);

        let (s, _) = summarize_str("chapters/03-control-flow.html", "<h2>Intro</h2><p>practice and common errors</p>");
        assert!(!s.mentions_practice);
        assert!(!s.mentions_common_errors);
    }

    #[test]
    fn nested_inline_text_inside_heading_counts() {
        let (s, _) = summarize_str("chapters/04-loops.html", "<h2><span>Practice</span> Set</h2>");
        assert!(s.mentions_practice);
    }

    #[test]
    fn single_heading_mentioning_both_sets_both() {
        let (s, _) = summarize_str("chapters/04-loops.html", "<h3>Practice: Common Errors</h3>");
        assert!(s.mentions_practice && s.mentions_common_errors);
    }

    #[test]
    fn counts_every_h1() {
        let (s, _) = summarize_str("404.html", "<h1>a</h1><div><h1>b</h1></div>");
        assert_eq!(s.heading_count, 2);
    }
}
