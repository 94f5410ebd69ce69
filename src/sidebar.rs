//! Copies the canonical sidebar from `index.html` into every course page.

use std::path::Path;

use regex::{Captures, NoExpand, Regex};
use walkdir::WalkDir;

use crate::error::Error;
use crate::summary::page_depth;

/// Directories whose pages receive the canonical sidebar.
pub const SECTIONS: [&str; 3] = ["chapters", "practice", "reference"];

/// What happened to one target page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The page has no sidebar nav to replace.
    NoSidebar,
    /// The sidebar differed and was (or, with `--check`, would be) rewritten.
    Synced,
    /// The page already carries the adjusted sidebar.
    Unchanged,
}

/// Outcome for one page, keyed by its site-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Result of the comparison.
    pub outcome: SyncOutcome,
    /// Site-relative path with `/` separators.
    pub page: String,
}

/// Compiled patterns used to extract and adapt the sidebar.
pub struct SidebarPatterns {
    /// A single `<a ...>` start tag.
    anchor: Regex,
    /// ` aria-current="page"` inside a tag.
    aria_current: Regex,
    /// The `class="..."` attribute inside a tag.
    class_attr: Regex,
    /// The `href="..."` attribute inside a tag.
    href_attr: Regex,
    /// A `<nav>` whose class contains `sidebar`, through its `</nav>`.
    nav: Regex,
    /// Root-relative site hrefs that need a depth prefix.
    site_href: Regex,
}

impl SidebarPatterns {
    /// Compile every pattern.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRegex` if a pattern fails to compile.
    pub fn new() -> Result<Self, Error> {
        return Ok(Self {
            anchor: Regex::new(r"<a\b[^>]*>")?,
            aria_current: Regex::new(r#"\s+aria-current="page""#)?,
            class_attr: Regex::new(r#"(\s)class="([^"]*)""#)?,
            href_attr: Regex::new(r#"\shref="([^"]*)""#)?,
            nav: Regex::new(r#"(?s)<nav\b[^>]*\sclass="[^"]*sidebar[^"]*"[^>]*>.*?</nav>"#)?,
            site_href: Regex::new(r#"(\s)href="/?((?:assets|chapters|practice|reference)/[^"]*|index\.html[^"]*)""#)?,
        });
    }

    /// Prefix site hrefs so they resolve from a page `depth` levels deep.
    pub fn adjust_paths(&self, sidebar: &str, depth: usize) -> String {
        let prefix = "../".repeat(depth);
        return self
            .site_href
            .replace_all(sidebar, |caps: &Captures<'_>| {
                let space = caps.get(1).map_or(" ", |m| return m.as_str());
                let target = caps.get(2).map_or("", |m| return m.as_str());
                return format!(r#"{space}href="{prefix}{target}""#);
            })
            .into_owned();
    }

    /// The first sidebar nav block in `html`, if any.
    pub fn extract<'h>(&self, html: &'h str) -> Option<&'h str> {
        return self.nav.find(html).map(|m| return m.as_str());
    }

    /// Clear every active marker, then mark the anchor whose href is `own_href`.
    pub fn mark_active(&self, sidebar: &str, own_href: &str) -> String {
        return self
            .anchor
            .replace_all(sidebar, |caps: &Captures<'_>| {
                let tag = caps.get(0).map_or("", |m| return m.as_str());
                let cleared = self.clear_active(tag);
                let is_own = self
                    .href_attr
                    .captures(&cleared)
                    .and_then(|c| return c.get(1))
                    .is_some_and(|href| return href.as_str() == own_href);
                if is_own {
                    return self.set_active(&cleared);
                }
                return cleared;
            })
            .into_owned();
    }

    /// Adapted sidebar for `page`, ready to splice into that page.
    pub fn sidebar_for(&self, canonical: &str, page: &str) -> String {
        let depth = page_depth(page);
        let adjusted = self.adjust_paths(canonical, depth);
        return self.mark_active(&adjusted, &format!("{}{page}", "../".repeat(depth)));
    }

    /// Remove the `active` class token and `aria-current` from one tag.
    fn clear_active(&self, tag: &str) -> String {
        let without_aria = self.aria_current.replace_all(tag, "");
        return self
            .class_attr
            .replace(&without_aria, |caps: &Captures<'_>| {
                let space = caps.get(1).map_or(" ", |m| return m.as_str());
                let classes: Vec<&str> = caps
                    .get(2)
                    .map_or("", |m| return m.as_str())
                    .split_whitespace()
                    .filter(|c| return *c != "active")
                    .collect();
                return format!(r#"{space}class="{}""#, classes.join(" "));
            })
            .into_owned();
    }

    /// Add the `active` class token and `aria-current="page"` to one tag.
    fn set_active(&self, tag: &str) -> String {
        let has_class = self.class_attr.is_match(tag);
        let with_class = self
            .class_attr
            .replace(tag, |caps: &Captures<'_>| {
                let space = caps.get(1).map_or(" ", |m| return m.as_str());
                let existing = caps.get(2).map_or("", |m| return m.as_str()).trim();
                if existing.is_empty() {
                    return format!(r#"{space}class="active""#);
                }
                return format!(r#"{space}class="{existing} active""#);
            })
            .into_owned();
        let body = with_class.strip_suffix('>').unwrap_or(&with_class);
        let (body, close) = match body.strip_suffix('/') {
            Some(inner) => (inner.trim_end(), "/>"),
            None => (body.trim_end(), ">"),
        };
        if has_class {
            return format!(r#"{body} aria-current="page"{close}"#);
        }
        return format!(r#"{body} class="active" aria-current="page"{close}"#);
    }

    /// Replace every sidebar nav in `html` with `sidebar`.
    ///
    /// Returns `None` if `html` has no sidebar nav.
    pub fn splice(&self, html: &str, sidebar: &str) -> Option<String> {
        if !self.nav.is_match(html) {
            return None;
        }
        return Some(self.nav.replace_all(html, NoExpand(sidebar)).into_owned());
    }
}

/// Site-relative paths of every `*.html` directly inside a section directory,
/// sections in fixed order and files sorted by name.
fn sync_targets(root: &Path) -> Vec<String> {
    let mut targets = Vec::new();
    for section in SECTIONS {
        let dir = root.join(section);
        if !dir.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| return e.file_type().is_file())
            .filter(|e| return e.path().extension().is_some_and(|ext| return ext == "html"))
        {
            if let Some(name) = entry.file_name().to_str() {
                targets.push(format!("{section}/{name}"));
            }
        }
    }
    return targets;
}

/// Sync the canonical sidebar into every course page under `root`.
///
/// With `check` set nothing is written; the outcomes report what would change.
///
/// # Errors
///
/// Returns `Error::CanonicalSourceMissing` without `index.html`,
/// `Error::SidebarNotFound` if it has no sidebar nav,
/// or `Error::Io` if a page cannot be read or written.
pub fn sync(root: &Path, check: bool) -> Result<Vec<SyncResult>, Error> {
    let index_path = root.join("index.html");
    let index = match std::fs::read_to_string(&index_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::CanonicalSourceMissing { path: index_path });
        },
        Err(e) => return Err(Error::Io(e)),
    };
    tracing::info!(source = %index_path.display(), "using canonical sidebar");

    let patterns = SidebarPatterns::new()?;
    let Some(canonical) = patterns.extract(&index) else {
        return Err(Error::SidebarNotFound { path: index_path });
    };

    let mut results = Vec::new();
    for page in sync_targets(root) {
        let path = root.join(&page);
        let html = std::fs::read_to_string(&path)?;
        let sidebar = patterns.sidebar_for(canonical, &page);
        let outcome = match patterns.splice(&html, &sidebar) {
            None => {
                tracing::warn!(page = page.as_str(), "no sidebar found, skipping");
                SyncOutcome::NoSidebar
            },
            Some(updated) if updated == html => SyncOutcome::Unchanged,
            Some(updated) => {
                if !check {
                    std::fs::write(&path, updated)?;
                }
                tracing::debug!(page = page.as_str(), "sidebar updated");
                SyncOutcome::Synced
            },
        };
        results.push(SyncResult { outcome, page });
    }
    return Ok(results);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test setup")]
mod tests {
    use std::fs;

    use super::*;

    const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en"><body>
<nav class="sidebar" aria-label="Course Navigation">
  <a href="index.html" class="nav-link active" aria-current="page">Home</a>
  <a href="chapters/01-introduction.html" class="nav-link">Introduction</a>
  <a href="/chapters/02-basics.html">Basics</a>
  <a href="practice/arrays.html#easy-problems" class="nav-link">Arrays</a>
  <a href="https://example.com/reference/">External</a>
</nav>
</body></html>"#;

    fn page_with_sidebar(inner: &str) -> String {
        return format!("<html><body><nav class=\"sidebar\">{inner}</nav><main></main></body></html>");
    }

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), INDEX).unwrap();
        fs::create_dir_all(dir.path().join("chapters")).unwrap();
        fs::write(dir.path().join("chapters/01-introduction.html"), page_with_sidebar("<!-- empty -->")).unwrap();
        fs::write(dir.path().join("chapters/02-basics.html"), page_with_sidebar("")).unwrap();
        fs::create_dir_all(dir.path().join("practice")).unwrap();
        fs::write(dir.path().join("practice/arrays.html"), "<html><nav class=\"top\"></nav></html>").unwrap();
        fs::write(dir.path().join("practice/notes.txt"), "ignored").unwrap();
        return dir;
    }

    #[test]
    fn adjusts_site_paths_by_depth() {
        let patterns = SidebarPatterns::new().unwrap();
        let adjusted = patterns.adjust_paths(INDEX, 1);
        assert!(adjusted.contains(r#"href="../index.html""#));
        assert!(adjusted.contains(r#"href="../chapters/01-introduction.html""#));
        assert!(adjusted.contains(r#"href="../chapters/02-basics.html""#));
        assert!(adjusted.contains(r#"href="https://example.com/reference/""#));
        assert_eq!(patterns.adjust_paths(INDEX, 0).matches("../").count(), 0);
    }

    #[test]
    fn rewritten_hrefs_keep_the_whole_target() {
        let patterns = SidebarPatterns::new().unwrap();
        let sidebar = r#"<a href="index.html" class="nav-link">H</a><a href="chapters/01-introduction.html" class="nav-link">I</a><a href="practice/arrays.html#easy-problems">A</a><a href="index.html#welcome">W</a>"#;
        assert_eq!(
            patterns.adjust_paths(sidebar, 1),
            r#"<a href="../index.html" class="nav-link">H</a><a href="../chapters/01-introduction.html" class="nav-link">I</a><a href="../practice/arrays.html#easy-problems">A</a><a href="../index.html#welcome">W</a>"#
        );
        assert!(!patterns.adjust_paths(INDEX, 2).contains(r#""""#));
    }

    #[test]
    fn data_attributes_are_left_alone() {
        let patterns = SidebarPatterns::new().unwrap();
        let sidebar = r#"<a data-href="chapters/x.html" data-class="active" href="chapters/x.html">X</a>"#;
        let adjusted = patterns.adjust_paths(sidebar, 1);
        assert!(adjusted.contains(r#"data-href="chapters/x.html""#));
        assert!(adjusted.contains(r#" href="../chapters/x.html""#));
        let marked = patterns.mark_active(&adjusted, "../chapters/x.html");
        assert!(marked.contains(r#"data-class="active""#));
        assert!(marked.ends_with(r#"href="../chapters/x.html" class="active" aria-current="page">X</a>"#));
    }

    #[test]
    fn moves_active_marker_to_own_page() {
        let patterns = SidebarPatterns::new().unwrap();
        let canonical = patterns.extract(INDEX).unwrap();
        let sidebar = patterns.sidebar_for(canonical, "chapters/02-basics.html");
        assert_eq!(sidebar.matches(r#"aria-current="page""#).count(), 1);
        assert_eq!(sidebar.matches("active").count(), 1);
        assert!(sidebar.contains(r#"<a href="../chapters/02-basics.html" class="active" aria-current="page">"#));
        assert!(sidebar.contains(r#"<a href="../index.html" class="nav-link">"#));
    }

    #[test]
    fn adds_token_to_existing_class() {
        let patterns = SidebarPatterns::new().unwrap();
        let canonical = patterns.extract(INDEX).unwrap();
        let sidebar = patterns.sidebar_for(canonical, "chapters/01-introduction.html");
        assert!(sidebar.contains(
            r#"<a href="../chapters/01-introduction.html" class="nav-link active" aria-current="page">"#
        ));
    }

    #[test]
    fn sync_reports_outcomes_and_is_idempotent() {
        let dir = site();
        let first = sync(dir.path(), false).unwrap();
        let outcomes: Vec<(&str, SyncOutcome)> = first.iter().map(|r| return (r.page.as_str(), r.outcome)).collect();
        assert_eq!(outcomes, vec![
            ("chapters/01-introduction.html", SyncOutcome::Synced),
            ("chapters/02-basics.html", SyncOutcome::Synced),
            ("practice/arrays.html", SyncOutcome::NoSidebar),
        ]);

        let synced = fs::read_to_string(dir.path().join("chapters/02-basics.html")).unwrap();
        assert!(synced.contains(r#"aria-label="Course Navigation""#));
        assert!(synced.contains("<main></main>"));

        let second = sync(dir.path(), false).unwrap();
        assert!(
            second
                .iter()
                .all(|r| return r.outcome != SyncOutcome::Synced)
        );
        assert_eq!(fs::read_to_string(dir.path().join("chapters/02-basics.html")).unwrap(), synced);
    }

    #[test]
    fn check_mode_writes_nothing() {
        let dir = site();
        let before = fs::read_to_string(dir.path().join("chapters/02-basics.html")).unwrap();
        let results = sync(dir.path(), true).unwrap();
        assert!(results.iter().any(|r| return r.outcome == SyncOutcome::Synced));
        assert_eq!(fs::read_to_string(dir.path().join("chapters/02-basics.html")).unwrap(), before);
    }

    #[test]
    fn missing_index_and_missing_nav_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(sync(dir.path(), false), Err(Error::CanonicalSourceMissing { .. })));
        fs::write(dir.path().join("index.html"), "<nav class=\"top\"></nav>").unwrap();
        assert!(matches!(sync(dir.path(), false), Err(Error::SidebarNotFound { .. })));
    }
}
