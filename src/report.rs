//! Aggregated audit result, quality checklist, and its two renderings:
//! the Markdown report document and the console summary.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Error;
use crate::types::{ChapterSection, Finding, FindingKind, Severity};

/// Errors echoed to the console before the remainder is summarised.
const CONSOLE_ERROR_LIMIT: usize = 5;

/// Checklist rows: label and the finding kinds that fail it.
const CHECKLIST: [(&str, &[FindingKind]); 10] = [
    ("All required pages exist", &[FindingKind::MissingFile]),
    ("All pages readable", &[FindingKind::UnreadableFile]),
    ("HTML structure valid", &[FindingKind::StructuralViolation]),
    ("CSS/JS paths correct", &[FindingKind::AssetPathMismatch]),
    ("Identifiers unique", &[FindingKind::DuplicateIdentifier]),
    ("No broken internal links", &[FindingKind::BrokenLink, FindingKind::BrokenAnchor]),
    ("Chapters have code blocks", &[FindingKind::ChapterContentMissing(ChapterSection::CodeBlocks)]),
    ("Chapters have practice sections", &[FindingKind::ChapterContentMissing(ChapterSection::Practice)]),
    ("Chapters have error guidance", &[FindingKind::ChapterContentMissing(ChapterSection::CommonErrors)]),
    ("Sidebar navigation complete", &[FindingKind::SidebarIncomplete, FindingKind::CanonicalSidebarMissing]),
];

/// Everything one audit pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    /// Existence of each manifest entry, in manifest order.
    pub files: Vec<FileStatus>,
    /// All findings in emission order.
    pub findings: Vec<Finding>,
}

impl AuditReport {
    /// Pass/fail state of every checklist item, in fixed order.
    pub fn checklist(&self) -> Vec<ChecklistItem> {
        return CHECKLIST
            .iter()
            .map(|&(label, failing)| {
                return ChecklistItem {
                    label,
                    passed: !self.findings.iter().any(|f| return failing.contains(&f.kind)),
                };
            })
            .collect();
    }

    /// Number of error findings.
    pub fn error_count(&self) -> usize {
        return self.errors().count();
    }

    /// Error findings in emission order.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        return self.with_severity(Severity::Error);
    }

    /// The audit passes when no error was found. Warnings never fail it.
    pub fn passed(&self) -> bool {
        return self.error_count() == 0;
    }

    /// Number of warning findings.
    pub fn warning_count(&self) -> usize {
        return self.warnings().count();
    }

    /// Warning findings in emission order.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        return self.with_severity(Severity::Warning);
    }

    /// Findings of one severity.
    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        return self.findings.iter().filter(move |f| return f.severity() == severity);
    }
}

/// One row of the quality checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Display text.
    pub label: &'static str,
    /// No finding of a failing kind exists.
    pub passed: bool,
}

/// Whether a manifest entry exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Present at the expected location.
    pub exists: bool,
    /// Site-relative path.
    pub path: String,
}

/// Check or cross mark.
const fn mark(ok: bool) -> &'static str {
    return if ok { "✅" } else { "❌" };
}

/// Print the status, counts and the first few errors to stdout.
pub fn print_summary(report: &AuditReport, report_path: &Path) {
    println!("Audit report written to {}", report_path.display());
    println!();
    println!("AUDIT SUMMARY");
    println!("Status: {}", status_label(report));
    println!("Errors: {}", report.error_count());
    println!("Warnings: {}", report.warning_count());

    if report.passed() {
        return;
    }
    println!();
    println!("First errors:");
    for error in report.errors().take(CONSOLE_ERROR_LIMIT) {
        println!("  {} {error}", mark(false));
    }
    let remaining = report.error_count().saturating_sub(CONSOLE_ERROR_LIMIT);
    if remaining > 0 {
        println!("  ... and {remaining} more");
    }
}

/// Render the Markdown report document.
pub fn render_markdown(report: &AuditReport, generated_at: &str) -> String {
    let mut out = String::new();
    // Writing to a String never fails.
    let _ = writeln!(out, "# Site Audit Report\n");
    let _ = writeln!(out, "**Generated:** {generated_at}\n");
    let _ = writeln!(out, "## Overall Status: {} {}\n", status_label(report), mark(report.passed()));
    let _ = writeln!(out, "- **Errors:** {}", report.error_count());
    let _ = writeln!(out, "- **Warnings:** {}\n", report.warning_count());

    let _ = writeln!(out, "## File Structure\n");
    for file in &report.files {
        let _ = writeln!(out, "- {} `{}`", mark(file.exists), file.path);
    }
    out.push('\n');

    if report.error_count() > 0 {
        let _ = writeln!(out, "## Errors\n");
        for error in report.errors() {
            let _ = writeln!(out, "- ❌ {error}");
        }
        out.push('\n');
    }

    if report.warning_count() > 0 {
        let _ = writeln!(out, "## Warnings\n");
        for warning in report.warnings() {
            let _ = writeln!(out, "- ⚠️ {warning}");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Quality Checklist\n");
    for item in report.checklist() {
        let _ = writeln!(out, "- {} {}", mark(item.passed), item.label);
    }
    return out;
}

/// `PASS` or `FAIL`.
fn status_label(report: &AuditReport) -> &'static str {
    return if report.passed() { "PASS" } else { "FAIL" };
}

/// Write the rendered report, creating parent directories as needed.
///
/// # Errors
///
/// Returns `Error::ReportWrite` if the directory or file cannot be written.
pub fn write_report(path: &Path, contents: &str) -> Result<(), Error> {
    let wrap = |source: std::io::Error| {
        return Error::ReportWrite {
            path: path.to_path_buf(),
            source,
        };
    };
    if let Some(parent) = path.parent().filter(|p| return !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, contents).map_err(wrap)?;
    return Ok(());
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    fn report(findings: Vec<Finding>) -> AuditReport {
        return AuditReport {
            files: vec![
                FileStatus {
                    exists: true,
                    path: "index.html".to_string(),
                },
                FileStatus {
                    exists: false,
                    path: "404.html".to_string(),
                },
            ],
            findings,
        };
    }

    #[test]
    fn warnings_never_fail_the_audit() {
        let r = report(vec![Finding::new(
            "index.html",
            FindingKind::SidebarIncomplete,
            "Sidebar may be incomplete",
        )]);
        assert!(r.passed());
        assert_eq!(r.error_count(), 0);
        assert_eq!(r.warning_count(), 1);
        let sidebar = r.checklist().into_iter().find(|i| return i.label == "Sidebar navigation complete");
        assert_eq!(sidebar.map(|i| return i.passed), Some(false));
    }

    #[test]
    fn checklist_matches_on_kind() {
        let r = report(vec![
            Finding::new("404.html", FindingKind::MissingFile, "Missing required file: 404.html"),
            Finding::new(
                "chapters/04-loops.html",
                FindingKind::ChapterContentMissing(ChapterSection::Practice),
                "anything at all",
            ),
        ]);
        assert!(!r.passed());
        let failed: Vec<&str> = r.checklist().iter().filter(|i| return !i.passed).map(|i| return i.label).collect();
        assert_eq!(failed, vec!["All required pages exist", "Chapters have practice sections"]);
        assert_eq!(r.checklist().len(), 10);
    }

    #[test]
    fn markdown_lists_sections_in_order() {
        let r = report(vec![
            Finding::new("404.html", FindingKind::MissingFile, "Missing required file: 404.html"),
            Finding::new("index.html", FindingKind::SidebarIncomplete, "Sidebar may be incomplete"),
        ]);
        let md = render_markdown(&r, "2025-01-01T00:00:00+00:00");
        assert!(md.starts_with("# Site Audit Report\n"));
        assert!(md.contains("**Generated:** 2025-01-01T00:00:00+00:00"));
        assert!(md.contains("## Overall Status: FAIL ❌"));
        assert!(md.contains("- ✅ `index.html`\n- ❌ `404.html`"));
        assert!(md.contains("- ❌ 404.html: Missing required file: 404.html"));
        assert!(md.contains("- ⚠️ index.html: Sidebar may be incomplete"));
        let errors = md.find("## Errors").unwrap();
        let warnings = md.find("## Warnings").unwrap();
        let checklist = md.find("## Quality Checklist").unwrap();
        assert!(errors < warnings && warnings < checklist);
    }

    #[test]
    fn clean_report_omits_empty_sections() {
        let md = render_markdown(&report(Vec::new()), "now");
        assert!(md.contains("## Overall Status: PASS ✅"));
        assert!(!md.contains("## Errors"));
        assert!(!md.contains("## Warnings"));
    }

    #[test]
    fn write_report_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools").join("audit-report.md");
        write_report(&path, "# hi\n").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi\n");
    }
}
