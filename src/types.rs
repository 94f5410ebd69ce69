/// Core domain types for siteaudit pages, findings, and severities.
use std::fmt;

/// Page category, derived from the first path segment rather than content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Pages under `chapters/`. Subject to the chapter content rules.
    Chapter,
    /// Pages under `practice/`.
    Practice,
    /// Pages under `reference/`.
    Reference,
    /// Everything else, e.g. `index.html` and `404.html`.
    Root,
}

impl Category {
    /// Classify a site-relative path (`/`-separated).
    pub fn from_path(path: &str) -> Self {
        return match path.split_once('/') {
            Some(("chapters", _)) => Self::Chapter,
            Some(("practice", _)) => Self::Practice,
            Some(("reference", _)) => Self::Reference,
            _ => Self::Root,
        };
    }
}

/// Which chapter-only content requirement a page failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChapterSection {
    /// No `<code class="language-c">` element.
    CodeBlocks,
    /// No h2/h3 heading mentioning "common errors".
    CommonErrors,
    /// No h2/h3 heading mentioning "practice".
    Practice,
}

/// One reported audit result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Finding {
    /// What rule produced this finding.
    pub kind: FindingKind,
    /// Human-readable description, stable across runs.
    pub message: String,
    /// Site-relative path of the page (or required file) the finding is about.
    pub page: String,
}

impl Finding {
    /// Build a finding; severity follows from `kind`.
    pub fn new(page: impl Into<String>, kind: FindingKind, message: impl Into<String>) -> Self {
        return Self {
            kind,
            message: message.into(),
            page: page.into(),
        };
    }

    /// Severity implied by the finding kind.
    pub const fn severity(&self) -> Severity {
        return self.kind.severity();
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}: {}", self.page, self.message);
    }
}

/// Finding taxonomy. Every kind is non-fatal to the audit pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// A same-page or cross-page fragment names an id that does not exist.
    BrokenAnchor,
    /// An internal link resolves to nothing on disk.
    BrokenLink,
    /// `index.html` could not be summarised, so sidebar coverage has no reference.
    CanonicalSidebarMissing,
    /// A chapter lacks code blocks, a practice section, or error guidance.
    ChapterContentMissing(ChapterSection),
    /// The same `id` value appears twice on one page.
    DuplicateIdentifier,
    /// The depth-relative stylesheet or script path is not referenced.
    AssetPathMismatch,
    /// A manifest entry does not exist.
    MissingFile,
    /// A page links to too few course pages to carry the full sidebar.
    SidebarIncomplete,
    /// Doctype, lang attribute, h1 count, or a landmark element is wrong.
    StructuralViolation,
    /// The file exists but could not be read as UTF-8 text.
    UnreadableFile,
}

impl FindingKind {
    /// Only the sidebar coverage heuristic is advisory.
    pub const fn severity(self) -> Severity {
        return match self {
            Self::SidebarIncomplete => Severity::Warning,
            _ => Severity::Error,
        };
    }
}

/// Finding severity. Only errors affect the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Fails the audit.
    Error,
    /// Reported, never fails the audit.
    Warning,
}
