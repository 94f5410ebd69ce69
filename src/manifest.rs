//! The required-file manifest: which files the site must contain and what
//! each one is.

use crate::types::Category;

/// What a manifest entry is, which decides the rules and skeleton it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Course chapter. Gets the chapter content rules and skeleton.
    Chapter,
    /// Stylesheet. Existence only.
    Css,
    /// Favicon or other image. Existence only.
    Icon,
    /// Script. Existence only.
    Js,
    /// Practice problem set.
    Practice,
    /// Reference page.
    Reference,
    /// Top-level page. Audited, never generated.
    Root,
}

impl EntryKind {
    /// Lowercase name as written in `.siteaudit.toml`.
    pub const fn as_str(self) -> &'static str {
        return match self {
            Self::Chapter => "chapter",
            Self::Css => "css",
            Self::Icon => "icon",
            Self::Js => "js",
            Self::Practice => "practice",
            Self::Reference => "reference",
            Self::Root => "root",
        };
    }

    /// The page category this kind implies; `None` for assets.
    pub const fn category(self) -> Option<Category> {
        return match self {
            Self::Chapter => Some(Category::Chapter),
            Self::Practice => Some(Category::Practice),
            Self::Reference => Some(Category::Reference),
            Self::Root => Some(Category::Root),
            Self::Css | Self::Icon | Self::Js => None,
        };
    }

    /// Whether the skeleton generator may create this kind of page.
    pub const fn is_generated(self) -> bool {
        return matches!(self, Self::Chapter | Self::Practice | Self::Reference);
    }
}

/// One required file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ManifestEntry {
    /// Entry classification.
    pub kind: EntryKind,
    /// Site-relative path with `/` separators.
    pub path: String,
    /// Display title for generated pages.
    #[serde(default)]
    pub title: Option<String>,
}

impl ManifestEntry {
    /// Whether the declared kind agrees with the category its path implies.
    pub fn kind_matches_path(&self) -> bool {
        return self
            .kind
            .category()
            .is_none_or(|category| return category == Category::from_path(&self.path));
    }

    /// Whether this entry is a page the audit summarises.
    pub fn is_page(&self) -> bool {
        return self.path.ends_with(".html");
    }
}

/// Ordered list of required files. Order drives report and finding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Entries in declaration order.
    entries: Vec<ManifestEntry>,
}

/// `(path, kind, title)` rows of the built-in course manifest.
const BUILTIN: [(&str, EntryKind, Option<&str>); 27] = [
    ("index.html", EntryKind::Root, None),
    ("assets/styles.css", EntryKind::Css, None),
    ("assets/app.js", EntryKind::Js, None),
    ("assets/quiz.js", EntryKind::Js, None),
    ("assets/quiz.css", EntryKind::Css, None),
    ("assets/favicon.svg", EntryKind::Icon, None),
    ("404.html", EntryKind::Root, None),
    ("chapters/01-introduction.html", EntryKind::Chapter, Some("Introduction")),
    ("chapters/02-basics.html", EntryKind::Chapter, Some("Basics")),
    ("chapters/03-control-flow.html", EntryKind::Chapter, Some("Control Flow")),
    ("chapters/04-loops.html", EntryKind::Chapter, Some("Loops")),
    ("chapters/05-arrays-strings.html", EntryKind::Chapter, Some("Arrays & Strings")),
    ("chapters/06-functions.html", EntryKind::Chapter, Some("Functions")),
    ("chapters/07-pointers.html", EntryKind::Chapter, Some("Pointers")),
    ("chapters/08-structures.html", EntryKind::Chapter, Some("Structures")),
    ("chapters/09-files.html", EntryKind::Chapter, Some("File I/O")),
    ("chapters/10-algorithms.html", EntryKind::Chapter, Some("Algorithms")),
    ("practice/basics.html", EntryKind::Practice, Some("Basics")),
    ("practice/control-loops.html", EntryKind::Practice, Some("Control & Loops")),
    ("practice/arrays.html", EntryKind::Practice, Some("Arrays")),
    ("practice/functions.html", EntryKind::Practice, Some("Functions")),
    ("practice/pointers.html", EntryKind::Practice, Some("Pointers")),
    ("practice/structures.html", EntryKind::Practice, Some("Structures")),
    ("practice/files.html", EntryKind::Practice, Some("Files")),
    ("reference/common-errors.html", EntryKind::Reference, Some("Common Errors")),
    ("reference/exam-guide.html", EntryKind::Reference, Some("Exam Guide")),
    ("reference/tools-resources.html", EntryKind::Reference, Some("Tools & Resources")),
];

impl Manifest {
    /// The course site's required files.
    pub fn builtin() -> Self {
        return Self {
            entries: BUILTIN
                .iter()
                .map(|&(path, kind, title)| {
                    return ManifestEntry {
                        kind,
                        path: path.to_string(),
                        title: title.map(str::to_string),
                    };
                })
                .collect(),
        };
    }

    /// All entries in manifest order.
    pub fn entries(&self) -> &[ManifestEntry] {
        return &self.entries;
    }

    /// Build a manifest from explicit entries, e.g. from configuration.
    pub const fn from_entries(entries: Vec<ManifestEntry>) -> Self {
        return Self { entries };
    }

    /// Entries whose path is an HTML page, in manifest order.
    pub fn pages(&self) -> impl Iterator<Item = &ManifestEntry> {
        return self.entries.iter().filter(|e| return e.is_page());
    }
}

impl Default for Manifest {
    fn default() -> Self {
        return Self::builtin();
    }
}
