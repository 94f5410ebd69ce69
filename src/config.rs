use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::manifest::{Manifest, ManifestEntry};

/// File name of the optional per-site configuration.
pub const CONFIG_FILE: &str = ".siteaudit.toml";

/// Site configuration loaded from `.siteaudit.toml` at the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Required files; the built-in course manifest unless overridden.
    pub manifest: Manifest,
    /// Report location, relative to the site root.
    pub report: PathBuf,
    /// Course links a page needs before the sidebar counts as complete.
    pub sidebar_min_links: usize,
}

/// Raw TOML structure for `.siteaudit.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteauditTomlConfig {
    /// Replacement manifest entries.
    #[serde(default)]
    required: Option<Vec<ManifestEntry>>,
    /// Report path override.
    #[serde(default)]
    report: Option<PathBuf>,
    /// Sidebar coverage threshold override.
    #[serde(default)]
    sidebar_min_links: Option<usize>,
}

impl Config {
    /// Load config from `.siteaudit.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist, and an error if the
    /// file exists but is malformed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed,
    /// or `Error::KindMismatch` if an entry's kind contradicts its path.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };
        return Self::parse(&content);
    }

    /// Apply TOML overrides on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed,
    /// or `Error::KindMismatch` if a `[[required]]` kind contradicts its path.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: SiteauditTomlConfig = toml::from_str(content)?;
        if let Some(entry) = raw.required.iter().flatten().find(|e| return !e.kind_matches_path()) {
            return Err(Error::KindMismatch {
                kind: entry.kind.as_str(),
                path: entry.path.clone(),
            });
        }
        let defaults = Self::default();
        return Ok(Self {
            manifest: raw.required.map_or(defaults.manifest, Manifest::from_entries),
            report: raw.report.unwrap_or(defaults.report),
            sidebar_min_links: raw.sidebar_min_links.unwrap_or(defaults.sidebar_min_links),
        });
    }
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            manifest: Manifest::builtin(),
            report: PathBuf::from("tools").join("audit-report.md"),
            sidebar_min_links: 5,
        };
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::manifest::EntryKind;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sidebar_min_links, 5);
    }

    #[test]
    fn required_entries_replace_builtin_manifest() {
        let config = Config::parse(
            r#"
report = "out/report.md"
sidebar_min_links = 2

[[required]]
path = "index.html"
kind = "root"

[[required]]
path = "chapters/01-intro.html"
kind = "chapter"
title = "Intro"
"#,
        )
        .unwrap();
        assert_eq!(config.report, PathBuf::from("out/report.md"));
        assert_eq!(config.sidebar_min_links, 2);
        let entries = config.manifest.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind, EntryKind::Chapter);
        assert_eq!(entries[1].title.as_deref(), Some("Intro"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "sidebar_min_links = \"five\"").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn kind_outside_its_section_is_rejected() {
        let result = Config::parse("[[required]]\npath = \"lessons/intro.html\"\nkind = \"chapter\"\n");
        assert!(matches!(
            result,
            Err(Error::KindMismatch { kind: "chapter", ref path }) if path == "lessons/intro.html"
        ));

        let result = Config::parse("[[required]]\npath = \"chapters/01-intro.html\"\nkind = \"practice\"\n");
        assert!(matches!(result, Err(Error::KindMismatch { kind: "practice", .. })));

        let assets = Config::parse("[[required]]\npath = \"static/site.css\"\nkind = \"css\"\n");
        assert!(assets.is_ok());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = Config::parse("[[required]]\npath = \"a.html\"\nkind = \"page\"\n");
        assert!(matches!(result, Err(Error::TomlDe(_))));
    }
}
