/// Crate-level error types for siteaudit runtime failures.
///
/// Audit findings are not errors; they live in `types::Finding`. The variants
/// here stop a command before it can finish its pass.
use std::path::PathBuf;

/// Every variant names the file or condition that failed so the diagnostic is
/// actionable without rerunning under a debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The sidebar source page `index.html` is missing from the site root.
    #[error("canonical sidebar source not found: {}", path.display())]
    CanonicalSourceMissing {
        /// Expected location of the canonical page.
        path: PathBuf,
    },

    /// A hardcoded pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidRegex(
        /// The wrapped regex compilation error.
        #[from]
        regex::Error,
    ),

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A configured manifest entry declares a kind its path contradicts.
    #[error("manifest entry {path} is declared `{kind}` but lies outside that section")]
    KindMismatch {
        /// Declared kind, as written in the config.
        kind: &'static str,
        /// Site-relative path of the entry.
        path: String,
    },

    /// The audit report could not be written.
    #[error("cannot write report {}: {source}", path.display())]
    ReportWrite {
        /// Target path of the report document.
        path: PathBuf,
        /// The I/O failure that prevented the write.
        source: std::io::Error,
    },

    /// The site root passed on the command line is not a directory.
    #[error("site root not found: {}", path.display())]
    RootNotFound {
        /// The path that was given.
        path: PathBuf,
    },

    /// The canonical page has no `<nav class="...sidebar...">` block.
    #[error("no sidebar navigation found in {}", path.display())]
    SidebarNotFound {
        /// The page that was searched.
        path: PathBuf,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
