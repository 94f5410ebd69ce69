use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::error::Error;

/// ANSI bold on.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is one,
/// how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::CanonicalSourceMissing { path } => render_canonical_source_missing(path),
        Error::ReportWrite { path, source } => render_report_write(path, source),
        Error::RootNotFound { path } => render_root_not_found(path),
        Error::SidebarNotFound { path } => render_sidebar_not_found(path),
        Error::KindMismatch { kind, path } => render_kind_mismatch(kind, path),
        Error::TomlDe(e) => render_invalid_config(e),
        Error::InvalidRegex(_) | Error::Io(_) => render_generic(e),
    };
}

/// Fallback block for errors without a specific fix.
fn render_generic(e: &Error) -> String {
    let heading = match e {
        Error::InvalidRegex(_) => "Invalid Pattern",
        _ => "I/O",
    };
    return format!(
        "\
# Error: {heading}

{e}
"
    );
}

/// `index.html` is absent, so there is nothing to copy the sidebar from.
fn render_canonical_source_missing(path: &Path) -> String {
    return format!(
        "\
# Error: Canonical Sidebar Source Missing

`{}` does not exist.

## Fix

Create the site home page first. The sidebar in `index.html` is copied into
every chapter, practice and reference page.
",
        path.display()
    );
}

/// The config file exists but does not parse.
fn render_invalid_config(e: &toml::de::Error) -> String {
    return format!(
        "\
# Error: Invalid Configuration

`{CONFIG_FILE}` could not be parsed:

{e}

## Fix

Correct the file or delete it to use the built-in defaults. Accepted keys:

    report = \"tools/audit-report.md\"
    sidebar_min_links = 5

    [[required]]
    path = \"chapters/01-introduction.html\"
    kind = \"chapter\"
    title = \"Introduction\"
"
    );
}

/// A `[[required]]` entry's kind disagrees with the section its path is in.
fn render_kind_mismatch(kind: &str, path: &str) -> String {
    return format!(
        "\
# Error: Manifest Kind Mismatch

`{CONFIG_FILE}` declares `{path}` as `{kind}`, but page rules follow the path's
section: `chapters/` is chapter, `practice/` is practice, `reference/` is
reference, and anything else is root.

## Fix

Move the page into the matching directory or change its `kind`.
"
    );
}

/// The report path could not be created or written.
fn render_report_write(path: &Path, source: &std::io::Error) -> String {
    return format!(
        "\
# Error: Report Not Written

Could not write `{}`: {source}

## Fix

Check that the directory is writable, or set `report` in `{CONFIG_FILE}`.
",
        path.display()
    );
}

/// The positional site root is not a directory.
fn render_root_not_found(path: &Path) -> String {
    return format!(
        "\
# Error: Site Root Not Found

`{}` is not a directory.

## Fix

Pass the directory that contains `index.html`:

    siteaudit audit path/to/site
",
        path.display()
    );
}

/// `index.html` has no sidebar nav to copy.
fn render_sidebar_not_found(path: &Path) -> String {
    return format!(
        "\
# Error: Sidebar Not Found

`{}` has no `<nav>` element whose class contains `sidebar`.

## Fix

Add the course navigation to the home page:

    <nav class=\"sidebar\" aria-label=\"Course Navigation\">
      ...
    </nav>
",
        path.display()
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test setup")]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn root_not_found_names_path_and_fix() {
        let md = render_error(&Error::RootNotFound {
            path: PathBuf::from("nowhere"),
        });
        assert!(md.starts_with("# Error: Site Root Not Found"));
        assert!(md.contains("`nowhere`"));
        assert!(md.contains("## Fix"));
    }

    #[test]
    fn io_error_uses_generic_block() {
        let md = render_error(&Error::Io(std::io::Error::other("disk on fire")));
        assert!(md.starts_with("# Error: I/O"));
        assert!(md.contains("disk on fire"));
    }

    #[test]
    fn kind_mismatch_names_entry() {
        let md = render_error(&Error::KindMismatch {
            kind: "chapter",
            path: "lessons/intro.html".to_string(),
        });
        assert!(md.starts_with("# Error: Manifest Kind Mismatch"));
        assert!(md.contains("`lessons/intro.html` as `chapter`"));
    }

    #[test]
    fn config_error_lists_accepted_keys() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let md = render_error(&Error::TomlDe(toml_err));
        assert!(md.contains(".siteaudit.toml"));
        assert!(md.contains("sidebar_min_links"));
    }
}
