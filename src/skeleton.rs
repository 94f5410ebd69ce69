//! Placeholder pages for manifest entries that do not exist yet.

use std::path::Path;

use crate::error::Error;
use crate::manifest::{EntryKind, Manifest, ManifestEntry};
use crate::rules::expected_asset_path;
use crate::summary::page_depth;

/// Site name used in titles and the header logo.
const SITE_NAME: &str = "C Programming: Zero to Hero";

/// Per-kind parts that differ between skeleton pages.
struct Template {
    /// Sections inside `<article>` after the `<h1>`.
    article: String,
    /// `<meta name="description">` content.
    description: String,
    /// Extra stylesheets besides `styles.css`.
    extra_css: &'static [&'static str],
    /// Extra deferred scripts after `app.js`.
    extra_js: &'static [&'static str],
    /// Text of the single `<h1>`.
    heading: String,
    /// Document `<title>`.
    title: String,
}

/// Leading digits of a file stem as a chapter number, e.g. `05-arrays` → 5.
pub fn chapter_number(stem: &str) -> Option<u32> {
    let digits: String = stem.chars().take_while(char::is_ascii_digit).collect();
    return digits.parse().ok();
}

/// Write every missing chapter, practice and reference page.
///
/// Existing files are left alone. Returns the site-relative paths created, in
/// manifest order.
///
/// # Errors
///
/// Returns `Error::Io` if a directory or file cannot be created.
pub fn create_missing(root: &Path, manifest: &Manifest) -> Result<Vec<String>, Error> {
    let mut created = Vec::new();
    for entry in manifest.entries() {
        let path = root.join(&entry.path);
        if path.exists() {
            tracing::debug!(page = entry.path.as_str(), "exists, skipping");
            continue;
        }
        let Some(content) = render(entry) else {
            continue;
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        created.push(entry.path.clone());
    }
    return Ok(created);
}

/// Title from a file stem: drop a leading `NN-`, then capitalise each
/// `-`-separated word.
pub fn derive_title(stem: &str) -> String {
    let without_number = match stem.split_once('-') {
        Some((prefix, rest)) if !prefix.is_empty() && prefix.chars().all(|c| return c.is_ascii_digit()) => rest,
        _ => stem,
    };
    return without_number
        .split('-')
        .filter(|word| return !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
}

/// Uppercase the first character of `word`.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    return match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    return out;
}

/// Fill the shared page layout for a page `depth` levels deep.
fn layout(depth: usize, template: &Template) -> String {
    let asset = |name: &str| return expected_asset_path(depth, &format!("assets/{name}"));
    let mut stylesheets = format!(r#"    <link rel="stylesheet" href="{}">"#, asset("styles.css"));
    for css in template.extra_css {
        stylesheets.push_str(&format!("\n    <link rel=\"stylesheet\" href=\"{}\">", asset(css)));
    }
    let mut scripts = format!(r#"    <script src="{}"></script>"#, asset("app.js"));
    for js in template.extra_js {
        scripts.push_str(&format!("\n    <script src=\"{}\" defer></script>", asset(js)));
    }

    return format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{description}">
    <title>{title}</title>
    <link rel="icon" type="image/svg+xml" href="{favicon}">
{stylesheets}
</head>
<body>
    <div class="app">
        <header class="header">
            <div class="logo">{SITE_NAME}</div>
            <div class="search-container">
                <input type="search" class="search-input" placeholder="Search topics..." aria-label="Search">
            </div>
            <div class="shortcuts-hint">Press / to search, t to toggle nav</div>
        </header>

        <nav class="sidebar" aria-label="Course Navigation">
            <!-- Populated by siteaudit sync-sidebar -->
        </nav>

        <main class="main">
            <div class="content">
                <article>
                    <h1>{heading}</h1>
{article}
                </article>

                <footer class="footer">
                    <p>&copy; {SITE_NAME}. Licensed under MIT for code, content under Creative Commons.</p>
                </footer>
            </div>
        </main>
    </div>

{scripts}
</body>
</html>
"#,
        article = template.article,
        description = template.description,
        favicon = asset("favicon.svg"),
        heading = template.heading,
        title = template.title,
    );
}

/// Render the placeholder for one entry, or `None` for kinds never generated.
pub fn render(entry: &ManifestEntry) -> Option<String> {
    if !entry.kind.is_generated() {
        return None;
    }
    let stem = Path::new(&entry.path)
        .file_stem()
        .and_then(|s| return s.to_str())
        .unwrap_or_default();
    let raw_title = entry.title.clone().unwrap_or_else(|| return derive_title(stem));
    let title = escape_html(&raw_title);
    let lower = escape_html(&raw_title.to_lowercase());

    let template = match entry.kind {
        EntryKind::Chapter => chapter_template(&title, &lower, chapter_number(stem)),
        EntryKind::Practice => practice_template(&title),
        EntryKind::Reference => reference_template(&title, &lower),
        EntryKind::Css | EntryKind::Icon | EntryKind::Js | EntryKind::Root => return None,
    };
    return Some(layout(page_depth(&entry.path), &template));
}

/// Chapter page: introduction, a C example, practice and common errors.
fn chapter_template(title: &str, lower: &str, number: Option<u32>) -> Template {
    let heading = match number {
        Some(n) => format!("Chapter {n}: {title}"),
        None => title.to_string(),
    };
    return Template {
        article: format!(
            r#"
                    <section id="introduction">
                        <h2>Introduction</h2>
                        <p>This chapter covers {lower} in C programming.</p>

                        <div class="callout callout-info">
                            <div class="callout-title">Learning Objectives</div>
                            <p>By the end of this chapter, you will understand the fundamentals of {lower}.</p>
                        </div>
                    </section>

                    <section id="basic-concepts">
                        <h2>Basic Concepts</h2>
                        <p>Content coming soon...</p>

                        <pre><code class="language-c">// Example code will be added here
#include &lt;stdio.h&gt;

int main(void) {{
    printf("Hello from {title}!\n");
    return 0;
}}</code></pre>
                    </section>

                    <section id="practice-problems">
                        <h2>Practice Problems</h2>
                        <ol>
                            <li>Practice problem 1 (coming soon)</li>
                            <li>Practice problem 2 (coming soon)</li>
                            <li>Practice problem 3 (coming soon)</li>
                        </ol>
                    </section>

                    <section id="common-errors">
                        <h2>Common Errors</h2>
                        <div class="callout callout-error">
                            <div class="callout-title">Common Mistake</div>
                            <p>Details about common errors will be added here.</p>
                        </div>
                    </section>"#
        ),
        description: format!("C Programming - {title}"),
        extra_css: &["quiz.css"],
        extra_js: &["quiz.js"],
        title: format!("{heading} | {SITE_NAME}"),
        heading,
    };
}

/// Practice page: easy and medium problem sets plus solutions.
fn practice_template(title: &str) -> Template {
    return Template {
        article: r#"
                    <section id="easy-problems">
                        <h2>Easy Level Problems</h2>
                        <ol>
                            <li>Practice problem 1 (coming soon)</li>
                            <li>Practice problem 2 (coming soon)</li>
                        </ol>
                    </section>

                    <section id="medium-problems">
                        <h2>Medium Level Problems</h2>
                        <ol>
                            <li>Challenge problem 1 (coming soon)</li>
                            <li>Challenge problem 2 (coming soon)</li>
                        </ol>
                    </section>

                    <section id="solutions">
                        <h2>Solutions</h2>
                        <p>Solutions will be added soon...</p>
                    </section>"#
            .to_string(),
        description: format!("C Programming Practice - {title}"),
        extra_css: &[],
        extra_js: &[],
        heading: format!("{title} Practice"),
        title: format!("{title} Practice | {SITE_NAME}"),
    };
}

/// Reference page: overview and details.
fn reference_template(title: &str, lower: &str) -> Template {
    return Template {
        article: format!(
            r#"
                    <section id="overview">
                        <h2>Overview</h2>
                        <p>This reference covers {lower}.</p>
                    </section>

                    <section id="details">
                        <h2>Details</h2>
                        <p>Detailed content coming soon...</p>
                    </section>"#
        ),
        description: format!("C Programming Reference - {title}"),
        extra_css: &[],
        extra_js: &[],
        heading: title.to_string(),
        title: format!("{title} | {SITE_NAME}"),
    };
}
