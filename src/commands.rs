//! CLI commands for siteaudit: audit, skeletons, sync-sidebar.

use std::path::Path;
use std::process::ExitCode;

use crate::audit;
use crate::config::Config;
use crate::error;
use crate::report;
use crate::sidebar::{self, SyncOutcome};
use crate::skeleton;

/// Audit the site and write the Markdown report.
///
/// Exit code 0 when no error finding exists, 1 otherwise.
///
/// # Errors
///
/// Returns errors from root validation, config loading, or report writing.
pub fn audit(root: &Path) -> Result<ExitCode, error::Error> {
    ensure_root(root)?;
    let config = Config::load(root)?;
    tracing::info!(root = %root.display(), "starting site audit");

    let result = audit::run(root, &config);
    let generated_at = chrono::Local::now().to_rfc3339();
    let report_path = root.join(&config.report);
    report::write_report(&report_path, &report::render_markdown(&result, &generated_at))?;
    report::print_summary(&result, &report_path);

    if result.passed() {
        return Ok(ExitCode::SUCCESS);
    }
    return Ok(ExitCode::from(1));
}

/// Fail early when the site root is not a directory.
///
/// # Errors
///
/// Returns `Error::RootNotFound` if `root` is missing or not a directory.
fn ensure_root(root: &Path) -> Result<(), error::Error> {
    if root.is_dir() {
        return Ok(());
    }
    return Err(error::Error::RootNotFound {
        path: root.to_path_buf(),
    });
}

/// Create placeholder pages for missing manifest entries.
///
/// # Errors
///
/// Returns errors from root validation, config loading, or file creation.
pub fn skeletons(root: &Path) -> Result<ExitCode, error::Error> {
    ensure_root(root)?;
    let config = Config::load(root)?;

    let created = skeleton::create_missing(root, &config.manifest)?;
    for page in &created {
        println!("Created {page}");
    }
    println!("Created {} skeleton pages", created.len());
    return Ok(ExitCode::SUCCESS);
}

/// Copy the canonical sidebar into every course page.
///
/// With `check`, nothing is written and the exit code is 1 if any page would
/// change.
///
/// # Errors
///
/// Returns errors from root validation or the sync itself.
pub fn sync_sidebar(root: &Path, check: bool) -> Result<ExitCode, error::Error> {
    ensure_root(root)?;
    let results = sidebar::sync(root, check)?;

    let mut changed = 0_usize;
    for result in &results {
        match result.outcome {
            SyncOutcome::NoSidebar => println!("WARNING: no sidebar in {}", result.page),
            SyncOutcome::Synced => {
                changed = changed.saturating_add(1);
                if check {
                    println!("Would update: {}", result.page);
                } else {
                    println!("Synced sidebar in: {}", result.page);
                }
            },
            SyncOutcome::Unchanged => {},
        }
    }

    if check {
        if changed > 0 {
            println!();
            println!("{changed} of {} pages out of sync", results.len());
            return Ok(ExitCode::from(1));
        }
        println!("All {} pages in sync", results.len());
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    println!("Sync complete. Updated {changed} files.");
    return Ok(ExitCode::SUCCESS);
}
