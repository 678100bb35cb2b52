use anyhow::{Context, Result};
use ipadex_core::SiteLayout;

use crate::ops::{export_apps, process_directory};
use crate::store::AppDb;

/// Process new archives, then export the site data document.
pub fn run(layout: &SiteLayout) -> Result<()> {
    layout
        .ensure_dirs()
        .context("Failed to create site directories")?;
    let db = AppDb::open_at(&layout.db_path()).context("Failed to open record store")?;

    let summary = process_directory(layout, &db).context("Processing failed")?;
    println!(
        "Processed {} new, {} minimal, {} already known, {} failed",
        summary.added, summary.minimal, summary.skipped, summary.failed
    );

    let index = export_apps(layout, &db).context("Export failed")?;
    println!(
        "Exported {} apps to {}",
        index.total_count,
        layout.apps_json().display()
    );

    Ok(())
}
