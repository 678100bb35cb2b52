use anyhow::{Context, Result};
use ipadex_core::SiteLayout;

use crate::ops::export_apps;
use crate::store::AppDb;

/// Re-export the site data document without processing archives.
pub fn export(layout: &SiteLayout) -> Result<()> {
    let db = AppDb::open_at(&layout.db_path()).context("Failed to open record store")?;
    let index = export_apps(layout, &db).context("Export failed")?;

    println!(
        "Exported {} apps to {}",
        index.total_count,
        layout.apps_json().display()
    );
    Ok(())
}
