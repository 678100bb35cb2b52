//! Site data document export.

use std::path::Path;

use ipadex_core::SiteLayout;
use ipadex_core::assets::find_icon_asset;
use ipadex_schema::{AppEntry, AppIndex, AppRecord};
use tracing::info;

use super::error::PipelineError;
use super::{now_iso, write_json};
use crate::store::AppDb;

/// Build the site document from stored records, keeping their order.
///
/// An entry gets an icon path only when its record says an icon was
/// extracted and an asset for it is actually present in `icons_dir`.
pub fn build_app_index(
    records: Vec<AppRecord>,
    icons_dir: &Path,
    generated_at: impl Into<String>,
) -> AppIndex {
    let apps = records
        .into_iter()
        .map(|record| {
            let icon_path = record
                .has_icon
                .then(|| find_icon_asset(icons_dir, record.stem()))
                .flatten();
            AppEntry::from_record(record, icon_path)
        })
        .collect();

    AppIndex::new(apps, generated_at)
}

/// Write every stored record to the site's apps document.
pub fn export_apps(layout: &SiteLayout, db: &AppDb) -> Result<AppIndex, PipelineError> {
    let records = db.list_apps()?;
    let index = build_app_index(records, &layout.icons_dir(), now_iso());

    let path = layout.apps_json();
    write_json(&path, &index)?;
    info!(count = index.total_count, path = %path.display(), "Exported app data");

    Ok(index)
}
