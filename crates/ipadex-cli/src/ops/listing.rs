//! Download listing of every published file.

use std::fs;

use ipadex_core::SiteLayout;
use ipadex_schema::{FileKind, Listing, ListingEntry};
use tracing::{debug, info};

use super::error::PipelineError;
use super::{display_timestamp, iso_timestamp, now_iso, write_json};

/// Scan the per-kind directories and build the listing.
///
/// The `ipa/` directory is created when missing; other kinds are simply
/// skipped if their directory does not exist.
pub fn build_listing(layout: &SiteLayout) -> Result<Listing, PipelineError> {
    fs::create_dir_all(layout.ipa_dir())?;

    let mut files = Vec::new();
    for kind in FileKind::ALL {
        let dir = layout.kind_dir(kind);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "No directory, skipping");
            continue;
        }

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !kind.matches(&name) {
                continue;
            }

            // Follows symlinks; dangling links are skipped.
            let Ok(meta) = fs::metadata(entry.path()) else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let modified = meta.modified()?;

            files.push(ListingEntry {
                url: format!("{kind}/{name}"),
                name,
                size: meta.len(),
                kind,
                modified: display_timestamp(modified),
                uploaded: iso_timestamp(modified),
            });
        }
    }

    Ok(Listing::new(files, now_iso()))
}

/// Build the listing and write it to both published locations.
pub fn generate_listing(layout: &SiteLayout) -> Result<Listing, PipelineError> {
    let listing = build_listing(layout)?;

    write_json(&layout.listing_json(), &listing)?;
    write_json(&layout.root_listing_json(), &listing)?;
    info!(files = listing.total_files, "Generated file listing");

    Ok(listing)
}
