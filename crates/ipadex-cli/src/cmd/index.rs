use anyhow::{Context, Result};
use ipadex_core::SiteLayout;

use crate::ops::generate_listing;

/// Regenerate the download listing.
pub fn index(layout: &SiteLayout) -> Result<()> {
    let listing = generate_listing(layout).context("Failed to generate listing")?;

    println!("Listed {} files", listing.total_files);
    for (kind, count) in &listing.files_by_type {
        println!("  {kind}: {count}");
    }
    Ok(())
}
