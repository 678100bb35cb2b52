//! Locating the app icon inside an archive.
//!
//! Descriptors name icons in several generations of keys. Candidates are
//! collected from all of them, newest first, and probed as bundle entries
//! with the usual size suffixes. The legacy `iTunesArtwork` entry, when
//! present, beats every candidate.

use std::io::{Read, Seek};

use tracing::debug;

use crate::archive::{ArchiveError, IpaArchive};
use crate::descriptor::{Descriptor, string_list};

/// Full-size artwork stored at the archive root by older build tools.
pub const LEGACY_ARTWORK: &str = "iTunesArtwork";

/// Conventional names probed after everything the descriptor declares.
pub const FALLBACK_NAMES: [&str; 3] = ["Icon", "AppIcon", "AppIcon60x60"];

/// Suffixes tried for each candidate, in order.
const VARIANTS: [&str; 4] = ["", ".png", "@2x.png", "@3x.png"];

/// Ranked, de-duplicated icon names declared by `descriptor`.
pub fn icon_candidates(descriptor: &Descriptor) -> Vec<String> {
    let mut names = Vec::new();

    if let Some(files) =
        descriptor.lookup(&["CFBundleIcons", "CFBundlePrimaryIcon", "CFBundleIconFiles"])
    {
        names.extend(string_list(files));
    } else if let Some(name) =
        descriptor.lookup(&["CFBundleIcons", "CFBundlePrimaryIcon", "CFBundleIconName"])
    {
        names.extend(string_list(name));
    }

    if let Some(files) = descriptor.lookup(&[
        "CFBundleIcons~ipad",
        "CFBundlePrimaryIcon",
        "CFBundleIconFiles",
    ]) {
        names.extend(string_list(files));
    }

    for key in ["CFBundleIconFiles", "Icon files", "CFBundleIconFile"] {
        if let Some(value) = descriptor.value(key) {
            names.extend(string_list(value));
        }
    }

    names.extend(FALLBACK_NAMES.iter().map(|s| (*s).to_string()));

    let mut seen = std::collections::HashSet::new();
    names.retain(|name| !name.is_empty() && seen.insert(name.clone()));
    names
}

/// Find the icon bytes for the bundle.
///
/// `app_name` selects among several bundles; when it matches none, the
/// lexically first bundle is used. Archives without a bundle have no icon.
///
/// # Errors
///
/// Returns an error if a matching entry exists but cannot be read.
pub fn resolve_icon<R: Read + Seek>(
    archive: &mut IpaArchive<R>,
    app_name: Option<&str>,
    candidates: &[String],
) -> Result<Option<Vec<u8>>, ArchiveError> {
    let bundles = archive.app_bundle_names()?;
    let bundle = match app_name.filter(|name| bundles.contains(*name)) {
        Some(name) => name.to_string(),
        None => match bundles.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
    };

    if let Some(artwork) = archive.read_entry(LEGACY_ARTWORK)? {
        debug!(entry = LEGACY_ARTWORK, "using legacy artwork");
        return Ok(Some(artwork));
    }

    for candidate in candidates {
        for suffix in VARIANTS {
            let path = format!("Payload/{bundle}.app/{candidate}{suffix}");
            if let Some(bytes) = archive.read_entry(&path)? {
                debug!(entry = %path, "found icon");
                return Ok(Some(bytes));
            }
        }
    }

    Ok(None)
}
