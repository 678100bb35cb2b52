//! One-shot metadata and icon extraction for a single archive.

use std::io::{Read, Seek};
use std::path::Path;

use ipadex_schema::file_stem;
use tracing::{debug, warn};

use crate::archive::{ArchiveError, IpaArchive};
use crate::descriptor::Descriptor;
use crate::icon::{icon_candidates, resolve_icon};
use crate::normalize::{AppMetadata, normalize};

/// What could be learned from one archive.
///
/// `metadata` is `None` when the archive has no descriptor or it could not
/// be decoded; callers then store a minimal record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inspection {
    /// Normalized descriptor fields.
    pub metadata: Option<AppMetadata>,
    /// Raw icon bytes, if one was found.
    pub icon: Option<Vec<u8>>,
}

/// Open and inspect an archive on disk.
///
/// # Errors
///
/// Returns [`ArchiveError`] only when the container itself is unreadable.
/// A missing or undecodable descriptor and icon failures are not errors.
pub fn inspect_ipa(path: &Path) -> Result<Inspection, ArchiveError> {
    let mut archive = IpaArchive::open(path)?;
    inspect_archive(&mut archive)
}

/// Inspect an already opened archive.
///
/// # Errors
///
/// Returns [`ArchiveError`] if the descriptor entry exists but cannot be read.
pub fn inspect_archive<R: Read + Seek>(
    archive: &mut IpaArchive<R>,
) -> Result<Inspection, ArchiveError> {
    let Some(bytes) = archive.read_info_plist()? else {
        debug!("no Info.plist in archive");
        return Ok(Inspection::default());
    };

    let descriptor = match Descriptor::parse(&bytes) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            warn!(error = %e, "unparsable Info.plist");
            return Ok(Inspection::default());
        }
    };

    let metadata = normalize(&descriptor);
    let candidates = icon_candidates(&descriptor);
    let app_name = Some(file_stem(&metadata.title)).filter(|name| !name.is_empty());

    let icon = match resolve_icon(archive, app_name, &candidates) {
        Ok(icon) => icon,
        Err(e) => {
            warn!(error = %e, "icon extraction failed");
            None
        }
    };

    Ok(Inspection {
        metadata: Some(metadata),
        icon,
    })
}
