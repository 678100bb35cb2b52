//! Extraction pipeline: archive files in, records and icon assets out.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use ipadex_core::assets::save_icon;
use ipadex_core::{Inspection, SiteLayout, inspect_ipa};
use ipadex_schema::{AppRecord, FileKind, file_stem};
use tracing::{debug, info, warn};

use super::error::PipelineError;
use super::iso_timestamp;
use crate::store::{AppDb, InsertOutcome};

/// Tally of one pass over the input directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Archives stored with full metadata.
    pub added: usize,
    /// Archives stored with file facts only.
    pub minimal: usize,
    /// Archives already in the store.
    pub skipped: usize,
    /// Archives that could not be processed at all.
    pub failed: usize,
}

impl ProcessSummary {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Added { .. } => self.added += 1,
            FileOutcome::Minimal => self.minimal += 1,
            FileOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// What happened to a single archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Stored with full metadata.
    Added {
        /// Whether an icon asset was written.
        has_icon: bool,
    },
    /// Stored with file facts only.
    Minimal,
    /// Already recorded; nothing changed.
    Skipped,
}

/// `.ipa` files directly inside `dir`, sorted by name.
pub fn list_archives(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut archives = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_ipa = path
            .file_name()
            .and_then(OsStr::to_str)
            .is_some_and(|name| FileKind::Ipa.matches(name));
        // Follows symlinks; dangling links are skipped.
        if is_ipa && fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
            archives.push(path);
        }
    }
    archives.sort();
    Ok(archives)
}

/// Process every archive in the layout's input directory.
///
/// Per-file I/O problems are logged and counted as failed. Store errors
/// abort the run.
pub fn process_directory(layout: &SiteLayout, db: &AppDb) -> Result<ProcessSummary, PipelineError> {
    layout.ensure_dirs()?;

    let icons_dir = layout.icons_dir();
    let mut summary = ProcessSummary::default();

    for path in list_archives(&layout.ipa_dir())? {
        match process_file(&path, &icons_dir, db) {
            Ok(outcome) => summary.record(outcome),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to process archive");
                summary.failed += 1;
            }
        }
    }

    info!(
        added = summary.added,
        minimal = summary.minimal,
        skipped = summary.skipped,
        failed = summary.failed,
        "Processing complete"
    );
    Ok(summary)
}

/// Process a single archive, writing its icon to `icons_dir`.
pub fn process_file(path: &Path, icons_dir: &Path, db: &AppDb) -> Result<FileOutcome, PipelineError> {
    let filename = path
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(|| PipelineError::context("Invalid archive name", path.display()))?
        .to_string();

    if db.contains(&filename)? {
        debug!(%filename, "Already recorded, skipping");
        return Ok(FileOutcome::Skipped);
    }

    let meta = fs::metadata(path)?;
    let size = meta.len();
    let upload_date = iso_timestamp(meta.modified()?);

    info!(%filename, "Processing");

    let (record, outcome) = match inspect_ipa(path) {
        Ok(Inspection {
            metadata: Some(metadata),
            icon,
        }) => {
            let has_icon = icon.is_some_and(|bytes| {
                write_icon(icons_dir, file_stem(&filename), &bytes)
            });
            (
                metadata.into_record(filename.as_str(), size, upload_date, has_icon),
                FileOutcome::Added { has_icon },
            )
        }
        Ok(Inspection { metadata: None, .. }) => {
            warn!(%filename, "No readable Info.plist, storing file facts only");
            (
                AppRecord::minimal(filename.as_str(), size, upload_date),
                FileOutcome::Minimal,
            )
        }
        Err(e) => {
            warn!(%filename, error = %e, "Unreadable archive, storing file facts only");
            (
                AppRecord::minimal(filename.as_str(), size, upload_date),
                FileOutcome::Minimal,
            )
        }
    };

    match db.insert_if_absent(&record)? {
        InsertOutcome::Inserted => Ok(outcome),
        InsertOutcome::AlreadyPresent => Ok(FileOutcome::Skipped),
    }
}

fn write_icon(dir: &Path, stem: &str, bytes: &[u8]) -> bool {
    match save_icon(dir, stem, bytes) {
        Ok(path) => {
            debug!(path = %path.display(), "Saved icon");
            true
        }
        Err(e) => {
            warn!(%stem, error = %e, "Failed to save icon");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{info_plist, png_bytes, write_ipa};
    use ipadex_schema::Platform;
    use tempfile::tempdir;

    fn site() -> (tempfile::TempDir, SiteLayout, AppDb) {
        let dir = tempdir().unwrap();
        let layout = SiteLayout::new(dir.path());
        layout.ensure_dirs().unwrap();
        let db = AppDb::open_in_memory().unwrap();
        (dir, layout, db)
    }

    #[test]
    fn test_full_record_with_icon() {
        let (_dir, layout, db) = site();
        let plist = info_plist("com.example.demo", "Demo");
        write_ipa(
            &layout.ipa_dir().join("Demo.ipa"),
            &[
                ("Payload/Demo.app/Info.plist", plist.as_slice()),
                ("Payload/Demo.app/Icon.png", b"png-bytes".as_slice()),
            ],
        );

        let summary = process_directory(&layout, &db).unwrap();
        assert_eq!(summary.added, 1);
        assert_eq!(summary.failed, 0);

        let record = db.get_app("Demo.ipa").unwrap().unwrap();
        assert_eq!(record.bundle_id, "com.example.demo");
        assert_eq!(record.title, "Demo");
        assert_eq!(record.version, "1.0 (7)");
        assert_eq!(record.min_os, "14.0");
        assert_eq!(record.platform, Platform::PHONE | Platform::TABLET);
        assert!(record.has_icon);
        assert!(record.upload_date.ends_with('Z'));

        let icon = fs::read(layout.icons_dir().join("Demo.png")).unwrap();
        assert_eq!(icon, b"png-bytes");
    }

    #[test]
    fn test_decodable_icon_is_stored_as_jpeg() {
        let (_dir, layout, db) = site();
        let plist = info_plist("com.example.demo", "Demo");
        let png = png_bytes(256, 256);
        write_ipa(
            &layout.ipa_dir().join("Demo.ipa"),
            &[
                ("Payload/Demo.app/Info.plist", plist.as_slice()),
                ("Payload/Demo.app/AppIcon@2x.png", png.as_slice()),
            ],
        );

        process_directory(&layout, &db).unwrap();

        assert!(db.get_app("Demo.ipa").unwrap().unwrap().has_icon);
        assert!(layout.icons_dir().join("Demo.jpg").is_file());
        assert!(!layout.icons_dir().join("Demo.png").exists());
    }

    #[test]
    fn test_icon_write_failure_keeps_full_record() {
        let (dir, layout, db) = site();
        let plist = info_plist("com.example.demo", "Demo");
        let archive = layout.ipa_dir().join("Demo.ipa");
        write_ipa(
            &archive,
            &[
                ("Payload/Demo.app/Info.plist", plist.as_slice()),
                ("Payload/Demo.app/Icon.png", b"png-bytes".as_slice()),
            ],
        );
        let blocked = dir.path().join("icons-blocked");
        fs::write(&blocked, b"not a directory").unwrap();

        let outcome = process_file(&archive, &blocked, &db).unwrap();
        assert_eq!(outcome, FileOutcome::Added { has_icon: false });

        let record = db.get_app("Demo.ipa").unwrap().unwrap();
        assert_eq!(record.bundle_id, "com.example.demo");
        assert_eq!(record.version, "1.0 (7)");
        assert!(!record.has_icon);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_archive_is_processed() {
        let (dir, layout, db) = site();
        let plist = info_plist("com.example.linked", "Linked");
        let target = dir.path().join("Linked.ipa");
        write_ipa(&target, &[("Payload/Linked.app/Info.plist", plist.as_slice())]);
        std::os::unix::fs::symlink(&target, layout.ipa_dir().join("Linked.ipa")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("gone.ipa"),
            layout.ipa_dir().join("Dangling.ipa"),
        )
        .unwrap();

        let summary = process_directory(&layout, &db).unwrap();
        assert_eq!(summary.added, 1);
        assert_eq!(
            db.get_app("Linked.ipa").unwrap().unwrap().bundle_id,
            "com.example.linked"
        );
        assert!(!db.contains("Dangling.ipa").unwrap());
    }

    #[test]
    fn test_unreadable_archive_gets_minimal_record() {
        let (_dir, layout, db) = site();
        fs::write(layout.ipa_dir().join("Broken.ipa"), b"definitely not a zip").unwrap();

        let summary = process_directory(&layout, &db).unwrap();
        assert_eq!(summary.minimal, 1);

        let record = db.get_app("Broken.ipa").unwrap().unwrap();
        assert_eq!(record.bundle_id, "");
        assert_eq!(record.size, 20);
        assert_eq!(record.platform, Platform::PHONE);
        assert!(!record.has_icon);
    }

    #[test]
    fn test_archive_without_descriptor_gets_minimal_record() {
        let (_dir, layout, db) = site();
        write_ipa(
            &layout.ipa_dir().join("Empty.ipa"),
            &[("Payload/Empty.app/Icon.png", b"png".as_slice())],
        );

        let summary = process_directory(&layout, &db).unwrap();
        assert_eq!(summary.minimal, 1);
        assert!(!layout.icons_dir().join("Empty.png").exists());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let (_dir, layout, db) = site();
        let plist = info_plist("com.example.demo", "Demo");
        write_ipa(
            &layout.ipa_dir().join("Demo.ipa"),
            &[("Payload/Demo.app/Info.plist", plist.as_slice())],
        );

        let first = process_directory(&layout, &db).unwrap();
        let before = db.list_apps().unwrap();
        let second = process_directory(&layout, &db).unwrap();

        assert_eq!(first.added, 1);
        assert_eq!(second.added, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(db.list_apps().unwrap(), before);
    }

    #[test]
    fn test_only_ipa_files_are_processed() {
        let (_dir, layout, db) = site();
        fs::write(layout.ipa_dir().join("notes.txt"), b"hi").unwrap();
        fs::create_dir(layout.ipa_dir().join("Folder.ipa")).unwrap();
        fs::write(layout.ipa_dir().join("UPPER.IPA"), b"junk").unwrap();

        let archives = list_archives(&layout.ipa_dir()).unwrap();
        let names: Vec<_> = archives
            .iter()
            .filter_map(|p| p.file_name().and_then(OsStr::to_str))
            .collect();
        assert_eq!(names, vec!["UPPER.IPA"]);
    }

    #[test]
    fn test_missing_input_dir_is_created() {
        let dir = tempdir().unwrap();
        let layout = SiteLayout::new(dir.path().join("fresh"));
        let db = AppDb::open_in_memory().unwrap();

        let summary = process_directory(&layout, &db).unwrap();
        assert_eq!(summary, ProcessSummary::default());
        assert!(layout.ipa_dir().is_dir());
    }
}
