//! The `apps` export consumed by the site front end.

use serde::{Deserialize, Serialize};

use crate::{AppRecord, Platform, format_size};

/// A stored record plus the display fields the front end renders directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    /// Archive file name.
    pub filename: String,
    /// Bundle identifier.
    pub bundle_id: String,
    /// App title.
    pub title: String,
    /// Version string.
    pub version: String,
    /// Minimum OS version.
    pub min_os: String,
    /// Raw platform bitmask.
    pub platform: Platform,
    /// Archive size in bytes.
    pub size: u64,
    /// Archive size for display, e.g. `2.38 MB`.
    pub size_formatted: String,
    /// Device names derived from `platform`.
    pub platform_names: Vec<String>,
    /// ISO-8601 upload timestamp.
    pub upload_date: String,
    /// Whether an icon was extracted.
    pub has_icon: bool,
    /// Site-relative icon path, present only when the asset exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
}

impl AppEntry {
    /// Derive the display entry for `record`.
    pub fn from_record(record: AppRecord, icon_path: Option<String>) -> Self {
        Self {
            size_formatted: format_size(record.size),
            platform_names: record
                .platform
                .names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            filename: record.filename,
            bundle_id: record.bundle_id,
            title: record.title,
            version: record.version,
            min_os: record.min_os,
            platform: record.platform,
            size: record.size,
            upload_date: record.upload_date,
            has_icon: record.has_icon,
            icon_path,
        }
    }
}

/// Full snapshot of the record store, regenerated on every export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIndex {
    /// Every record, newest upload first.
    pub apps: Vec<AppEntry>,
    /// Number of entries in `apps`.
    pub total_count: usize,
    /// ISO-8601 time the document was produced.
    pub generated_at: String,
}

impl AppIndex {
    /// Wrap `apps`, filling in the count.
    pub fn new(apps: Vec<AppEntry>, generated_at: impl Into<String>) -> Self {
        Self {
            total_count: apps.len(),
            apps,
            generated_at: generated_at.into(),
        }
    }
}
