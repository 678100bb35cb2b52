//! The persisted record.

use serde::{Deserialize, Serialize};

use crate::Platform;

/// One processed archive, as persisted in the record store.
///
/// Records are keyed by `filename` and are never rewritten once stored.
/// Every text field defaults to an empty string rather than null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// File name of the archive inside the input directory (unique key).
    pub filename: String,
    /// `CFBundleIdentifier`, e.g. `com.example.app`.
    pub bundle_id: String,
    /// Display title of the app.
    pub title: String,
    /// Marketing version, possibly with the build number: `1.2 (45)`.
    pub version: String,
    /// Minimum supported OS version.
    pub min_os: String,
    /// Supported device classes.
    pub platform: Platform,
    /// Size of the archive in bytes.
    pub size: u64,
    /// Archive modification time, ISO-8601.
    pub upload_date: String,
    /// Whether an icon asset was written for this archive.
    pub has_icon: bool,
}

impl AppRecord {
    /// A record carrying only file facts, used when the archive cannot be read
    /// or has no descriptor.
    pub fn minimal(filename: impl Into<String>, size: u64, upload_date: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            bundle_id: String::new(),
            title: String::new(),
            version: String::new(),
            min_os: String::new(),
            platform: Platform::default(),
            size,
            upload_date: upload_date.into(),
            has_icon: false,
        }
    }

    /// File name without its final extension (`Foo.ipa` -> `Foo`).
    ///
    /// Icon assets are named after this stem.
    pub fn stem(&self) -> &str {
        file_stem(&self.filename)
    }
}

/// Strip the last extension from a file name, keeping dot-files intact.
pub fn file_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(0) | None => filename,
        Some(idx) => &filename[..idx],
    }
}
