//! Descriptor fields -> canonical record fields.

use ipadex_schema::{AppRecord, Platform};

use crate::descriptor::Descriptor;

const BUNDLE_IDENTIFIER: &str = "CFBundleIdentifier";
const DISPLAY_NAME: &str = "CFBundleDisplayName";
const BUNDLE_NAME: &str = "CFBundleName";
const SHORT_VERSION: &str = "CFBundleShortVersionString";
const BUILD_VERSION: &str = "CFBundleVersion";
const MINIMUM_OS: &str = "MinimumOSVersion";
const DEVICE_FAMILY: &str = "UIDeviceFamily";

/// Normalized metadata for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMetadata {
    /// Bundle identifier, or empty.
    pub bundle_id: String,
    /// Display name, falling back to the bundle name, or empty.
    pub title: String,
    /// Marketing version merged with the build number.
    pub version: String,
    /// Minimum OS version, or empty.
    pub min_os: String,
    /// Declared device classes.
    pub platform: Platform,
}

impl AppMetadata {
    /// Combine with the archive's file facts into a storable record.
    pub fn into_record(
        self,
        filename: impl Into<String>,
        size: u64,
        upload_date: impl Into<String>,
        has_icon: bool,
    ) -> AppRecord {
        AppRecord {
            filename: filename.into(),
            bundle_id: self.bundle_id,
            title: self.title,
            version: self.version,
            min_os: self.min_os,
            platform: self.platform,
            size,
            upload_date: upload_date.into(),
            has_icon,
        }
    }
}

/// Map descriptor fields onto the record shape.
pub fn normalize(descriptor: &Descriptor) -> AppMetadata {
    let title = descriptor
        .non_empty(DISPLAY_NAME)
        .or_else(|| descriptor.string(BUNDLE_NAME))
        .unwrap_or_default();

    AppMetadata {
        bundle_id: descriptor
            .string(BUNDLE_IDENTIFIER)
            .unwrap_or_default()
            .to_string(),
        title: title.to_string(),
        version: merge_version(
            descriptor.non_empty(SHORT_VERSION),
            descriptor.non_empty(BUILD_VERSION),
        ),
        min_os: descriptor.string(MINIMUM_OS).unwrap_or_default().to_string(),
        platform: Platform::from_device_families(descriptor.integers(DEVICE_FAMILY)),
    }
}

/// Merge marketing version and build number.
///
/// `1.2` + `45` gives `1.2 (45)`; equal values are not repeated; a lone
/// build number is used as-is.
pub fn merge_version(short: Option<&str>, build: Option<&str>) -> String {
    match (short, build) {
        (Some(short), Some(build)) if short != build => format!("{short} ({build})"),
        (Some(short), _) => short.to_string(),
        (None, Some(build)) => build.to_string(),
        (None, None) => String::new(),
    }
}
