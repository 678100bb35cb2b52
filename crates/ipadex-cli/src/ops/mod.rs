//! Pipeline operations behind the CLI commands

pub mod error;
pub mod export;
pub mod listing;
pub mod process;

pub use error::PipelineError;
pub use export::{build_app_index, export_apps};
pub use listing::{build_listing, generate_listing};
pub use process::{FileOutcome, ProcessSummary, process_directory, process_file};

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// ISO-8601 UTC timestamp with second precision.
pub(crate) fn iso_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `YYYY-MM-DD HH:MM:SS` in UTC, for display.
pub(crate) fn display_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Write `value` as pretty JSON, replacing any previous file.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}
