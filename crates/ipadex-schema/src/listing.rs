//! The directory listing export, independent of the record store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of downloadable file published on the site.
///
/// Each kind lives in a directory of the same name and is recognised by
/// the same extension, e.g. `deb/tweak.deb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// iOS application archive.
    Ipa,
    /// Debian package (jailbreak tweak).
    Deb,
    /// Dynamic library.
    Dylib,
}

impl FileKind {
    /// All kinds, in listing order.
    pub const ALL: [FileKind; 3] = [Self::Ipa, Self::Deb, Self::Dylib];

    /// Directory name and extension for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipa => "ipa",
            Self::Deb => "deb",
            Self::Dylib => "dylib",
        }
    }

    /// Whether `filename` carries this kind's extension (case-insensitive).
    pub fn matches(&self, filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(self.as_str()))
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ipa" => Ok(Self::Ipa),
            "deb" => Ok(Self::Deb),
            "dylib" => Ok(Self::Dylib),
            _ => Err(format!("Unknown file kind: {s}")),
        }
    }
}

/// One downloadable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Kind of file.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Modification time, `YYYY-MM-DD HH:MM:SS`.
    pub modified: String,
    /// Modification time, ISO-8601. Used for ordering.
    pub uploaded: String,
    /// Site-relative download URL.
    pub url: String,
}

/// Listing of every published file, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Files, newest upload first.
    pub files: Vec<ListingEntry>,
    /// Number of entries in `files`.
    pub total_files: usize,
    /// Count per kind.
    pub files_by_type: BTreeMap<FileKind, usize>,
    /// ISO-8601 time the document was produced.
    pub generated_at: String,
}

impl Listing {
    /// Sort `files` newest first and compute the totals.
    pub fn new(mut files: Vec<ListingEntry>, generated_at: impl Into<String>) -> Self {
        files.sort_by(|a, b| {
            b.uploaded
                .cmp(&a.uploaded)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        let mut files_by_type = BTreeMap::new();
        for file in &files {
            *files_by_type.entry(file.kind).or_insert(0) += 1;
        }

        Self {
            total_files: files.len(),
            files,
            files_by_type,
            generated_at: generated_at.into(),
        }
    }
}
