//! Site directory layout.

use std::io;
use std::path::{Path, PathBuf};

use ipadex_schema::FileKind;

/// Site-relative directory holding extracted icons.
pub const ICONS_URL_DIR: &str = "assets/app-icons";

/// On-disk layout of a site, rooted at one directory.
///
/// ```text
/// <root>/
/// ├── ipa/                      # Input archives
/// ├── deb/  dylib/              # Other published files (listing only)
/// ├── assets/app-icons/         # Extracted icons (<stem>.png / <stem>.jpg)
/// ├── _data/
/// │   ├── ipa_database.db       # SQLite record store
/// │   ├── ipa_data.json         # apps export
/// │   └── ipa_index.json        # listing export
/// └── ipa_index.json            # listing export (site root copy)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The site root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for one kind of published file: `<root>/<kind>`.
    pub fn kind_dir(&self, kind: FileKind) -> PathBuf {
        self.root.join(kind.as_str())
    }

    /// Input archives: `<root>/ipa`.
    pub fn ipa_dir(&self) -> PathBuf {
        self.kind_dir(FileKind::Ipa)
    }

    /// Generated data: `<root>/_data`.
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("_data")
    }

    /// `SQLite` record store: `<root>/_data/ipa_database.db`.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("ipa_database.db")
    }

    /// Apps export: `<root>/_data/ipa_data.json`.
    pub fn apps_json(&self) -> PathBuf {
        self.data_dir().join("ipa_data.json")
    }

    /// Listing export: `<root>/_data/ipa_index.json`.
    pub fn listing_json(&self) -> PathBuf {
        self.data_dir().join("ipa_index.json")
    }

    /// Listing export copy served from the site root: `<root>/ipa_index.json`.
    pub fn root_listing_json(&self) -> PathBuf {
        self.root.join("ipa_index.json")
    }

    /// Extracted icons: `<root>/assets/app-icons`.
    pub fn icons_dir(&self) -> PathBuf {
        self.root.join(ICONS_URL_DIR)
    }

    /// Create the input, data and icon directories if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        for dir in [self.ipa_dir(), self.data_dir(), self.icons_dir()] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
