//! Read-only access to `.ipa` containers.
//!
//! An IPA is a zip archive with a single `Payload/<Name>.app/` bundle. Only
//! the entries needed for metadata are ever decompressed; nothing is written
//! to disk.

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use regex::Regex;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Descriptor path inside an application bundle.
const INFO_PLIST_PATTERN: &str = r"^Payload/[^/]+\.app/Info\.plist$";

/// Captures the bundle name of any entry below `Payload/<Name>.app/`.
const BUNDLE_DIR_PATTERN: &str = r"^Payload/([^/]+)\.app/";

/// Upper bound on the buffer reserved up front for one entry.
const MAX_PREALLOC: u64 = 1 << 20;

/// Errors raised while reading an archive container.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The file could not be opened or an entry could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip structure is unreadable.
    #[error("Zip error: {0}")]
    Zip(#[from] ZipError),

    /// An entry-path pattern failed to compile.
    #[error("Invalid entry pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// An opened application archive.
pub struct IpaArchive<R> {
    zip: ZipArchive<R>,
}

impl<R: Read + Seek> fmt::Debug for IpaArchive<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpaArchive")
            .field("entries", &self.zip.len())
            .finish_non_exhaustive()
    }
}

impl IpaArchive<BufReader<File>> {
    /// Open an archive on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] if the file cannot be opened and
    /// [`ArchiveError::Zip`] if it is not a readable zip container.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> IpaArchive<R> {
    /// Wrap any seekable reader holding a zip container.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Zip`] if the central directory cannot be read.
    pub fn new(reader: R) -> Result<Self, ArchiveError> {
        Ok(Self {
            zip: ZipArchive::new(reader)?,
        })
    }

    /// All entry paths in central-directory order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.zip.file_names()
    }

    /// Whether an entry with exactly this path exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entry_names().any(|n| n == name)
    }

    /// Path of the bundle's `Info.plist`, if the archive has one.
    ///
    /// When several bundles match, the lexically first path wins so that
    /// repeated runs pick the same descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Pattern`] only if the built-in pattern is invalid.
    pub fn find_info_plist(&self) -> Result<Option<String>, ArchiveError> {
        let re = Regex::new(INFO_PLIST_PATTERN)?;
        Ok(self
            .entry_names()
            .filter(|name| re.is_match(name))
            .min()
            .map(str::to_string))
    }

    /// Names of every `Payload/<Name>.app/` bundle, without the suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Pattern`] only if the built-in pattern is invalid.
    pub fn app_bundle_names(&self) -> Result<BTreeSet<String>, ArchiveError> {
        let re = Regex::new(BUNDLE_DIR_PATTERN)?;
        Ok(self
            .entry_names()
            .filter_map(|name| re.captures(name))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect())
    }

    /// Read a whole entry into memory. A missing entry is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be decompressed.
    pub fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>, ArchiveError> {
        match self.zip.by_name(name) {
            Ok(mut entry) => {
                // Declared sizes come from the archive and are not trusted.
                let mut buf = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
                entry.read_to_end(&mut buf)?;
                Ok(Some(buf))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Raw bytes of the bundle descriptor, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor entry exists but cannot be read.
    pub fn read_info_plist(&mut self) -> Result<Option<Vec<u8>>, ArchiveError> {
        match self.find_info_plist()? {
            Some(path) => self.read_entry(&path),
            None => Ok(None),
        }
    }
}
