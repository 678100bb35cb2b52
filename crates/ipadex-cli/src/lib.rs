//! ipadex - metadata and JSON index generator for an IPA archive site
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! # Site Layout
//!
//! ```text
//! <root>/
//! ├── ipa/                 # Input archives (also deb/ and dylib/ for the listing)
//! ├── _data/
//! │   ├── ipa_database.db  # SQLite record store
//! │   ├── ipa_data.json    # Apps document
//! │   └── ipa_index.json   # Download listing
//! ├── assets/app-icons/    # Extracted icons, <stem>.png
//! └── ipa_index.json       # Download listing (root copy)
//! ```

pub mod cmd;
pub mod ops;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ipadex")]
#[command(author, version, about = "ipadex - metadata and index generator for an IPA archive site")]
pub struct Cli {
    /// Site root containing ipa/, _data/ and assets/
    #[arg(long, global = true, env = "IPADEX_ROOT", default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract metadata from new archives and export the apps document
    Run,
    /// Export the apps document from the record store
    Export,
    /// Regenerate the download listing
    Index,
}
