//! Core library for ipadex.
//!
//! Reads `.ipa` archives and turns their embedded `Info.plist` and icon
//! resources into normalized metadata:
//!
//! - [`archive`] opens the zip container and locates bundle entries.
//! - [`descriptor`] decodes the property list.
//! - [`normalize`] maps descriptor keys onto record fields.
//! - [`icon`] ranks icon candidates and probes the archive for them.
//! - [`inspect`] ties the above together for one archive.
//! - [`assets`] and [`paths`] describe where things live on disk.
//!
//! Nothing here touches the record store; that lives in the CLI crate.

pub mod archive;
pub mod assets;
pub mod descriptor;
pub mod icon;
pub mod inspect;
pub mod normalize;
pub mod paths;

#[cfg(test)]
pub(crate) mod test_support;

pub use archive::{ArchiveError, IpaArchive};
pub use descriptor::{Descriptor, DescriptorError};
pub use inspect::{Inspection, inspect_ipa};
pub use normalize::{AppMetadata, normalize};
pub use paths::SiteLayout;
