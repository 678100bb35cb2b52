//! Shared record types and JSON documents for ipadex.
//!
//! The types here are the contract between the extraction pipeline, the
//! SQLite record store, and the static site that consumes the exported
//! JSON. Field names and order match the published documents.

pub mod index;
pub mod listing;
pub mod platform;
pub mod record;
pub mod size;

// Re-exports
pub use index::{AppEntry, AppIndex};
pub use listing::{FileKind, Listing, ListingEntry};
pub use platform::Platform;
pub use record::{AppRecord, file_stem};
pub use size::format_size;
