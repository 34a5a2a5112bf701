//! Archive ingestion for folio.
//!
//! - **reader**: enumerates raw entries out of a zip buffer
//! - **tree**: builds the ordered folder tree and flattens it depth-first
//! - **selection**: marks flattened entries as included or excluded

mod entry;
mod error;
pub mod reader;
pub mod selection;
pub mod tree;

pub use entry::{ArchiveEntry, EntryId};
pub use error::{ArchiveError, SkipReason};
pub use reader::{ArchiveReader, ZipArchiveReader};
pub use selection::EntrySelection;
pub use tree::{flatten, ArchiveTree, FlattenedEntry, SkippedPath, TreeNode};
