//! # folio-core
//!
//! Compiles an archive of heterogeneous files into one paginated document.
//!
//! - **classify**: maps file names to a closed set of content kinds
//! - **content**: decodes each kind into a bitmap, text lines or a skip/error outcome
//! - **layout**: appends rendered content onto fixed-size pages
//! - **assembler**: drives archives through the steps above, in flatten order
//! - **report**: the per-entry outcome log returned with every document
//! - **settings**: the immutable per-run configuration
//!
//! ## Design Principle
//!
//! Per-entry failures are data, not errors. Only an unreadable archive, an
//! invalid configuration, or a failing output writer aborts a conversion, and
//! even then only for the archive concerned.

// Re-export foundation crates
pub use folio_archive as archive;
pub use folio_render_core as render;
pub use folio_types as types;

pub mod assembler;
pub mod classify;
pub mod content;
pub mod error;
pub mod layout;
pub mod report;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_utils;

pub use assembler::{ArchiveOutcome, BatchProgress, ConvertedDocument, DocumentAssembler, NamedArchive};
pub use classify::{classify, classify_with, ContentKind};
pub use content::{ContentRenderer, RenderResult};
pub use error::{DecodeError, PipelineError};
pub use layout::{FinishedDocument, PageLayoutEngine};
pub use report::{ConversionLogEntry, ConversionReport, ConversionReporter, EntryError, EntryStatus};
pub use settings::ConversionSettings;
pub use types::{Bitmap, Orientation, PageCanvas, PageSize};
