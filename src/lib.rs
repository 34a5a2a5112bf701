//! # folio
//!
//! Turns zip archives of mixed files into paginated PDF documents, one
//! document per archive, with a per-entry conversion report.
//!
//! The conversion itself lives in `folio-core`; this crate adds the async
//! batch driver and the command line front end.

pub mod batch;
pub mod cli;

pub use batch::BatchConverter;
pub use folio_core::{
    ArchiveOutcome, BatchProgress, ContentKind, ContentRenderer, ConversionReport, ConversionSettings,
    ConvertedDocument, DocumentAssembler, EntryStatus, NamedArchive, Orientation, PageSize, PipelineError,
};
