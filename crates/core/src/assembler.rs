//! Drives one archive (or a batch of them) through the whole conversion.

use crate::classify::classify_with;
use crate::content::{ContentRenderer, RenderResult};
use crate::error::PipelineError;
use crate::layout::PageLayoutEngine;
use crate::report::{ConversionReport, ConversionReporter, EntryStatus};
use crate::settings::ConversionSettings;
use folio_archive::{ArchiveReader, ArchiveTree, FlattenedEntry, ZipArchiveReader};
use folio_render_core::DocumentWriter;
use folio_render_lopdf::LopdfWriter;

/// Creates the output writer for one archive, given the document title.
pub type WriterFactory = Box<dyn Fn(&str) -> Box<dyn DocumentWriter> + Send + Sync>;

const DEFAULT_TITLE: &str = "archive";

/// A finished document and the report describing how it was built.
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    pub bytes: Vec<u8>,
    pub report: ConversionReport,
}

/// One input of a batch conversion.
#[derive(Debug, Clone)]
pub struct NamedArchive {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl NamedArchive {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

#[derive(Debug)]
pub struct ArchiveOutcome {
    pub name: String,
    pub result: Result<ConvertedDocument, PipelineError>,
}

/// Reported once per archive after it has been converted (or has failed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub archive: String,
    pub succeeded: bool,
}

pub struct DocumentAssembler {
    reader: Box<dyn ArchiveReader>,
    renderer: ContentRenderer,
    writer_factory: WriterFactory,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self {
            reader: Box::new(ZipArchiveReader),
            renderer: ContentRenderer::default(),
            writer_factory: Box::new(|title| Box::new(LopdfWriter::new(title))),
        }
    }
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_reader(mut self, reader: impl ArchiveReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    pub fn with_renderer(mut self, renderer: ContentRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_writer_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> Box<dyn DocumentWriter> + Send + Sync + 'static,
    {
        self.writer_factory = Box::new(factory);
        self
    }

    pub fn convert(&self, archive: &[u8], settings: &ConversionSettings) -> Result<ConvertedDocument, PipelineError> {
        self.convert_named(DEFAULT_TITLE, archive, settings)
    }

    /// Converts one archive. `name` becomes the document title.
    ///
    /// Only archive-level failures are returned as errors; every entry
    /// failure ends up in the report instead.
    pub fn convert_named(
        &self,
        name: &str,
        archive: &[u8],
        settings: &ConversionSettings,
    ) -> Result<ConvertedDocument, PipelineError> {
        let canvas = settings.canvas()?;
        let entries = self.reader.read_entries(archive)?;
        let tree = ArchiveTree::build(&entries);

        let mut flattened = tree.flatten();
        settings.selection().apply(&mut flattened);
        log::info!(
            "Converting '{}': {} entries read, {} files placed, {} unplaced",
            name,
            entries.len(),
            flattened.len(),
            tree.skipped().len()
        );

        let mut layout = PageLayoutEngine::new_document(canvas, (self.writer_factory)(name));
        let mut reporter = ConversionReporter::new();
        let mut last_folder: Option<&[String]> = None;

        for entry in flattened.iter().filter(|e| e.included) {
            if last_folder != Some(entry.path.as_slice()) {
                if !entry.is_root_level() {
                    let title = entry.path.join(" / ");
                    layout.insert_divider(&title)?;
                    reporter.record_divider(title);
                }
                last_folder = Some(entry.path.as_slice());
            }

            let bytes = entries
                .get(entry.entry)
                .map(|e| e.bytes.as_slice())
                .unwrap_or_default();
            let status = self.process_entry(&mut layout, entry, bytes, settings);
            reporter.record(entry.name.clone(), entry.full_path(), status);
        }

        let finished = layout.finish()?;
        let report = reporter.finalize(finished.page_count);
        log::info!(
            "Converted '{}': {} pages, {} processed, {} skipped, {} errors",
            name,
            report.page_count,
            report.processed_count,
            report.skipped_count,
            report.errors.len()
        );
        Ok(ConvertedDocument {
            bytes: finished.bytes,
            report,
        })
    }

    fn process_entry(
        &self,
        layout: &mut PageLayoutEngine,
        entry: &FlattenedEntry,
        bytes: &[u8],
        settings: &ConversionSettings,
    ) -> EntryStatus {
        let kind = classify_with(&entry.name, settings);
        let placed = match self.renderer.render(kind, bytes) {
            RenderResult::Image(bitmap) => layout.place_image(&bitmap, &entry.name),
            RenderResult::TextLines(lines) => layout.place_text(&lines, Some(&entry.name)),
            RenderResult::Skipped(reason) => return EntryStatus::Skipped(reason),
            RenderResult::Error(message) => return EntryStatus::Error(message),
        };
        match placed {
            Ok(()) => EntryStatus::Processed(kind),
            Err(e) => EntryStatus::Error(e.to_string()),
        }
    }

    /// Converts each archive independently and in order.
    ///
    /// `progress` is called once per archive, after that archive is done.
    pub fn convert_batch<F>(
        &self,
        archives: &[NamedArchive],
        settings: &ConversionSettings,
        mut progress: F,
    ) -> Vec<ArchiveOutcome>
    where
        F: FnMut(BatchProgress),
    {
        let total = archives.len();
        archives
            .iter()
            .enumerate()
            .map(|(index, archive)| {
                let result = self.convert_named(&archive.name, &archive.bytes, settings);
                if let Err(e) = &result {
                    log::error!("Archive '{}' failed: {}", archive.name, e);
                }
                progress(BatchProgress {
                    completed: index + 1,
                    total,
                    archive: archive.name.clone(),
                    succeeded: result.is_ok(),
                });
                ArchiveOutcome {
                    name: archive.name.clone(),
                    result,
                }
            })
            .collect()
    }
}
