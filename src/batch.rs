//! Async batch driver.
//!
//! Archives are converted one after another on the blocking pool, so slow
//! decoders never stall the runtime and output order always matches input order.

use folio_core::{ArchiveOutcome, BatchProgress, ConversionSettings, DocumentAssembler, NamedArchive, PipelineError};
use log::{info, warn};
use std::sync::Arc;
use tokio::task;

#[derive(Clone)]
pub struct BatchConverter {
    assembler: Arc<DocumentAssembler>,
    settings: Arc<ConversionSettings>,
}

impl BatchConverter {
    pub fn new(assembler: DocumentAssembler, settings: ConversionSettings) -> Self {
        Self {
            assembler: Arc::new(assembler),
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Converts every archive in order, reporting progress after each one.
    ///
    /// A failing archive is returned as an `Err` outcome; the batch carries on.
    /// Dropping the returned future abandons the archives not yet started.
    pub async fn run<F>(&self, archives: Vec<NamedArchive>, mut progress: F) -> Vec<ArchiveOutcome>
    where
        F: FnMut(BatchProgress),
    {
        let total = archives.len();
        info!("[BATCH] Converting {} archives.", total);
        let mut outcomes = Vec::with_capacity(total);

        for (index, archive) in archives.into_iter().enumerate() {
            let name = archive.name.clone();
            let assembler = Arc::clone(&self.assembler);
            let settings = Arc::clone(&self.settings);

            let result = task::spawn_blocking(move || {
                assembler.convert_named(&archive.name, &archive.bytes, &settings)
            })
            .await
            .unwrap_or_else(|e| Err(PipelineError::Other(format!("conversion task failed: {}", e))));

            if let Err(e) = &result {
                warn!("[BATCH] Archive '{}' failed: {}", name, e);
            }
            progress(BatchProgress {
                completed: index + 1,
                total,
                archive: name.clone(),
                succeeded: result.is_ok(),
            });
            outcomes.push(ArchiveOutcome { name, result });
        }

        info!("[BATCH] Finished.");
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn zip_with(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in files {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn preserves_input_order_and_reports_each_archive() {
        let converter = BatchConverter::new(DocumentAssembler::new(), ConversionSettings::default());
        let archives = vec![
            NamedArchive::new("first", zip_with(&[("a/one.txt", b"1")])),
            NamedArchive::new("second", b"not a zip".to_vec()),
            NamedArchive::new("third", zip_with(&[("three.txt", b"3")])),
        ];

        let mut progress = Vec::new();
        let outcomes = converter.run(archives, |p| progress.push(p)).await;

        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert!(outcomes[1].result.is_err());
        assert_eq!(progress.len(), 3);
        assert_eq!(progress[2].completed, 3);
        assert!(!progress[1].succeeded);

        let first = outcomes[0].result.as_ref().unwrap();
        assert_eq!(first.report.dividers, vec!["a".to_string()]);
    }
}
