pub mod fixtures;
pub mod pdf_assertions;

use folio::{ConversionReport, ConversionSettings, DocumentAssembler, PipelineError};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF and its conversion report
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
    pub report: ConversionReport,
}

impl GeneratedPdf {
    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Status strings in log order
    pub fn statuses(&self) -> Vec<String> {
        self.report.log.iter().map(|e| e.status.to_string()).collect()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Convert an archive with the default assembler
pub fn convert(archive: &[u8], settings: &ConversionSettings) -> Result<GeneratedPdf, PipelineError> {
    convert_with(&DocumentAssembler::new(), archive, settings)
}

pub fn convert_with(
    assembler: &DocumentAssembler,
    archive: &[u8],
    settings: &ConversionSettings,
) -> Result<GeneratedPdf, PipelineError> {
    let converted = assembler.convert(archive, settings)?;
    let doc = LopdfDocument::load_mem(&converted.bytes).map_err(|e| PipelineError::Other(e.to_string()))?;
    Ok(GeneratedPdf {
        bytes: converted.bytes,
        doc,
        report: converted.report,
    })
}
