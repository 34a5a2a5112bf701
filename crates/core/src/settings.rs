//! Explicit, immutable per-run conversion settings.

use crate::error::PipelineError;
use folio_archive::EntrySelection;
use folio_types::{Orientation, PageCanvas, PageSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionSettings {
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// Points; only read when `page_size` is `Custom`.
    pub custom_width: f32,
    /// Points; only read when `page_size` is `Custom`.
    pub custom_height: f32,
    pub include_images: bool,
    pub include_text: bool,
    /// File paths or folder prefixes to leave out of the document.
    pub excluded_paths: Vec<String>,
    pub skip_hidden: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            custom_width: 595.28,
            custom_height: 841.89,
            include_images: true,
            include_text: true,
            excluded_paths: Vec::new(),
            skip_hidden: false,
        }
    }
}

impl ConversionSettings {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read settings from '{}': {}", path_ref.display(), e),
            ))
        })?;
        Self::from_json_str(&source)
    }

    /// Resolves the page geometry shared by every page of the output.
    pub fn canvas(&self) -> Result<PageCanvas, PipelineError> {
        Ok(PageCanvas::resolve(
            self.page_size,
            self.orientation,
            self.custom_width,
            self.custom_height,
        )?)
    }

    pub fn selection(&self) -> EntrySelection {
        EntrySelection::new(self.excluded_paths.clone(), self.skip_hidden)
    }
}
