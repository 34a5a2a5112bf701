//! Command line arguments and how they map onto conversion settings.

use clap::Parser;
use folio_core::{ConversionSettings, Orientation, PageSize, PipelineError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const FALLBACK_STEM: &str = "archive";

/// Compile zip archives into paginated PDF documents.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Zip archives to convert
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory the PDFs (and reports) are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// JSON settings file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// A4, Letter, Legal, Tabloid, Executive or Custom
    #[arg(long)]
    pub page_size: Option<PageSize>,

    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// Custom page width in points
    #[arg(long)]
    pub custom_width: Option<f32>,

    /// Custom page height in points
    #[arg(long)]
    pub custom_height: Option<f32>,

    /// Skip image, SVG and PSD entries
    #[arg(long, default_value_t = false)]
    pub no_images: bool,

    /// Skip Markdown, DXF and plain text entries
    #[arg(long, default_value_t = false)]
    pub no_text: bool,

    /// Leave out a file path or folder prefix (repeatable)
    #[arg(long = "exclude")]
    pub excluded: Vec<String>,

    /// Leave out dot-files and __MACOSX folders
    #[arg(long, default_value_t = false)]
    pub skip_hidden: bool,

    /// Also write <name>.report.json next to each PDF
    #[arg(long, default_value_t = false)]
    pub report: bool,
}

impl Args {
    /// Loads the config file (if any) and applies the flag overrides.
    pub fn settings(&self) -> Result<ConversionSettings, PipelineError> {
        let mut settings = match &self.config {
            Some(path) => ConversionSettings::from_file(path)?,
            None => ConversionSettings::default(),
        };

        if let Some(size) = self.page_size {
            settings.page_size = size;
        }
        if let Some(orientation) = self.orientation {
            settings.orientation = orientation;
        }
        if let Some(width) = self.custom_width {
            settings.custom_width = width;
        }
        if let Some(height) = self.custom_height {
            settings.custom_height = height;
        }
        if self.no_images {
            settings.include_images = false;
        }
        if self.no_text {
            settings.include_text = false;
        }
        settings.excluded_paths.extend(self.excluded.iter().cloned());
        settings.skip_hidden |= self.skip_hidden;

        // Surface a bad custom size before any archive is read.
        settings.canvas()?;
        Ok(settings)
    }
}

/// Hands out slugged, collision-free file stems for output documents.
#[derive(Debug, Default)]
pub struct OutputNames {
    taken: HashSet<String>,
}

impl OutputNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stem_for(&mut self, input: &Path) -> String {
        let raw = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut base = slug::slugify(&raw);
        if base.is_empty() {
            base = FALLBACK_STEM.to_string();
        }

        let mut stem = base.clone();
        let mut n = 2;
        while !self.taken.insert(stem.clone()) {
            stem = format!("{}-{}", base, n);
            n += 1;
        }
        stem
    }
}
