//! Per-entry outcome accounting.

use crate::classify::ContentKind;
use crate::error::PipelineError;
use serde::{Serialize, Serializer};
use std::fmt;

/// The single outcome recorded for an attempted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Processed(ContentKind),
    Skipped(String),
    Error(String),
}

impl EntryStatus {
    pub fn is_processed(&self) -> bool {
        matches!(self, EntryStatus::Processed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, EntryStatus::Skipped(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EntryStatus::Error(_))
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Processed(kind) => write!(f, "Processed ({})", kind.label()),
            EntryStatus::Skipped(reason) => write!(f, "Skipped ({})", reason),
            EntryStatus::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

impl Serialize for EntryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionLogEntry {
    /// The entry's file name.
    pub name: String,
    /// Folder segments and name joined with `/`.
    pub path: String,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryError {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub processed_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<EntryError>,
    pub log: Vec<ConversionLogEntry>,
    /// Divider titles in the order they were inserted.
    pub dividers: Vec<String>,
    pub page_count: usize,
}

impl ConversionReport {
    /// Every attempted entry: processed, skipped or failed.
    pub fn total_attempted(&self) -> usize {
        self.log.len()
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Accumulates one archive's outcomes, then derives the counts from them.
#[derive(Debug, Default)]
pub struct ConversionReporter {
    log: Vec<ConversionLogEntry>,
    dividers: Vec<String>,
}

impl ConversionReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, path: impl Into<String>, status: EntryStatus) {
        let name = name.into();
        match &status {
            EntryStatus::Processed(_) => log::debug!("{}: {}", name, status),
            _ => log::warn!("{}: {}", name, status),
        }
        self.log.push(ConversionLogEntry {
            name,
            path: path.into(),
            status,
        });
    }

    pub fn record_divider(&mut self, title: impl Into<String>) {
        self.dividers.push(title.into());
    }

    pub fn finalize(self, page_count: usize) -> ConversionReport {
        let processed_count = self.log.iter().filter(|e| e.status.is_processed()).count();
        let skipped_count = self.log.iter().filter(|e| e.status.is_skipped()).count();
        let errors = self
            .log
            .iter()
            .filter_map(|e| match &e.status {
                EntryStatus::Error(message) => Some(EntryError {
                    name: e.name.clone(),
                    error: message.clone(),
                }),
                _ => None,
            })
            .collect();

        ConversionReport {
            processed_count,
            skipped_count,
            errors,
            log: self.log,
            dividers: self.dividers,
            page_count,
        }
    }
}
