//! Enumerates the entries of an archive buffer.

use crate::entry::ArchiveEntry;
use crate::error::ArchiveError;
use std::io::{Cursor, Read};

/// Largest uncompressed size a single entry may declare.
pub const MAX_ENTRY_BYTES: u64 = 1 << 30;

/// Source of raw archive entries.
///
/// Implementations read the whole archive up front: any failure is fatal for
/// that archive and nothing is partially converted.
pub trait ArchiveReader: Send + Sync {
    fn read_entries(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError>;
}

/// Reads zip archives, keeping the central-directory order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveReader;

impl ArchiveReader for ZipArchiveReader {
    fn read_entries(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let raw_name = file.name().to_string();

            if file.is_dir() {
                entries.push(ArchiveEntry::directory(raw_name));
                continue;
            }

            let declared = file.size();
            let data = read_bounded(&mut file, &raw_name, declared, bytes.len())?;
            entries.push(ArchiveEntry::file(raw_name, data));
        }

        log::debug!("Read {} entries from zip archive", entries.len());
        Ok(entries)
    }
}

/// Reads exactly `declared` bytes from an entry.
///
/// The declared size comes from the archive itself, so it only bounds the
/// read; the initial buffer never exceeds the archive's own length.
fn read_bounded(
    reader: impl Read,
    name: &str,
    declared: u64,
    archive_len: usize,
) -> Result<Vec<u8>, ArchiveError> {
    let entry_error = |message: String| ArchiveError::EntryRead {
        name: name.to_string(),
        message,
    };

    if declared > MAX_ENTRY_BYTES {
        return Err(entry_error(format!(
            "declares {} bytes, over the {} byte limit",
            declared, MAX_ENTRY_BYTES
        )));
    }

    let capacity = usize::try_from(declared).map_or(archive_len, |d| d.min(archive_len));
    let mut data = Vec::with_capacity(capacity);
    reader
        .take(declared + 1)
        .read_to_end(&mut data)
        .map_err(|e| entry_error(e.to_string()))?;

    if data.len() as u64 != declared {
        return Err(entry_error(format!(
            "declares {} bytes but holds {}",
            declared,
            data.len()
        )));
    }
    Ok(data)
}
