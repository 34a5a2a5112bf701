use crate::error::SkipReason;

/// Index of an entry in the list returned by an [`ArchiveReader`](crate::ArchiveReader).
pub type EntryId = usize;

/// One file or directory record read out of an archive.
#[derive(Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// The name exactly as stored in the archive.
    pub raw_name: String,
    pub bytes: Vec<u8>,
    pub is_dir: bool,
}

impl ArchiveEntry {
    pub fn file(raw_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            raw_name: raw_name.into(),
            bytes,
            is_dir: false,
        }
    }

    pub fn directory(raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            bytes: Vec::new(),
            is_dir: true,
        }
    }

    /// A trailing separator marks a directory even when the flag is unset.
    pub fn is_structural(&self) -> bool {
        self.is_dir || self.raw_name.ends_with('/') || self.raw_name.ends_with('\\')
    }

    /// Splits the stored name into path segments.
    ///
    /// Backslashes are treated as separators; empty and `.` segments are dropped.
    pub fn segments(&self) -> Result<Vec<&str>, SkipReason> {
        let mut segments = Vec::new();
        for segment in self.raw_name.split(['/', '\\']) {
            match segment {
                "" | "." => continue,
                ".." => return Err(SkipReason::ParentTraversal),
                s => segments.push(s),
            }
        }
        if segments.is_empty() {
            return Err(SkipReason::EmptyPath);
        }
        Ok(segments)
    }
}

impl std::fmt::Debug for ArchiveEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("raw_name", &self.raw_name)
            .field("bytes", &self.bytes.len())
            .field("is_dir", &self.is_dir)
            .finish()
    }
}
