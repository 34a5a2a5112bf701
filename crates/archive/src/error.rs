use thiserror::Error;

/// Fatal, archive-level failures. The archive produces no document.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Malformed archive: {0}")]
    Malformed(String),

    #[error("Failed to read entry '{name}': {message}")]
    EntryRead { name: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => ArchiveError::Io(e),
            other => ArchiveError::Malformed(other.to_string()),
        }
    }
}

/// Why an entry's path could not be placed in the tree. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("empty path")]
    EmptyPath,

    #[error("path escapes the archive root")]
    ParentTraversal,

    #[error("'{0}' is both a file and a folder")]
    FileFolderCollision(String),

    #[error("duplicate file entry")]
    DuplicateFile,
}
