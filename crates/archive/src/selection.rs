use crate::tree::FlattenedEntry;

const RESOURCE_FORK_FOLDER: &str = "__MACOSX";

/// Decides which flattened entries take part in a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySelection {
    /// File paths or folder prefixes, `/`-separated, to leave out.
    pub excluded: Vec<String>,
    /// Leave out dot-files, dot-folders and macOS resource-fork folders.
    pub skip_hidden: bool,
}

impl EntrySelection {
    pub fn new(excluded: Vec<String>, skip_hidden: bool) -> Self {
        Self { excluded, skip_hidden }
    }

    pub fn is_included(&self, entry: &FlattenedEntry) -> bool {
        if self.skip_hidden && is_hidden(entry) {
            return false;
        }
        let full = entry.full_path();
        !self.excluded.iter().any(|pattern| matches_prefix(&full, pattern))
    }

    /// Sets `included` on each entry. Order is untouched.
    pub fn apply(&self, entries: &mut [FlattenedEntry]) {
        for entry in entries.iter_mut() {
            entry.included = self.is_included(entry);
            if !entry.included {
                log::debug!("Excluding '{}' from conversion", entry.full_path());
            }
        }
    }
}

fn is_hidden(entry: &FlattenedEntry) -> bool {
    entry
        .path
        .iter()
        .any(|folder| folder == RESOURCE_FORK_FOLDER || folder.starts_with('.'))
        || entry.name.starts_with('.')
}

fn matches_prefix(full_path: &str, pattern: &str) -> bool {
    let pattern = pattern.trim_matches('/');
    if pattern.is_empty() {
        return false;
    }
    full_path == pattern
        || full_path
            .strip_prefix(pattern)
            .is_some_and(|rest| rest.starts_with('/'))
}
