//! The ordered folder tree and its deterministic flattening.

use crate::entry::{ArchiveEntry, EntryId};
use crate::error::SkipReason;
use indexmap::IndexMap;

/// A node in the archive's folder hierarchy.
///
/// Folder children keep the order in which their first entry was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Folder(IndexMap<String, TreeNode>),
    /// Leaf sentinel pointing back at the entry that supplies its bytes.
    File(EntryId),
}

impl TreeNode {
    fn empty_folder() -> Self {
        TreeNode::Folder(IndexMap::new())
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    /// Number of file leaves below this node.
    pub fn file_count(&self) -> usize {
        match self {
            TreeNode::File(_) => 1,
            TreeNode::Folder(children) => children.values().map(TreeNode::file_count).sum(),
        }
    }
}

/// A file leaf in flatten order, with the folders that lead to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedEntry {
    pub path: Vec<String>,
    pub name: String,
    pub included: bool,
    pub entry: EntryId,
}

impl FlattenedEntry {
    /// Folder segments and name joined with `/`.
    pub fn full_path(&self) -> String {
        let mut full = self.path.join("/");
        if !full.is_empty() {
            full.push('/');
        }
        full.push_str(&self.name);
        full
    }

    pub fn is_root_level(&self) -> bool {
        self.path.is_empty()
    }
}

/// An entry that could not be placed in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub raw_name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub struct ArchiveTree {
    root: TreeNode,
    skipped: Vec<SkippedPath>,
}

impl ArchiveTree {
    /// Inserts every entry's path into a fresh tree.
    ///
    /// Entries that cannot be placed are recorded in [`ArchiveTree::skipped`];
    /// for name clashes the first entry seen wins.
    pub fn build(entries: &[ArchiveEntry]) -> Self {
        let mut root = IndexMap::new();
        let mut skipped = Vec::new();

        for (id, entry) in entries.iter().enumerate() {
            let outcome = entry
                .segments()
                .and_then(|segments| insert(&mut root, &segments, entry.is_structural(), id));

            if let Err(reason) = outcome {
                log::warn!("Skipping archive entry '{}': {}", entry.raw_name, reason);
                skipped.push(SkippedPath {
                    raw_name: entry.raw_name.clone(),
                    reason,
                });
            }
        }

        Self {
            root: TreeNode::Folder(root),
            skipped,
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn skipped(&self) -> &[SkippedPath] {
        &self.skipped
    }

    pub fn flatten(&self) -> Vec<FlattenedEntry> {
        flatten(&self.root)
    }
}

fn insert(
    root: &mut IndexMap<String, TreeNode>,
    segments: &[&str],
    structural: bool,
    id: EntryId,
) -> Result<(), SkipReason> {
    let (folders, leaf) = if structural {
        (segments, None)
    } else {
        match segments.split_last() {
            Some((leaf, folders)) => (folders, Some(*leaf)),
            None => return Err(SkipReason::EmptyPath),
        }
    };

    let mut current = root;
    for segment in folders {
        let node = current
            .entry((*segment).to_string())
            .or_insert_with(TreeNode::empty_folder);
        current = match node {
            TreeNode::Folder(children) => children,
            TreeNode::File(_) => return Err(SkipReason::FileFolderCollision((*segment).to_string())),
        };
    }

    let Some(name) = leaf else {
        return Ok(());
    };

    match current.get(name) {
        Some(TreeNode::Folder(_)) => Err(SkipReason::FileFolderCollision(name.to_string())),
        Some(TreeNode::File(_)) => Err(SkipReason::DuplicateFile),
        None => {
            current.insert(name.to_string(), TreeNode::File(id));
            Ok(())
        }
    }
}

/// Depth-first pre-order walk emitting one entry per file leaf.
///
/// Every flattened entry starts out included. A bare `File` root has no
/// folder context and flattens to nothing.
pub fn flatten(root: &TreeNode) -> Vec<FlattenedEntry> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    walk(root, &mut prefix, &mut out);
    out
}

fn walk(node: &TreeNode, prefix: &mut Vec<String>, out: &mut Vec<FlattenedEntry>) {
    let TreeNode::Folder(children) = node else {
        return;
    };

    for (name, child) in children {
        match child {
            TreeNode::Folder(_) => {
                prefix.push(name.clone());
                walk(child, prefix, out);
                prefix.pop();
            }
            TreeNode::File(id) => out.push(FlattenedEntry {
                path: prefix.clone(),
                name: name.clone(),
                included: true,
                entry: *id,
            }),
        }
    }
}
