use std::collections::{BTreeMap, BTreeSet};

use crate::digest::Digest;
use crate::index::FolderIndex;

/// Classification of two folder indexes.
///
/// `changed`, `added` and `removed` never share a key. Everything sorts by
/// path, so the same inputs always produce the same output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Present in both, digest differs: `(old, new)`.
    pub changed: BTreeMap<String, (Digest, Digest)>,
    /// Only in the new index.
    pub added: BTreeSet<String>,
    /// Only in the old index.
    pub removed: BTreeSet<String>,
    /// Present in both with the same digest.
    pub unchanged: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffSummary {
    pub same: usize,
    pub changed: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            same: self.unchanged,
            changed: self.changed.len(),
            added: self.added.len(),
            removed: self.removed.len(),
        }
    }
}

/// Compare `old` against `new`.
///
/// Digests are compared as plain values: a file that was unreadable in one
/// index and readable in the other is reported as changed, with
/// [`Digest::Unreadable`] on one side.
pub fn diff_indexes(old: &FolderIndex, new: &FolderIndex) -> DiffResult {
    let mut result = DiffResult::default();

    for (path, new_digest) in &new.entries {
        match old.entries.get(path) {
            Some(old_digest) if old_digest == new_digest => result.unchanged += 1,
            Some(old_digest) => {
                result
                    .changed
                    .insert(path.clone(), (*old_digest, *new_digest));
            }
            None => {
                result.added.insert(path.clone());
            }
        }
    }

    result.removed = old
        .entries
        .keys()
        .filter(|path| !new.entries.contains_key(*path))
        .cloned()
        .collect();

    result
}
