use std::path::Path;

use tracing::info;

use crate::config::IndexerConfig;
use crate::diff::{diff_indexes, DiffResult};
use crate::error::Result;
use crate::index::FolderIndex;
use crate::pool::build_index_with_progress;
use crate::progress::{NoProgress, ProgressSink};

/// Both sides of a comparison together with its result.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub old: FolderIndex,
    pub new: FolderIndex,
    pub diff: DiffResult,
}

impl Comparison {
    pub fn new(old: FolderIndex, new: FolderIndex) -> Self {
        let diff = diff_indexes(&old, &new);
        Comparison { old, new, diff }
    }

    /// Whether the aggregate folder digests agree.
    pub fn folders_match(&self) -> bool {
        self.old.folder_digest() == self.new.folder_digest()
    }
}

/// Rebuild the folder recorded in `previous` and diff the two.
///
/// Every file is hashed again in full.
pub fn reevaluate(previous: &FolderIndex, config: &IndexerConfig) -> Result<DiffResult> {
    let fresh = rebuild(previous, config, &NoProgress)?;
    Ok(diff_indexes(previous, &fresh))
}

/// Load a saved index, rebuild its folder and compare.
pub fn reevaluate_file(
    index_path: &Path,
    config: &IndexerConfig,
    progress: &dyn ProgressSink,
) -> Result<Comparison> {
    let previous = FolderIndex::load(index_path)?;
    let fresh = rebuild(&previous, config, progress)?;
    Ok(Comparison::new(previous, fresh))
}

/// Load two saved indexes and compare them.
pub fn compare_files(old_path: &Path, new_path: &Path) -> Result<Comparison> {
    let old = FolderIndex::load(old_path)?;
    let new = FolderIndex::load(new_path)?;
    Ok(Comparison::new(old, new))
}

fn rebuild(
    previous: &FolderIndex,
    config: &IndexerConfig,
    progress: &dyn ProgressSink,
) -> Result<FolderIndex> {
    info!(
        folder = %previous.folder,
        recorded_files = previous.len(),
        "re-evaluating index"
    );
    build_index_with_progress(Path::new(&previous.folder), config, progress)
}
