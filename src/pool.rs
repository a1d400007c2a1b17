use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::{debug, info, warn};

use crate::config::{IndexerConfig, MIN_PROGRESS_INTERVAL};
use crate::digest::{hash_file_with_buffer, Digest};
use crate::error::{IndexError, Result};
use crate::index::FolderIndex;
use crate::progress::{NoProgress, ProgressSink};
use crate::scanner::{scan_dir, ScannedFile};

/// Index `root` without progress reporting.
pub fn build_index(root: &Path, config: &IndexerConfig) -> Result<FolderIndex> {
    build_index_with_progress(root, config, &NoProgress)
}

/// Index `root`, sampling progress into `progress` while workers run.
pub fn build_index_with_progress(
    root: &Path,
    config: &IndexerConfig,
    progress: &dyn ProgressSink,
) -> Result<FolderIndex> {
    let files = scan_dir(root)?;
    let folder = root.to_string_lossy().into_owned();

    if config.threads == 0 {
        warn!(folder = %folder, "thread count is zero, producing an empty index");
        return Ok(FolderIndex::new(folder, BTreeMap::new()));
    }

    let queued: Vec<ScannedFile> = files.collect();
    info!(
        folder = %folder,
        files = queued.len(),
        threads = config.threads,
        chunk_size = config.chunk_size,
        "queued files for hashing"
    );

    let start = Instant::now();
    let entries = hash_files(queued, config, progress)?;
    let index = FolderIndex::new(folder, entries);

    info!(
        folder = %index.folder,
        files = index.len(),
        unreadable = index.unreadable_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "index complete"
    );
    Ok(index)
}

/// Hash an already enumerated set of files with `config.threads` workers.
///
/// Each file appears in the result exactly once, unreadable files included.
pub fn hash_files(
    files: Vec<ScannedFile>,
    config: &IndexerConfig,
    progress: &dyn ProgressSink,
) -> Result<BTreeMap<String, Digest>> {
    let total = files.len();
    if config.threads == 0 || total == 0 {
        progress.report(0, total);
        return Ok(BTreeMap::new());
    }

    let (queue_tx, queue_rx) = crossbeam_channel::unbounded::<ScannedFile>();
    for file in files {
        // the receiver is alive until the end of this function
        let _ = queue_tx.send(file);
    }
    drop(queue_tx);

    let remaining = AtomicUsize::new(total);
    let workers = config.threads.min(total);
    let chunk_size = config.chunk_size.max(1);

    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
    let interval = config.progress_interval.max(MIN_PROGRESS_INTERVAL);

    let partials = thread::scope(|scope| {
        let remaining = &remaining;

        let handles: Vec<_> = (0..workers)
            .map(|worker_idx| {
                let rx = queue_rx.clone();
                scope.spawn(move || run_worker(worker_idx, &rx, chunk_size, remaining))
            })
            .collect();

        let reporter = scope.spawn(move || {
            while let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(interval) {
                progress.report(remaining.load(Ordering::Relaxed), total);
            }
        });

        let partials: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
        drop(done_tx);
        let _ = reporter.join();
        partials
    });

    let mut entries = BTreeMap::new();
    for partial in partials {
        let partial = partial.map_err(|_| IndexError::WorkerPanicked)?;
        for (key, digest) in partial {
            match entries.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(digest);
                }
                Entry::Occupied(slot) => {
                    warn!(key = %slot.key(), "two files share one index key, keeping the first");
                }
            }
        }
    }
    progress.report(0, total);
    Ok(entries)
}

fn run_worker(
    worker_idx: usize,
    queue: &Receiver<ScannedFile>,
    chunk_size: usize,
    remaining: &AtomicUsize,
) -> Vec<(String, Digest)> {
    let mut results = Vec::new();
    let mut buffer = Vec::new();
    while let Ok(file) = queue.recv() {
        remaining.fetch_sub(1, Ordering::Relaxed);
        let digest = hash_file_with_buffer(&file.path, chunk_size, &mut buffer);
        debug!(worker = worker_idx, path = %file.key, digest = %digest, "hashed");
        results.push((file.key, digest));
    }
    results
}
