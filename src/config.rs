use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::digest::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};

pub const DEFAULT_THREADS: usize = 10;

pub const MIN_PROGRESS_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for one index build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Number of hashing workers. Zero produces an empty index.
    pub threads: usize,

    /// Bytes read per I/O call while hashing a file.
    pub chunk_size: usize,

    /// How often the progress sink is sampled.
    pub progress_interval: Duration,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval: Duration::from_millis(500),
        }
    }
}

impl IndexerConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the chunk size, clamped to `1..=MAX_CHUNK_SIZE`.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, MAX_CHUNK_SIZE);
        self
    }

    /// Set the sampling interval, never shorter than [`MIN_PROGRESS_INTERVAL`].
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval.max(MIN_PROGRESS_INTERVAL);
        self
    }
}
