//
// lib.rs
// findex
//
// Library entry that re-exports the indexing engine, the diff engine and the CLI surface so the binary and tests can reach them.
//
// Thales Matheus Mendonça Santos - November 2025
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod cli;
pub mod config;
pub mod diff;
pub mod digest;
pub mod error;
pub mod index;
pub mod pool;
pub mod progress;
pub mod reeval;
pub mod report;
pub mod scanner;
pub mod utils;

pub use cli::{build_config, Args, Command};
pub use config::IndexerConfig;
pub use diff::{diff_indexes, DiffResult, DiffSummary};
pub use digest::{hash_file, hash_file_with_buffer, Digest, UNREADABLE_SENTINEL};
pub use error::{IndexError, Result};
pub use index::FolderIndex;
pub use pool::{build_index, build_index_with_progress};
pub use progress::{ConsoleProgress, NoProgress, ProgressSink};
pub use reeval::{compare_files, reevaluate, reevaluate_file, Comparison};
pub use scanner::{scan_dir, ScannedFile};
