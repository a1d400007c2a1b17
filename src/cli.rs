use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{IndexerConfig, DEFAULT_THREADS};
use crate::digest::DEFAULT_CHUNK_SIZE;
use crate::utils::parse_chunk_size;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Number of hashing threads
    #[arg(short, long, global = true, env = "FINDEX_THREADS", default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Bytes read per chunk while hashing (e.g., 10MB, 1MiB, 65536)
    #[arg(
        short,
        long,
        global = true,
        env = "FINDEX_CHUNK_SIZE",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_chunk_size
    )]
    pub chunk_size: usize,

    /// Do not print the progress line
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hash every file under a folder and write the index as JSON
    Build {
        /// Folder to index
        folder: PathBuf,

        /// Index file to write (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two saved index files
    Compare {
        /// Older index file
        old_index: PathBuf,

        /// Newer index file
        new_index: PathBuf,
    },

    /// Re-hash the folder recorded in an index file and compare
    Reval {
        /// Index file to re-evaluate
        index: PathBuf,
    },

    /// Print a single digest for a whole folder
    Digest {
        /// Folder to digest
        folder: PathBuf,
    },
}

pub fn build_config(args: &Args) -> IndexerConfig {
    IndexerConfig::default()
        .with_threads(args.threads)
        .with_chunk_size(args.chunk_size)
}
