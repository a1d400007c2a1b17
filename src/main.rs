use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use findex::report::render_comparison;
use findex::{
    build_config, build_index_with_progress, compare_files, reevaluate_file, Args, Command,
    ConsoleProgress, NoProgress, ProgressSink,
};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FINDEX_LOG").unwrap_or_else(|_| EnvFilter::new("findex=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = build_config(&args);
    let console = ConsoleProgress::new();
    let progress: &dyn ProgressSink = if args.quiet { &NoProgress } else { &console };

    match &args.command {
        Command::Build { folder, output } => {
            let index = build_index_with_progress(folder, &config, progress)
                .with_context(|| format!("Cannot build index for {}", folder.display()))?;
            match output {
                Some(path) => {
                    index.save(path)?;
                    println!("Wrote {} entries to {}", index.len(), path.display());
                }
                None => {
                    let json = index.to_json()?;
                    let mut stdout = io::stdout().lock();
                    writeln!(stdout, "{json}")?;
                }
            }
        }
        Command::Compare {
            old_index,
            new_index,
        } => {
            let comparison = compare_files(old_index, new_index).context("Compare failed")?;
            print!("{}", render_comparison(&comparison));
        }
        Command::Reval { index } => {
            let comparison = reevaluate_file(index, &config, progress)
                .with_context(|| format!("Cannot re-evaluate {}", index.display()))?;
            print!("{}", render_comparison(&comparison));
        }
        Command::Digest { folder } => {
            let index = build_index_with_progress(folder, &config, progress)
                .with_context(|| format!("Cannot digest {}", folder.display()))?;
            println!(
                "Digest of {} files: {}",
                index.len(),
                index.folder_digest()
            );
        }
    }

    Ok(())
}
