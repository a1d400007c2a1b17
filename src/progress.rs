use std::io::{self, Write};
use std::sync::Mutex;

/// Receives `(files_remaining, files_total)` samples while a build runs.
///
/// Samples may be stale. The last sample of a run is always `(0, total)`.
pub trait ProgressSink: Sync {
    fn report(&self, remaining: usize, total: usize);
}

/// Discards every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _remaining: usize, _total: usize) {}
}

/// Single self-overwriting status line on stderr.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    finished: Mutex<bool>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn render_line(remaining: usize, total: usize) -> String {
    let hashed = total.saturating_sub(remaining);
    let percent = if total == 0 {
        100.0
    } else {
        hashed as f64 / total as f64 * 100.0
    };
    format!("Files remaining -> {remaining} ({percent:.1}%)")
}

impl ProgressSink for ConsoleProgress {
    fn report(&self, remaining: usize, total: usize) {
        let Ok(mut finished) = self.finished.lock() else {
            return;
        };
        if *finished {
            return;
        }
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{:<50}\r", render_line(remaining, total));
        if remaining == 0 {
            let _ = writeln!(stderr);
            *finished = true;
        }
        let _ = stderr.flush();
    }
}
