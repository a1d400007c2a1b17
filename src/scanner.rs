use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{IndexError, Result};

/// One regular file found under the scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Location on disk, used for opening.
    pub path: PathBuf,
    /// Index key: the root-joined path rendered as a string.
    pub key: String,
}

impl ScannedFile {
    fn new(path: PathBuf) -> Self {
        let key = match path.to_str() {
            Some(s) => s.to_string(),
            None => {
                warn!(path = %path.display(), "path is not valid UTF-8, escaping invalid bytes in key");
                escape_path(&path)
            }
        };
        ScannedFile { path, key }
    }
}

#[cfg(unix)]
fn escape_path(path: &Path) -> String {
    use std::os::unix::ffi::OsStrExt;
    escape_bytes(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn escape_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Render raw path bytes as a string: valid UTF-8 is kept, each invalid
/// byte becomes `\xNN` and a literal backslash becomes `\\`.
#[cfg_attr(not(unix), allow(dead_code))]
fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 8);
    for chunk in bytes.utf8_chunks() {
        for ch in chunk.valid().chars() {
            if ch == '\\' {
                out.push_str("\\\\");
            } else {
                out.push(ch);
            }
        }
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }
    out
}

/// Lazy, one-shot walk over every regular file below a root.
///
/// Hidden directories are descended into. Symbolic links are not followed
/// while descending, but a link whose target is a regular file is yielded.
/// Order is whatever the filesystem returns.
pub struct FileEnumerator {
    walker: walkdir::IntoIter,
}

impl Iterator for FileEnumerator {
    type Item = ScannedFile;

    fn next(&mut self) -> Option<ScannedFile> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping entry that could not be walked");
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file()) {
                return Some(ScannedFile::new(entry.into_path()));
            }
        }
    }
}

/// Start enumerating `root`.
///
/// Fails up front if `root` does not exist or is not a directory.
pub fn scan_dir(root: &Path) -> Result<FileEnumerator> {
    let metadata = root
        .metadata()
        .map_err(|err| IndexError::enumeration(root, err.to_string()))?;
    if !metadata.is_dir() {
        return Err(IndexError::enumeration(root, "not a directory"));
    }

    Ok(FileEnumerator {
        walker: WalkDir::new(root).follow_links(false).into_iter(),
    })
}
