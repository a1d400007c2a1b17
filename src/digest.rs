use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use tracing::warn;

/// Wire value recorded for files that could not be read.
pub const UNREADABLE_SENTINEL: &str = "BAD_STREAM_SKIPPED";

pub const DEFAULT_CHUNK_SIZE: usize = 10_000_000;

/// Largest chunk ever allocated, whatever the configured size.
pub const MAX_CHUNK_SIZE: usize = 1 << 30;

const SHA256_LEN: usize = 32;

/// Content fingerprint of one file.
///
/// On the wire both variants are plain strings: 64 lowercase hex characters
/// or [`UNREADABLE_SENTINEL`]. For comparison purposes `Unreadable` is just
/// another value, so a file flipping between readable and unreadable shows
/// up as changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Digest {
    Sha256([u8; SHA256_LEN]),
    Unreadable,
}

impl Digest {
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Digest::Unreadable)
    }

    /// Digest of an in-memory buffer.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Digest::Sha256(Sha256::digest(bytes).into())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Digest::Sha256(bytes) => f.write_str(&hex::encode(bytes)),
            Digest::Unreadable => f.write_str(UNREADABLE_SENTINEL),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("not a sha-256 digest or 'BAD_STREAM_SKIPPED': {0:?}")]
pub struct InvalidDigest(String);

impl FromStr for Digest {
    type Err = InvalidDigest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNREADABLE_SENTINEL {
            return Ok(Digest::Unreadable);
        }
        // canonical lowercase form only
        if s.len() != SHA256_LEN * 2 || s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(InvalidDigest(s.to_string()));
        }
        let mut bytes = [0u8; SHA256_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidDigest(s.to_string()))?;
        Ok(Digest::Sha256(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Hash a file in `chunk_size` pieces.
///
/// Never fails: a file that cannot be opened, or that errors part-way
/// through, yields [`Digest::Unreadable`].
pub fn hash_file(path: &Path, chunk_size: usize) -> Digest {
    hash_file_with_buffer(path, chunk_size, &mut Vec::new())
}

/// Like [`hash_file`], reusing `buffer` across calls.
///
/// The buffer grows to at most `chunk_size`, [`MAX_CHUNK_SIZE`] or the file
/// length, whichever is smallest.
pub fn hash_file_with_buffer(path: &Path, chunk_size: usize, buffer: &mut Vec<u8>) -> Digest {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot open file, recording as unreadable");
            return Digest::Unreadable;
        }
    };

    let file_len = file
        .metadata()
        .map(|m| usize::try_from(m.len()).unwrap_or(usize::MAX))
        .unwrap_or(DEFAULT_CHUNK_SIZE);
    let chunk = chunk_size.min(MAX_CHUNK_SIZE).min(file_len).max(1);
    if buffer.len() < chunk {
        buffer.resize(chunk, 0);
    }

    match hash_reader(&mut file, &mut buffer[..chunk]) {
        Ok(digest) => digest,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "read failed mid-file, recording as unreadable");
            Digest::Unreadable
        }
    }
}

/// Stream `reader` into SHA-256 using `buffer` as the chunk.
pub fn hash_reader<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<Digest> {
    let mut hasher = Sha256::new();
    loop {
        let n = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }
    Ok(Digest::Sha256(hasher.finalize().into()))
}
