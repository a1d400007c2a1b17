use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use sha2::{Digest as _, Sha256};

use crate::digest::Digest;
use crate::error::{IndexError, Result};

/// Snapshot of every file under `folder`, keyed by path.
///
/// Stored as `{ "folder": ..., "index": { path: digest } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderIndex {
    pub folder: String,
    #[serde(rename = "index")]
    pub entries: BTreeMap<String, Digest>,
}

impl FolderIndex {
    pub fn new(folder: impl Into<String>, entries: BTreeMap<String, Digest>) -> Self {
        FolderIndex {
            folder: folder.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Digest> {
        self.entries.get(key)
    }

    pub fn unreadable_count(&self) -> usize {
        self.entries.values().filter(|d| d.is_unreadable()).count()
    }

    /// One fingerprint for the whole folder.
    ///
    /// SHA-256 over the per-file digest strings in sorted order. Paths do not
    /// contribute, so a pure rename leaves it unchanged.
    pub fn folder_digest(&self) -> Digest {
        let mut rendered: Vec<String> = self.entries.values().map(Digest::to_string).collect();
        rendered.sort_unstable();

        let mut hasher = Sha256::new();
        for digest in &rendered {
            hasher.update(digest.as_bytes());
        }
        Digest::Sha256(hasher.finalize().into())
    }

    /// Pretty JSON, four-space indented.
    pub fn to_json(&self) -> Result<String> {
        let mut out = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn from_json(text: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| IndexError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| IndexError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let save_err = |source| IndexError::Save {
            path: path.to_path_buf(),
            source,
        };
        let mut file = fs::File::create(path).map_err(save_err)?;
        file.write_all(json.as_bytes()).map_err(save_err)?;
        file.write_all(b"\n").map_err(save_err)?;
        Ok(())
    }
}
