//! Key-value store backed by one JSON object on disk, standing in for the
//! browser's `localStorage`.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use overseas_board_shared::{BoardError, BoardResult, KeyValueStore};

/// [`KeyValueStore`] over a single JSON file, read and rewritten whole on
/// every call.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries. A missing file is empty; an unreadable one is
    /// treated as empty and replaced on the next write.
    fn read_entries(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "failed to read state file: {err}");
                return BTreeMap::new();
            },
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), "ignoring corrupt state file: {err}");
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> BoardResult<()> {
        let storage = |err: io::Error| BoardError::Storage(format!("{}: {err}", self.path.display()));
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage)?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| BoardError::Storage(e.to_string()))?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, raw).map_err(storage)?;
        fs::rename(&staging, &self.path).map_err(storage)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> BoardResult<()> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            if let Err(err) = self.write_entries(&entries) {
                tracing::warn!("failed to remove `{key}`: {err}");
            }
        }
    }
}
