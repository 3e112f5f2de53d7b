//! JSON document key-value store backed by a single file.

use crate::local_state::{
    domain::StateKey,
    ports::{KeyValueStore, StoreError, StoreResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::collections::BTreeMap;
use std::sync::Mutex;

type Document = BTreeMap<String, String>;

/// Key-value store persisting every marker in one JSON object file.
///
/// The parent directory is opened once as a capability; all reads and writes
/// go through it. Writes replace the file through a sibling temporary file so
/// a crash never leaves a truncated document behind. Entries with keys this
/// crate does not know are preserved.
#[derive(Debug)]
pub struct JsonFileKeyValueStore {
    dir: Dir,
    file_name: String,
    write_lock: Mutex<()>,
}

impl JsonFileKeyValueStore {
    /// Opens (without creating) the store file at `path`.
    ///
    /// The parent directory is created when missing. The file itself is
    /// created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] when the path has no file name or the
    /// parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> StoreResult<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            StoreError::storage(std::io::Error::other("state path must include a file name"))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_owned(),
            _ => Utf8PathBuf::from("."),
        };
        Dir::create_ambient_dir_all(&parent, ambient_authority()).map_err(StoreError::storage)?;
        let dir = Dir::open_ambient_dir(&parent, ambient_authority()).map_err(StoreError::storage)?;
        Ok(Self {
            dir,
            file_name: file_name.to_owned(),
            write_lock: Mutex::new(()),
        })
    }

    fn temp_file_name(&self) -> String {
        format!(".{}.tmp", self.file_name)
    }

    fn read_document(&self) -> StoreResult<Document> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(err) => return Err(StoreError::storage(err)),
        };
        if contents.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&contents).map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    fn write_document(&self, document: &Document) -> StoreResult<()> {
        let encoded = serde_json::to_string_pretty(document)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        let temp_name = self.temp_file_name();
        self.dir
            .write(&temp_name, encoded.as_bytes())
            .map_err(StoreError::storage)?;
        self.dir
            .rename(&temp_name, &self.dir, &self.file_name)
            .map_err(StoreError::storage)
    }

    fn update(&self, apply: impl FnOnce(&mut Document)) -> StoreResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|err| StoreError::storage(std::io::Error::other(err.to_string())))?;
        let mut document = self.read_document()?;
        apply(&mut document);
        self.write_document(&document)
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: StateKey) -> StoreResult<Option<String>> {
        let document = self.read_document()?;
        Ok(document.get(key.as_str()).cloned())
    }

    fn set(&self, key: StateKey, value: &str) -> StoreResult<()> {
        self.update(|document| {
            document.insert(key.as_str().to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: StateKey) -> StoreResult<()> {
        self.update(|document| {
            document.remove(key.as_str());
        })
    }
}
