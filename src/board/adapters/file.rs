//! File-backed key-value storage rooted in a capability directory.
//!
//! Each key maps to `<key>.json` inside the directory. Writes land in a
//! temporary sibling first and are renamed over the target, so a crashed
//! write never leaves a truncated board behind.

use std::io::{ErrorKind, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::board::ports::{BoardStorage, StorageError, StorageResult};

/// Storage that keeps one JSON file per key.
#[derive(Debug)]
pub struct FileStorage {
    dir: Dir,
}

impl FileStorage {
    /// Wraps an already opened directory.
    #[must_use]
    pub const fn new(dir: Dir) -> Self {
        Self { dir }
    }

    /// Opens (creating if needed) the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(path: &Utf8Path) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self::new(dir))
    }

    fn file_name(key: &str) -> StorageResult<String> {
        let is_valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !is_valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(format!("{key}.json"))
    }
}

impl BoardStorage for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let file_name = Self::file_name(key)?;
        match self.dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let file_name = Self::file_name(key)?;
        let tmp_name = format!("{file_name}.tmp");

        let mut file = self.dir.create(&tmp_name)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);

        self.dir.rename(&tmp_name, &self.dir, &file_name)?;
        Ok(())
    }
}
