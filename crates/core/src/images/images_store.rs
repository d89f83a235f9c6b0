use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::{Error, Result};

/// Byte store for product images, keyed by file name.
pub trait ImageStoreTrait: Send + Sync {
    /// Writes the payload under `file_name`, replacing any existing file.
    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<()>;

    /// Deletes `file_name` when present. Returns whether a file was removed.
    fn delete(&self, file_name: &str) -> Result<bool>;

    /// Checks whether `file_name` is present in the store.
    fn exists(&self, file_name: &str) -> bool;

    /// File names currently present, sorted ascending.
    fn list(&self) -> Result<Vec<String>>;
}

/// Image store backed by a directory on the local filesystem.
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

impl ImageStoreTrait for FsImageStore {
    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(file_name), bytes)?;
        Ok(())
    }

    fn delete(&self, file_name: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(file_name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn exists(&self, file_name: &str) -> bool {
        self.path_for(file_name).is_file()
    }

    fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::from(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.path().is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
