//! JsonFileSnapshot - flat JSON file on the local filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{decode, encode, SnapshotError, SnapshotStore};
use crate::book::Book;

/// Snapshot stored as a single JSON file.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the
/// target, so readers only ever observe a complete snapshot. The parent
/// directory is created on demand.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn ensure_parent(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }
}

impl SnapshotStore for JsonFileSnapshot {
    fn load(&self) -> Result<Option<Vec<Book>>, SnapshotError> {
        self.ensure_parent()?;

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&bytes).map(Some)
    }

    fn save(&self, books: &[Book]) -> Result<(), SnapshotError> {
        let bytes = encode(books)?;
        self.ensure_parent()?;

        let tmp = self.temp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
