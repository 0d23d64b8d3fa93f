//! The durable storage slot: one named key holding one JSON document.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Storage operation error.
///
/// These are infrastructure failures (IO, serialization), as opposed to
/// domain errors. Read-side failures are recovered by the snapshot store's
/// seed fallback and never reach the user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] io::Error),

    #[error("storage serialization: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// A single named slot of durable storage.
///
/// `read` returns `None` when the slot has never been written. Writes
/// replace the whole document; there is no partial update, so readers only
/// ever observe fully-settled content.
pub trait StorageSlot {
    fn read(&self) -> Result<Option<String>, StoreError>;

    fn write(&self, contents: &str) -> Result<(), StoreError>;
}

impl<S> StorageSlot for Arc<S>
where
    S: StorageSlot + ?Sized,
{
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        (**self).write(contents)
    }
}

/// Volatile slot for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemorySlot {
    cell: Mutex<Option<String>>,
}

impl InMemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-populated with a document, for exercising the load path.
    pub fn seeded(contents: impl Into<String>) -> Self {
        Self {
            cell: Mutex::new(Some(contents.into())),
        }
    }
}

impl StorageSlot for InMemorySlot {
    fn read(&self) -> Result<Option<String>, StoreError> {
        let cell = self.cell.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(cell.clone())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        let mut cell = self.cell.lock().map_err(|_| StoreError::Poisoned)?;
        *cell = Some(contents.to_string());
        Ok(())
    }
}

/// File-backed slot: the JSON document lives at a fixed path.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_slot_round_trips() {
        let slot = InMemorySlot::new();
        assert!(slot.read().unwrap().is_none());

        slot.write("{}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{}"));

        slot.write("[1]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn seeded_slot_reads_back_its_document() {
        let slot = InMemorySlot::seeded("hello");
        assert_eq!(slot.read().unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn file_slot_reports_absent_before_first_write() -> anyhow::Result<()> {
        let path = std::env::temp_dir()
            .join("hemobank-tests")
            .join(format!("slot-{}.json", uuid::Uuid::now_v7()));
        let slot = FileSlot::new(&path);

        assert!(slot.read()?.is_none());

        slot.write("{\"k\":1}")?;
        assert_eq!(slot.read()?.as_deref(), Some("{\"k\":1}"));

        std::fs::remove_file(&path)?;
        Ok(())
    }
}
