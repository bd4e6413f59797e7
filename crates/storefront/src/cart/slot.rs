//! Cart persistence slot implementations.
//!
//! A slot is a single named key-value entry: read returns absent-or-value,
//! write replaces the value wholesale, delete clears it.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors raised by a persistence slot.
///
/// The cart ledger swallows these at its boundary; they never propagate
/// to callers.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A single durable key-value location backing the cart across restarts.
pub trait CartSlot: Send + Sync {
    /// Read the stored blob, `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn read(&self) -> Result<Option<String>, SlotError>;

    /// Replace the stored blob wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn write(&self, payload: &str) -> Result<(), SlotError>;

    /// Clear the slot. Clearing an empty slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be modified.
    fn delete(&self) -> Result<(), SlotError>;
}

/// Slot backed by a single file on disk.
///
/// Writes go through a sibling temp file and a rename so readers never
/// observe a partial blob.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot at the given path. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl CartSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, payload: &str) -> Result<(), SlotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let temp = self.temp_path();
        std::fs::write(&temp, payload)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn delete(&self) -> Result<(), SlotError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory slot. Clones share the same storage cell, which lets tests
/// hand the "same" slot to successive ledgers.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    /// Create an empty in-memory slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-seeded with a blob.
    #[must_use]
    pub fn with_value(payload: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(payload.into()))),
        }
    }
}

impl CartSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(self
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, payload: &str) -> Result<(), SlotError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(payload.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), SlotError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_slot(name: &str) -> FileSlot {
        let path = std::env::temp_dir().join(format!(
            "timepiece-slot-{}-{name}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        FileSlot::new(path)
    }

    #[test]
    fn test_file_slot_read_absent() {
        let slot = temp_slot("absent");
        assert!(slot.read().expect("read").is_none());
    }

    #[test]
    fn test_file_slot_write_read_delete() {
        let slot = temp_slot("roundtrip");
        slot.write("[1,2,3]").expect("write");
        assert_eq!(slot.read().expect("read").as_deref(), Some("[1,2,3]"));

        slot.write("[]").expect("overwrite");
        assert_eq!(slot.read().expect("read").as_deref(), Some("[]"));

        slot.delete().expect("delete");
        assert!(slot.read().expect("read").is_none());
    }

    #[test]
    fn test_file_slot_delete_is_idempotent() {
        let slot = temp_slot("idempotent-delete");
        slot.delete().expect("delete empty slot");
        slot.delete().expect("delete again");
    }

    #[test]
    fn test_memory_slot_clones_share_storage() {
        let slot = MemorySlot::new();
        let clone = slot.clone();
        slot.write("{}").expect("write");
        assert_eq!(clone.read().expect("read").as_deref(), Some("{}"));
    }
}
