use super::{Slot, Store};
use crate::error::Result;
use crate::{io, paths};
use std::path::{Path, PathBuf};

/// One pretty-printed JSON file per slot, replaced atomically on write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl Store for FileStore {
    fn read(&self, slot: Slot) -> Result<Option<Vec<u8>>> {
        io::read_if_exists(&paths::slot_path(&self.root, slot.key()))
    }

    fn write(&self, slot: Slot, data: &[u8]) -> Result<()> {
        io::atomic_write(&paths::slot_path(&self.root, slot.key()), data)
    }
}
