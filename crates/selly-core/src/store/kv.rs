//! Slot storage in a single redb database.
//!
//! One `SLOTS` table keyed by slot name; each value is the JSON encoding of
//! the whole collection. A write replaces the value inside one redb write
//! transaction, so a crash leaves either the old or the new collection.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};

use super::{Slot, Store};
use crate::error::{GardenError, Result};

/// Key: slot name. Value: JSON-encoded collection.
const SLOTS: TableDefinition<&str, &[u8]> = TableDefinition::new("slots");

fn storage_err(e: impl std::fmt::Display) -> GardenError {
    GardenError::Storage(e.to_string())
}

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create the database at `path`, creating the table up front.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path).map_err(storage_err)?;
        let wt = db.begin_write().map_err(storage_err)?;
        wt.open_table(SLOTS).map_err(storage_err)?;
        wt.commit().map_err(storage_err)?;
        Ok(Self { db })
    }
}

impl Store for RedbStore {
    fn read(&self, slot: Slot) -> Result<Option<Vec<u8>>> {
        let rt = self.db.begin_read().map_err(storage_err)?;
        let table = rt.open_table(SLOTS).map_err(storage_err)?;
        let value = table.get(slot.key()).map_err(storage_err)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn write(&self, slot: Slot, data: &[u8]) -> Result<()> {
        let wt = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = wt.open_table(SLOTS).map_err(storage_err)?;
            table.insert(slot.key(), data).map_err(storage_err)?;
        }
        wt.commit().map_err(storage_err)?;
        Ok(())
    }
}
