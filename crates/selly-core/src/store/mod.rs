//! Persistence gateway.
//!
//! Collections are stored whole, one named slot each. A [`Store`] only moves
//! bytes; the typed [`load`] and [`save`] helpers handle JSON encoding so
//! every backend stores the same representation.

pub mod file;
pub mod kv;
pub mod memory;

pub use file::FileStore;
pub use kv::RedbStore;
pub use memory::MemoryStore;

use crate::config::StorageBackend;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    User,
    Letters,
    Replies,
    Garden,
}

impl Slot {
    pub fn all() -> &'static [Slot] {
        &[Slot::User, Slot::Letters, Slot::Replies, Slot::Garden]
    }

    pub fn key(self) -> &'static str {
        match self {
            Slot::User => "user",
            Slot::Letters => "letters",
            Slot::Replies => "replies",
            Slot::Garden => "garden",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Durable key-value storage of whole collections.
pub trait Store: Send + Sync {
    /// Raw contents of `slot`, `None` when it has never been written.
    fn read(&self, slot: Slot) -> Result<Option<Vec<u8>>>;

    /// Replace the contents of `slot`.
    fn write(&self, slot: Slot, data: &[u8]) -> Result<()>;
}

pub fn load<T: DeserializeOwned>(store: &dyn Store, slot: Slot) -> Result<Option<T>> {
    match store.read(slot)? {
        Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
        None => Ok(None),
    }
}

/// Load a list slot, treating an absent slot as empty.
pub fn load_list<T: DeserializeOwned>(store: &dyn Store, slot: Slot) -> Result<Vec<T>> {
    Ok(load(store, slot)?.unwrap_or_default())
}

pub fn save<T: Serialize + ?Sized>(store: &dyn Store, slot: Slot, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value)?;
    store.write(slot, &data)
}

/// Open the configured backend under `root`.
pub fn open(root: &Path, backend: StorageBackend) -> Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match backend {
        StorageBackend::File => Arc::new(FileStore::new(root)),
        StorageBackend::Redb => Arc::new(RedbStore::open(&crate::paths::redb_path(root))?),
    };
    Ok(store)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::Letter;
    use crate::types::{Context, Emotion, Status};
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_letters() -> Vec<Letter> {
        let now = Utc::now();
        vec![
            Letter::new(
                "newest".into(),
                Emotion::Joy,
                4,
                [Context::Work].into_iter().collect(),
                [Status::Stress].into_iter().collect(),
                now,
            ),
            Letter::new(
                "older".into(),
                Emotion::Sad,
                2,
                Default::default(),
                Default::default(),
                now - chrono::Duration::days(1),
            ),
        ]
    }

    fn roundtrip(store: &dyn Store) {
        let letters = sample_letters();
        save(store, Slot::Letters, &letters).unwrap();
        let loaded: Vec<Letter> = load_list(store, Slot::Letters).unwrap();
        assert_eq!(loaded, letters);
    }

    #[test]
    fn file_store_roundtrip_preserves_order() {
        let dir = TempDir::new().unwrap();
        roundtrip(&FileStore::new(dir.path()));
    }

    #[test]
    fn redb_store_roundtrip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = RedbStore::open(&dir.path().join("garden.redb")).unwrap();
        roundtrip(&store);
    }

    #[test]
    fn memory_store_roundtrip_preserves_order() {
        roundtrip(&MemoryStore::new());
    }

    #[test]
    fn absent_list_slot_is_empty() {
        let store = MemoryStore::new();
        let plants: Vec<crate::plant::Plant> = load_list(&store, Slot::Garden).unwrap();
        assert!(plants.is_empty());
        let user: Option<crate::profile::UserProfile> = load(&store, Slot::User).unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn every_slot_is_stored_separately() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        for (i, slot) in Slot::all().iter().enumerate() {
            store.write(*slot, &[i as u8]).unwrap();
        }
        for (i, slot) in Slot::all().iter().enumerate() {
            assert_eq!(store.read(*slot).unwrap(), Some(vec![i as u8]));
            assert!(dir.path().join(format!("{}.json", slot.key())).exists());
        }
    }

    #[test]
    fn open_selects_backend() {
        let dir = TempDir::new().unwrap();
        let store = open(dir.path(), StorageBackend::Redb).unwrap();
        save(store.as_ref(), Slot::Garden, &Vec::<u8>::new()).unwrap();
        assert!(dir.path().join("garden.redb").exists());

        let store = open(dir.path(), StorageBackend::File).unwrap();
        save(store.as_ref(), Slot::Garden, &Vec::<u8>::new()).unwrap();
        assert!(dir.path().join("garden.json").exists());
    }
}
