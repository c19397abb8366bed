use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "config.yaml";
pub const REDB_FILE: &str = "garden.redb";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// JSON file backing a persistence slot in the file store.
pub fn slot_path(root: &Path, slot_key: &str) -> PathBuf {
    root.join(format!("{slot_key}.json"))
}

pub fn redb_path(root: &Path) -> PathBuf {
    root.join(REDB_FILE)
}
