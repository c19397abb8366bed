use std::path::{Path, PathBuf};

/// Directory under the home directory used when no root is given.
const DEFAULT_DIR: &str = ".selly";

/// Resolve the data root.
///
/// Priority:
/// 1. `--root` flag / `SELLY_ROOT` env var (passed in as `explicit`)
/// 2. `~/.selly`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Some(home) = home::home_dir() {
        return home.join(DEFAULT_DIR);
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
