use crate::error::{WarcalcError, WcResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Durable key → JSON string store scoped to one client.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> WcResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> WcResult<()>;
}

/// Process-local store, used by tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> WcResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> WcResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> WcResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(WarcalcError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> WcResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> WcResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        atomic_write(&path, value)?;
        debug!("💾 Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// Writes `{path}.tmp`, syncs it, then renames it over `path`.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> std::io::Result<()> {
    let path = path.as_ref();
    // Same directory keeps the rename on one filesystem.
    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)?;
        std::io::Write::write_all(&mut file, contents.as_ref())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_overwrites() {
        let store = MemoryStore::with_entry("army", "[]");
        store.set("army", "[1]").unwrap();
        assert_eq!(store.get("army").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let store = FileStore::new("unused");
        assert!(store.path_for("../escape").is_err());
        assert!(store.path_for("").is_err());
        assert!(store.path_for("warhammer_army").is_ok());
    }
}
