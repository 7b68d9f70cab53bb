#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::fs;
use std::path;

use anyhow::Result;

use crate::domain::models::SessionStore;
use crate::domain::models::StoreSlot;

/// Persists slots as a YAML map, writing the whole file on every change.
pub struct FileStore {
    file_path: path::PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `file_path`. A missing file is an empty store; an
    /// unreadable one is logged and replaced on the next write.
    pub fn load(file_path: path::PathBuf) -> Result<FileStore> {
        let mut values = BTreeMap::new();
        if file_path.exists() {
            let payload = fs::read_to_string(&file_path)?;
            match serde_yaml::from_str::<Option<BTreeMap<String, String>>>(&payload) {
                Ok(Some(parsed)) => values = parsed,
                Ok(None) => (),
                Err(err) => {
                    tracing::warn!(error = ?err, path = ?file_path, "State file is corrupt, starting fresh");
                }
            }
        }

        return Ok(FileStore { file_path, values });
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_yaml::to_string(&self.values)?;
        fs::write(&self.file_path, payload)?;

        return Ok(());
    }
}

impl SessionStore for FileStore {
    fn get(&self, slot: StoreSlot) -> Option<String> {
        return self.values.get(&slot.to_string()).cloned();
    }

    fn set(&mut self, slot: StoreSlot, value: &str) -> Result<()> {
        self.values.insert(slot.to_string(), value.to_string());
        return self.save();
    }

    fn clear(&mut self, slot: StoreSlot) -> Result<()> {
        if self.values.remove(&slot.to_string()).is_none() {
            return Ok(());
        }

        return self.save();
    }
}
