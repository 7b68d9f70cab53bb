pub mod file;
pub mod memory;

use std::path;

use anyhow::Result;

use crate::domain::models::SessionStoreBox;

pub struct StoreManager {}

impl StoreManager {
    /// Ephemeral sessions keep state in memory only, otherwise state is
    /// written through to `state_file`.
    pub fn get(ephemeral: bool, state_file: &str) -> Result<SessionStoreBox> {
        if ephemeral {
            return Ok(Box::<memory::MemoryStore>::default());
        }

        let store = file::FileStore::load(path::PathBuf::from(state_file))?;
        return Ok(Box::new(store));
    }
}
