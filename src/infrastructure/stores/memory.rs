#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use dashmap::DashMap;

use crate::domain::models::SessionStore;
use crate::domain::models::StoreSlot;

/// Keeps state for the lifetime of the process. Clones share the same values.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<DashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, slot: StoreSlot) -> Option<String> {
        return self
            .values
            .get(&slot.to_string())
            .map(|val| return val.to_string());
    }

    fn set(&mut self, slot: StoreSlot, value: &str) -> Result<()> {
        self.values.insert(slot.to_string(), value.to_string());
        return Ok(());
    }

    fn clear(&mut self, slot: StoreSlot) -> Result<()> {
        self.values.remove(&slot.to_string());
        return Ok(());
    }
}
