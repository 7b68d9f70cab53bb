use anyhow::Result;
use strum::EnumIter;

/// Named values that survive between runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum StoreSlot {
    ConversationId,
    Theme,
}

pub trait SessionStore {
    fn get(&self, slot: StoreSlot) -> Option<String>;

    fn set(&mut self, slot: StoreSlot, value: &str) -> Result<()>;

    fn clear(&mut self, slot: StoreSlot) -> Result<()>;
}

pub type SessionStoreBox = Box<dyn SessionStore + Send>;
