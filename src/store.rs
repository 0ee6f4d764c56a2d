use crate::config::TableConfig;
use crate::error::GameError;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What survives between sessions for one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub stack: u64,
    pub hands_won: u32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(String),
}

impl From<StoreError> for GameError {
    fn from(e: StoreError) -> Self {
        GameError::Store(e.to_string())
    }
}

/// Source and sink of player records. The engine calls `load_or_create` when
/// seating an identity and `save` after a round settles.
pub trait PlayerStore {
    /// Unknown identities are created with the store's starting stack.
    fn load_or_create(&mut self, id: &PlayerId) -> Result<PlayerRecord, StoreError>;
    fn save(&mut self, id: &PlayerId, record: PlayerRecord) -> Result<(), StoreError>;
}

/// In-process store, e.g. for tests or a bot that does not need durability.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    starting_stack: u64,
    records: HashMap<PlayerId, PlayerRecord>,
}

impl MemoryStore {
    pub fn new(starting_stack: u64) -> Self {
        Self { starting_stack, records: HashMap::new() }
    }

    /// Newcomers start with the table's configured stack.
    pub fn for_table(config: &TableConfig) -> Self {
        Self::new(config.starting_stack)
    }

    pub fn get(&self, id: &PlayerId) -> Option<PlayerRecord> {
        self.records.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PlayerStore for MemoryStore {
    fn load_or_create(&mut self, id: &PlayerId) -> Result<PlayerRecord, StoreError> {
        let starting_stack = self.starting_stack;
        let record = self
            .records
            .entry(id.clone())
            .or_insert_with(|| PlayerRecord { stack: starting_stack, hands_won: 0 });
        Ok(*record)
    }

    fn save(&mut self, id: &PlayerId, record: PlayerRecord) -> Result<(), StoreError> {
        self.records.insert(id.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_identity_gets_starting_stack() {
        let mut store = MemoryStore::new(1000);
        let id = PlayerId::from("newcomer");
        let rec = store.load_or_create(&id).unwrap();
        assert_eq!(rec, PlayerRecord { stack: 1000, hands_won: 0 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn table_config_sets_the_starting_stack() {
        let cfg = TableConfig { starting_stack: 250, ..TableConfig::default() };
        let mut store = MemoryStore::for_table(&cfg);
        let rec = store.load_or_create(&PlayerId::from("newcomer")).unwrap();
        assert_eq!(rec.stack, 250);
    }

    #[test]
    fn saved_record_is_loaded_back() {
        let mut store = MemoryStore::new(1000);
        let id = PlayerId::from("regular");
        store.save(&id, PlayerRecord { stack: 1375, hands_won: 4 }).unwrap();
        assert_eq!(store.load_or_create(&id).unwrap().stack, 1375);
        assert_eq!(store.get(&id).map(|r| r.hands_won), Some(4));
    }
}
