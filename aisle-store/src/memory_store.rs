use aisle_core::{InventoryState, InventoryStore, PersistenceError};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Volatile store for tests and throwaway runs.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<InventoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn load(&self) -> Result<InventoryState, PersistenceError> {
        Ok(self.state.read().await.clone())
    }

    async fn save(&self, state: &InventoryState) -> Result<(), PersistenceError> {
        *self.state.write().await = state.clone();
        Ok(())
    }
}
