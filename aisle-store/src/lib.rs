pub mod app_config;
pub mod document;
pub mod file_store;
pub mod memory_store;

pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;

use std::sync::Arc;

use aisle_catalog::SeatLayout;
use aisle_core::InventoryStore;
use app_config::{StorageBackend, StorageConfig};

/// Builds the store selected by `storage.backend`.
pub fn open_store(config: &StorageConfig, layout: SeatLayout) -> Arc<dyn InventoryStore> {
    match config.backend {
        StorageBackend::File => Arc::new(JsonFileStore::new(&config.path, layout)),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    }
}
