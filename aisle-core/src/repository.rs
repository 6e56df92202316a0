use async_trait::async_trait;

use crate::{InventoryState, PersistenceError};

/// Repository trait for the persisted inventory document.
///
/// Every call swaps the whole state. Implementations provide no locking
/// between callers; writers are serialized by [`crate::ReservationService`].
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Returns the persisted state, or an empty state when nothing has been
    /// written yet.
    async fn load(&self) -> Result<InventoryState, PersistenceError>;

    async fn save(&self, state: &InventoryState) -> Result<(), PersistenceError>;
}
