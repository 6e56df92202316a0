pub mod allocator;
pub mod inventory;
pub mod locator;
pub mod repository;
pub mod service;

pub use allocator::{BookingOutcome, CancelOutcome};
pub use inventory::{ClassInventory, FlightInfo, FlightInventory, InventoryState};
pub use locator::PassengerStatus;
pub use repository::InventoryStore;
pub use service::ReservationService;

use aisle_catalog::CatalogError;

/// Failure to read or write the persisted inventory document.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode inventory state: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Persisted inventory state is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<CatalogError> for ReservationError {
    fn from(err: CatalogError) -> Self {
        ReservationError::BadRequest(err.to_string())
    }
}

pub type ReservationResult<T> = Result<T, ReservationError>;
