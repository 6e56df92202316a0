use std::sync::Arc;

use aisle_core::ReservationService;

#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<ReservationService>,
    /// CORS origin; `None` allows any origin.
    pub allowed_origin: Option<String>,
}

impl AppState {
    pub fn new(reservations: ReservationService) -> Self {
        Self {
            reservations: Arc::new(reservations),
            allowed_origin: None,
        }
    }
}
