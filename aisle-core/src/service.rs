use std::sync::Arc;

use aisle_catalog::{binary_search, sort_flights, Flight, FlightCatalog, SeatClass, SeatLayout, SortKey};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::allocator::{self, BookingOutcome, CancelOutcome};
use crate::locator::{self, PassengerStatus};
use crate::{FlightInfo, InventoryState, InventoryStore, ReservationError, ReservationResult};

/// Entry point for every reservation operation.
///
/// Mutations run load, apply and save under a single writer lock so two
/// concurrent bookings can never both start from the same snapshot. The
/// lock is store-wide rather than per flight because the store persists the
/// whole state as one document. Reads take no lock.
pub struct ReservationService {
    catalog: FlightCatalog,
    layout: SeatLayout,
    store: Arc<dyn InventoryStore>,
    writer: Mutex<()>,
}

impl ReservationService {
    pub fn new(catalog: FlightCatalog, layout: SeatLayout, store: Arc<dyn InventoryStore>) -> Self {
        Self {
            catalog,
            layout,
            store,
            writer: Mutex::new(()),
        }
    }

    pub fn list_flights(&self) -> &[Flight] {
        self.catalog.flights()
    }

    pub fn get_flight(&self, flight_number: u32) -> ReservationResult<&Flight> {
        self.catalog
            .get(flight_number)
            .ok_or_else(|| flight_not_found(flight_number))
    }

    pub async fn flight_info(&self, flight_number: u32) -> ReservationResult<FlightInfo> {
        let flight = self.get_flight(flight_number)?;
        let state = self.store.load().await?;
        let inventory = state.flight(flight_number).ok_or_else(|| {
            ReservationError::NotFound(format!("No inventory recorded for flight {flight_number}"))
        })?;
        Ok(FlightInfo::build(flight, inventory))
    }

    pub async fn book(&self, flight_number: u32, class: SeatClass, passenger: &str) -> ReservationResult<BookingOutcome> {
        let passenger = passenger_name(passenger)?;
        self.get_flight(flight_number)?;

        let outcome = self
            .mutate(|state| allocator::book(state, &self.layout, flight_number, class, passenger))
            .await?;

        match &outcome {
            BookingOutcome::Booked { seat_number, .. } => {
                info!(flight_number, %class, passenger, seat_number, "Seat booked")
            }
            BookingOutcome::Waitlisted { position, .. } => {
                info!(flight_number, %class, passenger, position, "Passenger waitlisted")
            }
        }
        Ok(outcome)
    }

    pub async fn cancel(&self, flight_number: u32, class: SeatClass, passenger: &str) -> ReservationResult<CancelOutcome> {
        let passenger = passenger_name(passenger)?;

        let outcome = self
            .mutate(|state| allocator::cancel(state, flight_number, class, passenger))
            .await?;

        info!(
            flight_number,
            %class,
            passenger,
            freed_seat = outcome.freed_seat,
            promoted = outcome.moved_from_waitlist.as_deref(),
            "Booking cancelled"
        );
        Ok(outcome)
    }

    pub async fn passenger_status(&self, passenger: &str) -> ReservationResult<PassengerStatus> {
        let passenger = passenger_name(passenger)?;
        let state = self.store.load().await?;
        locator::find_status(&state, passenger)
    }

    pub fn sorted_flights(&self, by: SortKey) -> Vec<Flight> {
        sort_flights(self.catalog.flights(), by)
    }

    /// Sorts the catalog by flight number, then binary-searches it.
    pub fn search_flight(&self, flight_number: u32) -> ReservationResult<Flight> {
        let sorted = sort_flights(self.catalog.flights(), SortKey::FlightNumber);
        binary_search(&sorted, flight_number)
            .cloned()
            .ok_or_else(|| flight_not_found(flight_number))
    }

    /// Discards all bookings and waitlists and persists the seed state.
    pub async fn reset(&self) -> ReservationResult<InventoryState> {
        let _guard = self.writer.lock().await;
        let seed = InventoryState::seeded(&self.catalog, &self.layout);
        self.store.save(&seed).await?;
        info!(flights = self.catalog.flights().len(), "Inventory reset");
        Ok(seed)
    }

    #[cfg(test)]
    async fn snapshot(&self) -> ReservationResult<InventoryState> {
        Ok(self.store.load().await?)
    }

    async fn mutate<T, F>(&self, apply: F) -> ReservationResult<T>
    where
        F: FnOnce(&mut InventoryState) -> ReservationResult<T>,
    {
        let _guard = self.writer.lock().await;
        let mut state = self.store.load().await?;
        let result = apply(&mut state)?;
        self.store.save(&state).await?;
        debug!("Inventory state saved");
        Ok(result)
    }
}

fn passenger_name(raw: &str) -> ReservationResult<&str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ReservationError::BadRequest("Passenger name required".to_string()));
    }
    Ok(name)
}

fn flight_not_found(flight_number: u32) -> ReservationError {
    ReservationError::NotFound(format!("Flight {flight_number} not found"))
}
