use aisle_catalog::SeatClass;
use serde::Serialize;

use crate::{InventoryState, ReservationError, ReservationResult};

/// Where a passenger currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PassengerStatus {
    #[serde(rename_all = "camelCase")]
    Booked {
        name: String,
        flight_number: u32,
        class: SeatClass,
        seat_number: u32,
    },
    #[serde(rename_all = "camelCase")]
    Waitlisted {
        name: String,
        flight_number: u32,
        class: SeatClass,
        position: usize,
    },
}

impl PassengerStatus {
    pub fn flight_number(&self) -> u32 {
        match self {
            PassengerStatus::Booked { flight_number, .. } | PassengerStatus::Waitlisted { flight_number, .. } => {
                *flight_number
            }
        }
    }
}

/// Finds the first booking or waitlist entry for `name`.
///
/// Flights are scanned by ascending number, classes in first, business,
/// economy order, and within a class the booked seats before the waitlist.
/// A name present on several flights reports only the first hit.
pub fn find_status(state: &InventoryState, name: &str) -> ReservationResult<PassengerStatus> {
    for (flight_number, flight) in state.flights() {
        for (class, inventory) in flight.classes() {
            if let Some(seat_number) = inventory.seat_of(name) {
                return Ok(PassengerStatus::Booked {
                    name: name.to_string(),
                    flight_number,
                    class,
                    seat_number,
                });
            }
            if let Some(position) = inventory.waitlist_position(name) {
                return Ok(PassengerStatus::Waitlisted {
                    name: name.to_string(),
                    flight_number,
                    class,
                    position,
                });
            }
        }
    }

    Err(ReservationError::NotFound(format!("Passenger {name} not found")))
}
