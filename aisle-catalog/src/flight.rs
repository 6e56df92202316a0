use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::CatalogError;

/// A scheduled flight. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_number: u32,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date: NaiveDate,
}

impl Flight {
    pub fn new(
        flight_number: u32,
        departure_airport: impl Into<String>,
        arrival_airport: impl Into<String>,
        departure_date: NaiveDate,
    ) -> Self {
        Self {
            flight_number,
            departure_airport: departure_airport.into(),
            arrival_airport: arrival_airport.into(),
            departure_date,
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.flight_number == 0 {
            return Err(CatalogError::InvalidFlightNumber);
        }
        for code in [&self.departure_airport, &self.arrival_airport] {
            if !is_iata_code(code) {
                return Err(CatalogError::InvalidAirport(code.clone()));
            }
        }
        Ok(())
    }
}

fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Read-only list of known flights, kept in configured order.
#[derive(Debug, Clone)]
pub struct FlightCatalog {
    flights: Vec<Flight>,
}

impl FlightCatalog {
    pub fn new(flights: Vec<Flight>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for flight in &flights {
            flight.validate()?;
            if !seen.insert(flight.flight_number) {
                return Err(CatalogError::DuplicateFlight(flight.flight_number));
            }
        }
        Ok(Self { flights })
    }

    /// The two-flight demo catalog the service ships with.
    pub fn demo() -> Self {
        Self {
            flights: vec![
                Flight::new(101, "LHR", "JFK", date(2026, 9, 1)),
                Flight::new(202, "CDG", "FCO", date(2026, 9, 2)),
            ],
        }
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn get(&self, flight_number: u32) -> Option<&Flight> {
        self.flights.iter().find(|f| f.flight_number == flight_number)
    }

    pub fn flight_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.flights.iter().map(|f| f.flight_number)
    }
}

impl Default for FlightCatalog {
    fn default() -> Self {
        Self::demo()
    }
}

// Demo dates are constants known to be valid.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
