pub mod flight;
pub mod seating;
pub mod sort;

pub use flight::{Flight, FlightCatalog};
pub use seating::{SeatClass, SeatLayout, SeatRange};
pub use sort::{binary_search, merge_sort, sort_flights, SortKey};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate flight number: {0}")]
    DuplicateFlight(u32),
    #[error("Flight number must be positive")]
    InvalidFlightNumber,
    #[error("Invalid IATA airport code: {0}")]
    InvalidAirport(String),
    #[error("Seat range for {class} is empty: {start}..={end}")]
    EmptyRange { class: SeatClass, start: u32, end: u32 },
    #[error("Seat ranges for {0} and {1} overlap")]
    OverlappingRanges(SeatClass, SeatClass),
    #[error("Unknown seat class: {0}")]
    UnknownClass(String),
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}
