//! Persisted inventory document.
//!
//! Writes always produce the partitioned layout:
//!
//! ```json
//! { "101": { "economy": { "seats": [16, ...], "booked": { "16": "Alice" }, "waitlist": [] } } }
//! ```
//!
//! Reads also accept class objects without `seats`, `booked` written as an
//! empty array, and legacy flight entries that hold `booked`/`waitlist`
//! directly with no class partitioning.

use std::collections::BTreeMap;

use aisle_catalog::{SeatClass, SeatLayout};
use aisle_core::{ClassInventory, FlightInventory, InventoryState, PersistenceError};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassDocument {
    #[serde(default)]
    seats: Option<Vec<u32>>,
    #[serde(default)]
    booked: Value,
    #[serde(default)]
    waitlist: Vec<String>,
}

impl ClassDocument {
    fn booked_seats(&self) -> Result<BTreeMap<u32, String>, PersistenceError> {
        match &self.booked {
            Value::Null => Ok(BTreeMap::new()),
            Value::Array(items) if items.is_empty() => Ok(BTreeMap::new()),
            Value::Object(entries) => entries
                .iter()
                .map(|(seat, passenger)| {
                    let seat = seat
                        .parse::<u32>()
                        .map_err(|_| corrupt(format!("booked seat key {seat:?} is not a seat number")))?;
                    let passenger = passenger
                        .as_str()
                        .ok_or_else(|| corrupt(format!("booked seat {seat} does not hold a name")))?;
                    Ok((seat, passenger.to_string()))
                })
                .collect(),
            other => Err(corrupt(format!("booked must be a seat-keyed object, found {other}"))),
        }
    }
}

pub fn encode(state: &InventoryState) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec_pretty(state)?)
}

pub fn decode(bytes: &[u8], layout: &SeatLayout) -> Result<InventoryState, PersistenceError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(InventoryState::new());
    }

    let root: Value = serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
    let flights = match root {
        Value::Object(flights) => flights,
        Value::Array(items) if items.is_empty() => return Ok(InventoryState::new()),
        other => return Err(corrupt(format!("expected an object keyed by flight number, found {other}"))),
    };

    let mut state = InventoryState::new();
    for (key, entry) in flights {
        let flight_number = key
            .parse::<u32>()
            .map_err(|_| corrupt(format!("top-level key {key:?} is not a flight number")))?;
        let entry = match entry {
            Value::Object(entry) => entry,
            other => return Err(corrupt(format!("flight {flight_number} entry is not an object: {other}"))),
        };

        let inventory = if is_legacy(flight_number, &entry)? {
            decode_legacy(flight_number, entry, layout)?
        } else {
            decode_partitioned(flight_number, entry, layout)?
        };
        state.insert_flight(flight_number, inventory);
    }
    Ok(state)
}

/// Legacy entries carry `booked`/`waitlist` directly; an entry mixing
/// those with class objects is ambiguous.
fn is_legacy(flight_number: u32, entry: &Map<String, Value>) -> Result<bool, PersistenceError> {
    let legacy = entry.contains_key("booked") || entry.contains_key("waitlist");
    if legacy {
        if let Some(class) = entry.keys().find(|key| key.parse::<SeatClass>().is_ok()) {
            return Err(corrupt(format!(
                "flight {flight_number} mixes unpartitioned booked/waitlist with class {class:?}"
            )));
        }
    }
    Ok(legacy)
}

fn decode_partitioned(
    flight_number: u32,
    entry: Map<String, Value>,
    layout: &SeatLayout,
) -> Result<FlightInventory, PersistenceError> {
    let mut classes = Vec::with_capacity(entry.len());
    for (name, value) in entry {
        let class = name
            .parse::<SeatClass>()
            .map_err(|e| corrupt(format!("flight {flight_number}: {e}")))?;
        let document = ClassDocument::deserialize(value)
            .map_err(|e| corrupt(format!("flight {flight_number} {class}: {e}")))?;

        let seats = document
            .seats
            .clone()
            .unwrap_or_else(|| layout.range(class).seats().collect());
        let inventory = ClassInventory::restore(seats, document.booked_seats()?, document.waitlist)
            .map_err(|e| corrupt(format!("flight {flight_number} {class}: {e}")))?;
        classes.push((class, inventory));
    }
    Ok(FlightInventory::with_classes(layout, classes))
}

/// Spreads an unpartitioned flight over the classes: each booked seat goes
/// to the class whose range holds it and the waitlist goes to economy.
fn decode_legacy(
    flight_number: u32,
    entry: Map<String, Value>,
    layout: &SeatLayout,
) -> Result<FlightInventory, PersistenceError> {
    let document = ClassDocument::deserialize(Value::Object(entry))
        .map_err(|e| corrupt(format!("flight {flight_number}: {e}")))?;

    let mut booked: BTreeMap<SeatClass, BTreeMap<u32, String>> = BTreeMap::new();
    for (seat, passenger) in document.booked_seats()? {
        match layout.class_of(seat) {
            Some(class) => {
                booked.entry(class).or_default().insert(seat, passenger);
            }
            None => warn!(flight_number, seat, passenger = %passenger, "Dropping legacy booking outside every seat range"),
        }
    }

    let mut classes = Vec::with_capacity(SeatClass::ALL.len());
    for class in SeatClass::ALL {
        let waitlist = if class == SeatClass::Economy {
            document.waitlist.clone()
        } else {
            Vec::new()
        };
        let inventory = ClassInventory::restore(
            layout.range(class).seats().collect(),
            booked.remove(&class).unwrap_or_default(),
            waitlist,
        )
        .map_err(|e| corrupt(format!("flight {flight_number} {class}: {e}")))?;
        classes.push((class, inventory));
    }
    Ok(FlightInventory::with_classes(layout, classes))
}

fn corrupt(message: String) -> PersistenceError {
    PersistenceError::Corrupt(message)
}
