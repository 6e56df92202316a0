use aisle_catalog::{Flight, FlightCatalog, SeatClass, SeatLayout, SeatRange};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Seats, assignments and waitlist for one class of one flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInventory {
    seats: Vec<u32>,
    booked: BTreeMap<u32, String>,
    waitlist: VecDeque<String>,
}

impl ClassInventory {
    pub fn new(range: SeatRange) -> Self {
        Self {
            seats: range.seats().collect(),
            booked: BTreeMap::new(),
            waitlist: VecDeque::new(),
        }
    }

    /// Rebuilds a class from persisted parts, rejecting anything that
    /// breaks the per-class invariants.
    pub fn restore(
        seats: Vec<u32>,
        booked: BTreeMap<u32, String>,
        waitlist: Vec<String>,
    ) -> Result<Self, String> {
        if seats.is_empty() {
            return Err("class has no seats".to_string());
        }
        if let Some(pair) = seats.windows(2).find(|pair| pair[0].checked_add(1) != Some(pair[1])) {
            return Err(format!(
                "seats must be an ascending contiguous range, found {} followed by {}",
                pair[0], pair[1]
            ));
        }

        if let Some(seat) = booked.keys().find(|seat| !seats.contains(seat)) {
            return Err(format!("seat {seat} is booked but outside the class seat range"));
        }

        let mut names = HashSet::new();
        for name in booked.values().chain(waitlist.iter()) {
            if !names.insert(name.as_str()) {
                return Err(format!("passenger {name:?} appears more than once in one class"));
            }
        }

        Ok(Self {
            seats,
            booked,
            waitlist: waitlist.into(),
        })
    }

    pub fn seats(&self) -> &[u32] {
        &self.seats
    }

    pub fn booked(&self) -> &BTreeMap<u32, String> {
        &self.booked
    }

    pub fn waitlist(&self) -> &VecDeque<String> {
        &self.waitlist
    }

    /// True when `name` holds a seat or a waitlist slot in this class.
    pub fn contains(&self, name: &str) -> bool {
        self.seat_of(name).is_some() || self.waitlist_position(name).is_some()
    }

    pub fn seat_of(&self, name: &str) -> Option<u32> {
        self.booked
            .iter()
            .find(|(_, passenger)| passenger.as_str() == name)
            .map(|(seat, _)| *seat)
    }

    /// 1-indexed position in the waitlist.
    pub fn waitlist_position(&self, name: &str) -> Option<usize> {
        self.waitlist.iter().position(|n| n == name).map(|i| i + 1)
    }

    pub fn lowest_free_seat(&self) -> Option<u32> {
        self.seats.iter().copied().find(|seat| !self.booked.contains_key(seat))
    }

    pub fn passenger_at(&self, seat: u32) -> Option<&str> {
        self.booked.get(&seat).map(String::as_str)
    }

    pub(crate) fn assign(&mut self, seat: u32, name: String) {
        debug_assert!(self.seats.contains(&seat));
        self.booked.insert(seat, name);
    }

    pub(crate) fn release(&mut self, seat: u32) -> Option<String> {
        self.booked.remove(&seat)
    }

    /// Appends to the waitlist and returns the new 1-indexed position.
    pub(crate) fn enqueue(&mut self, name: String) -> usize {
        self.waitlist.push_back(name);
        self.waitlist.len()
    }

    pub(crate) fn dequeue(&mut self) -> Option<String> {
        self.waitlist.pop_front()
    }
}

/// All three classes of one flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlightInventory {
    classes: BTreeMap<SeatClass, ClassInventory>,
}

impl FlightInventory {
    pub fn new(layout: &SeatLayout) -> Self {
        let classes = SeatClass::ALL
            .into_iter()
            .map(|class| (class, ClassInventory::new(layout.range(class))))
            .collect();
        Self { classes }
    }

    /// Starts from an empty flight and overwrites the given classes.
    pub fn with_classes(layout: &SeatLayout, classes: impl IntoIterator<Item = (SeatClass, ClassInventory)>) -> Self {
        let mut flight = Self::new(layout);
        flight.classes.extend(classes);
        flight
    }

    pub fn class(&self, class: SeatClass) -> Option<&ClassInventory> {
        self.classes.get(&class)
    }

    pub(crate) fn class_mut(&mut self, class: SeatClass) -> Option<&mut ClassInventory> {
        self.classes.get_mut(&class)
    }

    /// Classes in fixed first, business, economy order.
    pub fn classes(&self) -> impl Iterator<Item = (SeatClass, &ClassInventory)> {
        self.classes.iter().map(|(class, inventory)| (*class, inventory))
    }
}

/// Root of all mutable reservation state, persisted as one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InventoryState {
    flights: BTreeMap<u32, FlightInventory>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cataloged flight with all seats free and empty waitlists.
    pub fn seeded(catalog: &FlightCatalog, layout: &SeatLayout) -> Self {
        let flights = catalog
            .flight_numbers()
            .map(|number| (number, FlightInventory::new(layout)))
            .collect();
        Self { flights }
    }

    pub fn flight(&self, flight_number: u32) -> Option<&FlightInventory> {
        self.flights.get(&flight_number)
    }

    pub(crate) fn flight_mut(&mut self, flight_number: u32) -> Option<&mut FlightInventory> {
        self.flights.get_mut(&flight_number)
    }

    /// Returns the flight entry, creating it from the layout on first use.
    pub(crate) fn ensure_flight(&mut self, flight_number: u32, layout: &SeatLayout) -> &mut FlightInventory {
        self.flights
            .entry(flight_number)
            .or_insert_with(|| FlightInventory::new(layout))
    }

    pub fn insert_flight(&mut self, flight_number: u32, inventory: FlightInventory) {
        self.flights.insert(flight_number, inventory);
    }

    /// Flights in ascending flight-number order.
    pub fn flights(&self) -> impl Iterator<Item = (u32, &FlightInventory)> {
        self.flights.iter().map(|(number, inventory)| (*number, inventory))
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub seat_number: u32,
    pub class: SeatClass,
    pub passenger: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassView {
    pub seats: Vec<SeatView>,
    pub waitlist: Vec<String>,
}

/// Seat map of a flight as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightInfo {
    pub flight: Flight,
    pub classes: BTreeMap<SeatClass, ClassView>,
}

impl FlightInfo {
    pub fn build(flight: &Flight, inventory: &FlightInventory) -> Self {
        let classes = inventory
            .classes()
            .map(|(class, seats)| {
                let view = ClassView {
                    seats: seats
                        .seats()
                        .iter()
                        .map(|&seat_number| SeatView {
                            seat_number,
                            class,
                            passenger: seats.passenger_at(seat_number).map(str::to_string),
                        })
                        .collect(),
                    waitlist: seats.waitlist().iter().cloned().collect(),
                };
                (class, view)
            })
            .collect();

        Self {
            flight: flight.clone(),
            classes,
        }
    }
}
