//! Booking and cancellation state transitions.
//!
//! Both operations mutate an [`InventoryState`] in place. Persisting the
//! result and serializing writers is the caller's job (see
//! [`crate::ReservationService`]).

use aisle_catalog::{SeatClass, SeatLayout};
use serde::Serialize;

use crate::{InventoryState, ReservationError, ReservationResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BookingOutcome {
    #[serde(rename_all = "camelCase")]
    Booked {
        class: SeatClass,
        passenger: String,
        seat_number: u32,
    },
    #[serde(rename_all = "camelCase")]
    Waitlisted {
        class: SeatClass,
        passenger: String,
        position: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOutcome {
    pub class: SeatClass,
    pub cancelled_passenger: String,
    pub freed_seat: u32,
    pub moved_from_waitlist: Option<String>,
}

/// Gives `passenger` the lowest free seat of `class`, or a place at the
/// back of the class waitlist when every seat is taken.
pub fn book(
    state: &mut InventoryState,
    layout: &SeatLayout,
    flight_number: u32,
    class: SeatClass,
    passenger: &str,
) -> ReservationResult<BookingOutcome> {
    let inventory = state
        .ensure_flight(flight_number, layout)
        .class_mut(class)
        .ok_or_else(|| class_not_found(flight_number, class))?;

    if inventory.contains(passenger) {
        return Err(ReservationError::Conflict(format!(
            "Passenger {passenger} already exists in {class} on flight {flight_number}"
        )));
    }

    match inventory.lowest_free_seat() {
        Some(seat_number) => {
            inventory.assign(seat_number, passenger.to_string());
            Ok(BookingOutcome::Booked {
                class,
                passenger: passenger.to_string(),
                seat_number,
            })
        }
        None => {
            let position = inventory.enqueue(passenger.to_string());
            Ok(BookingOutcome::Waitlisted {
                class,
                passenger: passenger.to_string(),
                position,
            })
        }
    }
}

/// Frees the seat held by `passenger` and hands it to the head of the
/// waitlist, if any. Waitlisted passengers cannot be cancelled here.
pub fn cancel(
    state: &mut InventoryState,
    flight_number: u32,
    class: SeatClass,
    passenger: &str,
) -> ReservationResult<CancelOutcome> {
    let inventory = state
        .flight_mut(flight_number)
        .and_then(|flight| flight.class_mut(class))
        .ok_or_else(|| class_not_found(flight_number, class))?;

    let freed_seat = inventory.seat_of(passenger).ok_or_else(|| {
        ReservationError::NotFound(format!(
            "Passenger {passenger} not found in booked list for {class} on flight {flight_number}"
        ))
    })?;

    inventory.release(freed_seat);

    let moved_from_waitlist = inventory.dequeue();
    if let Some(promoted) = &moved_from_waitlist {
        inventory.assign(freed_seat, promoted.clone());
    }

    Ok(CancelOutcome {
        class,
        cancelled_passenger: passenger.to_string(),
        freed_seat,
        moved_from_waitlist,
    })
}

fn class_not_found(flight_number: u32, class: SeatClass) -> ReservationError {
    ReservationError::NotFound(format!("No {class} inventory for flight {flight_number}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layout() -> SeatLayout {
        SeatLayout::default()
    }

    fn assert_invariants(state: &InventoryState) {
        for (_, flight) in state.flights() {
            for (_, class) in flight.classes() {
                assert!(class.booked().keys().all(|seat| class.seats().contains(seat)));
                let mut names: Vec<&String> = class.booked().values().chain(class.waitlist()).collect();
                let total = names.len();
                names.sort();
                names.dedup();
                assert_eq!(names.len(), total, "duplicate passenger in one class");
                if !class.waitlist().is_empty() {
                    assert_eq!(class.booked().len(), class.seats().len(), "waitlist while seats are free");
                }
            }
        }
    }

    #[test]
    fn test_book_assigns_lowest_free_seat() {
        let mut state = InventoryState::new();

        let alice = book(&mut state, &layout(), 101, SeatClass::Economy, "Alice").unwrap();
        let bob = book(&mut state, &layout(), 101, SeatClass::Economy, "Bob").unwrap();
        assert_eq!(
            alice,
            BookingOutcome::Booked { class: SeatClass::Economy, passenger: "Alice".into(), seat_number: 16 }
        );
        assert!(matches!(bob, BookingOutcome::Booked { seat_number: 17, .. }));

        // Freeing 16 makes it the next seat handed out, ahead of 18.
        cancel(&mut state, 101, SeatClass::Economy, "Alice").unwrap();
        let carol = book(&mut state, &layout(), 101, SeatClass::Economy, "Carol").unwrap();
        assert!(matches!(carol, BookingOutcome::Booked { seat_number: 16, .. }));
        assert_invariants(&state);
    }

    #[test]
    fn test_book_lazily_creates_flight() {
        let mut state = InventoryState::new();
        book(&mut state, &layout(), 202, SeatClass::First, "Dana").unwrap();

        let flight = state.flight(202).unwrap();
        assert_eq!(flight.class(SeatClass::First).unwrap().seat_of("Dana"), Some(1));
        assert!(flight.class(SeatClass::Economy).unwrap().booked().is_empty());
    }

    #[test]
    fn test_duplicate_is_scoped_per_class() {
        let mut state = InventoryState::new();
        book(&mut state, &layout(), 101, SeatClass::Economy, "Alice").unwrap();

        let err = book(&mut state, &layout(), 101, SeatClass::Economy, "Alice").unwrap_err();
        assert!(matches!(err, ReservationError::Conflict(_)));

        // Same name in another class or on another flight is allowed.
        book(&mut state, &layout(), 101, SeatClass::Business, "Alice").unwrap();
        book(&mut state, &layout(), 202, SeatClass::Economy, "Alice").unwrap();
        assert_invariants(&state);
    }

    #[test]
    fn test_duplicate_against_waitlist() {
        let mut state = InventoryState::new();
        for i in 0..5 {
            book(&mut state, &layout(), 101, SeatClass::First, &format!("P{i}")).unwrap();
        }
        let waitlisted = book(&mut state, &layout(), 101, SeatClass::First, "Wes").unwrap();
        assert!(matches!(waitlisted, BookingOutcome::Waitlisted { position: 1, .. }));

        let err = book(&mut state, &layout(), 101, SeatClass::First, "Wes").unwrap_err();
        assert!(matches!(err, ReservationError::Conflict(_)));
    }

    #[test]
    fn test_full_class_waitlists_and_promotes_head() {
        let mut state = InventoryState::new();
        for seat in 16..=35 {
            let outcome = book(&mut state, &layout(), 101, SeatClass::Economy, &format!("Pax{seat}")).unwrap();
            assert!(matches!(outcome, BookingOutcome::Booked { seat_number, .. } if seat_number == seat));
        }

        let zed = book(&mut state, &layout(), 101, SeatClass::Economy, "Zed").unwrap();
        assert_eq!(
            zed,
            BookingOutcome::Waitlisted { class: SeatClass::Economy, passenger: "Zed".into(), position: 1 }
        );

        let outcome = cancel(&mut state, 101, SeatClass::Economy, "Pax16").unwrap();
        assert_eq!(outcome.freed_seat, 16);
        assert_eq!(outcome.moved_from_waitlist.as_deref(), Some("Zed"));

        let economy = state.flight(101).unwrap().class(SeatClass::Economy).unwrap();
        assert_eq!(economy.passenger_at(16), Some("Zed"));
        assert!(economy.waitlist().is_empty());
        assert_invariants(&state);
    }

    #[test]
    fn test_promotion_preserves_remaining_order() {
        let mut state = InventoryState::new();
        for i in 1..=5 {
            book(&mut state, &layout(), 202, SeatClass::First, &format!("Seat{i}")).unwrap();
        }
        for name in ["W1", "W2", "W3"] {
            book(&mut state, &layout(), 202, SeatClass::First, name).unwrap();
        }

        let outcome = cancel(&mut state, 202, SeatClass::First, "Seat3").unwrap();
        assert_eq!(outcome.freed_seat, 3);
        assert_eq!(outcome.moved_from_waitlist.as_deref(), Some("W1"));

        let first = state.flight(202).unwrap().class(SeatClass::First).unwrap();
        assert_eq!(first.passenger_at(3), Some("W1"));
        assert_eq!(first.waitlist().iter().collect::<Vec<_>>(), vec!["W2", "W3"]);
        assert_eq!(first.waitlist_position("W3"), Some(2));
    }

    #[test]
    fn test_cancel_sole_occupant_leaves_others_untouched() {
        let mut state = InventoryState::new();
        book(&mut state, &layout(), 101, SeatClass::Business, "Alice").unwrap();
        book(&mut state, &layout(), 101, SeatClass::Economy, "Bob").unwrap();
        book(&mut state, &layout(), 202, SeatClass::Business, "Carol").unwrap();
        let before = state.clone();

        let outcome = cancel(&mut state, 101, SeatClass::Business, "Alice").unwrap();
        assert_eq!(outcome.freed_seat, 6);
        assert_eq!(outcome.moved_from_waitlist, None);

        let flight = state.flight(101).unwrap();
        assert_eq!(flight.class(SeatClass::Business).unwrap().passenger_at(6), None);
        assert_eq!(flight.class(SeatClass::Economy), before.flight(101).unwrap().class(SeatClass::Economy));
        assert_eq!(state.flight(202), before.flight(202));
    }

    #[test]
    fn test_cancel_not_found_cases() {
        let mut state = InventoryState::new();
        let err = cancel(&mut state, 101, SeatClass::Economy, "Alice").unwrap_err();
        assert!(matches!(err, ReservationError::NotFound(_)));

        for i in 0..5 {
            book(&mut state, &layout(), 101, SeatClass::First, &format!("P{i}")).unwrap();
        }
        book(&mut state, &layout(), 101, SeatClass::First, "Wes").unwrap();

        // Waitlisted passengers are not cancellable.
        let err = cancel(&mut state, 101, SeatClass::First, "Wes").unwrap_err();
        assert!(matches!(err, ReservationError::NotFound(_)));

        // Booked in a different class.
        let err = cancel(&mut state, 101, SeatClass::Economy, "P0").unwrap_err();
        assert!(matches!(err, ReservationError::NotFound(_)));
    }

    #[test]
    fn test_outcome_wire_format() {
        let booked = BookingOutcome::Booked { class: SeatClass::Economy, passenger: "Alice".into(), seat_number: 16 };
        assert_eq!(
            serde_json::to_value(&booked).unwrap(),
            json!({ "status": "booked", "class": "economy", "passenger": "Alice", "seatNumber": 16 })
        );

        let cancelled = CancelOutcome {
            class: SeatClass::Economy,
            cancelled_passenger: "Alice".into(),
            freed_seat: 16,
            moved_from_waitlist: None,
        };
        assert_eq!(
            serde_json::to_value(&cancelled).unwrap(),
            json!({ "class": "economy", "cancelledPassenger": "Alice", "freedSeat": 16, "movedFromWaitlist": null })
        );
    }

    // ============================================
    // Property-based allocation tests
    // ============================================

    mod proptest_allocator {
        use std::collections::{BTreeMap, VecDeque};

        use aisle_catalog::SeatRange;
        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Book { flight: u32, class: SeatClass, name: String },
            Cancel { flight: u32, class: SeatClass, name: String },
        }

        /// Plain map-and-queue model of one class.
        #[derive(Debug, Default)]
        struct ModelClass {
            booked: BTreeMap<u32, String>,
            waitlist: VecDeque<String>,
        }

        type Model = BTreeMap<u32, BTreeMap<SeatClass, ModelClass>>;

        fn small_layout() -> SeatLayout {
            SeatLayout::new(SeatRange::new(1, 2), SeatRange::new(3, 4), SeatRange::new(5, 7)).unwrap()
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            let flight = prop_oneof![Just(101u32), Just(202u32)];
            let class = proptest::sample::select(SeatClass::ALL.to_vec());
            let name = (0u8..6).prop_map(|i| format!("P{i}"));
            (any::<bool>(), flight, class, name).prop_map(|(is_book, flight, class, name)| {
                if is_book {
                    Op::Book { flight, class, name }
                } else {
                    Op::Cancel { flight, class, name }
                }
            })
        }

        fn model_book(model: &mut Model, layout: &SeatLayout, flight: u32, class: SeatClass, name: &str) -> Option<BookingOutcome> {
            let m = model
                .entry(flight)
                .or_insert_with(|| SeatClass::ALL.into_iter().map(|c| (c, ModelClass::default())).collect())
                .get_mut(&class)?;
            if m.booked.values().any(|n| n == name) || m.waitlist.iter().any(|n| n == name) {
                return None;
            }
            let passenger = name.to_string();
            match layout.range(class).seats().find(|seat| !m.booked.contains_key(seat)) {
                Some(seat_number) => {
                    m.booked.insert(seat_number, passenger.clone());
                    Some(BookingOutcome::Booked { class, passenger, seat_number })
                }
                None => {
                    m.waitlist.push_back(passenger.clone());
                    Some(BookingOutcome::Waitlisted { class, passenger, position: m.waitlist.len() })
                }
            }
        }

        fn model_cancel(model: &mut Model, flight: u32, class: SeatClass, name: &str) -> Option<CancelOutcome> {
            let m = model.get_mut(&flight)?.get_mut(&class)?;
            let freed_seat = m.booked.iter().find(|(_, n)| n.as_str() == name).map(|(seat, _)| *seat)?;
            m.booked.remove(&freed_seat);
            let moved_from_waitlist = m.waitlist.pop_front();
            if let Some(head) = &moved_from_waitlist {
                m.booked.insert(freed_seat, head.clone());
            }
            Some(CancelOutcome { class, cancelled_passenger: name.to_string(), freed_seat, moved_from_waitlist })
        }

        proptest! {
            /// Any book/cancel sequence keeps the class invariants and matches
            /// the model, including which waitlisted passenger gets promoted.
            #[test]
            fn prop_operations_match_model(ops in proptest::collection::vec(arb_op(), 1..80)) {
                let layout = small_layout();
                let mut state = InventoryState::new();
                let mut model = Model::new();

                for op in ops {
                    match op {
                        Op::Book { flight, class, name } => {
                            let expected = model_book(&mut model, &layout, flight, class, &name);
                            match (book(&mut state, &layout, flight, class, &name), expected) {
                                (Ok(actual), Some(expected)) => { prop_assert_eq!(actual, expected); }
                                (Err(ReservationError::Conflict(_)), None) => {}
                                (actual, expected) => { prop_assert!(false, "book {}: {:?} vs {:?}", name, actual, expected); }
                            }
                        }
                        Op::Cancel { flight, class, name } => {
                            let expected = model_cancel(&mut model, flight, class, &name);
                            match (cancel(&mut state, flight, class, &name), expected) {
                                (Ok(actual), Some(expected)) => { prop_assert_eq!(actual, expected); }
                                (Err(ReservationError::NotFound(_)), None) => {}
                                (actual, expected) => { prop_assert!(false, "cancel {}: {:?} vs {:?}", name, actual, expected); }
                            }
                        }
                    }

                    assert_invariants(&state);
                    prop_assert_eq!(state.flights().count(), model.len());
                    for (flight, classes) in &model {
                        let inventory = state.flight(*flight).unwrap();
                        for (class, m) in classes {
                            let actual = inventory.class(*class).unwrap();
                            prop_assert_eq!(actual.booked(), &m.booked);
                            prop_assert_eq!(actual.waitlist(), &m.waitlist);
                        }
                    }
                }
            }
        }
    }
}
