use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{CatalogError, Flight};

/// Field a flight listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    FlightNumber,
    DepartureDate,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::FlightNumber, SortKey::DepartureDate];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::FlightNumber => "flightNumber",
            SortKey::DepartureDate => "departureDate",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownSortKey(s.to_string()))
    }
}

/// Stable top-down merge sort on an extracted key.
///
/// Equal keys keep their input order: the merge takes from the left half
/// while `left <= right`.
pub fn merge_sort<T, K, F>(items: &[T], key: &F) -> Vec<T>
where
    T: Clone,
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = merge_sort(&items[..mid], key);
    let right = merge_sort(&items[mid..], key);

    merge(left, right, key)
}

fn merge<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut result = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
        let next = if key(a) <= key(b) { left.next() } else { right.next() };
        result.extend(next);
    }
    result.extend(left);
    result.extend(right);
    result
}

pub fn sort_flights(flights: &[Flight], by: SortKey) -> Vec<Flight> {
    match by {
        SortKey::FlightNumber => merge_sort(flights, &|f: &Flight| f.flight_number),
        SortKey::DepartureDate => merge_sort(flights, &|f: &Flight| f.departure_date),
    }
}

/// Closed-interval binary search. `sorted` must be ordered by flight
/// number ascending.
pub fn binary_search(sorted: &[Flight], target: u32) -> Option<&Flight> {
    if sorted.is_empty() {
        return None;
    }

    let mut low = 0usize;
    let mut high = sorted.len() - 1;

    while low <= high {
        let mid = low + (high - low) / 2;
        let value = sorted[mid].flight_number;

        if value == target {
            return Some(&sorted[mid]);
        }
        if value < target {
            low = mid + 1;
        } else {
            high = mid.checked_sub(1)?;
        }
    }
    None
}
