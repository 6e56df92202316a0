use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::CatalogError;

/// Travel class. The declaration order is the iteration order used
/// everywhere seats are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatClass {
    First,
    Business,
    Economy,
}

impl SeatClass {
    pub const ALL: [SeatClass; 3] = [SeatClass::First, SeatClass::Business, SeatClass::Economy];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::First => "first",
            SeatClass::Business => "business",
            SeatClass::Economy => "economy",
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeatClass {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeatClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownClass(s.to_string()))
    }
}

/// Inclusive, contiguous block of seat numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRange {
    pub start: u32,
    pub end: u32,
}

impl SeatRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn seats(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn contains(&self, seat: u32) -> bool {
        self.seats().contains(&seat)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    fn overlaps(&self, other: &SeatRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Seat numbering for every class, fixed at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    pub first: SeatRange,
    pub business: SeatRange,
    pub economy: SeatRange,
}

impl SeatLayout {
    pub fn new(first: SeatRange, business: SeatRange, economy: SeatRange) -> Result<Self, CatalogError> {
        let layout = Self { first, business, economy };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        for class in SeatClass::ALL {
            let range = self.range(class);
            if range.is_empty() {
                return Err(CatalogError::EmptyRange { class, start: range.start, end: range.end });
            }
        }
        for (i, a) in SeatClass::ALL.iter().enumerate() {
            for b in &SeatClass::ALL[i + 1..] {
                if self.range(*a).overlaps(&self.range(*b)) {
                    return Err(CatalogError::OverlappingRanges(*a, *b));
                }
            }
        }
        Ok(())
    }

    pub fn range(&self, class: SeatClass) -> SeatRange {
        match class {
            SeatClass::First => self.first,
            SeatClass::Business => self.business,
            SeatClass::Economy => self.economy,
        }
    }

    /// Class whose range holds `seat`, if any.
    pub fn class_of(&self, seat: u32) -> Option<SeatClass> {
        SeatClass::ALL.into_iter().find(|class| self.range(*class).contains(seat))
    }
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self {
            first: SeatRange::new(1, 5),
            business: SeatRange::new(6, 15),
            economy: SeatRange::new(16, 35),
        }
    }
}
