//! Traffic corridor model.
//!
//! A corridor is a directed connector from one location to another with a
//! maximum capacity: the number of people who can use it at the same time.
//!
//! # Ordering
//!
//! Corridors order by start location, then end location, then capacity:
//!
//! ```text
//! Corridor Annerly to City (20)
//! Corridor Annerly to City (30)
//! Corridor Bardon to Ascot (40)
//! Corridor Bardon to City (10)
//! Corridor City to Bardon (10)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Location;
use crate::error::{Error, Result};

/// An immutable directed corridor between two distinct locations.
///
/// Equality, hashing and ordering are structural over (start, end, capacity);
/// the derive order of the fields is the ordering contract.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "CorridorRecord", into = "CorridorRecord")]
pub struct Corridor {
    start: Location,
    end: Location,
    capacity: u32,
}

/// Unchecked wire shape, validated on deserialization.
#[derive(Serialize, Deserialize)]
struct CorridorRecord {
    start: Location,
    end: Location,
    capacity: u32,
}

impl Corridor {
    /// Creates a corridor.
    ///
    /// # Errors
    /// `InvalidArgument` if `start == end` or `capacity == 0`.
    pub fn new(start: Location, end: Location, capacity: u32) -> Result<Self> {
        if start == end {
            return Err(Error::invalid_argument(format!(
                "corridor start and end are both '{start}'"
            )));
        }
        if capacity == 0 {
            return Err(Error::invalid_argument(format!(
                "corridor {start} to {end} must have a positive capacity"
            )));
        }
        Ok(Self {
            start,
            end,
            capacity,
        })
    }

    /// Convenience constructor from location names.
    pub fn between(start: &str, end: &str, capacity: u32) -> Result<Self> {
        Self::new(Location::new(start)?, Location::new(end)?, capacity)
    }

    /// Start location.
    pub fn start(&self) -> &Location {
        &self.start
    }

    /// End location.
    pub fn end(&self) -> &Location {
        &self.end
    }

    /// Maximum number of people on the corridor at once.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Corridor {} to {} ({})",
            self.start, self.end, self.capacity
        )
    }
}

impl TryFrom<CorridorRecord> for Corridor {
    type Error = Error;

    fn try_from(record: CorridorRecord) -> Result<Self> {
        Self::new(record.start, record.end, record.capacity)
    }
}

impl From<Corridor> for CorridorRecord {
    fn from(corridor: Corridor) -> Self {
        Self {
            start: corridor.start,
            end: corridor.end,
            capacity: corridor.capacity,
        }
    }
}
