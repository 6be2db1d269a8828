//! Venue model.
//!
//! A venue has a capacity and the set of corridors its visitors travel
//! through. For each corridor the venue declares a *rate*: the load that
//! corridor carries when the venue hosts an event that fills it. Smaller
//! events scale the load down proportionally.
//!
//! # Traffic Formula
//!
//! For an event of size `s` at a venue of capacity `C`, a corridor with rate
//! `r` carries `ceil(s * r / C)` people. The load is monotonic in `s`, equals
//! `r` when `s == C`, and is zero for an empty event.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Corridor, Event, Traffic};
use crate::error::{Error, Result};

/// An immutable venue.
///
/// Equality and ordering are structural over name, capacity and corridor
/// rates, so a venue can key ordered and hashed containers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "VenueRecord", into = "VenueRecord")]
pub struct Venue {
    name: String,
    capacity: u32,
    rates: BTreeMap<Corridor, u32>,
}

/// Wire shape of a corridor rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorridorRate {
    /// Corridor the venue's visitors use.
    pub corridor: Corridor,
    /// Load on the corridor when the venue is full.
    pub rate: u32,
}

#[derive(Serialize, Deserialize)]
struct VenueRecord {
    name: String,
    capacity: u32,
    corridors: Vec<CorridorRate>,
}

impl Venue {
    /// Creates a venue.
    ///
    /// # Errors
    /// `InvalidArgument` if the name is empty, the capacity is zero, a
    /// corridor is listed twice, or a rate lies outside `1..=capacity`.
    pub fn new(
        name: impl Into<String>,
        capacity: u32,
        rates: impl IntoIterator<Item = (Corridor, u32)>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("venue name must not be empty"));
        }
        if capacity == 0 {
            return Err(Error::invalid_argument(format!(
                "venue '{name}' must have a positive capacity"
            )));
        }

        let mut map = BTreeMap::new();
        for (corridor, rate) in rates {
            if rate == 0 || rate > capacity {
                return Err(Error::invalid_argument(format!(
                    "venue '{name}': rate {rate} on {corridor} must be between 1 and {capacity}"
                )));
            }
            if map.insert(corridor.clone(), rate).is_some() {
                return Err(Error::invalid_argument(format!(
                    "venue '{name}' lists {corridor} more than once"
                )));
            }
        }

        Ok(Self {
            name,
            capacity,
            rates: map,
        })
    }

    /// Venue name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum event size the venue can host.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Corridor rates, ordered by corridor.
    pub fn rates(&self) -> impl Iterator<Item = (&Corridor, u32)> {
        self.rates.iter().map(|(c, &r)| (c, r))
    }

    /// Rate declared for `corridor`, if the venue uses it.
    pub fn rate(&self, corridor: &Corridor) -> Option<u32> {
        self.rates.get(corridor).copied()
    }

    /// Whether the event fits in the venue.
    #[inline]
    pub fn can_host(&self, event: &Event) -> bool {
        event.size() <= self.capacity
    }

    /// Corridor loads generated by hosting `event`.
    ///
    /// Pure: repeated calls return equal traffic. Does not check
    /// [`can_host`](Self::can_host); an oversized event yields loads above
    /// the declared rates.
    pub fn traffic_for(&self, event: &Event) -> Traffic {
        let size = u64::from(event.size());
        let capacity = u64::from(self.capacity);
        let mut traffic = Traffic::new();
        for (corridor, &rate) in &self.rates {
            let load = (size * u64::from(rate)).div_ceil(capacity);
            traffic.set_load(corridor.clone(), u32::try_from(load).unwrap_or(u32::MAX));
        }
        traffic
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.capacity)
    }
}

impl TryFrom<VenueRecord> for Venue {
    type Error = Error;

    fn try_from(record: VenueRecord) -> Result<Self> {
        Self::new(
            record.name,
            record.capacity,
            record.corridors.into_iter().map(|c| (c.corridor, c.rate)),
        )
    }
}

impl From<Venue> for VenueRecord {
    fn from(venue: Venue) -> Self {
        Self {
            name: venue.name,
            capacity: venue.capacity,
            corridors: venue
                .rates
                .into_iter()
                .map(|(corridor, rate)| CorridorRate { corridor, rate })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(start: &str, end: &str, capacity: u32) -> Corridor {
        Corridor::between(start, end, capacity).unwrap()
    }

    fn stadium() -> Venue {
        Venue::new(
            "Stadium",
            100,
            vec![
                (corridor("Annerly", "City", 200), 100),
                (corridor("Bardon", "City", 50), 30),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_can_host() {
        let v = stadium();
        assert!(v.can_host(&Event::new("Full", 100).unwrap()));
        assert!(v.can_host(&Event::new("Small", 1).unwrap()));
        assert!(!v.can_host(&Event::new("Big", 101).unwrap()));
    }

    #[test]
    fn test_traffic_for_scales_and_rounds_up() {
        let v = stadium();
        let a = corridor("Annerly", "City", 200);
        let b = corridor("Bardon", "City", 50);

        let full = v.traffic_for(&Event::new("Full", 100).unwrap());
        assert_eq!(full.get_traffic(&a), 100);
        assert_eq!(full.get_traffic(&b), 30);

        // 10 * 30 / 100 = 3 exactly; 11 * 30 / 100 = 3.3 -> 4
        let ten = v.traffic_for(&Event::new("Ten", 10).unwrap());
        assert_eq!(ten.get_traffic(&b), 3);
        let eleven = v.traffic_for(&Event::new("Eleven", 11).unwrap());
        assert_eq!(eleven.get_traffic(&b), 4);
    }

    #[test]
    fn test_traffic_for_is_pure_and_monotonic() {
        let v = stadium();
        let b = corridor("Bardon", "City", 50);
        let e = Event::new("Gig", 42).unwrap();
        assert_eq!(v.traffic_for(&e), v.traffic_for(&e));

        let mut previous = 0;
        for size in 0..=100 {
            let load = v.traffic_for(&Event::new("E", size).unwrap()).get_traffic(&b);
            assert!(load >= previous);
            previous = load;
        }
    }

    #[test]
    fn test_traffic_for_empty_event() {
        let t = stadium().traffic_for(&Event::new("Nobody", 0).unwrap());
        assert!(t.corridors_with_traffic().is_empty());
    }

    #[test]
    fn test_venue_rejects_malformed() {
        let c = corridor("A", "B", 10);
        assert!(Venue::new("", 10, vec![]).is_err());
        assert!(Venue::new("Hall", 0, vec![]).is_err());
        assert!(Venue::new("Hall", 10, vec![(c.clone(), 0)]).is_err());
        assert!(Venue::new("Hall", 10, vec![(c.clone(), 11)]).is_err());
        assert!(Venue::new("Hall", 10, vec![(c.clone(), 5), (c, 6)]).is_err());
    }

    #[test]
    fn test_venue_display_and_rates() {
        let v = stadium();
        assert_eq!(v.to_string(), "Stadium (100)");
        assert_eq!(v.rate(&corridor("Bardon", "City", 50)), Some(30));
        assert_eq!(v.rate(&corridor("Bardon", "City", 51)), None);
        let names: Vec<String> = v.rates().map(|(c, _)| c.start().to_string()).collect();
        assert_eq!(names, vec!["Annerly", "Bardon"]);
    }

    #[test]
    fn test_venue_serde_roundtrip_keeps_rates() {
        let v = stadium();
        let json = serde_json::to_string(&v).unwrap();
        let back: Venue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
