//! Allocation (solution) model.
//!
//! An allocation maps events to the venues hosting them, one to one: no event
//! appears twice and no venue hosts two events. It is the output of the
//! allocator and the working state of the planner.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Event, Traffic, Venue};
use crate::error::{Error, Result};

/// A one-to-one mapping from events to venues, ordered by event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Placement>", into = "Vec<Placement>")]
pub struct Allocation {
    placements: BTreeMap<Event, Venue>,
    // Mirrors the values of `placements`.
    used: BTreeSet<Venue>,
}

/// One event hosted by one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The hosted event.
    pub event: Event,
    /// The hosting venue.
    pub venue: Venue,
}

impl Allocation {
    /// Creates an empty allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `event` at `venue`.
    ///
    /// Does not check [`Venue::can_host`] or traffic safety; callers decide
    /// which placements are acceptable.
    ///
    /// # Errors
    /// `InvalidArgument` if the event is already placed or the venue is
    /// already in use.
    pub fn insert(&mut self, event: Event, venue: Venue) -> Result<()> {
        if self.placements.contains_key(&event) {
            return Err(Error::invalid_argument(format!(
                "event {event} is already allocated"
            )));
        }
        if self.used.contains(&venue) {
            return Err(Error::invalid_argument(format!(
                "venue {venue} already hosts an event"
            )));
        }
        self.used.insert(venue.clone());
        self.placements.insert(event, venue);
        Ok(())
    }

    /// Removes `event`, returning the venue that hosted it.
    pub fn remove(&mut self, event: &Event) -> Option<Venue> {
        let venue = self.placements.remove(event)?;
        self.used.remove(&venue);
        Some(venue)
    }

    /// Venue hosting `event`.
    pub fn venue_for(&self, event: &Event) -> Option<&Venue> {
        self.placements.get(event)
    }

    /// Event hosted at `venue`.
    pub fn event_at(&self, venue: &Venue) -> Option<&Event> {
        if !self.used.contains(venue) {
            return None;
        }
        self.placements
            .iter()
            .find(|(_, v)| *v == venue)
            .map(|(e, _)| e)
    }

    /// Whether `venue` hosts an event.
    pub fn contains_venue(&self, venue: &Venue) -> bool {
        self.used.contains(venue)
    }

    /// Whether `event` is placed.
    pub fn contains_event(&self, event: &Event) -> bool {
        self.placements.contains_key(event)
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements in event order.
    pub fn iter(&self) -> impl Iterator<Item = (&Event, &Venue)> {
        self.placements.iter()
    }

    /// Aggregate traffic of every placement, summed from scratch.
    ///
    /// # Errors
    /// `InvalidTraffic` only if a corridor's total overflows.
    pub fn traffic(&self) -> Result<Traffic> {
        let mut total = Traffic::new();
        for (event, venue) in &self.placements {
            total.add_traffic(&venue.traffic_for(event))?;
        }
        Ok(total)
    }

    /// Whether the aggregate traffic is within every corridor's capacity.
    pub fn is_safe(&self) -> bool {
        self.traffic().map(|t| t.is_safe()).unwrap_or(false)
    }
}

impl TryFrom<Vec<Placement>> for Allocation {
    type Error = Error;

    fn try_from(placements: Vec<Placement>) -> Result<Self> {
        let mut allocation = Allocation::new();
        for p in placements {
            allocation.insert(p.event, p.venue)?;
        }
        Ok(allocation)
    }
}

impl From<Allocation> for Vec<Placement> {
    fn from(allocation: Allocation) -> Self {
        allocation
            .placements
            .into_iter()
            .map(|(event, venue)| Placement { event, venue })
            .collect()
    }
}
