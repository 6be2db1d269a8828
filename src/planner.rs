//! Interactive allocation planner.
//!
//! Holds a venue pool, the current allocation and the traffic that
//! allocation generates, and applies one placement or removal at a time.
//! Every venue is either free or hosting exactly one event.
//!
//! Traffic is re-summed from the allocation after every change instead of
//! being patched in place, so it cannot drift from the placements it
//! describes. A presentation layer fetches state explicitly through
//! [`Planner::snapshot`] after each call.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::allocator::{AllocationOutcome, Allocator};
use crate::error::{Error, Result};
use crate::models::{Allocation, Corridor, Event, Traffic, Venue};
use crate::validation::validate_venue_pool;

/// Why a planner operation was refused. The planner is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// No venue in the pool has this name.
    #[error("unknown venue '{0}'")]
    UnknownVenue(String),

    /// The venue already hosts an event.
    #[error("venue {0} is not free")]
    VenueUnavailable(Venue),

    /// The event is already allocated.
    #[error("event {0} is already allocated")]
    EventAlreadyAllocated(Event),

    /// The event is not part of the allocation.
    #[error("event {0} is not allocated")]
    EventNotAllocated(Event),

    /// The event is larger than the venue.
    #[error("venue {venue} cannot host event {event}")]
    CannotHost { event: Event, venue: Venue },

    /// The placement would overload these corridors.
    #[error("allocation is unsafe: {} corridor(s) over capacity", .overloaded.len())]
    UnsafeAllocation { overloaded: Vec<Corridor> },

    #[error(transparent)]
    Core(#[from] Error),
}

/// Immutable copy of the planner state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    /// Current placements.
    pub allocation: Allocation,
    /// Traffic generated by the placements.
    pub traffic: Traffic,
    /// Venues hosting nothing, in pool order.
    pub free_venues: Vec<Venue>,
}

/// Incrementally edited allocation over a fixed venue pool.
///
/// # Example
/// ```
/// use venue_alloc::models::{Corridor, Event, Venue};
/// use venue_alloc::planner::{Planner, PlannerError};
///
/// let road = Corridor::between("Toowong", "City", 10).unwrap();
/// let venues = vec![
///     Venue::new("Hall", 10, vec![(road.clone(), 6)]).unwrap(),
///     Venue::new("Park", 10, vec![(road.clone(), 6)]).unwrap(),
/// ];
/// let mut planner = Planner::new(venues).unwrap();
///
/// planner.allocate(Event::new("Gig", 10).unwrap(), "Hall").unwrap();
/// assert_eq!(planner.traffic().get_traffic(&road), 6);
///
/// let err = planner.allocate(Event::new("Fair", 10).unwrap(), "Park").unwrap_err();
/// assert!(matches!(err, PlannerError::UnsafeAllocation { .. }));
/// assert_eq!(planner.free_venues().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    venues: Vec<Venue>,
    allocation: Allocation,
    traffic: Traffic,
}

impl Planner {
    /// Creates a planner with every venue free.
    ///
    /// # Errors
    /// `InvalidArgument` if a venue is listed twice or two venues share a name.
    pub fn new(venues: Vec<Venue>) -> Result<Self> {
        validate_venue_pool(&venues)?;
        Ok(Self {
            venues,
            allocation: Allocation::new(),
            traffic: Traffic::new(),
        })
    }

    /// Every venue in the pool, in pool order.
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Venue with the given name.
    pub fn venue(&self, name: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.name() == name)
    }

    /// Venues hosting nothing, in pool order.
    pub fn free_venues(&self) -> impl Iterator<Item = &Venue> {
        self.venues
            .iter()
            .filter(|v| !self.allocation.contains_venue(v))
    }

    /// Current placements.
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Traffic generated by the current placements.
    pub fn traffic(&self) -> &Traffic {
        &self.traffic
    }

    /// Places `event` at the free venue named `venue_name`.
    ///
    /// Succeeds only if the venue can host the event and the traffic of the
    /// resulting allocation is safe.
    #[instrument(level = "debug", skip(self, event), fields(event = %event))]
    pub fn allocate(
        &mut self,
        event: Event,
        venue_name: &str,
    ) -> std::result::Result<(), PlannerError> {
        let venue = self
            .venue(venue_name)
            .ok_or_else(|| PlannerError::UnknownVenue(venue_name.to_string()))?
            .clone();
        if self.allocation.contains_event(&event) {
            return Err(PlannerError::EventAlreadyAllocated(event));
        }
        if self.allocation.contains_venue(&venue) {
            return Err(PlannerError::VenueUnavailable(venue));
        }
        if !venue.can_host(&event) {
            return Err(PlannerError::CannotHost { event, venue });
        }

        let mut candidate = self.allocation.clone();
        candidate.insert(event, venue)?;
        let traffic = match candidate.traffic() {
            Ok(traffic) => traffic,
            Err(Error::InvalidTraffic { corridor, .. }) => {
                debug!(corridor = %corridor, "placement rejected: load overflow");
                return Err(PlannerError::UnsafeAllocation {
                    overloaded: vec![corridor],
                });
            }
            Err(err) => return Err(err.into()),
        };
        if !traffic.is_safe() {
            let overloaded: Vec<Corridor> =
                traffic.overloaded_corridors().into_iter().cloned().collect();
            debug!(overloaded = overloaded.len(), "placement rejected as unsafe");
            return Err(PlannerError::UnsafeAllocation { overloaded });
        }

        self.allocation = candidate;
        self.traffic = traffic;
        debug!(placements = self.allocation.len(), "placement accepted");
        Ok(())
    }

    /// Removes `event` and frees its venue, which is returned.
    #[instrument(level = "debug", skip(self, event), fields(event = %event))]
    pub fn deallocate(&mut self, event: &Event) -> std::result::Result<Venue, PlannerError> {
        let mut candidate = self.allocation.clone();
        let venue = candidate
            .remove(event)
            .ok_or_else(|| PlannerError::EventNotAllocated(event.clone()))?;
        let traffic = candidate.traffic()?;

        self.allocation = candidate;
        self.traffic = traffic;
        debug!(venue = %venue, "venue freed");
        Ok(venue)
    }

    /// Places `events` on the free venues with `allocator`, keeping the
    /// current placements and their traffic fixed.
    ///
    /// On success the witness is merged into the allocation. When no safe
    /// placement exists the planner is unchanged and the outcome carries
    /// `None`.
    #[instrument(level = "debug", skip_all, fields(events = events.len()))]
    pub fn allocate_remaining(
        &mut self,
        events: &[Event],
        allocator: &Allocator,
    ) -> std::result::Result<AllocationOutcome, PlannerError> {
        if let Some(placed) = events.iter().find(|e| self.allocation.contains_event(e)) {
            return Err(PlannerError::EventAlreadyAllocated(placed.clone()));
        }

        let free: Vec<Venue> = self.free_venues().cloned().collect();
        let outcome = allocator.solve_with_baseline(events, &free, &self.traffic)?;

        if let Some(found) = &outcome.allocation {
            let mut merged = self.allocation.clone();
            for (event, venue) in found.iter() {
                merged.insert(event.clone(), venue.clone())?;
            }
            self.traffic = merged.traffic()?;
            self.allocation = merged;
            debug!(placements = self.allocation.len(), "remaining events placed");
        }
        Ok(outcome)
    }

    /// Frees every venue.
    pub fn reset(&mut self) {
        self.allocation = Allocation::new();
        self.traffic = Traffic::new();
    }

    /// Copies the current state.
    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            allocation: self.allocation.clone(),
            traffic: self.traffic.clone(),
            free_venues: self.free_venues().cloned().collect(),
        }
    }
}
