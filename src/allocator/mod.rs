//! Traffic-safe allocation search.
//!
//! Assigns every event to a distinct venue able to host it such that the
//! traffic of all placements together stays within every corridor's
//! capacity. Safety is a property of the *merged* traffic, so it cannot be
//! decided venue by venue; the search maintains the aggregate incrementally
//! and prunes as soon as it goes over capacity.
//!
//! # Outcomes
//!
//! - `Ok(Some(allocation))`: a safe witness (which one is unspecified)
//! - `Ok(None)`: no safe allocation exists
//! - `Err(Error::InvalidArgument)`: duplicate events or venues
//!
//! # Usage
//!
//! ```
//! use venue_alloc::allocator::{Allocator, AllocatorConfig, EventOrder};
//! use venue_alloc::models::{Corridor, Event, Venue};
//!
//! let road = Corridor::between("Annerly", "City", 20).unwrap();
//! let venues = vec![Venue::new("Hall", 100, vec![(road, 20)]).unwrap()];
//! let events = vec![Event::new("Gig", 80).unwrap()];
//!
//! let allocator = Allocator::with_config(
//!     AllocatorConfig::new().with_event_order(EventOrder::LargestFirst),
//! );
//! let outcome = allocator.solve(&events, &venues).unwrap();
//! assert!(outcome.is_feasible());
//! println!("{}", outcome.stats);
//! ```

mod config;
mod search;
mod stats;

pub use config::{AllocatorConfig, EventOrder};
pub use search::Allocator;
pub use stats::SearchStats;

use serde::{Deserialize, Serialize};

use crate::models::Allocation;

/// Result of a search: the witness, if any, and how it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// A safe allocation, or `None` if none was found.
    pub allocation: Option<Allocation>,
    /// Search counters.
    pub stats: SearchStats,
}

impl AllocationOutcome {
    /// Whether a safe allocation was found.
    pub fn is_feasible(&self) -> bool {
        self.allocation.is_some()
    }

    /// Whether the node limit cut the search short, so `None` does not prove
    /// infeasibility.
    pub fn is_inconclusive(&self) -> bool {
        self.allocation.is_none() && self.stats.limit_reached
    }
}
