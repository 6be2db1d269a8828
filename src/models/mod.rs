//! Allocation domain models.
//!
//! Provides the value types of the allocation problem and the traffic
//! accumulator that judges whether an allocation is safe.
//!
//! # Domain Mappings
//!
//! | venue-alloc | Festival | Conference | Sports |
//! |-------------|----------|------------|--------|
//! | Event | Performance | Session | Match |
//! | Venue | Stage | Room | Ground |
//! | Corridor | Footpath | Hallway | Access road |
//! | Traffic | Crowd flow | Foot traffic | Spectator flow |

mod allocation;
mod corridor;
mod event;
mod location;
mod traffic;
mod venue;

pub use allocation::{Allocation, Placement};
pub use corridor::Corridor;
pub use event::Event;
pub use location::Location;
pub use traffic::{CorridorLoad, Traffic};
pub use venue::{CorridorRate, Venue};
