//! Traffic-safe event allocation.
//!
//! Assigns events to venues so that the people travelling to them never
//! exceed the capacity of any shared corridor. Safety depends on the
//! *aggregate* traffic of all placements, not on each venue alone.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Location`, `Corridor`, `Event`, `Venue`,
//!   `Traffic`, `Allocation`
//! - **`allocator`**: Backtracking search for a safe allocation
//! - **`planner`**: One-placement-at-a-time editing over a venue pool
//! - **`validation`**: Input integrity checks (duplicate events and venues)
//! - **`error`**: Crate error type
//!
//! # Architecture
//!
//! Single-threaded and synchronous. Nothing here blocks or holds external
//! resources; a host that needs responsiveness runs a search on its own
//! worker thread and drops it to cancel. Venue loading and presentation live
//! outside this crate.

pub mod allocator;
pub mod error;
pub mod models;
pub mod planner;
pub mod validation;

pub use error::{Error, Result};
