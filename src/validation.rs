//! Input validation for allocation problems.
//!
//! Checks structural integrity of events and venues before a search or a
//! planner touches them. Detects:
//! - Duplicate events
//! - Duplicate venues
//! - Venues sharing a name (the planner addresses venues by name)
//!
//! All problems are collected rather than stopping at the first one.

use crate::models::{Event, Venue};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The same event appears more than once.
    DuplicateEvent,
    /// The same venue appears more than once.
    DuplicateVenue,
    /// Two different venues share a name.
    DuplicateVenueName,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates allocator input.
///
/// Checks:
/// 1. No event listed twice
/// 2. No venue listed twice (structural equality)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(events: &[Event], venues: &[Venue]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen_events = HashSet::new();
    for event in events {
        if !seen_events.insert(event) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEvent,
                format!("Duplicate event: {event}"),
            ));
        }
    }

    let mut seen_venues = HashSet::new();
    for venue in venues {
        if !seen_venues.insert(venue) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateVenue,
                format!("Duplicate venue: {venue}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a venue pool that will be addressed by venue name.
///
/// Reports structurally equal venues as `DuplicateVenue` and distinct venues
/// with the same name as `DuplicateVenueName`.
pub fn validate_venue_pool(venues: &[Venue]) -> ValidationResult {
    let mut errors = match validate_input(&[], venues) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    let mut seen_names = HashSet::new();
    let mut distinct = HashSet::new();
    for venue in venues {
        if distinct.insert(venue) && !seen_names.insert(venue.name()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateVenueName,
                format!("Venue name '{}' is used by more than one venue", venue.name()),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
