//! Event model.
//!
//! An event is a named gathering with a head-count. Venues host events.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// An immutable event: name plus size (number of attendees).
///
/// Ordered by name, then size. Allocations list events in this order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    name: String,
    size: u32,
}

#[derive(Serialize, Deserialize)]
struct EventRecord {
    name: String,
    size: u32,
}

impl Event {
    /// Creates an event. Fails if `name` is empty.
    pub fn new(name: impl Into<String>, size: u32) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("event name must not be empty"));
        }
        Ok(Self { name, size })
    }

    /// Event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of attendees.
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.size)
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = Error;

    fn try_from(record: EventRecord) -> Result<Self> {
        Self::new(record.name, record.size)
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        Self {
            name: event.name,
            size: event.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let e = Event::new("Concert", 120).unwrap();
        assert_eq!(e.name(), "Concert");
        assert_eq!(e.size(), 120);
        assert_eq!(e.to_string(), "Concert (120)");
    }

    #[test]
    fn test_event_order_name_then_size() {
        let mut events = vec![
            Event::new("Market", 10).unwrap(),
            Event::new("Concert", 50).unwrap(),
            Event::new("Concert", 20).unwrap(),
        ];
        events.sort();
        let labels: Vec<String> = events.iter().map(|e| e.to_string()).collect();
        assert_eq!(labels, vec!["Concert (20)", "Concert (50)", "Market (10)"]);
    }

    #[test]
    fn test_event_zero_size_allowed() {
        assert_eq!(Event::new("Walk-in", 0).unwrap().size(), 0);
    }

    #[test]
    fn test_event_empty_name_rejected() {
        assert!(Event::new("", 5).is_err());
        assert!(serde_json::from_str::<Event>(r#"{"name":"","size":5}"#).is_err());
    }
}
