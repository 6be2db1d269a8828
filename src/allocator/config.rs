//! Allocator configuration.

use serde::{Deserialize, Serialize};

/// Order in which the search assigns events.
///
/// Every order explores the same space; the order only changes how fast a
/// witness is found and which witness comes back when several exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrder {
    /// Events in input order.
    AsGiven,
    /// Largest events first.
    LargestFirst,
    /// Events with the fewest usable venues first, larger events breaking
    /// ties. Dead ends surface near the root of the tree.
    #[default]
    FewestCandidates,
    /// Seeded random order for events and for each event's venue choices.
    Shuffled {
        /// RNG seed; equal seeds give equal runs.
        seed: u64,
    },
}

/// Search configuration.
///
/// # Example
/// ```
/// use venue_alloc::allocator::{AllocatorConfig, EventOrder};
///
/// let config = AllocatorConfig::new()
///     .with_event_order(EventOrder::LargestFirst)
///     .with_node_limit(10_000);
/// assert_eq!(config.node_limit, Some(10_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Branching order over events.
    pub event_order: EventOrder,
    /// Maximum number of search nodes to explore. `None` = exhaustive.
    pub node_limit: Option<u64>,
}

impl AllocatorConfig {
    /// Creates the default configuration: fewest-candidates order, no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event order.
    pub fn with_event_order(mut self, order: EventOrder) -> Self {
        self.event_order = order;
        self
    }

    /// Caps the number of explored nodes.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = AllocatorConfig::default();
        assert_eq!(c.event_order, EventOrder::FewestCandidates);
        assert_eq!(c.node_limit, None);
    }

    #[test]
    fn test_config_from_partial_json() {
        let c: AllocatorConfig =
            serde_json::from_str(r#"{"event_order":{"shuffled":{"seed":7}}}"#).unwrap();
        assert_eq!(c.event_order, EventOrder::Shuffled { seed: 7 });
        assert_eq!(c.node_limit, None);

        let c: AllocatorConfig = serde_json::from_str(r#"{"node_limit":50}"#).unwrap();
        assert_eq!(c.event_order, EventOrder::FewestCandidates);
        assert_eq!(c.node_limit, Some(50));
    }
}
