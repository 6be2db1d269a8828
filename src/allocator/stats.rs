//! Search statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Counters collected while the allocator searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Search nodes visited (partial assignments, root included).
    pub nodes_explored: u64,
    /// Nodes left after trying every venue choice.
    pub backtracks: u64,
    /// Event-to-venue choices tried.
    pub decisions_generated: u64,
    /// Deepest level reached (number of events placed).
    pub max_depth: u64,
    /// Venues skipped because they are too small for the event.
    pub prunings_capacity: u64,
    /// Choices cut because the aggregate traffic became unsafe.
    pub prunings_traffic: u64,
    /// Candidates or whole problems ruled out before branching.
    pub prunings_infeasible: u64,
    /// Complete safe allocations found.
    pub solutions_found: u64,
    /// Whether the configured node limit stopped the search.
    pub limit_reached: bool,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl SearchStats {
    #[inline]
    pub(crate) fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_decision_generated(&mut self) {
        self.decisions_generated = self.decisions_generated.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub(crate) fn on_pruning_capacity(&mut self) {
        self.prunings_capacity = self.prunings_capacity.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_traffic(&mut self) {
        self.prunings_traffic = self.prunings_traffic.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Allocator Search Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:            {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:   {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (capacity):   {}", self.prunings_capacity)?;
        writeln!(f, "  Prunings (traffic):    {}", self.prunings_traffic)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Node limit reached:    {}", self.limit_reached)?;
        writeln!(f, "  Total time:            {:.2?}", self.elapsed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut s = SearchStats::default();
        s.on_node_explored();
        s.on_node_explored();
        s.on_depth_update(3);
        s.on_depth_update(1);
        s.on_pruning_traffic();
        s.on_pruning_capacity();
        assert_eq!(s.nodes_explored, 2);
        assert_eq!(s.prunings_capacity, 1);
        assert!(s.to_string().contains("Prunings (capacity):   1"));
        assert_eq!(s.max_depth, 3);
        assert_eq!(s.prunings_traffic, 1);
        assert!(s.to_string().contains("Nodes explored:        2"));
    }
}
