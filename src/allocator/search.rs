//! Backtracking allocator.
//!
//! # Algorithm
//!
//! 1. Reject malformed input (duplicate events or venues).
//! 2. For each event, list the venues that can host it whose own traffic is
//!    safe, computing that traffic once.
//! 3. Give up before branching if there are more events than venues or some
//!    event has no usable venue.
//! 4. Depth-first over events in the configured order. At each level try
//!    every unused candidate venue, merge its traffic into the running
//!    aggregate, and cut the branch as soon as a corridor it touches goes
//!    over capacity. Undo the merge on the way back up.
//! 5. Stop at the first complete assignment.
//!
//! Loads only grow as events are placed, so a partial assignment with unsafe
//! traffic cannot be completed safely and pruning it loses no solution.
//!
//! # Complexity
//! Exponential in the worst case (bipartite matching with a shared capacity
//! side constraint). Intended for tens of events and venues.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, instrument, trace};

use super::{AllocationOutcome, AllocatorConfig, EventOrder, SearchStats};
use crate::error::Result;
use crate::models::{Allocation, Event, Traffic, Venue};
use crate::validation::validate_input;

/// Finds a traffic-safe allocation of events to venues.
///
/// # Example
///
/// ```
/// use venue_alloc::allocator::Allocator;
/// use venue_alloc::models::{Corridor, Event, Venue};
///
/// let road = Corridor::between("Toowong", "City", 10).unwrap();
/// let hall = Venue::new("Hall", 10, vec![(road.clone(), 6)]).unwrap();
/// let park = Venue::new("Park", 10, vec![(road, 6)]).unwrap();
/// let gig = Event::new("Gig", 10).unwrap();
/// let fair = Event::new("Fair", 10).unwrap();
///
/// let allocator = Allocator::new();
///
/// // Either event alone fits.
/// let one = allocator.allocate(&[gig.clone()], &[hall.clone(), park.clone()]).unwrap();
/// assert!(one.is_some());
///
/// // Together they put 12 people on a corridor that holds 10.
/// let both = allocator.allocate(&[gig, fair], &[hall, park]).unwrap();
/// assert!(both.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Creates an allocator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator with the given configuration.
    pub fn with_config(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Returns a safe allocation of every event, or `None` if none exists.
    ///
    /// # Errors
    /// `InvalidArgument` if `events` or `venues` contain duplicates. An
    /// infeasible problem is `Ok(None)`, never an error.
    pub fn allocate(&self, events: &[Event], venues: &[Venue]) -> Result<Option<Allocation>> {
        Ok(self.solve(events, venues)?.allocation)
    }

    /// Like [`allocate`](Self::allocate), also returning search statistics.
    pub fn solve(&self, events: &[Event], venues: &[Venue]) -> Result<AllocationOutcome> {
        self.solve_with_baseline(events, venues, &Traffic::new())
    }

    /// Solves with `baseline` traffic already on the corridors.
    ///
    /// The returned allocation covers only `events`; its traffic plus
    /// `baseline` is safe. An unsafe baseline makes every problem infeasible.
    #[instrument(level = "debug", skip_all, fields(events = events.len(), venues = venues.len()))]
    pub fn solve_with_baseline(
        &self,
        events: &[Event],
        venues: &[Venue],
        baseline: &Traffic,
    ) -> Result<AllocationOutcome> {
        validate_input(events, venues)?;

        let started = Instant::now();
        let mut stats = SearchStats::default();
        let allocation = match Search::prepare(&self.config, events, venues, baseline, &mut stats) {
            Some(mut search) => {
                let found = search.descend(0)?;
                let allocation = if found {
                    Some(search.build_allocation()?)
                } else {
                    None
                };
                stats = search.stats;
                allocation
            }
            None => None,
        };
        stats.elapsed = started.elapsed();

        debug!(
            feasible = allocation.is_some(),
            nodes = stats.nodes_explored,
            backtracks = stats.backtracks,
            prunings = stats.prunings_traffic,
            limit_reached = stats.limit_reached,
            "allocation search finished"
        );
        Ok(AllocationOutcome { allocation, stats })
    }
}

/// A usable venue for one event, with the traffic hosting it would cause.
struct Candidate {
    venue: usize,
    traffic: Traffic,
}

struct Search<'a> {
    /// Events in branching order.
    events: Vec<&'a Event>,
    venues: &'a [Venue],
    /// `candidates[d]` belongs to `events[d]`.
    candidates: Vec<Vec<Candidate>>,
    used: Vec<bool>,
    chosen: Vec<usize>,
    aggregate: Traffic,
    node_limit: Option<u64>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    /// Builds the search tree root, or returns `None` if the problem is
    /// infeasible without branching.
    fn prepare(
        config: &AllocatorConfig,
        events: &'a [Event],
        venues: &'a [Venue],
        baseline: &Traffic,
        stats: &mut SearchStats,
    ) -> Option<Self> {
        if !baseline.is_safe() {
            debug!("baseline traffic is already unsafe");
            stats.on_pruning_infeasible();
            return None;
        }
        if events.len() > venues.len() {
            debug!("more events than venues");
            stats.on_pruning_infeasible();
            return None;
        }

        let mut rows: Vec<(&Event, Vec<Candidate>)> = Vec::with_capacity(events.len());
        for event in events {
            let mut candidates = Vec::new();
            for (index, venue) in venues.iter().enumerate() {
                if !venue.can_host(event) {
                    stats.on_pruning_capacity();
                    continue;
                }
                let traffic = venue.traffic_for(event);
                let mut alone = baseline.clone();
                if alone.add_traffic(&traffic).is_err() || !alone.is_safe_on(&traffic) {
                    stats.on_pruning_infeasible();
                    continue;
                }
                candidates.push(Candidate {
                    venue: index,
                    traffic,
                });
            }
            if candidates.is_empty() {
                debug!(event = %event, "no venue can host event safely");
                stats.on_pruning_infeasible();
                return None;
            }
            rows.push((event, candidates));
        }

        order_rows(&mut rows, config.event_order);
        let (events, candidates): (Vec<&Event>, Vec<Vec<Candidate>>) = rows.into_iter().unzip();

        Some(Self {
            events,
            venues,
            candidates,
            used: vec![false; venues.len()],
            chosen: Vec::with_capacity(venues.len()),
            aggregate: baseline.clone(),
            node_limit: config.node_limit,
            stats: std::mem::take(stats),
        })
    }

    /// Returns `true` once every event from `depth` on is placed.
    fn descend(&mut self, depth: usize) -> Result<bool> {
        if self
            .node_limit
            .is_some_and(|limit| self.stats.nodes_explored >= limit)
        {
            self.stats.limit_reached = true;
            return Ok(false);
        }
        self.stats.on_node_explored();
        self.stats.on_depth_update(depth as u64);

        if depth == self.events.len() {
            self.stats.on_solution_found();
            return Ok(true);
        }

        for k in 0..self.candidates[depth].len() {
            let venue = self.candidates[depth][k].venue;
            if self.used[venue] {
                continue;
            }
            self.stats.on_decision_generated();

            let traffic = &self.candidates[depth][k].traffic;
            // A load past u32::MAX is past every capacity.
            if self.aggregate.add_traffic(traffic).is_err() {
                trace!(depth, event = %self.events[depth], "pruned: corridor load overflow");
                self.stats.on_pruning_traffic();
                continue;
            }
            if !self.aggregate.is_safe_on(traffic) {
                trace!(
                    depth,
                    event = %self.events[depth],
                    venue = %self.venues[venue],
                    "pruned: corridor over capacity"
                );
                self.stats.on_pruning_traffic();
                self.aggregate.remove_traffic(traffic)?;
                continue;
            }

            self.used[venue] = true;
            self.chosen.push(venue);
            if self.descend(depth + 1)? {
                return Ok(true);
            }
            self.chosen.pop();
            self.used[venue] = false;
            self.aggregate
                .remove_traffic(&self.candidates[depth][k].traffic)?;

            if self.stats.limit_reached {
                return Ok(false);
            }
        }

        self.stats.on_backtrack();
        Ok(false)
    }

    fn build_allocation(&self) -> Result<Allocation> {
        let mut allocation = Allocation::new();
        for (event, &venue) in self.events.iter().zip(&self.chosen) {
            allocation.insert((*event).clone(), self.venues[venue].clone())?;
        }
        Ok(allocation)
    }
}

fn order_rows(rows: &mut [(&Event, Vec<Candidate>)], order: EventOrder) {
    match order {
        EventOrder::AsGiven => {}
        EventOrder::LargestFirst => {
            rows.sort_by(|a, b| b.0.size().cmp(&a.0.size()));
        }
        EventOrder::FewestCandidates => {
            rows.sort_by(|a, b| {
                a.1.len()
                    .cmp(&b.1.len())
                    .then_with(|| b.0.size().cmp(&a.0.size()))
            });
        }
        EventOrder::Shuffled { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            rows.shuffle(&mut rng);
            for (_, candidates) in rows.iter_mut() {
                candidates.shuffle(&mut rng);
            }
        }
    }
}
