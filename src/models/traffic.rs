//! Corridor traffic model.
//!
//! `Traffic` records how many people are on each corridor. Every corridor not
//! present in the record carries zero traffic. Loads are never negative: an
//! update that would take a corridor below zero is rejected and leaves the
//! record untouched.
//!
//! # Batches
//!
//! [`Traffic::add_traffic`] and [`Traffic::remove_traffic`] apply a whole
//! record at once. Every component update is checked before any is applied,
//! so a failed batch never leaves a partially merged record behind.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::Corridor;
use crate::error::{Error, Result};

/// Mutable per-corridor load accumulator.
///
/// Cloning produces an independent deep copy. Equality compares the loads on
/// every corridor of either record.
///
/// # Example
/// ```
/// use venue_alloc::models::{Corridor, Traffic};
///
/// let c = Corridor::between("Annerly", "City", 10).unwrap();
/// let mut t = Traffic::new();
/// t.update_traffic(&c, 10).unwrap();
/// assert!(t.is_safe());
/// t.update_traffic(&c, 1).unwrap();
/// assert!(!t.is_safe());
/// assert!(t.update_traffic(&c, -12).is_err());
/// assert_eq!(t.get_traffic(&c), 11);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CorridorLoad>", into = "Vec<CorridorLoad>")]
pub struct Traffic {
    // Zero loads are never stored.
    loads: BTreeMap<Corridor, u32>,
}

/// A corridor with the load recorded on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorLoad {
    /// The loaded corridor.
    pub corridor: Corridor,
    /// People on the corridor.
    pub load: u32,
}

impl Traffic {
    /// Creates a record with zero traffic on every corridor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Traffic on `corridor` (zero if never loaded).
    pub fn get_traffic(&self, corridor: &Corridor) -> u32 {
        self.loads.get(corridor).copied().unwrap_or(0)
    }

    /// Adds `amount` (possibly negative) to the traffic on `corridor`.
    ///
    /// # Errors
    /// `InvalidTraffic` if the result would be negative or exceed `u32::MAX`;
    /// the record is unchanged.
    pub fn update_traffic(&mut self, corridor: &Corridor, amount: i64) -> Result<()> {
        let current = self.get_traffic(corridor);
        let updated = Self::checked_load(corridor, current, amount)?;
        self.set_load(corridor.clone(), updated);
        Ok(())
    }

    /// Adds all of `other`'s traffic to this record.
    ///
    /// `other` is not modified and shares no state with `self` afterwards.
    ///
    /// # Errors
    /// `InvalidTraffic` if any corridor would overflow; nothing is applied.
    pub fn add_traffic(&mut self, other: &Traffic) -> Result<()> {
        self.apply_batch(other, 1)
    }

    /// Subtracts all of `other`'s traffic from this record.
    ///
    /// Undoes a previous [`add_traffic`](Self::add_traffic) of the same record.
    ///
    /// # Errors
    /// `InvalidTraffic` if any corridor would go negative; nothing is applied.
    pub fn remove_traffic(&mut self, other: &Traffic) -> Result<()> {
        self.apply_batch(other, -1)
    }

    /// Whether every corridor's load is within its capacity.
    pub fn is_safe(&self) -> bool {
        self.loads
            .iter()
            .all(|(corridor, &load)| load <= corridor.capacity())
    }

    /// Whether the corridors loaded in `touched` are within capacity here.
    ///
    /// Equivalent to [`is_safe`](Self::is_safe) when `self` was safe before
    /// `touched` was added to it.
    pub(crate) fn is_safe_on(&self, touched: &Traffic) -> bool {
        touched
            .loads
            .keys()
            .all(|corridor| self.get_traffic(corridor) <= corridor.capacity())
    }

    /// Corridors whose load exceeds their capacity, in corridor order.
    pub fn overloaded_corridors(&self) -> Vec<&Corridor> {
        self.loads
            .iter()
            .filter(|&(corridor, &load)| load > corridor.capacity())
            .map(|(corridor, _)| corridor)
            .collect()
    }

    /// Corridors with a load greater than zero, in corridor order.
    pub fn corridors_with_traffic(&self) -> Vec<&Corridor> {
        self.loads.keys().collect()
    }

    /// Whether `other` records the same traffic on every corridor.
    ///
    /// Symmetric: a corridor loaded in either record must carry the same load
    /// in both.
    pub fn same_traffic(&self, other: &Traffic) -> bool {
        self == other
    }

    /// Sum of all corridor loads.
    pub fn total_load(&self) -> u64 {
        self.loads.values().map(|&l| u64::from(l)).sum()
    }

    /// Loaded corridors with their loads, in corridor order.
    pub fn iter(&self) -> impl Iterator<Item = (&Corridor, u32)> {
        self.loads.iter().map(|(c, &l)| (c, l))
    }

    /// Whether no corridor carries traffic.
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Overwrites the load on `corridor`. Used by producers of fresh records.
    pub(crate) fn set_load(&mut self, corridor: Corridor, load: u32) {
        if load == 0 {
            self.loads.remove(&corridor);
        } else {
            self.loads.insert(corridor, load);
        }
    }

    fn checked_load(corridor: &Corridor, current: u32, amount: i64) -> Result<u32> {
        i64::from(current)
            .checked_add(amount)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| Error::InvalidTraffic {
                corridor: corridor.clone(),
                current,
                amount,
            })
    }

    fn apply_batch(&mut self, other: &Traffic, sign: i64) -> Result<()> {
        let mut staged = Vec::with_capacity(other.loads.len());
        for (corridor, &load) in &other.loads {
            let current = self.get_traffic(corridor);
            let updated = Self::checked_load(corridor, current, sign * i64::from(load))?;
            staged.push((corridor, updated));
        }
        for (corridor, load) in staged {
            self.set_load(corridor.clone(), load);
        }
        Ok(())
    }
}

impl fmt::Display for Traffic {
    /// One `"CORRIDOR: LOAD"` line per loaded corridor, in corridor order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (corridor, load) in &self.loads {
            writeln!(f, "{corridor}: {load}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<CorridorLoad>> for Traffic {
    type Error = Error;

    fn try_from(entries: Vec<CorridorLoad>) -> Result<Self> {
        let mut traffic = Traffic::new();
        let mut seen = BTreeSet::new();
        for entry in entries {
            if !seen.insert(entry.corridor.clone()) {
                return Err(Error::invalid_argument(format!(
                    "{} listed more than once",
                    entry.corridor
                )));
            }
            traffic.set_load(entry.corridor, entry.load);
        }
        Ok(traffic)
    }
}

impl From<Traffic> for Vec<CorridorLoad> {
    fn from(traffic: Traffic) -> Self {
        traffic
            .loads
            .into_iter()
            .map(|(corridor, load)| CorridorLoad { corridor, load })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(start: &str, end: &str, capacity: u32) -> Corridor {
        Corridor::between(start, end, capacity).unwrap()
    }

    fn traffic(entries: &[(&Corridor, i64)]) -> Traffic {
        let mut t = Traffic::new();
        for (c, amount) in entries {
            t.update_traffic(c, *amount).unwrap();
        }
        t
    }

    #[test]
    fn test_new_traffic_is_zero() {
        let t = Traffic::new();
        assert_eq!(t.get_traffic(&corridor("A", "B", 5)), 0);
        assert!(t.is_safe());
        assert!(t.is_empty());
        assert_eq!(t.to_string(), "");
    }

    #[test]
    fn test_update_traffic_accumulates() {
        let c = corridor("A", "B", 5);
        let mut t = Traffic::new();
        t.update_traffic(&c, 3).unwrap();
        t.update_traffic(&c, 4).unwrap();
        t.update_traffic(&c, -2).unwrap();
        assert_eq!(t.get_traffic(&c), 5);
    }

    #[test]
    fn test_update_traffic_negative_rejected_without_mutation() {
        let c = corridor("A", "B", 5);
        let mut t = traffic(&[(&c, 3)]);
        let err = t.update_traffic(&c, -4).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTraffic {
                corridor: c.clone(),
                current: 3,
                amount: -4
            }
        );
        assert_eq!(t.get_traffic(&c), 3);

        let absent = corridor("B", "A", 5);
        assert!(t.update_traffic(&absent, -1).is_err());
        assert_eq!(t.get_traffic(&absent), 0);
    }

    #[test]
    fn test_update_traffic_overflow_rejected() {
        let c = corridor("A", "B", 5);
        let mut t = traffic(&[(&c, i64::from(u32::MAX))]);
        assert!(t.update_traffic(&c, 1).is_err());
        assert_eq!(t.get_traffic(&c), u32::MAX);
    }

    #[test]
    fn test_is_safe_at_capacity_boundary() {
        let c = corridor("Annerly", "City", 10);
        let mut t = traffic(&[(&c, 10)]);
        assert!(t.is_safe());
        assert!(t.overloaded_corridors().is_empty());

        t.update_traffic(&c, 1).unwrap();
        assert!(!t.is_safe());
        assert_eq!(t.overloaded_corridors(), vec![&c]);
    }

    #[test]
    fn test_add_then_remove_restores() {
        let a = corridor("A", "B", 10);
        let b = corridor("B", "C", 10);
        let mut t = traffic(&[(&a, 2)]);
        let before = t.clone();
        let extra = traffic(&[(&a, 3), (&b, 4)]);

        t.add_traffic(&extra).unwrap();
        assert_eq!(t.get_traffic(&a), 5);
        assert_eq!(t.get_traffic(&b), 4);

        t.remove_traffic(&extra).unwrap();
        assert_eq!(t, before);
        assert_eq!(t.corridors_with_traffic(), vec![&a]);
    }

    #[test]
    fn test_remove_traffic_rejected_as_a_whole() {
        let a = corridor("A", "B", 10);
        let b = corridor("B", "C", 10);
        // `a` can absorb the removal, `b` cannot: nothing may change.
        let mut t = traffic(&[(&a, 5), (&b, 1)]);
        let before = t.clone();
        let too_much = traffic(&[(&a, 3), (&b, 2)]);

        assert!(matches!(
            t.remove_traffic(&too_much),
            Err(Error::InvalidTraffic { .. })
        ));
        assert_eq!(t, before);
    }

    #[test]
    fn test_add_traffic_is_deep_copy() {
        let c = corridor("A", "B", 10);
        let mut t = Traffic::new();
        let mut extra = traffic(&[(&c, 4)]);

        t.add_traffic(&extra).unwrap();
        extra.update_traffic(&c, 5).unwrap();
        assert_eq!(t.get_traffic(&c), 4);

        t.update_traffic(&c, 1).unwrap();
        assert_eq!(extra.get_traffic(&c), 9);
    }

    #[test]
    fn test_clone_is_independent() {
        let c = corridor("A", "B", 10);
        let original = traffic(&[(&c, 4)]);
        let mut copy = original.clone();
        copy.update_traffic(&c, 2).unwrap();
        assert_eq!(original.get_traffic(&c), 4);
        assert_eq!(copy.get_traffic(&c), 6);
    }

    #[test]
    fn test_add_self_copy_doubles() {
        let c = corridor("A", "B", 10);
        let mut t = traffic(&[(&c, 4)]);
        let same = t.clone();
        t.add_traffic(&same).unwrap();
        assert_eq!(t.get_traffic(&c), 8);
    }

    #[test]
    fn test_corridors_with_traffic_ordered_and_positive_only() {
        let a = corridor("Annerly", "City", 20);
        let b = corridor("Annerly", "City", 30);
        let c = corridor("Bardon", "Ascot", 40);
        let t = traffic(&[(&c, 1), (&b, 2), (&a, 3), (&c, -1)]);
        assert_eq!(t.corridors_with_traffic(), vec![&a, &b]);
        assert_eq!(t.total_load(), 5);
    }

    #[test]
    fn test_same_traffic_is_symmetric() {
        let a = corridor("A", "B", 10);
        let b = corridor("B", "C", 10);
        let small = traffic(&[(&a, 1)]);
        let large = traffic(&[(&a, 1), (&b, 2)]);
        assert!(!small.same_traffic(&large));
        assert!(!large.same_traffic(&small));

        let zeroed = traffic(&[(&a, 1), (&b, 2), (&b, -2)]);
        assert!(small.same_traffic(&zeroed));
        assert!(zeroed.same_traffic(&small));
    }

    #[test]
    fn test_display_lines_in_corridor_order() {
        let a = corridor("Annerly", "City", 20);
        let b = corridor("Bardon", "City", 10);
        let t = traffic(&[(&b, 7), (&a, 12)]);
        assert_eq!(
            t.to_string(),
            "Corridor Annerly to City (20): 12\nCorridor Bardon to City (10): 7\n"
        );
    }

    #[test]
    fn test_serialized_as_corridor_load_list() {
        let a = corridor("Annerly", "City", 20);
        let t = traffic(&[(&a, 12)]);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "corridor": { "start": "Annerly", "end": "City", "capacity": 20 }, "load": 12 }
            ])
        );

        let dup = serde_json::json!([
            { "corridor": { "start": "A", "end": "B", "capacity": 2 }, "load": 1 },
            { "corridor": { "start": "A", "end": "B", "capacity": 2 }, "load": 1 }
        ]);
        assert!(serde_json::from_value::<Traffic>(dup).is_err());

        let dup_after_zero = serde_json::json!([
            { "corridor": { "start": "A", "end": "B", "capacity": 2 }, "load": 0 },
            { "corridor": { "start": "A", "end": "B", "capacity": 2 }, "load": 1 }
        ]);
        assert!(serde_json::from_value::<Traffic>(dup_after_zero).is_err());

        let zero_only = serde_json::json!([
            { "corridor": { "start": "A", "end": "B", "capacity": 2 }, "load": 0 }
        ]);
        assert!(serde_json::from_value::<Traffic>(zero_only).unwrap().is_empty());
    }
}
