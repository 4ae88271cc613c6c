//! Sparse month-keyed events layered over the escalation trajectory

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One-time repair costs and scripted rent changes, keyed by projection month
///
/// Both setters are last-write-wins: a second entry for the same month replaces the first.
/// The engine takes the overlay by value, so it cannot change once a run starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventOverlay {
    repairs: BTreeMap<u32, f64>,
    rental_overrides: BTreeMap<u32, f64>,
}

impl EventOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (month, value) pairs, later pairs winning
    pub fn from_entries(
        repairs: impl IntoIterator<Item = (u32, f64)>,
        rental_overrides: impl IntoIterator<Item = (u32, f64)>,
    ) -> Self {
        let mut overlay = Self::new();
        for (month, cost) in repairs {
            overlay.add_repair(month, cost);
        }
        for (month, amount) in rental_overrides {
            overlay.set_rental_override(month, amount);
        }
        overlay
    }

    /// Record a one-time repair cost for a month
    pub fn add_repair(&mut self, month: u32, cost: f64) {
        self.repairs.insert(month, cost);
    }

    /// Replace the rent from `month` until the next annual escalation
    pub fn set_rental_override(&mut self, month: u32, amount: f64) {
        self.rental_overrides.insert(month, amount);
    }

    /// Repair cost for a month, 0 when none is scheduled
    pub fn repair_cost(&self, month: u32) -> f64 {
        self.repairs.get(&month).copied().unwrap_or(0.0)
    }

    pub fn rental_override(&self, month: u32) -> Option<f64> {
        self.rental_overrides.get(&month).copied()
    }

    pub fn repairs(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.repairs.iter().map(|(&m, &c)| (m, c))
    }

    pub fn rental_overrides(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.rental_overrides.iter().map(|(&m, &a)| (m, a))
    }

    pub fn is_empty(&self) -> bool {
        self.repairs.is_empty() && self.rental_overrides.is_empty()
    }
}
