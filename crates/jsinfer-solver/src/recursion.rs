//! In-progress tracking for lazy symbol computation and evaluation.
//!
//! Symbol resolution and evaluation each own one guard keyed by symbol.
//! Entering a symbol that is already in progress is a cycle, which callers
//! turn into "no information" for the cyclic part. A guard may also carry a
//! budget on the total number of entries, used to stop evaluation of huge
//! reference graphs; it never limits how long an acyclic chain may be.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Outcome of [`RecursionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    /// The key is already in progress.
    Cycle,
    BudgetExhausted,
}

#[derive(Debug)]
pub struct RecursionGuard<K> {
    in_progress: FxHashSet<K>,
    entries: u32,
    budget: Option<u32>,
}

impl<K: Hash + Eq + Copy> Default for RecursionGuard<K> {
    fn default() -> Self {
        RecursionGuard::new()
    }
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    /// A guard that only detects cycles.
    pub fn new() -> Self {
        RecursionGuard {
            in_progress: FxHashSet::default(),
            entries: 0,
            budget: None,
        }
    }

    /// A guard that also refuses entry once `budget` entries were attempted.
    pub fn with_budget(budget: u32) -> Self {
        RecursionGuard {
            budget: Some(budget),
            ..RecursionGuard::new()
        }
    }

    /// Mark `key` as in progress. After [`RecursionResult::Entered`] the
    /// caller must [`leave`](Self::leave) the same key.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.entries = self.entries.saturating_add(1);
        if self.in_progress.contains(&key) {
            return RecursionResult::Cycle;
        }
        if self.budget.is_some_and(|budget| self.entries > budget) {
            return RecursionResult::BudgetExhausted;
        }
        self.in_progress.insert(key);
        RecursionResult::Entered
    }

    pub fn leave(&mut self, key: K) {
        let was_in_progress = self.in_progress.remove(&key);
        debug_assert!(was_in_progress, "left a key that was never entered");
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod recursion_tests;
