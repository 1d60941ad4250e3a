//! Backward-chaining proof search with memoization and cycle detection

pub mod engine;
pub mod trace;

#[cfg(test)]
mod proptest_tests;

pub use engine::Solver;
pub use trace::{TraceEvent, TraceEventDisplay};

use crate::kb::KnowledgeBase;
use crate::logic::{Fact, Truth};
use std::collections::BTreeSet;

/// Verdict and reasoning trace for one query
#[derive(Debug, Clone)]
pub struct Answer {
    pub fact: Fact,
    pub verdict: Truth,
    /// Reasoning steps, in the order they happened
    pub events: Vec<TraceEvent>,
    /// Facts on which a dependency loop was broken
    pub cycles: BTreeSet<Fact>,
}

/// Run every query against a fresh solver session, in source order.
///
/// Sessions are independent: memoized verdicts and cached composite
/// conclusions never leak from one query into the next.
pub fn run_queries(kb: &KnowledgeBase, queries: &[Fact]) -> Vec<Answer> {
    queries
        .iter()
        .map(|&fact| {
            let mut solver = Solver::new(kb);
            let verdict = solver.solve(fact);
            Answer {
                fact,
                verdict,
                events: solver.take_events(),
                cycles: solver.take_cycles(),
            }
        })
        .collect()
}
