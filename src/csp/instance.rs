#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The per-puzzle CSP aggregate.

use crate::csp::assignment::Assignment;
use crate::csp::cell::{Cell, CELL_COUNT};
use crate::csp::domain::DomainStore;
use crate::csp::graph::ConstraintGraph;

/// One puzzle's constraint satisfaction problem: the candidate domains and
/// the constraint graph.
///
/// A `Csp` is constructed once from the raw 81-cell board, consulted and
/// mutated by arc consistency and search, and discarded when the solve
/// returns. It is owned by exactly one solve; nothing in it is shared
/// between concurrent solves.
#[derive(Debug, Clone)]
pub struct Csp {
    /// Mutable per-cell candidate domains and pruning logs.
    pub domains: DomainStore,
    /// Read-only 20-peer adjacency.
    pub graph: ConstraintGraph,
}

impl Csp {
    /// Builds the instance from 81 raw givens in row-major order, `0`
    /// meaning unassigned.
    ///
    /// # Panics
    ///
    /// Panics if a given is out of `0..=9`; callers validate raw input
    /// (e.g. via board parsing) before reaching the engine.
    #[must_use]
    pub fn new(givens: &[u8; CELL_COUNT]) -> Self {
        Self {
            domains: DomainStore::new(givens),
            graph: ConstraintGraph::new(),
        }
    }

    /// The assignment holding exactly the given cells.
    #[must_use]
    pub fn initial_assignment(&self) -> Assignment {
        let mut assignment = Assignment::new();
        for cell in Cell::all() {
            if self.domains.is_given(cell) {
                if let Some(value) = self.domains.domain(cell).single() {
                    assignment.assign(cell, value);
                }
            }
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::domain::Domain;

    #[test]
    fn test_new_instance() {
        let mut givens = [0u8; CELL_COUNT];
        givens[10] = 4;
        let csp = Csp::new(&givens);

        let cell = Cell::from_index(10);
        assert_eq!(csp.domains.domain(cell), Domain::singleton(4));

        let assignment = csp.initial_assignment();
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.get(cell), Some(4));
    }
}
