#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variable selection heuristics.
//!
//! The search asks a [`VariableSelection`] for the next cell to branch on.
//! [`MinimumRemainingValues`] is the default; the fixed and seeded-random
//! orders exist as baselines for comparison.

use crate::csp::assignment::Assignment;
use crate::csp::cell::Cell;
use crate::csp::domain::DomainStore;

/// Picks the next unassigned cell to branch on.
///
/// `pick` returns `None` only when no unassigned cell remains; callers
/// that reach that state with an incomplete assignment have a bookkeeping
/// bug, not an unsolvable puzzle.
pub trait VariableSelection {
    /// Creates the selector.
    fn new() -> Self;

    /// Returns an unassigned cell, or `None` if all cells are assigned.
    ///
    /// Must be deterministic within a single run so that a search is
    /// reproducible for a given pruning order.
    fn pick(&mut self, assignment: &Assignment, domains: &DomainStore) -> Option<Cell>;
}

/// Most-constrained-variable: the unassigned cell with the fewest
/// remaining candidates, ties broken toward the lowest cell index.
///
/// Branching on the tightest domain first prunes the search tree
/// exponentially faster on average than a fixed order; it does not change
/// which solutions exist, only how fast they are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinimumRemainingValues;

impl VariableSelection for MinimumRemainingValues {
    fn new() -> Self {
        Self
    }

    fn pick(&mut self, assignment: &Assignment, domains: &DomainStore) -> Option<Cell> {
        Cell::all()
            .filter(|&cell| assignment[cell].is_unassigned())
            .min_by_key(|&cell| (domains.domain(cell).len(), cell.index()))
    }
}

/// First unassigned cell in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn new() -> Self {
        Self
    }

    fn pick(&mut self, assignment: &Assignment, _: &DomainStore) -> Option<Cell> {
        Cell::all().find(|&cell| assignment[cell].is_unassigned())
    }
}

/// Seed for [`RandomOrder`]; fixed so a run is reproducible end to end.
const RANDOM_ORDER_SEED: u64 = 0x5EED_CE11;

/// A uniformly random unassigned cell, drawn from a seeded generator.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    rng: fastrand::Rng,
}

impl VariableSelection for RandomOrder {
    fn new() -> Self {
        Self {
            rng: fastrand::Rng::with_seed(RANDOM_ORDER_SEED),
        }
    }

    fn pick(&mut self, assignment: &Assignment, _: &DomainStore) -> Option<Cell> {
        let unassigned: Vec<Cell> = Cell::all()
            .filter(|&cell| assignment[cell].is_unassigned())
            .collect();
        if unassigned.is_empty() {
            return None;
        }
        Some(unassigned[self.rng.usize(..unassigned.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::cell::CELL_COUNT;
    use crate::csp::instance::Csp;

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        let csp = Csp::new(&[0u8; CELL_COUNT]);
        let mut domains = csp.domains;
        let assignment = Assignment::new();

        let tight = Cell::new(6, 3);
        for value in 1..=7 {
            domains.shrink(tight, value); // leaves {8, 9}
        }

        let mut mrv = MinimumRemainingValues::new();
        assert_eq!(mrv.pick(&assignment, &domains), Some(tight));
    }

    #[test]
    fn test_mrv_tie_break_is_lowest_index() {
        let csp = Csp::new(&[0u8; CELL_COUNT]);
        let mut mrv = MinimumRemainingValues::new();
        let assignment = Assignment::new();

        // All domains full: ties broken toward A1.
        assert_eq!(mrv.pick(&assignment, &csp.domains), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_pick_none_when_complete() {
        let csp = Csp::new(&[0u8; CELL_COUNT]);
        let assignment = Assignment::from_givens(&[1u8; CELL_COUNT]);

        let mut mrv = MinimumRemainingValues::new();
        assert_eq!(mrv.pick(&assignment, &csp.domains), None);
        let mut fixed = FixedOrder::new();
        assert_eq!(fixed.pick(&assignment, &csp.domains), None);
        let mut random = RandomOrder::new();
        assert_eq!(random.pick(&assignment, &csp.domains), None);
    }

    #[test]
    fn test_fixed_order_skips_assigned() {
        let csp = Csp::new(&[0u8; CELL_COUNT]);
        let mut assignment = Assignment::new();
        assignment.assign(Cell::new(0, 0), 1);
        assignment.assign(Cell::new(0, 1), 2);

        let mut fixed = FixedOrder::new();
        assert_eq!(fixed.pick(&assignment, &csp.domains), Some(Cell::new(0, 2)));
    }
}
