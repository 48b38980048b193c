#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Candidate value ordering policies.
//!
//! The search iterates a cell's candidates in the order a [`ValueOrdering`]
//! returns them. The order never affects which solutions exist, only how
//! quickly one is found. [`DomainOrder`] is the default;
//! [`LeastConstrainingValue`] is an optional policy that tries the values
//! that leave peers the most options first.

use crate::csp::cell::Cell;
use crate::csp::instance::Csp;
use smallvec::SmallVec;

/// A snapshot of a cell's candidates in trial order.
///
/// Owned by the caller, so domain mutation during a trial cannot corrupt
/// the iteration.
pub type Candidates = SmallVec<[u8; 9]>;

/// Orders the candidate values of a cell for trial.
pub trait ValueOrdering {
    /// Creates the ordering policy.
    fn new() -> Self;

    /// The candidates of `cell` in the order they should be tried.
    fn order(&self, cell: Cell, csp: &Csp) -> Candidates;
}

/// Ascending domain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomainOrder;

impl ValueOrdering for DomainOrder {
    fn new() -> Self {
        Self
    }

    fn order(&self, cell: Cell, csp: &Csp) -> Candidates {
        csp.domains.domain(cell).iter().collect()
    }
}

/// Least-constraining-value order: candidates sorted ascending by how many
/// peer domains still contain them, so the values that rule out the fewest
/// options elsewhere are tried first.
///
/// The sort is stable; ties keep ascending value order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeastConstrainingValue;

impl ValueOrdering for LeastConstrainingValue {
    fn new() -> Self {
        Self
    }

    fn order(&self, cell: Cell, csp: &Csp) -> Candidates {
        let mut candidates: Candidates = csp.domains.domain(cell).iter().collect();
        candidates.sort_by_key(|&value| {
            csp.graph
                .peers(cell)
                .iter()
                .filter(|&&peer| csp.domains.domain(peer).contains(value))
                .count()
        });
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::cell::CELL_COUNT;

    #[test]
    fn test_domain_order_is_ascending() {
        let csp = Csp::new(&[0u8; CELL_COUNT]);
        let order = DomainOrder::new();
        let candidates = order.order(Cell::new(0, 0), &csp);
        assert_eq!(candidates.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_lcv_ties_keep_ascending_order() {
        // On an untouched board every value appears in all 20 peer
        // domains, so LCV has nothing to distinguish and falls back to
        // ascending order.
        let csp = Csp::new(&[0u8; CELL_COUNT]);
        let order = LeastConstrainingValue::new();
        let candidates = order.order(Cell::new(4, 4), &csp);
        assert_eq!(candidates.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_lcv_prefers_less_frequent_values() {
        let mut csp = Csp::new(&[0u8; CELL_COUNT]);
        let cell = Cell::new(0, 0);

        // Remove 7 from most of A1's peers: 7 now constrains almost
        // nobody and should be tried first.
        let peers = *csp.graph.peers(cell);
        for &peer in peers.iter().take(18) {
            csp.domains.shrink(peer, 7);
        }

        let order = LeastConstrainingValue::new();
        let candidates = order.order(cell, &csp);
        assert_eq!(candidates[0], 7);
        assert_eq!(candidates.len(), 9);
    }
}
