#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The constraint graph: for every cell, the fixed set of peers that must
//! hold a different value.
//!
//! Peers are the cells sharing a row, a column or a 3x3 box, excluding the
//! cell itself; every cell has exactly 20 of them (8 row + 8 column + 4
//! remaining box cells). The graph is a pure function of the coordinates,
//! built once per puzzle and never mutated afterwards.

use crate::csp::cell::Cell;

/// Number of peers of every cell.
pub const PEER_COUNT: usize = 20;

/// Precomputed peer sets for all 81 cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph {
    peers: Vec<[Cell; PEER_COUNT]>,
}

impl ConstraintGraph {
    /// Builds the peer set of every cell.
    #[must_use]
    pub fn new() -> Self {
        let peers = Cell::all()
            .map(|cell| {
                let mut set = [Cell::default(); PEER_COUNT];
                let mut n = 0;
                for other in Cell::all() {
                    if cell.is_peer_of(other) {
                        set[n] = other;
                        n += 1;
                    }
                }
                debug_assert_eq!(n, PEER_COUNT);
                set
            })
            .collect();

        Self { peers }
    }

    /// The 20 peers of `cell`, in row-major order.
    #[must_use]
    pub fn peers(&self, cell: Cell) -> &[Cell; PEER_COUNT] {
        &self.peers[cell.index()]
    }
}

impl Default for ConstraintGraph {
    fn default() -> Self {
        Self::new()
    }
}
