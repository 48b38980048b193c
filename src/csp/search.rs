#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking search engine.
//!
//! This module provides the [`Backtracking`] struct, which extends a
//! partial assignment to a complete, constraint-satisfying one or proves
//! that none exists. The solver is generic over a [`SolverConfig`],
//! allowing the variable selection heuristic and the candidate value
//! ordering to be plugged in; [`DefaultConfig`] covers the common case
//! (minimum-remaining-values selection, ascending value order).
//!
//! The core logic of one search step:
//! 1.  **Completeness check:** if all 81 cells are assigned, the current
//!     assignment is the solution.
//! 2.  **Selection:** an unassigned cell is chosen by the configured
//!     heuristic.
//! 3.  **Trial:** each candidate value still in the cell's domain is tried
//!     in turn. A trial tentatively assigns the value and forward-checks
//!     it: the value is removed from every unassigned peer's domain, each
//!     removal logged against the tried cell. A peer left without
//!     candidates kills the trial before any recursion.
//! 4.  **Backtracking:** a failed trial is undone exactly (the assignment
//!     is retracted and every logged removal is restored) before the next
//!     candidate is tried. A cell whose candidates are all exhausted
//!     propagates failure to the frame above.
//!
//! Exhaustion is the expected outcome of most trials and is a normal
//! return value, not an error path. Recursion depth is bounded by the 81
//! cells, one frame per tentative assignment.

use crate::csp::ac3;
use crate::csp::assignment::{Assignment, Solution};
use crate::csp::cell::Cell;
use crate::csp::instance::Csp;
use crate::csp::selection::{FixedOrder, MinimumRemainingValues, RandomOrder, VariableSelection};
use crate::csp::value_order::{DomainOrder, LeastConstrainingValue, ValueOrdering};
use std::error::Error;
use std::fmt::{self, Debug, Display};

/// The pluggable pieces of a [`Backtracking`] solver.
pub trait SolverConfig {
    /// The variable selection heuristic.
    type Selector: VariableSelection + Debug + Clone;
    /// The candidate value ordering.
    type Order: ValueOrdering + Debug + Clone;
}

/// Minimum-remaining-values selection with ascending value order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type Selector = MinimumRemainingValues;
    type Order = DomainOrder;
}

/// Minimum-remaining-values selection with least-constraining-value order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LcvConfig;

impl SolverConfig for LcvConfig {
    type Selector = MinimumRemainingValues;
    type Order = LeastConstrainingValue;
}

/// Row-major selection with ascending value order, as a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrderConfig;

impl SolverConfig for FixedOrderConfig {
    type Selector = FixedOrder;
    type Order = DomainOrder;
}

/// Seeded-random selection with ascending value order, as a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomOrderConfig;

impl SolverConfig for RandomOrderConfig {
    type Selector = RandomOrder;
    type Order = DomainOrder;
}

/// Why a solve returned no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The puzzle admits no solution: a contradiction surfaced during
    /// preprocessing, or the search exhausted every branch. A
    /// deterministic property of the input, never worth retrying.
    Unsatisfiable,
    /// Internal bookkeeping broke an invariant. Always a bug in the
    /// engine, never a property of the puzzle.
    InvariantViolation(&'static str),
}

impl Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsatisfiable => write!(f, "puzzle is unsatisfiable"),
            Self::InvariantViolation(what) => write!(f, "invariant violated: {what}"),
        }
    }
}

impl Error for SolveError {}

/// Counters describing one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Domain removals performed by arc-consistency preprocessing.
    pub revisions: usize,
    /// Tentative assignments made by the search.
    pub decisions: usize,
    /// Domain removals performed by forward checking.
    pub prunes: usize,
    /// Trials undone after failure.
    pub backtracks: usize,
}

/// A solver for one CSP instance.
pub trait Solver<Config: SolverConfig> {
    /// Creates a solver owning `csp`, seeded with its given cells.
    fn new(csp: Csp) -> Self;

    /// Runs preprocessing and search to completion.
    ///
    /// # Errors
    ///
    /// [`SolveError::Unsatisfiable`] if the puzzle has no solution;
    /// [`SolveError::InvariantViolation`] on an internal bookkeeping bug.
    fn solve(&mut self) -> Result<Solution, SolveError>;

    /// Counters describing the solve so far.
    fn stats(&self) -> SearchStats;
}

/// Recursive backtracking search with forward checking.
#[derive(Debug, Clone)]
pub struct Backtracking<Config: SolverConfig = DefaultConfig> {
    csp: Csp,
    assignment: Assignment,
    selector: Config::Selector,
    order: Config::Order,
    stats: SearchStats,
}

impl<Config: SolverConfig> Solver<Config> for Backtracking<Config> {
    fn new(csp: Csp) -> Self {
        let assignment = csp.initial_assignment();
        Self {
            csp,
            assignment,
            selector: Config::Selector::new(),
            order: Config::Order::new(),
            stats: SearchStats::default(),
        }
    }

    /// Attempts to solve the instance.
    ///
    /// Arc consistency runs once up front; the recursive search then
    /// extends the assignment until it is complete or every branch is
    /// exhausted. On failure every trial has been undone, so the instance
    /// is left in a well-defined state.
    fn solve(&mut self) -> Result<Solution, SolveError> {
        match ac3::enforce(&mut self.csp) {
            Ok(revisions) => self.stats.revisions = revisions,
            Err(_) => return Err(SolveError::Unsatisfiable),
        }

        match self.search()? {
            Some(solution) => Ok(solution),
            None => Err(SolveError::Unsatisfiable),
        }
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl<Config: SolverConfig> Backtracking<Config> {
    /// One frame of the search. `Ok(None)` signals exhaustion: no value of
    /// the selected cell extends the current assignment.
    fn search(&mut self) -> Result<Option<Solution>, SolveError> {
        if let Some(solution) = self.assignment.complete_values() {
            return Ok(Some(solution));
        }

        let Some(cell) = self.selector.pick(&self.assignment, &self.csp.domains) else {
            return Err(SolveError::InvariantViolation(
                "no unassigned cell left in an incomplete assignment",
            ));
        };

        // The candidate snapshot is owned, so pruning during a trial
        // cannot disturb the iteration.
        for value in self.order.order(cell, &self.csp) {
            if !self.consistent(cell, value) {
                continue;
            }

            self.assignment.assign(cell, value);
            self.stats.decisions += 1;

            if self.forward_check(cell, value) {
                if let Some(solution) = self.search()? {
                    return Ok(Some(solution));
                }
            }

            self.assignment.unassign(cell);
            self.csp.domains.restore(cell);
            self.stats.backtracks += 1;
        }

        Ok(None)
    }

    /// Whether `value` clashes with an already-assigned peer of `cell`.
    fn consistent(&self, cell: Cell, value: u8) -> bool {
        self.csp
            .graph
            .peers(cell)
            .iter()
            .all(|&peer| self.assignment.get(peer) != Some(value))
    }

    /// Removes `value` from every unassigned peer's domain, logging each
    /// removal against `cell`. Returns `false` if a peer would be left
    /// without candidates; removals made up to that point stay logged and
    /// are taken back by the caller's undo.
    fn forward_check(&mut self, cell: Cell, value: u8) -> bool {
        let peers = *self.csp.graph.peers(cell);
        for peer in peers {
            if self.assignment[peer].is_assigned() {
                continue;
            }
            let domain = self.csp.domains.domain(peer);
            if !domain.contains(value) {
                continue;
            }
            if domain.is_singleton() {
                return false;
            }
            self.csp.domains.prune(peer, value, cell);
            self.stats.prunes += 1;
        }
        true
    }
}
