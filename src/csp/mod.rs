#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The constraint satisfaction engine.
//!
//! One puzzle is one [`instance::Csp`]: 81 cells, a candidate domain per
//! cell and a fixed 20-peer constraint graph. [`ac3`] shrinks domains to
//! arc consistency before [`search`] runs backtracking with forward
//! checking over what remains.

/// Arc-consistency preprocessing (AC-3).
pub mod ac3;

/// The partial assignment built up during search.
pub mod assignment;

/// Cell identifiers.
pub mod cell;

/// Candidate domains and the store that tracks pruning for backtracking.
pub mod domain;

/// Per-cell peer sets derived from row, column and box membership.
pub mod graph;

/// The per-puzzle aggregate of domains and constraint graph.
pub mod instance;

/// The backtracking search engine and its configuration.
pub mod search;

/// Variable selection heuristics.
pub mod selection;

/// Candidate value ordering policies.
pub mod value_order;
