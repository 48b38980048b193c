#![deny(missing_docs)]
//! This crate solves 9x9 Sudoku puzzles by modeling them as constraint
//! satisfaction problems: 81 variables with candidate domains over 1..=9,
//! all-different constraints along rows, columns and boxes, AC-3
//! preprocessing and backtracking search with forward checking.

/// The `csp` module implements the constraint satisfaction engine: domains,
/// the constraint graph, arc consistency and the backtracking search.
pub mod csp;

/// The `sudoku` module implements the board model and the board-level entry
/// points that feed puzzles into the CSP engine.
pub mod sudoku;
