#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides the board model and the board-level solving entry
//! points.

/// The `board` module contains the 81-cell board model, its textual
/// formats and its validity checks.
pub mod board;

/// The `solver` module ties boards to the CSP engine and reads puzzle
/// batch files.
pub mod solver;
