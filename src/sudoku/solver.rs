#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Board-level solving entry points and puzzle batch files.
//!
//! A puzzle batch file holds one flat 81-digit line per puzzle. Lines
//! shorter than nine characters are skipped as separators or junk; every
//! other line must parse as a board.

use crate::csp::instance::Csp;
use crate::csp::search::{Backtracking, DefaultConfig, SearchStats, SolveError, Solver, SolverConfig};
use crate::sudoku::board::{Board, ParseBoardError};
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;

/// Solves `board` with the default configuration (MRV selection, ascending
/// value order).
///
/// # Errors
///
/// See [`solve_with`].
pub fn solve(board: &Board) -> Result<Board, SolveError> {
    solve_with::<DefaultConfig>(board)
}

/// Solves `board` with the configured heuristics.
///
/// # Errors
///
/// [`SolveError::Unsatisfiable`] if the puzzle has no solution;
/// [`SolveError::InvariantViolation`] on an engine bug. Never returns a
/// partially-filled board.
pub fn solve_with<Config: SolverConfig>(board: &Board) -> Result<Board, SolveError> {
    solve_with_stats::<Config>(board).map(|(solved, _)| solved)
}

/// Solves `board` and reports the search counters alongside the solution.
///
/// # Errors
///
/// See [`solve_with`].
pub fn solve_with_stats<Config: SolverConfig>(
    board: &Board,
) -> Result<(Board, SearchStats), SolveError> {
    let mut solver = Backtracking::<Config>::new(Csp::new(board.cells()));
    let solution = solver.solve()?;
    let solved = Board::from_cells(solution)
        .map_err(|_| SolveError::InvariantViolation("engine produced an out-of-range value"))?;
    Ok((solved, solver.stats()))
}

/// One line of a batch file: its 1-based line number and its parse result.
pub type BatchLine = (usize, Result<Board, ParseBoardError>);

/// Reads puzzle lines from a batch source.
///
/// Lines shorter than nine characters are skipped; the rest are parsed,
/// parse failures included in the output so callers can report them
/// without aborting the batch.
///
/// # Panics
///
/// Panics if reading a line fails; use [`read_batch_file`] for fallible
/// file access.
pub fn read_batch<R: BufRead>(reader: R) -> Vec<BatchLine> {
    reader
        .lines()
        .map(|line| line.unwrap_or_else(|e| panic!("failed to read line: {e}")))
        .enumerate()
        .filter(|(_, line)| line.trim().len() >= 9)
        .map(|(i, line)| (i + 1, line.trim().parse()))
        .collect_vec()
}

/// Reads a puzzle batch file from `path`.
///
/// # Errors
///
/// Returns `io::Result::Err` if the file cannot be opened or read.
pub fn read_batch_file(path: &Path) -> io::Result<Vec<BatchLine>> {
    let file = std::fs::File::open(path)?;
    Ok(read_batch(io::BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::board::EXAMPLE_EASY;
    use std::io::Cursor;

    const EASY_SOLVED: &str =
        "483921657967345821251876493548132976729564138136798245372689514814253769695417382";

    #[test]
    fn test_solve_easy_board() {
        let board: Board = EXAMPLE_EASY.parse().unwrap();
        let solved = solve(&board).unwrap();
        assert_eq!(solved.to_line(), EASY_SOLVED);
        assert!(solved.is_solved());
        assert!(board.agrees_with_givens(&solved));
    }

    #[test]
    fn test_solve_reports_stats() {
        let board: Board = EXAMPLE_EASY.parse().unwrap();
        let (solved, stats) = solve_with_stats::<DefaultConfig>(&board).unwrap();
        assert!(solved.is_solved());
        assert!(stats.revisions > 0);
    }

    #[test]
    fn test_solve_rejects_contradictory_board() {
        let mut cells = *EXAMPLE_EASY.parse::<Board>().unwrap().cells();
        cells[0] = 3; // duplicates the 3 at A3
        let board = Board::from_cells(cells).unwrap();
        assert_eq!(solve(&board), Err(SolveError::Unsatisfiable));
    }

    #[test]
    fn test_read_batch_skips_short_lines() {
        let text = format!("\n--\n{EXAMPLE_EASY}\n\n{EASY_SOLVED}\n");
        let batch = read_batch(Cursor::new(text));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].0, 3);
        assert!(batch[0].1.is_ok());
        assert_eq!(batch[1].0, 5);
    }

    #[test]
    fn test_read_batch_keeps_parse_errors() {
        let bad = "not-a-puzzle-but-long-enough";
        let text = format!("{EXAMPLE_EASY}\n{bad}\n");
        let batch = read_batch(Cursor::new(text));
        assert_eq!(batch.len(), 2);
        assert!(batch[0].1.is_ok());
        assert!(batch[1].1.is_err());
    }
}
