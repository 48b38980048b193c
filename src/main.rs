//! # `csp_solver`
//!
//! `csp_solver` is a command-line Sudoku solver built on a constraint
//! satisfaction engine: AC-3 arc-consistency preprocessing followed by
//! backtracking search with forward checking and a most-constrained-variable
//! selection heuristic.
//!
//! ## Usage
//!
//! ```sh
//! csp_solver [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global argument
//!
//! - `path`: if provided as the *only* argument (without a subcommand), it
//!   is treated as a puzzle batch file to solve, one flat 81-digit line per
//!   puzzle, solutions written to `output.txt`.
//!
//! ### Subcommands
//!
//! 1.  **`puzzle`**: solve a single puzzle given inline.
//!     ```sh
//!     csp_solver puzzle --input "003020600900305001..." [OPTIONS]
//!     ```
//! 2.  **`file`**: solve every line of a puzzle batch file.
//!     ```sh
//!     csp_solver file --path sudokus_start.txt --output output.txt [OPTIONS]
//!     ```
//! 3.  **`dir`**: solve every `.txt` batch file under a directory tree.
//!     ```sh
//!     csp_solver dir --path puzzles/ [OPTIONS]
//!     ```
//! 4.  **`completions`**: generate shell completion scripts.
//!
//! ### Common options
//!
//! - `-d, --debug`: print the parsed board and engine chatter.
//! - `--verify`: re-check the solved board against the rules and the givens
//!   (default: `true`).
//! - `--stats`: print the statistics table after each solve (default:
//!   `true`).
//! - `-p, --print-solution`: print the solved grid.
//! - `--select {mrv|fixed|random}`: variable selection heuristic.
//! - `--order {domain|lcv}`: candidate value ordering.
//!
//! Unsolvable puzzles are reported as `UNSATISFIABLE` and do not abort a
//! batch; the process exits non-zero if any puzzle in the run failed.

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use csp_solver::csp::search::{
    DefaultConfig, FixedOrderConfig, LcvConfig, RandomOrderConfig, SearchStats, SolveError,
    SolverConfig,
};
use csp_solver::csp::selection::{FixedOrder, RandomOrder};
use csp_solver::csp::value_order::LeastConstrainingValue;
use csp_solver::sudoku::board::Board;
use csp_solver::sudoku::solver::{read_batch_file, solve_with_stats};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// readings in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "csp_solver", version, about = "A CSP-based Sudoku solver")]
struct Cli {
    /// An optional path argument. If provided without a subcommand, it's
    /// treated as a puzzle batch file to solve.
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a single puzzle given as a flat 81-digit string, 0 for blank.
    Puzzle {
        /// The puzzle, row-major, e.g. "003020600900305001...".
        #[arg(short, long)]
        input: String,

        /// File the flat solution line is written to.
        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle line of a batch file.
    File {
        /// Path to the batch file, one flat 81-digit puzzle per line.
        #[arg(long)]
        path: PathBuf,

        /// File the flat solution lines are written to.
        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.txt` puzzle batch file under a directory tree.
    Dir {
        /// Root of the directory tree to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output: parsed boards and per-solve detail.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Re-check the solved board against the Sudoku rules and the givens.
    #[arg(long, default_value_t = true)]
    verify: bool,

    /// Print the statistics table after each solve.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// Print the solved grid.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,

    /// Variable selection heuristic.
    #[arg(long, value_enum, default_value = "mrv")]
    select: SelectPolicy,

    /// Candidate value ordering.
    #[arg(long, value_enum, default_value = "domain")]
    order: OrderPolicy,
}

/// Which cell the search branches on next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum SelectPolicy {
    /// Minimum remaining values (most constrained variable).
    #[default]
    Mrv,
    /// First unassigned cell in row-major order.
    Fixed,
    /// Seeded-random unassigned cell.
    Random,
}

/// The order candidate values are tried in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OrderPolicy {
    /// Ascending domain order.
    #[default]
    Domain,
    /// Least-constraining value first.
    Lcv,
}

/// Row-major selection with least-constraining-value ordering.
#[derive(Debug, Clone)]
struct FixedLcvConfig;

impl SolverConfig for FixedLcvConfig {
    type Selector = FixedOrder;
    type Order = LeastConstrainingValue;
}

/// Seeded-random selection with least-constraining-value ordering.
#[derive(Debug, Clone)]
struct RandomLcvConfig;

impl SolverConfig for RandomLcvConfig {
    type Selector = RandomOrder;
    type Order = LeastConstrainingValue;
}

/// Main entry point: parses arguments, dispatches to the command handlers
/// and turns any failed puzzle into a non-zero exit code.
fn main() {
    let cli = Cli::parse();

    // A bare path without a subcommand defaults to batch-file mode.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            let failures = run_file(&path, Path::new("output.txt"), &cli.common);
            finish(failures);
        }
    }

    let failures = match cli.command {
        Some(Commands::Puzzle {
            input,
            output,
            common,
        }) => run_puzzle(&input, &output, &common),

        Some(Commands::File {
            path,
            output,
            common,
        }) => run_file(&path, &output, &common),

        Some(Commands::Dir { path, common }) => run_dir(&path, &common),

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            0
        }

        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    };

    finish(failures);
}

/// Exits with a non-zero code if any puzzle in the run failed.
fn finish(failures: usize) -> ! {
    std::process::exit(i32::from(failures > 0))
}

/// Solves a single inline puzzle and writes the solution line to `output`.
///
/// Returns the number of failures (0 or 1).
fn run_puzzle(input: &str, output: &Path, common: &CommonOptions) -> usize {
    let board = match input.parse::<Board>() {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error reading the sudoku string {input:?}: {e}");
            return 1;
        }
    };

    println!("{board}");

    match solve_and_report(&board, common, input) {
        Some(solved) => {
            write_output(output, &format!("{}\n", solved.to_line()));
            println!("Solution written to: {}", output.display());
            0
        }
        None => 1,
    }
}

/// Solves every puzzle line of the batch file at `path`, writing one flat
/// solution line per solved puzzle to `output`.
///
/// Returns the number of failed lines (parse errors included).
fn run_file(path: &Path, output: &Path, common: &CommonOptions) -> usize {
    let batch = match read_batch_file(path) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Error reading the sudoku file {}: {e}", path.display());
            return 1;
        }
    };

    let total = batch.len();
    let mut failures = 0;
    let mut lines = String::new();

    for (line_no, parsed) in batch {
        let label = format!("{}:{line_no}", path.display());
        match parsed {
            Ok(board) => match solve_and_report(&board, common, &label) {
                Some(solved) => {
                    lines.push_str(&solved.to_line());
                    lines.push('\n');
                }
                None => failures += 1,
            },
            Err(e) => {
                eprintln!("{label}: {e}");
                failures += 1;
            }
        }
    }

    write_output(output, &lines);
    println!(
        "Solved {}/{} puzzles from {}; solutions written to: {}",
        total - failures,
        total,
        path.display(),
        output.display()
    );

    failures
}

/// Solves every `.txt` batch file under `path`, reporting per-file totals.
///
/// Returns the total number of failed puzzles.
fn run_dir(path: &Path, common: &CommonOptions) -> usize {
    let mut failures = 0;
    let mut files = 0;

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        files += 1;
        let output = entry.path().with_extension("out");
        failures += run_file(entry.path(), &output, common);
    }

    println!("Finished {files} batch files under {}", path.display());
    failures
}

/// Solves one board, printing verification, statistics and the solution
/// grid as configured.
///
/// Returns the solved board, or `None` on any failure.
fn solve_and_report(board: &Board, common: &CommonOptions, label: &str) -> Option<Board> {
    if common.debug {
        println!("Solving: {label}");
        println!("{board}");
    }

    // Advance the jemalloc epoch so the readings reflect this solve.
    epoch::advance().unwrap();

    let time = Instant::now();
    let result = dispatch(board, common);
    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    match result {
        Ok((solved, search_stats)) => {
            if common.verify {
                verify_solution(board, &solved);
            }
            if common.stats {
                print_stats(elapsed, &search_stats, allocated_mib, resident_mib);
            }
            if common.print_solution {
                println!("{solved}");
            }
            println!("SOLVED ({label}) in {:.3}s", elapsed.as_secs_f64());
            Some(solved)
        }
        Err(SolveError::Unsatisfiable) => {
            println!("UNSATISFIABLE ({label})");
            None
        }
        Err(e @ SolveError::InvariantViolation(_)) => {
            eprintln!("Engine error on {label}: {e}");
            None
        }
    }
}

/// Runs the solver configuration selected on the command line.
fn dispatch(board: &Board, common: &CommonOptions) -> Result<(Board, SearchStats), SolveError> {
    match (common.select, common.order) {
        (SelectPolicy::Mrv, OrderPolicy::Domain) => solve_with_stats::<DefaultConfig>(board),
        (SelectPolicy::Mrv, OrderPolicy::Lcv) => solve_with_stats::<LcvConfig>(board),
        (SelectPolicy::Fixed, OrderPolicy::Domain) => solve_with_stats::<FixedOrderConfig>(board),
        (SelectPolicy::Fixed, OrderPolicy::Lcv) => solve_with_stats::<FixedLcvConfig>(board),
        (SelectPolicy::Random, OrderPolicy::Domain) => solve_with_stats::<RandomOrderConfig>(board),
        (SelectPolicy::Random, OrderPolicy::Lcv) => solve_with_stats::<RandomLcvConfig>(board),
    }
}

/// Verifies a solved board against the rules and the original givens.
///
/// Prints whether the verification was successful; panics if it failed,
/// since a bad solution is an engine bug, not a puzzle property.
fn verify_solution(puzzle: &Board, solved: &Board) {
    let ok = solved.is_solved() && puzzle.agrees_with_givens(solved);
    println!("Verified: {ok:?}");
    if !ok {
        panic!("Solution failed verification!");
    }
}

/// Writes `contents` to `path`, panicking on I/O failure.
fn write_output(path: &Path, contents: &str) {
    std::fs::write(path, contents)
        .unwrap_or_else(|e| panic!("Unable to write file {}: {e}", path.display()));
}

/// Helper function to print a single statistic line in a formatted table
/// row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {:<28} {:>18}  |", label, value);
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {:<20} {:>12} ({:>9.0}/sec)  |", label, value, rate);
}

/// Prints a summary of search statistics for one solve.
fn print_stats(elapsed: Duration, s: &SearchStats, allocated: f64, resident: f64) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n========================[ Search Statistics ]========================");
    stat_line("AC-3 revisions", s.revisions);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("FC prunes", s.prunes, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
