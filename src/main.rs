//! # ndoku
//!
//! `ndoku` solves sudoku generalised to any number of dimensions. A board
//! has `dims` axes, each `width = root * root` cells long; every 2-D slice
//! of the board carries a full set of sudoku constraints (rows, columns and
//! `root`-sized blocks), and the solver fills a board by exhaustive
//! backtracking until every constraint holds or the search space is proven
//! empty.
//!
//! ## Usage
//!
//! ```sh
//! ndoku [OPTIONS]
//! ```
//!
//! -   `-d, --dims <N>`: number of dimensions, minimum 2 (default: `2`).
//! -   `-r, --root <N>`: square root of the board width, minimum 1
//!     (default: `3`, i.e. a classic 9-wide board).
//! -   `-o, --ordering <distance|random>`: how the solver walks the cells
//!     (default: `distance`, the deterministic corner-outward order).
//! -   `--seed <N>`: seed for the random ordering, for reproducible runs.
//! -   `--debug`: verbose progress output.
//! -   `--stats`: print the statistics table after the run (default: `true`).
//! -   `-p, --print-board`: print every sheet of the solved board
//!     (default: `true`).
//!
//! ## Example invocations
//!
//! ```sh
//! # A classic 9x9 board
//! ndoku
//!
//! # A 4x4x4 cube, random visitation order, reproducible
//! ndoku --dims 3 --root 2 --ordering random --seed 7
//!
//! # Generate shell completions
//! ndoku completions bash
//! ```

use crate::grid::board::Board;
use crate::grid::geometry::Geometry;
use crate::grid::ordering::{self, Strategy};
use crate::grid::solver::{Outcome, SearchStats, Solver};
use crate::grid::topology::Topology;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

mod grid;
mod render;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for ndoku.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "ndoku", version, about = "An n-dimensional sudoku solver")]
struct Cli {
    /// Specifies the subcommand to execute. Without one, a solve is run
    /// with the flattened options below.
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Options for the default solve run.
    #[command(flatten)]
    solve: SolveOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options controlling a solve run.
#[derive(Args, Debug)]
struct SolveOptions {
    /// Number of dimensions of the board. Minimum 2.
    #[arg(short, long, default_value_t = 2)]
    dims: usize,

    /// Square root of the board width; the board is root^2 cells wide and
    /// blocks are root cells on a side. Minimum 1.
    #[arg(short, long, default_value_t = 3)]
    root: usize,

    /// The order in which the solver visits cells.
    #[arg(short, long, value_enum, default_value_t = OrderingArg::Distance)]
    ordering: OrderingArg,

    /// Seed for the random ordering. Ignored by the distance ordering.
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose progress output.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Print the statistics table after the run.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// Print every sheet of the solved board.
    #[arg(short, long, default_value_t = true)]
    print_board: bool,
}

/// CLI spelling of [`Strategy`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OrderingArg {
    /// Deterministic corner-outward order.
    #[default]
    Distance,
    /// Uniformly random permutation.
    Random,
}

impl std::fmt::Display for OrderingArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Distance => "distance",
            Self::Random => "random",
        })
    }
}

impl From<OrderingArg> for Strategy {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::Distance => Self::Distance,
            OrderingArg::Random => Self::Random,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let opts = cli.solve;
    if let Err(message) = validate(&opts) {
        eprintln!("{message}");
        std::process::exit(1);
    }

    run(&opts);
}

/// The solver core assumes valid parameters, so they are checked once here
/// at the boundary.
fn validate(opts: &SolveOptions) -> Result<(), String> {
    if opts.dims < 2 {
        return Err(format!("--dims must be at least 2, got {}", opts.dims));
    }
    if opts.root < 1 {
        return Err(format!("--root must be at least 1, got {}", opts.root));
    }
    Ok(())
}

fn run(opts: &SolveOptions) {
    let geom = Geometry::new(opts.dims, opts.root);
    println!(
        "Solving a {}-dimensional board, {} cells wide ({} cells in total).",
        geom.dims,
        geom.width,
        geom.cell_count()
    );

    let time = std::time::Instant::now();
    let topo = Topology::build(&geom);
    let build_time = time.elapsed();

    if opts.debug {
        println!("Sheets: {}", topo.sheets.len());
        println!("Build time: {build_time:?}");
    }

    let time = std::time::Instant::now();
    let order = ordering::solve_order(&geom, opts.ordering.into(), opts.seed);
    let order_time = time.elapsed();

    if opts.debug {
        println!("Ordering: {} ({} cells)", opts.ordering, order.len());
        println!("Ordering time: {order_time:?}");
    }

    let mut board = Board::new(&geom);

    epoch::advance().unwrap();
    let time = std::time::Instant::now();
    let (outcome, search_stats) = {
        let mut solver = Solver::new(geom, &topo, &mut board);
        let outcome = solver.solve(&order);
        (outcome, solver.stats())
    };
    let solve_time = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if opts.stats {
        print_stats(
            &geom,
            &topo,
            &board,
            &search_stats,
            build_time,
            order_time,
            solve_time,
            allocated_mib,
            resident_mib,
        );
    }

    match outcome {
        Outcome::Solved(_) => {
            println!("\nSOLVED");
            if opts.print_board {
                for sheet in &topo.sheets {
                    println!();
                    print!("{}", render::sheet_to_string(&geom, sheet, &board));
                }
            }
        }
        Outcome::Exhausted => {
            println!("\nNo solution found.");
        }
    }
}

/// Helper function to print a single statistic line in a formatted table row.
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

/// Prints a summary of board and search statistics.
#[allow(clippy::too_many_arguments)]
fn print_stats(
    geom: &Geometry,
    topo: &Topology,
    board: &Board,
    s: &SearchStats,
    build_time: Duration,
    order_time: Duration,
    solve_time: Duration,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = solve_time.as_secs_f64();
    let lines: usize = topo.sheets.iter().map(|sheet| sheet.lines.len()).sum();
    let blocks: usize = topo.sheets.iter().map(|sheet| sheet.blocks.len()).sum();

    println!("\n========================[ Board Statistics ]=========================");
    stat_line("Dimensions", geom.dims);
    stat_line("Width", geom.width);
    stat_line("Cells", geom.cell_count());
    stat_line("Sheets", topo.sheets.len());
    stat_line("Lines", lines);
    stat_line("Blocks", blocks);
    stat_line("Topology time (s)", format!("{:.3}", build_time.as_secs_f64()));
    stat_line("Ordering time (s)", format!("{:.3}", order_time.as_secs_f64()));

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Peer sets built", board.peer_sets_built());
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("Solve time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
