//! Command-line interface for the orienteering decomposition engine.
//!
//! `orienteer solve` reads an instance file, solves it with the bundled
//! exhaustive backend and writes the record back with its `Solution`
//! attached. `orienteer audit` re-checks stored solutions and prints a CSV
//! summary.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod audit;
mod error;
mod files;
mod solve;

use audit::{AuditArgs, run_audit};
pub use error::CliError;
use solve::{SolveArgs, run_solve};

const ARG_SOLVE_INSTANCE: &str = "instance";
const ARG_SOLVE_OUTPUT: &str = "output";
const ARG_SOLVE_STRATEGY: &str = "strategy";
const ARG_SOLVE_SUBPROBLEM: &str = "subproblem";
const ARG_SOLVE_CUTS: &str = "cuts";
const ARG_SOLVE_Y_BOUNDS: &str = "y-bounds";
const ARG_SOLVE_INTEGER_SEC: &str = "integer-sec";
const ARG_SOLVE_TIME_LIMIT: &str = "time-limit";
const ENV_SOLVE_INSTANCE: &str = "ORIENTEER_CMDS_SOLVE_INSTANCE";
const ARG_AUDIT_PATHS: &str = "paths";

/// Run the orienteer CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, when
/// an instance cannot be read, solved or written, or when the audit report
/// cannot be produced.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
        Command::Audit(args) => run_audit(&args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "orienteer",
    about = "Exact orienteering solver driven by decomposition and cut generation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve an instance file and attach the solution to it.
    Solve(SolveArgs),
    /// Check stored solutions and print a CSV summary.
    Audit(AuditArgs),
}

#[cfg(test)]
mod tests;
