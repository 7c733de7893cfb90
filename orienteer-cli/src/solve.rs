//! Solve command implementation for the orienteer CLI.

use std::num::NonZeroUsize;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use orienteer_core::mip::MipBackend;
use orienteer_core::{SolveFailure, SystemInfo};
use orienteer_mip_exhaustive::ExhaustiveBackend;
use orienteer_solver::{CutFamily, DecompositionConfig, DecompositionSolver, SolveReport};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::files::{load_instance, require_existing, write_instance};
use crate::{
    ARG_SOLVE_CUTS, ARG_SOLVE_INSTANCE, ARG_SOLVE_INTEGER_SEC, ARG_SOLVE_OUTPUT,
    ARG_SOLVE_STRATEGY, ARG_SOLVE_SUBPROBLEM, ARG_SOLVE_TIME_LIMIT, ARG_SOLVE_Y_BOUNDS, CliError,
    ENV_SOLVE_INSTANCE,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve an orienteering instance stored as JSON. The solution \
                 is attached to the instance record and written back to the \
                 input file unless an output path is given. Options can come \
                 from CLI flags, configuration files, or environment variables.",
    about = "Solve an orienteering instance"
)]
#[ortho_config(prefix = "ORIENTEER")]
pub(crate) struct SolveArgs {
    /// Path to the JSON instance file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) instance: Option<Utf8PathBuf>,
    /// Where to write the solved instance; defaults to the input file.
    #[arg(long = ARG_SOLVE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Control strategy: BCH or LBBD.
    #[arg(long = ARG_SOLVE_STRATEGY, value_name = "token")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
    /// Subproblem validating master candidates: TSP, ATSP or OP.
    #[arg(long = ARG_SOLVE_SUBPROBLEM, value_name = "token")]
    #[serde(default)]
    pub(crate) subproblem: Option<String>,
    /// Comma-separated cut families, e.g. "SEC,BEND_V0".
    #[arg(long = ARG_SOLVE_CUTS, value_name = "list")]
    #[serde(default)]
    pub(crate) cuts: Option<String>,
    /// Domain of the master edge columns: CONT or BIN.
    #[arg(long = ARG_SOLVE_Y_BOUNDS, value_name = "token")]
    #[serde(default)]
    pub(crate) y_bounds: Option<String>,
    /// Handling of integral subtours: SKIP or CUT.
    #[arg(long = ARG_SOLVE_INTEGER_SEC, value_name = "token")]
    #[serde(default)]
    pub(crate) integer_sec: Option<String>,
    /// Wall-clock limit for the solve, in seconds.
    #[arg(long = ARG_SOLVE_TIME_LIMIT, value_name = "seconds")]
    #[serde(default)]
    pub(crate) time_limit: Option<u64>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Instance file to read.
    pub(crate) instance_path: Utf8PathBuf,
    /// File receiving the solved instance.
    pub(crate) output_path: Utf8PathBuf,
    /// Solver options.
    pub(crate) decomposition: DecompositionConfig,
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let instance_path = args.instance.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_INSTANCE,
            env: ENV_SOLVE_INSTANCE,
        })?;
        let output_path = args.output.unwrap_or_else(|| instance_path.clone());

        let mut decomposition = DecompositionConfig::default();
        if let Some(token) = args.strategy.as_deref() {
            decomposition = decomposition.with_strategy(token.parse()?);
        }
        if let Some(token) = args.subproblem.as_deref() {
            decomposition = decomposition.with_subproblem(token.parse()?);
        }
        if let Some(list) = args.cuts.as_deref() {
            decomposition = decomposition.with_cuts(parse_cut_list(list)?);
        }
        if let Some(token) = args.y_bounds.as_deref() {
            decomposition = decomposition.with_y_bounds(token.parse()?);
        }
        if let Some(token) = args.integer_sec.as_deref() {
            decomposition = decomposition.with_integer_sec(token.parse()?);
        }
        decomposition = decomposition.with_time_limit(args.time_limit.map(Duration::from_secs));

        Ok(Self {
            instance_path,
            output_path,
            decomposition,
        })
    }
}

/// Parse a comma-separated cut family list; blank entries are ignored.
pub(crate) fn parse_cut_list(list: &str) -> Result<Vec<CutFamily>, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().map_err(CliError::from))
        .collect()
}

pub(crate) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_solve(&config, ExhaustiveBackend).map(|_| ())
}

/// Solve the configured instance and write it back with its solution.
///
/// A failed solve still writes the partial record before the error is
/// returned.
pub(crate) fn execute_solve<B: MipBackend>(
    config: &SolveConfig,
    backend: B,
) -> Result<SolveReport, CliError> {
    require_existing(&config.instance_path, ARG_SOLVE_INSTANCE)?;
    let mut record = load_instance(&config.instance_path)?;
    let instance = record
        .to_instance()
        .map_err(|source| CliError::InvalidInstance {
            path: config.instance_path.clone(),
            source,
        })?;

    let solver = DecompositionSolver::with_config(backend, config.decomposition.clone());
    let outcome = solver.solve(&instance);
    let mut solution = match &outcome {
        Ok(report) => report.record.clone(),
        Err(failure) => (*failure.partial).clone(),
    };
    solution.system = system_info();
    record.solution = Some(solution);
    write_instance(&config.output_path, &record)?;
    log::info!(
        "wrote the solution for {} to {}",
        instance.name(),
        config.output_path
    );

    outcome.map_err(|SolveFailure { error, .. }| CliError::Solve {
        source: Box::new(error),
    })
}

/// Host metadata stored with every solution.
fn system_info() -> SystemInfo {
    let threads = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    SystemInfo {
        platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
        cpu: format!("{threads} hardware threads"),
        ram: "unknown".to_owned(),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
