//! Error types emitted by the orienteer CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use orienteer_core::{InstanceError, SolveError};
use orienteer_solver::ParseOptionError;
use thiserror::Error;

/// Errors emitted by the orienteer CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A solver option token was not recognised.
    #[error(transparent)]
    InvalidOption(#[from] ParseOptionError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening an instance file failed.
    #[error("failed to open instance at {path:?}: {source}")]
    OpenInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Instance JSON could not be decoded.
    #[error("failed to parse instance JSON at {path:?}: {source}")]
    ParseInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The instance record failed validation.
    #[error("instance in {path:?} failed validation: {source}")]
    InvalidInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: InstanceError,
    },
    /// An audited instance carries no solution.
    #[error("instance in {path:?} has no attached solution")]
    MissingSolution {
        /// Instance path.
        path: Utf8PathBuf,
    },
    /// The solve aborted; the partial record has already been written.
    #[error("solver failed: {source}")]
    Solve {
        /// Fatal solve error.
        source: Box<SolveError>,
    },
    /// Serialising the instance record failed.
    #[error("failed to serialise instance record: {0}")]
    SerialiseRecord(#[source] serde_json::Error),
    /// Writing the solved instance failed.
    #[error("failed to write solution to {path:?}: {source}")]
    WriteOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing the audit report failed.
    #[error("failed to write audit report: {0}")]
    WriteReport(#[source] csv::Error),
}
