//! Failure taxonomy of a decomposition solve.
//!
//! Model construction, optimisation and attribute retrieval failures end
//! the solve. Rejected cuts and incumbents are only logged. A subproblem
//! that yields no tour aborts the current iteration, since every node
//! subset admits some cycle.

use thiserror::Error;

use crate::{InstanceError, SolutionRecord, mip::MipError};

/// Errors raised while solving an instance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The instance failed validation.
    #[error("invalid instance: {0}")]
    InvalidInstance(#[from] InstanceError),
    /// Registering a column or row failed.
    #[error("failed to build {what}: {source}")]
    ModelConstruction {
        /// Element being registered.
        what: String,
        /// Backend error.
        #[source]
        source: MipError,
    },
    /// The optimise call failed.
    #[error("optimisation failed: {0}")]
    SolverExecution(#[source] MipError),
    /// Status, objective or solution could not be read.
    #[error("couldn't retrieve the {attribute}: {source}")]
    AttributeRetrieval {
        /// Attribute being read.
        attribute: &'static str,
        /// Backend error.
        #[source]
        source: MipError,
    },
    /// The backend refused a cut or a heuristic incumbent.
    #[error("solver rejected {what}: {source}")]
    CutInjection {
        /// Element being injected.
        what: String,
        /// Backend error.
        #[source]
        source: MipError,
    },
    /// A subproblem found no tour through the selected nodes.
    #[error("{subproblem} subproblem found no tour through nodes {nodes:?}")]
    SubproblemInfeasible {
        /// Subproblem kind.
        subproblem: String,
        /// Selected nodes, as global indices.
        nodes: Vec<usize>,
    },
}

impl SolveError {
    /// Whether the solve can continue after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::CutInjection { .. })
    }
}

/// A fatal [`SolveError`] with the partial record gathered before it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct SolveFailure {
    /// The error that ended the solve.
    #[source]
    pub error: SolveError,
    /// Comment, bounds and best route known when the solve stopped.
    pub partial: Box<SolutionRecord>,
}

impl SolveFailure {
    /// Pair an error with its partial record.
    #[must_use]
    pub fn new(error: SolveError, partial: SolutionRecord) -> Self {
        Self {
            error,
            partial: Box::new(partial),
        }
    }
}
