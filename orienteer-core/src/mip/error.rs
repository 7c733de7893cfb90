use thiserror::Error;

/// Errors reported by a [`MipModel`](super::MipModel) or its callbacks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MipError {
    /// A row or start vector refers to a column that does not exist.
    #[error("column {index} does not exist; model has {count} columns")]
    UnknownColumn {
        /// Offending column.
        index: usize,
        /// Number of columns in the model.
        count: usize,
    },
    /// A column was registered with bounds that admit no value.
    #[error("column {name} has empty bounds [{lower}, {upper}]")]
    EmptyBounds {
        /// Column name.
        name: String,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// Row terms and coefficients differ in length.
    #[error("row {name} has {indices} indices but {coefficients} coefficients")]
    MalformedRow {
        /// Row name.
        name: String,
        /// Number of indices.
        indices: usize,
        /// Number of coefficients.
        coefficients: usize,
    },
    /// A solution vector has the wrong length.
    #[error("expected {expected} values, got {actual}")]
    DimensionMismatch {
        /// Column count of the model.
        expected: usize,
        /// Length of the offered vector.
        actual: usize,
    },
    /// A callback tried to add a lazy row without lazy mode.
    #[error("lazy constraints are disabled for this model")]
    LazyConstraintsDisabled,
    /// An offered solution was refused.
    #[error("solution rejected: {0}")]
    SolutionRejected(String),
    /// An attribute was queried before a successful optimisation.
    #[error("model has not been optimised since it last changed")]
    NotOptimised,
    /// No feasible solution is available.
    #[error("no feasible solution available")]
    NoSolution,
    /// A callback stopped the search.
    #[error("search interrupted by callback: {0}")]
    Interrupted(String),
    /// Backend-specific failure.
    #[error("backend failure: {0}")]
    Backend(String),
}
