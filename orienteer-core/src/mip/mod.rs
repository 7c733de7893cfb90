//! Boundary to an external mixed-integer programming solver.
//!
//! The decomposition engine never performs branch-and-bound itself. It
//! registers columns and rows with a [`MipModel`], installs a
//! [`MipCallback`] and reacts to the candidates the backend reports. Any
//! solver offering lazy constraints and incumbent injection can sit behind
//! these traits; [`MipBackend`] creates fresh models so subproblems can be
//! solved recursively with the same backend.

mod callback;
mod constraint;
mod error;

use std::time::Duration;

pub use callback::{CandidateContext, MipCallback, NodeContext};
pub use constraint::{ConstraintOp, LinearConstraint};
pub use error::MipError;

/// Domain of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    /// Integral value in `{0, 1}` after bounds are applied.
    Binary,
    /// Real value between the bounds.
    Continuous,
}

/// A column with its objective coefficient and bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Display name used in diagnostics.
    pub name: String,
    /// Objective coefficient.
    pub objective: f64,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Column domain.
    pub var_type: VarType,
}

impl Variable {
    /// A `{0, 1}` column.
    #[must_use]
    pub fn binary(name: impl Into<String>, objective: f64) -> Self {
        Self {
            name: name.into(),
            objective,
            lower: 0.0,
            upper: 1.0,
            var_type: VarType::Binary,
        }
    }

    /// A continuous column in `[lower, upper]`.
    #[must_use]
    pub fn continuous(name: impl Into<String>, objective: f64, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            objective,
            lower,
            upper,
            var_type: VarType::Continuous,
        }
    }

    /// Replace the upper bound.
    #[must_use]
    pub fn with_upper(mut self, upper: f64) -> Self {
        self.upper = upper;
        self
    }
}

/// Direction of optimisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sense {
    /// Minimise the objective.
    #[default]
    Minimize,
    /// Maximise the objective.
    Maximize,
}

/// Terminal status of an optimisation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MipStatus {
    /// Search completed with a proven optimum.
    Optimal,
    /// No feasible point exists, or the objective is unbounded.
    InfeasibleOrUnbounded,
    /// The time limit stopped the search.
    TimeLimit,
    /// A callback stopped the search.
    Interrupted,
    /// Any other backend-specific status.
    Other,
}

/// A model under construction or after optimisation.
pub trait MipModel {
    /// Register a column and return its index.
    fn add_var(&mut self, variable: Variable) -> Result<usize, MipError>;

    /// Register a named row.
    fn add_constraint(&mut self, name: &str, constraint: LinearConstraint)
    -> Result<(), MipError>;

    /// Set the optimisation direction.
    fn set_sense(&mut self, sense: Sense);

    /// Allow callbacks to add lazy rows.
    fn set_lazy_constraints(&mut self, enabled: bool);

    /// Limit the wall-clock time of the next [`MipModel::optimize`] call.
    fn set_time_limit(&mut self, limit: Option<Duration>);

    /// Offer a start solution for the next [`MipModel::optimize`] call.
    fn set_start(&mut self, values: &[f64]) -> Result<(), MipError>;

    /// Run the search, dispatching events to `callback`.
    ///
    /// An error returned by the callback stops the search and is passed
    /// through.
    fn optimize(&mut self, callback: Option<&mut dyn MipCallback>) -> Result<(), MipError>;

    /// Status of the last run.
    fn status(&self) -> Result<MipStatus, MipError>;

    /// Objective of the incumbent.
    fn objective_value(&self) -> Result<f64, MipError>;

    /// Best proven bound on the objective.
    fn objective_bound(&self) -> Result<f64, MipError>;

    /// Column values of the incumbent.
    fn solution(&self) -> Result<Vec<f64>, MipError>;

    /// Number of feasible solutions known to the model.
    fn solution_count(&self) -> usize;

    /// Number of registered columns.
    fn var_count(&self) -> usize;
}

/// Factory for fresh models.
pub trait MipBackend {
    /// Model type produced by this backend.
    type Model: MipModel;

    /// Create an empty model.
    fn create_model(&self, name: &str) -> Result<Self::Model, MipError>;
}

/// Convert an integer cost, reward or budget into a model coefficient.
///
/// # Examples
/// ```
/// use orienteer_core::mip::coefficient;
///
/// assert_eq!(coefficient(-14), -14.0);
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "instance integers stay well inside the exact f64 range"
)]
pub const fn coefficient(value: i64) -> f64 {
    value as f64
}

/// Round an objective value to the nearest integer, halves rounding up.
///
/// # Examples
/// ```
/// use orienteer_core::mip::round_objective;
///
/// assert_eq!(round_objective(14.5), 15);
/// assert_eq!(round_objective(14.49), 14);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "objectives are integral up to solver tolerance"
)]
pub fn round_objective(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
