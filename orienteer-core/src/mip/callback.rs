//! Callback protocol between a backend and the engine.
//!
//! Backends invoke callbacks one at a time; the engine never sees two
//! events concurrently.

use super::{LinearConstraint, MipError};

/// Access to an integer-feasible candidate during the search.
pub trait CandidateContext {
    /// Column values of the candidate.
    fn values(&self) -> Result<Vec<f64>, MipError>;

    /// Objective value of the candidate.
    fn objective(&self) -> Result<f64, MipError>;

    /// Add a lazy row before the backend accepts the candidate.
    fn add_lazy(&mut self, constraint: LinearConstraint) -> Result<(), MipError>;
}

/// Access to the search at a branch-and-bound node.
pub trait NodeContext {
    /// Objective of the current incumbent.
    ///
    /// Without an incumbent this is the worst value for the model's sense:
    /// negative infinity when maximising and positive infinity when
    /// minimising.
    fn best_objective(&self) -> Result<f64, MipError>;

    /// Offer a complete solution as new incumbent and return its objective.
    fn inject_solution(&mut self, values: &[f64]) -> Result<f64, MipError>;
}

/// Receiver of search events.
pub trait MipCallback {
    /// Called for every integer-feasible candidate that would improve the
    /// incumbent.
    fn on_candidate(&mut self, context: &mut dyn CandidateContext) -> Result<(), MipError>;

    /// Called at every branching node.
    fn on_node(&mut self, context: &mut dyn NodeContext) -> Result<(), MipError> {
        let _ = context;
        Ok(())
    }
}
