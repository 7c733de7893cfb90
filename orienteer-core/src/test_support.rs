//! Test-only fixtures and recording callback contexts shared by unit and
//! behaviour tests.

use geo::Coord;

use crate::mip::{CandidateContext, LinearConstraint, MipError, NodeContext};
use crate::{EdgeWeightType, Instance};

/// Corners of a 10x10 square, visited clockwise from the origin.
#[must_use]
pub fn square_coordinates() -> Vec<Coord<f64>> {
    vec![
        Coord { x: 0.0, y: 0.0 },
        Coord { x: 0.0, y: 10.0 },
        Coord { x: 10.0, y: 10.0 },
        Coord { x: 10.0, y: 0.0 },
    ]
}

/// Four-node square with rewards `[0, 5, 5, 5]` and the given budget.
///
/// Sides cost 10 and diagonals 14, so the perimeter is 40.
///
/// # Panics
///
/// Panics when `budget` is negative.
#[must_use]
pub fn square_instance(budget: i64) -> Instance {
    Instance::from_coordinates(
        "square",
        &square_coordinates(),
        EdgeWeightType::Euc2d,
        vec![0, 5, 5, 5],
        budget,
    )
    .unwrap_or_else(|err| panic!("square instance should be valid: {err}"))
}

/// Two triangles with sides 10, 10 and 14, a hundred units apart.
///
/// The depot triangle `{0, 1, 2}` carries rewards `[0, 1, 1]` and the far
/// triangle `{3, 4, 5}` rewards of 5 each. Each triangle costs 34 to tour,
/// and any tour joining them costs more than 200.
///
/// # Panics
///
/// Panics when `budget` is negative.
#[must_use]
pub fn clusters_instance(budget: i64) -> Instance {
    let coords: Vec<Coord<f64>> = [
        (0.0, 0.0),
        (0.0, 10.0),
        (10.0, 0.0),
        (100.0, 0.0),
        (100.0, 10.0),
        (110.0, 0.0),
    ]
    .into_iter()
    .map(|(x, y)| Coord { x, y })
    .collect();
    Instance::from_coordinates(
        "clusters",
        &coords,
        EdgeWeightType::Euc2d,
        vec![0, 1, 1, 5, 5, 5],
        budget,
    )
    .unwrap_or_else(|err| panic!("clusters instance should be valid: {err}"))
}

/// Nodes on a line at unit spacing with the given rewards.
///
/// # Panics
///
/// Panics when `prices` is empty or `budget` is negative.
#[must_use]
pub fn line_instance(prices: Vec<i64>, budget: i64) -> Instance {
    let coords: Vec<Coord<f64>> = (0_u32..)
        .take(prices.len())
        .map(|k| Coord {
            x: f64::from(k),
            y: 0.0,
        })
        .collect();
    Instance::from_coordinates("line", &coords, EdgeWeightType::Euc2d, prices, budget)
        .unwrap_or_else(|err| panic!("line instance should be valid: {err}"))
}

/// [`CandidateContext`] over fixed values that records lazy rows.
#[derive(Debug, Clone, Default)]
pub struct RecordingCandidate {
    /// Candidate column values.
    pub values: Vec<f64>,
    /// Candidate objective.
    pub objective: f64,
    /// Rows added through [`CandidateContext::add_lazy`].
    pub lazies: Vec<LinearConstraint>,
    /// Reject every lazy row when set.
    pub reject_lazies: bool,
}

impl RecordingCandidate {
    /// A candidate with the given values and objective.
    #[must_use]
    pub const fn new(values: Vec<f64>, objective: f64) -> Self {
        Self {
            values,
            objective,
            lazies: Vec::new(),
            reject_lazies: false,
        }
    }
}

impl CandidateContext for RecordingCandidate {
    fn values(&self) -> Result<Vec<f64>, MipError> {
        Ok(self.values.clone())
    }

    fn objective(&self) -> Result<f64, MipError> {
        Ok(self.objective)
    }

    fn add_lazy(&mut self, constraint: LinearConstraint) -> Result<(), MipError> {
        if self.reject_lazies {
            return Err(MipError::LazyConstraintsDisabled);
        }
        self.lazies.push(constraint);
        Ok(())
    }
}

/// [`NodeContext`] that records injected solutions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNode {
    /// Reported incumbent objective.
    pub best: f64,
    /// Vectors passed to [`NodeContext::inject_solution`].
    pub injected: Vec<Vec<f64>>,
    /// Objective returned for accepted injections; `None` rejects them.
    pub accept_with: Option<f64>,
    /// Error returned instead of [`Self::best`] when set.
    pub best_error: Option<MipError>,
}

impl NodeContext for RecordingNode {
    fn best_objective(&self) -> Result<f64, MipError> {
        self.best_error.clone().map_or(Ok(self.best), Err)
    }

    fn inject_solution(&mut self, values: &[f64]) -> Result<f64, MipError> {
        self.injected.push(values.to_vec());
        self.accept_with
            .ok_or_else(|| MipError::SolutionRejected("recording node rejects".into()))
    }
}
