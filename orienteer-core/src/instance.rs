//! The orienteering instance: costs, rewards and budget.

use geo::Coord;
use thiserror::Error;

use crate::{DistanceError, DistanceMatrix, EdgeWeightType};

/// Index of the mandatory start node.
pub const DEPOT: usize = 0;

/// Errors returned when an [`Instance`] fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// The instance has no nodes.
    #[error("instance must contain at least one node")]
    Empty,
    /// Reward and node counts disagree.
    #[error("{prices} prices supplied for {nodes} nodes")]
    PriceCountMismatch {
        /// Number of rewards.
        prices: usize,
        /// Number of nodes.
        nodes: usize,
    },
    /// The travel budget is negative.
    #[error("travel budget {0} is negative")]
    NegativeBudget(i64),
    /// The edge weight tag is not recognised.
    #[error("unsupported edge weight type '{0}'")]
    UnsupportedEdgeWeightType(String),
    /// Only node 0 may serve as depot.
    #[error("unsupported depot list {0:?}; only [0] is supported")]
    UnsupportedDepot(Vec<usize>),
    /// The cost matrix could not be built.
    #[error(transparent)]
    Distance(#[from] DistanceError),
}

/// Immutable orienteering instance with depot at node [`DEPOT`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use orienteer_core::{EdgeWeightType, Instance};
///
/// # fn main() -> Result<(), orienteer_core::InstanceError> {
/// let coords = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 0.0, y: 10.0 },
///     Coord { x: 10.0, y: 10.0 },
/// ];
/// let instance =
///     Instance::from_coordinates("tri", &coords, EdgeWeightType::Euc2d, vec![0, 4, 6], 40)?;
/// assert_eq!(instance.node_count(), 3);
/// assert_eq!(instance.route_value(&[0, 2]), 6);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    name: String,
    distances: DistanceMatrix,
    prices: Vec<i64>,
    budget: i64,
}

impl Instance {
    /// Validate and construct an [`Instance`].
    pub fn new(
        name: impl Into<String>,
        distances: DistanceMatrix,
        prices: Vec<i64>,
        budget: i64,
    ) -> Result<Self, InstanceError> {
        let nodes = distances.size();
        if nodes == 0 {
            return Err(InstanceError::Empty);
        }
        if prices.len() != nodes {
            return Err(InstanceError::PriceCountMismatch {
                prices: prices.len(),
                nodes,
            });
        }
        if budget < 0 {
            return Err(InstanceError::NegativeBudget(budget));
        }
        Ok(Self {
            name: name.into(),
            distances,
            prices,
            budget,
        })
    }

    /// Build an instance from planar coordinates.
    pub fn from_coordinates(
        name: impl Into<String>,
        coords: &[Coord<f64>],
        weight_type: EdgeWeightType,
        prices: Vec<i64>,
        budget: i64,
    ) -> Result<Self, InstanceError> {
        let distances = DistanceMatrix::from_coordinates(coords, weight_type)?;
        Self::new(name, distances, prices, budget)
    }

    /// Instance name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of nodes including the depot.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.distances.size()
    }

    /// Travel cost matrix.
    #[must_use]
    pub const fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Reward per node.
    #[must_use]
    pub fn prices(&self) -> &[i64] {
        &self.prices
    }

    /// Travel budget `Tmax`.
    #[must_use]
    pub const fn budget(&self) -> i64 {
        self.budget
    }

    /// Summed reward of the nodes in `route`.
    #[must_use]
    pub fn route_value(&self, route: &[usize]) -> i64 {
        route.iter().filter_map(|&node| self.prices.get(node)).sum()
    }
}
