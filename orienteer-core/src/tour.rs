//! Cyclic tours and route auditing.

use thiserror::Error;

use crate::{DEPOT, Instance};

/// Ordered node sequence read cyclically.
///
/// The successor of the last node is the first. A tour found by the engine
/// starts at the depot and never repeats a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    /// Wrap an ordered node sequence.
    #[must_use]
    pub const fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// The empty tour.
    #[must_use]
    pub const fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Nodes in visiting order.
    #[must_use]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of visited nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tour visits no node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consecutive node pairs including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .copied()
            .zip(self.nodes.iter().copied().cycle().skip(1))
    }

    /// Rotate the sequence so the depot comes first.
    ///
    /// Tours that do not contain the depot are left unchanged.
    pub fn rotate_to_depot(&mut self) {
        if let Some(at) = self.nodes.iter().position(|&node| node == DEPOT) {
            self.nodes.rotate_left(at);
        }
    }

    /// Consume the tour and return its nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }
}

impl From<Vec<usize>> for Tour {
    fn from(nodes: Vec<usize>) -> Self {
        Self::new(nodes)
    }
}

/// Length and reward of an audited route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSummary {
    /// Cyclic travel cost.
    pub length: i64,
    /// Collected reward.
    pub value: i64,
}

/// Reasons a stored route is not a feasible orienteering tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteAuditError {
    /// The route visits no node.
    #[error("route is empty")]
    Empty,
    /// The route does not begin at the depot.
    #[error("route starts at node {0} instead of the depot")]
    MissingDepot(usize),
    /// A node index is outside the instance.
    #[error("node {node} is outside an instance of {nodes} nodes")]
    NodeOutOfRange {
        /// Offending node.
        node: usize,
        /// Node count of the instance.
        nodes: usize,
    },
    /// A node occurs twice.
    #[error("node {0} visited twice")]
    RepeatedNode(usize),
    /// The cyclic length exceeds the budget.
    #[error("route length {length} exceeds the max allowed length {budget}")]
    ExceedsBudget {
        /// Cyclic length of the route.
        length: i64,
        /// Budget of the instance.
        budget: i64,
    },
}

/// Check that `route` is a feasible tour of `instance`.
///
/// # Examples
/// ```
/// use orienteer_core::{DistanceMatrix, Instance, audit_route};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = DistanceMatrix::from_rows(&[vec![0, 2], vec![2, 0]])?;
/// let instance = Instance::new("pair", matrix, vec![0, 7], 4)?;
/// let summary = audit_route(&instance, &[0, 1])?;
/// assert_eq!((summary.length, summary.value), (4, 7));
/// # Ok(())
/// # }
/// ```
pub fn audit_route(instance: &Instance, route: &[usize]) -> Result<RouteSummary, RouteAuditError> {
    let nodes = instance.node_count();
    let Some(&first) = route.first() else {
        return Err(RouteAuditError::Empty);
    };
    if first != DEPOT {
        return Err(RouteAuditError::MissingDepot(first));
    }
    let mut seen = vec![false; nodes];
    for &node in route {
        let Some(slot) = seen.get_mut(node) else {
            return Err(RouteAuditError::NodeOutOfRange { node, nodes });
        };
        if *slot {
            return Err(RouteAuditError::RepeatedNode(node));
        }
        *slot = true;
    }
    let length = instance.distances().tour_length(route);
    if length > instance.budget() {
        return Err(RouteAuditError::ExceedsBudget {
            length,
            budget: instance.budget(),
        });
    }
    Ok(RouteSummary {
        length,
        value: instance.route_value(route),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::square_instance;
    use rstest::rstest;

    #[rstest]
    fn perimeter_is_feasible_at_exact_budget() {
        let instance = square_instance(40);
        let summary = audit_route(&instance, &[0, 1, 2, 3]).expect("feasible");
        assert_eq!(summary, RouteSummary { length: 40, value: 15 });
    }

    #[rstest]
    #[case(&[], RouteAuditError::Empty)]
    #[case(&[1, 0], RouteAuditError::MissingDepot(1))]
    #[case(&[0, 1, 1], RouteAuditError::RepeatedNode(1))]
    #[case(&[0, 9], RouteAuditError::NodeOutOfRange { node: 9, nodes: 4 })]
    #[case(&[0, 1, 2, 3], RouteAuditError::ExceedsBudget { length: 40, budget: 39 })]
    fn rejects_invalid_routes(#[case] route: &[usize], #[case] expected: RouteAuditError) {
        let instance = square_instance(39);
        assert_eq!(audit_route(&instance, route), Err(expected));
    }

    #[rstest]
    fn rotation_moves_depot_to_front() {
        let mut tour = Tour::new(vec![2, 3, 0, 1]);
        tour.rotate_to_depot();
        assert_eq!(tour.nodes(), &[0, 1, 2, 3]);
        let closing: Vec<_> = tour.edges().collect();
        assert_eq!(closing, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }
}
