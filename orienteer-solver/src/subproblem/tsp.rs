//! Symmetric TSP over a restricted distance matrix.

use orienteer_core::mip::{
    ConstraintOp, LinearConstraint, MipBackend, MipModel, Sense, Variable, coefficient,
};
use orienteer_core::{DistanceMatrix, SolveError, edge_index};

use super::SubproblemSolution;
use super::separator::TourSeparator;
use crate::failure::construction;

/// Minimum-cost cycle through every node of `distances`.
pub(super) fn solve<B: MipBackend>(
    backend: &B,
    distances: &DistanceMatrix,
) -> Result<Option<SubproblemSolution>, SolveError> {
    let nodes = distances.size();
    let mut model = backend
        .create_model("tsp")
        .map_err(construction("TSP model".to_owned()))?;
    for i in 0..nodes {
        for j in (i + 1)..nodes {
            let name = format!("Y_{i}_{j}");
            model
                .add_var(Variable::binary(name.clone(), coefficient(distances.get(i, j))))
                .map_err(construction(name))?;
        }
    }
    model.set_sense(Sense::Minimize);
    for node in 0..nodes {
        let mut degree = LinearConstraint::new(ConstraintOp::Equal, 2.0);
        for other in (0..nodes).filter(|&other| other != node) {
            degree.push(edge_index(node, other, nodes, 0), 1.0);
        }
        let name = format!("node_2_{node}");
        model
            .add_constraint(&name, degree)
            .map_err(construction(name))?;
    }
    model.set_lazy_constraints(true);

    let mut separator = TourSeparator::new(nodes, false);
    model
        .optimize(Some(&mut separator))
        .map_err(SolveError::SolverExecution)?;
    separator.finish(&model, distances)
}
