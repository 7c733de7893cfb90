//! Directed TSP with one arc out of and one arc into every node.

use orienteer_core::mip::{
    ConstraintOp, LinearConstraint, MipBackend, MipModel, Sense, Variable, coefficient,
};
use orienteer_core::{DistanceMatrix, SolveError, arc_index};

use super::SubproblemSolution;
use super::separator::TourSeparator;
use crate::failure::construction;

pub(super) fn solve<B: MipBackend>(
    backend: &B,
    distances: &DistanceMatrix,
) -> Result<Option<SubproblemSolution>, SolveError> {
    let nodes = distances.size();
    let mut model = backend
        .create_model("atsp")
        .map_err(construction("ATSP model".to_owned()))?;
    for i in 0..nodes {
        for j in 0..nodes {
            let name = format!("x_{i}_{j}");
            let upper = if i == j { 0.0 } else { 1.0 };
            let arc =
                Variable::binary(name.clone(), coefficient(distances.get(i, j))).with_upper(upper);
            model.add_var(arc).map_err(construction(name))?;
        }
    }
    model.set_sense(Sense::Minimize);
    for node in 0..nodes {
        let mut outgoing = LinearConstraint::new(ConstraintOp::Equal, 1.0);
        let mut incoming = LinearConstraint::new(ConstraintOp::Equal, 1.0);
        for other in 0..nodes {
            outgoing.push(arc_index(node, other, nodes), 1.0);
            incoming.push(arc_index(other, node, nodes), 1.0);
        }
        for (name, row) in [
            (format!("deg2o_{node}"), outgoing),
            (format!("deg2i_{node}"), incoming),
        ] {
            model.add_constraint(&name, row).map_err(construction(name))?;
        }
    }
    model.set_lazy_constraints(true);

    let mut separator = TourSeparator::new(nodes, true);
    model
        .optimize(Some(&mut separator))
        .map_err(SolveError::SolverExecution)?;
    separator.finish(&model, distances)
}
