//! The two-index orienteering formulation and its solution vectors.
//!
//! The master problem and the orienteering subproblem register the same
//! model: a presence column `X_i` per node rewarded with its price, an edge
//! column `Y_ij` per pair, the depot forced in, two selected edges at every
//! visited node and the travel budget over the selected edges.

use orienteer_core::mip::{
    ConstraintOp, LinearConstraint, MipModel, Sense, Variable, coefficient,
};
use orienteer_core::{DEPOT, DistanceMatrix, OpLayout, SolveError, Tour};

use crate::YBounds;
use crate::cycle::{AdjacencyMatrix, MASTER_THRESHOLD};
use crate::failure::construction;

/// Register the orienteering formulation over `distances` on `model`.
///
/// The model is set to maximise. Returns the column layout.
///
/// # Errors
///
/// Returns [`SolveError::ModelConstruction`] when the backend refuses a
/// column or row.
pub fn register_orienteering<M: MipModel>(
    model: &mut M,
    distances: &DistanceMatrix,
    prices: &[i64],
    budget: i64,
    y_bounds: YBounds,
) -> Result<OpLayout, SolveError> {
    let layout = OpLayout::new(distances.size());
    let nodes = layout.nodes();
    for (node, &price) in prices.iter().enumerate().take(nodes) {
        let name = format!("X_{node}");
        model
            .add_var(Variable::binary(name.clone(), coefficient(price)))
            .map_err(construction(name))?;
    }
    for (i, j) in layout.pairs() {
        let name = format!("Y_{i}_{j}");
        let variable = match y_bounds {
            YBounds::Binary => Variable::binary(name.clone(), 0.0),
            YBounds::Continuous => Variable::continuous(name.clone(), 0.0, 0.0, 1.0),
        };
        model.add_var(variable).map_err(construction(name))?;
    }
    model.set_sense(Sense::Maximize);

    let depot = LinearConstraint::new(ConstraintOp::Equal, 1.0).with_term(layout.x(DEPOT), 1.0);
    add_row(model, "must_depot", depot)?;
    for node in 0..nodes {
        let mut degree = LinearConstraint::new(ConstraintOp::Equal, 0.0);
        for other in (0..nodes).filter(|&other| other != node) {
            degree.push(layout.y(node, other), 1.0);
        }
        degree.push(layout.x(node), -2.0);
        add_row(model, &format!("node_2_{node}"), degree)?;
    }
    let mut travel = LinearConstraint::new(ConstraintOp::LessEqual, coefficient(budget));
    for (i, j) in layout.pairs() {
        travel.push(layout.y(i, j), coefficient(distances.get(i, j)));
    }
    add_row(model, "travel_budget", travel)?;
    log::info!(
        "registered orienteering formulation: {} columns, {} rows",
        layout.variable_count(),
        nodes + 2
    );
    Ok(layout)
}

fn add_row<M: MipModel>(
    model: &mut M,
    name: &str,
    constraint: LinearConstraint,
) -> Result<(), SolveError> {
    model
        .add_constraint(name, constraint)
        .map_err(construction(format!("row {name}")))
}

/// Nodes whose presence column exceeds one half, in index order.
#[must_use]
pub fn active_nodes(values: &[f64], layout: OpLayout) -> Vec<usize> {
    (0..layout.nodes())
        .filter(|&node| values.get(layout.x(node)).is_some_and(|&value| value > 0.5))
        .collect()
}

/// Edges selected by an integral candidate.
#[must_use]
pub fn selected_edges(values: &[f64], layout: OpLayout) -> AdjacencyMatrix {
    AdjacencyMatrix::from_edge_values(values, layout.nodes(), layout.y_start(), MASTER_THRESHOLD)
}

/// Column vector visiting `tour`: its presence columns and the edges
/// between consecutive nodes, closing edge included.
#[must_use]
pub fn solution_vector(layout: OpLayout, tour: &Tour) -> Vec<f64> {
    let mut values = vec![0.0; layout.variable_count()];
    let columns = tour
        .nodes()
        .iter()
        .map(|&node| layout.x(node))
        .chain(tour.edges().filter(|(a, b)| a != b).map(|(a, b)| layout.y(a, b)));
    for column in columns {
        if let Some(value) = values.get_mut(column) {
            *value = 1.0;
        }
    }
    values
}
