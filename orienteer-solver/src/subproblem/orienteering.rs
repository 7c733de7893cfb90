//! Orienteering restricted to a node subset.
//!
//! The subset model is the master formulation with binary edge columns and
//! a callback that only separates subtours.

use orienteer_core::mip::{
    CandidateContext, MipBackend, MipCallback, MipError, MipModel, MipStatus, round_objective,
};
use orienteer_core::{DistanceMatrix, OpLayout, SolveError};

use super::SubproblemSolution;
use crate::failure::{attribute, construction};
use crate::formulation::{active_nodes, register_orienteering, selected_edges};
use crate::{YBounds, subtour_elimination};

struct SubtourSeparator {
    layout: OpLayout,
}

impl SubtourSeparator {
    fn separate(&self, context: &mut dyn CandidateContext) -> Result<(), MipError> {
        let values = context.values()?;
        let visited = active_nodes(&values, self.layout).len();
        let subtour = selected_edges(&values, self.layout).shortest_subtour();
        if !subtour.is_empty() && subtour.len() < visited {
            let cut = subtour_elimination(
                subtour.nodes(),
                self.layout.nodes(),
                self.layout.y_start(),
            );
            context.add_lazy(cut)?;
        }
        Ok(())
    }
}

impl MipCallback for SubtourSeparator {
    fn on_candidate(&mut self, context: &mut dyn CandidateContext) -> Result<(), MipError> {
        if let Err(err) = self.separate(context) {
            log::warn!("subtour separation failed: {err}");
        }
        Ok(())
    }
}

pub(super) fn solve<B: MipBackend>(
    backend: &B,
    distances: &DistanceMatrix,
    prices: &[i64],
    budget: i64,
) -> Result<Option<SubproblemSolution>, SolveError> {
    let mut model = backend
        .create_model("op")
        .map_err(construction("OP model".to_owned()))?;
    let layout = register_orienteering(&mut model, distances, prices, budget, YBounds::Binary)?;
    model.set_lazy_constraints(true);
    let mut separator = SubtourSeparator { layout };
    model
        .optimize(Some(&mut separator))
        .map_err(SolveError::SolverExecution)?;

    let status = model.status().map_err(attribute("subproblem status"))?;
    let values = match model.solution() {
        Ok(values) => values,
        Err(MipError::NoSolution) => {
            log::warn!("OP subproblem ended {status:?} without a tour");
            return Ok(None);
        }
        Err(source) => {
            return Err(SolveError::AttributeRetrieval {
                attribute: "subproblem solution",
                source,
            });
        }
    };
    let score = model
        .objective_value()
        .map_err(attribute("subproblem objective"))?;
    let edges = selected_edges(&values, layout);
    let tour = edges.shortest_subtour();
    let cost = layout
        .pairs()
        .filter(|&(i, j)| edges.is_linked(i, j))
        .map(|(i, j)| distances.get(i, j))
        .sum();
    if status != MipStatus::Optimal {
        log::info!("OP subproblem stopped {status:?} with score {score}");
    }
    Ok(Some(SubproblemSolution {
        tour,
        cost,
        value: round_objective(score),
        fragments: Vec::new(),
        status: Some(status),
        bound: model.objective_bound().ok().map(round_objective),
    }))
}
