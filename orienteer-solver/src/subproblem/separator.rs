//! Lazy subtour elimination for the tour subproblems.

use orienteer_core::mip::{
    CandidateContext, LinearConstraint, MipCallback, MipError, MipModel, round_objective,
};
use orienteer_core::{DistanceMatrix, SolveError, Tour};

use super::SubproblemSolution;
use crate::cycle::{AdjacencyMatrix, TOUR_THRESHOLD};
use crate::failure::attribute;
use crate::{directed_subtour_elimination, subtour_elimination};

/// Cuts off every candidate whose shortest subtour misses a node.
pub(super) struct TourSeparator {
    nodes: usize,
    directed: bool,
    fragments: Vec<Tour>,
}

impl TourSeparator {
    pub(super) const fn new(nodes: usize, directed: bool) -> Self {
        Self {
            nodes,
            directed,
            fragments: Vec::new(),
        }
    }

    fn selection(&self, values: &[f64]) -> AdjacencyMatrix {
        if self.directed {
            AdjacencyMatrix::from_arc_values(values, self.nodes, TOUR_THRESHOLD)
        } else {
            AdjacencyMatrix::from_edge_values(values, self.nodes, 0, TOUR_THRESHOLD)
        }
    }

    fn cut(&self, fragment: &[usize]) -> LinearConstraint {
        if self.directed {
            directed_subtour_elimination(fragment, self.nodes)
        } else {
            subtour_elimination(fragment, self.nodes, 0)
        }
    }

    fn separate(&mut self, context: &mut dyn CandidateContext) -> Result<(), MipError> {
        let values = context.values()?;
        let subtour = self.selection(&values).shortest_subtour();
        if subtour.is_empty() || subtour.len() >= self.nodes {
            return Ok(());
        }
        context.add_lazy(self.cut(subtour.nodes()))?;
        self.fragments.push(subtour);
        Ok(())
    }

    /// Read the final tour off `model` once it has been optimised.
    pub(super) fn finish<M: MipModel>(
        self,
        model: &M,
        distances: &DistanceMatrix,
    ) -> Result<Option<SubproblemSolution>, SolveError> {
        let status = model.status().map_err(attribute("subproblem status"))?;
        if model.solution_count() == 0 {
            log::warn!("tour subproblem over {} nodes ended {status:?} without a tour", self.nodes);
            return Ok(None);
        }
        let values = model.solution().map_err(attribute("subproblem solution"))?;
        let tour = self.selection(&values).shortest_subtour();
        let cost = distances.tour_length(tour.nodes());
        Ok(Some(SubproblemSolution {
            tour,
            cost,
            value: 0,
            fragments: self.fragments,
            status: Some(status),
            bound: model.objective_bound().ok().map(round_objective),
        }))
    }
}

impl MipCallback for TourSeparator {
    fn on_candidate(&mut self, context: &mut dyn CandidateContext) -> Result<(), MipError> {
        if let Err(err) = self.separate(context) {
            log::warn!("subtour separation failed: {err}");
        }
        Ok(())
    }
}
