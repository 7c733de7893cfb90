//! Exact subproblems over the nodes selected by a master candidate.
//!
//! Each subproblem restricts the instance to the selected nodes, solves a
//! fresh model from the same [`MipBackend`] with its own lazy subtour
//! elimination callback, and maps the result back to global node indices.
//! Tour subproblems over one or two nodes are answered without a model.

mod atsp;
mod orienteering;
mod separator;
mod tsp;

use orienteer_core::mip::{MipBackend, MipStatus};
use orienteer_core::{DistanceMatrix, Instance, SolveError, Tour};

use crate::SubproblemKind;

/// Result of a subproblem, in global node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubproblemSolution {
    /// Best tour found.
    pub tour: Tour,
    /// Cyclic length of [`Self::tour`].
    pub cost: i64,
    /// Reward collected by [`Self::tour`].
    pub value: i64,
    /// Subtours cut off while solving.
    pub fragments: Vec<Tour>,
    /// Terminal status, `None` when no model was solved.
    pub status: Option<MipStatus>,
    /// Objective bound reported by the model.
    pub bound: Option<i64>,
}

impl SubproblemSolution {
    fn trivial(distances: &DistanceMatrix) -> Self {
        let tour: Vec<usize> = (0..distances.size()).collect();
        let cost = distances.tour_length(&tour);
        Self {
            tour: Tour::new(tour),
            cost,
            value: 0,
            fragments: Vec::new(),
            status: None,
            bound: None,
        }
    }

    fn remap(self, nodes: &[usize]) -> Self {
        let global = |tour: Tour| {
            Tour::new(
                tour.nodes()
                    .iter()
                    .filter_map(|&local| nodes.get(local))
                    .copied()
                    .collect(),
            )
        };
        Self {
            tour: global(self.tour),
            fragments: self.fragments.into_iter().map(global).collect(),
            ..self
        }
    }
}

/// Solves subproblems of one instance with fresh models from `backend`.
#[derive(Debug)]
pub struct SubproblemSolver<'a, B> {
    backend: &'a B,
    instance: &'a Instance,
}

impl<'a, B: MipBackend> SubproblemSolver<'a, B> {
    /// Subproblems of `instance` solved through `backend`.
    #[must_use]
    pub const fn new(backend: &'a B, instance: &'a Instance) -> Self {
        Self { backend, instance }
    }

    /// Solve `kind` over `nodes`, given as ascending global indices.
    ///
    /// Tour subproblems visit every node; the orienteering subproblem keeps
    /// the first node, the depot, and maximises reward within the budget.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::SubproblemInfeasible`] when no tour exists,
    /// and the construction, execution or attribute errors of the model.
    pub fn solve(
        &self,
        kind: SubproblemKind,
        nodes: &[usize],
    ) -> Result<SubproblemSolution, SolveError> {
        let distances = self.instance.distances().restricted(nodes);
        let found = match (kind, nodes.len()) {
            (_, 0) => None,
            (SubproblemKind::Tsp | SubproblemKind::Atsp, 1 | 2) => {
                Some(SubproblemSolution::trivial(&distances))
            }
            (SubproblemKind::Tsp, _) => tsp::solve(self.backend, &distances)?,
            (SubproblemKind::Atsp, _) => atsp::solve(self.backend, &distances)?,
            (SubproblemKind::Op, _) => {
                let prices: Vec<i64> = nodes
                    .iter()
                    .map(|&node| self.instance.prices().get(node).copied().unwrap_or_default())
                    .collect();
                orienteering::solve(self.backend, &distances, &prices, self.instance.budget())?
            }
        };
        let Some(local) = found else {
            return Err(SolveError::SubproblemInfeasible {
                subproblem: kind.to_string(),
                nodes: nodes.to_vec(),
            });
        };
        let mut solution = local.remap(nodes);
        if kind != SubproblemKind::Op {
            solution.value = self.instance.route_value(solution.tour.nodes());
        }
        log::debug!(
            "{kind} subproblem over {} nodes: cost {}, value {}, {} fragments",
            nodes.len(),
            solution.cost,
            solution.value,
            solution.fragments.len()
        );
        Ok(solution)
    }
}
