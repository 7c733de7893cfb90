//! Lazy-constraint callback on the master relaxation.

use orienteer_core::mip::{
    CandidateContext, LinearConstraint, MipBackend, MipCallback, MipError, NodeContext,
    round_objective,
};
use orienteer_core::SolveError;

use super::Master;
use crate::failure::attribute;
use crate::formulation::{active_nodes, selected_edges, solution_vector};
use crate::session::{CutKind, SolveSession, SolveState};
use crate::{IntegerSecPolicy, Strategy, SubproblemKind};

/// Handles master candidates and injects heuristic incumbents.
///
/// Fatal errors are parked in the session and the search is interrupted;
/// the strategy picks them up once `optimize` returns.
pub(super) struct MasterCallback<'s, 'a, B> {
    master: &'s Master<'a, B>,
    session: &'s mut SolveSession,
}

impl<'s, 'a, B: MipBackend> MasterCallback<'s, 'a, B> {
    pub(super) const fn new(master: &'s Master<'a, B>, session: &'s mut SolveSession) -> Self {
        Self { master, session }
    }

    fn candidate(&mut self, context: &mut dyn CandidateContext) -> Result<(), SolveError> {
        self.session.count_callback();
        let values = context
            .values()
            .map_err(attribute("candidate values"))?;
        let objective = round_objective(
            context
                .objective()
                .map_err(attribute("candidate objective"))?,
        );
        let best = self.session.incumbent().value;
        if best >= objective {
            log::debug!(
                "incumbent {best} already matches the candidate {objective}, skipping the subproblem"
            );
            return Ok(());
        }

        let layout = self.master.cuts.layout();
        let active = active_nodes(&values, layout);
        let subtour = selected_edges(&values, layout).shortest_closed_subtour();
        let covers = !subtour.is_empty() && subtour.len() == active.len();
        if !subtour.is_empty() && !covers {
            if self.master.config.integer_sec == IntegerSecPolicy::CutImmediately {
                self.session.transition(SolveState::CallbackCutting);
                let cut = self.master.cuts.sec(subtour.nodes());
                self.add_lazy(context, CutKind::Sec, "integer subtour elimination cut", cut);
                return Ok(());
            }
            log::debug!(
                "integral subtour {:?} left to the subproblem",
                subtour.nodes()
            );
        }
        if self.master.config.strategy == Strategy::LogicBenders {
            return Ok(());
        }
        if covers {
            let length = self.master.distances().tour_length(subtour.nodes());
            self.session
                .offer_incumbent(subtour, length, objective, objective);
            return Ok(());
        }

        match self.master.config.subproblem {
            SubproblemKind::Op => self.orienteering(context, &active, objective),
            kind => self.tour(context, kind, &active, objective),
        }
    }

    fn orienteering(
        &mut self,
        context: &mut dyn CandidateContext,
        active: &[usize],
        objective: i64,
    ) -> Result<(), SolveError> {
        let solution = self.master.subproblems.solve(SubproblemKind::Op, active)?;
        let cut = self.master.cuts.op_subcost(active, solution.value);
        if solution.value < objective {
            self.session.transition(SolveState::CallbackCutting);
        }
        self.add_lazy(context, CutKind::Op, "OP cut", cut);
        self.session
            .offer_incumbent(solution.tour, solution.cost, solution.value, objective);
        Ok(())
    }

    fn tour(
        &mut self,
        context: &mut dyn CandidateContext,
        kind: SubproblemKind,
        active: &[usize],
        objective: i64,
    ) -> Result<(), SolveError> {
        let master = self.master;
        let solution = master.subproblems.solve(kind, active)?;
        if solution.cost <= master.instance.budget() {
            self.session
                .offer_incumbent(solution.tour, solution.cost, objective, objective);
            return Ok(());
        }
        self.session.transition(SolveState::CallbackCutting);
        for &family in &master.config.cuts {
            log::info!(
                "master candidate with objective {objective} needs a {} tour of length {}, adding {family} cuts",
                kind,
                solution.cost
            );
            let cuts = master.cuts.family(
                family,
                &solution.tour,
                solution.cost,
                &solution.fragments,
            );
            for cut in cuts {
                self.add_lazy(context, family.into(), family.as_str(), cut);
            }
        }
        let repaired = master.repair(&solution.tour, solution.cost, objective);
        self.session
            .offer_incumbent(repaired.tour, repaired.length, repaired.value, objective);
        Ok(())
    }

    fn add_lazy(
        &mut self,
        context: &mut dyn CandidateContext,
        kind: CutKind,
        what: &str,
        cut: LinearConstraint,
    ) {
        match context.add_lazy(cut) {
            Ok(()) => self.session.count_cut(kind),
            Err(source) => {
                let error = SolveError::CutInjection {
                    what: what.to_owned(),
                    source,
                };
                log::warn!("{error}");
            }
        }
    }

    fn inject(&mut self, context: &mut dyn NodeContext) -> Result<(), SolveError> {
        let best = context
            .best_objective()
            .map_err(attribute("best objective"))?;
        let incumbent = self.session.incumbent();
        if round_objective(best) >= incumbent.value {
            log::debug!("search incumbent {best} already beats the heuristic tour");
            self.session.clear_pending();
            return Ok(());
        }
        let tour = &incumbent.tour;
        let values = solution_vector(self.master.cuts.layout(), tour);
        log::info!(
            "injecting heuristic tour {:?} worth {}",
            tour.nodes(),
            incumbent.value
        );
        self.session
            .transition(SolveState::CallbackHeuristicInject);
        match context.inject_solution(&values) {
            Ok(objective) => {
                log::info!("heuristic incumbent with value {} set", round_objective(objective));
            }
            Err(source) => {
                let error = SolveError::CutInjection {
                    what: "heuristic incumbent".to_owned(),
                    source,
                };
                log::warn!("{error}");
            }
        }
        self.session.clear_pending();
        Ok(())
    }

    /// Return to solving, parking a fatal error and interrupting the search.
    fn resume(&mut self, outcome: Result<(), SolveError>) -> Result<(), MipError> {
        self.session.transition(SolveState::Solving);
        outcome.map_err(|error| {
            let message = error.to_string();
            self.session.fail(error);
            MipError::Interrupted(message)
        })
    }
}

impl<B: MipBackend> MipCallback for MasterCallback<'_, '_, B> {
    fn on_candidate(&mut self, context: &mut dyn CandidateContext) -> Result<(), MipError> {
        let outcome = self.candidate(context);
        self.resume(outcome)
    }

    fn on_node(&mut self, context: &mut dyn NodeContext) -> Result<(), MipError> {
        if !self.session.incumbent().pending_injection {
            return Ok(());
        }
        let outcome = self.inject(context);
        self.resume(outcome)
    }
}
