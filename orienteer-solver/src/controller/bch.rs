//! Branch and cut: one search with every check inside the callback.

use orienteer_core::SolveError;
use orienteer_core::mip::{MipBackend, MipModel, MipStatus, round_objective};

use super::callback::MasterCallback;
use super::{INFEASIBLE, Master, STOPPED_EARLY, TIME_LIMIT_REACHED};
use crate::failure::attribute;
use crate::session::{SolveSession, SolveState};

pub(super) fn solve<B: MipBackend>(
    master: &Master<'_, B>,
    model: &mut B::Model,
    session: &mut SolveSession,
) -> Result<(), SolveError> {
    model.set_time_limit(master.config.time_limit);
    session.transition(SolveState::Solving);
    let outcome = {
        let mut callback = MasterCallback::new(master, session);
        model.optimize(Some(&mut callback))
    };
    if let Some(error) = session.take_failure() {
        return Err(error);
    }
    outcome.map_err(SolveError::SolverExecution)?;

    let status = model.status().map_err(attribute("optimisation status"))?;
    match status {
        MipStatus::Optimal => {
            session.record_mut().optimal = true;
            session.transition(SolveState::Converged);
        }
        MipStatus::InfeasibleOrUnbounded => {
            session.note(INFEASIBLE);
            session.transition(SolveState::Infeasible);
            return Ok(());
        }
        MipStatus::TimeLimit => {
            session.note(TIME_LIMIT_REACHED);
            session.transition(SolveState::TimeLimited);
        }
        MipStatus::Interrupted | MipStatus::Other => {
            session.note(STOPPED_EARLY);
            session.transition(SolveState::Aborted);
        }
    }
    if model.solution_count() == 0 {
        session.note("No feasible solution was found.");
        return Ok(());
    }

    let objective = round_objective(
        model
            .objective_value()
            .map_err(attribute("objective value"))?,
    );
    let record = session.record_mut();
    record.obj = objective;
    record.lbound = objective;
    match model.objective_bound() {
        Ok(bound) => session.record_mut().ubound = truncated(bound),
        Err(err) => session.note(&format!("Couldn't retrieve the upper bound: {err}.")),
    }
    Ok(())
}

/// Drop the fractional part of a dual bound.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the stored upper bound is the dual bound truncated towards zero"
)]
const fn truncated(bound: f64) -> i64 {
    bound as i64
}
