//! Logic-based Benders decomposition: resolve the master after every round
//! of cuts until a subproblem validates its optimum.

use std::time::Instant;

use orienteer_core::mip::{LinearConstraint, MipBackend, MipModel, MipStatus, round_objective};
use orienteer_core::{SolveError, Tour};

use super::callback::MasterCallback;
use super::{INFEASIBLE, Master, STOPPED_EARLY, TIME_LIMIT_REACHED, check_validity};
use crate::SubproblemKind;
use crate::failure::attribute;
use crate::formulation::{active_nodes, solution_vector};
use crate::session::{CutKind, SolveSession, SolveState};

/// Tolerance used to decide whether a new row cuts off the master values.
const SEPARATION_TOLERANCE: f64 = 1e-6;

/// Verdict on one master optimum.
enum Step {
    /// A subproblem confirmed the node set.
    Valid,
    /// At least one new row cuts off the master solution.
    Cut,
    /// No new row cuts off the master solution.
    Stalled,
}

pub(super) fn solve<B: MipBackend>(
    master: &Master<'_, B>,
    model: &mut B::Model,
    session: &mut SolveSession,
) -> Result<(), SolveError> {
    let deadline = master.config.time_limit.map(|limit| Instant::now() + limit);
    for round in 1_usize.. {
        model.set_time_limit(deadline.map(|at| at.saturating_duration_since(Instant::now())));
        let status = resolve(master, model, session)?;
        match status {
            MipStatus::Optimal | MipStatus::TimeLimit if model.solution_count() > 0 => {}
            MipStatus::TimeLimit => {
                session.note(TIME_LIMIT_REACHED);
                session.transition(SolveState::TimeLimited);
                return Ok(());
            }
            MipStatus::InfeasibleOrUnbounded => {
                session.note(INFEASIBLE);
                session.transition(SolveState::Infeasible);
                return Ok(());
            }
            MipStatus::Optimal | MipStatus::Interrupted | MipStatus::Other => {
                session.note(STOPPED_EARLY);
                session.transition(SolveState::Aborted);
                return Ok(());
            }
        }

        let objective = round_objective(
            model
                .objective_value()
                .map_err(attribute("objective value"))?,
        );
        let values = model.solution().map_err(attribute("solution"))?;
        log::info!("round {round}: master optimum {objective}");
        let step = match master.config.subproblem {
            SubproblemKind::Op => check_orienteering(master, model, session, &values, objective)?,
            kind => check_tour(master, model, session, kind, &values, objective)?,
        };

        let value = session.incumbent().value;
        let record = session.record_mut();
        record.obj = value;
        record.lbound = value;
        record.ubound = objective;
        if status == MipStatus::TimeLimit {
            session.note(TIME_LIMIT_REACHED);
            session.transition(SolveState::TimeLimited);
            return Ok(());
        }
        match step {
            Step::Valid => {
                session.record_mut().optimal = true;
                session.transition(SolveState::Converged);
                return Ok(());
            }
            Step::Stalled => {
                session.note("No new cut separates the master solution.");
                session.transition(SolveState::Aborted);
                return Ok(());
            }
            Step::Cut => {}
        }
    }
    Ok(())
}

/// Optimise the master once and read its status.
fn resolve<B: MipBackend>(
    master: &Master<'_, B>,
    model: &mut B::Model,
    session: &mut SolveSession,
) -> Result<MipStatus, SolveError> {
    session.transition(SolveState::Solving);
    let outcome = {
        let mut callback = MasterCallback::new(master, session);
        model.optimize(Some(&mut callback))
    };
    if let Some(error) = session.take_failure() {
        return Err(error);
    }
    outcome.map_err(SolveError::SolverExecution)?;
    model.status().map_err(attribute("optimisation status"))
}

fn check_tour<B: MipBackend>(
    master: &Master<'_, B>,
    model: &mut B::Model,
    session: &mut SolveSession,
    kind: SubproblemKind,
    values: &[f64],
    objective: i64,
) -> Result<Step, SolveError> {
    let active = active_nodes(values, master.cuts.layout());
    let solution = master.subproblems.solve(kind, &active)?;
    if solution.cost <= master.instance.budget() {
        session.replace_incumbent(solution.tour, solution.cost, objective);
        return Ok(Step::Valid);
    }
    let mut separated = false;
    for &family in &master.config.cuts {
        log::info!(
            "master solution with objective {objective} needs a {kind} tour of length {}, adding {family} cuts",
            solution.cost
        );
        for cut in master.cuts.family(family, &solution.tour, solution.cost, &solution.fragments) {
            separated |= add_row(model, session, family.as_str(), family.into(), cut, values);
        }
    }
    set_heuristic(master, model, session, &solution.tour, solution.cost, objective, objective);
    Ok(if separated { Step::Cut } else { Step::Stalled })
}

fn check_orienteering<B: MipBackend>(
    master: &Master<'_, B>,
    model: &mut B::Model,
    session: &mut SolveSession,
    values: &[f64],
    objective: i64,
) -> Result<Step, SolveError> {
    let active = active_nodes(values, master.cuts.layout());
    let solution = master.subproblems.solve(SubproblemKind::Op, &active)?;
    if solution.value >= objective {
        session.replace_incumbent(solution.tour, solution.cost, objective);
        return Ok(Step::Valid);
    }
    let cut = master.cuts.op_subcost(&active, solution.value);
    let separated = add_row(model, session, "OP", CutKind::Op, cut, values);
    set_heuristic(
        master,
        model,
        session,
        &solution.tour,
        solution.cost,
        solution.value,
        objective,
    );
    Ok(if separated { Step::Cut } else { Step::Stalled })
}

/// Add a named row and report whether it cuts off `values`.
fn add_row<M: MipModel>(
    model: &mut M,
    session: &mut SolveSession,
    label: &str,
    kind: CutKind,
    cut: LinearConstraint,
    values: &[f64],
) -> bool {
    let name = format!("{label}_{}", session.counters().count(kind));
    let separates = !cut.is_satisfied(values, SEPARATION_TOLERANCE);
    match model.add_constraint(&name, cut) {
        Ok(()) => {
            session.count_cut(kind);
            separates
        }
        Err(source) => {
            let error = SolveError::CutInjection {
                what: format!("row {name}"),
                source,
            };
            log::warn!("{error}");
            false
        }
    }
}

/// Repair `tour` and offer it as the start of the next resolve.
fn set_heuristic<B: MipBackend>(
    master: &Master<'_, B>,
    model: &mut B::Model,
    session: &mut SolveSession,
    tour: &Tour,
    length: i64,
    value: i64,
    objective: i64,
) {
    let repaired = master.repair(tour, length, value);
    session.offer_incumbent(repaired.tour, repaired.length, repaired.value, objective);
    let incumbent = session.incumbent();
    if !incumbent.pending_injection {
        return;
    }
    if !check_validity(master.instance, incumbent.tour.nodes(), incumbent.value) {
        log::warn!("heuristic tour {:?} seems to be invalid", incumbent.tour.nodes());
    }
    let start = solution_vector(master.cuts.layout(), &incumbent.tour);
    let worth = incumbent.value;
    match model.set_start(&start) {
        Ok(()) => {
            session.clear_pending();
            log::info!("new starting solution with value {worth} set");
        }
        Err(source) => {
            let error = SolveError::CutInjection {
                what: "heuristic start solution".to_owned(),
                source,
            };
            log::warn!("{error}");
        }
    }
}
