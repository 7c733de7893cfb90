//! Tests for the exhaustive backend.

use std::time::Duration;

use super::*;
use orienteer_core::mip::{CandidateContext, ConstraintOp, NodeContext};
use rstest::{fixture, rstest};

fn add_binaries(model: &mut ExhaustiveModel, objectives: &[f64]) {
    for (k, &objective) in objectives.iter().enumerate() {
        model
            .add_var(Variable::binary(format!("x{k}"), objective))
            .expect("column");
    }
}

#[fixture]
fn knapsack() -> ExhaustiveModel {
    let mut model = ExhaustiveBackend.create_model("knapsack").expect("model");
    add_binaries(&mut model, &[5.0, 4.0, 3.0]);
    model
        .add_constraint(
            "capacity",
            LinearConstraint::new(ConstraintOp::LessEqual, 5.0)
                .with_term(0, 4.0)
                .with_term(1, 3.0)
                .with_term(2, 2.0),
        )
        .expect("row");
    model.set_sense(Sense::Maximize);
    model
}

#[derive(Default)]
struct Recorder {
    candidates: Vec<Vec<f64>>,
    cut: Option<LinearConstraint>,
    inject: Option<Vec<f64>>,
    injected: Vec<Result<f64, MipError>>,
}

impl MipCallback for Recorder {
    fn on_candidate(&mut self, context: &mut dyn CandidateContext) -> Result<(), MipError> {
        self.candidates.push(context.values()?);
        if let Some(cut) = self.cut.take() {
            context.add_lazy(cut)?;
        }
        Ok(())
    }

    fn on_node(&mut self, context: &mut dyn NodeContext) -> Result<(), MipError> {
        if let Some(values) = self.inject.take() {
            self.injected.push(context.inject_solution(&values));
        }
        Ok(())
    }
}

#[rstest]
fn finds_knapsack_optimum(mut knapsack: ExhaustiveModel) {
    knapsack.optimize(None).expect("optimise");
    assert_eq!(knapsack.status(), Ok(MipStatus::Optimal));
    assert_eq!(knapsack.objective_value(), Ok(7.0));
    assert_eq!(knapsack.objective_bound(), Ok(7.0));
    assert_eq!(knapsack.solution(), Ok(vec![0.0, 1.0, 1.0]));
    assert!(knapsack.solution_count() >= 1);
}

#[rstest]
fn minimises_when_asked() {
    let mut model = ExhaustiveModel::new("cover");
    add_binaries(&mut model, &[3.0, 2.0]);
    model
        .add_constraint(
            "cover",
            LinearConstraint::new(ConstraintOp::GreaterEqual, 1.0)
                .with_term(0, 1.0)
                .with_term(1, 1.0),
        )
        .expect("row");
    model.optimize(None).expect("optimise");
    assert_eq!(model.objective_value(), Ok(2.0));
    assert_eq!(model.solution(), Ok(vec![0.0, 1.0]));
}

#[rstest]
fn continuous_columns_take_their_bounds() {
    let mut model = ExhaustiveModel::new("bounds");
    model
        .add_var(Variable::continuous("y", 1.0, 0.0, 2.5))
        .expect("column");
    model.set_sense(Sense::Maximize);
    model.optimize(None).expect("optimise");
    assert_eq!(model.objective_value(), Ok(2.5));
}

#[rstest]
fn reports_infeasibility() {
    let mut model = ExhaustiveModel::new("infeasible");
    add_binaries(&mut model, &[1.0]);
    model
        .add_constraint(
            "impossible",
            LinearConstraint::new(ConstraintOp::GreaterEqual, 2.0).with_term(0, 1.0),
        )
        .expect("row");
    model.optimize(None).expect("optimise");
    assert_eq!(model.status(), Ok(MipStatus::InfeasibleOrUnbounded));
    assert_eq!(model.objective_value(), Err(MipError::NoSolution));
}

#[rstest]
fn lazy_rows_cut_off_candidates() {
    let mut model = ExhaustiveModel::new("lazy");
    add_binaries(&mut model, &[1.0, 1.0]);
    model.set_sense(Sense::Maximize);
    model.set_lazy_constraints(true);
    let mut recorder = Recorder {
        cut: Some(
            LinearConstraint::new(ConstraintOp::LessEqual, 1.0)
                .with_term(0, 1.0)
                .with_term(1, 1.0),
        ),
        ..Recorder::default()
    };
    model.optimize(Some(&mut recorder)).expect("optimise");
    assert_eq!(recorder.candidates.first(), Some(&vec![1.0, 1.0]));
    assert_eq!(model.objective_value(), Ok(1.0));
    assert_eq!(model.lazy_constraints().len(), 1);
}

#[rstest]
fn lazy_rows_persist_across_runs() {
    let mut model = ExhaustiveModel::new("lazy");
    add_binaries(&mut model, &[1.0, 1.0]);
    model.set_sense(Sense::Maximize);
    model.set_lazy_constraints(true);
    let mut recorder = Recorder {
        cut: Some(LinearConstraint::new(ConstraintOp::LessEqual, 0.0).with_term(1, 1.0)),
        ..Recorder::default()
    };
    model.optimize(Some(&mut recorder)).expect("first run");
    model.optimize(None).expect("second run");
    assert_eq!(model.solution(), Ok(vec![1.0, 0.0]));
}

#[rstest]
fn lazy_rows_require_lazy_mode() {
    let mut model = ExhaustiveModel::new("strict");
    add_binaries(&mut model, &[1.0]);
    model.set_sense(Sense::Maximize);
    let mut recorder = Recorder {
        cut: Some(LinearConstraint::new(ConstraintOp::LessEqual, 0.0).with_term(0, 1.0)),
        ..Recorder::default()
    };
    let result = model.optimize(Some(&mut recorder));
    assert_eq!(result, Err(MipError::LazyConstraintsDisabled));
    assert_eq!(model.status(), Ok(MipStatus::Interrupted));
}

#[rstest]
fn injected_solutions_become_incumbents(mut knapsack: ExhaustiveModel) {
    let mut recorder = Recorder {
        inject: Some(vec![0.0, 1.0, 1.0]),
        ..Recorder::default()
    };
    knapsack.optimize(Some(&mut recorder)).expect("optimise");
    assert_eq!(recorder.injected, vec![Ok(7.0)]);
    assert!(recorder.candidates.is_empty());
    assert_eq!(knapsack.objective_value(), Ok(7.0));
}

#[rstest]
fn infeasible_injections_are_rejected(mut knapsack: ExhaustiveModel) {
    let mut recorder = Recorder {
        inject: Some(vec![1.0, 1.0, 0.0]),
        ..Recorder::default()
    };
    knapsack.optimize(Some(&mut recorder)).expect("optimise");
    assert!(matches!(
        recorder.injected.as_slice(),
        [Err(MipError::SolutionRejected(_))]
    ));
    assert_eq!(knapsack.objective_value(), Ok(7.0));
}

#[rstest]
fn start_solutions_are_offered_first(mut knapsack: ExhaustiveModel) {
    knapsack.set_start(&[1.0, 0.0, 0.0]).expect("start");
    let mut recorder = Recorder::default();
    knapsack.optimize(Some(&mut recorder)).expect("optimise");
    assert_eq!(recorder.candidates.first(), Some(&vec![1.0, 0.0, 0.0]));
    assert_eq!(knapsack.objective_value(), Ok(7.0));
}

#[rstest]
fn zero_time_limit_stops_immediately(mut knapsack: ExhaustiveModel) {
    knapsack.set_time_limit(Some(Duration::ZERO));
    knapsack.optimize(None).expect("optimise");
    assert_eq!(knapsack.status(), Ok(MipStatus::TimeLimit));
    assert_eq!(knapsack.objective_bound(), Ok(12.0));
    assert_eq!(knapsack.objective_value(), Err(MipError::NoSolution));
}

#[rstest]
fn attributes_require_optimisation(knapsack: ExhaustiveModel) {
    assert_eq!(knapsack.status(), Err(MipError::NotOptimised));
    assert_eq!(knapsack.solution_count(), 0);
}

#[rstest]
fn rows_must_reference_existing_columns(mut knapsack: ExhaustiveModel) {
    let result = knapsack.add_constraint(
        "dangling",
        LinearConstraint::new(ConstraintOp::LessEqual, 1.0).with_term(7, 1.0),
    );
    assert_eq!(result, Err(MipError::UnknownColumn { index: 7, count: 3 }));
}

#[rstest]
fn binary_columns_need_an_integral_value() {
    let mut model = ExhaustiveModel::new("bounds");
    let result = model.add_var(Variable::binary("x", 0.0).with_upper(-0.5));
    assert!(matches!(result, Err(MipError::EmptyBounds { .. })));
    let fixed = model.add_var(Variable::binary("x", 0.0).with_upper(0.5));
    assert_eq!(fixed, Ok(0));
}
