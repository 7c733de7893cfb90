//! Behavioural tests for `DecompositionSolver` using rstest-bdd.

use std::cell::RefCell;
use std::time::Duration;

use orienteer_core::test_support::{clusters_instance, square_instance};
use orienteer_core::{Instance, SolveFailure};
use orienteer_mip_exhaustive::ExhaustiveBackend;
use orienteer_solver::{
    CutFamily, DecompositionConfig, DecompositionSolver, SolveReport, SolveState, Strategy,
    SubproblemKind, YBounds,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug)]
struct DecompositionWorld {
    instance: RefCell<Option<Instance>>,
    config: RefCell<DecompositionConfig>,
    outcome: RefCell<Option<Result<SolveReport, SolveFailure>>>,
}

impl DecompositionWorld {
    fn new() -> Self {
        Self {
            instance: RefCell::new(None),
            config: RefCell::new(DecompositionConfig::default()),
            outcome: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_report(&self) -> SolveReport {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
            .expect("expected solve success")
    }
}

#[fixture]
fn world() -> DecompositionWorld {
    DecompositionWorld::new()
}

#[given("the square instance with budget {budget}")]
fn given_square(world: &DecompositionWorld, budget: i64) {
    world.instance.replace(Some(square_instance(budget)));
}

#[given("the clusters instance with budget {budget}")]
fn given_clusters(world: &DecompositionWorld, budget: i64) {
    world.instance.replace(Some(clusters_instance(budget)));
}

#[given("the {strategy} strategy with {subproblem} subproblems")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_strategy(world: &DecompositionWorld, strategy: String, subproblem: String) {
    let strategy: Strategy = strategy.parse().expect("known strategy");
    let subproblem: SubproblemKind = subproblem.parse().expect("known subproblem");
    let config = world.config.borrow().clone();
    world.config.replace(
        config
            .with_strategy(strategy)
            .with_subproblem(subproblem),
    );
}

#[given("only {family} cuts")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_cut_family(world: &DecompositionWorld, family: String) {
    let family: CutFamily = family.parse().expect("known cut family");
    let config = world.config.borrow().clone();
    world.config.replace(config.with_cuts(vec![family]));
}

#[given("binary edge columns")]
fn given_binary_edges(world: &DecompositionWorld) {
    let config = world.config.borrow().clone();
    world.config.replace(config.with_y_bounds(YBounds::Binary));
}

#[given("a time limit of {seconds} seconds")]
fn given_time_limit(world: &DecompositionWorld, seconds: u64) {
    let config = world.config.borrow().clone();
    world
        .config
        .replace(config.with_time_limit(Some(Duration::from_secs(seconds))));
}

#[when("the decomposition solver runs")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_solver_runs(world: &DecompositionWorld) {
    let config = world.config.borrow().clone();
    let solver = DecompositionSolver::with_config(ExhaustiveBackend, config);
    let outcome = {
        let instance = world.instance.borrow();
        solver.solve(instance.as_ref().expect("instance should be chosen"))
    };
    world.outcome.replace(Some(outcome));
}

#[then("the solve converges with objective {objective}")]
fn then_converges(world: &DecompositionWorld, objective: i64) {
    let report = world.expect_report();
    assert_eq!(report.state, SolveState::Converged);
    assert!(report.record.optimal);
    assert_eq!(report.record.obj, objective);
}

#[then("the route starts at the depot and costs {cost}")]
fn then_route_costs(world: &DecompositionWorld, cost: i64) {
    let report = world.expect_report();
    assert_eq!(report.record.route.first(), Some(&0));
    assert_eq!(report.record.route_cost, cost);
}

#[then("at least one Benders cut is recorded")]
fn then_benders_recorded(world: &DecompositionWorld) {
    let report = world.expect_report();
    assert!(report.counters.benders >= 1);
    assert!(!report.record.comment.contains("Benders cuts: 0"));
}

#[then("at least one orienteering cut is recorded")]
fn then_op_recorded(world: &DecompositionWorld) {
    let report = world.expect_report();
    assert!(report.counters.op >= 1);
}

#[then("the solve ends with an infeasible master")]
fn then_infeasible(world: &DecompositionWorld) {
    let report = world.expect_report();
    assert_eq!(report.state, SolveState::Infeasible);
    assert!(!report.record.optimal);
    assert!(report.record.comment.contains("infeasible"));
}

#[then("the solve stops at the time limit")]
fn then_time_limited(world: &DecompositionWorld) {
    let report = world.expect_report();
    assert_eq!(report.state, SolveState::TimeLimited);
    assert!(report.record.comment.contains("Time limit reached."));
}

#[scenario(path = "tests/features/decomposition.feature", index = 0)]
fn whole_square(world: DecompositionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/decomposition.feature", index = 1)]
fn square_short_of_budget(world: DecompositionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/decomposition.feature", index = 2)]
fn benders_clusters(world: DecompositionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/decomposition.feature", index = 3)]
fn orienteering_clusters(world: DecompositionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/decomposition.feature", index = 4)]
fn infeasible_master(world: DecompositionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/decomposition.feature", index = 5)]
fn zero_time_limit(world: DecompositionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/decomposition.feature", index = 6)]
fn binary_window_cuts(world: DecompositionWorld) {
    let _ = world;
}
