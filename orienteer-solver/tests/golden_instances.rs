#![expect(
    clippy::expect_used,
    reason = "regression tests use expect for readable failures"
)]

//! Golden instance regression tests for the decomposition solver.
//!
//! Each file under `tests/golden/` holds an instance in the on-disk JSON
//! layout, the solver options to run it with and the optimum found by
//! enumerating every tour. The exhaustive backend proves optimality on
//! these sizes, so the objective and visited node set must match exactly.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use orienteer_core::InstanceRecord;
use orienteer_mip_exhaustive::ExhaustiveBackend;
use orienteer_solver::{
    CutFamily, DecompositionConfig, DecompositionSolver, SolveState, Strategy, SubproblemKind,
};
use rstest::rstest;
use serde::Deserialize;

/// Deserialised golden case.
#[derive(Debug, Deserialize)]
struct GoldenInstance {
    #[expect(dead_code, reason = "kept for documentation in JSON files")]
    description: String,
    instance: InstanceRecord,
    options: Options,
    expected: Expected,
}

/// Solver options as command-line tokens.
#[derive(Debug, Deserialize)]
struct Options {
    strategy: String,
    subproblem: String,
    cuts: Vec<String>,
}

impl Options {
    fn to_config(&self) -> DecompositionConfig {
        let cuts = self
            .cuts
            .iter()
            .map(|token| token.parse::<CutFamily>().expect("known cut family"))
            .collect();
        DecompositionConfig::default()
            .with_strategy(self.strategy.parse::<Strategy>().expect("known strategy"))
            .with_subproblem(
                self.subproblem
                    .parse::<SubproblemKind>()
                    .expect("known subproblem"),
            )
            .with_cuts(cuts)
    }
}

/// Proven optimum.
#[derive(Debug, Deserialize)]
struct Expected {
    obj: i64,
    nodes: Vec<usize>,
}

fn load(name: &str) -> GoldenInstance {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(format!("{name}.json"));
    let contents = fs::read_to_string(&path).expect("golden file should be readable");
    serde_json::from_str(&contents).expect("golden file should parse")
}

#[rstest]
#[case::square_full_budget("square_full_budget")]
#[case::twin_triangles_bch("twin_triangles_bch")]
#[case::twin_triangles_lbbd_op("twin_triangles_lbbd_op")]
#[case::explicit_pentagon_atsp("explicit_pentagon_atsp")]
fn golden_instances_reach_their_optimum(#[case] name: &str) {
    let golden = load(name);
    let instance = golden.instance.to_instance().expect("valid instance");
    let solver = DecompositionSolver::with_config(ExhaustiveBackend, golden.options.to_config());
    let report = solver.solve(&instance).expect("solve succeeds");

    assert_eq!(report.state, SolveState::Converged, "{name}");
    assert!(report.record.optimal, "{name}");
    assert_eq!(report.record.obj, golden.expected.obj, "{name}");
    let visited: BTreeSet<usize> = report.record.route.iter().copied().collect();
    let expected: BTreeSet<usize> = golden.expected.nodes.iter().copied().collect();
    assert_eq!(visited, expected, "{name}");
    assert_eq!(report.record.route.first(), Some(&0), "{name}");
    assert!(report.record.route_cost <= instance.budget(), "{name}");
    assert_eq!(
        instance.distances().tour_length(&report.record.route),
        report.record.route_cost,
        "{name}"
    );
}
