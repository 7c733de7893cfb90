//! [`DecompositionSolver`]: the master relaxation and its two control
//! strategies.
//!
//! The master is the two-index orienteering relaxation. Every candidate it
//! reports is checked for a closed tour over its selected nodes; when that
//! fails a subproblem decides whether the node set is feasible, and
//! over-budget candidates are cut off with the configured families while a
//! repaired tour seeds the incumbent.
//!
//! - [`Strategy::BranchAndCut`] runs one search and does all of this from
//!   the lazy-constraint callback.
//! - [`Strategy::LogicBenders`] resolves the master after every round of
//!   cuts and checks the optimum between runs.

mod bch;
mod callback;
mod lbbd;

use orienteer_core::mip::{MipBackend, MipModel};
use orienteer_core::{DistanceMatrix, Instance, SolutionRecord, SolveError, SolveFailure, Tour};

use crate::failure::construction;
use crate::formulation::register_orienteering;
use crate::session::{CutCounters, SolveSession, SolveState};
use crate::{
    CutLibrary, DecompositionConfig, RepairedTour, Strategy, SubproblemSolver, shorten_tour,
};

const TIME_LIMIT_REACHED: &str = "Time limit reached.";
const STOPPED_EARLY: &str =
    "For some reason the optimization stopped before the time limit without an optimal solution.";
const INFEASIBLE: &str = "Model is infeasible or unbounded.";

/// Outcome of a completed solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    /// Record to persist.
    pub record: SolutionRecord,
    /// Terminal state.
    pub state: SolveState,
    /// Cuts and callbacks counted during the solve.
    pub counters: CutCounters,
}

/// Exact orienteering solver built on a [`MipBackend`].
///
/// # Examples
/// ```
/// use orienteer_core::test_support::square_instance;
/// use orienteer_mip_exhaustive::ExhaustiveBackend;
/// use orienteer_solver::DecompositionSolver;
///
/// let solver = DecompositionSolver::new(ExhaustiveBackend);
/// let report = solver.solve(&square_instance(40)).expect("solve succeeds");
/// assert_eq!(report.record.obj, 15);
/// assert_eq!(report.record.route_cost, 40);
/// ```
#[derive(Debug, Clone)]
pub struct DecompositionSolver<B> {
    backend: B,
    config: DecompositionConfig,
}

impl<B: MipBackend> DecompositionSolver<B> {
    /// Construct a solver using default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, DecompositionConfig::default())
    }

    /// Construct a solver with explicit configuration.
    pub const fn with_config(backend: B, config: DecompositionConfig) -> Self {
        Self { backend, config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Solve `instance`.
    ///
    /// Infeasible masters and time limits end in a report whose
    /// [`SolveReport::state`] says so.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveFailure`] for every fatal [`SolveError`]; its
    /// partial record carries the comment, bounds and best tour gathered
    /// before the failure.
    pub fn solve(&self, instance: &Instance) -> Result<SolveReport, SolveFailure> {
        let mut session = SolveSession::new();
        if let Err(error) = self.run(instance, &mut session) {
            session.note(&format!("Solve aborted: {error}."));
            session.transition(SolveState::Aborted);
            return Err(SolveFailure::new(error, session.into_record()));
        }
        let objective = session.record().obj;
        check_validity(instance, session.incumbent().tour.nodes(), objective);
        let state = session.state();
        let counters = *session.counters();
        log::info!(
            "{} finished {state:?} with objective {objective} after {} callbacks",
            instance.name(),
            counters.callbacks
        );
        Ok(SolveReport {
            record: session.into_record(),
            state,
            counters,
        })
    }

    fn run(&self, instance: &Instance, session: &mut SolveSession) -> Result<(), SolveError> {
        let mut model = self
            .backend
            .create_model(instance.name())
            .map_err(construction("master model".to_owned()))?;
        register_orienteering(
            &mut model,
            instance.distances(),
            instance.prices(),
            instance.budget(),
            self.config.y_bounds,
        )?;
        model.set_lazy_constraints(true);
        let master = Master {
            instance,
            config: &self.config,
            cuts: CutLibrary::new(instance),
            subproblems: SubproblemSolver::new(&self.backend, instance),
        };
        log::info!(
            "solving {} ({} nodes, budget {}) with {} and {} subproblems",
            instance.name(),
            instance.node_count(),
            instance.budget(),
            self.config.strategy,
            self.config.subproblem
        );
        match self.config.strategy {
            Strategy::BranchAndCut => bch::solve(&master, &mut model, session),
            Strategy::LogicBenders => lbbd::solve(&master, &mut model, session),
        }
    }
}

/// Read-only context shared by the strategies and the master callback.
struct Master<'a, B> {
    instance: &'a Instance,
    config: &'a DecompositionConfig,
    cuts: CutLibrary<'a>,
    subproblems: SubproblemSolver<'a, B>,
}

impl<B> Master<'_, B> {
    const fn distances(&self) -> &DistanceMatrix {
        self.instance.distances()
    }

    fn repair(&self, tour: &Tour, length: i64, value: i64) -> RepairedTour {
        shorten_tour(
            tour,
            self.instance.distances(),
            self.instance.prices(),
            length,
            self.instance.budget(),
            value,
        )
    }
}

/// Recompute length and value of `route` and compare them with the budget
/// and the reported objective.
fn check_validity(instance: &Instance, route: &[usize], objective: i64) -> bool {
    let length = instance.distances().tour_length(route);
    let value = instance.route_value(route);
    let fits = length <= instance.budget();
    if fits && value == objective {
        log::info!("the computed solution is valid");
        return true;
    }
    if !fits {
        log::warn!(
            "the computed solution is too long: {length} exceeds the budget {}",
            instance.budget()
        );
    }
    if value != objective {
        log::warn!("the computed solution is worth {value} but the solver reports {objective}");
    }
    false
}
