//! State carried through one decomposition solve.
//!
//! A [`SolveSession`] is created per call to
//! [`DecompositionSolver::solve`](crate::DecompositionSolver::solve) and
//! lent to the master callback for the duration of each optimise call. The
//! backend dispatches callbacks one at a time, so the session needs no
//! locking.

use std::time::Instant;

use orienteer_core::{SolutionRecord, SolveError, Tour};

use crate::CutFamily;

/// Lifecycle of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolveState {
    /// No model has been optimised yet.
    #[default]
    Idle,
    /// The backend is searching the master relaxation.
    Solving,
    /// A master candidate is being cut off.
    CallbackCutting,
    /// A heuristic incumbent is being handed to the backend.
    CallbackHeuristicInject,
    /// The search proved its incumbent optimal or validated it.
    Converged,
    /// The time limit stopped the search.
    TimeLimited,
    /// The master relaxation has no feasible point.
    Infeasible,
    /// The search stopped for any other reason.
    Aborted,
}

impl SolveState {
    /// Whether the solve has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Converged | Self::TimeLimited | Self::Infeasible | Self::Aborted
        )
    }
}

/// Best feasible tour known to the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncumbentState {
    /// Tour, depot first.
    pub tour: Tour,
    /// Reward collected.
    pub value: i64,
    /// Cyclic length.
    pub length: i64,
    /// Whether the tour still has to be handed to the backend.
    pub pending_injection: bool,
}

/// Origin of a cut, for bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutKind {
    /// Subtour elimination.
    Sec,
    /// Any Benders family.
    Benders,
    /// Orienteering subproblem value cut.
    Op,
}

impl From<CutFamily> for CutKind {
    fn from(family: CutFamily) -> Self {
        if family.is_benders() {
            Self::Benders
        } else {
            Self::Sec
        }
    }
}

/// Cuts and callbacks counted over a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CutCounters {
    /// Subtour elimination cuts added.
    pub sec: usize,
    /// Benders cuts added.
    pub benders: usize,
    /// Orienteering value cuts added.
    pub op: usize,
    /// Master candidates inspected.
    pub callbacks: usize,
}

impl CutCounters {
    /// Count one cut of `kind`.
    pub const fn record(&mut self, kind: CutKind) {
        match kind {
            CutKind::Sec => self.sec += 1,
            CutKind::Benders => self.benders += 1,
            CutKind::Op => self.op += 1,
        }
    }

    /// Cuts of `kind` counted so far.
    #[must_use]
    pub const fn count(&self, kind: CutKind) -> usize {
        match kind {
            CutKind::Sec => self.sec,
            CutKind::Benders => self.benders,
            CutKind::Op => self.op,
        }
    }
}

/// Mutable state of one solve.
#[derive(Debug)]
pub struct SolveSession {
    state: SolveState,
    incumbent: IncumbentState,
    counters: CutCounters,
    record: SolutionRecord,
    failure: Option<SolveError>,
    started: Instant,
}

impl Default for SolveSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveSession {
    /// A fresh session with an empty incumbent; the clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SolveState::Idle,
            incumbent: IncumbentState::default(),
            counters: CutCounters::default(),
            record: SolutionRecord::default(),
            failure: None,
            started: Instant::now(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SolveState {
        self.state
    }

    /// Move to `next`.
    pub fn transition(&mut self, next: SolveState) {
        if self.state != next {
            log::debug!("solve state {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }

    /// Best known tour.
    #[must_use]
    pub const fn incumbent(&self) -> &IncumbentState {
        &self.incumbent
    }

    /// Counters gathered so far.
    #[must_use]
    pub const fn counters(&self) -> &CutCounters {
        &self.counters
    }

    /// Count one cut of `kind`.
    pub const fn count_cut(&mut self, kind: CutKind) {
        self.counters.record(kind);
    }

    /// Count one inspected master candidate.
    pub const fn count_callback(&mut self) {
        self.counters.callbacks += 1;
    }

    /// Record under construction.
    #[must_use]
    pub const fn record(&self) -> &SolutionRecord {
        &self.record
    }

    /// Mutable access to the record under construction.
    pub const fn record_mut(&mut self) -> &mut SolutionRecord {
        &mut self.record
    }

    /// Append a diagnostic sentence to the record comment.
    pub fn note(&mut self, message: &str) {
        log::info!("{message}");
        self.record.push_comment(message);
    }

    /// Offer a heuristic tour worth `value` found for a master candidate
    /// worth `master_objective`.
    ///
    /// The tour replaces the incumbent only when it is strictly better. It
    /// is then marked for injection unless the master candidate already
    /// carries the same value, in which case the backend holds it anyway.
    /// Returns whether the incumbent changed.
    pub fn offer_incumbent(
        &mut self,
        tour: Tour,
        length: i64,
        value: i64,
        master_objective: i64,
    ) -> bool {
        if value <= self.incumbent.value {
            return false;
        }
        if value == master_objective {
            log::info!("master candidate already carries the tour value {value}");
        } else {
            log::info!(
                "new best tour with value {value} for a master candidate worth {master_objective}"
            );
        }
        self.incumbent = IncumbentState {
            tour,
            value,
            length,
            pending_injection: value != master_objective,
        };
        true
    }

    /// Take `tour` as the validated solution, whatever its value.
    pub fn replace_incumbent(&mut self, tour: Tour, length: i64, value: i64) {
        self.incumbent = IncumbentState {
            tour,
            value,
            length,
            pending_injection: false,
        };
    }

    /// Mark the incumbent as handed to the backend.
    pub const fn clear_pending(&mut self) {
        self.incumbent.pending_injection = false;
    }

    /// Store a fatal error raised inside a callback.
    ///
    /// Only the first error is kept.
    pub fn fail(&mut self, error: SolveError) {
        if self.failure.is_none() {
            log::warn!("aborting the solve: {error}");
            self.failure = Some(error);
        }
    }

    /// Take the fatal error stored by [`Self::fail`].
    pub const fn take_failure(&mut self) -> Option<SolveError> {
        self.failure.take()
    }

    /// Finish the record: route, cost, elapsed time and counters.
    #[must_use]
    pub fn into_record(self) -> SolutionRecord {
        let Self {
            incumbent,
            counters,
            mut record,
            started,
            ..
        } = self;
        record.route = incumbent.tour.into_nodes();
        record.route_cost = incumbent.length;
        record.time = format!("{:?}", started.elapsed());
        record.push_comment(&format!(
            "Callbacks: {}, SEC cuts: {}, Benders cuts: {}, OP cuts: {}.",
            counters.callbacks, counters.sec, counters.benders, counters.op
        ));
        record
    }
}
